//! Game configuration.

use crate::bus::DEFAULT_MAX_EMIT_DEPTH;
use crate::error::InvalidConfigurationError;
use crate::types::Sign;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Side length used when none is configured.
pub const DEFAULT_BOARD_SIZE: usize = 3;
/// Smallest supported side length.
pub const MIN_BOARD_SIZE: usize = 3;
/// Largest supported side length.
pub const MAX_BOARD_SIZE: usize = 16;

/// Settings for one game session.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// board_size = 4
/// first_name = "Ada"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side length.
    board_size: usize,

    /// Sign of the player who moves first.
    first_sign: Sign,

    /// Sign of the player who moves second.
    second_sign: Sign,

    /// Display name of the first mover.
    first_name: String,

    /// Display name of the second mover.
    second_name: String,

    /// Limit on nested event emits.
    max_emit_depth: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            first_sign: Sign::X,
            second_sign: Sign::O,
            first_name: String::new(),
            second_name: String::new(),
            max_emit_depth: DEFAULT_MAX_EMIT_DEPTH,
        }
    }
}

impl GameConfig {
    /// Creates the default configuration (3x3, X moves before O).
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the board side length.
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Sets both signs, first mover first.
    pub fn with_signs(mut self, first: Sign, second: Sign) -> Self {
        self.first_sign = first;
        self.second_sign = second;
        self
    }

    /// Sets both display names, first mover first.
    pub fn with_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.second_name = second.into();
        self
    }

    /// Sets the nested emit limit.
    pub fn with_max_emit_depth(mut self, max_emit_depth: usize) -> Self {
        self.max_emit_depth = max_emit_depth;
        self
    }

    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InvalidConfigurationError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            InvalidConfigurationError::new(format!("Failed to read config file: {}", e))
        })?;

        let config = Self::from_toml_str(&content)?;
        info!(board_size = config.board_size, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, InvalidConfigurationError> {
        let config: Self = toml::from_str(content).map_err(|e| {
            InvalidConfigurationError::new(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that a game can start with these settings.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), InvalidConfigurationError> {
        validate_board_size(self.board_size)?;

        if self.first_sign == self.second_sign {
            warn!(sign = %self.first_sign, "Players share a sign");
            return Err(InvalidConfigurationError::new(format!(
                "Players must use different signs (both are '{}')",
                self.first_sign
            )));
        }

        for sign in [self.first_sign, self.second_sign] {
            if sign.as_char().is_whitespace() || sign.as_char().is_control() {
                warn!(sign = ?sign, "Unprintable sign");
                return Err(InvalidConfigurationError::new(format!(
                    "Sign {:?} is not a visible character",
                    sign.as_char()
                )));
            }
        }

        if self.max_emit_depth == 0 {
            return Err(InvalidConfigurationError::new(
                "max_emit_depth must be at least 1",
            ));
        }

        Ok(())
    }
}

/// Checks a board side length against the supported range.
#[instrument]
pub fn validate_board_size(size: usize) -> Result<usize, InvalidConfigurationError> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        warn!(size, "Board size out of range");
        return Err(InvalidConfigurationError::new(format!(
            "Board size must be between {} and {} (got {})",
            MIN_BOARD_SIZE, MAX_BOARD_SIZE, size
        )));
    }
    Ok(size)
}
