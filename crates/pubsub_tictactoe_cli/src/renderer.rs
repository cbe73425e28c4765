//! Renderers that observe a session through its event bus.
//!
//! Neither renderer reads game state directly. The terminal renderer keeps
//! its own copy of the grid and player names, built only from events.

use pubsub_tictactoe::{Event, EventBus, EventName, GameEnded, Players, Sign};
use std::cell::{Ref, RefCell};
use std::io::{self, Write};
use std::rc::Rc;
use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};

/// Draws the board as text whenever it changes.
pub struct TerminalRenderer<W> {
    view: Rc<RefCell<View<W>>>,
}

struct View<W> {
    out: W,
    size: usize,
    cells: Vec<Option<Sign>>,
    names: [(Sign, String); 2],
}

impl<W: Write + 'static> TerminalRenderer<W> {
    /// Creates a renderer writing to `out`, seeded with the players' signs
    /// and names.
    pub fn new(out: W, players: &Players) -> Self {
        let names = [
            (players.first().sign(), players.first().name().to_string()),
            (players.second().sign(), players.second().name().to_string()),
        ];
        Self {
            view: Rc::new(RefCell::new(View {
                out,
                size: 0,
                cells: Vec::new(),
                names,
            })),
        }
    }

    /// Subscribes to the outbound events and to player renames.
    #[instrument(skip_all)]
    pub fn attach(&self, bus: &EventBus) {
        for name in [
            EventName::BoardCreated,
            EventName::BoardUpdated,
            EventName::GameEnded,
            EventName::SetPlayerNames,
        ] {
            let view = Rc::clone(&self.view);
            bus.on(name, move |event| {
                if let Err(e) = view.borrow_mut().render(event) {
                    warn!(event = %event.name(), error = %e, "Failed to render event");
                }
            });
        }
        debug!("Terminal renderer attached");
    }

    /// Returns the underlying writer.
    pub fn output(&self) -> Ref<'_, W> {
        Ref::map(self.view.borrow(), |view| &view.out)
    }
}

impl<W: Write> View<W> {
    fn label(&self, sign: Sign) -> String {
        self.names
            .iter()
            .find(|(s, _)| *s == sign)
            .filter(|(_, name)| !name.is_empty())
            .map_or_else(|| sign.to_string(), |(_, name)| name.clone())
    }

    fn render(&mut self, event: &Event) -> io::Result<()> {
        match event {
            Event::BoardCreated { board } => {
                self.size = board.size();
                self.cells = board.squares().iter().map(|sq| sq.sign()).collect();
                writeln!(self.out, "New {0}x{0} game", self.size)?;
                self.draw_board()
            }
            Event::BoardUpdated { index, sign } => {
                if let Some(cell) = self.cells.get_mut(*index) {
                    *cell = Some(*sign);
                }
                let label = self.label(*sign);
                writeln!(self.out, "{label} ({sign}) takes cell {}", index + 1)?;
                self.draw_board()
            }
            Event::GameEnded(GameEnded::Win { sign, line }) => {
                let cells: Vec<String> = line
                    .positions()
                    .iter()
                    .map(|pos| (pos + 1).to_string())
                    .collect();
                let label = self.label(*sign);
                writeln!(
                    self.out,
                    "{label} ({sign}) wins with cells {}",
                    cells.join(", ")
                )
            }
            Event::GameEnded(GameEnded::Tie) => writeln!(self.out, "Tie game, the board is full"),
            Event::SetPlayerNames {
                first_name,
                second_name,
            } => {
                self.names[0].1 = first_name.clone();
                self.names[1].1 = second_name.clone();
                let (first, second) = (self.names[0].0, self.names[1].0);
                let (first_label, second_label) = (self.label(first), self.label(second));
                writeln!(
                    self.out,
                    "Players: {first_label} ({first}) vs {second_label} ({second})"
                )
            }
            _ => Ok(()),
        }
    }

    fn draw_board(&mut self) -> io::Result<()> {
        let size = self.size;
        if size == 0 {
            return Ok(());
        }
        let width = (size * size).to_string().len();
        let divider = vec!["-".repeat(width + 2); size].join("+");

        for (row, chunk) in self.cells.chunks(size).enumerate() {
            if row > 0 {
                writeln!(self.out, "{divider}")?;
            }
            let line: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let mark = match cell {
                        Some(sign) => sign.to_string(),
                        None => (row * size + col + 1).to_string(),
                    };
                    format!(" {mark:>width$} ")
                })
                .collect();
            writeln!(self.out, "{}", line.join("|"))?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Writes every outbound event as one JSON object per line.
pub struct JsonLinesRenderer<W> {
    out: Rc<RefCell<W>>,
}

impl<W: Write + 'static> JsonLinesRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Rc::new(RefCell::new(out)),
        }
    }

    /// Subscribes to every outbound event name.
    #[instrument(skip_all)]
    pub fn attach(&self, bus: &EventBus) {
        for name in EventName::iter().filter(|name| !name.is_inbound()) {
            let out = Rc::clone(&self.out);
            bus.on(name, move |event| {
                let written = serde_json::to_string(event)
                    .map_err(io::Error::from)
                    .and_then(|line| writeln!(out.borrow_mut(), "{line}"));
                if let Err(e) = written {
                    warn!(event = %event.name(), error = %e, "Failed to write event");
                }
            });
        }
        debug!("JSON lines renderer attached");
    }

    /// Returns the underlying writer.
    pub fn output(&self) -> Ref<'_, W> {
        self.out.borrow()
    }
}
