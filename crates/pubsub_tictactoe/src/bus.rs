//! Synchronous, single-threaded publish/subscribe.
//!
//! Handlers run in registration order on the emitting call stack. An emit
//! from inside a handler recurses immediately; the bus counts that nesting
//! and refuses to go deeper than its configured limit.

use crate::error::EventBusError;
use crate::events::{Event, EventName};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, instrument, trace, warn};

/// Default limit on nested emits.
pub const DEFAULT_MAX_EMIT_DEPTH: usize = 32;

/// A subscribed callback.
///
/// Handlers are compared by allocation, so keep the `Rc` returned from
/// [`EventBus::on`] (or the one passed to [`EventBus::subscribe`]) to
/// unsubscribe later.
pub type Handler = Rc<dyn Fn(&Event)>;

/// Maps event names to ordered handler lists.
pub struct EventBus {
    handlers: RefCell<HashMap<EventName, Vec<Handler>>>,
    depth: Cell<usize>,
    max_depth: usize,
}

impl EventBus {
    /// Creates a bus with [`DEFAULT_MAX_EMIT_DEPTH`].
    #[instrument]
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_EMIT_DEPTH)
    }

    /// Creates a bus that allows at most `max_depth` nested emits.
    #[instrument]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            handlers: RefCell::new(HashMap::new()),
            depth: Cell::new(0),
            max_depth,
        }
    }

    /// Registers `handler` for future emissions of `name`.
    ///
    /// The same handler may be registered more than once; each registration
    /// is invoked independently.
    #[instrument(skip(self, handler))]
    pub fn subscribe(&self, name: EventName, handler: Handler) {
        let mut handlers = self.handlers.borrow_mut();
        let list = handlers.entry(name).or_default();
        list.push(handler);
        debug!(count = list.len(), "Handler subscribed");
    }

    /// Wraps `f` as a [`Handler`], subscribes it, and returns it for later
    /// unsubscription.
    pub fn on<F>(&self, name: EventName, f: F) -> Handler
    where
        F: Fn(&Event) + 'static,
    {
        let handler: Handler = Rc::new(f);
        self.subscribe(name, Rc::clone(&handler));
        handler
    }

    /// Removes the first registration of `handler` under `name`.
    ///
    /// Returns whether a registration was removed. Unknown names and absent
    /// handlers are a no-op.
    #[instrument(skip(self, handler))]
    pub fn unsubscribe(&self, name: EventName, handler: &Handler) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let Some(list) = handlers.get_mut(&name) else {
            trace!("No handlers registered");
            return false;
        };

        match list.iter().position(|h| same_handler(h, handler)) {
            Some(index) => {
                list.remove(index);
                debug!(remaining = list.len(), "Handler unsubscribed");
                true
            }
            None => {
                trace!("Handler not registered");
                false
            }
        }
    }

    /// Invokes every handler currently registered for the event's name.
    ///
    /// The handler list is captured before the first handler runs, so
    /// subscriptions made during the emit apply to later emits only. Returns
    /// the number of handlers invoked.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::DepthExceeded`] without invoking anything
    /// when the emit would nest deeper than the bus allows.
    #[instrument(skip(self, event), fields(event = %event.name(), depth = self.depth.get()))]
    pub fn emit(&self, event: &Event) -> Result<usize, EventBusError> {
        let name = event.name();
        let depth = self.depth.get();
        if depth >= self.max_depth {
            warn!(limit = self.max_depth, "Emit refused: nesting limit reached");
            return Err(EventBusError::DepthExceeded {
                name,
                limit: self.max_depth,
            });
        }

        let snapshot: Vec<Handler> = self
            .handlers
            .borrow()
            .get(&name)
            .cloned()
            .unwrap_or_default();

        if snapshot.is_empty() {
            trace!("No handlers for event");
            return Ok(0);
        }

        let _guard = DepthGuard::enter(&self.depth);
        for handler in &snapshot {
            handler(event);
        }

        debug!(handlers = snapshot.len(), "Event delivered");
        Ok(snapshot.len())
    }

    /// Returns how many registrations exist for `name`.
    pub fn handler_count(&self, name: EventName) -> usize {
        self.handlers.borrow().get(&name).map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<EventName, usize> = self
            .handlers
            .borrow()
            .iter()
            .map(|(name, list)| (*name, list.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("handlers", &counts)
            .field("depth", &self.depth.get())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

fn same_handler(a: &Handler, b: &Handler) -> bool {
    // Compare data pointers only; vtable addresses are not unique.
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Restores the nesting depth when an emit unwinds or returns.
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self { depth }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
