//! The machine's extended state.
//!
//! A `Context` maps symbolic keys to arbitrary JSON values. It is threaded
//! through actions in functional style: mutating operations consume the
//! context and return the next one, leaving the original untouched.
//!
//! Two keys are reserved by the engine: [`PARAMS_KEY`] holds the parameters
//! of the event currently being processed, and [`QUEUE_KEY`] holds the
//! ordered list of internally raised events. Authors must not touch these
//! keys directly; they go through [`Context::get_params`] and
//! [`Context::raise_event`] instead.

use super::event::Event;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved key holding the parameters of the event being processed.
pub const PARAMS_KEY: &str = "exm_params";

/// Reserved key holding the queue of internally raised events.
pub const QUEUE_KEY: &str = "exm_queue";

/// Mapping from symbolic keys to arbitrary values, updated functionally.
///
/// # Example
///
/// ```rust
/// use statecraft::Context;
/// use serde_json::json;
///
/// let ctx = Context::new()
///     .put("user", json!("ada"))
///     .put("attempts", json!(0));
///
/// assert_eq!(ctx.get("user"), Some(&json!("ada")));
/// assert_eq!(ctx.get("missing"), None);
///
/// let ctx = ctx.delete("attempts");
/// assert!(ctx.get("attempts").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    entries: IndexMap<String, Value>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Context {
            entries: IndexMap::new(),
        }
    }

    /// Insert or replace a value, returning the updated context.
    pub fn put(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Look up a value, falling back to `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.entries.get(key).unwrap_or(default)
    }

    /// Remove a key, returning the updated context.
    pub fn delete(mut self, key: &str) -> Self {
        self.entries.shift_remove(key);
        self
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries, reserved slots included while one is in flight.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the parameters of the event currently being processed.
    pub fn put_params(self, params: Value) -> Self {
        self.put(PARAMS_KEY, params)
    }

    /// Read the parameters of the event currently being processed.
    ///
    /// Only populated while a parametrized event's microstep is in flight;
    /// the engine strips the slot afterwards.
    pub fn get_params(&self) -> Option<&Value> {
        self.entries.get(PARAMS_KEY)
    }

    /// Clear the params slot.
    pub fn delete_params(self) -> Self {
        self.delete(PARAMS_KEY)
    }

    /// Raise an internal event, appending it to the pending queue (FIFO).
    ///
    /// This is how actions feed the run-to-completion loop while keeping the
    /// pure `Context -> Context` signature.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statecraft::{Action, Context};
    ///
    /// let notify = Action::new(|ctx: Context| ctx.raise_event("notified"));
    /// let _ctx = notify.apply(Context::new());
    /// ```
    pub fn raise_event(mut self, event: impl Into<Event>) -> Self {
        let slot = self
            .entries
            .entry(QUEUE_KEY.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(queue) = slot {
            queue.push(event.into().into_value());
        }
        self
    }

    /// Extract and clear the pending internal events, in raise order.
    pub(crate) fn take_events(mut self) -> (Self, Vec<Event>) {
        let events = match self.entries.shift_remove(QUEUE_KEY) {
            Some(Value::Array(items)) => items.into_iter().filter_map(Event::from_value).collect(),
            _ => Vec::new(),
        };
        (self, events)
    }
}
