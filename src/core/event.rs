//! Events dispatched to and raised within a machine.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Prefix reserved by the engine for completion events. The event
/// `done.state.<id>` is raised when a final child of `<id>` is entered.
pub const DONE_STATE_PREFIX: &str = "done.state.";

/// A named signal, optionally carrying parameters.
///
/// Events convert from bare strings (`"submit"`) or from `(name, params)`
/// pairs. Parameters are visible to guards and actions through the context's
/// params slot for the duration of the triggered microstep.
///
/// # Example
///
/// ```rust
/// use statecraft::Event;
/// use serde_json::json;
///
/// let bare = Event::from("submit");
/// assert_eq!(bare.name(), "submit");
/// assert!(bare.params().is_none());
///
/// let with_params = Event::with_params("submit", json!({ "amount": 42 }));
/// assert_eq!(with_params.params(), Some(&json!({ "amount": 42 })));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "EventRepr", into = "EventRepr")]
pub struct Event {
    name: String,
    params: Option<Value>,
}

impl Event {
    /// Create a bare event with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Event {
            name: name.into(),
            params: None,
        }
    }

    /// Create an event carrying parameters.
    pub fn with_params(name: impl Into<String>, params: Value) -> Self {
        Event {
            name: name.into(),
            params: Some(params),
        }
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The event parameters, if any.
    pub fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    /// The completion event for `parent`, i.e. `done.state.<parent>`.
    pub(crate) fn done_state(parent: &str) -> Self {
        Event::new(format!("{DONE_STATE_PREFIX}{parent}"))
    }

    /// The representation used on the reserved context queue: a bare JSON
    /// string when there are no parameters, an object otherwise.
    pub(crate) fn into_value(self) -> Value {
        match self.params {
            None => Value::String(self.name),
            Some(params) => json!({ "name": self.name, "params": params }),
        }
    }

    /// Inverse of [`Event::into_value`]. Values the engine did not write
    /// itself (reserved keys are off-limits to authors) are skipped.
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Event::new(name)),
            Value::Object(fields) => {
                let name = fields.get("name")?.as_str()?.to_string();
                let params = fields.get("params").cloned();
                Some(Event { name, params })
            }
            _ => None,
        }
    }
}

impl From<&str> for Event {
    fn from(name: &str) -> Self {
        Event::new(name)
    }
}

impl From<String> for Event {
    fn from(name: String) -> Self {
        Event::new(name)
    }
}

impl From<(&str, Value)> for Event {
    fn from((name, params): (&str, Value)) -> Self {
        Event::with_params(name, params)
    }
}

impl From<(String, Value)> for Event {
    fn from((name, params): (String, Value)) -> Self {
        Event::with_params(name, params)
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum EventRepr {
    Full { name: String, params: Value },
    Bare(String),
}

impl From<Event> for EventRepr {
    fn from(event: Event) -> Self {
        match event.params {
            Some(params) => EventRepr::Full {
                name: event.name,
                params,
            },
            None => EventRepr::Bare(event.name),
        }
    }
}

impl From<EventRepr> for Event {
    fn from(repr: EventRepr) -> Self {
        match repr {
            EventRepr::Full { name, params } => Event {
                name,
                params: Some(params),
            },
            EventRepr::Bare(name) => Event::new(name),
        }
    }
}
