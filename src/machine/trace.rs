//! Microstep and macrostep trace records.
//!
//! The interpreter is the sole writer of these records. A macrostep covers
//! the processing of one external event to quiescence; each transition taken
//! along the way (including the chain of internally raised events) is one
//! microstep inside it.

use crate::core::{Action, Event};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The transition a microstep took: the triggering event name (`None` for
/// the initial entry into the machine) and the target state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub name: Option<String>,
    pub target: String,
}

/// A single transition: exit set, actions, entry set.
///
/// `entered` and `exited` are ordered as executed: exits deepest first,
/// entries shallowest first. `actions` is exactly the exit actions, then the
/// transition action if any, then the entry actions.
#[derive(Clone, Debug)]
pub struct Microstep {
    /// Absent when no transition fired for the event.
    pub transition: Option<TransitionRecord>,
    /// Parameters of the triggering event, if any.
    pub params: Option<Value>,
    pub entered: Vec<String>,
    pub exited: Vec<String>,
    pub actions: Vec<Action>,
}

/// The processing of one external event to stable quiescence.
///
/// Microsteps are appended in execution order; the aggregate lists
/// accumulate across them. The machine keeps macrosteps newest first.
#[derive(Clone, Debug)]
pub struct Macrostep {
    pub timestamp: DateTime<Utc>,
    /// The external event that opened this macrostep; `None` for the
    /// initialization macrostep.
    pub event: Option<Event>,
    pub transitions: Vec<TransitionRecord>,
    pub entered: Vec<String>,
    pub exited: Vec<String>,
    pub actions: Vec<Action>,
    pub microsteps: Vec<Microstep>,
}

impl Macrostep {
    pub(crate) fn open(event: Option<Event>) -> Self {
        Macrostep {
            timestamp: Utc::now(),
            event,
            transitions: Vec::new(),
            entered: Vec::new(),
            exited: Vec::new(),
            actions: Vec::new(),
            microsteps: Vec::new(),
        }
    }

    /// Append a microstep, folding its lists into the aggregates.
    pub(crate) fn absorb(&mut self, microstep: Microstep) {
        if let Some(transition) = &microstep.transition {
            self.transitions.push(transition.clone());
        }
        self.entered.extend(microstep.entered.iter().cloned());
        self.exited.extend(microstep.exited.iter().cloned());
        self.actions.extend(microstep.actions.iter().cloned());
        self.microsteps.push(microstep);
    }
}
