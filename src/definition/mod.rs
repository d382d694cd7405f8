//! Author-facing statechart definitions.
//!
//! A definition is a tree of tagged variants: ordinary states (simple when
//! they have no substates, composite otherwise), final states, and history
//! pseudo-states. Definitions carry first-class `Action` and `Guard` values
//! and are turned into an addressable graph by [`Statechart::build`].
//!
//! Construction is fluent, in the style of a builder:
//!
//! ```rust
//! use statecraft::{Action, StateDef, Statechart, TransitionSpec};
//! use serde_json::json;
//!
//! let definition = StateDef::new()
//!     .initial("idle")
//!     .substate("idle", StateDef::new().on("start", "working"))
//!     .substate(
//!         "working",
//!         StateDef::new()
//!             .entry(Action::new(|ctx| ctx.put("busy", json!(true))))
//!             .on("finish", TransitionSpec::to("idle").when(|ctx| {
//!                 ctx.get("busy") == Some(&json!(true))
//!             })),
//!     );
//!
//! let chart = Statechart::build(definition).unwrap();
//! assert!(chart.contains("working"));
//! ```
//!
//! [`Statechart::build`]: crate::Statechart::build

use crate::core::{Action, Context, Guard};
use indexmap::IndexMap;

/// A node of the definition tree.
#[derive(Clone, Debug)]
pub enum Definition {
    /// A simple or composite state, depending on whether it has substates.
    State(StateDef),
    /// A final state; entering it raises `done.state.<parent>`.
    Final(FinalDef),
    /// A history pseudo-state marker.
    History(HistoryDef),
}

/// A simple or composite state definition.
///
/// A `StateDef` with substates is composite and must name an `initial`
/// descendant; one without substates is simple. A composite with substates
/// declared but none reachable as `initial` is rejected at build time.
#[derive(Clone, Debug, Default)]
pub struct StateDef {
    pub(crate) initial: Option<String>,
    pub(crate) substates: IndexMap<String, Definition>,
    pub(crate) transitions: IndexMap<String, TransitionSpec>,
    pub(crate) entry: Option<Action>,
    pub(crate) exit: Option<Action>,
}

impl StateDef {
    /// Create an empty state definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the initial substate entered when this composite is entered.
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Add a named substate, making this state composite.
    pub fn substate(mut self, name: impl Into<String>, definition: impl Into<Definition>) -> Self {
        self.substates.insert(name.into(), definition.into());
        self
    }

    /// Declare a transition for `event`, local to this state.
    ///
    /// The spec may be a bare target name or a full [`TransitionSpec`] with
    /// a guard and an action.
    pub fn on(mut self, event: impl Into<String>, spec: impl Into<TransitionSpec>) -> Self {
        self.transitions.insert(event.into(), spec.into());
        self
    }

    /// Set the entry action.
    pub fn entry(mut self, action: Action) -> Self {
        self.entry = Some(action);
        self
    }

    /// Set the exit action.
    pub fn exit(mut self, action: Action) -> Self {
        self.exit = Some(action);
        self
    }
}

/// A final state definition.
#[derive(Clone, Debug, Default)]
pub struct FinalDef {
    pub(crate) entry: Option<Action>,
}

impl FinalDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry action, run when the final state is entered.
    pub fn entry(mut self, action: Action) -> Self {
        self.entry = Some(action);
        self
    }
}

/// Depth of configuration a history state is meant to restore.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryKind {
    /// Immediate child only.
    Shallow,
    /// Full nested configuration.
    Deep,
}

/// A history pseudo-state definition.
///
/// History states are compiled and the configurations of their parents are
/// recorded on exit, but this core does not resume them; targeting one enters
/// it as a leaf.
#[derive(Clone, Debug)]
pub struct HistoryDef {
    pub(crate) kind: HistoryKind,
}

impl HistoryDef {
    pub fn shallow() -> Self {
        HistoryDef {
            kind: HistoryKind::Shallow,
        }
    }

    pub fn deep() -> Self {
        HistoryDef {
            kind: HistoryKind::Deep,
        }
    }
}

/// A transition declaration: target state plus optional guard and action.
#[derive(Clone, Debug)]
pub struct TransitionSpec {
    pub(crate) target: String,
    pub(crate) guard: Option<Guard>,
    pub(crate) action: Option<Action>,
}

impl TransitionSpec {
    /// A transition to `target` with no guard and no action.
    pub fn to(target: impl Into<String>) -> Self {
        TransitionSpec {
            target: target.into(),
            guard: None,
            action: None,
        }
    }

    /// Attach a guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Attach a guard from a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Attach a transition action.
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

impl From<&str> for TransitionSpec {
    fn from(target: &str) -> Self {
        TransitionSpec::to(target)
    }
}

impl From<String> for TransitionSpec {
    fn from(target: String) -> Self {
        TransitionSpec::to(target)
    }
}

impl From<StateDef> for Definition {
    fn from(def: StateDef) -> Self {
        Definition::State(def)
    }
}

impl From<FinalDef> for Definition {
    fn from(def: FinalDef) -> Self {
        Definition::Final(def)
    }
}

impl From<HistoryDef> for Definition {
    fn from(def: HistoryDef) -> Self {
        Definition::History(def)
    }
}
