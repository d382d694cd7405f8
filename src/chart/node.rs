//! Per-state metadata in the compiled graph.

use crate::core::{Action, Guard};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What kind of state a node is. Dispatch on this tag rather than on types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    Simple,
    Composite,
    Final,
    ShallowHistory,
    DeepHistory,
}

impl StateKind {
    /// Whether this is a history pseudo-state of either depth.
    pub fn is_history(self) -> bool {
        matches!(self, StateKind::ShallowHistory | StateKind::DeepHistory)
    }
}

/// A transition as stored in the compiled graph.
///
/// `name` is the event name the transition is keyed by on its source state;
/// bare string targets in the definition are normalized to this form with no
/// guard and no action.
#[derive(Clone, Debug)]
pub struct CompiledTransition {
    pub name: String,
    pub target: String,
    pub guard: Option<Guard>,
    pub action: Option<Action>,
}

/// A state in the compiled graph.
#[derive(Clone, Debug)]
pub struct StateNode {
    pub name: String,
    pub kind: StateKind,
    /// `None` only for the root.
    pub parent: Option<String>,
    /// Immediate substates, in declaration order.
    pub children: Vec<String>,
    /// Initial substate of a composite; `None` for leaves.
    pub initial: Option<String>,
    /// Transitions declared on this exact state, keyed by event name.
    pub transitions: IndexMap<String, CompiledTransition>,
    pub entry: Option<Action>,
    pub exit: Option<Action>,
    /// Whether any immediate child is a history pseudo-state.
    pub has_history: bool,
}

impl StateNode {
    pub fn is_composite(&self) -> bool {
        self.kind == StateKind::Composite
    }

    pub fn is_final(&self) -> bool {
        self.kind == StateKind::Final
    }
}
