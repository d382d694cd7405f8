//! The compiled statechart: a flat, addressable state graph.
//!
//! [`Statechart::build`] flattens a [`Definition`](crate::Definition) tree
//! into a `name -> node` map with parent/children references by name. The
//! graph is immutable after build; the interpreter only queries it.

mod build;
mod error;
mod node;
mod queries;

pub use error::ChartError;
pub use node::{CompiledTransition, StateKind, StateNode};

use indexmap::IndexMap;

/// Name of the synthetic top node every chart has exactly one of.
pub const ROOT: &str = "root";

/// An immutable, flat state graph compiled from a definition tree.
///
/// State names are globally unique; each node references its parent and
/// children by name, which keeps the graph acyclic as a data structure even
/// though the hierarchy nests arbitrarily deep.
#[derive(Clone, Debug, Default)]
pub struct Statechart {
    states: IndexMap<String, StateNode>,
}

impl Statechart {
    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&StateNode> {
        self.states.get(name)
    }

    /// Whether a state with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// All state names, in definition order (root first).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Number of states, the root included.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
