//! Graph queries over the compiled statechart.
//!
//! These are the pure primitives the interpreter is assembled from: ancestor
//! and descendant walks, initial chains, least common compound ancestor, and
//! the exit/entry sets around it.

use super::node::CompiledTransition;
use super::{Statechart, ROOT};
use crate::core::Action;
use indexmap::IndexSet;

impl Statechart {
    /// Ancestors of `name`, nearest parent first, root last. Empty for root.
    pub fn ancestors(&self, name: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut current = self.node(name);
        while let Some(node) = current {
            match &node.parent {
                Some(parent) => {
                    out.push(parent.clone());
                    current = self.node(parent);
                }
                None => break,
            }
        }
        out
    }

    /// Ancestors of `name`, stopping before `until` (exclusive). With no
    /// bound this is the full ancestor chain.
    pub fn ancestors_until(&self, name: &str, until: Option<&str>) -> Vec<String> {
        self.ancestors(name)
            .into_iter()
            .take_while(|ancestor| Some(ancestor.as_str()) != until)
            .collect()
    }

    /// Transitive children of `name`, not including `name` itself.
    pub fn descendants(&self, name: &str) -> IndexSet<String> {
        let mut out = IndexSet::new();
        let mut stack: Vec<String> = self
            .node(name)
            .map(|node| node.children.clone())
            .unwrap_or_default();
        while let Some(child) = stack.pop() {
            if let Some(node) = self.node(&child) {
                stack.extend(node.children.iter().cloned());
            }
            out.insert(child);
        }
        out
    }

    /// `[name, initial(name), initial(initial(name)), ...]` down to the
    /// first state without an `initial`. A single element for leaves;
    /// history states have no `initial` and therefore behave as leaves.
    pub fn initial_chain(&self, name: &str) -> Vec<String> {
        let mut chain = vec![name.to_string()];
        let mut current = self.node(name);
        while let Some(node) = current {
            match &node.initial {
                Some(next) => {
                    chain.push(next.clone());
                    current = self.node(next);
                }
                None => break,
            }
        }
        chain
    }

    /// Entry actions of `states`, preserving the input order and skipping
    /// states without one.
    pub fn entry_actions(&self, states: &[String]) -> Vec<Action> {
        states
            .iter()
            .filter_map(|state| self.node(state).and_then(|node| node.entry.clone()))
            .collect()
    }

    /// Exit actions of `states`, preserving the input order.
    pub fn exit_actions(&self, states: &[String]) -> Vec<Action> {
        states
            .iter()
            .filter_map(|state| self.node(state).and_then(|node| node.exit.clone()))
            .collect()
    }

    /// The transition declared on exactly `state` for `event`, if any. The
    /// interpreter walks the active branch up to root calling this per state.
    pub fn transition_for(&self, state: &str, event: &str) -> Option<&CompiledTransition> {
        self.node(state)?.transitions.get(event)
    }

    /// Least common compound ancestor: the deepest state having every
    /// element of `states` as a descendant. `None` when the list contains
    /// the root. Ties break toward the first ancestor of `states[0]`
    /// (nearest upward) that covers the rest.
    pub fn lcca(&self, states: &[&str]) -> Option<String> {
        if states.iter().any(|state| *state == ROOT) {
            return None;
        }
        let first = states.first()?;
        for ancestor in self.ancestors(first) {
            let descendants = self.descendants(&ancestor);
            if states.iter().all(|state| descendants.contains(*state)) {
                return Some(ancestor);
            }
        }
        None
    }

    /// States exited when transitioning out of `source` under `lcca`:
    /// the source itself, then its ancestors up to (excluding) the lcca.
    pub fn exiting_states(&self, source: &str, lcca: Option<&str>) -> Vec<String> {
        let mut out = vec![source.to_string()];
        out.extend(self.ancestors_until(source, lcca));
        out
    }

    /// States entered when transitioning into `target` under `lcca`:
    /// ancestors below the lcca in parent-before-child order, then the
    /// target's initial chain.
    pub fn entering_states(&self, target: &str, lcca: Option<&str>) -> Vec<String> {
        let mut out = self.ancestors_until(target, lcca);
        out.reverse();
        out.extend(self.initial_chain(target));
        out
    }
}
