//! Definition -> Statechart compiler.

use super::error::ChartError;
use super::node::{CompiledTransition, StateKind, StateNode};
use super::{Statechart, ROOT};
use crate::definition::{Definition, HistoryKind, StateDef};
use indexmap::IndexMap;
use tracing::debug;

impl Statechart {
    /// Compile a definition tree into a flat state graph.
    ///
    /// The walk is depth first: each node is inserted under its parent's
    /// name, composites recurse into their substates, and bare transition
    /// targets arrive already normalized from the definition layer. Initial
    /// states and transition targets are validated once the whole map is
    /// built, so forward references anywhere in the tree are fine.
    ///
    /// # Errors
    ///
    /// - [`ChartError::InvalidDefinition`] when the root is not a composite
    ///   state with at least one substate;
    /// - [`ChartError::DuplicatedState`] when a name appears in more than one
    ///   scope (the flat map requires globally unique names);
    /// - [`ChartError::NotValidInitial`] when a composite's `initial` does
    ///   not name one of its descendants;
    /// - [`ChartError::UndefinedTarget`] when a transition targets an
    ///   unknown state.
    pub fn build(definition: impl Into<Definition>) -> Result<Statechart, ChartError> {
        let root = match definition.into() {
            Definition::State(def) if !def.substates.is_empty() => def,
            _ => return Err(ChartError::InvalidDefinition),
        };

        let mut states = IndexMap::new();
        let mut duplicates = Vec::new();
        compile_state(ROOT.to_string(), None, root, &mut states, &mut duplicates);

        if !duplicates.is_empty() {
            return Err(ChartError::DuplicatedState { names: duplicates });
        }

        let chart = Statechart { states };
        chart.validate()?;
        debug!(states = chart.len(), "statechart compiled");
        Ok(chart)
    }

    fn validate(&self) -> Result<(), ChartError> {
        for node in self.states.values() {
            if node.is_composite() {
                let descendants = self.descendants(&node.name);
                let valid = node
                    .initial
                    .as_ref()
                    .is_some_and(|initial| descendants.contains(initial));
                if !valid {
                    return Err(ChartError::NotValidInitial {
                        initial: node.initial.clone(),
                        parent: node.name.clone(),
                    });
                }
            }
            for transition in node.transitions.values() {
                if !self.states.contains_key(&transition.target) {
                    return Err(ChartError::UndefinedTarget {
                        name: transition.target.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn compile_node(
    name: String,
    parent: Option<String>,
    definition: Definition,
    states: &mut IndexMap<String, StateNode>,
    duplicates: &mut Vec<String>,
) {
    match definition {
        Definition::State(def) => compile_state(name, parent, def, states, duplicates),
        Definition::Final(def) => insert(
            states,
            duplicates,
            StateNode {
                name,
                kind: StateKind::Final,
                parent,
                children: Vec::new(),
                initial: None,
                transitions: IndexMap::new(),
                entry: def.entry,
                exit: None,
                has_history: false,
            },
        ),
        Definition::History(def) => {
            let kind = match def.kind {
                HistoryKind::Shallow => StateKind::ShallowHistory,
                HistoryKind::Deep => StateKind::DeepHistory,
            };
            insert(
                states,
                duplicates,
                StateNode {
                    name,
                    kind,
                    parent,
                    children: Vec::new(),
                    initial: None,
                    transitions: IndexMap::new(),
                    entry: None,
                    exit: None,
                    has_history: false,
                },
            );
        }
    }
}

fn compile_state(
    name: String,
    parent: Option<String>,
    def: StateDef,
    states: &mut IndexMap<String, StateNode>,
    duplicates: &mut Vec<String>,
) {
    let kind = if def.substates.is_empty() {
        StateKind::Simple
    } else {
        StateKind::Composite
    };
    let children: Vec<String> = def.substates.keys().cloned().collect();
    let has_history = def
        .substates
        .values()
        .any(|sub| matches!(sub, Definition::History(_)));
    let transitions = def
        .transitions
        .into_iter()
        .map(|(event, spec)| {
            let compiled = CompiledTransition {
                name: event.clone(),
                target: spec.target,
                guard: spec.guard,
                action: spec.action,
            };
            (event, compiled)
        })
        .collect();

    insert(
        states,
        duplicates,
        StateNode {
            name: name.clone(),
            kind,
            parent,
            children,
            initial: def.initial,
            transitions,
            entry: def.entry,
            exit: def.exit,
            has_history,
        },
    );

    for (child, sub) in def.substates {
        compile_node(child, Some(name.clone()), sub, states, duplicates);
    }
}

fn insert(
    states: &mut IndexMap<String, StateNode>,
    duplicates: &mut Vec<String>,
    node: StateNode,
) {
    if states.contains_key(&node.name) {
        duplicates.push(node.name);
    } else {
        states.insert(node.name.clone(), node);
    }
}
