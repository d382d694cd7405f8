//! Statecraft: a pure, deterministic hierarchical statechart interpreter
//!
//! Statecraft implements the Statechart formalism (Harel 1987) with
//! SCXML-aligned semantics on a "pure core, imperative shell" philosophy:
//! the whole interpreter is composed of pure functions; actions and guards
//! are first-class pure values; `init` and `dispatch` return fresh machines
//! and never mutate their input.
//!
//! # Core Concepts
//!
//! - **Definition**: an author-facing tree of states, final states, and
//!   history markers, compiled by [`Statechart::build`] into a flat,
//!   addressable graph
//! - **Machine**: a running instance holding the active configuration and
//!   the user [`Context`], advanced one external [`Event`] at a time
//! - **Run-to-completion**: every internal event raised by actions is
//!   drained before a dispatch returns; each dispatch is traced as one
//!   [`Macrostep`] made of [`Microstep`]s
//!
//! # Example
//!
//! ```rust
//! use statecraft::{Action, Context, Machine, StateDef, Statechart};
//! use serde_json::json;
//!
//! let definition = StateDef::new()
//!     .initial("idle")
//!     .substate("idle", StateDef::new().on("start", "working"))
//!     .substate(
//!         "working",
//!         StateDef::new()
//!             .entry(Action::new(|ctx| ctx.put("runs", json!(1))))
//!             .on("finish", "idle"),
//!     );
//!
//! let chart = Statechart::build(definition).unwrap();
//! let machine = Machine::init(chart, Context::new());
//! assert_eq!(machine.active_states(), ["idle", "root"]);
//!
//! let machine = machine.dispatch("start").unwrap();
//! assert_eq!(machine.active_states(), ["working", "root"]);
//! assert_eq!(machine.context().get("runs"), Some(&json!(1)));
//! ```

pub mod chart;
pub mod core;
pub mod definition;
pub mod machine;

// Re-export commonly used types
pub use self::chart::{ChartError, CompiledTransition, StateKind, StateNode, Statechart, ROOT};
pub use self::core::{Action, Context, Event, Guard, DONE_STATE_PREFIX};
pub use self::definition::{Definition, FinalDef, HistoryDef, HistoryKind, StateDef, TransitionSpec};
pub use self::machine::{
    Machine, MachineError, MachineSnapshot, Macrostep, Microstep, SnapshotError, TransitionRecord,
};
