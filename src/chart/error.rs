//! Compile-time errors raised while building a statechart.

use thiserror::Error;

/// Errors that can occur when compiling a definition into a statechart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChartError {
    #[error("Definition root must be a composite state with at least one substate")]
    InvalidDefinition,

    #[error("`initial` of composite '{parent}' must name one of its descendants (got {initial:?})")]
    NotValidInitial {
        initial: Option<String>,
        parent: String,
    },

    #[error("Transition target '{name}' does not name a state")]
    UndefinedTarget { name: String },

    #[error("State names must be globally unique; duplicated: {names:?}")]
    DuplicatedState { names: Vec<String> },
}
