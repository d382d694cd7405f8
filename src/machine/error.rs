//! Runtime errors raised by the interpreter.

use thiserror::Error;

/// Errors that can occur when driving a machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("Machine is stopped; a machine that reached a top-level final state cannot dispatch")]
    NotRunning,
}
