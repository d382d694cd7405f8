//! Snapshot and restore for machines.
//!
//! A snapshot captures the resumable data of a machine: configuration,
//! context, pending queue, recorded histories, and the running flag. It does
//! NOT include the compiled chart (function values are not serializable) or
//! the macrostep trace; restoring starts a fresh trace against a chart the
//! caller provides.

use super::trace::Macrostep;
use super::Machine;
use crate::chart::Statechart;
use crate::core::{Context, Event};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Version identifier for the snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable image of a machine's resumable state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// Snapshot format version.
    pub version: u32,

    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Active branches, leaf first.
    pub configuration: Vec<Vec<String>>,

    /// Whether the machine still accepted events.
    pub running: bool,

    /// User context (reserved keys are never present here).
    pub context: Context,

    /// Pending internal events, FIFO.
    pub queue: Vec<Event>,

    /// Recorded sub-configurations of exited history-carrying composites.
    pub state_histories: IndexMap<String, Vec<String>>,
}

/// Errors that can occur when restoring a machine from a snapshot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Snapshot version {found} is not supported (expected {expected})")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Snapshot references state '{name}' absent from the statechart")]
    UnknownState { name: String },
}

impl Machine {
    /// Capture the machine's resumable state.
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            version: SNAPSHOT_VERSION,
            timestamp: Utc::now(),
            configuration: self.configuration.clone(),
            running: self.running,
            context: self.context.clone(),
            queue: self.queue.iter().cloned().collect(),
            state_histories: self.state_histories.clone(),
        }
    }

    /// Rebuild a machine from a snapshot against a compatible chart.
    ///
    /// Every state the snapshot references must exist in `chart`; the chart
    /// is expected to be the one the snapshot was taken against (or a
    /// compatible successor). The restored machine starts with a fresh,
    /// empty macrostep since traces are not persisted.
    ///
    /// # Errors
    ///
    /// [`SnapshotError::VersionMismatch`] for an unsupported format version,
    /// [`SnapshotError::UnknownState`] when the snapshot names a state the
    /// chart does not have.
    pub fn restore(chart: Statechart, snapshot: MachineSnapshot) -> Result<Machine, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }

        let referenced = snapshot
            .configuration
            .iter()
            .flatten()
            .chain(snapshot.state_histories.keys())
            .chain(snapshot.state_histories.values().flatten());
        for name in referenced {
            if !chart.contains(name) {
                return Err(SnapshotError::UnknownState { name: name.clone() });
            }
        }

        debug!(running = snapshot.running, "machine restored from snapshot");
        Ok(Machine {
            chart,
            configuration: snapshot.configuration,
            running: snapshot.running,
            macrosteps: vec![Macrostep::open(None)],
            queue: snapshot.queue.into_iter().collect(),
            context: snapshot.context,
            state_histories: snapshot.state_histories,
        })
    }
}
