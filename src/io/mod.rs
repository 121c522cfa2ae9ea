//! Snapshot persistence.
//!
//! A [`SnapshotSink`] receives labeled, timestamped copies of the field:
//! `U0` at initialization and `U{step}` at the configured cadence. Records
//! are append-only and immutable once written; the sink is closed at run
//! end (on every exit path) to guarantee durability.

mod vtk;

pub use vtk::VtkSeriesSink;

use thiserror::Error;

use crate::state::Field;

/// Error type for snapshot persistence.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// I/O error during file operations.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Write attempted after the sink was closed.
    #[error("snapshot sink is closed")]
    Closed,

    /// The sink was handed a field whose shape differs from earlier writes.
    #[error("snapshot shape ({nr}, {nphi}) differs from the series shape ({series_nr}, {series_nphi})")]
    ShapeChanged {
        /// Incoming field radial size.
        nr: usize,
        /// Incoming field azimuthal size.
        nphi: usize,
        /// Established series radial size.
        series_nr: usize,
        /// Established series azimuthal size.
        series_nphi: usize,
    },
}

/// Destination for labeled field snapshots.
pub trait SnapshotSink<const N: usize> {
    /// Append one immutable record.
    fn write(&mut self, label: &str, time: f64, field: &Field<N>) -> Result<(), SnapshotError>;

    /// Flush and close the sink. Called on every run exit path.
    fn finish(&mut self) -> Result<(), SnapshotError> {
        Ok(())
    }
}

/// In-memory sink for tests and diagnostics.
#[derive(Debug, Default)]
pub struct MemorySink<const N: usize> {
    records: Vec<(String, f64, Field<N>)>,
    finished: bool,
}

impl<const N: usize> MemorySink<N> {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            finished: false,
        }
    }

    /// Recorded `(label, time, field)` triples in write order.
    pub fn records(&self) -> &[(String, f64, Field<N>)] {
        &self.records
    }

    /// Labels in write order.
    pub fn labels(&self) -> Vec<&str> {
        self.records.iter().map(|(l, _, _)| l.as_str()).collect()
    }

    /// Whether `finish` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<const N: usize> SnapshotSink<N> for MemorySink<N> {
    fn write(&mut self, label: &str, time: f64, field: &Field<N>) -> Result<(), SnapshotError> {
        if self.finished {
            return Err(SnapshotError::Closed);
        }
        self.records.push((label.to_owned(), time, field.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SnapshotError> {
        self.finished = true;
        Ok(())
    }
}
