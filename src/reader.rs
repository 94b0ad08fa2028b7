//! Parser collaborators.
//!
//! The reduction pipelines never decode file layouts themselves. A [CurveReader] or
//! [TraceReader] is injected into the application state at start up, and the pipelines operate on
//! the plain values they return.

use crate::types::{CurveSet, TraceMatrix};

use std::path::Path;
use thiserror::Error;

/// Errors raised by readers.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Error reading the file
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Malformed content at a given line
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The data block does not match the declared curves
    #[error("data block does not match {curves} declared curves")]
    Shape {
        curves: usize,
        #[source]
        source: ndarray::ShapeError,
    },

    /// A required section is absent
    #[error("missing {0} section")]
    MissingSection(&'static str),

    /// The file uses an encoding that is not supported
    #[error("unsupported {what} {value}")]
    Unsupported { what: &'static str, value: i64 },

    /// The file ends before a fixed size header
    #[error("file truncated in {0}")]
    Truncated(&'static str),

    /// Curve and index lengths disagree
    #[error("curve {name} has {values} values for an index of {index}")]
    CurveLength {
        name: String,
        values: usize,
        index: usize,
    },
}

/// Reads well-log curves from a file.
pub trait CurveReader: Send + Sync {
    /// Read all curves of a file, in declaration order.
    ///
    /// # Arguments
    ///
    /// * `path`: Path of the file to read
    fn read_curves(&self, path: &Path) -> Result<CurveSet, ReadError>;
}

/// Reads seismic traces from a file.
pub trait TraceReader: Send + Sync {
    /// Read all traces of a file, in file order.
    ///
    /// # Arguments
    ///
    /// * `path`: Path of the file to read
    fn read_traces(&self, path: &Path) -> Result<TraceMatrix, ReadError>;
}
