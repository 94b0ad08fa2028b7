//! Built-in reader implementations.
//!
//! Each reader is compiled in by a cargo feature of the same name. When a feature is disabled the
//! corresponding constructor returns `None` and read requests for that format are answered with a
//! service unavailable error.

#[cfg(feature = "las")]
pub mod las;
#[cfg(feature = "segy")]
pub mod segy;

use crate::reader::{CurveReader, TraceReader};

use std::sync::Arc;

/// Returns the built-in well-log reader, if compiled in.
pub fn curve_reader() -> Option<Arc<dyn CurveReader>> {
    #[cfg(feature = "las")]
    {
        Some(Arc::new(las::LasReader))
    }
    #[cfg(not(feature = "las"))]
    {
        None
    }
}

/// Returns the built-in seismic reader, if compiled in.
pub fn trace_reader() -> Option<Arc<dyn TraceReader>> {
    #[cfg(feature = "segy")]
    {
        Some(Arc::new(segy::SegyReader))
    }
    #[cfg(not(feature = "segy"))]
    {
        None
    }
}
