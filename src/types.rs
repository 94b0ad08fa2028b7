pub mod curve;
pub mod trace;

// Re-export types for convenience.
pub use crate::types::curve::{CurveSeries, CurveSet};
pub use crate::types::trace::{Trace, TraceHeader, TraceMatrix};
