//! Seismic traces as produced by a [TraceReader](crate::reader::TraceReader).

use std::collections::HashMap;

/// Header fields of a single trace, keyed by source-record field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TraceHeader(HashMap<String, i64>);

impl TraceHeader {
    /// Value of a field, if the reader recorded it.
    pub fn get(&self, field: &str) -> Option<i64> {
        self.0.get(field).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for TraceHeader {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One amplitude series with its header.
///
/// Traces within a file nominally share a sample count, but short traces are allowed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    /// Header fields
    pub header: TraceHeader,
    /// Amplitude samples; NaN marks a null sample
    pub samples: Vec<f32>,
}

impl Trace {
    /// Return a new Trace.
    pub fn new(header: TraceHeader, samples: Vec<f32>) -> Self {
        Self { header, samples }
    }
}

/// All traces of one file, in file order.
pub type TraceMatrix = Vec<Trace>;
