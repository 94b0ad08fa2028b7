use crate::models::*;
use crate::reader::{CurveReader, ReadError, TraceReader};
use crate::types::{CurveSeries, CurveSet, Trace, TraceHeader, TraceMatrix};

use std::path::Path;

/// Create a CurveReadRequest object with only required fields set.
pub(crate) fn get_test_curve_request() -> CurveReadRequest {
    CurveReadRequest {
        filename: "well.las".to_string(),
        max_depth: None,
        dt_multiplier: 1,
        curves: None,
    }
}

/// Create a CurveReadRequest object with all fields set.
pub(crate) fn get_test_curve_request_optional() -> CurveReadRequest {
    CurveReadRequest {
        filename: "well.las".to_string(),
        max_depth: Some(100),
        dt_multiplier: 2,
        curves: Some(vec!["DEPT".to_string(), "GR".to_string()]),
    }
}

/// Create a TraceReadRequest object with only required fields set.
pub(crate) fn get_test_trace_request() -> TraceReadRequest {
    TraceReadRequest {
        filename: "line.sgy".to_string(),
        max_ntrc: None,
        dt_multiplier: 1,
        header: None,
    }
}

/// Create a TraceReadRequest object with all fields set.
pub(crate) fn get_test_trace_request_optional() -> TraceReadRequest {
    TraceReadRequest {
        filename: "line.sgy".to_string(),
        max_ntrc: Some(10),
        dt_multiplier: 4,
        header: Some("cdp".to_string()),
    }
}

/// Create a catalog entry for a file.
pub(crate) fn get_test_catalog_entry(name: &str) -> CatalogEntry {
    let mut entry = CatalogEntry::new();
    entry.insert("name".to_string(), name.into());
    entry.insert("size".to_string(), 1024.into());
    entry
}

/// Create a CurveSet with a DEPT index of 1..=5 and a GR curve.
pub(crate) fn get_test_curve_set() -> CurveSet {
    let index = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    CurveSet::new(
        index.clone(),
        vec![
            CurveSeries::new("DEPT", index),
            CurveSeries::new("GR", vec![10.123456, f64::NAN, 0.0, -4.5, 123456.0]),
        ],
    )
    .unwrap()
}

/// Create a trace with a CDP header and the given samples.
pub(crate) fn get_test_trace(cdp: i64, samples: Vec<f32>) -> Trace {
    let header: TraceHeader = [("CDP", cdp), ("TRACE_SEQUENCE_LINE", cdp - 100)]
        .into_iter()
        .collect();
    Trace::new(header, samples)
}

/// Create three traces, the second of which has only null samples.
pub(crate) fn get_test_trace_matrix() -> TraceMatrix {
    vec![
        get_test_trace(101, vec![1.0, 2.0, 3.0, 4.0]),
        get_test_trace(102, vec![f32::NAN; 4]),
        get_test_trace(103, vec![0.5, 0.0, -0.25, 8.0]),
    ]
}

/// Reader returning a fixed result for any path.
pub(crate) struct FakeReader<T> {
    result: Result<T, String>,
}

impl<T> FakeReader<T> {
    /// Reader that always succeeds.
    pub(crate) fn ok(value: T) -> Self {
        Self { result: Ok(value) }
    }

    /// Reader that always fails with a parse error.
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }

    fn read(&self) -> Result<T, ReadError>
    where
        T: Clone,
    {
        self.result.clone().map_err(|message| ReadError::Parse {
            line: 1,
            message,
        })
    }
}

impl CurveReader for FakeReader<CurveSet> {
    fn read_curves(&self, _path: &Path) -> Result<CurveSet, ReadError> {
        self.read()
    }
}

impl TraceReader for FakeReader<TraceMatrix> {
    fn read_traces(&self, _path: &Path) -> Result<TraceMatrix, ReadError> {
        self.read()
    }
}
