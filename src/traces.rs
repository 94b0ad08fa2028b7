//! Trace reduction pipeline.
//!
//! Limits the number of traces, extracts one header value per considered trace, decimates and
//! formats the samples of each trace, and drops traces left without any non-null value.
//!
//! Headers are computed for every considered trace before empty traces are dropped, so
//! `headers[i]` belongs to the i-th considered trace while `data[i]` belongs to the i-th
//! non-empty one. The two differ in length whenever a trace is dropped.

use crate::error::DecimatorError;
use crate::format::format_value;
use crate::header::HeaderSelector;
use crate::models::{CatalogEntry, FormattedValue, TraceReadRequest, TraceResponse};
use crate::sampling::SamplingPolicy;
use crate::types::Trace;

use rayon::prelude::*;

/// Number of traces considered: `min(max_ntrc, total)`.
pub fn limit_traces(total: usize, max_ntrc: Option<usize>) -> usize {
    max_ntrc.map_or(total, |max_ntrc| max_ntrc.min(total))
}

/// Decimate and format the samples of one trace.
fn format_trace(trace: &Trace, policy: &SamplingPolicy) -> Vec<FormattedValue> {
    policy
        .sample(&trace.samples)
        .map(|&sample| format_value(sample))
        .collect()
}

/// Reduce the traces of a file to a response.
///
/// # Arguments
///
/// * `info`: Catalog entry of the file
/// * `traces`: Traces read from the file
/// * `request`: The client request
#[tracing::instrument(level = "DEBUG", skip_all, fields(filename = %request.filename))]
pub fn reduce_traces(
    info: CatalogEntry,
    traces: &[Trace],
    request: &TraceReadRequest,
) -> Result<TraceResponse, DecimatorError> {
    // Traces have no per-trace cap, only the trace count limit below.
    let policy = SamplingPolicy::new(None, request.dt_multiplier)?;
    let max_ntrc = request
        .max_ntrc
        .map(usize::try_from)
        .transpose()
        .map_err(|_| DecimatorError::InvalidParameter {
            name: "maxNtrc",
            reason: "must not be negative".to_string(),
        })?;
    let considered = &traces[..limit_traces(traces.len(), max_ntrc)];

    let selector = HeaderSelector::new(request.header.as_deref());
    let headers: Vec<Option<i64>> = considered
        .iter()
        .enumerate()
        .map(|(i, trace)| selector.extract(trace, i))
        .collect();

    let data: Vec<Vec<FormattedValue>> = considered
        .par_iter()
        .map(|trace| format_trace(trace, &policy))
        .filter(|trace| trace.iter().any(Option::is_some))
        .collect();
    tracing::debug!(
        considered = considered.len(),
        dropped = considered.len() - data.len(),
        "reduced traces"
    );

    Ok(TraceResponse {
        info,
        data,
        headers,
    })
}
