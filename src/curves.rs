//! Curve reduction pipeline.
//!
//! Selects the requested curves of a well log, decimates the shared index and every selected
//! curve at the same positions, and formats all values.

use crate::error::DecimatorError;
use crate::format::format_value;
use crate::models::{CatalogEntry, CurveData, CurveReadRequest, CurveResponse, FormattedValue};
use crate::sampling::SamplingPolicy;
use crate::types::CurveSet;

use std::collections::HashSet;

/// Returns the curves to extract, in file order.
///
/// Without a request every available curve is returned. Otherwise the result is the intersection
/// of the available and requested names, still in file order. Unknown names are ignored.
///
/// # Arguments
///
/// * `available`: Curve names in file order
/// * `requested`: Optional curve names requested by the client
pub fn select_curves<'a>(
    available: impl IntoIterator<Item = &'a str>,
    requested: Option<&[String]>,
) -> Vec<&'a str> {
    match requested {
        None => available.into_iter().collect(),
        Some(requested) => {
            let requested: HashSet<&str> = requested.iter().map(String::as_str).collect();
            available
                .into_iter()
                .filter(|name| requested.contains(name))
                .collect()
        }
    }
}

/// Reduce the curves of a file to a response.
///
/// # Arguments
///
/// * `info`: Catalog entry of the file
/// * `curve_set`: Curves read from the file
/// * `request`: The client request
#[tracing::instrument(level = "DEBUG", skip_all, fields(filename = %request.filename))]
pub fn reduce_curves(
    info: CatalogEntry,
    curve_set: &CurveSet,
    request: &CurveReadRequest,
) -> Result<CurveResponse, DecimatorError> {
    let policy = SamplingPolicy::new(request.max_depth, request.dt_multiplier)?;
    // An empty list selects every curve, as if none were given.
    let requested = request.curves.as_deref().filter(|curves| !curves.is_empty());
    let selected: HashSet<&str> = select_curves(curve_set.names(), requested)
        .into_iter()
        .collect();

    // Index and curves are sampled in lock-step.
    let positions: Vec<usize> = policy.positions(curve_set.index().len()).collect();
    let sample = |values: &[f64]| -> Vec<FormattedValue> {
        positions.iter().map(|&i| format_value(values[i])).collect()
    };

    let headers = sample(curve_set.index());
    let mut data = CurveData::new();
    for curve in curve_set
        .curves()
        .iter()
        .filter(|curve| selected.contains(curve.name.as_str()))
    {
        data.push(curve.name.clone(), sample(&curve.values));
    }
    tracing::debug!(
        curves = data.len(),
        points = positions.len(),
        "reduced curves"
    );

    Ok(CurveResponse {
        info,
        data,
        headers,
    })
}
