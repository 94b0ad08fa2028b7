//! Request and response types and associated functions and methods

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use strum_macros::Display;
use validator::{Validate, ValidationError};

/// A value rounded to a fixed number of significant digits, or `null`.
pub type FormattedValue = Option<f64>;

/// A catalog record, passed through to clients unchanged.
pub type CatalogEntry = serde_json::Map<String, serde_json::Value>;

/// Supported file formats
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum FileFormat {
    /// LAS well logs
    #[strum(serialize = "LAS")]
    Las,
    /// SEG-Y seismic traces
    #[strum(serialize = "SEGY")]
    Segy,
}

impl FileFormat {
    /// Name of the catalog file within the data directory.
    pub fn catalog_file(self) -> &'static str {
        match self {
            Self::Las => "las-list.json",
            Self::Segy => "segy-list.json",
        }
    }

    /// Name of the directory holding files of this format within the data directory.
    pub fn data_dir(self) -> &'static str {
        match self {
            Self::Las => "las",
            Self::Segy => "segy",
        }
    }
}

fn default_dt_multiplier() -> i64 {
    1
}

/// Request data for reading well-log curves
#[derive(Clone, Debug, Deserialize, PartialEq, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CurveReadRequest {
    /// Name of the file, as listed in the catalog
    #[validate(
        length(min = 1, message = "filename must not be empty"),
        custom = "validate_filename"
    )]
    pub filename: String,
    /// Maximum number of index values considered before decimation
    #[validate(range(min = 0, message = "maxDepth must not be negative"))]
    pub max_depth: Option<i64>,
    /// Keep every nth index value
    #[serde(default = "default_dt_multiplier")]
    #[validate(range(min = 1, message = "dtMultiplier must be greater than 0"))]
    pub dt_multiplier: i64,
    /// Curves to return. All curves when absent or empty.
    pub curves: Option<Vec<String>>,
}

/// Request data for reading seismic traces
#[derive(Clone, Debug, Deserialize, PartialEq, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct TraceReadRequest {
    /// Name of the file, as listed in the catalog
    #[validate(
        length(min = 1, message = "filename must not be empty"),
        custom = "validate_filename"
    )]
    pub filename: String,
    /// Maximum number of traces considered
    #[validate(range(min = 0, message = "maxNtrc must not be negative"))]
    pub max_ntrc: Option<i64>,
    /// Keep every nth sample of each trace
    #[serde(default = "default_dt_multiplier")]
    #[validate(range(min = 1, message = "dtMultiplier must be greater than 0"))]
    pub dt_multiplier: i64,
    /// Header field to return per trace. Sequential trace numbers when absent or empty.
    pub header: Option<String>,
}

/// Validate that a filename names a file directly inside the data directory
fn validate_filename(filename: &str) -> Result<(), ValidationError> {
    if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
        let mut error = ValidationError::new("filename must not contain a path");
        error.add_param("filename".into(), &filename);
        return Err(error);
    }
    Ok(())
}

/// Formatted curves keyed by curve name, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveData(Vec<(String, Vec<FormattedValue>)>);

impl CurveData {
    /// Return an empty CurveData.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a curve.
    pub fn push(&mut self, name: impl Into<String>, values: Vec<FormattedValue>) {
        self.0.push((name.into(), values));
    }

    /// Values of a named curve.
    pub fn get(&self, name: &str) -> Option<&[FormattedValue]> {
        self.0
            .iter()
            .find(|(curve, _)| curve == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Curve names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no curves.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CurveData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, values) in &self.0 {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

/// Response to a curve read
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurveResponse {
    /// Catalog entry of the file
    pub info: CatalogEntry,
    /// Formatted curves
    pub data: CurveData,
    /// Formatted index values (depth or time)
    pub headers: Vec<FormattedValue>,
}

/// Response to a trace read
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceResponse {
    /// Catalog entry of the file
    pub info: CatalogEntry,
    /// Formatted traces, excluding traces with no non-null value
    pub data: Vec<Vec<FormattedValue>>,
    /// One header value per considered trace, including traces dropped from `data`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Option<i64>>,
}

/// Response to a catalog count
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct CountResponse {
    /// Number of catalogued files
    pub count: usize,
}
