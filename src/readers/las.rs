//! LAS 2.0 well-log reader.
//!
//! Supports LAS 1.2 and 2.0 ASCII files, wrapped or unwrapped. The first declared curve is the
//! index. Values equal to the `~W NULL` value are read as NaN.

use crate::reader::{CurveReader, ReadError};
use crate::types::{CurveSeries, CurveSet};

use ndarray::{Array2, Axis};
use std::collections::HashMap;
use std::path::Path;

/// Reads LAS files from disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct LasReader;

impl CurveReader for LasReader {
    #[tracing::instrument(level = "DEBUG", skip(self))]
    fn read_curves(&self, path: &Path) -> Result<CurveSet, ReadError> {
        let bytes = std::fs::read(path)?;
        // Legacy files are frequently Latin-1; the numeric content is ASCII either way.
        parse(&String::from_utf8_lossy(&bytes))
    }
}

/// Sections of a LAS file.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Section {
    Version,
    Well,
    Curves,
    Data,
    Other,
}

impl Section {
    fn from_marker(line: &str) -> Self {
        match line[1..].chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => Self::Version,
            Some('W') => Self::Well,
            Some('C') => Self::Curves,
            Some('A') => Self::Data,
            _ => Self::Other,
        }
    }
}

/// A `MNEM.UNIT VALUE : DESCRIPTION` header line.
#[derive(Debug, PartialEq)]
struct HeaderLine<'a> {
    mnemonic: &'a str,
    value: &'a str,
}

impl<'a> HeaderLine<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let (mnemonic, rest) = line.split_once('.')?;
        // The unit runs from the dot to the first space.
        let rest = rest
            .split_once(char::is_whitespace)
            .map_or("", |(_unit, rest)| rest);
        let value = rest.rsplit_once(':').map_or(rest, |(value, _)| value);
        Some(Self {
            mnemonic: mnemonic.trim(),
            value: value.trim(),
        })
    }
}

/// Parse the text of a LAS file.
pub fn parse(text: &str) -> Result<CurveSet, ReadError> {
    let mut section = Section::Other;
    let mut seen_data = false;
    let mut null_value: Option<f64> = None;
    let mut mnemonics: Vec<String> = Vec::new();
    let mut values: Vec<f64> = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('~') {
            section = Section::from_marker(line);
            seen_data |= section == Section::Data;
            continue;
        }
        match section {
            Section::Data => {
                for token in line.split_whitespace() {
                    let value = token.parse::<f64>().map_err(|_| ReadError::Parse {
                        line: number + 1,
                        message: format!("expected a number, found '{}'", token),
                    })?;
                    values.push(value);
                }
            }
            Section::Version => {
                if let Some(header) = HeaderLine::parse(line) {
                    if header.mnemonic.eq_ignore_ascii_case("VERS") {
                        check_version(header.value, number + 1)?;
                    }
                }
            }
            Section::Well => {
                if let Some(header) = HeaderLine::parse(line) {
                    if header.mnemonic.eq_ignore_ascii_case("NULL") {
                        null_value = header.value.parse().ok();
                    }
                }
            }
            Section::Curves => {
                if let Some(header) = HeaderLine::parse(line) {
                    let mnemonic = match header.mnemonic {
                        "" => "UNKNOWN",
                        mnemonic => mnemonic,
                    };
                    mnemonics.push(mnemonic.to_string());
                }
            }
            Section::Other => (),
        }
    }

    if mnemonics.is_empty() {
        return Err(ReadError::MissingSection("~C"));
    }
    if !seen_data {
        return Err(ReadError::MissingSection("~A"));
    }

    // Tokens are read in order regardless of line breaks, which also handles wrapped files.
    let curves = mnemonics.len();
    let mut data = Array2::from_shape_vec((values.len() / curves, curves), values)
        .map_err(|source| ReadError::Shape { curves, source })?;
    if let Some(null_value) = null_value {
        data.mapv_inplace(|value| if value == null_value { f64::NAN } else { value });
    }

    let columns: Vec<Vec<f64>> = data.axis_iter(Axis(1)).map(|c| c.to_vec()).collect();
    let index = columns[0].clone();
    let series = deduplicate(mnemonics)
        .into_iter()
        .zip(columns)
        .map(|(name, values)| CurveSeries::new(name, values))
        .collect();
    CurveSet::new(index, series)
}

/// Reject LAS 3.0, which uses a different section layout.
fn check_version(value: &str, line: usize) -> Result<(), ReadError> {
    let version: f64 = value.parse().map_err(|_| ReadError::Parse {
        line,
        message: format!("invalid version '{}'", value),
    })?;
    if version >= 3.0 {
        return Err(ReadError::Unsupported {
            what: "LAS version",
            value: version as i64,
        });
    }
    Ok(())
}

/// Suffix repeated mnemonics with `:1`, `:2`, ... so that curve names are unique.
fn deduplicate(mnemonics: Vec<String>) -> Vec<String> {
    let mut totals: HashMap<String, usize> = HashMap::new();
    for mnemonic in &mnemonics {
        *totals.entry(mnemonic.clone()).or_default() += 1;
    }
    let mut seen: HashMap<String, usize> = HashMap::new();
    mnemonics
        .into_iter()
        .map(|mnemonic| {
            if totals[&mnemonic] == 1 {
                return mnemonic;
            }
            let count = seen.entry(mnemonic.clone()).or_default();
            *count += 1;
            format!("{}:{}", mnemonic, count)
        })
        .collect()
}
