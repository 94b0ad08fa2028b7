//! Well-log curves as produced by a [CurveReader](crate::reader::CurveReader).

use crate::reader::ReadError;

/// One named measurement of a well log.
///
/// Source nulls are represented as NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveSeries {
    /// Curve mnemonic, unique within a file
    pub name: String,
    /// Sample values, one per index value
    pub values: Vec<f64>,
}

impl CurveSeries {
    /// Return a new CurveSeries.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// All curves of one file, sharing a depth or time index.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveSet {
    index: Vec<f64>,
    curves: Vec<CurveSeries>,
}

impl CurveSet {
    /// Return a new CurveSet, checking every curve has one value per index value.
    ///
    /// # Arguments
    ///
    /// * `index`: The index axis (depth or time), in file order
    /// * `curves`: Curves in declaration order
    pub fn new(index: Vec<f64>, curves: Vec<CurveSeries>) -> Result<Self, ReadError> {
        if let Some(curve) = curves.iter().find(|curve| curve.values.len() != index.len()) {
            return Err(ReadError::CurveLength {
                name: curve.name.clone(),
                values: curve.values.len(),
                index: index.len(),
            });
        }
        Ok(Self { index, curves })
    }

    /// The shared index axis.
    pub fn index(&self) -> &[f64] {
        &self.index
    }

    /// Curves in declaration order.
    pub fn curves(&self) -> &[CurveSeries] {
        &self.curves
    }

    /// Curve names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(|curve| curve.name.as_str())
    }
}
