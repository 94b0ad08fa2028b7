//! Stride sampling shared by the curve and trace pipelines.
//!
//! A [SamplingPolicy] describes which positions of an ordered sequence are kept: every `stride`th
//! position, starting at zero, among the first `max_items` positions of the source. The cap
//! applies to source items before striding, not to the number of items kept.

use crate::error::DecimatorError;

use std::iter::StepBy;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Returns the positions kept from a sequence of length `len`.
///
/// Positions are `0, stride, 2 * stride, ...`, strictly less than `min(max_items, len)`. A
/// `max_items` larger than `len` is clamped to `len`.
///
/// # Arguments
///
/// * `len`: Length of the source sequence
/// * `max_items`: Optional cap on the number of source items considered
/// * `stride`: Distance between kept positions
pub fn positions(
    len: usize,
    max_items: Option<usize>,
    stride: NonZeroUsize,
) -> StepBy<Range<usize>> {
    let limit = max_items.map_or(len, |max_items| max_items.min(len));
    (0..limit).step_by(stride.get())
}

/// Decimation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingPolicy {
    max_items: Option<usize>,
    stride: NonZeroUsize,
}

impl SamplingPolicy {
    /// Return a new SamplingPolicy.
    ///
    /// Fails with an invalid parameter error when `stride` is not positive or `max_items` is
    /// negative.
    ///
    /// # Arguments
    ///
    /// * `max_items`: Optional cap on the number of source items considered
    /// * `stride`: Distance between kept positions
    pub fn new(max_items: Option<i64>, stride: i64) -> Result<Self, DecimatorError> {
        let stride = usize::try_from(stride)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| DecimatorError::InvalidParameter {
                name: "stride",
                reason: format!("must be greater than 0, got {}", stride),
            })?;
        let max_items = max_items
            .map(|max_items| {
                usize::try_from(max_items).map_err(|_| DecimatorError::InvalidParameter {
                    name: "maxItems",
                    reason: format!("must not be negative, got {}", max_items),
                })
            })
            .transpose()?;
        Ok(Self { max_items, stride })
    }

    /// Positions kept from a sequence of length `len`.
    pub fn positions(&self, len: usize) -> StepBy<Range<usize>> {
        positions(len, self.max_items, self.stride)
    }

    /// Iterate over the kept items of `values`.
    pub fn sample<'a, T>(&self, values: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        self.positions(values.len()).map(move |i| &values[i])
    }
}
