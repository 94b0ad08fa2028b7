//! Numeric formatting of curve and trace values.
//!
//! Values are rounded to [SIGNIFICANT_DIGITS] significant digits so that responses stay small and
//! stable. NaN and infinite values become `null`; exact zeros are emitted as `0.0`.

use crate::models::FormattedValue;

use num_traits::Float;
use std::fmt::LowerExp;

/// Number of significant decimal digits kept.
pub const SIGNIFICANT_DIGITS: usize = 5;

/// Format a single value.
///
/// # Arguments
///
/// * `value`: Raw value. NaN is treated as null.
pub fn format_value<T: Float + LowerExp>(value: T) -> FormattedValue {
    if value.is_nan() || value.is_infinite() {
        return None;
    }
    // Covers -0.0 too.
    if value.is_zero() {
        return Some(0.0);
    }
    round_significant(value).or_else(|| value.to_f64())
}

/// Round a finite, non-zero value to [SIGNIFICANT_DIGITS] significant digits, with halves rounded
/// away from zero.
///
/// Rounding works on the shortest decimal representation of the value in its own precision, so
/// `0.000123455` rounds to `0.00012346` even though its binary value is slightly below the half.
/// Returns `None` if rounding up overflows to infinity.
fn round_significant<T: LowerExp>(value: T) -> Option<f64> {
    let repr = format!("{:e}", value);
    let (mantissa, exponent) = repr.split_once('e')?;
    let mut exponent: i32 = exponent.parse().ok()?;
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(mantissa) => ("-", mantissa),
        None => ("", mantissa),
    };
    let mut digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|digit| digit - b'0')
        .collect();

    let round_up = digits
        .get(SIGNIFICANT_DIGITS)
        .map_or(false, |&digit| digit >= 5);
    digits.truncate(SIGNIFICANT_DIGITS);
    if round_up && carry(&mut digits) {
        digits.insert(0, 1);
        digits.truncate(SIGNIFICANT_DIGITS);
        exponent += 1;
    }

    let digits: String = digits.iter().map(|&digit| char::from(b'0' + digit)).collect();
    format!("{}{}e{}", sign, split_first_digit(&digits), exponent)
        .parse::<f64>()
        .ok()
        .filter(|rounded| rounded.is_finite())
}

/// Add one to the last digit. Returns whether the carry overflowed the leading digit.
fn carry(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return false;
        }
    }
    true
}

/// `"12346"` -> `"1.2346"`
fn split_first_digit(digits: &str) -> String {
    match digits.split_at(1) {
        (first, "") => first.to_string(),
        (first, rest) => format!("{}.{}", first, rest),
    }
}
