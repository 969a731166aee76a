//! Timestamp codec for `H:MM:SS.CC` values
//!
//! Scripts time events in centiseconds (1/100 s). The textual form has a
//! single hour digit, two-digit minutes and seconds, and an optional
//! fractional part on the seconds. Anything outside `0:00:00.00..=9:59:59.99`
//! is rejected.
//!
//! # Example
//!
//! ```rust
//! use ass_tools_core::timestamp::{format_time, parse_time};
//!
//! assert_eq!(parse_time("0:01:30.50")?, 9050);
//! assert_eq!(format_time(9050)?, "0:01:30.50");
//! # Ok::<(), ass_tools_core::CoreError>(())
//! ```

use crate::{utils::CoreError, Result};

/// Unsigned centisecond count, the native timestamp unit
pub type Centiseconds = u32;

/// Signed centisecond count used while shifting timestamps
pub type SignedCentiseconds = i64;

/// First centisecond value that no longer fits a single hour digit
pub const MAX_CENTISECONDS: Centiseconds = 3_600_000;

/// Centiseconds per hour
const HOUR: u32 = 360_000;
/// Centiseconds per minute
const MINUTE: u32 = 6_000;
/// Centiseconds per second
const SECOND: u32 = 100;

/// Check that `part` is exactly `len` ASCII digits
fn is_digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

/// Parse `H:MM:SS.CC` into centiseconds
///
/// The seconds component may carry any number of fractional digits; it is
/// read as a real number and rounded to the nearest centisecond.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTime`] on wrong arity, wrong digit counts or
/// minutes/seconds that are not below 60.
pub fn parse_time(text: &str) -> Result<Centiseconds> {
    let mut parts = text.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(CoreError::invalid_time(text, "expected H:MM:SS.CC"));
    };

    if !is_digits(hours, 1) {
        return Err(CoreError::invalid_time(text, "hours must be a single digit"));
    }
    let hours = u32::from(hours.as_bytes()[0] - b'0');

    if !is_digits(minutes, 2) {
        return Err(CoreError::invalid_time(text, "minutes must have two digits"));
    }
    let minutes: u32 = minutes.parse()?;
    if minutes >= 60 {
        return Err(CoreError::invalid_time(text, "minutes must be < 60"));
    }

    let (whole, fraction) = match seconds.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (seconds, None),
    };
    if !is_digits(whole, 2) {
        return Err(CoreError::invalid_time(text, "seconds must have two digits"));
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::invalid_time(text, "invalid fractional seconds"));
        }
    }
    let seconds: f64 = seconds.parse()?;
    if seconds >= 60.0 {
        return Err(CoreError::invalid_time(text, "seconds must be < 60"));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let centis = (seconds * f64::from(SECOND)).round() as u32;

    Ok(hours * HOUR + minutes * MINUTE + centis)
}

/// Format centiseconds as `H:MM:SS.CC`
///
/// Hours are unpadded, every other component is zero-padded to two digits.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTime`] when the value needs more than one hour
/// digit.
pub fn format_time(centiseconds: Centiseconds) -> Result<String> {
    if centiseconds >= MAX_CENTISECONDS {
        return Err(CoreError::invalid_time(
            centiseconds,
            "value does not fit H:MM:SS.CC",
        ));
    }

    let hours = centiseconds / HOUR;
    let remainder = centiseconds % HOUR;
    let minutes = remainder / MINUTE;
    let remainder = remainder % MINUTE;
    let seconds = remainder / SECOND;
    let cs = remainder % SECOND;

    Ok(format!("{hours}:{minutes:02}:{seconds:02}.{cs:02}"))
}

/// Parse a timestamp that may carry a leading `-`
///
/// # Errors
///
/// Same as [`parse_time`] for the unsigned part.
pub fn parse_time_signed(text: &str) -> Result<SignedCentiseconds> {
    match text.strip_prefix('-') {
        Some(magnitude) => parse_time(magnitude).map(|cs| -i64::from(cs)),
        None => parse_time(text).map(i64::from),
    }
}

/// Format a signed centisecond count
///
/// Negative values are rendered with a leading `-`; whether a negative
/// timestamp is acceptable is the caller's decision.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTime`] when the magnitude needs more than one
/// hour digit.
pub fn format_time_signed(centiseconds: SignedCentiseconds) -> Result<String> {
    let magnitude = u32::try_from(centiseconds.unsigned_abs())
        .map_err(|_| CoreError::invalid_time(centiseconds, "value does not fit H:MM:SS.CC"))?;
    let text = format_time(magnitude)?;
    if centiseconds < 0 {
        Ok(format!("-{text}"))
    } else {
        Ok(text)
    }
}

/// Convert a duration in seconds to signed centiseconds
///
/// # Errors
///
/// Returns [`CoreError::Value`] for non-finite or out-of-range input.
pub fn seconds_to_centiseconds_signed(seconds: f64) -> Result<SignedCentiseconds> {
    if !seconds.is_finite() {
        return Err(CoreError::value(format!("'{seconds}' is not a finite time")));
    }
    let centis = (seconds * f64::from(SECOND)).round();
    // i64::MAX is not representable; 2^63 is the first value that overflows
    if centis.abs() >= 9_223_372_036_854_775_808.0 {
        return Err(CoreError::value(format!("'{seconds}' is out of range")));
    }
    #[allow(clippy::cast_possible_truncation)]
    let centis = centis as i64;
    Ok(centis)
}

/// Convert a non-negative duration in seconds to centiseconds
///
/// # Errors
///
/// Returns [`CoreError::Value`] for non-finite, negative or out-of-range
/// input.
pub fn seconds_to_centiseconds(seconds: f64) -> Result<Centiseconds> {
    let centis = seconds_to_centiseconds_signed(seconds)?;
    Centiseconds::try_from(centis)
        .map_err(|_| CoreError::value(format!("'{seconds}' is out of range")))
}
