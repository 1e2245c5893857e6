//! Canonical text for values that JSON cannot carry without losing their
//! width: integers, floats and timestamps.

use std::fmt::Display;
use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, SecondsFormat};
use rowmap_api::FloatFormat;

/// Base-10, `-` for negatives, no leading zeros.
pub fn format_int<T: Display>(value: T) -> String {
    value.to_string()
}

/// Parse base-10 text straight into the target width.
///
/// Text outside the range of `T` is an error, never truncated.
pub fn parse_int<T>(text: &str) -> Result<T, ParseIntError>
where
    T: FromStr<Err = ParseIntError>,
{
    text.parse()
}

/// Float text per `format`.
///
/// Non-finite values come out as `NaN`, `inf` and `-inf`.
pub fn format_float<T: Display>(value: T, format: FloatFormat) -> String {
    match format {
        FloatFormat::Fixed { digits } => format!("{value:.digits$}"),
        FloatFormat::Shortest => value.to_string(),
    }
}

/// Parse float text as `f64`. Accepts `NaN`/`inf` in any letter case.
pub fn parse_float(text: &str) -> Result<f64, ParseFloatError> {
    text.parse()
}

/// Narrow to `f32`. A finite value beyond the `f32` range is `None`
/// rather than infinity; non-finite values narrow as they are.
pub fn narrow_f32(value: f64) -> Option<f32> {
    let narrowed = value as f32;
    if value.is_finite() && !narrowed.is_finite() {
        return None;
    }
    Some(narrowed)
}

/// RFC 3339 with nine fractional digits; `Z` when the offset is zero.
///
/// RFC 3339 has four-digit years only. Outside 0000-9999 the text would
/// not parse back, so those instants are an error.
pub fn format_time(value: &DateTime<FixedOffset>) -> Result<String, String> {
    let year = value.year();
    if !(0..=9999).contains(&year) {
        return Err(format!("year {year} is outside 0000-9999"));
    }
    Ok(value.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

/// Parse RFC 3339 with any fractional length (including none).
pub fn parse_time(text: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text)
}
