//! Soft coercions for untrusted JSON scalars.
//!
//! Upstream rows are typed by hand into a spreadsheet, so numbers arrive as
//! numbers, as strings with units attached, or not at all. These helpers never
//! fail; they return `None` and let the caller pick the default.

use serde_json::Value;

/// Coerce any JSON value to a string. `null` and absent become `""` and
/// strings are kept verbatim. Whole floats drop their fraction (`5.0` is
/// `"5"`); other values use their JSON rendering.
pub fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Leading-integer parse: leading whitespace is skipped, an optional sign and
/// the run of ASCII digits that follows are used, the rest is ignored.
/// Finite JSON numbers are truncated toward zero.
pub fn parse_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// Leading-float parse with the same leniency as [`parse_int`]. Results that
/// are not finite count as unparsable.
pub fn parse_float(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse::<i64>().ok()
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        let mut frac_digits = 0;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            frac_digits += 1;
        }
        if mantissa_digits + frac_digits > 0 {
            end = frac_end;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}
