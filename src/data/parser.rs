use chrono::{DateTime, Local};
use serde_json::Value;

use crate::data::sample::Sample;
use crate::error::ParseError;

/// Number of leading array elements a telemetry message must carry:
/// extruder temp, bed temp, X, Y, Z, feedrate.
pub const PAYLOAD_FIELDS: usize = 6;

/// Parse a raw telemetry message, stamping it with the current local time.
pub fn parse(raw: &Value) -> Result<Sample, ParseError> {
    parse_at(raw, Local::now())
}

/// Parse a raw telemetry message with an explicit timestamp.
///
/// The payload must be an array of at least six elements. Each element is
/// coerced with [`coerce_f64`]; unreadable fields become `0.0` rather than
/// failing the whole sample.
pub fn parse_at(raw: &Value, timestamp: DateTime<Local>) -> Result<Sample, ParseError> {
    let items = raw.as_array().ok_or_else(|| {
        ParseError::MalformedPayload(format!("expected an array, got {}", json_kind(raw)))
    })?;

    if items.len() < PAYLOAD_FIELDS {
        return Err(ParseError::MalformedPayload(format!(
            "expected at least {PAYLOAD_FIELDS} elements, got {}",
            items.len()
        )));
    }

    let mut fields = [0.0f64; PAYLOAD_FIELDS];
    for (slot, item) in fields.iter_mut().zip(items) {
        *slot = coerce_f64(item);
    }

    Ok(Sample::new(
        fields[0],
        fields[1],
        [fields[2], fields[3], fields[4]],
        fields[5],
        timestamp,
    ))
}

/// Lenient numeric coercion for noisy transport data.
///
/// Numbers pass through. Strings are read by their longest leading decimal
/// prefix, so `"12.5mm"` reads as `12.5`. Everything else reads as `0.0`,
/// including booleans and nested values such as `["5"]` or `[5]`; they are
/// not stringified first.
pub fn coerce_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_float(s),
        _ => None,
    };
    match parsed {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Read the longest prefix of `s` (after leading whitespace) that forms a
/// decimal literal: `[+-]digits[.digits][(e|E)[+-]digits]` or `[+-]Infinity`.
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        let inf = f64::INFINITY;
        return Some(if bytes.first() == Some(&b'-') { -inf } else { inf });
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
