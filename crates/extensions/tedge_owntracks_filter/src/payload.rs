use serde_json::Map;
use serde_json::Value;

/// Parse an OwnTracks payload as a JSON object.
///
/// Returns `None` for anything else: non UTF-8 bytes, invalid JSON,
/// or a JSON value that is not an object.
pub fn parse_record(payload: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice(payload) {
        Ok(Value::Object(record)) => Some(record),
        _ => None,
    }
}

/// Coerce a JSON value into a float, returning NaN when this is not possible.
///
/// The value is read the way a lenient `parseFloat` reads its text form:
/// leading whitespace is skipped and the longest decimal prefix is used,
/// so `"85 %"` is 85 and `"0x30"` is 0. Arrays are read from their
/// comma-separated elements, so `[85]` is 85. Booleans, objects and
/// strings with no leading number are NaN.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float_prefix(s),
        Value::Array(_) => parse_float_prefix(&text_form(value)),
        Value::Null | Value::Bool(_) | Value::Object(_) => f64::NAN,
    }
}

/// The text a JSON value is turned into when read as a number.
///
/// Array elements are joined with commas, `null` elements being empty.
fn text_form(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(text_form).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}

fn parse_float_prefix(text: &str) -> f64 {
    let text = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if text[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_digits = count_digits(&bytes[exp_start..]);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
