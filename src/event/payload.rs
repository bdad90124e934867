//! Outbound message conversion.
//!
//! The wire `message` field is always a string. Scalars are rendered the way
//! `String(value)` renders them in a browser, "nothing" becomes the empty string
//! and structured values are serialized to compact JSON text.

use crate::base::error::ClientError;
use serde::Serialize;
use serde_json::{Number, Value};

/// Convert any serializable payload into the string carried on the wire.
///
/// # Example
/// ```
/// use stalync::event::payload::to_wire_message;
/// use serde_json::json;
///
/// assert_eq!(to_wire_message(&42).unwrap(), "42");
/// assert_eq!(to_wire_message(&()).unwrap(), "");
/// assert_eq!(to_wire_message(&json!({"a": 1})).unwrap(), r#"{"a":1}"#);
/// ```
pub fn to_wire_message<M: Serialize + ?Sized>(message: &M) -> Result<String, ClientError> {
    let value = serde_json::to_value(message)?;
    Ok(value_to_wire(&value))
}

/// Apply the conversion policy to an already-built JSON value.
pub fn value_to_wire(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_to_string(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    let f = match n.as_f64() {
        Some(f) if n.is_f64() => f,
        _ => return n.to_string(),
    };
    // -0 renders as "0"
    if f == 0.0 {
        return "0".to_string();
    }

    // serde_json prints the shortest round-trip digits, switching to exponent
    // form outside 1e-5..1e16; `String(number)` stays positional in 1e-6..1e21.
    let text = n.to_string();
    let (mantissa, exponent) = match text.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (text.as_str(), 0),
    };
    if (1e-6..1e21).contains(&f.abs()) {
        positional(mantissa, exponent)
    } else if exponent > 0 {
        format!("{mantissa}e+{exponent}")
    } else {
        text
    }
}

/// Render `mantissa * 10^exponent` without an exponent.
fn positional(mantissa: &str, exponent: i32) -> String {
    let (sign, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{int_part}{frac_part}");
    let point = int_part.len() as i32 + exponent;

    let body = if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}", digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{whole}.{fraction}")
    };
    let body = if body.contains('.') {
        body.trim_end_matches('0').trim_end_matches('.')
    } else {
        body.as_str()
    };
    format!("{sign}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_types_are_coerced() {
        assert_eq!(to_wire_message("hello").unwrap(), "hello");
        assert_eq!(to_wire_message(&42).unwrap(), "42");
        assert_eq!(to_wire_message(&-7i64).unwrap(), "-7");
        assert_eq!(to_wire_message(&true).unwrap(), "true");
        assert_eq!(to_wire_message(&false).unwrap(), "false");
    }

    #[test]
    fn test_falsy_scalars_keep_their_text() {
        // basic types win over the falsy rule
        assert_eq!(to_wire_message(&0).unwrap(), "0");
        assert_eq!(to_wire_message("").unwrap(), "");
    }

    #[test]
    fn test_float_rendering() {
        assert_eq!(to_wire_message(&1.0f64).unwrap(), "1");
        assert_eq!(to_wire_message(&-0.0f64).unwrap(), "0");
        assert_eq!(to_wire_message(&2.5f64).unwrap(), "2.5");
        assert_eq!(to_wire_message(&0.1f64).unwrap(), "0.1");
        assert_eq!(to_wire_message(&1e16f64).unwrap(), "10000000000000000");
        assert_eq!(to_wire_message(&1e20f64).unwrap(), "100000000000000000000");
        assert_eq!(to_wire_message(&1e21f64).unwrap(), "1e+21");
    }

    #[test]
    fn test_small_float_rendering() {
        assert_eq!(to_wire_message(&0.00001f64).unwrap(), "0.00001");
        assert_eq!(to_wire_message(&1e-6f64).unwrap(), "0.000001");
        assert_eq!(to_wire_message(&-2.5e-6f64).unwrap(), "-0.0000025");
        assert_eq!(to_wire_message(&1e-7f64).unwrap(), "1e-7");
        assert_eq!(to_wire_message(&json!(1.5e-6)).unwrap(), "0.0000015");
    }

    #[test]
    fn test_nothing_becomes_empty_string() {
        assert_eq!(to_wire_message(&()).unwrap(), "");
        assert_eq!(to_wire_message(&None::<String>).unwrap(), "");
        assert_eq!(to_wire_message(&Value::Null).unwrap(), "");
    }

    #[test]
    fn test_structured_values_are_json() {
        assert_eq!(to_wire_message(&json!({"a": 1})).unwrap(), r#"{"a":1}"#);
        assert_eq!(to_wire_message(&vec![1, 2, 3]).unwrap(), "[1,2,3]");
        assert_eq!(to_wire_message(&json!([])).unwrap(), "[]");
    }

    #[test]
    fn test_derived_struct() {
        #[derive(Serialize)]
        struct Move {
            x: i32,
            y: i32,
        }
        assert_eq!(
            to_wire_message(&Move { x: 1, y: 2 }).unwrap(),
            r#"{"x":1,"y":2}"#
        );
    }

    #[test]
    fn test_unserializable_map_key() {
        use std::collections::BTreeMap;
        let mut map = BTreeMap::new();
        map.insert((1, 2), "pair");
        assert!(matches!(
            to_wire_message(&map),
            Err(ClientError::Serialization(_))
        ));
    }
}
