//! Tolerant field readers for backend records.
//!
//! The booking backend has shipped numbers both as JSON numbers and as numeric
//! strings (Postgres `numeric` columns), and leaves optional columns `null`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

pub(crate) fn value_as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

pub(crate) fn value_as_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let v = Value::deserialize(d)?;
    value_as_i64(&v).ok_or_else(|| D::Error::custom(format!("expected a numeric id, got {v}")))
}

pub(crate) fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_as_i64(&v))
}

pub(crate) fn opt_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_as_f64(&v))
}

pub(crate) fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_as_i64(&v)
        .map(|n| n.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0))
}

pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_as_text(&v).unwrap_or_default())
}

/// Empty strings count as absent.
pub(crate) fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_as_text(&v).filter(|s| !s.trim().is_empty()))
}

pub(crate) fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(v.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_accept_numeric_strings() {
        assert_eq!(value_as_f64(&json!("5000.50")), Some(5000.5));
        assert_eq!(value_as_i64(&json!("42")), Some(42));
        assert_eq!(value_as_i64(&json!(7)), Some(7));
        assert_eq!(value_as_i64(&json!(null)), None);
        assert_eq!(value_as_f64(&json!("abc")), None);
    }

    #[test]
    fn test_text_accepts_numbers() {
        assert_eq!(value_as_text(&json!(12)), Some("12".to_string()));
        assert_eq!(value_as_text(&json!(null)), None);
    }
}
