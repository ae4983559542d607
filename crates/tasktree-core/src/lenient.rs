//! Best-effort `deserialize_with` helpers for loosely typed JSON exports.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ids are strings in Goblin exports, but hand-edited files use integers too.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("expected a string or integer id, got {value}"))
    })
}

pub(crate) fn lenient_parent_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => id_from_value(&value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "expected a string or integer parentId, got {value}"
            ))
        }),
    }
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

/// Decode an optional integer, accepting floats (truncated) and numeric
/// strings. Anything unparseable becomes `None`.
pub(crate) fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(int_from_value))
}

/// Like [`lenient_int`], defaulting to zero.
pub(crate) fn lenient_int_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_int(deserializer)?.unwrap_or_default())
}

fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().and_then(truncate_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_float))
        }
        _ => None,
    }
}

fn truncate_float(f: f64) -> Option<i64> {
    // `as` saturates at the i64 bounds.
    f.is_finite().then(|| f.trunc() as i64)
}
