//! Forgiving deserializers for exporter-produced JSON.
//!
//! API design tools are inconsistent about scalar types: ids show up as numbers,
//! flags as booleans, status codes as integers. The helpers here accept any JSON
//! shape and normalise it instead of failing the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_value::Value as SerdeValue;

/// Deserialize any value into text.
///
/// Strings are kept as-is, `null` becomes empty, other scalars use their JSON
/// rendering and objects/arrays become compact JSON.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;
    Ok(value_to_text(value))
}

/// Deserialize a 0/1 flag from an integer, boolean or numeric string.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;
    Ok(value_to_flag(value))
}

/// Deserialize a list, skipping elements that are not objects or do not fit `T`.
/// A value that is not a list at all yields an empty list.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = SerdeValue::deserialize(deserializer)?;
    let SerdeValue::Seq(items) = unwrap_option(value) else {
        return Ok(Vec::new());
    };
    let (kept, skipped) = object_entries(items);
    for idx in skipped {
        log::warn!("skipping non-object or malformed list entry {idx}");
    }
    Ok(kept)
}

/// Split list entries into those that deserialize as `T` and the indices of the rest.
fn object_entries<T: DeserializeOwned>(items: Vec<SerdeValue>) -> (Vec<T>, Vec<usize>) {
    let mut kept = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();
    for (idx, item) in items.into_iter().map(unwrap_option).enumerate() {
        let parsed = match item {
            SerdeValue::Map(_) => item.deserialize_into::<T>().ok(),
            _ => None,
        };
        match parsed {
            Some(value) => kept.push(value),
            None => skipped.push(idx),
        }
    }
    (kept, skipped)
}

/// Deserialize an object, falling back to `T::default()` for anything else.
pub(crate) fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = unwrap_option(SerdeValue::deserialize(deserializer)?);
    if !matches!(value, SerdeValue::Map(_)) {
        return Ok(T::default());
    }
    Ok(value.deserialize_into::<T>().unwrap_or_default())
}

fn unwrap_option(value: SerdeValue) -> SerdeValue {
    match value {
        SerdeValue::Option(Some(inner)) | SerdeValue::Newtype(inner) => unwrap_option(*inner),
        other => other,
    }
}

fn value_to_text(value: SerdeValue) -> String {
    match unwrap_option(value) {
        SerdeValue::String(s) => s,
        SerdeValue::Char(c) => c.to_string(),
        SerdeValue::Unit | SerdeValue::Option(None) => String::new(),
        SerdeValue::Bool(b) => b.to_string(),
        SerdeValue::U8(n) => n.to_string(),
        SerdeValue::U16(n) => n.to_string(),
        SerdeValue::U32(n) => n.to_string(),
        SerdeValue::U64(n) => n.to_string(),
        SerdeValue::I8(n) => n.to_string(),
        SerdeValue::I16(n) => n.to_string(),
        SerdeValue::I32(n) => n.to_string(),
        SerdeValue::I64(n) => n.to_string(),
        SerdeValue::F32(n) => n.to_string(),
        SerdeValue::F64(n) => n.to_string(),
        SerdeValue::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        other => serde_json::to_string(&other).unwrap_or_default(),
    }
}

fn value_to_flag(value: SerdeValue) -> i64 {
    match unwrap_option(value) {
        SerdeValue::Bool(b) => i64::from(b),
        SerdeValue::U8(n) => i64::from(n),
        SerdeValue::U16(n) => i64::from(n),
        SerdeValue::U32(n) => i64::from(n),
        SerdeValue::U64(n) => i64::try_from(n).unwrap_or(1),
        SerdeValue::I8(n) => i64::from(n),
        SerdeValue::I16(n) => i64::from(n),
        SerdeValue::I32(n) => i64::from(n),
        SerdeValue::I64(n) => n,
        SerdeValue::F32(n) => n as i64,
        SerdeValue::F64(n) => n as i64,
        SerdeValue::String(s) => parse_flag(&s).unwrap_or(0),
        _ => 0,
    }
}

/// Parse a flag written as `0`/`1`/`true`/`false` (or any integer).
pub(crate) fn parse_flag(s: &str) -> Option<i64> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(1),
        "false" => Some(0),
        _ => s.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Row {
        #[serde(default, deserialize_with = "text")]
        id: String,
        #[serde(default, deserialize_with = "flag")]
        on: i64,
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "list")]
        rows: Vec<Row>,
        #[serde(default, deserialize_with = "object_or_default")]
        single: Row,
    }

    #[test]
    fn test_text_accepts_any_scalar() {
        let row: Row = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(row.id, "42");
        let row: Row = serde_json::from_value(json!({"id": null})).unwrap();
        assert_eq!(row.id, "");
        let row: Row = serde_json::from_value(json!({"id": true})).unwrap();
        assert_eq!(row.id, "true");
        let row: Row = serde_json::from_value(json!({"id": {"a": 1}})).unwrap();
        assert_eq!(row.id, r#"{"a":1}"#);
    }

    #[test]
    fn test_flag_normalisation() {
        let row: Row = serde_json::from_value(json!({"on": true})).unwrap();
        assert_eq!(row.on, 1);
        let row: Row = serde_json::from_value(json!({"on": "0"})).unwrap();
        assert_eq!(row.on, 0);
        let row: Row = serde_json::from_value(json!({"on": "yes"})).unwrap();
        assert_eq!(row.on, 0);
        assert_eq!(parse_flag(" TRUE "), Some(1));
        assert_eq!(parse_flag("x"), None);
    }

    #[test]
    fn test_list_skips_non_objects() {
        let holder: Holder =
            serde_json::from_value(json!({"rows": [{"id": "a"}, 3, "x", {"id": 7, "on": 1}]}))
                .unwrap();
        let ids: Vec<_> = holder.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "7"]);

        let holder: Holder = serde_json::from_value(json!({"rows": "nope"})).unwrap();
        assert!(holder.rows.is_empty());
    }

    #[test]
    fn test_object_entries_reports_skipped_indices() {
        let items = vec![
            SerdeValue::Map(Default::default()),
            SerdeValue::U8(3),
            SerdeValue::String("x".into()),
            SerdeValue::Option(Some(Box::new(SerdeValue::Map(Default::default())))),
        ];
        let (kept, skipped) = object_entries::<Row>(items);
        assert_eq!(kept.len(), 2);
        assert_eq!(skipped, vec![1, 2]);
    }

    #[test]
    fn test_object_or_default() {
        let holder: Holder = serde_json::from_value(json!({"single": [1, 2]})).unwrap();
        assert_eq!(holder.single, Row::default());
        let holder: Holder = serde_json::from_value(json!({"single": {"id": "x"}})).unwrap();
        assert_eq!(holder.single.id, "x");
    }
}
