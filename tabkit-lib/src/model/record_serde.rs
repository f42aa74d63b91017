//! Custom serialization for Record.
//!
//! Rows travel as flat JSON objects: `{"id": 1, "name": "Ada", ...}`. The
//! `id` key is mandatory and may be a string or an integer. Every other key
//! becomes a field.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::ID_FIELD;
use super::Record;
use super::RowId;
use super::Value;

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // `id` never appears in `fields`, so the hint is exact
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;

        // Sorted so output is stable across runs
        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort();
        for key in keys {
            map.serialize_entry(key, &self.fields[key].to_json())?;
        }

        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a row with an id")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut id: Option<RowId> = None;
        let mut fields: HashMap<String, Value> = HashMap::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == ID_FIELD {
                if id.is_some() {
                    return Err(M::Error::duplicate_field(ID_FIELD));
                }
                id = Some(map.next_value()?);
            } else {
                let json: serde_json::Value = map.next_value()?;
                fields.insert(key, Value::from_json(json));
            }
        }

        let id = id.ok_or_else(|| M::Error::missing_field(ID_FIELD))?;
        Ok(Record { id, fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_simple_fields() {
        let json = r#"{"id": 1, "name": "Ada", "score": 9.5, "tags": ["a"]}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.id(), &RowId::Number(1));
        assert_eq!(record.get_string("name").unwrap(), Some("Ada"));
        assert_eq!(record.get_float("score").unwrap(), Some(9.5));
        assert!(record.get_json("tags").unwrap().is_some());
    }

    #[test]
    fn test_deserialize_string_id() {
        let record: Record = serde_json::from_str(r#"{"id": "u-1"}"#).unwrap();
        assert_eq!(record.id(), &RowId::Text("u-1".into()));
    }

    #[test]
    fn test_deserialize_requires_id() {
        let err = serde_json::from_str::<Record>(r#"{"name": "Ada"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn test_serialize_puts_id_first() {
        let record = Record::new("r1").set("b", 2i64).set("a", true);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"r1","a":true,"b":2}"#);
    }

    #[test]
    fn test_shadow_id_field_does_not_survive() {
        let record = Record::new(1).set("id", "shadow").set("name", "Ada");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Ada"}));

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.resolve("id"), Some(Value::Int(1)));
    }

    #[test]
    fn test_deserialize_rejects_duplicate_id() {
        let err = serde_json::from_str::<Record>(r#"{"id": 1, "id": 2}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate field `id`"));
    }
}
