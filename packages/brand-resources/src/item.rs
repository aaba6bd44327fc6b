//! The shape every stored record shares.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A server-defined record held by a [`crate::ResourceStore`].
///
/// `id` is assigned by the server and never changed by the client.
/// `order_index` is a display sort key with no uniqueness guarantee.
pub trait ResourceItem: Clone + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;

    fn order_index(&self) -> i64;

    /// Soft-delete flag. Families without one are always active.
    fn is_active(&self) -> bool {
        true
    }

    /// The `type` discriminator used for client-side filtering.
    fn kind(&self) -> Option<&str> {
        None
    }
}

/// Untyped record for collections without a dedicated model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub order_index: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl ResourceItem for Record {
    fn id(&self) -> &str {
        &self.id
    }

    fn order_index(&self) -> i64 {
        self.order_index
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

pub(crate) fn default_active() -> bool {
    true
}

/// Ids arrive as strings from most endpoints and as numbers from a few.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("invalid id: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_keeps_unknown_fields() {
        let record: Record = serde_json::from_value(json!({
            "id": "r1",
            "orderIndex": 4,
            "type": "hero",
            "title": "Hola",
            "imageUrl": "https://cdn/x.png"
        }))
        .unwrap();

        assert_eq!(record.id(), "r1");
        assert_eq!(record.order_index(), 4);
        assert!(record.is_active());
        assert_eq!(record.kind(), Some("hero"));
        assert_eq!(record.field("title"), Some(&json!("Hola")));
    }

    #[test]
    fn numeric_and_underscore_ids_are_accepted() {
        let numeric: Record = serde_json::from_value(json!({ "id": 17 })).unwrap();
        assert_eq!(numeric.id, "17");

        let mongo: Record = serde_json::from_value(json!({ "_id": "abc", "isActive": false })).unwrap();
        assert_eq!(mongo.id, "abc");
        assert!(!mongo.is_active());
        assert_eq!(mongo.order_index(), 0);
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(serde_json::from_value::<Record>(json!({ "id": "" })).is_err());
    }
}
