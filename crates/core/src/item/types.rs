use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::ItemError;

/// Name of the partition key attribute.
pub const ID_ATTRIBUTE: &str = "id";

/// Name of the attribute matched by the category query.
pub const CATEGORY_ATTRIBUTE: &str = "category";

/// A single product record: an arbitrary JSON object keyed by `id`.
///
/// Apart from `id`, attributes are unconstrained. Keys iterate in sorted
/// order, which keeps generated update expressions deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    /// Creates an empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a request body into an item.
    ///
    /// The body must be a JSON object; any other JSON value is rejected.
    pub fn from_body(body: &str) -> Result<Self, ItemError> {
        let value: Value = serde_json::from_str(body)?;
        Self::try_from(value)
    }

    /// Returns the item's `id`, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_ATTRIBUTE).and_then(Value::as_str)
    }

    /// Replaces `id` with a freshly generated UUID v4 and returns it.
    ///
    /// Any client-supplied `id` is discarded.
    pub fn assign_new_id(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        self.0
            .insert(ID_ATTRIBUTE.to_string(), Value::String(id.clone()));
        id
    }

    /// Gets an attribute by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Sets an attribute, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    /// Overwrites every attribute named in `changes`; other attributes are kept.
    pub fn apply(&mut self, changes: &Item) {
        for (name, value) in changes.iter() {
            self.0.insert(name.clone(), value.clone());
        }
    }

    /// Evaluates DynamoDB's `contains(attribute, operand)` for a string operand.
    ///
    /// Strings match on substring, lists match on element equality. Any other
    /// type, or a missing attribute, does not match.
    pub fn attribute_contains(&self, name: &str, operand: &str) -> bool {
        match self.0.get(name) {
            Some(Value::String(value)) => value.contains(operand),
            Some(Value::Array(values)) => values.iter().any(|v| v.as_str() == Some(operand)),
            _ => false,
        }
    }

    /// Iterates over attribute names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Iterates over attribute names.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Value> for Item {
    type Error = ItemError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(ItemError::NotAnObject("null")),
            Value::Bool(_) => Err(ItemError::NotAnObject("boolean")),
            Value::Number(_) => Err(ItemError::NotAnObject("number")),
            Value::String(_) => Err(ItemError::NotAnObject("string")),
            Value::Array(_) => Err(ItemError::NotAnObject("array")),
        }
    }
}

impl From<Map<String, Value>> for Item {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Item> for Value {
    fn from(item: Item) -> Self {
        Value::Object(item.0)
    }
}

impl FromIterator<(String, Value)> for Item {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget() -> Item {
        Item::try_from(json!({
            "id": "p-1",
            "name": "Widget",
            "category": "tools",
            "tags": ["blue", "small"],
            "price": 12
        }))
        .unwrap()
    }

    #[test]
    fn test_from_body_parses_object() {
        let item = Item::from_body(r#"{"name":"Widget","price":9.5}"#).unwrap();
        assert_eq!(item.get("name"), Some(&json!("Widget")));
        assert_eq!(item.get("price"), Some(&json!(9.5)));
        assert_eq!(item.id(), None);
    }

    #[test]
    fn test_from_body_rejects_non_objects() {
        assert!(matches!(
            Item::from_body("[1, 2]"),
            Err(ItemError::NotAnObject("array"))
        ));
        assert!(matches!(
            Item::from_body("null"),
            Err(ItemError::NotAnObject("null"))
        ));
    }

    #[test]
    fn test_from_body_rejects_malformed_json() {
        assert!(matches!(
            Item::from_body("{\"name\":"),
            Err(ItemError::Json(_))
        ));
    }

    #[test]
    fn test_assign_new_id_overwrites_client_id() {
        let mut item = Item::from_body(r#"{"id":"client-chosen","name":"X"}"#).unwrap();
        let id = item.assign_new_id();

        assert_ne!(id, "client-chosen");
        assert_eq!(item.id(), Some(id.as_str()));
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(item.get("name"), Some(&json!("X")));
    }

    #[test]
    fn test_assign_new_id_is_fresh_each_time() {
        let mut a = Item::new();
        let mut b = Item::new();
        assert_ne!(a.assign_new_id(), b.assign_new_id());
    }

    #[test]
    fn test_apply_overwrites_named_keys_only() {
        let mut item = widget();
        let changes = Item::try_from(json!({"category": "c2", "price": {"amount": 3}})).unwrap();

        item.apply(&changes);

        assert_eq!(item.get("category"), Some(&json!("c2")));
        assert_eq!(item.get("price"), Some(&json!({"amount": 3})));
        assert_eq!(item.get("name"), Some(&json!("Widget")));
        assert_eq!(item.id(), Some("p-1"));
    }

    #[test]
    fn test_attribute_contains_substring() {
        let item = widget();
        assert!(item.attribute_contains(CATEGORY_ATTRIBUTE, "tools"));
        assert!(item.attribute_contains(CATEGORY_ATTRIBUTE, "too"));
        assert!(!item.attribute_contains(CATEGORY_ATTRIBUTE, "garden"));
    }

    #[test]
    fn test_attribute_contains_list_element() {
        let item = widget();
        assert!(item.attribute_contains("tags", "blue"));
        assert!(!item.attribute_contains("tags", "bl"));
    }

    #[test]
    fn test_attribute_contains_other_types_never_match() {
        let item = widget();
        assert!(!item.attribute_contains("price", "12"));
        assert!(!item.attribute_contains("missing", "x"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let item = widget();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["name"], "Widget");
        assert_eq!(Value::from(item), value);
    }
}
