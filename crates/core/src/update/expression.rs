use std::collections::BTreeMap;

use serde_json::Value;

use crate::item::{Item, ID_ATTRIBUTE};

use super::UpdateError;

/// A `SET` update expression with its placeholder tables.
///
/// Every changed attribute gets a `#keyN` name placeholder and a `:valueN`
/// value placeholder, so reserved words and arbitrary attribute names are
/// safe to use.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    expression: String,
    assignments: Vec<(String, Value)>,
}

impl UpdateExpression {
    /// Builds an expression that overwrites every attribute in `changes`.
    ///
    /// The partition key cannot be part of a change set.
    pub fn from_changes(changes: &Item) -> Result<Self, UpdateError> {
        if changes.is_empty() {
            return Err(UpdateError::Empty);
        }
        if changes.get(ID_ATTRIBUTE).is_some() {
            return Err(UpdateError::ImmutableAttribute(ID_ATTRIBUTE));
        }

        let clauses: Vec<String> = (0..changes.len())
            .map(|index| format!("{} = {}", name_placeholder(index), value_placeholder(index)))
            .collect();

        Ok(Self {
            expression: format!("SET {}", clauses.join(", ")),
            assignments: changes
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        })
    }

    /// The `UpdateExpression` string.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The `ExpressionAttributeNames` table.
    pub fn names(&self) -> BTreeMap<String, String> {
        self.assignments
            .iter()
            .enumerate()
            .map(|(index, (name, _))| (name_placeholder(index), name.clone()))
            .collect()
    }

    /// The `ExpressionAttributeValues` table, still as JSON.
    pub fn values(&self) -> BTreeMap<String, Value> {
        self.assignments
            .iter()
            .enumerate()
            .map(|(index, (_, value))| (value_placeholder(index), value.clone()))
            .collect()
    }

    /// The attribute/value pairs the expression assigns.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.assignments
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

fn name_placeholder(index: usize) -> String {
    format!("#key{index}")
}

fn value_placeholder(index: usize) -> String {
    format!(":value{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn changes(value: Value) -> Item {
        Item::try_from(value).unwrap()
    }

    #[test]
    fn test_single_attribute() {
        let update = UpdateExpression::from_changes(&changes(json!({"category": "c2"}))).unwrap();

        assert_eq!(update.expression(), "SET #key0 = :value0");
        assert_eq!(update.names().get("#key0").unwrap(), "category");
        assert_eq!(update.values().get(":value0").unwrap(), &json!("c2"));
    }

    #[test]
    fn test_multiple_attributes_get_one_placeholder_pair_each() {
        let update = UpdateExpression::from_changes(&changes(json!({
            "category": "c2",
            "name": "Gadget",
            "price": 7
        })))
        .unwrap();

        assert_eq!(
            update.expression(),
            "SET #key0 = :value0, #key1 = :value1, #key2 = :value2"
        );
        assert_eq!(update.names().len(), 3);
        assert_eq!(update.values().len(), 3);

        // Each name placeholder pairs with the value at the same index.
        for (index, name) in ["category", "name", "price"].iter().enumerate() {
            assert_eq!(update.names()[&format!("#key{index}")], *name);
        }
        assert_eq!(update.values()[":value1"], json!("Gadget"));
        assert_eq!(update.values()[":value2"], json!(7));
    }

    #[test]
    fn test_reserved_words_are_only_used_through_placeholders() {
        let update = UpdateExpression::from_changes(&changes(json!({"name": "x", "size": 1})))
            .unwrap();

        assert!(!update.expression().contains("name"));
        assert!(!update.expression().contains("size"));
    }

    #[test]
    fn test_nested_values_are_kept_whole() {
        let update =
            UpdateExpression::from_changes(&changes(json!({"dims": {"w": 1, "h": [2, 3]}})))
                .unwrap();

        assert_eq!(update.values()[":value0"], json!({"w": 1, "h": [2, 3]}));
    }

    #[test]
    fn test_assignments_match_placeholder_tables() {
        let update =
            UpdateExpression::from_changes(&changes(json!({"a": 1, "b": "two"}))).unwrap();

        let assignments: Vec<_> = update.assignments().collect();
        assert_eq!(assignments, vec![("a", &json!(1)), ("b", &json!("two"))]);
        assert_eq!(update.names()["#key1"], "b");
        assert_eq!(update.values()[":value1"], json!("two"));
    }

    #[test]
    fn test_empty_changes_rejected() {
        assert_eq!(
            UpdateExpression::from_changes(&Item::new()),
            Err(UpdateError::Empty)
        );
    }

    #[test]
    fn test_id_cannot_be_changed() {
        assert_eq!(
            UpdateExpression::from_changes(&changes(json!({"id": "other", "name": "x"}))),
            Err(UpdateError::ImmutableAttribute("id"))
        );
    }
}
