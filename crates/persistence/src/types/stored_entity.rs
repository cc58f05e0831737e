//! Stored entity type.
//!
//! [`StoredEntity`] is the snapshot of a record handed out by the storage
//! layer: its identity, its field values and the ids it is linked to.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::entity::{EntityId, EntityKind, FieldValue};
use super::relation::Relation;

/// A record with its relationship snapshot.
///
/// Field values are kept positionally, in the order declared by
/// [`EntityKind::fields`].
///
/// # Wire format
///
/// Serializes as a flat JSON object: `"id"`, then every declared field, then
/// one array per non-empty relation. Scalars are rendered as strings.
///
/// ```
/// use todo_persistence::types::{EntityId, EntityKind, FieldValue, StoredEntity};
///
/// let category = StoredEntity::new(
///     EntityKind::Category,
///     EntityId::new(1),
///     vec![FieldValue::from("Office"), FieldValue::from("")],
/// );
///
/// let json = serde_json::to_value(&category).unwrap();
/// assert_eq!(json["id"], "1");
/// assert_eq!(json["title"], "Office");
/// assert_eq!(category.url(), "categories/1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntity {
    kind: EntityKind,
    id: EntityId,
    values: Vec<FieldValue>,
    links: Vec<(Relation, Vec<EntityId>)>,
}

impl StoredEntity {
    /// Creates a snapshot with no links.
    pub fn new(kind: EntityKind, id: EntityId, values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(values.len(), kind.fields().len());
        Self {
            kind,
            id,
            values,
            links: Vec::new(),
        }
    }

    /// Attaches the linked ids for one relation.
    pub fn with_links(mut self, relation: Relation, ids: Vec<EntityId>) -> Self {
        debug_assert_eq!(relation.source(), self.kind);
        self.links.push((relation, ids));
        self
    }

    /// Returns the entity kind.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the identifier.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the path of this record, e.g. `todos/1`.
    pub fn url(&self) -> String {
        format!("{}/{}", self.kind.plural(), self.id)
    }

    /// Returns the value of a declared field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.kind
            .field(field)
            .and_then(|(index, _)| self.values.get(index))
    }

    /// Returns a text field.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Returns a boolean field.
    pub fn flag(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_flag)
    }

    /// Returns all field values in declaration order.
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Returns the ids linked through a relation (empty if none).
    pub fn links(&self, relation: Relation) -> &[EntityId] {
        self.links
            .iter()
            .find(|(r, _)| *r == relation)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Renders the record as a JSON value.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for StoredEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let linked: Vec<_> = self
            .links
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .collect();

        let mut map = serializer.serialize_map(Some(1 + self.values.len() + linked.len()))?;
        map.serialize_entry("id", &self.id.to_string())?;
        for (spec, value) in self.kind.fields().iter().zip(&self.values) {
            map.serialize_entry(spec.name, &value.to_string())?;
        }
        for (relation, ids) in linked {
            let refs: Vec<_> = ids.iter().map(|id| IdRef(*id)).collect();
            map.serialize_entry(relation.name(), &refs)?;
        }
        map.end()
    }
}

/// `{"id": "<id>"}` reference inside a relation array.
struct IdRef(EntityId);

impl Serialize for IdRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("id", &self.0.to_string())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn todo() -> StoredEntity {
        StoredEntity::new(
            EntityKind::Todo,
            EntityId::new(1),
            vec![
                FieldValue::from("scan paperwork"),
                FieldValue::Flag(false),
                FieldValue::from(""),
            ],
        )
    }

    #[test]
    fn test_field_access() {
        let entity = todo();
        assert_eq!(entity.text("title"), Some("scan paperwork"));
        assert_eq!(entity.flag("doneStatus"), Some(false));
        assert_eq!(entity.get("active"), None);
    }

    #[test]
    fn test_serializes_scalars_as_strings() {
        let json = todo().to_json();
        assert_eq!(
            json,
            json!({
                "id": "1",
                "title": "scan paperwork",
                "doneStatus": "false",
                "description": ""
            })
        );
    }

    #[test]
    fn test_serializes_non_empty_links_only() {
        let entity = todo()
            .with_links(Relation::TodoCategories, vec![])
            .with_links(Relation::TodoTasksOf, vec![EntityId::new(1)]);

        let json = entity.to_json();
        assert!(json.get("categories").is_none());
        assert_eq!(json["tasksof"], json!([{"id": "1"}]));
        assert_eq!(entity.links(Relation::TodoTasksOf), &[EntityId::new(1)]);
        assert!(entity.links(Relation::TodoCategories).is_empty());
    }

    #[test]
    fn test_field_order_is_declaration_order() {
        let text = serde_json::to_string(&todo()).unwrap();
        let title = text.find("\"title\"").unwrap();
        let done = text.find("\"doneStatus\"").unwrap();
        let description = text.find("\"description\"").unwrap();
        assert!(text.starts_with("{\"id\""));
        assert!(title < done && done < description);
    }
}
