//! Per-kind record table.

use std::collections::BTreeMap;

use crate::types::{EntityId, EntityKind, FieldValue};

/// Records of one entity kind, keyed by id.
///
/// Ids come from a counter that only moves forward, so iteration order of the
/// map is insertion order and deleted ids are never handed out again.
#[derive(Debug)]
pub(crate) struct EntityTable {
    kind: EntityKind,
    next_id: u64,
    rows: BTreeMap<EntityId, Vec<FieldValue>>,
}

impl EntityTable {
    pub(crate) fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    pub(crate) fn kind(&self) -> EntityKind {
        self.kind
    }

    pub(crate) fn insert(&mut self, values: Vec<FieldValue>) -> EntityId {
        debug_assert_eq!(values.len(), self.kind.fields().len());
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.rows.insert(id, values);
        id
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&Vec<FieldValue>> {
        self.rows.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Vec<FieldValue>> {
        self.rows.get_mut(&id)
    }

    pub(crate) fn contains(&self, id: EntityId) -> bool {
        self.rows.contains_key(&id)
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> Option<Vec<FieldValue>> {
        self.rows.remove(&id)
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.rows.keys().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(title: &str) -> Vec<FieldValue> {
        vec![FieldValue::from(title), FieldValue::from("")]
    }

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let mut table = EntityTable::new(EntityKind::Category);
        let first = table.insert(category("Office"));
        let second = table.insert(category("Home"));
        assert_eq!(first, EntityId::new(1));
        assert_eq!(second, EntityId::new(2));

        table.remove(second);
        let third = table.insert(category("School"));
        assert_eq!(third, EntityId::new(3));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_iteration_follows_insertion() {
        let mut table = EntityTable::new(EntityKind::Category);
        for title in ["a", "b", "c"] {
            table.insert(category(title));
        }
        table.remove(EntityId::new(2));

        let ids: Vec<_> = table.ids().map(|id| id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(!table.contains(EntityId::new(2)));
    }
}
