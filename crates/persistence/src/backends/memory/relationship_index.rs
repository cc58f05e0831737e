//! Undirected edge storage.

use std::collections::{BTreeSet, HashMap};

use crate::types::{EdgeSet, EntityId, EntityKind, Relation};

/// Edges for every [`EdgeSet`], stored once as `(left, right)` pairs.
///
/// Existence of the endpoints is enforced by the caller, which holds the
/// same lock over the entity tables.
#[derive(Debug, Default)]
pub(crate) struct RelationshipIndex {
    edges: HashMap<EdgeSet, BTreeSet<(EntityId, EntityId)>>,
}

impl RelationshipIndex {
    /// Adds an edge. Returns `false` if it already existed.
    pub(crate) fn insert(&mut self, relation: Relation, source: EntityId, target: EntityId) -> bool {
        self.edges
            .entry(relation.edge_set())
            .or_default()
            .insert(relation.orient(source, target))
    }

    /// Removes an edge. Returns `false` if there was none.
    pub(crate) fn remove(&mut self, relation: Relation, source: EntityId, target: EntityId) -> bool {
        self.edges
            .get_mut(&relation.edge_set())
            .is_some_and(|set| set.remove(&relation.orient(source, target)))
    }

    /// Whether the edge exists.
    #[cfg(test)]
    pub(crate) fn contains(&self, relation: Relation, source: EntityId, target: EntityId) -> bool {
        self.edges
            .get(&relation.edge_set())
            .is_some_and(|set| set.contains(&relation.orient(source, target)))
    }

    /// Ids reachable from `source` through `relation`, in ascending order.
    pub(crate) fn targets(&self, relation: Relation, source: EntityId) -> Vec<EntityId> {
        let Some(set) = self.edges.get(&relation.edge_set()) else {
            return Vec::new();
        };
        let (left, _) = relation.edge_set().endpoints();

        let mut ids: Vec<_> = if relation.source() == left {
            set.range((source, EntityId::new(0))..=(source, EntityId::new(u64::MAX)))
                .map(|(_, right)| *right)
                .collect()
        } else {
            set.iter()
                .filter(|(_, right)| *right == source)
                .map(|(left, _)| *left)
                .collect()
        };
        ids.sort_unstable();
        ids
    }

    /// Drops every edge touching a record. Returns how many were removed.
    pub(crate) fn remove_touching(&mut self, kind: EntityKind, id: EntityId) -> usize {
        let mut removed = 0;
        for (edge_set, set) in self.edges.iter_mut() {
            let (left, right) = edge_set.endpoints();
            let before = set.len();
            set.retain(|(l, r)| !((left == kind && *l == id) || (right == kind && *r == id)));
            removed += before - set.len();
        }
        removed
    }

    /// Total number of edges.
    pub(crate) fn len(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }
}
