//! In-memory backend.
//!
//! All tables and the relationship index live in one [`StoreState`] behind a
//! single `parking_lot::RwLock`. Reads share the lock, writes serialize, and
//! every trait method takes and releases the lock without awaiting, so a
//! multi-step write such as "create then link" or "delete then cascade" is
//! atomic with respect to other requests.
//!
//! # Example
//!
//! ```
//! use todo_persistence::backends::memory::InMemoryBackend;
//! use todo_persistence::core::{EntityStorage, RelationshipStorage};
//! use todo_persistence::types::{EntityKind, Relation};
//!
//! # tokio_test::block_on(async {
//! let backend = InMemoryBackend::with_sample_data();
//!
//! let categories = backend.related(Relation::TodoCategories, "1").await?;
//! assert_eq!(categories[0].text("title"), Some("Office"));
//!
//! backend.delete(EntityKind::Category, "1").await?;
//! assert!(backend.related(Relation::TodoCategories, "1").await?.is_empty());
//! # Ok::<(), todo_persistence::error::StorageError>(())
//! # }).unwrap();
//! ```

mod entity_table;
mod relationship_index;
mod sample_data;
mod storage;

use parking_lot::RwLock;

use crate::types::{EntityId, EntityKind, FieldSet, Relation, StoredEntity};

use entity_table::EntityTable;
use relationship_index::RelationshipIndex;

/// Process-local storage for todos, projects, categories and their links.
#[derive(Debug)]
pub struct InMemoryBackend {
    state: RwLock<StoreState>,
}

impl InMemoryBackend {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::new()),
        }
    }

    /// Creates a store seeded with the sample records.
    ///
    /// Two todos, one project and two categories, with todo 1 filed under
    /// category 1 and both todos being tasks of project 1.
    pub fn with_sample_data() -> Self {
        let mut state = StoreState::new();
        sample_data::seed(&mut state);
        Self {
            state: RwLock::new(state),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything guarded by the backend lock.
#[derive(Debug)]
pub(crate) struct StoreState {
    tables: [EntityTable; 3],
    edges: RelationshipIndex,
}

impl StoreState {
    fn new() -> Self {
        Self {
            tables: EntityKind::ALL.map(EntityTable::new),
            edges: RelationshipIndex::default(),
        }
    }

    fn table(&self, kind: EntityKind) -> &EntityTable {
        let table = &self.tables[kind.index()];
        debug_assert_eq!(table.kind(), kind);
        table
    }

    fn table_mut(&mut self, kind: EntityKind) -> &mut EntityTable {
        &mut self.tables[kind.index()]
    }

    /// Resolves a raw id to one that names an existing record.
    fn resolve(&self, kind: EntityKind, raw: &str) -> Option<EntityId> {
        EntityId::parse(raw).filter(|id| self.table(kind).contains(*id))
    }

    pub(crate) fn insert(&mut self, fields: FieldSet) -> EntityId {
        let kind = fields.kind();
        self.table_mut(kind).insert(fields.into_values())
    }

    pub(crate) fn link(&mut self, relation: Relation, source: EntityId, target: EntityId) -> bool {
        debug_assert!(self.table(relation.source()).contains(source));
        debug_assert!(self.table(relation.target()).contains(target));
        self.edges.insert(relation, source, target)
    }

    /// Builds a snapshot of a record together with its links.
    fn snapshot(&self, kind: EntityKind, id: EntityId) -> Option<StoredEntity> {
        let values = self.table(kind).get(id)?.clone();
        let entity = Relation::from_source(kind).fold(
            StoredEntity::new(kind, id, values),
            |entity, relation| entity.with_links(relation, self.edges.targets(relation, id)),
        );
        Some(entity)
    }

    fn snapshots(&self, kind: EntityKind, ids: impl IntoIterator<Item = EntityId>) -> Vec<StoredEntity> {
        ids.into_iter()
            .filter_map(|id| self.snapshot(kind, id))
            .collect()
    }
}
