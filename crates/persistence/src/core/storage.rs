//! Entity and relationship storage traits.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{EntityKind, FieldSet, Relation, StoredEntity};

/// CRUD operations over todos, projects and categories.
///
/// Every returned [`StoredEntity`] carries a snapshot of the record's links at
/// the time of the call.
///
/// # Example
///
/// ```
/// use todo_persistence::backends::memory::InMemoryBackend;
/// use todo_persistence::core::EntityStorage;
/// use todo_persistence::types::{EntityKind, FieldSet};
///
/// # tokio_test::block_on(async {
/// let storage = InMemoryBackend::new();
///
/// let fields = FieldSet::empty(EntityKind::Category).with("title", "ECSE 429");
/// let created = storage.create(fields).await?;
/// assert_eq!(created.url(), "categories/1");
///
/// let read = storage.get(EntityKind::Category, "1").await?;
/// assert_eq!(read.text("title"), Some("ECSE 429"));
/// assert_eq!(read.text("description"), Some(""));
///
/// storage.delete(EntityKind::Category, "1").await?;
/// assert!(storage.get(EntityKind::Category, "1").await.is_err());
/// # Ok::<(), todo_persistence::error::StorageError>(())
/// # }).unwrap();
/// ```
#[async_trait]
pub trait EntityStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Creates a record of `fields.kind()`, filling absent fields with
    /// defaults and assigning the next id of that kind.
    async fn create(&self, fields: FieldSet) -> StorageResult<StoredEntity>;

    /// Reads a record.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - if no such record exists
    async fn get(&self, kind: EntityKind, id: &str) -> StorageResult<StoredEntity>;

    /// Returns whether a record exists.
    async fn exists(&self, kind: EntityKind, id: &str) -> StorageResult<bool>;

    /// Merges the supplied fields onto an existing record.
    ///
    /// Fields absent from `fields` keep their current values.
    async fn update(&self, kind: EntityKind, id: &str, fields: FieldSet)
    -> StorageResult<StoredEntity>;

    /// Overwrites an existing record.
    ///
    /// Fields absent from `fields` are reset to their defaults.
    async fn replace(
        &self,
        kind: EntityKind,
        id: &str,
        fields: FieldSet,
    ) -> StorageResult<StoredEntity>;

    /// Deletes a record and every edge touching it.
    async fn delete(&self, kind: EntityKind, id: &str) -> StorageResult<()>;

    /// Lists all records of a kind in insertion order.
    async fn list(&self, kind: EntityKind) -> StorageResult<Vec<StoredEntity>>;

    /// Counts the records of a kind.
    async fn count(&self, kind: EntityKind) -> StorageResult<usize>;
}

/// Relationship operations.
///
/// A [`Relation`] names one direction of an undirected edge set, so linking
/// `todos/1/categories` to category 2 is visible from `categories/2/todos`.
#[async_trait]
pub trait RelationshipStorage: EntityStorage {
    /// Links an existing target record to the source record.
    ///
    /// Linking an edge that already exists succeeds without duplicating it.
    /// Returns the target record.
    ///
    /// # Errors
    ///
    /// * `StorageError::Relationship(ParentNotFound)` - if the source record does not exist
    /// * `StorageError::Relationship(TargetNotFound)` - if the target record does not exist
    async fn link(
        &self,
        relation: Relation,
        source_id: &str,
        target_id: &str,
    ) -> StorageResult<StoredEntity>;

    /// Creates a new target record and links it, atomically.
    async fn link_new(
        &self,
        relation: Relation,
        source_id: &str,
        fields: FieldSet,
    ) -> StorageResult<StoredEntity>;

    /// Removes the edge between two records.
    ///
    /// # Errors
    ///
    /// * `StorageError::Relationship(EdgeNotFound)` - if there is no such edge
    async fn unlink(&self, relation: Relation, source_id: &str, target_id: &str)
    -> StorageResult<()>;

    /// Lists the records linked to the source through `relation`.
    ///
    /// A missing source yields an empty list.
    async fn related(&self, relation: Relation, source_id: &str)
    -> StorageResult<Vec<StoredEntity>>;
}
