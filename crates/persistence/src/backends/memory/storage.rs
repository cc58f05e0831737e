//! EntityStorage and RelationshipStorage implementations for the in-memory backend.

use async_trait::async_trait;

use crate::core::{EntityStorage, RelationshipStorage};
use crate::error::{RelationshipError, ResourceError, StorageError, StorageResult};
use crate::types::{EntityKind, FieldSet, Relation, StoredEntity, WriteMode};

use super::InMemoryBackend;

fn not_found(kind: EntityKind, id: &str) -> StorageError {
    ResourceError::NotFound {
        kind,
        id: id.to_string(),
    }
    .into()
}

impl InMemoryBackend {
    fn apply(
        &self,
        kind: EntityKind,
        id: &str,
        fields: FieldSet,
        mode: WriteMode,
    ) -> StorageResult<StoredEntity> {
        debug_assert_eq!(fields.kind(), kind);
        let mut state = self.state.write();
        let entity_id = state.resolve(kind, id).ok_or_else(|| not_found(kind, id))?;

        let values = state
            .table_mut(kind)
            .get_mut(entity_id)
            .ok_or_else(|| not_found(kind, id))?;
        fields.apply_to(values, mode);

        tracing::debug!(kind = %kind, id = %entity_id, ?mode, "Updated entity");
        state.snapshot(kind, entity_id).ok_or_else(|| not_found(kind, id))
    }
}

#[async_trait]
impl EntityStorage for InMemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, fields: FieldSet) -> StorageResult<StoredEntity> {
        let kind = fields.kind();
        let mut state = self.state.write();
        let id = state.insert(fields);

        tracing::debug!(kind = %kind, id = %id, "Created entity");
        state
            .snapshot(kind, id)
            .ok_or_else(|| not_found(kind, &id.to_string()))
    }

    async fn get(&self, kind: EntityKind, id: &str) -> StorageResult<StoredEntity> {
        let state = self.state.read();
        state
            .resolve(kind, id)
            .and_then(|entity_id| state.snapshot(kind, entity_id))
            .ok_or_else(|| not_found(kind, id))
    }

    async fn exists(&self, kind: EntityKind, id: &str) -> StorageResult<bool> {
        Ok(self.state.read().resolve(kind, id).is_some())
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        fields: FieldSet,
    ) -> StorageResult<StoredEntity> {
        self.apply(kind, id, fields, WriteMode::Amend)
    }

    async fn replace(
        &self,
        kind: EntityKind,
        id: &str,
        fields: FieldSet,
    ) -> StorageResult<StoredEntity> {
        self.apply(kind, id, fields, WriteMode::Replace)
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> StorageResult<()> {
        let mut state = self.state.write();
        let entity_id = state.resolve(kind, id).ok_or_else(|| not_found(kind, id))?;

        state.table_mut(kind).remove(entity_id);
        let edges = state.edges.remove_touching(kind, entity_id);

        tracing::debug!(
            kind = %kind,
            id = %entity_id,
            edges,
            remaining_edges = state.edges.len(),
            "Deleted entity"
        );
        Ok(())
    }

    async fn list(&self, kind: EntityKind) -> StorageResult<Vec<StoredEntity>> {
        let state = self.state.read();
        let ids: Vec<_> = state.table(kind).ids().collect();
        Ok(state.snapshots(kind, ids))
    }

    async fn count(&self, kind: EntityKind) -> StorageResult<usize> {
        Ok(self.state.read().table(kind).len())
    }
}

#[async_trait]
impl RelationshipStorage for InMemoryBackend {
    async fn link(
        &self,
        relation: Relation,
        source_id: &str,
        target_id: &str,
    ) -> StorageResult<StoredEntity> {
        let mut state = self.state.write();
        let source = state.resolve(relation.source(), source_id).ok_or_else(|| {
            RelationshipError::ParentNotFound {
                relation,
                id: source_id.to_string(),
            }
        })?;
        let target = state.resolve(relation.target(), target_id).ok_or_else(|| {
            RelationshipError::TargetNotFound {
                relation,
                id: target_id.to_string(),
            }
        })?;

        let created = state.link(relation, source, target);
        tracing::debug!(relation = %relation, %source, %target, created, "Linked entities");

        state
            .snapshot(relation.target(), target)
            .ok_or_else(|| not_found(relation.target(), target_id))
    }

    async fn link_new(
        &self,
        relation: Relation,
        source_id: &str,
        fields: FieldSet,
    ) -> StorageResult<StoredEntity> {
        debug_assert_eq!(fields.kind(), relation.target());
        let mut state = self.state.write();
        let source = state.resolve(relation.source(), source_id).ok_or_else(|| {
            RelationshipError::ParentNotFound {
                relation,
                id: source_id.to_string(),
            }
        })?;

        let target = state.insert(fields);
        state.link(relation, source, target);
        tracing::debug!(relation = %relation, %source, %target, "Created and linked entity");

        state
            .snapshot(relation.target(), target)
            .ok_or_else(|| not_found(relation.target(), &target.to_string()))
    }

    async fn unlink(
        &self,
        relation: Relation,
        source_id: &str,
        target_id: &str,
    ) -> StorageResult<()> {
        let edge_not_found = || RelationshipError::EdgeNotFound {
            relation,
            parent: source_id.to_string(),
            target: target_id.to_string(),
        };

        let mut state = self.state.write();
        let source = state
            .resolve(relation.source(), source_id)
            .ok_or_else(edge_not_found)?;
        let target = state
            .resolve(relation.target(), target_id)
            .ok_or_else(edge_not_found)?;

        if !state.edges.remove(relation, source, target) {
            return Err(edge_not_found().into());
        }

        tracing::debug!(relation = %relation, %source, %target, "Unlinked entities");
        Ok(())
    }

    async fn related(
        &self,
        relation: Relation,
        source_id: &str,
    ) -> StorageResult<Vec<StoredEntity>> {
        let state = self.state.read();
        let Some(source) = state.resolve(relation.source(), source_id) else {
            return Ok(Vec::new());
        };

        let targets = state.edges.targets(relation, source);
        Ok(state.snapshots(relation.target(), targets))
    }
}
