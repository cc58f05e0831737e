//! Application state for the todo manager REST API.
//!
//! Holds the storage backend, the configuration and the handle used by
//! `GET /shutdown` to stop the server.

use std::sync::Arc;

use todo_persistence::core::EntityStorage;
use tokio::sync::watch;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`EntityStorage`])
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use todo_persistence::backends::memory::InMemoryBackend;
/// use todo_rest::{AppState, ServerConfig};
///
/// let state = AppState::new(Arc::new(InMemoryBackend::new()), ServerConfig::default());
/// assert!(!state.shutdown().is_triggered());
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Signals the server to stop accepting connections.
    shutdown: ShutdownHandle,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<S: EntityStorage> AppState<S> {
    /// Creates a new AppState with its own shutdown handle.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self::with_shutdown(storage, config, ShutdownHandle::new())
    }

    /// Creates a new AppState that triggers the given shutdown handle.
    pub fn with_shutdown(storage: Arc<S>, config: ServerConfig, shutdown: ShutdownHandle) -> Self {
        Self {
            storage,
            config: Arc::new(config),
            shutdown,
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a clone of the storage Arc.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the shutdown handle.
    pub fn shutdown(&self) -> &ShutdownHandle {
        &self.shutdown
    }
}

/// A cloneable trigger for graceful shutdown.
///
/// Every clone observes the same signal. Once triggered it stays triggered.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Creates an untriggered handle.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Requests shutdown.
    pub fn trigger(&self) {
        self.sender.send_replace(true);
    }

    /// Returns whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once shutdown has been requested.
    pub async fn wait(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = receiver.wait_for(|triggered| *triggered).await;
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use todo_persistence::StorageResult;
    use todo_persistence::types::{EntityKind, FieldSet, StoredEntity};

    // Mock storage for testing
    struct MockStorage;

    #[async_trait]
    impl EntityStorage for MockStorage {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn create(&self, _fields: FieldSet) -> StorageResult<StoredEntity> {
            unimplemented!()
        }

        async fn get(&self, _kind: EntityKind, _id: &str) -> StorageResult<StoredEntity> {
            unimplemented!()
        }

        async fn exists(&self, _kind: EntityKind, _id: &str) -> StorageResult<bool> {
            unimplemented!()
        }

        async fn update(
            &self,
            _kind: EntityKind,
            _id: &str,
            _fields: FieldSet,
        ) -> StorageResult<StoredEntity> {
            unimplemented!()
        }

        async fn replace(
            &self,
            _kind: EntityKind,
            _id: &str,
            _fields: FieldSet,
        ) -> StorageResult<StoredEntity> {
            unimplemented!()
        }

        async fn delete(&self, _kind: EntityKind, _id: &str) -> StorageResult<()> {
            unimplemented!()
        }

        async fn list(&self, _kind: EntityKind) -> StorageResult<Vec<StoredEntity>> {
            unimplemented!()
        }

        async fn count(&self, _kind: EntityKind) -> StorageResult<usize> {
            unimplemented!()
        }
    }

    #[test]
    fn test_app_state_creation() {
        let storage = Arc::new(MockStorage);
        let config = ServerConfig::default();
        let state = AppState::new(storage, config);

        assert_eq!(state.storage().backend_name(), "mock");
        assert_eq!(state.config().port, 4567);
    }

    #[test]
    fn test_app_state_clone_shares_shutdown() {
        let state = AppState::new(Arc::new(MockStorage), ServerConfig::default());
        let cloned = state.clone();

        cloned.shutdown().trigger();
        assert!(state.shutdown().is_triggered());
    }

    #[tokio::test]
    async fn test_wait_resolves_after_trigger() {
        let handle = ShutdownHandle::new();
        let waiter = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.wait().await })
        };

        handle.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("shutdown wait timed out")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_after_trigger_returns_immediately() {
        let handle = ShutdownHandle::new();
        handle.trigger();
        tokio::time::timeout(Duration::from_millis(100), handle.wait())
            .await
            .expect("already triggered handle should not block");
    }
}
