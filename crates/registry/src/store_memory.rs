//! In-memory store for testing.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{Result, registry::ChannelRegistry, store::RegistryStore};

/// Store backed by a mutex-guarded registry. No persistence.
#[derive(Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<ChannelRegistry>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as if it had been saved earlier.
    pub fn with_registry(registry: ChannelRegistry) -> Self {
        Self {
            snapshot: Mutex::new(Some(registry)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Last saved snapshot, if any.
    pub fn snapshot(&self) -> Option<ChannelRegistry> {
        self.snapshot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RegistryStore for MemoryStore {
    async fn load(&self) -> Result<ChannelRegistry> {
        let mut snapshot = self.snapshot.lock().unwrap_or_else(|e| e.into_inner());
        Ok(snapshot.get_or_insert_with(ChannelRegistry::new).clone())
    }

    async fn save(&self, registry: &ChannelRegistry) -> Result<()> {
        let mut snapshot = self.snapshot.lock().unwrap_or_else(|e| e.into_inner());
        *snapshot = Some(registry.clone());
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
