//! Persistence trait for the channel registry.

use async_trait::async_trait;

use crate::{Result, registry::ChannelRegistry};

/// Durable home of the [`ChannelRegistry`].
///
/// The running bot is the only writer; a store holds a snapshot of the last
/// saved state.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Read the snapshot, creating an empty one when none exists yet.
    async fn load(&self) -> Result<ChannelRegistry>;

    /// Replace the snapshot with `registry`.
    async fn save(&self, registry: &ChannelRegistry) -> Result<()>;
}
