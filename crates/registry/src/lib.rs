//! Persisted channel registry for bootstrapbot.
//!
//! Each managed channel owns a [`Registrar`] tracking the users who asked to
//! be invited back. The [`ChannelRegistry`] maps channel names to registrars
//! and carries the controller identity; a [`RegistryStore`] keeps a durable
//! JSON snapshot of it.

pub mod error;
pub mod registrar;
pub mod registry;
pub mod store;
pub mod store_file;
pub mod store_memory;

pub use {
    error::{Error, Result},
    registrar::{RegisterOutcome, Registrar},
    registry::ChannelRegistry,
    store::RegistryStore,
    store_file::FileStore,
    store_memory::MemoryStore,
};
