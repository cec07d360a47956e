//! Bot settings: discovery, parsing and validation.
//!
//! Settings files: `bootstrapbot.toml`, `bootstrapbot.yaml`, or
//! `bootstrapbot.json`, searched in `./` then `~/.config/bootstrapbot/`.
//! Every field has a default; command-line values override the file.

pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{config_dir, discover_and_load, find_config_file, load_config},
    schema::{BotConfig, ChannelsConfig, IdentityConfig, InviteConfig, ServerConfig, StorageConfig},
    validate::{Diagnostic, Severity, ValidationResult, validate},
};
