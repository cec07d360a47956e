//! Settings schema.

use std::path::PathBuf;

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Root settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub invites: InviteConfig,
    pub storage: StorageConfig,
    pub channels: ChannelsConfig,
}

/// IRC server to connect to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// Defaults to 6667.
    pub port: u16,
    /// Sent as `PASS` before registration when set.
    #[serde(
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<Secret<String>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 6667,
            password: None,
        }
    }
}

/// How the bot presents itself and who may command it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub nickname: String,
    pub username: String,
    pub realname: String,
    /// Nick allowed to send private commands. Overrides the value stored in
    /// the registry file when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    /// How many nickname-in-use replies to tolerate before giving up.
    pub max_nick_attempts: u32,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            nickname: "bootstrapbot".into(),
            username: "bootstrapbot".into(),
            realname: "Channel bootstrap bot".into(),
            controller: None,
            max_nick_attempts: 5,
        }
    }
}

/// Mass-invite behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InviteConfig {
    /// Pause between consecutive INVITEs, in milliseconds.
    pub delay_ms: u64,
    /// Nicks invited ahead of the registrants on every mass invite.
    pub extra_invitees: Vec<String>,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            extra_invitees: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Registry snapshot location.
    pub state_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("config.json"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelsConfig {
    /// Managed channels to rejoin after connecting.
    pub autojoin: Vec<String>,
}

fn serialize_option_secret<S: serde::Serializer>(
    secret: &Option<Secret<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(s) => serializer.serialize_some(s.expose_secret()),
        None => serializer.serialize_none(),
    }
}
