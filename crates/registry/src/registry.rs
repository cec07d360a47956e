use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registrar::Registrar;

/// Every managed channel plus the identity allowed to administer the bot.
///
/// Serialized as a single JSON object: the controller under
/// `bot_controller` and one top-level entry per channel name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRegistry {
    #[serde(
        rename = "bot_controller",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    controller: Option<String>,
    #[serde(flatten)]
    channels: BTreeMap<String, Registrar>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    pub fn set_controller(&mut self, controller: impl Into<String>) {
        self.controller = Some(controller.into());
    }

    /// Whether `nick` is the configured controller. IRC nicknames compare
    /// case-insensitively.
    pub fn is_controller(&self, nick: &str) -> bool {
        self.controller
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(nick))
    }

    /// Add a registrar for a channel that is not managed yet.
    ///
    /// Returns `false` and leaves the existing registrar untouched when the
    /// channel is already present.
    pub fn insert(&mut self, registrar: Registrar) -> bool {
        if self.resolve_key(registrar.channel()).is_some() {
            return false;
        }
        self.channels
            .insert(registrar.channel().to_string(), registrar);
        true
    }

    pub fn get(&self, channel: &str) -> Option<&Registrar> {
        let key = self.resolve_key(channel)?;
        self.channels.get(key)
    }

    pub fn get_mut(&mut self, channel: &str) -> Option<&mut Registrar> {
        let key = self.resolve_key(channel)?.to_string();
        self.channels.get_mut(&key)
    }

    pub fn remove(&mut self, channel: &str) -> Option<Registrar> {
        let key = self.resolve_key(channel)?.to_string();
        self.channels.remove(&key)
    }

    pub fn contains(&self, channel: &str) -> bool {
        self.resolve_key(channel).is_some()
    }

    /// Managed registrars ordered by channel name.
    pub fn channels(&self) -> impl Iterator<Item = &Registrar> {
        self.channels.values()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Check a freshly loaded snapshot: every entry must describe the channel
    /// it is stored under. Repeated registrants are dropped, keeping first
    /// occurrences; the number dropped is returned.
    pub fn check(&mut self) -> Result<usize, String> {
        let mut dropped = 0;
        for (key, registrar) in &mut self.channels {
            if !key.eq_ignore_ascii_case(registrar.channel()) {
                return Err(format!(
                    "entry {key} describes channel {}",
                    registrar.channel()
                ));
            }
            dropped += registrar.dedupe();
        }
        Ok(dropped)
    }

    /// Exact key first, then an ASCII case-insensitive match.
    fn resolve_key(&self, channel: &str) -> Option<&str> {
        if let Some((key, _)) = self.channels.get_key_value(channel) {
            return Some(key.as_str());
        }
        self.channels
            .keys()
            .find(|k| k.eq_ignore_ascii_case(channel))
            .map(String::as_str)
    }
}
