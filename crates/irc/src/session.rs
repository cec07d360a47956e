//! Turns inbound protocol messages into [`IrcEvent`]s.
//!
//! The session also tracks who is in each joined channel, since part
//! decisions need the member count at the moment a user joins. Messages must
//! be fed in arrival order.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::{channel::is_channel, event::IrcEvent, message::Message};

const RPL_WELCOME: &str = "001";
const RPL_NAMREPLY: &str = "353";
const RPL_ENDOFNAMES: &str = "366";
const ERR_NICKNAMEINUSE: &str = "433";

/// Membership mode prefixes that may precede a nick in a NAMES reply.
const NAMES_MODE_PREFIXES: &[char] = &['~', '&', '@', '%', '+'];

/// Per-connection protocol state.
#[derive(Debug, Default)]
pub struct Session {
    nickname: String,
    /// Lower-cased channel -> lower-cased nicks.
    members: HashMap<String, BTreeSet<String>>,
    /// NAMES replies collected until the end-of-names numeric.
    pending_names: HashMap<String, BTreeSet<String>>,
}

fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl Session {
    /// `nickname` is the nick requested at registration.
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            ..Self::default()
        }
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Record a nickname we asked the server for.
    pub fn request_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = nickname.into();
    }

    fn is_me(&self, nick: &str) -> bool {
        nick.eq_ignore_ascii_case(&self.nickname)
    }

    /// Update state from `msg` and return the event it represents, if any.
    pub fn interpret(&mut self, msg: &Message) -> Option<IrcEvent> {
        match msg.command.as_str() {
            RPL_WELCOME => {
                if let Some(nick) = msg.param(0) {
                    self.nickname = nick.to_string();
                }
                Some(IrcEvent::Connected {
                    nickname: self.nickname.clone(),
                })
            },
            ERR_NICKNAMEINUSE => {
                let attempted = msg.param(1).unwrap_or(&self.nickname).to_string();
                Some(IrcEvent::NicknameCollision { attempted })
            },
            RPL_NAMREPLY => {
                // <me> <symbol> <channel> :<names>
                let (Some(channel), Some(names)) = (msg.param(2), msg.param(3)) else {
                    return None;
                };
                let pending = self.pending_names.entry(fold(channel)).or_default();
                for name in names.split_whitespace() {
                    let nick = name.trim_start_matches(NAMES_MODE_PREFIXES);
                    if !nick.is_empty() {
                        pending.insert(fold(nick));
                    }
                }
                None
            },
            RPL_ENDOFNAMES => {
                let channel = fold(msg.param(1)?);
                let names = self.pending_names.remove(&channel).unwrap_or_default();
                if self.members.contains_key(&channel) {
                    trace!(%channel, count = names.len(), "names refreshed");
                    self.members.insert(channel, names);
                }
                None
            },
            "JOIN" => {
                let sender = msg.source_nick()?.to_string();
                let channel = msg.param(0)?.to_string();
                let key = fold(&channel);
                if self.is_me(&sender) {
                    self.members.insert(key.clone(), BTreeSet::new());
                }
                let set = self.members.entry(key).or_default();
                set.insert(fold(&sender));
                let members = set.len();
                Some(IrcEvent::UserJoined {
                    sender,
                    channel,
                    members,
                })
            },
            "PART" => {
                let sender = msg.source_nick()?;
                let channel = msg.param(0)?;
                self.leave(channel, sender);
                None
            },
            "KICK" => {
                let channel = msg.param(0)?;
                let target = msg.param(1)?;
                self.leave(channel, target);
                None
            },
            "QUIT" => {
                let sender = fold(msg.source_nick()?);
                for set in self.members.values_mut() {
                    set.remove(&sender);
                }
                None
            },
            "NICK" => {
                let old = msg.source_nick()?;
                let new = msg.param(0)?.to_string();
                let (old_folded, new_folded) = (fold(old), fold(&new));
                for set in self.members.values_mut() {
                    if set.remove(&old_folded) {
                        set.insert(new_folded.clone());
                    }
                }
                if self.is_me(old) {
                    debug!(old, %new, "own nickname changed");
                    self.nickname = new.clone();
                    return Some(IrcEvent::NicknameChanged { nickname: new });
                }
                None
            },
            "PRIVMSG" => {
                let sender = msg.source_nick()?.to_string();
                let target = msg.param(0)?;
                let text = msg.param(1)?;
                // CTCP requests (ACTION, VERSION, ...) are not commands.
                if text.starts_with('\x01') {
                    return None;
                }
                if is_channel(target) {
                    Some(IrcEvent::PublicMessage {
                        sender,
                        channel: target.to_string(),
                        text: text.to_string(),
                    })
                } else if self.is_me(target) {
                    Some(IrcEvent::PrivateMessage {
                        sender,
                        text: text.to_string(),
                    })
                } else {
                    None
                }
            },
            _ => None,
        }
    }

    fn leave(&mut self, channel: &str, nick: &str) {
        let key = fold(channel);
        if self.is_me(nick) {
            self.members.remove(&key);
            self.pending_names.remove(&key);
        } else if let Some(set) = self.members.get_mut(&key) {
            set.remove(&fold(nick));
        }
    }
}
