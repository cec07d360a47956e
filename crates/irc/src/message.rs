//! IRC line parsing and formatting (RFC 1459 framing, IRCv3 tags skipped).

use std::fmt;

use crate::{Error, Result};

/// Origin of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    /// `irc.example.net`
    Server(String),
    /// `nick!user@host`; user and host are optional.
    User {
        nick: String,
        user: Option<String>,
        host: Option<String>,
    },
}

impl Prefix {
    fn parse(raw: &str) -> Self {
        let (nick_user, host) = match raw.split_once('@') {
            Some((left, host)) => (left, Some(host.to_string())),
            None => (raw, None),
        };
        let (nick, user) = match nick_user.split_once('!') {
            Some((nick, user)) => (nick, Some(user.to_string())),
            None => (nick_user, None),
        };
        if user.is_none() && host.is_none() && nick.contains('.') {
            return Self::Server(raw.to_string());
        }
        Self::User {
            nick: nick.to_string(),
            user,
            host,
        }
    }

    /// Nickname of a user prefix.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Self::User { nick, .. } => Some(nick),
            Self::Server(_) => None,
        }
    }
}

/// A single protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub prefix: Option<Prefix>,
    /// Upper-cased command or three-digit numeric.
    pub command: String,
    pub params: Vec<String>,
}

impl Message {
    pub fn new(command: &str, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefix: None,
            command: command.to_ascii_uppercase(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse one line without its trailing CRLF.
    pub fn parse(line: &str) -> Result<Self> {
        let mut rest = line.trim_end_matches(['\r', '\n']);

        if rest.starts_with('@') {
            rest = rest
                .split_once(' ')
                .map(|(_, r)| r)
                .ok_or_else(|| Error::parse(line))?;
        }
        rest = rest.trim_start_matches(' ');

        let prefix = if let Some(stripped) = rest.strip_prefix(':') {
            let (raw, r) = stripped.split_once(' ').ok_or_else(|| Error::parse(line))?;
            rest = r.trim_start_matches(' ');
            Some(Prefix::parse(raw))
        } else {
            None
        };

        let (command, mut rest) = match rest.split_once(' ') {
            Some((command, r)) => (command, r),
            None => (rest, ""),
        };
        if command.is_empty() {
            return Err(Error::parse(line));
        }

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing.to_string());
                break;
            }
            match rest.split_once(' ') {
                Some((param, r)) => {
                    params.push(param.to_string());
                    rest = r;
                },
                None => {
                    params.push(rest.to_string());
                    break;
                },
            }
        }

        Ok(Self {
            prefix,
            command: command.to_ascii_uppercase(),
            params,
        })
    }

    /// Nickname of the sender, when the message came from a user.
    pub fn source_nick(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nick)
    }

    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    pub fn join(channel: &str) -> Self {
        Self::new("JOIN", [channel])
    }

    pub fn part(channel: &str) -> Self {
        Self::new("PART", [channel])
    }

    pub fn notice(target: &str, text: &str) -> Self {
        Self::new("NOTICE", [target, text])
    }

    pub fn privmsg(target: &str, text: &str) -> Self {
        Self::new("PRIVMSG", [target, text])
    }

    pub fn invite(nick: &str, channel: &str) -> Self {
        Self::new("INVITE", [nick, channel])
    }

    pub fn names(channel: &str) -> Self {
        Self::new("NAMES", [channel])
    }

    pub fn nick(nickname: &str) -> Self {
        Self::new("NICK", [nickname])
    }

    pub fn user(username: &str, realname: &str) -> Self {
        Self::new("USER", [username, "0", "*", realname])
    }

    pub fn pass(password: &str) -> Self {
        Self::new("PASS", [password])
    }

    pub fn pong(token: &str) -> Self {
        Self::new("PONG", [token])
    }

    pub fn quit(reason: &str) -> Self {
        Self::new("QUIT", [reason])
    }
}

/// Formats the message as a protocol line without CRLF. Line breaks inside
/// parameters are replaced by spaces so a parameter can never smuggle a
/// second command onto the wire.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            match prefix {
                Prefix::Server(server) => write!(f, ":{server} ")?,
                Prefix::User { nick, user, host } => {
                    write!(f, ":{nick}")?;
                    if let Some(user) = user {
                        write!(f, "!{user}")?;
                    }
                    if let Some(host) = host {
                        write!(f, "@{host}")?;
                    }
                    f.write_str(" ")?;
                },
            }
        }
        f.write_str(&self.command)?;
        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            let clean: String = param
                .chars()
                .map(|c| if matches!(c, '\r' | '\n' | '\0') { ' ' } else { c })
                .collect();
            if i == last && (clean.is_empty() || clean.contains(' ') || clean.starts_with(':')) {
                write!(f, " :{clean}")?;
            } else {
                write!(f, " {clean}")?;
            }
        }
        Ok(())
    }
}
