use thiserror::Error;

use crate::notices;

/// Why a recognized command could not be carried out. Reported back to the
/// sender; never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("invalid arguments for {command}")]
    InvalidArguments {
        command: &'static str,
        usage: &'static [&'static str],
    },

    #[error("sender is already registered")]
    DuplicateRegistration,

    #[error("channel {channel} is not managed")]
    UnmanagedChannel { channel: String },
}

impl CommandError {
    #[must_use]
    pub fn invalid_arguments(command: &'static str, usage: &'static [&'static str]) -> Self {
        Self::InvalidArguments { command, usage }
    }

    #[must_use]
    pub fn unmanaged(channel: impl Into<String>) -> Self {
        Self::UnmanagedChannel {
            channel: channel.into(),
        }
    }

    /// Notice lines explaining the failure to the sender.
    pub fn reply_lines(&self) -> Vec<String> {
        match self {
            Self::InvalidArguments { usage, .. } => usage.iter().map(ToString::to_string).collect(),
            Self::DuplicateRegistration => vec![notices::ALREADY_REGISTERED.to_string()],
            Self::UnmanagedChannel { channel } => vec![notices::unmanaged(channel)],
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] bootstrapbot_registry::Error),

    #[error(transparent)]
    Irc(#[from] bootstrapbot_irc::Error),

    #[error("no free nickname after {attempts} attempts (last tried {last})")]
    NicknameExhausted { attempts: u32, last: String },

    #[error("irc connection closed by server")]
    ConnectionClosed,
}

impl Error {
    /// Whether the session cannot continue after this error.
    ///
    /// A failed registry save only fails the event that caused it.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Registry(e) => e.is_fatal(),
            Self::Irc(_) | Self::NicknameExhausted { .. } | Self::ConnectionClosed => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
