/// Outbound work produced by a command handler.
///
/// Handlers only mutate the registry and describe what should happen on the
/// wire; the controller persists first and then performs these in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Join(String),
    Part(String),
    /// Refresh the member list of a channel.
    Names(String),
    Notice {
        target: String,
        text: String,
    },
    Privmsg {
        target: String,
        text: String,
    },
    /// Invite `recipients`, in order, to `channel`.
    MassInvite {
        channel: String,
        recipients: Vec<String>,
    },
}

impl Action {
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Notice {
            target: target.into(),
            text: text.into(),
        }
    }

    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Privmsg {
            target: target.into(),
            text: text.into(),
        }
    }
}
