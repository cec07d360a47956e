/// Inbound events the bot reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrcEvent {
    /// Registration finished; the server accepted `nickname`.
    Connected { nickname: String },
    /// The server rejected `attempted` because it is taken.
    NicknameCollision { attempted: String },
    /// Our own nickname changed after registration.
    NicknameChanged { nickname: String },
    /// A message addressed to the bot directly.
    PrivateMessage { sender: String, text: String },
    /// A message sent to a channel the bot is in.
    PublicMessage {
        sender: String,
        channel: String,
        text: String,
    },
    /// `sender` joined `channel`, which now has `members` users (the bot
    /// included).
    UserJoined {
        sender: String,
        channel: String,
        members: usize,
    },
}
