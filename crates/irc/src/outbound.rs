use {async_trait::async_trait, tokio::sync::mpsc, tracing::trace};

use crate::{Error, Result, message::Message};

/// Send commands to the IRC server.
///
/// Implementors only provide [`IrcOutbound::send`]; the named operations
/// build the matching protocol message.
#[async_trait]
pub trait IrcOutbound: Send + Sync {
    async fn send(&self, message: Message) -> Result<()>;

    async fn join(&self, channel: &str) -> Result<()> {
        self.send(Message::join(channel)).await
    }

    async fn part(&self, channel: &str) -> Result<()> {
        self.send(Message::part(channel)).await
    }

    async fn notice(&self, target: &str, text: &str) -> Result<()> {
        self.send(Message::notice(target, text)).await
    }

    async fn privmsg(&self, target: &str, text: &str) -> Result<()> {
        self.send(Message::privmsg(target, text)).await
    }

    async fn invite(&self, nick: &str, channel: &str) -> Result<()> {
        self.send(Message::invite(nick, channel)).await
    }

    /// Ask the server for a fresh member list.
    async fn names(&self, channel: &str) -> Result<()> {
        self.send(Message::names(channel)).await
    }

    async fn nick(&self, nickname: &str) -> Result<()> {
        self.send(Message::nick(nickname)).await
    }

    async fn quit(&self, reason: &str) -> Result<()> {
        self.send(Message::quit(reason)).await
    }
}

/// Queue-backed sender feeding the connection's writer task.
///
/// Messages are written in the order they were queued.
#[derive(Clone)]
pub struct IrcSender {
    tx: mpsc::UnboundedSender<Message>,
}

impl IrcSender {
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl IrcOutbound for IrcSender {
    async fn send(&self, message: Message) -> Result<()> {
        trace!(command = %message.command, "queueing outbound message");
        self.tx.send(message).map_err(|_| Error::Closed)
    }
}
