#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use {
    async_trait::async_trait,
    bootstrapbot_irc::{Error, IrcOutbound, Message, Result},
};

/// Outbound that records every message as a protocol line.
#[derive(Default)]
pub struct RecordingOutbound {
    sent: Mutex<Vec<Message>>,
    closed: AtomicBool,
}

impl RecordingOutbound {
    pub fn lines(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Make every following send fail as if the connection dropped.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl IrcOutbound for RecordingOutbound {
    async fn send(&self, message: Message) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::Closed);
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
