//! Minimal IRC client plumbing for bootstrapbot.
//!
//! Parses and formats protocol lines, turns inbound traffic into
//! [`IrcEvent`]s while tracking channel membership, and sends outbound
//! commands through the [`IrcOutbound`] trait.

pub mod channel;
pub mod client;
pub mod error;
pub mod event;
pub mod message;
pub mod outbound;
pub mod session;

pub use {
    channel::is_channel,
    client::{Connection, ConnectOptions, connect},
    error::{Error, Result},
    event::IrcEvent,
    message::{Message, Prefix},
    outbound::{IrcOutbound, IrcSender},
    session::Session,
};
