//! Channel bootstrap agent.
//!
//! Routes IRC commands to registry operations, persists every change, and
//! drives the outbound side: joins, parts, notices and paced mass invites.

pub mod action;
pub mod controller;
pub mod error;
pub mod invite;
pub mod notices;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;

pub use {
    action::Action,
    controller::{AgentController, AgentSettings, prepare_registry},
    error::{CommandError, Error, Result},
    invite::InviteScheduler,
    router::{CommandRouter, Dispatch, Ignored, Outcome, Source},
};
