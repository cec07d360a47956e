//! Paced mass invites.
//!
//! Each channel gets its own worker task that drains batches in the order
//! they were scheduled, so two invite batches for one channel never
//! interleave. Batches for different channels run independently. Scheduling
//! never blocks the caller.

use std::{collections::HashMap, sync::Arc, time::Duration};

use {
    bootstrapbot_irc::{Error as IrcError, IrcOutbound},
    tokio::{sync::mpsc, task::JoinHandle},
    tokio_util::sync::CancellationToken,
    tracing::{debug, info, warn},
};

struct Worker {
    tx: mpsc::UnboundedSender<Vec<String>>,
    handle: JoinHandle<()>,
}

pub struct InviteScheduler {
    outbound: Arc<dyn IrcOutbound>,
    delay: Duration,
    /// Keyed by lower-cased channel name.
    workers: HashMap<String, Worker>,
    cancel: CancellationToken,
}

impl InviteScheduler {
    /// `delay` is the pause between two consecutive invites on one channel.
    pub fn new(outbound: Arc<dyn IrcOutbound>, delay: Duration) -> Self {
        Self {
            outbound,
            delay,
            workers: HashMap::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Queue one invite per recipient, in order, behind any batch already
    /// queued for `channel`.
    pub fn schedule(&mut self, channel: &str, recipients: Vec<String>) {
        if recipients.is_empty() {
            return;
        }
        let key = channel.to_ascii_lowercase();
        let count = recipients.len();

        let recipients = match self.workers.get(&key) {
            Some(worker) if !worker.handle.is_finished() => match worker.tx.send(recipients) {
                Ok(()) => {
                    info!(channel, count, "mass invite queued");
                    return;
                },
                Err(mpsc::error::SendError(recipients)) => recipients,
            },
            _ => recipients,
        };

        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver is alive, so the first batch cannot be rejected.
        let _ = tx.send(recipients);
        let handle = tokio::spawn(run_worker(
            Arc::clone(&self.outbound),
            channel.to_string(),
            self.delay,
            rx,
            self.cancel.clone(),
        ));
        self.workers.insert(key, Worker { tx, handle });
        info!(channel, count, "mass invite started");
    }

    /// Let queued invites run to completion, then stop every worker.
    pub async fn finish(&mut self) {
        for (channel, worker) in self.workers.drain() {
            drop(worker.tx);
            if let Err(e) = worker.handle.await {
                warn!(%channel, error = %e, "invite worker failed");
            }
        }
    }

    /// Stop every worker, dropping invites that were not sent yet.
    pub async fn abort(&mut self) {
        self.cancel.cancel();
        self.finish().await;
    }
}

impl Drop for InviteScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_worker(
    outbound: Arc<dyn IrcOutbound>,
    channel: String,
    delay: Duration,
    mut batches: mpsc::UnboundedReceiver<Vec<String>>,
    cancel: CancellationToken,
) {
    let mut first = true;
    'batches: while let Some(recipients) = tokio::select! {
        batch = batches.recv() => batch,
        _ = cancel.cancelled() => None,
    } {
        let total = recipients.len();
        for (sent, nick) in recipients.iter().enumerate() {
            if !first && !delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {},
                    _ = cancel.cancelled() => {
                        info!(%channel, dropped = total - sent, "mass invite cancelled");
                        break 'batches;
                    },
                }
            }
            first = false;
            match outbound.invite(nick, &channel).await {
                Ok(()) => debug!(%channel, nick = %nick, "invited"),
                Err(IrcError::Closed) => {
                    warn!(%channel, dropped = total - sent, "connection closed during mass invite");
                    break 'batches;
                },
                Err(e) => warn!(%channel, nick = %nick, error = %e, "invite failed"),
            }
        }
        info!(%channel, count = total, "mass invite finished");
    }
    debug!(%channel, "invite worker stopped");
}
