//! The bot's event loop.
//!
//! One task consumes inbound events in arrival order. Every event is fully
//! handled (registry change, save, outbound queueing) before the next one
//! is looked at, so the registry needs no lock.

use std::{future::Future, sync::Arc, time::Duration};

use {
    bootstrapbot_irc::{Connection, IrcEvent, IrcOutbound, Session},
    bootstrapbot_registry::{ChannelRegistry, RegistryStore},
    tracing::{debug, error, info, warn},
};

use crate::{
    action::Action,
    error::{Error, Result},
    invite::InviteScheduler,
    notices,
    router::{CommandRouter, Dispatch, Source},
};

const QUIT_MESSAGE: &str = "bootstrapbot shutting down";

/// Runtime knobs for the agent.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    /// Nick requested at registration.
    pub nickname: String,
    /// Nickname-in-use replies tolerated before giving up.
    pub max_nick_attempts: u32,
    pub invite_delay: Duration,
    /// Invited ahead of the registrants on every mass invite.
    pub extra_invitees: Vec<String>,
    /// Managed channels to rejoin once connected.
    pub autojoin: Vec<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            nickname: "bootstrapbot".into(),
            max_nick_attempts: 5,
            invite_delay: Duration::from_secs(1),
            extra_invitees: Vec::new(),
            autojoin: Vec::new(),
        }
    }
}

/// Load the registry and apply a controller set on the command line.
///
/// Corrupt registry files fail here, before any connection is made.
pub async fn prepare_registry(
    store: &dyn RegistryStore,
    controller: Option<&str>,
) -> Result<ChannelRegistry> {
    let mut registry = store.load().await?;
    if let Some(nick) = controller.map(str::trim).filter(|n| !n.is_empty())
        && registry.controller() != Some(nick)
    {
        info!(
            controller = nick,
            previous = ?registry.controller(),
            "setting bot controller"
        );
        registry.set_controller(nick);
        store.save(&registry).await?;
    }
    if registry.controller().is_none() {
        warn!("no bot controller configured, private commands are disabled");
    }
    info!(channels = registry.len(), "registry loaded");
    Ok(registry)
}

pub struct AgentController {
    registry: ChannelRegistry,
    store: Arc<dyn RegistryStore>,
    outbound: Arc<dyn IrcOutbound>,
    router: CommandRouter,
    invites: InviteScheduler,
    settings: AgentSettings,
    /// Current nick, or the one last requested while registering.
    nickname: String,
    nick_attempts: u32,
}

impl AgentController {
    pub fn new(
        registry: ChannelRegistry,
        store: Arc<dyn RegistryStore>,
        outbound: Arc<dyn IrcOutbound>,
        settings: AgentSettings,
    ) -> Self {
        let invites = InviteScheduler::new(Arc::clone(&outbound), settings.invite_delay);
        Self {
            registry,
            store,
            outbound,
            router: CommandRouter::new(),
            invites,
            nickname: settings.nickname.clone(),
            nick_attempts: 0,
            settings,
        }
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// Consume inbound traffic until `shutdown` resolves or the server goes
    /// away, then save the registry and quit.
    pub async fn run(
        mut self,
        mut connection: Connection,
        mut session: Session,
        shutdown: impl Future<Output = ()>,
    ) -> Result<()> {
        tokio::pin!(shutdown);
        let result = loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break Ok(());
                },
                message = connection.recv() => {
                    let Some(message) = message else {
                        break Err(Error::ConnectionClosed);
                    };
                    let Some(event) = session.interpret(&message) else {
                        continue;
                    };
                    if let Err(e) = self.handle_event(event).await {
                        if e.is_fatal() {
                            break Err(e);
                        }
                        error!(error = %e, "failed to handle irc event");
                    }
                    if session.nickname() != self.nickname {
                        session.request_nickname(self.nickname.clone());
                    }
                },
            }
        };
        self.shutdown().await;
        result
    }

    /// React to one inbound event.
    ///
    /// Command failures are answered to the sender and never returned. A
    /// returned error is either a failed save or a fatal transport
    /// condition. After a failed save the registry is back to its state
    /// before the event and none of the event's outbound work was done.
    pub async fn handle_event(&mut self, event: IrcEvent) -> Result<()> {
        match event {
            IrcEvent::Connected { nickname } => self.on_connected(nickname).await,
            IrcEvent::NicknameCollision { attempted } => self.on_collision(attempted).await,
            IrcEvent::NicknameChanged { nickname } => {
                info!(%nickname, "nickname changed");
                self.nickname = nickname;
                Ok(())
            },
            IrcEvent::PrivateMessage { sender, text } => {
                let before = self.registry.clone();
                let dispatch = self.router.route(
                    &mut self.registry,
                    &self.nickname,
                    Source::Private { sender: &sender },
                    &text,
                );
                self.apply(&sender, dispatch, before).await
            },
            IrcEvent::PublicMessage {
                sender,
                channel,
                text,
            } => {
                let before = self.registry.clone();
                let dispatch = self.router.route(
                    &mut self.registry,
                    &self.nickname,
                    Source::Public {
                        sender: &sender,
                        channel: &channel,
                    },
                    &text,
                );
                self.apply(&sender, dispatch, before).await
            },
            IrcEvent::UserJoined {
                sender,
                channel,
                members,
            } => self.on_join(&sender, &channel, members).await,
        }
    }

    /// Let queued invites finish. Used when the caller wants every scheduled
    /// batch on the wire before moving on.
    pub async fn finish_invites(&mut self) {
        self.invites.finish().await;
    }

    /// Save the registry, drop pending invites and send QUIT.
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.store.save(&self.registry).await {
            error!(error = %e, "failed to save registry on shutdown");
        }
        self.invites.abort().await;
        if let Err(e) = self.outbound.quit(QUIT_MESSAGE).await {
            debug!(error = %e, "could not send QUIT");
        }
        info!("bot stopped");
    }

    async fn on_connected(&mut self, nickname: String) -> Result<()> {
        info!(%nickname, "registered with irc server");
        self.nickname = nickname;
        self.nick_attempts = 0;

        for channel in &self.settings.autojoin {
            let Some(registrar) = self.registry.get(channel) else {
                warn!(%channel, "not rejoining unmanaged channel");
                continue;
            };
            let channel = registrar.channel();
            self.outbound.join(channel).await?;
            self.outbound.names(channel).await?;
            debug!(%channel, "rejoined managed channel");
        }
        Ok(())
    }

    async fn on_collision(&mut self, attempted: String) -> Result<()> {
        if self.nick_attempts >= self.settings.max_nick_attempts {
            return Err(Error::NicknameExhausted {
                attempts: self.nick_attempts,
                last: attempted,
            });
        }
        self.nick_attempts += 1;
        let next = format!("{attempted}_");
        warn!(
            %attempted,
            %next,
            attempt = self.nick_attempts,
            "nickname in use, retrying"
        );
        self.outbound.nick(&next).await?;
        self.nickname = next;
        Ok(())
    }

    async fn on_join(&mut self, sender: &str, channel: &str, members: usize) -> Result<()> {
        if sender.eq_ignore_ascii_case(&self.nickname) {
            info!(%channel, "joined channel");
            return Ok(());
        }
        let Some(registrar) = self.registry.get(channel) else {
            debug!(%channel, %sender, "join in unmanaged channel");
            return Ok(());
        };

        if registrar.should_part(members) {
            info!(
                %channel,
                members,
                part_threshold = registrar.part_threshold(),
                "channel is self-sustaining, leaving"
            );
            self.outbound.part(registrar.channel()).await?;
            return Ok(());
        }

        debug!(%channel, %sender, members, "welcoming new user");
        for line in notices::welcome(registrar.channel(), registrar.invite_threshold()) {
            self.outbound.notice(sender, &line).await?;
        }
        Ok(())
    }

    /// Save if the registry changed, then perform the outbound actions.
    ///
    /// `before` is the registry as it was ahead of the command; it is put
    /// back when the save fails so memory never runs ahead of disk.
    async fn apply(
        &mut self,
        sender: &str,
        dispatch: Dispatch,
        before: ChannelRegistry,
    ) -> Result<()> {
        match dispatch {
            Dispatch::Handled { command, outcome } => {
                debug!(command, %sender, actions = outcome.actions.len(), "command handled");
                if outcome.persist
                    && let Err(e) = self.store.save(&self.registry).await
                {
                    error!(command, %sender, error = %e, "failed to save registry, command undone");
                    self.registry = before;
                    return Err(e.into());
                }
                for action in outcome.actions {
                    self.perform(action).await?;
                }
                Ok(())
            },
            Dispatch::Failed { command, error } => {
                for line in error.reply_lines() {
                    self.outbound.notice(sender, &line).await?;
                }
                debug!(command, %sender, %error, "command failure reported");
                Ok(())
            },
            Dispatch::Ignored(reason) => {
                debug!(%sender, %reason, "message ignored");
                Ok(())
            },
        }
    }

    async fn perform(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Join(channel) => {
                info!(%channel, "joining channel");
                self.outbound.join(&channel).await?;
            },
            Action::Part(channel) => {
                info!(%channel, "leaving channel");
                self.outbound.part(&channel).await?;
            },
            Action::Names(channel) => self.outbound.names(&channel).await?,
            Action::Notice { target, text } => self.outbound.notice(&target, &text).await?,
            Action::Privmsg { target, text } => self.outbound.privmsg(&target, &text).await?,
            Action::MassInvite {
                channel,
                recipients,
            } => {
                let mut batch: Vec<String> = self
                    .settings
                    .extra_invitees
                    .iter()
                    .filter(|extra| !recipients.iter().any(|r| r.eq_ignore_ascii_case(extra)))
                    .cloned()
                    .collect();
                batch.extend(recipients);
                info!(%channel, count = batch.len(), "invite threshold reached");
                self.invites.schedule(&channel, batch);
            },
        }
        Ok(())
    }
}
