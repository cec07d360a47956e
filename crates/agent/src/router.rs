//! Command dispatch.
//!
//! Two fixed tables map a command token to its handler: one for private
//! messages from the controller, one for public channel messages. Input can
//! only ever select an entry from these tables. The router keeps no state
//! between calls; handlers mutate the registry they are given and describe
//! the outbound work as [`Action`]s.

use std::{collections::HashMap, fmt};

use {
    bootstrapbot_irc::is_channel,
    bootstrapbot_registry::{ChannelRegistry, RegisterOutcome, Registrar},
    tracing::debug,
};

use crate::{action::Action, error::CommandError, notices};

/// Where a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Private { sender: &'a str },
    Public { sender: &'a str, channel: &'a str },
}

/// What a handler produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub actions: Vec<Action>,
    /// The registry changed and must be saved before `actions` run.
    pub persist: bool,
}

impl Outcome {
    fn actions(actions: Vec<Action>) -> Self {
        Self {
            actions,
            persist: false,
        }
    }

    fn persisted(actions: Vec<Action>) -> Self {
        Self {
            actions,
            persist: true,
        }
    }

    fn notices(target: &str, lines: impl IntoIterator<Item = String>) -> Self {
        Self::actions(
            lines
                .into_iter()
                .map(|line| Action::notice(target, line))
                .collect(),
        )
    }
}

/// Why a message was dropped without a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    Empty,
    UnauthorizedSender,
    UnknownCommand,
    UnmanagedChannel,
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty message"),
            Self::UnauthorizedSender => write!(f, "unauthorized sender"),
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::UnmanagedChannel => write!(f, "unmanaged channel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Handled {
        command: &'static str,
        outcome: Outcome,
    },
    Failed {
        command: &'static str,
        error: CommandError,
    },
    Ignored(Ignored),
}

/// Everything a handler may touch.
pub struct CommandContext<'a> {
    registry: &'a mut ChannelRegistry,
    sender: &'a str,
    /// Set for public commands.
    channel: Option<&'a str>,
    /// Tokens after the command word.
    args: &'a [&'a str],
}

impl CommandContext<'_> {
    fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).copied()
    }

    fn registrar_mut(&mut self) -> Result<&mut Registrar, CommandError> {
        let channel = self.channel.unwrap_or_default();
        self.registry
            .get_mut(channel)
            .ok_or_else(|| CommandError::unmanaged(channel))
    }
}

type Handler = fn(&mut CommandContext<'_>) -> Result<Outcome, CommandError>;

struct CommandSpec {
    name: &'static str,
    usage: &'static str,
    summary: &'static str,
    handler: Handler,
}

const PRIVATE_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "join",
        usage: "join <channel> <invite_threshold> <part_threshold>",
        summary: "start managing a channel (thresholds optional when already managed)",
        handler: join,
    },
    CommandSpec {
        name: "part",
        usage: "part <channel>",
        summary: "leave a channel, keeping its registrations",
        handler: part,
    },
    CommandSpec {
        name: "clear",
        usage: "clear <channel>",
        summary: "empty a channel's registration list",
        handler: clear,
    },
    CommandSpec {
        name: "forget",
        usage: "forget <channel>",
        summary: "leave a channel and drop everything stored for it",
        handler: forget,
    },
    CommandSpec {
        name: "channels",
        usage: "channels",
        summary: "list managed channels",
        handler: channels,
    },
    CommandSpec {
        name: "test",
        usage: "test",
        summary: "check that the bot is listening",
        handler: test,
    },
    CommandSpec {
        name: "help",
        usage: "help",
        summary: "show this listing",
        handler: private_help,
    },
];

const PUBLIC_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "register",
        usage: "register",
        summary: "ask to be invited back once enough people are interested",
        handler: register,
    },
    CommandSpec {
        name: "list",
        usage: "list",
        summary: "show who has registered so far",
        handler: list,
    },
    CommandSpec {
        name: "help",
        usage: "help",
        summary: "show this listing",
        handler: public_help,
    },
];

pub struct CommandRouter {
    private: HashMap<&'static str, &'static CommandSpec>,
    public: HashMap<&'static str, &'static CommandSpec>,
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRouter {
    pub fn new() -> Self {
        Self {
            private: PRIVATE_COMMANDS.iter().map(|c| (c.name, c)).collect(),
            public: PUBLIC_COMMANDS.iter().map(|c| (c.name, c)).collect(),
        }
    }

    /// Resolve `text` from `source` and run the matching handler.
    ///
    /// `nickname` is the bot's current nick, used to recognise
    /// `bootstrapbot: register` style addressing in channels.
    pub fn route(
        &self,
        registry: &mut ChannelRegistry,
        nickname: &str,
        source: Source<'_>,
        text: &str,
    ) -> Dispatch {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let Some(first) = tokens.first().copied() else {
            return Dispatch::Ignored(Ignored::Empty);
        };

        match source {
            Source::Private { sender } => {
                if !registry.is_controller(sender) {
                    debug!(sender, "ignoring private message from non-controller");
                    return Dispatch::Ignored(Ignored::UnauthorizedSender);
                }
                let Some(spec) = lookup(&self.private, first) else {
                    debug!(sender, command = first, "unknown private command");
                    return Dispatch::Ignored(Ignored::UnknownCommand);
                };
                run(spec, CommandContext {
                    registry,
                    sender,
                    channel: None,
                    args: &tokens[1..],
                })
            },
            Source::Public { sender, channel } => {
                if !registry.contains(channel) {
                    return Dispatch::Ignored(Ignored::UnmanagedChannel);
                }
                let (spec, args) = if let Some(spec) = lookup(&self.public, first) {
                    (spec, &tokens[1..])
                } else if tokens.len() >= 2
                    && is_mention(first, nickname)
                    && let Some(spec) = lookup(&self.public, tokens[1])
                {
                    (spec, &tokens[2..])
                } else {
                    return Dispatch::Ignored(Ignored::UnknownCommand);
                };
                run(spec, CommandContext {
                    registry,
                    sender,
                    channel: Some(channel),
                    args,
                })
            },
        }
    }
}

fn lookup(
    table: &HashMap<&'static str, &'static CommandSpec>,
    token: &str,
) -> Option<&'static CommandSpec> {
    table.get(token.to_ascii_lowercase().as_str()).copied()
}

/// `bot:`, `bot,` or `bot` addressing the bot by nick.
fn is_mention(token: &str, nickname: &str) -> bool {
    let name = token.trim_matches(':').trim_end_matches(',');
    !nickname.is_empty() && name.eq_ignore_ascii_case(nickname)
}

fn run(spec: &'static CommandSpec, mut ctx: CommandContext<'_>) -> Dispatch {
    match (spec.handler)(&mut ctx) {
        Ok(outcome) => Dispatch::Handled {
            command: spec.name,
            outcome,
        },
        Err(error) => {
            debug!(command = spec.name, sender = ctx.sender, %error, "command rejected");
            Dispatch::Failed {
                command: spec.name,
                error,
            }
        },
    }
}

fn channel_arg<'a>(
    ctx: &'a CommandContext<'_>,
    command: &'static str,
    usage: &'static [&'static str],
) -> Result<&'a str, CommandError> {
    ctx.arg(0)
        .filter(|c| is_channel(c))
        .ok_or_else(|| CommandError::invalid_arguments(command, usage))
}

// ── Private handlers ────────────────────────────────────────────────────────

fn join(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let channel = channel_arg(ctx, "join", notices::JOIN_USAGE)?.to_string();
    let refresh = vec![Action::Join(channel.clone()), Action::Names(channel.clone())];

    if ctx.registry.contains(&channel) {
        debug!(%channel, "rejoining managed channel with stored thresholds");
        return Ok(Outcome::actions(refresh));
    }

    let parse = |i: usize| ctx.arg(i).and_then(|v| v.parse::<i64>().ok());
    let (Some(invite_threshold), Some(part_threshold)) = (parse(1), parse(2)) else {
        // The channel is joined anyway; it just stays unmanaged.
        let mut actions = refresh;
        actions.extend(
            notices::JOIN_USAGE
                .iter()
                .map(|line| Action::notice(ctx.sender, *line)),
        );
        return Ok(Outcome::actions(actions));
    };

    ctx.registry
        .insert(Registrar::new(&channel, invite_threshold, part_threshold));
    Ok(Outcome::persisted(refresh))
}

fn part(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let channel = channel_arg(ctx, "part", notices::PART_USAGE)?;
    Ok(Outcome::actions(vec![Action::Part(channel.to_string())]))
}

fn clear(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let channel = ctx
        .arg(0)
        .ok_or_else(|| CommandError::invalid_arguments("clear", notices::CLEAR_USAGE))?
        .to_string();
    let registrar = ctx
        .registry
        .get_mut(&channel)
        .ok_or_else(|| CommandError::unmanaged(&channel))?;
    let changed = !registrar.is_empty();
    registrar.clear();
    Ok(Outcome {
        actions: Vec::new(),
        persist: changed,
    })
}

fn forget(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let channel = ctx
        .arg(0)
        .ok_or_else(|| CommandError::invalid_arguments("forget", notices::FORGET_USAGE))?
        .to_string();
    let removed = ctx
        .registry
        .remove(&channel)
        .ok_or_else(|| CommandError::unmanaged(&channel))?;
    Ok(Outcome::persisted(vec![
        Action::Part(removed.channel().to_string()),
        Action::notice(ctx.sender, notices::forgotten(removed.channel())),
    ]))
}

fn channels(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let mut lines: Vec<String> = ctx
        .registry
        .channels()
        .map(|r| {
            notices::channel_summary(
                r.channel(),
                r.len(),
                r.invite_threshold(),
                r.part_threshold(),
            )
        })
        .collect();
    if lines.is_empty() {
        lines.push(notices::NO_CHANNELS.to_string());
    }
    Ok(Outcome::notices(ctx.sender, lines))
}

fn test(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    Ok(Outcome::actions(vec![Action::privmsg(
        ctx.sender,
        notices::TEST_REPLY,
    )]))
}

fn private_help(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    Ok(Outcome::notices(ctx.sender, help_lines(PRIVATE_COMMANDS)))
}

// ── Public handlers ─────────────────────────────────────────────────────────

fn register(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let sender = ctx.sender;
    let registrar = ctx.registrar_mut()?;
    if registrar.register(sender) == RegisterOutcome::AlreadyRegistered {
        return Err(CommandError::DuplicateRegistration);
    }
    if !registrar.threshold_exceeded() {
        return Ok(Outcome::persisted(Vec::new()));
    }
    let channel = registrar.channel().to_string();
    let recipients = registrar.take_registrants();
    Ok(Outcome::persisted(vec![Action::MassInvite {
        channel,
        recipients,
    }]))
}

fn list(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let sender = ctx.sender;
    let registrar = ctx.registrar_mut()?;
    let mut lines = vec![notices::list_header(
        registrar.len(),
        registrar.invite_threshold(),
        registrar.channel(),
    )];
    lines.extend(registrar.list().iter().cloned());
    Ok(Outcome::notices(sender, lines))
}

fn public_help(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    Ok(Outcome::notices(ctx.sender, help_lines(PUBLIC_COMMANDS)))
}

fn help_lines(table: &[CommandSpec]) -> Vec<String> {
    table
        .iter()
        .map(|c| format!("{}: {}", c.usage, c.summary))
        .collect()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "bootstrapbot";

    fn registry() -> ChannelRegistry {
        let mut registry = ChannelRegistry::new();
        registry.set_controller("alice");
        registry
    }

    fn private(router: &CommandRouter, registry: &mut ChannelRegistry, text: &str) -> Dispatch {
        router.route(registry, BOT, Source::Private { sender: "alice" }, text)
    }

    fn public(
        router: &CommandRouter,
        registry: &mut ChannelRegistry,
        sender: &str,
        text: &str,
    ) -> Dispatch {
        router.route(
            registry,
            BOT,
            Source::Public {
                sender,
                channel: "#test",
            },
            text,
        )
    }

    fn handled(dispatch: Dispatch) -> Outcome {
        match dispatch {
            Dispatch::Handled { outcome, .. } => outcome,
            other => panic!("expected handled dispatch, got {other:?}"),
        }
    }

    fn managed(invite_threshold: i64, part_threshold: i64) -> ChannelRegistry {
        let mut registry = registry();
        registry.insert(Registrar::new("#test", invite_threshold, part_threshold));
        registry
    }

    #[test]
    fn join_creates_registrar_and_joins() {
        let router = CommandRouter::new();
        let mut registry = registry();
        let outcome = handled(private(&router, &mut registry, "join #test 15 12"));

        assert!(outcome.persist);
        assert_eq!(outcome.actions, vec![
            Action::Join("#test".into()),
            Action::Names("#test".into()),
        ]);
        let r = registry.get("#test").unwrap();
        assert_eq!((r.invite_threshold(), r.part_threshold()), (15, 12));
    }

    #[rstest::rstest]
    #[case("join")]
    #[case("join test 15 12")]
    fn join_without_a_channel_returns_usage(#[case] text: &str) {
        let router = CommandRouter::new();
        let mut registry = registry();
        let dispatch = private(&router, &mut registry, text);

        let Dispatch::Failed { command, error } = dispatch else {
            panic!("expected failure for {text:?}, got {dispatch:?}");
        };
        assert_eq!(command, "join");
        assert_eq!(error.reply_lines(), notices::JOIN_USAGE);
        assert!(registry.is_empty());
    }

    #[rstest::rstest]
    #[case("join #test")]
    #[case("join #test 15")]
    #[case("join #test many 12")]
    fn join_with_bad_thresholds_joins_but_stays_unmanaged(#[case] text: &str) {
        let router = CommandRouter::new();
        let mut registry = registry();
        let outcome = handled(private(&router, &mut registry, text));

        assert!(!outcome.persist);
        assert_eq!(outcome.actions, vec![
            Action::Join("#test".into()),
            Action::Names("#test".into()),
            Action::notice("alice", notices::JOIN_USAGE[0]),
            Action::notice("alice", notices::JOIN_USAGE[1]),
        ]);
        assert!(registry.is_empty());
    }

    #[test]
    fn join_accepts_non_positive_thresholds() {
        let router = CommandRouter::new();
        let mut registry = registry();
        let outcome = handled(private(&router, &mut registry, "join #test -1 0"));
        assert!(outcome.persist);
        let r = registry.get("#test").unwrap();
        assert_eq!((r.invite_threshold(), r.part_threshold()), (-1, 0));
        assert!(r.threshold_exceeded());
    }

    #[test]
    fn join_of_managed_channel_keeps_state() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        registry.get_mut("#test").unwrap().register("bob");

        let outcome = handled(private(&router, &mut registry, "join #test 99 99"));
        assert!(!outcome.persist);
        assert_eq!(outcome.actions[0], Action::Join("#test".into()));
        let r = registry.get("#test").unwrap();
        assert_eq!(r.invite_threshold(), 3);
        assert_eq!(r.list(), ["bob"]);

        // Thresholds may be left out entirely for a managed channel.
        assert!(!handled(private(&router, &mut registry, "join #test")).persist);
    }

    #[test]
    fn non_controller_is_ignored() {
        let router = CommandRouter::new();
        let mut registry = registry();
        let before = registry.clone();
        let dispatch = router.route(
            &mut registry,
            BOT,
            Source::Private { sender: "mallory" },
            "join #test 1 1",
        );
        assert_eq!(dispatch, Dispatch::Ignored(Ignored::UnauthorizedSender));
        assert_eq!(registry, before);
    }

    #[test]
    fn unknown_and_empty_private_messages_are_ignored() {
        let router = CommandRouter::new();
        let mut registry = registry();
        assert_eq!(
            private(&router, &mut registry, "do_join #test 1 1"),
            Dispatch::Ignored(Ignored::UnknownCommand)
        );
        assert_eq!(
            private(&router, &mut registry, "   "),
            Dispatch::Ignored(Ignored::Empty)
        );
    }

    #[test]
    fn commands_are_case_insensitive() {
        let router = CommandRouter::new();
        let mut registry = registry();
        let outcome = handled(private(&router, &mut registry, "TEST"));
        assert_eq!(outcome.actions, vec![Action::privmsg("alice", "Testing.")]);
    }

    #[test]
    fn part_keeps_registrar() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        let outcome = handled(private(&router, &mut registry, "part #test"));
        assert_eq!(outcome.actions, vec![Action::Part("#test".into())]);
        assert!(!outcome.persist);
        assert!(registry.contains("#test"));
    }

    #[test]
    fn part_without_channel_returns_usage() {
        let router = CommandRouter::new();
        let mut registry = registry();
        assert!(matches!(
            private(&router, &mut registry, "part"),
            Dispatch::Failed {
                error: CommandError::InvalidArguments { command: "part", .. },
                ..
            }
        ));
    }

    #[test]
    fn clear_empties_list_and_persists() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        registry.get_mut("#test").unwrap().register("bob");

        let outcome = handled(private(&router, &mut registry, "clear #test"));
        assert!(outcome.persist);
        assert!(registry.get("#test").unwrap().is_empty());

        // Nothing left to clear, nothing to save.
        assert!(!handled(private(&router, &mut registry, "clear #test")).persist);
    }

    #[test]
    fn clear_of_unknown_channel_is_reported() {
        let router = CommandRouter::new();
        let mut registry = registry();
        let Dispatch::Failed { error, .. } = private(&router, &mut registry, "clear #nope") else {
            panic!("expected failure");
        };
        assert_eq!(error, CommandError::unmanaged("#nope"));
        assert_eq!(error.reply_lines(), vec![
            "#nope is not managed by this bot.".to_string()
        ]);
    }

    #[test]
    fn forget_removes_registrar_and_parts() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        let outcome = handled(private(&router, &mut registry, "forget #TEST"));
        assert!(outcome.persist);
        assert_eq!(outcome.actions[0], Action::Part("#test".into()));
        assert!(registry.is_empty());
    }

    #[test]
    fn channels_lists_managed_channels() {
        let router = CommandRouter::new();
        let mut registry = registry();
        assert_eq!(
            handled(private(&router, &mut registry, "channels")).actions,
            vec![Action::notice("alice", notices::NO_CHANNELS)]
        );

        registry.insert(Registrar::new("#b", 4, 9));
        registry.insert(Registrar::new("#a", 2, 3));
        registry.get_mut("#a").unwrap().register("bob");
        assert_eq!(
            handled(private(&router, &mut registry, "channels")).actions,
            vec![
                Action::notice("alice", "#a 1/2 (part above 3)"),
                Action::notice("alice", "#b 0/4 (part above 9)"),
            ]
        );
    }

    #[test]
    fn register_below_threshold_persists() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        let outcome = handled(public(&router, &mut registry, "bob", "register"));
        assert_eq!(outcome, Outcome::persisted(Vec::new()));
        assert_eq!(registry.get("#test").unwrap().list(), ["bob"]);
    }

    #[test]
    fn third_registration_triggers_one_mass_invite() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        handled(public(&router, &mut registry, "alice", "register"));
        handled(public(&router, &mut registry, "bob", "register"));
        let outcome = handled(public(&router, &mut registry, "carol", "register"));

        assert!(outcome.persist);
        assert_eq!(outcome.actions, vec![Action::MassInvite {
            channel: "#test".into(),
            recipients: vec!["alice".into(), "bob".into(), "carol".into()],
        }]);
        assert!(registry.get("#test").unwrap().is_empty());
    }

    #[test]
    fn same_batch_can_cross_the_threshold_twice() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        let expected = vec![Action::MassInvite {
            channel: "#test".into(),
            recipients: vec!["alice".into(), "bob".into(), "carol".into()],
        }];

        for _ in 0..2 {
            handled(public(&router, &mut registry, "alice", "register"));
            handled(public(&router, &mut registry, "bob", "register"));
            let outcome = handled(public(&router, &mut registry, "carol", "register"));
            assert_eq!(outcome.actions, expected);
            assert!(registry.get("#test").unwrap().is_empty());
        }
    }

    #[test]
    fn zero_threshold_invites_first_registrant() {
        let router = CommandRouter::new();
        let mut registry = managed(0, 5);
        let outcome = handled(public(&router, &mut registry, "bob", "register"));
        assert_eq!(outcome.actions, vec![Action::MassInvite {
            channel: "#test".into(),
            recipients: vec!["bob".into()],
        }]);
    }

    #[test]
    fn duplicate_registration_is_reported() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        handled(public(&router, &mut registry, "bob", "register"));
        let dispatch = public(&router, &mut registry, "bob", "register");
        assert_eq!(dispatch, Dispatch::Failed {
            command: "register",
            error: CommandError::DuplicateRegistration,
        });
        assert_eq!(registry.get("#test").unwrap().len(), 1);
    }

    #[test]
    fn list_reports_ratio_and_names_in_order() {
        let router = CommandRouter::new();
        let mut registry = managed(5, 9);
        handled(public(&router, &mut registry, "carol", "register"));
        handled(public(&router, &mut registry, "bob", "register"));

        let outcome = handled(public(&router, &mut registry, "dave", "list"));
        assert!(!outcome.persist);
        assert_eq!(outcome.actions, vec![
            Action::notice("dave", "2/5 users have registered interest in #test:"),
            Action::notice("dave", "carol"),
            Action::notice("dave", "bob"),
        ]);
    }

    #[rstest::rstest]
    #[case("bootstrapbot: register")]
    #[case("bootstrapbot, register")]
    #[case("BootstrapBot register")]
    #[case(":bootstrapbot: register")]
    fn mention_prefix_selects_public_command(#[case] text: &str) {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        handled(public(&router, &mut registry, "bob", text));
        assert_eq!(registry.get("#test").unwrap().list(), ["bob"]);
    }

    #[test]
    fn mention_of_someone_else_is_ignored() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        assert_eq!(
            public(&router, &mut registry, "bob", "otherbot: register"),
            Dispatch::Ignored(Ignored::UnknownCommand)
        );
        assert_eq!(
            public(&router, &mut registry, "bob", "hello everyone"),
            Dispatch::Ignored(Ignored::UnknownCommand)
        );
    }

    #[test]
    fn public_commands_in_unmanaged_channel_are_ignored() {
        let router = CommandRouter::new();
        let mut registry = registry();
        assert_eq!(
            public(&router, &mut registry, "bob", "register"),
            Dispatch::Ignored(Ignored::UnmanagedChannel)
        );
    }

    #[test]
    fn private_commands_are_not_reachable_from_channels() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        assert_eq!(
            router.route(
                &mut registry,
                BOT,
                Source::Public {
                    sender: "alice",
                    channel: "#test",
                },
                "forget #test",
            ),
            Dispatch::Ignored(Ignored::UnknownCommand)
        );
        assert!(registry.contains("#test"));
    }

    #[test]
    fn help_lists_every_command() {
        let router = CommandRouter::new();
        let mut registry = managed(3, 5);
        let private_help = handled(private(&router, &mut registry, "help"));
        assert_eq!(private_help.actions.len(), PRIVATE_COMMANDS.len());
        let public_help = handled(public(&router, &mut registry, "bob", "help"));
        assert_eq!(public_help.actions.len(), PUBLIC_COMMANDS.len());
    }
}
