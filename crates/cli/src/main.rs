mod settings;

use std::{path::PathBuf, sync::Arc, time::Duration};

use {
    anyhow::Context,
    bootstrapbot_agent::{AgentController, AgentSettings, prepare_registry},
    bootstrapbot_config::BotConfig,
    bootstrapbot_irc::{ConnectOptions, Session, connect},
    bootstrapbot_registry::{FileStore, RegistryStore},
    clap::Parser,
    tracing::{info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use crate::settings::Overrides;

#[derive(Parser)]
#[command(
    name = "bootstrapbot",
    version,
    about = "IRC bot that gathers interest in a channel and invites everyone back at once"
)]
struct Cli {
    /// Nick allowed to send private commands.
    controller: Option<String>,
    /// Nick the bot registers with.
    nickname: Option<String>,
    /// IRC server host.
    server: Option<String>,

    /// IRC server port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Settings file (toml, yaml or json). Discovered in ./ and the user
    /// config directory when not given.
    #[arg(long, env = "BOOTSTRAPBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Channel registry file.
    #[arg(long, env = "BOOTSTRAPBOT_STATE")]
    state: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Validate settings and exit.
    #[arg(long, default_value_t = false)]
    check: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "bootstrapbot starting");

    let config = settings::resolve(cli.config.as_deref(), Overrides {
        controller: cli.controller,
        nickname: cli.nickname,
        server: cli.server,
        port: cli.port,
        state: cli.state,
    })?;

    let diagnostics = bootstrapbot_config::validate(&config);
    settings::report(&diagnostics, cli.check);
    if diagnostics.has_errors() {
        anyhow::bail!("invalid settings");
    }
    if cli.check {
        return Ok(());
    }

    run(config).await
}

async fn run(config: BotConfig) -> anyhow::Result<()> {
    let state_path = config.storage.state_path.clone();
    let store: Arc<dyn RegistryStore> = Arc::new(FileStore::new(&state_path));
    let registry = prepare_registry(store.as_ref(), config.identity.controller.as_deref())
        .await
        .with_context(|| format!("failed to load channel registry {}", state_path.display()))?;

    let options = ConnectOptions {
        host: config.server.host.clone(),
        port: config.server.port,
        nickname: config.identity.nickname.clone(),
        username: config.identity.username.clone(),
        realname: config.identity.realname.clone(),
        password: config.server.password.clone(),
    };
    let connection = connect(&options)
        .await
        .with_context(|| format!("failed to connect to {}:{}", options.host, options.port))?;

    let settings = AgentSettings {
        nickname: config.identity.nickname.clone(),
        max_nick_attempts: config.identity.max_nick_attempts,
        invite_delay: Duration::from_millis(config.invites.delay_ms),
        extra_invitees: config.invites.extra_invitees,
        autojoin: config.channels.autojoin,
    };
    let session = Session::new(&settings.nickname);
    let agent = AgentController::new(registry, store, Arc::new(connection.sender()), settings);

    agent.run(connection, session, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c, run until disconnected");
        std::future::pending::<()>().await;
    }
}
