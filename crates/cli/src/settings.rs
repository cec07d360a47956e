use std::path::{Path, PathBuf};

use {
    anyhow::Result,
    bootstrapbot_config::{BotConfig, Severity, ValidationResult},
};

/// Values given on the command line. Each one replaces the file value.
#[derive(Debug, Default)]
pub struct Overrides {
    pub controller: Option<String>,
    pub nickname: Option<String>,
    pub server: Option<String>,
    pub port: Option<u16>,
    pub state: Option<PathBuf>,
}

/// Read the settings file (explicit path or discovered) and apply overrides.
pub fn resolve(config_path: Option<&Path>, overrides: Overrides) -> Result<BotConfig> {
    let mut config = match config_path {
        Some(path) => bootstrapbot_config::load_config(path)?,
        None => bootstrapbot_config::discover_and_load(),
    };
    apply(&mut config, overrides);
    Ok(config)
}

fn apply(config: &mut BotConfig, overrides: Overrides) {
    if let Some(controller) = overrides.controller {
        config.identity.controller = Some(controller);
    }
    if let Some(nickname) = overrides.nickname {
        config.identity.nickname = nickname;
    }
    if let Some(server) = overrides.server {
        config.server.host = server;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(state) = overrides.state {
        config.storage.state_path = state;
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Print diagnostics to stderr. With `summary`, also print the totals even
/// when there is nothing to report.
pub fn report(result: &ValidationResult, summary: bool) {
    for d in &result.diagnostics {
        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
        };
        eprintln!("  {BOLD}{color}{}{RESET} {}: {}", d.severity, d.path, d.message);
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);
    if errors == 0 && warnings == 0 {
        if summary {
            eprintln!("No issues found.");
        }
    } else {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, tempfile::TempDir};

    #[test]
    fn command_line_wins_over_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bootstrapbot.toml");
        std::fs::write(
            &path,
            "[server]\nhost = \"irc.example.net\"\nport = 6697\n\n[identity]\ncontroller = \"alice\"\nnickname = \"filebot\"\n",
        )
        .unwrap();

        let config = resolve(Some(&path), Overrides {
            controller: Some("carol".into()),
            port: Some(7000),
            ..Overrides::default()
        })
        .unwrap();

        assert_eq!(config.identity.controller.as_deref(), Some("carol"));
        assert_eq!(config.identity.nickname, "filebot");
        assert_eq!(config.server.host, "irc.example.net");
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(resolve(Some(&missing), Overrides::default()).is_err());
    }

    #[test]
    fn state_path_override() {
        let mut config = BotConfig::default();
        apply(&mut config, Overrides {
            state: Some(PathBuf::from("/var/lib/bootstrapbot/config.json")),
            ..Overrides::default()
        });
        assert_eq!(
            config.storage.state_path,
            PathBuf::from("/var/lib/bootstrapbot/config.json")
        );
    }
}
