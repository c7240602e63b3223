mod platform;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use karaoke_logging::karaoke_warn;

use platform::config::load_config;
use platform::logging::LogDestination;
use platform::StartPage;

#[derive(Parser, Debug)]
#[command(name = "karaoke_app", about = "Turn a song into a karaoke video")]
struct Cli {
    /// RON config file; missing files fall back to defaults.
    #[arg(long, default_value = "karaoke.ron")]
    config: PathBuf,
    /// Processing server origin, e.g. http://127.0.0.1:5000
    #[arg(long)]
    server: Option<String>,
    #[arg(long, value_enum)]
    log: Option<LogDestination>,
    #[arg(long)]
    download_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a result link (`...result.html?video=...`) directly.
    Open { url: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(&cli.config);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    if let Some(server) = cli.server {
        config.server_origin = server;
    }
    if let Some(log) = cli.log {
        config.log = log;
    }
    if let Some(dir) = cli.download_dir {
        config.download_dir = dir;
    }

    platform::logging::initialize(config.log);
    if let Err(err) = &loaded {
        karaoke_warn!("{err}; using default configuration");
    }

    let start = match cli.command {
        Some(Command::Open { url }) => StartPage::Result(url::Url::parse(&url)?),
        None => StartPage::Upload,
    };
    platform::run_app(config, start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_open_and_overrides() {
        let cli = Cli::parse_from([
            "karaoke_app",
            "--server",
            "http://10.0.0.2:5000",
            "--log",
            "both",
            "open",
            "http://localhost/result.html?video=%2Fa.mp4",
        ]);
        assert_eq!(cli.server.as_deref(), Some("http://10.0.0.2:5000"));
        assert_eq!(cli.log, Some(LogDestination::Both));
        assert!(matches!(cli.command, Some(Command::Open { .. })));
        // Keeps the default path when not given.
        assert_eq!(cli.config, PathBuf::from("karaoke.ron"));
    }
}
