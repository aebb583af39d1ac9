//! Boardchat - Entry Point

use boardchat::model::AppError;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Boardchat - collapsible chat overlay over a board surface
#[derive(Parser, Debug)]
#[command(name = "boardchat")]
#[command(version)]
#[command(about = "Collapsible chat overlay for a real-time board surface")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Nickname used for outgoing messages
    #[arg(short, long)]
    pub nick: Option<String>,

    /// Keep the overlay open instead of hiding it after inactivity
    #[arg(long)]
    pub no_auto_hide: bool,

    /// Replay chat lines from a text file, one message per line
    #[arg(long)]
    pub feed: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        use boardchat::config::loader;

        let config_file = loader::load_config_with_precedence(args.config.clone())?;
        let merged = loader::merge_config(config_file);
        let with_env = loader::apply_env_overrides(merged);

        // Only override auto-hide if the flag was explicitly set
        let auto_hide_override = args.no_auto_hide.then_some(false);

        loader::apply_cli_overrides(with_env, args.nick.clone(), auto_hide_override)
    };

    boardchat::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    boardchat::view::run_with_config(&config, args.feed)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardchat::model::AppError;
use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["boardchat", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["boardchat", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["boardchat"]);
        assert_eq!(args.config, None);
        assert_eq!(args.nick, None);
        assert!(!args.no_auto_hide);
        assert_eq!(args.feed, None);
    }

    #[test]
    fn test_nick_short_flag() {
        let args = Args::parse_from(["boardchat", "-n", "alice"]);
        assert_eq!(args.nick, Some("alice".to_string()));
    }

    #[test]
    fn test_nick_long_flag() {
        let args = Args::parse_from(["boardchat", "--nick", "bob"]);
        assert_eq!(args.nick, Some("bob".to_string()));
    }

    #[test]
    fn test_no_auto_hide_flag() {
        let args = Args::parse_from(["boardchat", "--no-auto-hide"]);
        assert!(args.no_auto_hide);
    }

    #[test]
    fn test_feed_path() {
        let args = Args::parse_from(["boardchat", "--feed", "chat.txt"]);
        assert_eq!(args.feed, Some(PathBuf::from("chat.txt")));
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["boardchat", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_unknown_flag_rejects() {
        let result = Args::try_parse_from(["boardchat", "--follow"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "boardchat",
            "--nick",
            "carol",
            "--no-auto-hide",
            "--feed",
            "log.txt",
            "--config",
            "c.toml",
        ]);
        assert_eq!(args.nick, Some("carol".to_string()));
        assert!(args.no_auto_hide);
        assert_eq!(args.feed, Some(PathBuf::from("log.txt")));
        assert_eq!(args.config, Some(PathBuf::from("c.toml")));
    }
}
