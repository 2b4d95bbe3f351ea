//! Command-line interface for attendx.
//!
//! This module provides the CLI structure for the `attendx` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AnimationArg, AttendanceCommand, BadgesCommand, ConfigCommand, CreateEventArgs, EventsCommand,
    RoleArg, RoleCommand, SetSettingsArgs, SettingsCommand, StatusArg, StatusCommand,
    SummaryCommand, ThemeArg, WalletCommand,
};

/// attendx - Class attendance on a simulated ledger
///
/// Create events, check in to them, and browse the resulting records,
/// badges, and settings. Data lives in a local database seeded with demo
/// records on first use.
#[derive(Debug, Parser)]
#[command(name = "attendx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage events
    #[command(subcommand)]
    Events(EventsCommand),

    /// List or submit attendance
    #[command(subcommand)]
    Attendance(AttendanceCommand),

    /// List badges
    Badges(BadgesCommand),

    /// Manage the demo wallet
    #[command(subcommand)]
    Wallet(WalletCommand),

    /// Show or select the user role
    #[command(subcommand)]
    Role(RoleCommand),

    /// Show or update settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Dashboard totals
    #[command(subcommand)]
    Summary(SummaryCommand),

    /// Print the simulated block height
    BlockHeight,

    /// Show ledger status
    Status(StatusCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}

/// A follow-up suggestion to print after a command fails with `err`.
#[must_use]
pub fn error_hint(err: &crate::Error) -> Option<&'static str> {
    if err.is_event_not_found() {
        Some("Run `attendx events list` to see known event ids.")
    } else if err.is_wallet_not_connected() {
        Some("Run `attendx wallet connect` first.")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::BlockHeight,
        }
    }

    #[test]
    fn test_error_hint() {
        let hint = error_hint(&crate::Error::event_not_found("NOPE")).unwrap();
        assert!(hint.contains("events list"));
        assert!(error_hint(&crate::Error::WalletNotConnected)
            .unwrap()
            .contains("wallet connect"));
        assert!(error_hint(&crate::Error::ConfigValidation {
            message: "bad".to_string()
        })
        .is_none());
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "attendx");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_events_list_with_status() {
        let cli = Cli::try_parse_from(["attendx", "events", "list", "--status", "active"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Events(EventsCommand::List {
                status: Some(StatusArg::Active),
                json: false
            })
        ));
    }

    #[test]
    fn test_parse_events_create_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "attendx",
            "events",
            "create",
            "--name",
            "Compilers",
            "--date",
            "2026-03-01",
            "--time",
            "10:00",
            "--location",
            "Room 1",
            "--lat",
            "37.77",
            "--lng",
            "-122.41",
        ])
        .unwrap();
        let Command::Events(EventsCommand::Create(args)) = cli.command else {
            panic!("expected events create");
        };
        assert!((args.lng + 122.41).abs() < 1e-9);
        assert_eq!(args.duration, 60);
    }

    #[test]
    fn test_parse_attendance_submit() {
        let cli = Cli::try_parse_from(["attendx", "attendance", "submit", "EVT001"]).unwrap();
        let Command::Attendance(AttendanceCommand::Submit {
            event_id,
            latest,
            name,
            ..
        }) = cli.command
        else {
            panic!("expected attendance submit");
        };
        assert_eq!(event_id.as_deref(), Some("EVT001"));
        assert!(!latest);
        assert!(name.is_none());
    }

    #[test]
    fn test_parse_attendance_submit_latest() {
        let cli = Cli::try_parse_from(["attendx", "attendance", "submit", "--latest"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Attendance(AttendanceCommand::Submit {
                event_id: None,
                latest: true,
                ..
            })
        ));
    }

    #[test]
    fn test_attendance_submit_needs_event_or_latest() {
        assert!(Cli::try_parse_from(["attendx", "attendance", "submit"]).is_err());
        assert!(
            Cli::try_parse_from(["attendx", "attendance", "submit", "EVT001", "--latest"]).is_err()
        );
    }

    #[test]
    fn test_parse_role_set() {
        let cli = Cli::try_parse_from(["attendx", "role", "set", "instructor"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Role(RoleCommand::Set {
                role: RoleArg::Instructor
            })
        ));
    }

    #[test]
    fn test_parse_settings_set_bool() {
        let cli = Cli::try_parse_from([
            "attendx",
            "settings",
            "set",
            "--participate-analytics",
            "false",
            "--theme",
            "oled",
        ])
        .unwrap();
        let Command::Settings(SettingsCommand::Set(args)) = cli.command else {
            panic!("expected settings set");
        };
        assert_eq!(args.participate_analytics, Some(false));
        assert_eq!(args.theme, Some(ThemeArg::Oled));
    }

    #[test]
    fn test_parse_block_height() {
        let cli = Cli::try_parse_from(["attendx", "block-height"]).unwrap();
        assert!(matches!(cli.command, Command::BlockHeight));
    }

    #[test]
    fn test_parse_with_global_flags() {
        let cli =
            Cli::try_parse_from(["attendx", "-c", "/custom/config.toml", "-v", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Command::Status(_)));
    }
}
