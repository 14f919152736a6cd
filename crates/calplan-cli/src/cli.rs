//! Command-line interface definition.

use std::path::PathBuf;

use calplan_core::{OutputFormat, RepeatType, ViewMode, parse_date};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// calplan - events, conflicts and reminders from the terminal
#[derive(Debug, Parser)]
#[command(name = "calplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CALPLAN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the events file (overrides store.path)
    #[arg(long, env = "CALPLAN_STORE", global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the output format based on CLI flags.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List events in the current week or month
    List(ListArgs),

    /// Add an event
    Add {
        #[command(flatten)]
        fields: EventFields,

        /// Save even if the event overlaps existing ones
        #[arg(long, short)]
        force: bool,
    },

    /// Edit an event; only the given fields change
    Edit {
        /// Event id
        id: String,

        #[command(flatten)]
        fields: EventFields,

        /// Save even if the event overlaps existing ones
        #[arg(long, short)]
        force: bool,
    },

    /// Delete an event
    Delete {
        /// Event id
        id: String,
    },

    /// Show a week or month grid with holidays and events
    Calendar(DateViewArgs),

    /// List public holidays in a month
    Holidays {
        /// Any date in the month (YYYY-MM-DD, default today)
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// Watch the store and announce events as their reminder time arrives
    Watch {
        /// Seconds between checks (overrides notifications.tick_secs)
        #[arg(long)]
        interval_secs: Option<u64>,

        /// Also show desktop notifications
        #[arg(long)]
        desktop: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of `list`.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Only events whose title, description or location contain this text
    #[arg(long, short, default_value = "")]
    pub search: String,

    #[command(flatten)]
    pub window: DateViewArgs,
}

/// Reference date and view window.
#[derive(Debug, Clone, Default, Args)]
pub struct DateViewArgs {
    /// Reference date (YYYY-MM-DD, default today)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// week or month (default from config)
    #[arg(long)]
    pub view: Option<ViewMode>,
}

/// Event fields shared by `add` and `edit`.
#[derive(Debug, Clone, Default, Args)]
pub struct EventFields {
    /// Event title
    #[arg(long)]
    pub title: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(long)]
    pub start: Option<String>,

    /// End time (HH:MM)
    #[arg(long)]
    pub end: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Location
    #[arg(long)]
    pub location: Option<String>,

    /// Category (업무, 개인, 가족, 기타)
    #[arg(long)]
    pub category: Option<String>,

    /// Minutes before the start to send a reminder
    #[arg(long)]
    pub notify: Option<u32>,

    /// Repeat rule: none, daily, weekly, monthly, yearly
    #[arg(long)]
    pub repeat: Option<RepeatType>,

    /// Repeat every N units
    #[arg(long)]
    pub interval: Option<u32>,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand() {
        let cli = Cli::try_parse_from(["calplan"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output_format(), OutputFormat::Text);
    }

    #[test]
    fn list_with_window() {
        let cli = Cli::try_parse_from([
            "calplan", "list", "--search", "회의", "--date", "2024-10-15", "--view", "week",
        ])
        .unwrap();

        match cli.command {
            Some(Command::List(args)) => {
                assert_eq!(args.search, "회의");
                assert_eq!(args.window.date, NaiveDate::from_ymd_opt(2024, 10, 15));
                assert_eq!(args.window.view, Some(ViewMode::Week));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["calplan", "list", "--json", "--store", "/tmp/e.json"])
            .unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Json);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/e.json")));
    }

    #[test]
    fn add_fields() {
        let cli = Cli::try_parse_from([
            "calplan", "add", "--title", "팀 회의", "--date", "2024-10-15", "--start", "09:00",
            "--end", "10:00", "--repeat", "weekly", "--interval", "2", "--notify", "60", "--force",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Add { fields, force }) => {
                assert!(force);
                assert_eq!(fields.title.as_deref(), Some("팀 회의"));
                assert_eq!(fields.repeat, Some(RepeatType::Weekly));
                assert_eq!(fields.interval, Some(2));
                assert_eq!(fields.notify, Some(60));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn edit_takes_id_and_partial_fields() {
        let cli = Cli::try_parse_from(["calplan", "edit", "3", "--end", "11:30"]).unwrap();
        match cli.command {
            Some(Command::Edit { id, fields, force }) => {
                assert_eq!(id, "3");
                assert_eq!(fields.end.as_deref(), Some("11:30"));
                assert!(fields.title.is_none());
                assert!(!force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_date_and_view() {
        assert!(Cli::try_parse_from(["calplan", "calendar", "--date", "2024-13-01"]).is_err());
        assert!(Cli::try_parse_from(["calplan", "calendar", "--view", "day"]).is_err());
        assert!(Cli::try_parse_from(["calplan", "add", "--repeat", "hourly"]).is_err());
    }
}
