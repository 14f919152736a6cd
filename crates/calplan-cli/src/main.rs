//! calplan CLI entry point.

use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;
use clap::Parser;

use calplan_cli::cli::{Cli, Command, ConfigAction, ListArgs};
use calplan_cli::commands::{calendar, config as config_cmd, events, watch};
use calplan_cli::config::CalplanConfig;
use calplan_cli::error::CliResult;
use calplan_cli::notify::DesktopNotifier;
use calplan_core::{LogConfig, OutputFormatter, init_logging};
use calplan_store::{EventService, EventStore, JsonFileStore};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.report());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(CalplanConfig::default_path);
    let config = if cli.config.is_some() {
        CalplanConfig::load_from(&config_path)?
    } else {
        CalplanConfig::load()?
    };

    let debug = cli.debug || config.debug;
    let log_config = if !debug && matches!(cli.command, Some(Command::Watch { .. })) {
        LogConfig::for_watcher()
    } else {
        LogConfig::for_cli(debug)
    };
    init_logging(&log_config)?;

    let format = cli.output_format();
    let formatter = OutputFormatter::with_defaults();
    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path());
    let now = Local::now().naive_local();
    let today = now.date();
    let default_view = config.view.default;

    let output = match cli.command.unwrap_or(Command::List(ListArgs::default())) {
        Command::List(args) => {
            let service = EventService::new(JsonFileStore::open(&store_path)?);
            events::list(&service, &args, default_view, now, &formatter, format)?
        }
        Command::Add { fields, force } => {
            let mut service = EventService::new(JsonFileStore::open(&store_path)?);
            events::add(&mut service, fields, force, &formatter, format)?
        }
        Command::Edit { id, fields, force } => {
            let mut service = EventService::new(JsonFileStore::open(&store_path)?);
            events::edit(&mut service, &id, fields, force, &formatter, format)?
        }
        Command::Delete { id } => {
            let mut service = EventService::new(JsonFileStore::open(&store_path)?);
            events::delete(&mut service, &id, format)?
        }
        Command::Calendar(args) => {
            let store = JsonFileStore::open(&store_path)?;
            calendar::calendar(store.events(), &args, default_view, today, &formatter, format)?
        }
        Command::Holidays { date } => calendar::holidays(date, today, format)?,
        Command::Watch {
            interval_secs,
            desktop,
        } => {
            let secs = interval_secs.unwrap_or(config.notifications.tick_secs).max(1);
            let notifier = (desktop || config.notifications.desktop)
                .then(|| DesktopNotifier::new(config.notifications.desktop_config()));
            watch::run(store_path, Duration::from_secs(secs), notifier, format).await?;
            return Ok(());
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => config_cmd::dump(&config, &config_path)?,
            ConfigAction::Validate => config_cmd::validate(&config)?,
            ConfigAction::Path => config_cmd::path(&config, &config_path)?,
        },
    };

    println!("{}", output);
    Ok(())
}
