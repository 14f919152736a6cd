//! Watch command: announces events as their reminder window opens.
//!
//! The store file is re-read on every tick so events added from another
//! shell are picked up. The set of announced ids lives for the duration of
//! the command; restarting `watch` starts a new session.

use std::path::{Path, PathBuf};
use std::time::Duration;

use calplan_core::{Notification, NotificationScheduler, OutputFormat};
use calplan_store::{EventStore, JsonFileStore};
use chrono::{Local, NaiveDateTime};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::error::CliResult;
use crate::notify::DesktopNotifier;

/// Runs until Ctrl-C.
pub async fn run(
    store_path: PathBuf,
    interval: Duration,
    notifier: Option<DesktopNotifier>,
    format: OutputFormat,
) -> CliResult<()> {
    let mut scheduler = NotificationScheduler::new();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        path = %store_path.display(),
        interval_secs = interval.as_secs(),
        desktop = notifier.is_some(),
        "Watching for due events"
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Local::now().naive_local();
                for notification in check(&mut scheduler, &store_path, now) {
                    println!("{}", render(&notification, format)?);
                    if let Some(ref notifier) = notifier {
                        notifier.send(&notification);
                    }
                }
            }
            result = &mut shutdown => {
                result?;
                info!(
                    notified = scheduler.notified_ids().len(),
                    "Watch stopped"
                );
                return Ok(());
            }
        }
    }
}

/// Reads the store and returns the notifications due at `now`.
///
/// A store that cannot be read is logged and treated as empty for this tick.
pub fn check(
    scheduler: &mut NotificationScheduler,
    store_path: &Path,
    now: NaiveDateTime,
) -> Vec<Notification> {
    match JsonFileStore::open(store_path) {
        Ok(store) => scheduler.tick(store.events(), now),
        Err(e) => {
            warn!(error = %e, "Failed to read event store");
            Vec::new()
        }
    }
}

fn render(notification: &Notification, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(notification)?),
        OutputFormat::Text => Ok(format!(
            "[{}] {}",
            notification.starts_at.format("%H:%M"),
            notification.message
        )),
    }
}
