//! Desktop notifications for due reminders.

use std::time::Duration;

use calplan_core::Notification;
use notify_rust::Notification as DesktopNotification;
#[cfg(target_os = "linux")]
use notify_rust::Urgency;
use tracing::{debug, error, info};

/// Configuration for desktop notifications.
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    /// Application name for notifications.
    pub app_name: String,
    /// Notification timeout in seconds.
    pub timeout_secs: u32,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            app_name: "calplan".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Shows reminders through the desktop notification daemon.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier {
    config: DesktopConfig,
}

impl DesktopNotifier {
    pub fn new(config: DesktopConfig) -> Self {
        Self { config }
    }

    /// Sends one reminder. Returns false if the daemon rejected it.
    pub fn send(&self, notification: &Notification) -> bool {
        let body = format!("{} 시작", notification.starts_at.format("%Y-%m-%d %H:%M"));

        debug!(id = %notification.id, title = %notification.title, "Sending desktop notification");

        let mut desktop = DesktopNotification::new();
        desktop
            .appname(&self.config.app_name)
            .summary(&notification.message)
            .body(&body)
            .timeout(Duration::from_secs(u64::from(self.config.timeout_secs)));

        #[cfg(target_os = "linux")]
        desktop.urgency(Urgency::Normal);

        match desktop.show() {
            Ok(_) => {
                info!(id = %notification.id, title = %notification.title, "Desktop notification sent");
                true
            }
            Err(e) => {
                error!(
                    error = %e,
                    title = %notification.title,
                    "Failed to send desktop notification"
                );
                false
            }
        }
    }
}
