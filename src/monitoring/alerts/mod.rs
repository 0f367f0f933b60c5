//! Threshold alerting
//!
//! Re-checks health metrics against static limits, suppresses repeats of the
//! same alert kind within the cooldown window and forwards fired alerts to
//! notification channels.

mod channels;
mod manager;
mod processing;
mod types;

#[cfg(test)]
mod tests;

pub use channels::{LogChannel, NotificationChannel, WebhookChannel};
pub use manager::{ALERT_HISTORY_LIMIT, AlertManager};
pub use types::{Alert, AlertKind, AlertSeverity, AlertStats};
