//! Alert system tests

#[cfg(test)]
mod tests {
    use super::super::channels::{LogChannel, NotificationChannel, WebhookChannel};
    use super::super::manager::AlertManager;
    use super::super::types::{Alert, AlertKind, AlertSeverity};
    use crate::config::AlertingConfig;
    use crate::monitoring::health::{HealthMetrics, HealthReport, HealthState};
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn report(metrics: HealthMetrics) -> HealthReport {
        HealthReport {
            status: HealthState::Healthy,
            timestamp: Utc::now(),
            uptime_seconds: 1.0,
            issues: Vec::new(),
            metrics,
        }
    }

    fn error_rate(rate: f64) -> HealthReport {
        report(HealthMetrics {
            requests_last_5min: 100,
            error_rate: rate,
            ..HealthMetrics::default()
        })
    }

    fn manager() -> AlertManager {
        AlertManager::with_channels(&AlertingConfig::default(), Vec::new())
    }

    #[test]
    fn test_kind_severity_and_names() {
        assert_eq!(AlertKind::HighErrorRate.severity(), AlertSeverity::Critical);
        assert_eq!(AlertKind::SlowResponseTime.severity(), AlertSeverity::Warning);
        assert_eq!(AlertKind::HighCpuUsage.severity(), AlertSeverity::Warning);
        assert_eq!(AlertKind::HighMemoryUsage.severity(), AlertSeverity::Critical);
        assert_eq!(AlertKind::HighDiskUsage.as_str(), "high_disk_usage");
        assert_eq!(AlertSeverity::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn test_cooldown_suppresses_repeat_within_window() {
        let manager = manager();
        let health = error_rate(0.5);
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let first = manager.check_alerts_at(&health, t0);
        let second = manager.check_alerts_at(&health, t0 + Duration::seconds(60));
        let third = manager.check_alerts_at(&health, t0 + Duration::seconds(301));

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(third.len(), 1);

        let stats = manager.get_stats();
        assert_eq!(stats.total_alerts, 2);
        assert_eq!(stats.suppressed, 1);
        assert_eq!(
            manager.last_fired(AlertKind::HighErrorRate),
            Some(t0 + Duration::seconds(301))
        );
    }

    #[test]
    fn test_oversized_cooldown_still_suppresses() {
        let config = AlertingConfig {
            cooldown_secs: u64::MAX,
            ..AlertingConfig::default()
        };
        let manager = AlertManager::with_channels(&config, Vec::new());
        let health = error_rate(0.5);
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        assert_eq!(manager.check_alerts_at(&health, t0).len(), 1);
        assert!(
            manager
                .check_alerts_at(&health, t0 + Duration::days(1))
                .is_empty()
        );
    }

    #[test]
    fn test_cooldown_is_per_kind() {
        let manager = manager();
        let t0 = Utc::now();
        manager.check_alerts_at(&error_rate(0.5), t0);

        let health = report(HealthMetrics {
            error_rate: 0.5,
            cpu_percent: Some(95.0),
            ..HealthMetrics::default()
        });
        let fired = manager.check_alerts_at(&health, t0 + Duration::seconds(10));

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, AlertKind::HighCpuUsage);
    }

    #[test]
    fn test_failed_condition_does_not_block_others() {
        let manager = manager();
        let health = report(HealthMetrics {
            cpu_percent: Some(f64::NAN),
            memory_percent: Some(92.0),
            disk_percent: Some(95.0),
            ..HealthMetrics::default()
        });

        let fired = manager.check_alerts(&health);
        let kinds: Vec<AlertKind> = fired.iter().map(|a| a.kind).collect();

        assert_eq!(kinds, vec![AlertKind::HighMemoryUsage, AlertKind::HighDiskUsage]);
        assert_eq!(manager.get_stats().failed_checks, 1);
    }

    #[test]
    fn test_missing_readings_do_not_fire() {
        let manager = manager();
        assert!(manager.check_alerts(&error_rate(0.0)).is_empty());
    }

    #[test]
    fn test_messages_match_format() {
        let manager = manager();
        let health = report(HealthMetrics {
            error_rate: 0.125,
            avg_response_time: Some(2.5),
            cpu_percent: Some(91.26),
            ..HealthMetrics::default()
        });

        let fired = manager.check_alerts(&health);
        let messages: Vec<&str> = fired.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Error rate is 12.50%, threshold is 5.00%",
                "Average response time is 2.500s, threshold is 2s",
                "CPU usage is 91.3%, threshold is 80%",
            ]
        );
    }

    #[test]
    fn test_current_alerts_ignore_cooldown() {
        let manager = manager();
        let health = error_rate(0.5);

        assert_eq!(manager.check_alerts(&health).len(), 1);
        assert_eq!(manager.current_alerts(&health).len(), 1);
        assert_eq!(manager.current_alerts(&health).len(), 1);
        assert_eq!(manager.get_stats().total_alerts, 1);
    }

    #[test]
    fn test_history_newest_first() {
        let manager = manager();
        let t0 = Utc::now() - Duration::hours(2);
        manager.check_alerts_at(&error_rate(0.5), t0);
        manager.check_alerts_at(&error_rate(0.5), t0 + Duration::hours(1));

        let history = manager.get_history(None);
        assert_eq!(history.len(), 2);
        assert!(history[0].timestamp > history[1].timestamp);
        assert_eq!(manager.history_since(t0 + Duration::minutes(30)).len(), 1);
    }

    #[test]
    fn test_alert_serializes_type_field() {
        let alert = Alert::new(AlertKind::HighCpuUsage, "cpu".to_string(), 90.0, 80.0, Utc::now());
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "high_cpu_usage");
        assert_eq!(json["severity"], "warning");
    }

    #[tokio::test]
    async fn test_webhook_channel_posts_alert() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/alerts"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let channel: Arc<dyn NotificationChannel> = Arc::new(
            WebhookChannel::new(format!("{}/alerts", server.uri()), AlertSeverity::Warning)
                .unwrap(),
        );
        let manager = AlertManager::with_channels(&AlertingConfig::default(), vec![channel]);

        let fired = manager.check_alerts(&error_rate(0.5));
        manager.notify(&fired).await;

        assert_eq!(manager.get_stats().failed_notifications, 0);
    }

    #[tokio::test]
    async fn test_webhook_failure_is_counted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let channel: Arc<dyn NotificationChannel> =
            Arc::new(WebhookChannel::new(server.uri(), AlertSeverity::Warning).unwrap());
        let manager = AlertManager::with_channels(&AlertingConfig::default(), vec![channel]);

        let fired = manager.check_alerts(&error_rate(0.5));
        manager.notify(&fired).await;

        assert_eq!(manager.get_stats().failed_notifications, 1);
    }

    #[test]
    fn test_webhook_respects_min_severity() {
        let channel =
            WebhookChannel::new("http://localhost:9/alerts", AlertSeverity::Critical).unwrap();
        assert!(channel.supports_severity(AlertSeverity::Critical));
        assert!(!channel.supports_severity(AlertSeverity::Warning));
        assert_eq!(channel.name(), "webhook");
    }

    #[tokio::test]
    async fn test_log_channel_accepts_every_alert() {
        let channel = LogChannel;
        assert_eq!(channel.name(), "log");
        assert!(channel.supports_severity(AlertSeverity::Warning));

        let alert = Alert::new(AlertKind::HighErrorRate, "errors".to_string(), 0.5, 0.1, Utc::now());
        assert!(channel.send(&alert).await.is_ok());
    }

    #[tokio::test]
    async fn test_default_manager_always_logs() {
        let manager = AlertManager::new(&AlertingConfig::default()).unwrap();
        let fired = manager.check_alerts(&error_rate(0.5));
        manager.notify(&fired).await;
        assert_eq!(manager.get_stats().failed_notifications, 0);
    }
}
