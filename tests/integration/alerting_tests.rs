//! Alert delivery integration tests against a mock webhook receiver

#[cfg(test)]
mod tests {
    use crate::common::fixtures::monitoring_with_load;
    use kitchen_monitor::config::MonitoringConfig;
    use kitchen_monitor::monitoring::AlertSeverity;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_with_webhook(url: String) -> MonitoringConfig {
        let mut config = MonitoringConfig::default();
        config.alerts.webhook_url = Some(url);
        config
    }

    #[tokio::test]
    async fn test_fired_alert_is_posted_to_webhook() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/alerts"))
            .and(body_partial_json(serde_json::json!({
                "alert_type": "high_memory_usage",
                "severity": "critical",
                "source": "kitchen-monitor",
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_with_webhook(format!("{}/alerts", server.uri()));
        let (monitoring, _sampler) = monitoring_with_load(&config, 20.0, 95.0, 30.0);

        monitoring.run_collection_cycle().await;
        // cooldown keeps the second tick quiet
        monitoring.run_collection_cycle().await;

        let history = monitoring.alerts().get_history(None);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].severity, AlertSeverity::Critical);
        assert_eq!(monitoring.alerts().get_stats().failed_notifications, 0);
    }

    #[tokio::test]
    async fn test_webhook_failure_is_counted_not_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = config_with_webhook(server.uri());
        let (monitoring, _sampler) = monitoring_with_load(&config, 95.0, 95.0, 95.0);

        monitoring.run_collection_cycle().await;

        let stats = monitoring.alerts().get_stats();
        assert_eq!(stats.total_alerts, 3);
        assert_eq!(stats.failed_notifications, 3);
        assert_eq!(stats.alerts_by_severity.get("critical"), Some(&2));
        assert_eq!(stats.alerts_by_severity.get("warning"), Some(&1));
    }

    #[tokio::test]
    async fn test_disabled_alerting_never_fires() {
        let mut config = MonitoringConfig::default();
        config.alerts.enabled = false;
        let (monitoring, _sampler) = monitoring_with_load(&config, 99.0, 99.0, 99.0);

        monitoring.run_collection_cycle().await;

        assert_eq!(monitoring.metrics().snapshot_len(), 1);
        assert!(monitoring.alerts().get_history(None).is_empty());
    }
}
