//! Monitoring core integration tests
//!
//! Collector, aggregator, health evaluation and alerting wired together the
//! way the collection loop uses them.

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::common::RecordFactory;
    use crate::common::assertions::{HealthReportAssertions, alert_kinds};
    use crate::common::fixtures::monitoring_with_load;
    use chrono::{Duration, Utc};
    use kitchen_monitor::config::MonitoringConfig;
    use kitchen_monitor::monitoring::metrics::summarize;
    use kitchen_monitor::monitoring::{AlertKind, HealthState, MetricsCollector};
    use std::sync::Arc;

    // ==================== Collector ====================

    #[test]
    fn test_buffer_evicts_but_aggregates_keep_counting() {
        let collector = MetricsCollector::with_capacity(3, 2);
        for i in 0..5 {
            collector.record_request(RecordFactory::ok("/kitchens", 10 * (i + 1)));
        }

        assert_eq!(collector.request_len(), 3);
        let durations: Vec<f64> = collector.requests().iter().map(|r| r.duration).collect();
        assert_eq!(durations, vec![0.03, 0.04, 0.05]);

        let stat = collector.endpoint_stat("GET /kitchens").unwrap();
        assert_eq!(stat.count, 5);
        assert_approx_eq!(stat.total_time, 0.15);
    }

    #[test]
    fn test_concurrent_writers_lose_nothing() {
        let collector = Arc::new(MetricsCollector::with_capacity(100_000, 10));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let collector = Arc::clone(&collector);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        collector.record_request(RecordFactory::ok(&format!("/t{}", t), 1));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(collector.request_len(), 1_000);
        let stats = collector.endpoint_stats();
        assert_eq!(stats.values().map(|s| s.count).sum::<u64>(), 1_000);
    }

    // ==================== Aggregator ====================

    #[test]
    fn test_summary_percentiles_and_breakdown() {
        let now = Utc::now();
        let mut records: Vec<_> = (1..=10)
            .map(|i| {
                let path = if i <= 6 { "/kitchens" } else { "/pantry" };
                RecordFactory::ok_at(path, 100 * i, now - Duration::minutes(i as i64))
            })
            .collect();
        records[9] = records[9].clone().with_error_code(Some("DATABASE_ERROR".to_string()));

        let summary = summarize(&records, 1, now);
        let report = summary.report().expect("records in window");

        assert_eq!(report.total_requests, 10);
        assert_approx_eq!(report.response_times.avg, 0.55);
        assert_approx_eq!(report.response_times.p95, 1.0);
        assert_approx_eq!(report.response_times.p99, 1.0);
        assert_eq!(report.top_endpoints[0], ("GET /kitchens".to_string(), 6));
        assert_eq!(report.error_breakdown.get("DATABASE_ERROR"), Some(&1));
        // status 200 with a code is not an error
        assert_approx_eq!(report.error_rate, 0.0);
    }

    #[test]
    fn test_summary_window_excludes_old_records() {
        let collector = MetricsCollector::with_capacity(100, 10);
        let now = Utc::now();
        collector.record_request(RecordFactory::ok_at("/old", 10, now - Duration::hours(3)));
        collector.record_request(RecordFactory::ok_at("/new", 10, now - Duration::minutes(5)));

        let summary = collector.get_metrics_summary_at(1, now);
        let report = summary.report().unwrap();
        assert_eq!(report.total_requests, 1);
        assert_eq!(report.top_endpoints, vec![("GET /new".to_string(), 1)]);

        assert!(collector.get_metrics_summary_at(1, now + Duration::hours(2)).report().is_none());
    }

    // ==================== Health and alerts ====================

    #[tokio::test]
    async fn test_collection_cycle_degrades_health_and_fires_once() {
        let (monitoring, _sampler) =
            monitoring_with_load(&MonitoringConfig::default(), 92.0, 40.0, 50.0);

        monitoring.run_collection_cycle().await;

        let health = monitoring.get_health_status();
        health.assert_status(HealthState::Degraded);
        health.assert_issue("High CPU usage");

        let history = monitoring.alerts().get_history(None);
        assert_eq!(alert_kinds(&history), vec![AlertKind::HighCpuUsage]);

        monitoring.run_collection_cycle().await;
        assert_eq!(monitoring.alerts().get_history(None).len(), 1);
        assert_eq!(monitoring.alerts().get_stats().suppressed, 1);
        assert_eq!(monitoring.metrics().snapshot_len(), 2);
    }

    #[tokio::test]
    async fn test_error_rate_makes_service_unhealthy() {
        let (monitoring, _sampler) =
            monitoring_with_load(&MonitoringConfig::default(), 10.0, 10.0, 10.0);

        for _ in 0..5 {
            monitoring.record_request(RecordFactory::ok("/kitchens", 20));
        }
        monitoring.record_request(RecordFactory::failed("/kitchens", 500, "DATABASE_ERROR"));

        let health = monitoring.get_health_status();
        health.assert_status(HealthState::Unhealthy);
        health.assert_issue("High error rate");
        assert_approx_eq!(health.metrics.error_rate, 1.0 / 6.0);

        monitoring.run_collection_cycle().await;
        let history = monitoring.alerts().get_history(None);
        assert!(alert_kinds(&history).contains(&AlertKind::HighErrorRate));
    }

    #[tokio::test]
    async fn test_sampling_failure_skips_snapshot_only() {
        let (monitoring, sampler) =
            monitoring_with_load(&MonitoringConfig::default(), 10.0, 10.0, 10.0);
        sampler.set(None);

        monitoring.run_collection_cycle().await;
        assert_eq!(monitoring.metrics().snapshot_len(), 0);

        let health = monitoring.get_health_status();
        health.assert_status(HealthState::Healthy);
        assert!(health.metrics.cpu_percent.is_none());
    }

    #[tokio::test]
    async fn test_background_task_collects_until_stopped() {
        let (monitoring, _sampler) =
            monitoring_with_load(&MonitoringConfig::default(), 10.0, 10.0, 10.0);

        monitoring.start_with_period(std::time::Duration::from_millis(20));
        assert!(monitoring.is_running());
        tokio::time::sleep(std::time::Duration::from_millis(120)).await;
        monitoring.stop().await;

        assert!(!monitoring.is_running());
        let collected = monitoring.metrics().snapshot_len();
        assert!(collected >= 2, "expected several snapshots, got {}", collected);

        tokio::time::sleep(std::time::Duration::from_millis(60)).await;
        assert_eq!(monitoring.metrics().snapshot_len(), collected);
    }

    #[test]
    fn test_profiler_times_operations() {
        let (monitoring, _sampler) =
            monitoring_with_load(&MonitoringConfig::default(), 10.0, 10.0, 10.0);

        {
            let _timer = monitoring.profiler().start_timer("database_query");
        }
        monitoring
            .profiler()
            .record_operation("database_query", std::time::Duration::from_millis(30));

        let stats = monitoring.get_operation_stats("database_query");
        assert_eq!(stats.count, 2);
        assert!(stats.max.unwrap() >= 0.03);
        assert_eq!(monitoring.get_operation_stats("unknown").count, 0);
    }
}
