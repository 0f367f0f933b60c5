//! HTTP integration tests against the assembled application

#[cfg(test)]
mod tests {
    use crate::common::TestApp;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::web;
    use kitchen_monitor::monitoring::metrics::{MemoryUsage, ResourceUsage};
    use kitchen_monitor::server::HttpServer;
    use serde_json::Value;

    macro_rules! app {
        ($fixture:expr) => {
            actix_test::init_service(HttpServer::create_app(web::Data::new(
                $fixture.state.clone(),
            )))
            .await
        };
    }

    #[actix_web::test]
    async fn test_endpoint_metrics_busiest_first() {
        let fixture = TestApp::new();
        let app = app!(fixture);

        for uri in ["/health/live", "/health/live", "/health/live", "/health/ready"] {
            let req = actix_test::TestRequest::get().uri(uri).to_request();
            assert!(actix_test::call_service(&app, req).await.status().is_success());
        }

        let req = actix_test::TestRequest::get().uri("/metrics/endpoints").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        let endpoints = body["data"]["endpoints"].as_array().unwrap();

        assert_eq!(endpoints[0]["endpoint"], "GET /health/live");
        assert_eq!(endpoints[0]["request_count"], 3);
        assert_eq!(endpoints[1]["endpoint"], "GET /health/ready");
        assert_eq!(endpoints[1]["error_rate"], 0.0);
    }

    #[actix_web::test]
    async fn test_error_metrics_break_down_by_status_and_code() {
        let fixture = TestApp::new();
        let app = app!(fixture);

        let req = actix_test::TestRequest::get().uri("/missing").to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        let req = actix_test::TestRequest::get().uri("/dashboard/overview").to_request();
        assert_eq!(
            actix_test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = actix_test::TestRequest::get().uri("/metrics/errors").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        let data = &body["data"];

        assert_eq!(data["total_errors"], 2);
        assert_eq!(data["status_code_breakdown"]["404"], 1);
        assert_eq!(data["status_code_breakdown"]["401"], 1);
        assert_eq!(data["error_code_breakdown"]["RESOURCE_NOT_FOUND"], 1);
        assert_eq!(data["error_code_breakdown"]["MISSING_TOKEN"], 1);
        assert_eq!(data["recent_errors"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_user_activity_tracks_authenticated_requests() {
        let fixture = TestApp::new();
        let app = app!(fixture);

        for _ in 0..2 {
            let req = actix_test::TestRequest::get()
                .uri("/dashboard/performance")
                .insert_header(fixture.auth_header())
                .to_request();
            assert!(actix_test::call_service(&app, req).await.status().is_success());
        }

        let req = actix_test::TestRequest::get().uri("/metrics/users").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        let key = fixture.user_id.to_string();

        assert_eq!(body["data"]["active_user_count"], 1);
        assert_eq!(body["data"]["active_users"][key.as_str()]["request_count"], 2);
    }

    #[actix_web::test]
    async fn test_performance_metrics_list_timed_operations() {
        let fixture = TestApp::new();
        let app = app!(fixture);

        let req = actix_test::TestRequest::get().uri("/metrics/performance").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert!(body["data"]["operations"].as_object().unwrap().is_empty());

        let req = actix_test::TestRequest::get()
            .uri("/dashboard/overview")
            .insert_header(fixture.auth_header())
            .to_request();
        assert!(actix_test::call_service(&app, req).await.status().is_success());

        let req = actix_test::TestRequest::get().uri("/metrics/performance").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        let operations = &body["data"]["operations"];
        assert_eq!(operations["authentication"]["count"], 1);
        assert_eq!(operations["database_query"]["count"], 1);
    }

    #[actix_web::test]
    async fn test_request_chart_buckets_cover_period() {
        let fixture = TestApp::new();
        let app = app!(fixture);

        for _ in 0..3 {
            let req = actix_test::TestRequest::get().uri("/health/live").to_request();
            actix_test::call_service(&app, req).await;
        }

        let req = actix_test::TestRequest::get()
            .uri("/dashboard/charts/requests?hours=1&interval_minutes=5")
            .insert_header(fixture.auth_header())
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        let data = &body["data"];

        assert_eq!(data["period_hours"], 1);
        assert_eq!(data["interval_minutes"], 5);
        let counts = data["data"]["request_counts"].as_array().unwrap();
        assert_eq!(counts.len(), 12);
        let total: u64 = counts.iter().map(|p| p["value"].as_u64().unwrap()).sum();
        assert_eq!(total, 3);
    }

    #[actix_web::test]
    async fn test_request_chart_rejects_tiny_interval() {
        let fixture = TestApp::new();
        let app = app!(fixture);

        let req = actix_test::TestRequest::get()
            .uri("/dashboard/charts/requests?interval_minutes=1")
            .insert_header(fixture.auth_header())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_dashboard_alerts_show_current_and_history() {
        let fixture = TestApp::new();
        fixture.sampler.set(Some(ResourceUsage {
            cpu_percent: 10.0,
            memory: MemoryUsage {
                percent: 96.0,
                ..Default::default()
            },
            ..Default::default()
        }));
        fixture.state.monitoring.run_collection_cycle().await;
        let app = app!(fixture);

        let req = actix_test::TestRequest::get()
            .uri("/dashboard/alerts")
            .insert_header(fixture.auth_header())
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        let data = &body["data"];

        assert_eq!(data["alert_summary"]["total_active"], 1);
        assert_eq!(data["alert_summary"]["critical_count"], 1);
        assert_eq!(data["current_alerts"][0]["type"], "high_memory_usage");
        assert_eq!(data["alert_history"].as_array().unwrap().len(), 1);
        assert_eq!(data["thresholds"]["memory_percent"], 85.0);
    }

    #[actix_web::test]
    async fn test_system_chart_follows_snapshots() {
        let fixture = TestApp::new();
        fixture.state.monitoring.run_collection_cycle().await;
        fixture.state.monitoring.run_collection_cycle().await;
        let app = app!(fixture);

        let req = actix_test::TestRequest::get()
            .uri("/dashboard/charts/system?hours=1")
            .insert_header(fixture.auth_header())
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        let cpu = body["data"]["data"]["cpu_usage"].as_array().unwrap();

        assert_eq!(cpu.len(), 2);
        assert_eq!(cpu[0]["value"], 25.0);
    }
}
