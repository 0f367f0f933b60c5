//! Configuration validation integration tests
//!
//! These tests verify that configuration validates correctly and fails
//! appropriately for invalid configurations.

#[cfg(test)]
mod tests {
    use kitchen_monitor::GatewayError;
    use kitchen_monitor::config::models::{
        AlertThresholds, AuthConfig, CorsConfig, MAX_ALERT_COOLDOWN_SECS, MonitoringConfig,
        ServerConfig,
    };
    use kitchen_monitor::config::Config;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // ==================== ServerConfig Validation ====================

    #[test]
    fn test_server_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        let result = config.validate();
        assert!(result.unwrap_err().contains("Port"));
    }

    #[test]
    fn test_server_zero_workers() {
        let config = ServerConfig {
            workers: Some(0),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_wildcard_with_credentials() {
        let cors = CorsConfig {
            origins: vec!["*".to_string()],
            allow_credentials: true,
        };
        assert!(cors.validate().unwrap_err().contains("credentials"));
    }

    // ==================== AuthConfig Validation ====================

    #[test]
    fn test_default_secret_is_generated_and_valid() {
        let first = AuthConfig::default();
        let second = AuthConfig::default();
        assert!(first.validate().is_ok());
        assert_ne!(first.secret_key, second.secret_key);
    }

    #[test]
    fn test_placeholder_secret_rejected() {
        let config = AuthConfig {
            secret_key: "change-me".to_string(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_token_lifetime_rejected() {
        let config = AuthConfig {
            access_token_expire_minutes: 0,
            ..AuthConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("minute"));
    }

    // ==================== MonitoringConfig Validation ====================

    #[test]
    fn test_thresholds_out_of_range() {
        let mut config = MonitoringConfig::default();
        config.alerts.thresholds = AlertThresholds {
            cpu_percent: 140.0,
            ..AlertThresholds::default()
        };
        assert!(config.validate().unwrap_err().contains("cpu_percent"));

        config.alerts.thresholds = AlertThresholds {
            error_rate: 1.5,
            ..AlertThresholds::default()
        };
        assert!(config.validate().unwrap_err().contains("error_rate"));
    }

    #[test]
    fn test_webhook_must_be_http() {
        let mut config = MonitoringConfig::default();
        config.alerts.webhook_url = Some("ftp://alerts.example.com".to_string());
        assert!(config.validate().is_err());

        config.alerts.webhook_url = Some("https://alerts.example.com/hook".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_alert_cooldown_is_bounded() {
        let mut config = MonitoringConfig::default();
        config.alerts.cooldown_secs = u64::MAX;
        assert!(config.validate().unwrap_err().contains("cooldown"));

        config.alerts.cooldown_secs = MAX_ALERT_COOLDOWN_SECS;
        assert!(config.validate().is_ok());
    }

    // ==================== File Loading ====================

    #[tokio::test]
    async fn test_full_file_with_seeded_users() {
        let yaml = r#"
server:
  port: 8123
auth:
  secret_key: "an-integration-secret-that-is-long-enough"
storage:
  database_url: "memory://"
  users:
    - id: 1
      username: "chef"
      email: "chef@example.com"
    - id: 2
      username: "porter"
      email: "porter@example.com"
      is_active: false
monitoring:
  collection_interval_secs: 15
logging:
  level: "debug"
  json: true
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.storage.users.len(), 2);
        assert!(config.storage.users[0].is_active);
        assert!(!config.storage.users[1].is_active);
        assert_eq!(config.monitoring.collection_interval_secs, 15);
        assert!(config.logging.json);
    }

    #[tokio::test]
    async fn test_duplicate_seeded_users_rejected() {
        let yaml = r#"
storage:
  users:
    - { id: 1, username: "chef", email: "a@example.com" }
    - { id: 2, username: "chef", email: "b@example.com" }
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(GatewayError::Config(msg)) if msg.contains("Duplicate")));
    }

    #[tokio::test]
    async fn test_seeded_kitchens_need_known_owner() {
        let yaml = r#"
storage:
  users:
    - { id: 1, username: "chef", email: "a@example.com" }
  kitchens:
    - { id: 10, owner_id: 1, name: "Line" }
    - { id: 11, owner_id: 2, name: "Orphan" }
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(GatewayError::Config(msg)) if msg.contains("unknown user id 2")));
    }

    #[tokio::test]
    async fn test_seeded_password_hash_must_parse() {
        let yaml = r#"
storage:
  users:
    - { id: 1, username: "chef", email: "a@example.com", password_hash: "hunter2" }
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(GatewayError::Config(msg)) if msg.contains("password_hash")));
    }

    #[tokio::test]
    async fn test_malformed_yaml_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"server: [unclosed").unwrap();

        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(GatewayError::Config(msg)) if msg.contains("parse")));
    }
}
