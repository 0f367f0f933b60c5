//! Custom test assertions

use kitchen_monitor::monitoring::health::HealthReport;
use kitchen_monitor::monitoring::{Alert, AlertKind, HealthState};

/// Assert two values are approximately equal (for floats)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        assert_approx_eq!($left, $right, 1e-9_f64)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < $epsilon,
            "assertion failed: `{} ≈ {}` (epsilon: {})",
            left,
            right,
            $epsilon
        );
    };
}

/// Assertions for health reports
pub trait HealthReportAssertions {
    fn assert_status(&self, expected: HealthState);

    fn assert_issue(&self, issue: &str);
}

impl HealthReportAssertions for HealthReport {
    fn assert_status(&self, expected: HealthState) {
        assert_eq!(
            self.status, expected,
            "Expected health {:?}, got {:?} with issues {:?}",
            expected, self.status, self.issues
        );
    }

    fn assert_issue(&self, issue: &str) {
        assert!(
            self.issues.iter().any(|i| i == issue),
            "Expected issue {:?} in {:?}",
            issue,
            self.issues
        );
    }
}

/// Kinds of the given alerts, in order
pub fn alert_kinds(alerts: &[Alert]) -> Vec<AlertKind> {
    alerts.iter().map(|a| a.kind).collect()
}
