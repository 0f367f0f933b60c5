//! Helper functions for metrics calculations

/// Value at index `floor(len * p)` of an ascending slice, clamped to the last
/// element. No interpolation. Returns 0.0 for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let index = ((sorted.len() as f64) * p) as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Sort ascending; NaN values order last
pub fn sort_ascending(values: &mut [f64]) {
    values.sort_by(|a, b| a.total_cmp(b));
}
