use crate::domain::value_objects::{StatusLevel, Thresholds};

/// Maps a percentage onto a status tier.
///
/// `p < warning` is healthy, `warning <= p < critical` is a warning and
/// anything else is critical, including values above 100 and NaN.
#[must_use]
pub fn classify(percent: f64, thresholds: &Thresholds) -> StatusLevel {
    if percent < thresholds.warning() {
        StatusLevel::Healthy
    } else if percent < thresholds.critical() {
        StatusLevel::Warning
    } else {
        StatusLevel::Critical
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn thresholds(warning: f64, critical: f64) -> Thresholds {
        Thresholds::new(warning, critical).expect("valid thresholds")
    }

    #[test]
    fn below_warning_is_healthy() {
        let t = Thresholds::default();
        assert_eq!(classify(0.0, &t), StatusLevel::Healthy);
        assert_eq!(classify(59.99, &t), StatusLevel::Healthy);
    }

    #[test]
    fn warning_boundary_is_inclusive() {
        let t = Thresholds::default();
        assert_eq!(classify(60.0, &t), StatusLevel::Warning);
        assert_eq!(classify(79.99, &t), StatusLevel::Warning);
    }

    #[test]
    fn critical_boundary_is_inclusive() {
        let t = Thresholds::default();
        assert_eq!(classify(80.0, &t), StatusLevel::Critical);
        assert_eq!(classify(100.0, &t), StatusLevel::Critical);
    }

    #[test]
    fn above_hundred_and_nan_are_critical() {
        let t = Thresholds::default();
        assert_eq!(classify(250.0, &t), StatusLevel::Critical);
        assert_eq!(classify(f64::NAN, &t), StatusLevel::Critical);
    }

    #[test]
    fn custom_cutoffs_hold_for_a_sweep() {
        let t = thresholds(25.0, 75.0);
        for step in 0..=1100 {
            let p = f64::from(step) / 10.0;
            let expected = if p < 25.0 {
                StatusLevel::Healthy
            } else if p < 75.0 {
                StatusLevel::Warning
            } else {
                StatusLevel::Critical
            };
            assert_eq!(classify(p, &t), expected, "percent {p}");
        }
    }
}
