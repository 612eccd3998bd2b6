//! Text and bar values for the live display.

use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedOrientation;

/// Display values for the three orientation angles.
///
/// Follows the readout layout: X shows beta, Y shows gamma, Z shows alpha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationReadout {
    pub beta_text: String,
    pub gamma_text: String,
    pub alpha_text: String,

    /// Bar fill percentages, clamped to `[0, 100]`.
    pub beta_bar: f64,
    pub gamma_bar: f64,
    pub alpha_bar: f64,
}

impl OrientationReadout {
    pub fn from_orientation(orientation: &NormalizedOrientation) -> Self {
        let beta = orientation.beta.unwrap_or(0.0);
        let gamma = orientation.gamma.unwrap_or(0.0);
        let alpha = orientation.alpha.unwrap_or(0.0);

        Self {
            beta_text: format_angle(orientation.beta),
            gamma_text: format_angle(orientation.gamma),
            alpha_text: format_angle(orientation.alpha),
            beta_bar: bar_percent((beta + 180.0) / 3.6),
            gamma_bar: bar_percent((gamma + 90.0) / 1.8),
            alpha_bar: bar_percent(alpha / 3.6),
        }
    }
}

/// Format an angle with two decimals. Absent reads as `"0.00"`, and so does
/// a genuine zero of either sign.
pub fn format_angle(angle: Option<f64>) -> String {
    match angle {
        Some(v) if v != 0.0 => format!("{v:.2}"),
        _ => "0.00".to_string(),
    }
}

/// Format a speed in ft/s with two decimals.
pub fn format_speed(speed_ft_s: f64) -> String {
    if speed_ft_s == 0.0 {
        return "0.00".to_string();
    }
    format!("{speed_ft_s:.2}")
}

fn bar_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_zero_reads_as_zero() {
        assert_eq!(format_angle(Some(0.0)), "0.00");
        assert_eq!(format_angle(Some(-0.0)), "0.00");
    }

    #[test]
    fn test_absent_reads_as_zero() {
        assert_eq!(format_angle(None), "0.00");
    }

    #[test]
    fn test_angle_rounding() {
        assert_eq!(format_angle(Some(12.345_6)), "12.35");
        assert_eq!(format_angle(Some(-89.999)), "-90.00");
    }

    #[test]
    fn test_bars_from_orientation() {
        let readout = OrientationReadout::from_orientation(&NormalizedOrientation {
            alpha: Some(180.0),
            beta: Some(0.0),
            gamma: Some(-90.0),
        });
        assert!((readout.beta_bar - 50.0).abs() < 1e-9);
        assert!((readout.gamma_bar - 0.0).abs() < 1e-9);
        assert!((readout.alpha_bar - 50.0).abs() < 1e-9);
        assert_eq!(readout.beta_text, "0.00");
        assert_eq!(readout.gamma_text, "-90.00");
    }

    #[test]
    fn test_bars_clamped() {
        let readout = OrientationReadout::from_orientation(&NormalizedOrientation {
            alpha: Some(400.0),
            beta: Some(-200.0),
            gamma: None,
        });
        assert_eq!(readout.alpha_bar, 100.0);
        assert_eq!(readout.beta_bar, 0.0);
        assert!((readout.gamma_bar - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(0.0), "0.00");
        assert_eq!(format_speed(6.56168), "6.56");
    }
}
