use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::metrics::MeasurementMode;

// ---------------------------------------------------------------------------
// Analysis configuration
// ---------------------------------------------------------------------------

/// Sample area and illumination used to normalize currents and compute
/// efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalParameters {
    /// Active cell area in cm².
    pub area_cm2: f64,
    /// Incident light power in W/cm².
    pub incident_power_w_cm2: f64,
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            area_cm2: 0.121,
            incident_power_w_cm2: 0.1,
        }
    }
}

/// Initial visible window of the J-V plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for PlotBounds {
    fn default() -> Self {
        Self {
            x_min: -0.1,
            x_max: 1.5,
            y_min: -1.0,
            y_max: 20.0,
        }
    }
}

/// Everything the parameter form produces. Passed by reference into the
/// analysis so nothing depends on widget state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub mode: MeasurementMode,
    pub params: PhysicalParameters,
    pub plot: PlotBounds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: MeasurementMode::Dark {
                threshold_ma_cm2: DEFAULT_DARK_THRESHOLD,
            },
            params: PhysicalParameters::default(),
            plot: PlotBounds::default(),
        }
    }
}

/// Turn-on threshold offered when switching to dark mode (mA/cm²).
pub const DEFAULT_DARK_THRESHOLD: f64 = 0.1;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("area must be a positive number (got {0})")]
    Area(f64),
    #[error("incident power must be a positive number (got {0})")]
    IncidentPower(f64),
    #[error("dark threshold must be finite (got {0})")]
    Threshold(f64),
    #[error("plot limits must satisfy min < max on both axes")]
    PlotBounds,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.params;
        if !(p.area_cm2.is_finite() && p.area_cm2 > 0.0) {
            return Err(ConfigError::Area(p.area_cm2));
        }
        if !(p.incident_power_w_cm2.is_finite() && p.incident_power_w_cm2 > 0.0) {
            return Err(ConfigError::IncidentPower(p.incident_power_w_cm2));
        }
        if let MeasurementMode::Dark { threshold_ma_cm2 } = self.mode {
            if !threshold_ma_cm2.is_finite() {
                return Err(ConfigError::Threshold(threshold_ma_cm2));
            }
        }
        let b = &self.plot;
        if !(b.x_min < b.x_max && b.y_min < b.y_max) {
            return Err(ConfigError::PlotBounds);
        }
        Ok(())
    }

    /// Same config with the mode switched, keeping the last dark threshold.
    pub fn with_dark(mut self, dark: bool, threshold_ma_cm2: f64) -> Self {
        self.mode = if dark {
            MeasurementMode::Dark { threshold_ma_cm2 }
        } else {
            MeasurementMode::Light
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AnalysisConfig::default();
        assert!(cfg.mode.is_dark());
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_area_and_power() {
        let mut cfg = AnalysisConfig::default();
        cfg.params.area_cm2 = 0.0;
        assert_eq!(cfg.validate(), Err(ConfigError::Area(0.0)));

        let mut cfg = AnalysisConfig::default();
        cfg.params.incident_power_w_cm2 = -0.1;
        assert_eq!(cfg.validate(), Err(ConfigError::IncidentPower(-0.1)));
    }

    #[test]
    fn rejects_inverted_plot_bounds() {
        let mut cfg = AnalysisConfig::default();
        cfg.plot.x_min = 2.0;
        assert_eq!(cfg.validate(), Err(ConfigError::PlotBounds));
    }

    #[test]
    fn mode_switch_keeps_threshold() {
        let cfg = AnalysisConfig::default().with_dark(false, 0.3);
        assert_eq!(cfg.mode, MeasurementMode::Light);
        let cfg = cfg.with_dark(true, 0.3);
        assert_eq!(
            cfg.mode,
            MeasurementMode::Dark {
                threshold_ma_cm2: 0.3
            }
        );
    }

    #[test]
    fn serializes_mode_with_tag() {
        let json = serde_json::to_string(&AnalysisConfig::default().mode).unwrap();
        assert_eq!(json, r#"{"kind":"dark","threshold_ma_cm2":0.1}"#);
    }
}
