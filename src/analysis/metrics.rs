use serde::{Deserialize, Serialize};

use super::crossing::find_crossing;
use crate::config::PhysicalParameters;
use crate::data::model::{CurveError, Measurement};

// ---------------------------------------------------------------------------
// MeasurementMode
// ---------------------------------------------------------------------------

/// How a sweep was recorded, which decides the current sign convention and
/// which figures of merit make sense.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasurementMode {
    /// Unilluminated diode sweep; reports the turn-on voltage at which the
    /// current density first reaches `threshold_ma_cm2`.
    Dark { threshold_ma_cm2: f64 },
    /// Illuminated sweep; reports Voc, Jsc, fill factor and efficiency.
    Light,
}

impl MeasurementMode {
    /// Factor applied to the raw current channel before area normalization.
    pub fn polarity(&self) -> f64 {
        match self {
            MeasurementMode::Dark { .. } => 1.0,
            MeasurementMode::Light => -1.0,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, MeasurementMode::Dark { .. })
    }

    /// Horizontal reference level on the J-V plot (mA/cm²).
    pub fn reference_current(&self) -> f64 {
        match self {
            MeasurementMode::Dark { threshold_ma_cm2 } => *threshold_ma_cm2,
            MeasurementMode::Light => 0.0,
        }
    }

    /// Column header for the voltage figure.
    pub fn voltage_label(&self) -> String {
        match self {
            MeasurementMode::Dark { threshold_ma_cm2 } => {
                format!("V_turn-on (@{threshold_ma_cm2} mA/cm²)")
            }
            MeasurementMode::Light => "Voc (V)".to_string(),
        }
    }

    /// Y axis label shared by the on-screen plot and the exported chart.
    pub fn current_axis_label(&self) -> &'static str {
        match self {
            MeasurementMode::Dark { .. } => "Diode current (mA/cm²)",
            MeasurementMode::Light => "Photocurrent (mA/cm²)",
        }
    }
}

// ---------------------------------------------------------------------------
// MetricResult
// ---------------------------------------------------------------------------

/// Figures of merit for one measurement file.
///
/// Values are kept at full precision; use [`MetricResult::rounded`] for display
/// and export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub source_name: String,
    #[serde(skip)]
    pub mode: MeasurementMode,
    /// Voc in light mode, turn-on voltage in dark mode (V).
    pub voc_or_turn_on: f64,
    /// Short-circuit current density (mA/cm²), light mode only.
    pub jsc_ma_cm2: Option<f64>,
    pub fill_factor_pct: Option<f64>,
    pub efficiency_pct: Option<f64>,
}

impl MetricResult {
    /// Copy rounded for presentation: voltages and Jsc to 4 places, FF and
    /// efficiency to 2.
    pub fn rounded(&self) -> MetricResult {
        MetricResult {
            source_name: self.source_name.clone(),
            mode: self.mode,
            voc_or_turn_on: round_to(self.voc_or_turn_on, 4),
            jsc_ma_cm2: self.jsc_ma_cm2.map(|v| round_to(v, 4)),
            fill_factor_pct: self.fill_factor_pct.map(|v| round_to(v, 2)),
            efficiency_pct: self.efficiency_pct.map(|v| round_to(v, 2)),
        }
    }
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

// ---------------------------------------------------------------------------
// Metric computation
// ---------------------------------------------------------------------------

/// Compute the figures of merit of a normalized measurement.
///
/// Fails only when the measurement has no samples.
pub fn compute_metrics(
    measurement: &Measurement,
    mode: &MeasurementMode,
    params: &PhysicalParameters,
) -> Result<MetricResult, CurveError> {
    let jv = measurement.jv_curve()?;

    let result = match *mode {
        MeasurementMode::Dark { threshold_ma_cm2 } => MetricResult {
            source_name: measurement.name.clone(),
            mode: *mode,
            voc_or_turn_on: find_crossing(&jv, threshold_ma_cm2),
            jsc_ma_cm2: None,
            fill_factor_pct: None,
            efficiency_pct: None,
        },
        MeasurementMode::Light => {
            let voc = find_crossing(&jv, 0.0);
            // Jsc is where the voltage crosses zero, so solve on V(J).
            let jsc_ma = find_crossing(&jv.swapped(), 0.0);

            let p_max = max_power(measurement);
            MetricResult {
                source_name: measurement.name.clone(),
                mode: *mode,
                voc_or_turn_on: voc,
                jsc_ma_cm2: Some(jsc_ma),
                fill_factor_pct: Some(fill_factor(p_max, jsc_ma, voc)),
                efficiency_pct: Some(efficiency(p_max, params.incident_power_w_cm2)),
            }
        }
    };

    log::debug!(
        "{}: {} = {:.4}",
        result.source_name,
        mode.voltage_label(),
        result.voc_or_turn_on
    );
    Ok(result)
}

/// Largest `J * V` over the sweep, in W/cm².
pub fn max_power(measurement: &Measurement) -> f64 {
    measurement
        .current_a_cm2
        .iter()
        .zip(&measurement.voltage)
        .map(|(j, v)| j * v)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Power conversion efficiency in percent.
pub fn efficiency(p_max_w_cm2: f64, incident_power_w_cm2: f64) -> f64 {
    100.0 * p_max_w_cm2 / incident_power_w_cm2
}

/// Fill factor in percent; exactly 0 when Jsc or Voc is zero.
pub fn fill_factor(p_max_w_cm2: f64, jsc_ma_cm2: f64, voc: f64) -> f64 {
    let jsc_a = jsc_ma_cm2 / 1000.0;
    let denom = jsc_a * voc;
    if denom != 0.0 {
        100.0 * p_max_w_cm2 / denom
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn params() -> PhysicalParameters {
        PhysicalParameters {
            area_cm2: 1.0,
            incident_power_w_cm2: 0.1,
        }
    }

    fn measurement(voltage: Vec<f64>, current_ma: Vec<f64>) -> Measurement {
        Measurement {
            name: "cell.txt".into(),
            voltage,
            current_a_cm2: current_ma.iter().map(|j| j / 1000.0).collect(),
            current_ma_cm2: current_ma,
        }
    }

    #[test]
    fn efficiency_and_fill_factor_from_figures() {
        assert_close(efficiency(0.012, 0.1), 12.0);
        assert_close(fill_factor(0.012, 20.0, 0.6), 100.0);
    }

    #[test]
    fn fill_factor_is_zero_for_degenerate_cell() {
        assert_eq!(fill_factor(0.01, 0.0, 0.6), 0.0);
        assert_eq!(fill_factor(0.01, 20.0, 0.0), 0.0);
    }

    #[test]
    fn dark_mode_reports_turn_on_only() {
        let m = measurement(vec![0.38, 0.40, 0.42], vec![0.01, 0.05, 0.15]);
        let mode = MeasurementMode::Dark {
            threshold_ma_cm2: 0.1,
        };
        let r = compute_metrics(&m, &mode, &params()).unwrap();
        assert_close(r.voc_or_turn_on, 0.41);
        assert_eq!(r.jsc_ma_cm2, None);
        assert_eq!(r.fill_factor_pct, None);
        assert_eq!(r.efficiency_pct, None);
    }

    #[test]
    fn light_mode_on_linear_cell() {
        // J = 20 * (1 - V / 0.6) mA/cm²: Pmax at V = 0.3 is 3 mW/cm².
        let voltage: Vec<f64> = (-2..=14).map(|k| k as f64 * 0.05).collect();
        let current: Vec<f64> = voltage.iter().map(|v| 20.0 * (1.0 - v / 0.6)).collect();
        let m = measurement(voltage, current);

        let r = compute_metrics(&m, &MeasurementMode::Light, &params()).unwrap();
        assert_close(r.voc_or_turn_on, 0.6);
        assert_close(r.jsc_ma_cm2.unwrap(), 20.0);
        assert_close(r.efficiency_pct.unwrap(), 3.0);
        assert_close(r.fill_factor_pct.unwrap(), 25.0);
    }

    #[test]
    fn light_mode_with_no_current_has_zero_fill_factor() {
        let m = measurement(vec![0.0, 0.5], vec![0.0, 0.0]);
        let r = compute_metrics(&m, &MeasurementMode::Light, &params()).unwrap();
        assert_eq!(r.jsc_ma_cm2, Some(0.0));
        assert_eq!(r.fill_factor_pct, Some(0.0));
    }

    #[test]
    fn empty_measurement_is_rejected() {
        let m = measurement(vec![], vec![]);
        assert_eq!(
            compute_metrics(&m, &MeasurementMode::Light, &params()),
            Err(CurveError::Empty)
        );
    }

    #[test]
    fn rounding_is_applied_per_field() {
        let r = MetricResult {
            source_name: "a".into(),
            mode: MeasurementMode::Light,
            voc_or_turn_on: 0.612_345_6,
            jsc_ma_cm2: Some(21.987_66),
            fill_factor_pct: Some(74.126),
            efficiency_pct: Some(9.994),
        }
        .rounded();
        assert_close(r.voc_or_turn_on, 0.6123);
        assert_close(r.jsc_ma_cm2.unwrap(), 21.9877);
        assert_close(r.fill_factor_pct.unwrap(), 74.13);
        assert_close(r.efficiency_pct.unwrap(), 9.99);
    }

    #[test]
    fn mode_labels() {
        let dark = MeasurementMode::Dark {
            threshold_ma_cm2: 0.1,
        };
        assert_eq!(dark.voltage_label(), "V_turn-on (@0.1 mA/cm²)");
        assert_eq!(MeasurementMode::Light.voltage_label(), "Voc (V)");
        assert_eq!(dark.polarity(), 1.0);
        assert_eq!(MeasurementMode::Light.polarity(), -1.0);
    }
}
