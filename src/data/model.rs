use thiserror::Error;

use crate::analysis::metrics::MeasurementMode;
use crate::config::PhysicalParameters;

// ---------------------------------------------------------------------------
// Curve – sampled (x, y) pairs, sorted by x
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    #[error("curve has no samples")]
    Empty,
    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },
}

/// A non-empty sampled curve, sorted ascending by x.
///
/// Sorting is stable, so samples sharing an x value keep the order they were
/// recorded in. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Curve {
    /// Build a curve from parallel x / y slices, sorting by x.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, CurveError> {
        if x.len() != y.len() {
            return Err(CurveError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(CurveError::Empty);
        }

        let order = sorted_order(x);
        Ok(Curve {
            x: order.iter().map(|&i| x[i]).collect(),
            y: order.iter().map(|&i| y[i]).collect(),
        })
    }

    /// The same samples with the axes exchanged, re-sorted by the new x.
    pub fn swapped(&self) -> Curve {
        let order = sorted_order(&self.y);
        Curve {
            x: order.iter().map(|&i| self.y[i]).collect(),
            y: order.iter().map(|&i| self.x[i]).collect(),
        }
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

/// Indices that stably sort `values` ascending.
pub fn sorted_order(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    order
}

// ---------------------------------------------------------------------------
// Raw and normalized measurements
// ---------------------------------------------------------------------------

/// Two instrument channels exactly as read from a file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMeasurement {
    /// Source file name (used as series / row label).
    pub name: String,
    /// Raw current in A.
    pub current: Vec<f64>,
    /// Applied voltage in V.
    pub voltage: Vec<f64>,
}

/// A measurement after polarity correction and area normalization, sorted by
/// voltage ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub voltage: Vec<f64>,
    /// Current density in A/cm².
    pub current_a_cm2: Vec<f64>,
    /// Current density in mA/cm².
    pub current_ma_cm2: Vec<f64>,
}

impl Measurement {
    /// Normalize raw channels: `polarity * I / area`, scaled to mA/cm², and
    /// all channels reordered by voltage.
    pub fn from_raw(
        raw: &RawMeasurement,
        mode: &MeasurementMode,
        params: &PhysicalParameters,
    ) -> Measurement {
        let polarity = mode.polarity();
        let density: Vec<f64> = raw
            .current
            .iter()
            .map(|&i| polarity * i / params.area_cm2)
            .collect();

        let order = sorted_order(&raw.voltage);
        let voltage: Vec<f64> = order.iter().map(|&i| raw.voltage[i]).collect();
        let current_a_cm2: Vec<f64> = order.iter().map(|&i| density[i]).collect();
        let current_ma_cm2 = current_a_cm2.iter().map(|j| j * 1000.0).collect();

        Measurement {
            name: raw.name.clone(),
            voltage,
            current_a_cm2,
            current_ma_cm2,
        }
    }

    /// Current density (mA/cm²) as a function of voltage.
    pub fn jv_curve(&self) -> Result<Curve, CurveError> {
        Curve::new(&self.voltage, &self.current_ma_cm2)
    }

    pub fn len(&self) -> usize {
        self.voltage.len()
    }
}
