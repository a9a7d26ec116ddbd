use crate::data::model::Curve;

// ---------------------------------------------------------------------------
// Crossing solver
// ---------------------------------------------------------------------------

/// Find the x at which `curve` first crosses `target_y`, scanning left to right.
///
/// A crossing is the first adjacent pair whose offsets `y - target_y` differ in
/// sign bit, so an offset of `+0.0` sits with the positives and `-0.0` with the
/// negatives. The crossing x is linearly interpolated on that pair; a flat pair
/// returns its left x.
///
/// When the curve never crosses the target, the x of the sample closest to it
/// is returned instead (the first one on ties). Later crossings are ignored.
pub fn find_crossing(curve: &Curve, target_y: f64) -> f64 {
    let x = curve.x();
    let y = curve.y();

    let crossing = y
        .windows(2)
        .position(|w| (w[0] - target_y).is_sign_negative() != (w[1] - target_y).is_sign_negative());

    match crossing {
        Some(i) => {
            let (x1, x2) = (x[i], x[i + 1]);
            let (y1, y2) = (y[i], y[i + 1]);
            if y1 == y2 {
                return x1;
            }
            x1 + (target_y - y1) * (x2 - x1) / (y2 - y1)
        }
        None => x[closest_index(y, target_y)],
    }
}

/// Index of the first value with the smallest distance to `target`.
fn closest_index(values: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, v) in values.iter().enumerate() {
        let dist = (v - target).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
