//! Float comparison with relative tolerance

/// Relative tolerance used when checking conversions round-trip
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Compare two floats with a relative tolerance.
///
/// Values near zero fall back to an absolute comparison against `tolerance`,
/// since a relative error is meaningless there.
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let scale = a.abs().max(b.abs());
    if scale < 1.0 {
        (a - b).abs() <= tolerance
    } else {
        (a - b).abs() <= tolerance * scale
    }
}
