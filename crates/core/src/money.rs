//! Monetary rounding.

/// Round to two decimal places, halves toward positive infinity.
///
/// Non-finite inputs are returned unchanged, as are magnitudes too large to
/// scale by 100 (they carry no fractional cents anyway).
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    (scaled + 0.5).floor() / 100.0
}
