//! Media-time helpers. Positions are plain `f64` seconds, matching what
//! media surfaces report.

/// Clamp a position into `[0, duration]`. Unknown or non-finite durations
/// only clamp the lower bound.
#[must_use]
pub fn clamp_position(position: f64, duration: Option<f64>) -> f64 {
    let lower = if position.is_finite() { position.max(0.0) } else { 0.0 };
    match duration {
        Some(d) if d.is_finite() && d >= 0.0 => lower.min(d),
        _ => lower,
    }
}
