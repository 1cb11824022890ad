//! Time remapping shared by every animation phase.

use std::f32::consts::PI;

/// Accelerate/decelerate curve: starts and ends slowly, fastest in the middle.
///
/// `t` is the normalized time fraction, clamped to `[0, 1]`. The curve is
/// symmetric around `(0.5, 0.5)` and maps `0 -> 0` and `1 -> 1`.
#[must_use]
pub fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}
