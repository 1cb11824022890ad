//! Loading spinner: an arc that grows counter-clockwise to 315°, then
//! retracts towards its end, then stays blank for a short pause.

use crate::draw::Canvas;
use crate::easing::ease;
use crate::engine::{Animation, AnimationState};
use crate::geometry::Square;
use crate::style::StrokeStyle;

/// Visible part of one cycle, growth and retraction.
pub const LOADING_DURATION_MS: f32 = 1500.0;
/// Blank pause at the end of a cycle.
pub const LOADING_PAUSE_MS: f32 = 200.0;
const MAX_SWEEP_DEG: f32 = 315.0;
/// Fixed end of the arc while it grows.
const GROW_END_DEG: f32 = 225.0;
/// Fixed start of the arc while it retracts, 12 o'clock.
const RETRACT_START_DEG: f32 = -90.0;

/// Periodic loading arc.
pub struct Spinner;

impl Animation for Spinner {
    fn animate(
        &self,
        canvas: &mut dyn Canvas,
        elapsed_ms: f32,
        square: &Square,
        style: &StrokeStyle,
    ) -> AnimationState {
        let half_time = LOADING_DURATION_MS / 2.0;
        if elapsed_ms < half_time {
            let sweep = MAX_SWEEP_DEG * ease(elapsed_ms / half_time);
            canvas.draw_arc(
                square.arc_oval(style.width),
                GROW_END_DEG - sweep,
                sweep,
                style,
            );
        } else if elapsed_ms < LOADING_DURATION_MS {
            let retracted = MAX_SWEEP_DEG * ease((elapsed_ms - half_time) / half_time);
            canvas.draw_arc(
                square.arc_oval(style.width),
                RETRACT_START_DEG,
                MAX_SWEEP_DEG - retracted,
                style,
            );
        } else if elapsed_ms >= LOADING_DURATION_MS + LOADING_PAUSE_MS {
            return AnimationState::Restart;
        }
        AnimationState::Running
    }
}
