//! Completion animation: a checkmark drawn stroke by stroke, then a circle
//! closing around it.
//!
//! ```text
//!  0ms        225ms       450ms                  900ms
//!  |-- short --|-- long --|-------- circle --------|
//! ```
//!
//! The circle ends at 328° so that it meets the tip of the long stroke; the
//! long stroke length factor comes from the same construction (law of
//! cosines on the inset circle).

use crate::draw::Canvas;
use crate::easing::ease;
use crate::engine::{Animation, AnimationState};
use crate::geometry::{PointF, Square};
use crate::style::StrokeStyle;

pub const COMPLETE_DURATION_MS: f32 = 900.0;
const QUARTER_TIME_MS: f32 = COMPLETE_DURATION_MS / 4.0;
const HALF_TIME_MS: f32 = COMPLETE_DURATION_MS / 2.0;
/// `(3 + √158) / 18`
pub const LONG_STROKE_FACTOR: f32 = 0.864_989_2;
pub const CIRCLE_SWEEP_DEG: f32 = 328.0;

/// One-shot checkmark and circle.
pub struct Checkmark;

impl Animation for Checkmark {
    fn animate(
        &self,
        canvas: &mut dyn Canvas,
        elapsed_ms: f32,
        square: &Square,
        style: &StrokeStyle,
    ) -> AnimationState {
        let Square { center, radius } = *square;

        // short stroke, down-right
        let delta = if elapsed_ms < QUARTER_TIME_MS {
            radius / 2.0 * elapsed_ms / QUARTER_TIME_MS
        } else {
            radius / 2.0
        };
        let start = PointF::new(center.x - radius / 2.0, center.y - radius / 6.0);
        canvas.draw_line(start, start.offset(delta, delta), style);

        // long stroke, up-right
        if elapsed_ms > QUARTER_TIME_MS {
            let full = LONG_STROKE_FACTOR * (radius - style.width / 2.0);
            let delta = if elapsed_ms < HALF_TIME_MS {
                full * (elapsed_ms - QUARTER_TIME_MS) / QUARTER_TIME_MS
            } else {
                full
            };
            let start = PointF::new(center.x, center.y + radius / 3.0);
            canvas.draw_line(start, start.offset(delta, -delta), style);
        }

        // circle, closing counter-clockwise onto the long stroke
        if elapsed_ms > HALF_TIME_MS {
            let sweep = if elapsed_ms < COMPLETE_DURATION_MS {
                CIRCLE_SWEEP_DEG * ease((elapsed_ms - HALF_TIME_MS) / HALF_TIME_MS)
            } else {
                CIRCLE_SWEEP_DEG
            };
            canvas.draw_arc(
                square.arc_oval(style.width),
                CIRCLE_SWEEP_DEG - sweep,
                sweep,
                style,
            );
        }

        if elapsed_ms > COMPLETE_DURATION_MS {
            AnimationState::Finished
        } else {
            AnimationState::Running
        }
    }
}
