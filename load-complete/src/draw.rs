//! Drawing surface abstraction and the primitives emitted per frame.

use crate::geometry::{PointF, RectF};
use crate::style::StrokeStyle;
use serde::{Deserialize, Serialize};

/// Primitive draw command.
///
/// Angles are in degrees, 0° at 3 o'clock, positive sweeps clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Arc {
        oval: RectF,
        start_angle: f32,
        sweep_angle: f32,
        style: StrokeStyle,
    },
    Line {
        from: PointF,
        to: PointF,
        style: StrokeStyle,
    },
}

/// Surface the animations draw onto.
pub trait Canvas {
    fn draw_arc(&mut self, oval: RectF, start_angle: f32, sweep_angle: f32, style: &StrokeStyle);

    fn draw_line(&mut self, from: PointF, to: PointF, style: &StrokeStyle);

    /// Replays a recorded command.
    fn draw(&mut self, command: &DrawCommand) {
        match *command {
            DrawCommand::Arc {
                oval,
                start_angle,
                sweep_angle,
                ref style,
            } => self.draw_arc(oval, start_angle, sweep_angle, style),
            DrawCommand::Line { from, to, ref style } => self.draw_line(from, to, style),
        }
    }
}

/// Recording surface.
impl Canvas for Vec<DrawCommand> {
    fn draw_arc(&mut self, oval: RectF, start_angle: f32, sweep_angle: f32, style: &StrokeStyle) {
        self.push(DrawCommand::Arc {
            oval,
            start_angle,
            sweep_angle,
            style: *style,
        });
    }

    fn draw_line(&mut self, from: PointF, to: PointF, style: &StrokeStyle) {
        self.push(DrawCommand::Line {
            from,
            to,
            style: *style,
        });
    }
}
