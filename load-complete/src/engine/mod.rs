//! Frame generation.
//!
//! A frame is a pure function of the status, the time elapsed since the
//! status clock was reset, the widget bounds and the stroke style. Scheduling
//! the next frame is left to the caller, see [`crate::view`].

use crate::draw::{Canvas, DrawCommand};
use crate::geometry::{Bounds, Square};
use crate::style::StrokeStyle;
use serde::{Deserialize, Serialize};

pub mod animations;

/// Which animation the widget shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Dismissed,
    Loading,
    Complete,
}

/// Returned by [`Animation::animate`]
#[derive(Debug, Eq, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum AnimationState {
    /// The animation is finished and shouldn't be called again
    Finished,
    /// The animation is still running
    Running,
    /// The cycle is over: reset the clock and play again from the start
    Restart,
}

impl AnimationState {
    /// Whether the caller should produce another frame.
    #[must_use]
    pub fn wants_next_frame(&self) -> bool {
        *self != AnimationState::Finished
    }
}

/// Time-driven animation.
pub trait Animation {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Draws the pose at `elapsed_ms` since the animation started.
    fn animate(
        &self,
        canvas: &mut dyn Canvas,
        elapsed_ms: f32,
        square: &Square,
        style: &StrokeStyle,
    ) -> AnimationState;
}

/// Output of [`render_frame`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    pub state: AnimationState,
}

impl StatusKind {
    /// Dismissed has no animation.
    #[must_use]
    pub fn animation(self) -> Option<&'static dyn Animation> {
        match self {
            StatusKind::Dismissed => None,
            StatusKind::Loading => Some(&animations::Spinner),
            StatusKind::Complete => Some(&animations::Checkmark),
        }
    }
}

/// Draws the frame for `kind` at `elapsed_ms` onto `canvas`.
#[allow(clippy::cast_precision_loss)]
pub fn render(
    kind: StatusKind,
    elapsed_ms: u64,
    bounds: &Bounds,
    style: &StrokeStyle,
    canvas: &mut dyn Canvas,
) -> AnimationState {
    let Some(animation) = kind.animation() else {
        return AnimationState::Finished;
    };
    let square = bounds.square();
    tracing::trace!(
        animation = animation.name(),
        elapsed_ms,
        radius = square.radius,
        "rendering frame"
    );
    animation.animate(canvas, elapsed_ms as f32, &square, style)
}

/// Pure frame generator: the commands for `kind` at `elapsed_ms`.
#[must_use]
pub fn render_frame(
    kind: StatusKind,
    elapsed_ms: u64,
    bounds: &Bounds,
    style: &StrokeStyle,
) -> Frame {
    let mut commands: Vec<DrawCommand> = Vec::new();
    let state = render(kind, elapsed_ms, bounds, style, &mut commands);
    Frame { commands, state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use load_complete_rgb::Argb;

    #[test]
    fn test_dismissed_draws_nothing() {
        let style = StrokeStyle::new(Argb::BLACK, 4.0);
        for elapsed in [0, 100, 5_000] {
            let frame = render_frame(
                StatusKind::Dismissed,
                elapsed,
                &Bounds::new(100, 100),
                &style,
            );
            assert!(frame.commands.is_empty());
            assert_eq!(frame.state, AnimationState::Finished);
            assert!(!frame.state.wants_next_frame());
        }
    }

    #[test]
    fn test_animation_names() {
        let spinner = StatusKind::Loading.animation().unwrap();
        assert!(spinner.name().ends_with("Spinner"));
        let checkmark = StatusKind::Complete.animation().unwrap();
        assert!(checkmark.name().ends_with("Checkmark"));
    }
}
