//! The widget: status machine, stroke style and completion callback.

use crate::clock::{Clock, SystemClock};
use crate::draw::Canvas;
use crate::engine::{self, AnimationState, StatusKind};
use crate::geometry::Bounds;
use crate::measure::{self, MeasureSpec};
use crate::style::{Density, StrokeStyle, ViewAttributes};
use load_complete_rgb::Argb;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, trace, warn};

/// Current status. Each variant carries the clock it was started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Dismissed,
    Loading {
        started_at_ms: u64,
    },
    Complete {
        started_at_ms: u64,
        /// Cleared the instant the completion callback is delivered.
        callback_armed: bool,
    },
}

impl Status {
    #[must_use]
    pub fn kind(&self) -> StatusKind {
        match self {
            Status::Dismissed => StatusKind::Dismissed,
            Status::Loading { .. } => StatusKind::Loading,
            Status::Complete { .. } => StatusKind::Complete,
        }
    }

    fn started_at_ms(&self) -> Option<u64> {
        match *self {
            Status::Dismissed => None,
            Status::Loading { started_at_ms } | Status::Complete { started_at_ms, .. } => {
                Some(started_at_ms)
            }
        }
    }
}

/// Host hook asking for a new frame as soon as possible.
pub trait Invalidate {
    fn invalidate(&self);
}

impl<F: Fn()> Invalidate for F {
    fn invalidate(&self) {
        self()
    }
}

/// Redraw request flag shared between the view and the host frame loop.
#[derive(Debug, Default, Clone)]
pub struct RedrawFlag(Arc<AtomicBool>);

impl RedrawFlag {
    /// Returns whether a redraw was requested, and clears the request.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Invalidate for RedrawFlag {
    fn invalidate(&self) {
        self.0.store(true, Ordering::Release);
    }
}

type CompletionCallback = Box<dyn FnMut() + Send>;

/// Loading spinner and checkmark completion widget.
///
/// All methods are meant to be called from the single thread that renders
/// the widget. The completion callback runs synchronously inside
/// [`LoadCompleteView::on_draw`] and must not block.
pub struct LoadCompleteView<C = SystemClock, H = RedrawFlag> {
    clock: C,
    host: H,
    density: Density,
    status: Status,
    style: StrokeStyle,
    on_complete: Option<CompletionCallback>,
}

impl<C: Clock, H: Invalidate> LoadCompleteView<C, H> {
    /// Creates a dismissed view styled by `attributes`.
    pub fn new(clock: C, host: H, attributes: &ViewAttributes, density: Density) -> Self {
        let style = attributes.resolve(density);
        debug!(?style, ?density, "created view");
        Self {
            clock,
            host,
            density,
            status: Status::Dismissed,
            style,
            on_complete: None,
        }
    }

    pub fn start_loading(&mut self) {
        let started_at_ms = self.clock.now_ms();
        self.transition(Status::Loading { started_at_ms });
    }

    pub fn complete(&mut self) {
        let started_at_ms = self.clock.now_ms();
        self.transition(Status::Complete {
            started_at_ms,
            callback_armed: true,
        });
    }

    pub fn dismiss(&mut self) {
        self.transition(Status::Dismissed);
    }

    fn transition(&mut self, status: Status) {
        debug!(from = ?self.status.kind(), to = ?status.kind(), "status changed");
        self.status = status;
        self.host.invalidate();
    }

    /// Takes effect on the next frame.
    pub fn set_color(&mut self, color: Argb) {
        self.style.color = color;
    }

    /// Takes effect on the next frame. Negative widths are clamped to 0.
    pub fn set_stroke_width(&mut self, width_px: f32) {
        if width_px < 0.0 {
            warn!(width_px, "negative stroke width, clamping to 0");
        }
        self.style.width = width_px.max(0.0);
    }

    /// Replaces any previously registered callback.
    pub fn set_completion_callback(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn clear_completion_callback(&mut self) {
        self.on_complete = None;
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    #[must_use]
    pub fn density(&self) -> Density {
        self.density
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Time since the status clock was last reset, `None` when dismissed.
    #[must_use]
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.status
            .started_at_ms()
            .map(|started_at_ms| self.clock.now_ms().saturating_sub(started_at_ms))
    }

    /// Measured `(width, height)` for the given constraints.
    #[must_use]
    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> (i32, i32) {
        measure::measure(width, height, self.density)
    }

    /// Draws the current frame and schedules the next one while the animation
    /// runs. Delivers the completion callback once the checkmark is done.
    pub fn on_draw(&mut self, bounds: &Bounds, canvas: &mut dyn Canvas) -> AnimationState {
        let Some(started_at_ms) = self.status.started_at_ms() else {
            return AnimationState::Finished;
        };
        let now_ms = self.clock.now_ms();
        let elapsed_ms = now_ms.saturating_sub(started_at_ms);
        let state = engine::render(self.status.kind(), elapsed_ms, bounds, &self.style, canvas);
        trace!(elapsed_ms, ?state, "frame drawn");

        match (state, &mut self.status) {
            (AnimationState::Running, _) => self.host.invalidate(),
            (AnimationState::Restart, Status::Loading { started_at_ms }) => {
                *started_at_ms = now_ms;
                self.host.invalidate();
            }
            (AnimationState::Restart, _) => self.host.invalidate(),
            (
                AnimationState::Finished,
                Status::Complete {
                    callback_armed: armed @ true,
                    ..
                },
            ) => {
                if let Some(on_complete) = self.on_complete.as_mut() {
                    *armed = false;
                    info!("completion animation finished");
                    on_complete();
                }
            }
            (AnimationState::Finished, _) => {}
        }
        state
    }
}

impl<C, H> fmt::Debug for LoadCompleteView<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadCompleteView")
            .field("density", &self.density)
            .field("status", &self.status)
            .field("style", &self.style)
            .field("has_callback", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}
