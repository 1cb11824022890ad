//! Headless host: feeds events to the view and paints frames on a fixed
//! cadence, printing every frame as a JSON line.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use eyre::{Result, WrapErr};
use futures::future::{self, Either};
use futures::StreamExt;
use load_complete::clock::Clock;
use load_complete::draw::DrawCommand;
use load_complete::geometry::Bounds;
use load_complete::view::RedrawFlag;
use load_complete::{AnimationState, Argb, LoadCompleteView, StatusKind};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time;
use tokio_stream::wrappers::{IntervalStream, UnboundedReceiverStream};
use tracing::{debug, info};

pub const FRAMES_PER_SECOND: u64 = 60;

/// Operations a host application performs on the view.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Event {
    StartLoading,
    Complete,
    Dismiss,
    SetColor { color: Argb },
    SetStrokeWidth { width_px: f32 },
}

/// One painted frame, as printed on stdout.
#[derive(Debug, Serialize)]
pub struct FrameRecord<'a> {
    pub frame: u64,
    pub status: StatusKind,
    pub elapsed_ms: Option<u64>,
    pub state: AnimationState,
    pub commands: &'a [DrawCommand],
}

pub struct Host<C, W> {
    view: LoadCompleteView<C, RedrawFlag>,
    redraw: RedrawFlag,
    bounds: Bounds,
    completions: Arc<AtomicUsize>,
    frames: u64,
    output: Option<W>,
    commands: Vec<DrawCommand>,
}

impl<C: Clock, W: Write> Host<C, W> {
    /// `output` is `None` to paint without printing.
    pub fn new(
        mut view: LoadCompleteView<C, RedrawFlag>,
        redraw: RedrawFlag,
        bounds: Bounds,
        output: Option<W>,
    ) -> Self {
        let completions = Arc::new(AtomicUsize::new(0));
        let completions_in_callback = Arc::clone(&completions);
        view.set_completion_callback(move || {
            completions_in_callback.fetch_add(1, Ordering::Relaxed);
        });
        Self {
            view,
            redraw,
            bounds,
            completions,
            frames: 0,
            output,
            commands: Vec::new(),
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        info!(?event, "event");
        match event {
            Event::StartLoading => self.view.start_loading(),
            Event::Complete => self.view.complete(),
            Event::Dismiss => self.view.dismiss(),
            Event::SetColor { color } => self.view.set_color(color),
            Event::SetStrokeWidth { width_px } => self.view.set_stroke_width(width_px),
        }
    }

    /// Paints a frame if one was requested. Returns whether it did.
    pub fn tick(&mut self) -> Result<bool> {
        if !self.redraw.take() {
            return Ok(false);
        }
        self.commands.clear();
        let status = self.view.status().kind();
        let elapsed_ms = self.view.elapsed_ms();
        let state = self.view.on_draw(&self.bounds, &mut self.commands);
        self.frames += 1;
        if let Some(output) = self.output.as_mut() {
            let record = FrameRecord {
                frame: self.frames,
                status,
                elapsed_ms,
                state,
                commands: &self.commands,
            };
            serde_json::to_writer(&mut *output, &record).wrap_err("failed writing frame")?;
            writeln!(output).wrap_err("failed writing frame")?;
        }
        Ok(true)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::Relaxed)
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw.is_set()
    }

    /// Runs until the event channel is closed and the view stops asking
    /// for frames.
    pub async fn event_loop(&mut self, rx: UnboundedReceiver<Event>) -> Result<()> {
        let mut interval = time::interval(Duration::from_millis(1000 / FRAMES_PER_SECOND));
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        let mut interval = IntervalStream::new(interval);
        let mut rx = UnboundedReceiverStream::new(rx);
        let mut events_open = true;
        loop {
            if events_open {
                match future::select(rx.next(), interval.next()).await {
                    Either::Left((Some(event), _)) => {
                        self.handle_event(event);
                        continue;
                    }
                    Either::Left((None, _)) => {
                        debug!("event channel closed");
                        events_open = false;
                        continue;
                    }
                    Either::Right(_) => {}
                }
            } else {
                interval.next().await;
            }
            if !self.tick()? && !events_open {
                break;
            }
        }
        if let Some(output) = self.output.as_mut() {
            output.flush().wrap_err("failed flushing frames")?;
        }
        info!(
            frames = self.frames,
            completions = self.completions(),
            "frame loop done"
        );
        Ok(())
    }
}
