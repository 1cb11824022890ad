use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_abs_diff_eq;
use load_complete::clock::{Clock, ManualClock};
use load_complete::draw::DrawCommand;
use load_complete::easing::ease;
use load_complete::geometry::Bounds;
use load_complete::style::{Density, ViewAttributes};
use load_complete::view::RedrawFlag;
use load_complete::{AnimationState, Argb, LoadCompleteView, Status};

// (3 + sqrt(158)) / 18
const K: f32 = 0.864_989_2;

struct Harness {
    view: LoadCompleteView<ManualClock, RedrawFlag>,
    clock: ManualClock,
    redraw: RedrawFlag,
    completions: Arc<AtomicUsize>,
    bounds: Bounds,
}

impl Harness {
    fn new(density: f32) -> Self {
        let clock = ManualClock::starting_at(1_000_000);
        let redraw = RedrawFlag::default();
        let mut view = LoadCompleteView::new(
            clock.clone(),
            redraw.clone(),
            &ViewAttributes::default(),
            Density(density),
        );
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completions);
        view.set_completion_callback(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        Self {
            view,
            clock,
            redraw,
            completions,
            // 2 px padding around a 96 px square: radius 48
            bounds: Bounds::new(100, 100).with_padding(2),
        }
    }

    fn draw_at(&mut self, elapsed_ms: u64) -> (Vec<DrawCommand>, AnimationState) {
        let started_at_ms = match self.view.status() {
            Status::Loading { started_at_ms } | Status::Complete { started_at_ms, .. } => {
                started_at_ms
            }
            Status::Dismissed => self.clock.now_ms(),
        };
        self.clock.set(started_at_ms + elapsed_ms);
        let mut commands: Vec<DrawCommand> = Vec::new();
        let state = self.view.on_draw(&self.bounds, &mut commands);
        (commands, state)
    }

    fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

fn line_delta(command: &DrawCommand) -> f32 {
    match command {
        DrawCommand::Line { from, to, .. } => {
            assert_abs_diff_eq!(to.x - from.x, (to.y - from.y).abs(), epsilon = 1e-4);
            to.x - from.x
        }
        other => panic!("expected a line, got {other:?}"),
    }
}

fn arc_angles(command: &DrawCommand) -> (f32, f32) {
    match command {
        DrawCommand::Arc {
            start_angle,
            sweep_angle,
            ..
        } => (*start_angle, *sweep_angle),
        other => panic!("expected an arc, got {other:?}"),
    }
}

#[test]
fn completion_timeline() {
    let mut h = Harness::new(2.0);
    let r = 48.0;
    let w = h.view.style().width;
    assert_eq!(w, 8.0);
    h.view.complete();

    let (commands, _) = h.draw_at(100);
    assert_eq!(commands.len(), 1);
    assert_abs_diff_eq!(line_delta(&commands[0]), r / 2.0 * 100.0 / 225.0, epsilon = 1e-3);

    let (commands, _) = h.draw_at(300);
    assert_eq!(commands.len(), 2);
    assert_abs_diff_eq!(line_delta(&commands[0]), r / 2.0, epsilon = 1e-3);
    assert_abs_diff_eq!(
        line_delta(&commands[1]),
        K * (r - w / 2.0) * 75.0 / 225.0,
        epsilon = 1e-3
    );

    let (commands, _) = h.draw_at(600);
    assert_eq!(commands.len(), 3);
    assert_abs_diff_eq!(line_delta(&commands[1]), K * (r - w / 2.0), epsilon = 1e-3);
    let (start, sweep) = arc_angles(&commands[2]);
    assert_abs_diff_eq!(sweep, 328.0 * ease(150.0 / 450.0), epsilon = 1e-3);
    assert_abs_diff_eq!(start, 328.0 - sweep, epsilon = 1e-3);
    assert_eq!(h.completions(), 0);

    let (commands, state) = h.draw_at(950);
    assert_eq!(state, AnimationState::Finished);
    assert_eq!(arc_angles(&commands[2]), (0.0, 328.0));
    assert_eq!(h.completions(), 1);

    // advancing past the end again must not deliver a second callback
    h.draw_at(1_200);
    h.draw_at(5_000);
    assert_eq!(h.completions(), 1);
}

#[test]
fn loading_quarter_cycle() {
    let mut h = Harness::new(1.0);
    h.view.start_loading();
    let (commands, state) = h.draw_at(375);
    assert_eq!(state, AnimationState::Running);
    let (start, sweep) = arc_angles(&commands[0]);
    assert_abs_diff_eq!(sweep, 315.0 * ease(0.5), epsilon = 1e-3);
    assert_abs_diff_eq!(start, 225.0 - sweep, epsilon = 1e-3);
}

#[test]
fn dismiss_mid_completion() {
    let mut h = Harness::new(1.0);
    h.view.complete();
    h.draw_at(500);
    h.view.dismiss();
    assert!(h.redraw.take());
    let (commands, state) = h.draw_at(2_000);
    assert!(commands.is_empty());
    assert_eq!(state, AnimationState::Finished);
    assert!(!h.redraw.is_set());
    assert_eq!(h.completions(), 0);
}

#[test]
fn stroke_width_change_keeps_clock() {
    let mut h = Harness::new(1.0);
    h.view.complete();
    h.draw_at(300);
    h.view.set_stroke_width(12.0);
    h.view.set_color(Argb::GREEN);
    let (commands, state) = h.draw_at(301);
    assert_eq!(state, AnimationState::Running);
    assert_eq!(commands.len(), 2);
    let DrawCommand::Line { style, .. } = commands[1] else {
        panic!("expected the long stroke");
    };
    assert_eq!(style.width, 12.0);
    assert_eq!(style.color, Argb::GREEN);
    assert_eq!(h.view.elapsed_ms(), Some(301));
}
