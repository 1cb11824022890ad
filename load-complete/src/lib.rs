#![forbid(unsafe_code)]
//! Loading spinner and checkmark completion animation.
//!
//! The widget is headless: every frame is produced as a list of
//! [`draw::DrawCommand`]s from the time elapsed since the last status change,
//! and the host decides how to paint them and when to call back for the next
//! frame. Start with [`view::LoadCompleteView`].

pub mod clock;
pub mod draw;
pub mod easing;
pub mod engine;
pub mod geometry;
pub mod measure;
pub mod style;
pub mod view;

pub use load_complete_rgb::Argb;

pub use crate::engine::{AnimationState, StatusKind};
pub use crate::view::{LoadCompleteView, Status};
