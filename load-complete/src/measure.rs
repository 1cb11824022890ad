//! Sizing policy.

use crate::style::Density;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of the default square, in density independent pixels.
pub const DEFAULT_LENGTH_DP: f32 = 74.0;

/// Layout constraint on one axis, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureSpec {
    /// The parent imposes this exact size.
    Exactly(i32),
    /// The widget may pick its size, up to this one.
    AtMost(i32),
    /// The widget may pick any size.
    Unspecified,
}

impl MeasureSpec {
    /// Whether the widget chooses its own size on this axis.
    #[must_use]
    pub fn is_free(self) -> bool {
        !matches!(self, MeasureSpec::Exactly(_))
    }

    /// Size imposed by the parent, 0 when there is none.
    #[must_use]
    pub fn size(self) -> i32 {
        match self {
            MeasureSpec::Exactly(size) | MeasureSpec::AtMost(size) => size,
            MeasureSpec::Unspecified => 0,
        }
    }
}

/// Measured `(width, height)` in pixels.
///
/// A free axis takes the default length, even when that exceeds an
/// [`MeasureSpec::AtMost`] bound.
#[must_use]
pub fn measure(width: MeasureSpec, height: MeasureSpec, density: Density) -> (i32, i32) {
    let length = density.dp_to_px(DEFAULT_LENGTH_DP);
    let measured = match (width.is_free(), height.is_free()) {
        (true, true) => (length, length),
        (true, false) => (length, height.size()),
        (false, true) => (width.size(), length),
        (false, false) => (width.size(), height.size()),
    };
    tracing::debug!(?width, ?height, ?measured, "measured");
    measured
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseMeasureSpecError {
    #[error("unknown constraint mode {0:?}, expected exactly:N, at-most:N or unspecified")]
    Mode(String),
    #[error("invalid size {0:?}")]
    Size(String),
}

impl FromStr for MeasureSpec {
    type Err = ParseMeasureSpecError;

    /// `exactly:N`, `at-most:N` or `unspecified`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mode, size) = s.split_once(':').unwrap_or((s, ""));
        let parse_size = || {
            size.trim()
                .parse::<i32>()
                .ok()
                .filter(|size| *size >= 0)
                .ok_or_else(|| ParseMeasureSpecError::Size(size.to_owned()))
        };
        match mode.trim().to_ascii_lowercase().as_str() {
            "exactly" => Ok(MeasureSpec::Exactly(parse_size()?)),
            "at-most" | "at_most" => Ok(MeasureSpec::AtMost(parse_size()?)),
            "unspecified" => Ok(MeasureSpec::Unspecified),
            other => Err(ParseMeasureSpecError::Mode(other.to_owned())),
        }
    }
}

impl fmt::Display for MeasureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureSpec::Exactly(size) => write!(f, "exactly:{size}"),
            MeasureSpec::AtMost(size) => write!(f, "at-most:{size}"),
            MeasureSpec::Unspecified => f.write_str("unspecified"),
        }
    }
}
