//! Stroke style, density conversion and the declarative view attributes.

use load_complete_rgb::Argb;
use serde::{Deserialize, Serialize};

/// Default stroke width, in density independent pixels.
pub const DEFAULT_STROKE_WIDTH_DP: f32 = 4.0;
/// Default stroke color, opaque black.
pub const DEFAULT_COLOR: Argb = Argb::BLACK;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Paint used for every primitive: an anti-aliased outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Argb,
    /// Device pixels.
    pub width: f32,
    pub cap: StrokeCap,
}

impl StrokeStyle {
    #[must_use]
    pub fn new(color: Argb, width: f32) -> Self {
        Self {
            color,
            width,
            cap: StrokeCap::Round,
        }
    }
}

/// Display density scale factor: device pixels per density independent pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Density(pub f32);

impl Default for Density {
    fn default() -> Self {
        Density(1.0)
    }
}

impl Density {
    /// Rounds to the nearest pixel. A non-positive or NaN density yields 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn dp_to_px(self, dp: f32) -> i32 {
        if self.0.is_nan() || self.0 <= 0.0 {
            return 0;
        }
        (dp * self.0 + 0.5) as i32
    }

    /// Inverse of [`Density::dp_to_px`], with the same rounding.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn px_to_dp(self, px: f32) -> i32 {
        if self.0.is_nan() || self.0 <= 0.0 {
            return 0;
        }
        (px / self.0 + 0.5) as i32
    }
}

/// Style attributes given at construction time. Missing values fall back to
/// opaque black and a 4dp stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewAttributes {
    pub color: Option<Argb>,
    /// Device pixels.
    pub stroke_width: Option<f32>,
}

impl ViewAttributes {
    /// Resolves the attributes against the defaults for `density`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn resolve(&self, density: Density) -> StrokeStyle {
        StrokeStyle::new(
            self.color.unwrap_or(DEFAULT_COLOR),
            self.stroke_width
                .unwrap_or_else(|| density.dp_to_px(DEFAULT_STROKE_WIDTH_DP) as f32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dp_to_px_rounds() {
        assert_eq!(Density(1.0).dp_to_px(74.0), 74);
        assert_eq!(Density(2.75).dp_to_px(74.0), 204);
        assert_eq!(Density(1.5).dp_to_px(3.0), 5);
        assert_eq!(Density(0.0).dp_to_px(74.0), 0);
        assert_eq!(Density(f32::NAN).dp_to_px(74.0), 0);
        assert_eq!(Density(3.0).px_to_dp(12.0), 4);
        assert_eq!(Density(2.0).px_to_dp(5.0), 3);
    }

    #[test]
    fn test_attributes_defaults() {
        let style = ViewAttributes::default().resolve(Density(3.0));
        assert_eq!(style, StrokeStyle::new(Argb::BLACK, 12.0));
        assert_eq!(style.cap, StrokeCap::Round);
    }

    #[test]
    fn test_attributes_from_json() {
        let attrs: ViewAttributes =
            serde_json::from_str(r##"{"color": "#ff336699", "stroke_width": 6.5}"##)
                .unwrap();
        let style = attrs.resolve(Density(2.0));
        assert_eq!(style.color, Argb::from_u32(0xff33_6699));
        assert_eq!(style.width, 6.5);

        let attrs: ViewAttributes = serde_json::from_str(r#"{"color": 4294901760}"#).unwrap();
        assert_eq!(attrs.resolve(Density(2.0)), StrokeStyle::new(Argb::RED, 8.0));

        assert!(serde_json::from_str::<ViewAttributes>(r#"{"colour": 1}"#).is_err());
    }
}
