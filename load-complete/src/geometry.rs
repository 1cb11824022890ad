//! Widget bounds and the float primitives the animations are expressed in.

use serde::{Deserialize, Serialize};

/// Point in device pixels, y grows downwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Moves the point by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis aligned rectangle in device pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Size and padding of the widget, as laid out by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub padding_left: i32,
    #[serde(default)]
    pub padding_top: i32,
    #[serde(default)]
    pub padding_right: i32,
    #[serde(default)]
    pub padding_bottom: i32,
}

impl Bounds {
    /// Bounds without padding.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding_left: 0,
            padding_top: 0,
            padding_right: 0,
            padding_bottom: 0,
        }
    }

    /// Same padding on every side.
    #[must_use]
    pub const fn with_padding(self, padding: i32) -> Self {
        Self {
            padding_left: padding,
            padding_top: padding,
            padding_right: padding,
            padding_bottom: padding,
            ..self
        }
    }

    /// Largest square centered in the content area.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn square(&self) -> Square {
        let width = self
            .width
            .saturating_sub(self.padding_left)
            .saturating_sub(self.padding_right);
        let height = self
            .height
            .saturating_sub(self.padding_top)
            .saturating_sub(self.padding_bottom);
        // integer halving keeps odd sizes on the same pixel grid as the host
        let center_x = self.padding_left.saturating_add(width / 2);
        let center_y = self.padding_top.saturating_add(height / 2);
        Square {
            center: PointF::new(center_x as f32, center_y as f32),
            radius: width.min(height) as f32 / 2.0,
        }
    }
}

/// Bounding square of the animation, recomputed on every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub center: PointF,
    pub radius: f32,
}

impl Square {
    /// Oval for arcs, inset by half the stroke so the stroke stays in bounds.
    #[must_use]
    pub fn arc_oval(&self, stroke_width: f32) -> RectF {
        let half_stroke = stroke_width / 2.0;
        RectF {
            left: self.center.x - self.radius + half_stroke,
            top: self.center.y - self.radius + half_stroke,
            right: self.center.x + self.radius - half_stroke,
            bottom: self.center.y + self.radius - half_stroke,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_square_ignores_padding_outside_content() {
        let bounds = Bounds {
            width: 120,
            height: 100,
            padding_left: 10,
            padding_top: 4,
            padding_right: 10,
            padding_bottom: 16,
        };
        let square = bounds.square();
        assert_eq!(square.center, PointF::new(60.0, 44.0));
        assert_abs_diff_eq!(square.radius, 40.0);
    }

    #[test]
    fn test_odd_content_uses_integer_center() {
        let square = Bounds::new(75, 75).square();
        assert_eq!(square.center, PointF::new(37.0, 37.0));
        assert_abs_diff_eq!(square.radius, 37.5);
    }

    #[test]
    fn test_arc_oval_inset() {
        let oval = Bounds::new(100, 100).square().arc_oval(8.0);
        assert_eq!(
            oval,
            RectF {
                left: 4.0,
                top: 4.0,
                right: 96.0,
                bottom: 96.0
            }
        );
    }

    #[test]
    fn test_extreme_padding_saturates() {
        let square = Bounds::new(i32::MAX, i32::MIN)
            .with_padding(i32::MIN)
            .square();
        assert!(square.center.x.is_finite());
        assert!(square.center.y.is_finite());
        assert!(square.radius.is_finite());

        let square = Bounds::new(10, 10).with_padding(i32::MAX).square();
        assert!(square.center.x > 0.0);
        assert!(square.radius < 0.0);
    }
}
