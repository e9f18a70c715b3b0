// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checkmark glyph geometry.
//!
//! The checkmark is built as an axis-aligned "L" (a long vertical stroke and
//! a short horizontal foot) and drawn under a 45° rotation about the
//! viewport center, which turns it into the familiar tick.

use core::f64::consts::FRAC_PI_4;

use kurbo::{BezPath, Point};

/// Rotation applied to the checkmark path, in radians (clockwise on a
/// y-down surface).
pub const CHECKMARK_ROTATION: f64 = FRAC_PI_4;

/// Stroke lengths of the checkmark, in whole pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CheckmarkMetrics {
    /// Half the length of the long stroke.
    pub half_height: i32,
    /// Length of the short stroke.
    pub short_stroke: i32,
    /// Offset of the corner from the center, applied right and up.
    pub corner_offset: i32,
}

impl CheckmarkMetrics {
    /// Metrics for a long stroke of `long_stroke` pixels (the outer radius).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "stroke lengths are truncated to whole pixels"
    )]
    pub fn new(long_stroke: u32) -> Self {
        let long = long_stroke as f32;
        let short_stroke = (long * 0.4) as i32;
        Self {
            half_height: (long * 0.5) as i32,
            short_stroke,
            corner_offset: (short_stroke as f32 * 0.3) as i32,
        }
    }
}

/// Build the unrotated checkmark path around `center`.
///
/// `stroke_width` extends the foot under the long stroke so the corner is
/// closed.
pub fn checkmark_path(center: Point, long_stroke: u32, stroke_width: f64) -> BezPath {
    let m = CheckmarkMetrics::new(long_stroke);
    let sx = center.x + f64::from(m.corner_offset);
    let sy = center.y - f64::from(m.corner_offset);
    let half = f64::from(m.half_height);

    let mut path = BezPath::new();
    // Long stroke.
    path.move_to((sx, sy - half));
    path.line_to((sx, sy + half));
    // Short stroke.
    path.move_to((sx + stroke_width * 0.5, sy + half));
    path.line_to((sx - f64::from(m.short_stroke), sy + half));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn metrics_truncate() {
        let m = CheckmarkMetrics::new(50);
        assert_eq!(m.short_stroke, 20);
        assert_eq!(m.half_height, 25);
        assert_eq!(m.corner_offset, 6);

        let m = CheckmarkMetrics::new(33);
        assert_eq!(m.short_stroke, 13);
        assert_eq!(m.half_height, 16);
        assert_eq!(m.corner_offset, 3);
    }

    #[test]
    fn path_is_two_segments() {
        let path = checkmark_path(Point::new(50.0, 50.0), 50, 3.0);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(56.0, 19.0)),
                PathEl::LineTo(Point::new(56.0, 69.0)),
                PathEl::MoveTo(Point::new(57.5, 69.0)),
                PathEl::LineTo(Point::new(36.0, 69.0)),
            ]
        );
    }
}
