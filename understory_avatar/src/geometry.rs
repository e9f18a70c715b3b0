// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame circle geometry: radius, border and shadow insets, content circle.
//!
//! All insets derive from three inputs: the viewport size, the border width,
//! and the shadow radius. The radius, center, and content offset are whole
//! pixels, so circles land on the same pixel boundaries as the image
//! transform.

use kurbo::Point;

/// Factor applied to the shadow radius to reserve room for the shadow blur.
pub const SHADOW_INSET_FACTOR: f32 = 1.5;

/// Size of the area the avatar draws into, in device pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Outer radius: half the shorter side, rounded down.
    #[inline]
    pub const fn radius(self) -> u32 {
        let min = if self.width < self.height {
            self.width
        } else {
            self.height
        };
        min / 2
    }

    /// Integral center of the viewport.
    #[inline]
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width / 2), f64::from(self.height / 2))
    }
}

/// Room reserved around the circles for the shadow.
#[inline]
pub fn shadow_inset(shadow_radius: f32) -> f32 {
    shadow_radius * SHADOW_INSET_FACTOR
}

/// Distance from the outer radius to the centerline of the border stroke.
#[inline]
pub fn border_inset(border_width_px: u32, shadow_radius: f32) -> f32 {
    // Border widths are small pixel counts; the conversion is exact.
    #[allow(
        clippy::cast_precision_loss,
        reason = "border widths are far below f32's exact integer range"
    )]
    let half_border = border_width_px as f32 * 0.5;
    half_border + shadow_inset(shadow_radius)
}

/// Distance from the outer radius to the edge of the image / placeholder
/// circle.
///
/// With a border, the content circle reaches one pixel under the inner edge
/// of the ring so the seam between the two anti-aliased edges never shows
/// the background.
#[allow(
    clippy::cast_possible_truncation,
    reason = "the offset is truncated to whole pixels like the stored radius; `as` saturates"
)]
pub fn content_offset(draw_border: bool, border_width_px: u32, shadow_radius: f32) -> i32 {
    let border = if draw_border && border_width_px > 0 {
        f64::from(border_width_px) - 1.0
    } else {
        0.0
    };
    let total = border + f64::from(shadow_inset(shadow_radius));
    total as i32
}

/// Geometry resolved for a single frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameGeometry {
    /// Center of every circle.
    pub center: Point,
    /// Outer radius.
    pub radius: f64,
    /// Radius of the border stroke centerline.
    pub border_radius: f64,
    /// Radius of the image / placeholder circle.
    pub content_radius: f64,
    /// Radius of the checked-state background circle.
    pub checked_radius: f64,
}

impl FrameGeometry {
    /// Resolve the circles for `viewport`.
    ///
    /// `draw_border` is the answer of the border policy for this frame.
    pub fn resolve(
        viewport: Viewport,
        border_width_px: u32,
        shadow_radius: f32,
        draw_border: bool,
    ) -> Self {
        let radius = f64::from(viewport.radius());
        let offset = content_offset(draw_border, border_width_px, shadow_radius);
        Self {
            center: viewport.center(),
            radius,
            border_radius: radius - f64::from(border_inset(border_width_px, shadow_radius)),
            content_radius: radius - f64::from(offset),
            checked_radius: radius - f64::from(shadow_inset(shadow_radius)),
        }
    }
}
