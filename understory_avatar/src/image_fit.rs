// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Center-crop fit of a bitmap into the avatar circle.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`
use kurbo::{Affine, Vec2};

use crate::geometry::{Viewport, shadow_inset};

/// Scale + translation mapping image pixels into viewport pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageTransform {
    /// Uniform scale applied to the image.
    pub scale: f64,
    /// Translation applied after scaling, in whole device pixels.
    pub translate: Vec2,
}

impl ImageTransform {
    /// The transform as an affine map from image space to viewport space.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }
}

/// Inputs to [`center_crop`], kept so a cached transform can be checked
/// against the current state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitInputs {
    /// Intrinsic image width in pixels.
    pub image_width: u32,
    /// Intrinsic image height in pixels.
    pub image_height: u32,
    /// Viewport the image is fitted into.
    pub viewport: Viewport,
    /// Border width in device pixels.
    pub border_width_px: u32,
    /// Shadow radius in device pixels.
    pub shadow_radius: f32,
    /// Whether the border policy currently draws the border.
    pub draw_border: bool,
}

/// Compute the center-crop transform for an image.
///
/// The shorter image side is scaled to the circle diameter minus the border
/// and shadow allowance; the longer side overflows and is hidden by the
/// circular fill. The scaled image is centered in the viewport and the
/// translation rounded to whole pixels.
///
/// Returns `None` when there is nothing sensible to sample: an image with a
/// zero-length side, or a circle with no room left after the insets.
///
/// ```
/// use understory_avatar::{FitInputs, Viewport, center_crop};
///
/// let fit = center_crop(FitInputs {
///     image_width: 200,
///     image_height: 100,
///     viewport: Viewport::new(100, 100),
///     border_width_px: 0,
///     shadow_radius: 0.0,
///     draw_border: true,
/// })
/// .unwrap();
/// assert_eq!(fit.scale, 1.0);
/// assert_eq!(fit.translate.x, -50.0);
/// assert_eq!(fit.translate.y, 0.0);
/// ```
pub fn center_crop(inputs: FitInputs) -> Option<ImageTransform> {
    let shorter = inputs.image_width.min(inputs.image_height);
    if shorter == 0 {
        return None;
    }

    let diameter = f64::from(inputs.viewport.radius() * 2);
    let inset = crop_inset(inputs.draw_border, inputs.border_width_px, inputs.shadow_radius);
    let scale = (diameter - f64::from(inset)) / f64::from(shorter);
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }

    let x = (f64::from(inputs.viewport.width) - f64::from(inputs.image_width) * scale) * 0.5;
    let y = (f64::from(inputs.viewport.height) - f64::from(inputs.image_height) * scale) * 0.5;
    Some(ImageTransform {
        scale,
        translate: Vec2::new(round_half_up(x), round_half_up(y)),
    })
}

/// Diameter allowance for the border and shadow when scaling the image.
///
/// The border contributes `2 * width - 2` here, while it contributes
/// `width - 1` to [`content_offset`](crate::content_offset).
#[allow(
    clippy::cast_possible_truncation,
    reason = "the allowance is truncated to whole pixels; `as` saturates"
)]
pub fn crop_inset(draw_border: bool, border_width_px: u32, shadow_radius: f32) -> i32 {
    let border = if draw_border && border_width_px > 0 {
        f64::from(border_width_px) * 2.0 - 2.0
    } else {
        0.0
    };
    let total = border + f64::from(shadow_inset(shadow_radius));
    total as i32
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn inputs(w: u32, h: u32, viewport: Viewport) -> FitInputs {
        FitInputs {
            image_width: w,
            image_height: h,
            viewport,
            border_width_px: 0,
            shadow_radius: 0.0,
            draw_border: true,
        }
    }

    #[test]
    fn landscape_image_crops_horizontally() {
        let fit = center_crop(inputs(200, 100, Viewport::new(100, 100))).unwrap();
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.translate, Vec2::new(-50.0, 0.0));
        assert_eq!(fit.to_affine() * Point::new(100.0, 50.0), Point::new(50.0, 50.0));
    }

    #[test]
    fn portrait_image_scales_short_side_to_diameter() {
        let fit = center_crop(inputs(50, 100, Viewport::new(100, 100))).unwrap();
        assert_eq!(fit.scale, 2.0);
        assert_eq!(fit.translate, Vec2::new(0.0, -50.0));
    }

    #[test]
    fn border_and_shadow_shrink_the_scale() {
        let mut i = inputs(100, 100, Viewport::new(100, 100));
        i.border_width_px = 3;
        // 2 * 3 - 2 = 4
        assert_eq!(crop_inset(true, 3, 0.0), 4);
        assert_eq!(center_crop(i).unwrap().scale, 0.96);

        i.shadow_radius = 2.0;
        // 4 + 3
        assert_eq!(crop_inset(true, 3, 2.0), 7);
        assert_eq!(center_crop(i).unwrap().scale, 0.93);

        i.draw_border = false;
        assert_eq!(crop_inset(false, 3, 2.0), 3);
        assert_eq!(center_crop(i).unwrap().scale, 0.97);
    }

    #[test]
    fn translation_rounds_to_whole_pixels() {
        // scale = 100 / 30; x = (100 - 40 * 10 / 3) / 2 = -16.67
        let fit = center_crop(inputs(40, 30, Viewport::new(100, 100))).unwrap();
        assert_eq!(fit.translate.x, -17.0);
        assert_eq!(fit.translate.y, 0.0);
        assert_eq!(round_half_up(-50.5), -50.0);
        assert_eq!(round_half_up(2.5), 3.0);
    }

    #[test]
    fn non_square_viewport_centers_in_both_axes() {
        let fit = center_crop(inputs(100, 100, Viewport::new(200, 100))).unwrap();
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.translate, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn degenerate_inputs_have_no_fit() {
        assert_eq!(center_crop(inputs(0, 100, Viewport::new(100, 100))), None);
        assert_eq!(center_crop(inputs(100, 0, Viewport::new(100, 100))), None);
        assert_eq!(center_crop(inputs(100, 100, Viewport::new(0, 0))), None);
        let mut tiny = inputs(10, 10, Viewport::new(4, 4));
        tiny.shadow_radius = 10.0;
        assert_eq!(center_crop(tiny), None);
    }

    #[test]
    fn huge_border_has_no_fit() {
        assert_eq!(crop_inset(true, 1_200_000_000, 0.0), i32::MAX);
        assert_eq!(crop_inset(true, u32::MAX, 2.0), i32::MAX);
        assert_eq!(crop_inset(false, u32::MAX, 2.0), 3);
        let mut i = inputs(100, 100, Viewport::new(100, 100));
        i.border_width_px = u32::MAX;
        assert_eq!(center_crop(i), None);
    }
}
