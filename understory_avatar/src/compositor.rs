// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame draw sequence.
//!
//! ## Checked
//!
//! 1. Checked background circle, inset by the shadow allowance.
//! 2. Checkmark, rotated 45° about the center.
//!
//! Nothing else is drawn in the checked state.
//!
//! ## Unchecked
//!
//! 1. Border ring (when the border policy allows it), as a fill-and-stroke
//!    circle. The content circle drawn next covers its interior.
//! 2. Either the image, sampled through its center-crop transform, or the
//!    placeholder background followed by the placeholder glyph.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `trunc`
use kurbo::Point;

use crate::checkmark::{CHECKMARK_ROTATION, checkmark_path};
use crate::geometry::{FrameGeometry, Viewport};
use crate::paint::{ImageFill, Paint, PaintSet, PaintStyle};
use crate::surface::{Surface, SurfaceExt};

/// Everything the compositor needs for one frame.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a> {
    /// Viewport being drawn.
    pub viewport: Viewport,
    /// Circles resolved for this frame.
    pub geometry: FrameGeometry,
    /// Paints derived from the current config.
    pub paints: &'a PaintSet,
    /// Whether the checked content is shown.
    pub checked: bool,
    /// Answer of the border policy for this frame.
    pub draw_border: bool,
    /// Active image fill, if an image is set and fits.
    pub image: Option<&'a ImageFill>,
    /// Normalized placeholder glyph.
    pub placeholder_text: Option<&'a str>,
}

/// Draw `frame` onto `surface`.
pub fn compose<S: Surface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    if frame.checked {
        draw_checked(surface, frame);
    } else {
        draw_unchecked(surface, frame);
    }
}

fn draw_checked<S: Surface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    let g = &frame.geometry;
    let paints = frame.paints;
    surface.fill_circle(g.center, g.checked_radius, &paints.checked_background);

    let path = checkmark_path(
        g.center,
        frame.viewport.radius(),
        paints.checkmark.stroke_width,
    );
    surface.with_rotation(CHECKMARK_ROTATION, g.center, |s| {
        s.draw_path(&path, &paints.checkmark);
    });
}

fn draw_unchecked<S: Surface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    let g = &frame.geometry;
    let paints = frame.paints;

    if frame.draw_border {
        draw_ring(surface, g.center, g.border_radius, &paints.border);
    }

    if let Some(fill) = frame.image {
        surface.with_clamped_image_fill(fill, |s| {
            s.fill_circle(g.center, g.content_radius, &paints.image);
        });
        return;
    }

    surface.fill_circle(g.center, g.content_radius, &paints.background);
    if let (Some(text), Some(paint)) = (frame.placeholder_text, paints.text.as_ref()) {
        let origin = Point::new(g.center.x, text_baseline(surface, frame.viewport, paint));
        surface.draw_text(text, origin, paint);
    }
}

/// Fill and/or stroke a circle according to the paint's style.
fn draw_ring<S: Surface + ?Sized>(surface: &mut S, center: Point, radius: f64, paint: &Paint) {
    match paint.style {
        PaintStyle::Fill => surface.fill_circle(center, radius, paint),
        PaintStyle::Stroke => surface.stroke_circle(center, radius, paint),
        PaintStyle::FillAndStroke => {
            surface.fill_circle(center, radius, paint);
            surface.stroke_circle(center, radius, paint);
        }
    }
}

/// Baseline that centers the glyph box vertically, truncated to a whole pixel.
fn text_baseline<S: Surface + ?Sized>(surface: &S, viewport: Viewport, paint: &Paint) -> f64 {
    let m = surface.font_metrics(paint);
    ((f64::from(viewport.height) - (m.ascent + m.descent)) * 0.5).trunc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AvatarAttributes, AvatarConfig};
    use crate::presentation::DefaultPresentation;
    use crate::surface::FontMetrics;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use kurbo::{Affine, BezPath};

    #[derive(Debug, PartialEq)]
    enum Op {
        Fill(f64),
        Stroke(f64),
        Path,
        Text(String, Point),
        PushTransform,
        PopTransform,
        PushFill,
        PopFill,
    }

    #[derive(Default)]
    struct Log(Vec<Op>);

    impl Surface for Log {
        fn fill_circle(&mut self, _: Point, radius: f64, _: &Paint) {
            self.0.push(Op::Fill(radius));
        }
        fn stroke_circle(&mut self, _: Point, radius: f64, _: &Paint) {
            self.0.push(Op::Stroke(radius));
        }
        fn draw_path(&mut self, _: &BezPath, _: &Paint) {
            self.0.push(Op::Path);
        }
        fn draw_text(&mut self, text: &str, origin: Point, _: &Paint) {
            self.0.push(Op::Text(text.to_string(), origin));
        }
        fn font_metrics(&self, _: &Paint) -> FontMetrics {
            FontMetrics {
                ascent: -11.0,
                descent: 3.0,
            }
        }
        fn push_transform(&mut self, _: Affine) {
            self.0.push(Op::PushTransform);
        }
        fn pop_transform(&mut self) {
            self.0.push(Op::PopTransform);
        }
        fn push_image_fill(&mut self, _: &ImageFill) {
            self.0.push(Op::PushFill);
        }
        fn pop_image_fill(&mut self) {
            self.0.push(Op::PopFill);
        }
    }

    fn paints(text: bool) -> PaintSet {
        let mut config = AvatarConfig::from_attributes(&AvatarAttributes::default(), None);
        if text {
            config.placeholder_text = Some("AB".to_string());
            config.text_size_px = 12;
        }
        PaintSet::derive(&config, &DefaultPresentation, 3.0)
    }

    fn frame<'a>(paints: &'a PaintSet, checked: bool, text: Option<&'a str>) -> Frame<'a> {
        let viewport = Viewport::new(100, 100);
        Frame {
            viewport,
            geometry: FrameGeometry::resolve(viewport, 4, 0.0, true),
            paints,
            checked,
            draw_border: true,
            image: None,
            placeholder_text: text,
        }
    }

    #[test]
    fn placeholder_sequence() {
        let paints = paints(true);
        let mut log = Log::default();
        compose(&mut log, &frame(&paints, false, Some("AB")));
        assert_eq!(
            log.0,
            [
                Op::Fill(48.0),
                Op::Stroke(48.0),
                Op::Fill(47.0),
                // (100 - (-11 + 3)) / 2 = 54
                Op::Text("AB".to_string(), Point::new(50.0, 54.0)),
            ]
        );
    }

    #[test]
    fn no_text_without_text_paint() {
        let paints = paints(false);
        let mut log = Log::default();
        compose(&mut log, &frame(&paints, false, Some("AB")));
        assert_eq!(log.0.len(), 3);
    }

    #[test]
    fn border_policy_skips_ring() {
        let paints = paints(false);
        let mut f = frame(&paints, false, None);
        f.draw_border = false;
        let mut log = Log::default();
        compose(&mut log, &f);
        assert_eq!(log.0, [Op::Fill(47.0)]);
    }

    #[test]
    fn checked_draws_only_background_and_rotated_checkmark() {
        let paints = paints(true);
        let mut log = Log::default();
        compose(&mut log, &frame(&paints, true, Some("AB")));
        assert_eq!(
            log.0,
            [Op::Fill(50.0), Op::PushTransform, Op::Path, Op::PopTransform]
        );
    }
}
