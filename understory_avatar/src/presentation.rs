// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Customization points: border policy, glyph formatting, and paint factories.

use alloc::string::String;
use peniko::Color;

use crate::config::{DEFAULT_CHECK_STROKE_COLOR, DEFAULT_CHECK_STROKE_WIDTH_DIP, argb};
use crate::paint::Paint;
use crate::placeholder::format_placeholder_text;
use crate::transition::CheckPhase;
use crate::units::Dimension;

/// State handed to [`Presentation::should_draw_border`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BorderContext {
    /// Whether the checked content is currently shown.
    pub checked: bool,
    /// Phase of the check transition.
    pub phase: CheckPhase,
    /// Border width in device pixels.
    pub border_width_px: u32,
}

/// Strategy object that customizes how an avatar presents itself.
///
/// Every method has a default; implement only what differs.
///
/// ```
/// use understory_avatar::{BorderContext, CheckPhase, Presentation};
///
/// /// Hides the border while the check animation is running.
/// struct QuietBorder;
///
/// impl Presentation for QuietBorder {
///     fn should_draw_border(&self, ctx: &BorderContext) -> bool {
///         matches!(ctx.phase, CheckPhase::Unchecked | CheckPhase::Checked)
///     }
/// }
/// ```
pub trait Presentation {
    /// Whether the border ring is drawn.
    ///
    /// Consulted while resolving the content circle and the image fit; it is
    /// never consulted for the checked presentation, which has no border.
    fn should_draw_border(&self, ctx: &BorderContext) -> bool {
        let _ = ctx;
        true
    }

    /// Normalize raw placeholder text into the glyph to draw.
    ///
    /// The avatar keeps at most
    /// [`MAX_PLACEHOLDER_CHARS`](crate::MAX_PLACEHOLDER_CHARS) characters of
    /// the result, and treats an empty result as no placeholder.
    fn format_placeholder(&self, raw: &str) -> Option<String> {
        format_placeholder_text(raw)
    }

    /// Paint for the placeholder glyph.
    ///
    /// Text is drawn horizontally centered on its origin.
    fn text_paint(&self, color: Color, text_size_px: u32) -> Paint {
        Paint::fill(color).with_text_size(f64::from(text_size_px))
    }

    /// Stroke width of the checkmark, before unit conversion.
    fn checkmark_stroke_width(&self) -> Dimension {
        Dimension::dip(DEFAULT_CHECK_STROKE_WIDTH_DIP)
    }

    /// Paint for the checkmark, given its stroke width in device pixels.
    fn checkmark_paint(&self, stroke_width_px: f64) -> Paint {
        Paint::stroke(argb(DEFAULT_CHECK_STROKE_COLOR), stroke_width_px)
    }
}

/// The stock presentation: always draws the border, white 3dp checkmark.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultPresentation;

impl Presentation for DefaultPresentation {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::PaintStyle;
    use crate::units::Unit;

    #[test]
    fn defaults() {
        let p = DefaultPresentation;
        let ctx = BorderContext {
            checked: false,
            phase: CheckPhase::ShrinkingOut,
            border_width_px: 2,
        };
        assert!(p.should_draw_border(&ctx));
        assert_eq!(p.checkmark_stroke_width(), Dimension::new(Unit::Dip, 3.0));
        let check = p.checkmark_paint(6.0);
        assert_eq!(check.style, PaintStyle::Stroke);
        assert_eq!(check.stroke_width, 6.0);
        assert_eq!(check.color, Color::WHITE);
        assert_eq!(p.format_placeholder(" kim ").as_deref(), Some("KI"));
    }
}
