// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paints used by the compositor, derived from the config in one place.

use kurbo::{Affine, Vec2};
use peniko::{Color, Extend, ImageData, ImageSampler};

use crate::config::AvatarConfig;
use crate::presentation::Presentation;

/// How a paint covers a shape.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaintStyle {
    /// Fill the interior.
    #[default]
    Fill,
    /// Stroke the outline with [`Paint::stroke_width`].
    Stroke,
    /// Fill the interior and stroke the outline.
    FillAndStroke,
}

/// Drop shadow cast by a paint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadowLayer {
    /// Blur radius in device pixels.
    pub blur_radius: f32,
    /// Offset of the shadow from the shape.
    pub offset: Vec2,
    /// Shadow color.
    pub color: Color,
}

impl ShadowLayer {
    /// The avatar's shadow: blurred by `radius` and dropped by half of it.
    ///
    /// Returns `None` for a zero radius, which disables the shadow.
    pub fn dropped(radius: f32, color: Color) -> Option<Self> {
        (radius > 0.0).then(|| Self {
            blur_radius: radius,
            offset: Vec2::new(0.0, f64::from(radius) / 2.0),
            color,
        })
    }
}

/// A solid paint plus the stroke, text and shadow parameters that go with it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Paint {
    /// Base color, before [`Paint::alpha`] is applied.
    pub color: Color,
    /// Paint alpha, `0..=255`; multiplies the color's own alpha.
    pub alpha: u8,
    /// Fill / stroke style.
    pub style: PaintStyle,
    /// Stroke width in device pixels.
    pub stroke_width: f64,
    /// Text size in device pixels, for text paints.
    pub text_size: f64,
    /// Optional drop shadow.
    pub shadow: Option<ShadowLayer>,
    /// Whether edges are anti-aliased.
    pub anti_alias: bool,
}

impl Paint {
    /// An anti-aliased fill paint.
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            alpha: 0xFF,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            text_size: 0.0,
            shadow: None,
            anti_alias: true,
        }
    }

    /// An anti-aliased stroke paint.
    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            style: PaintStyle::Stroke,
            stroke_width: width,
            ..Self::fill(color)
        }
    }

    /// Returns `self` with the given style.
    #[must_use]
    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns `self` with the given paint alpha.
    #[must_use]
    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    /// Returns `self` with the given text size.
    #[must_use]
    pub fn with_text_size(mut self, size: f64) -> Self {
        self.text_size = size;
        self
    }

    /// Returns `self` with the given shadow.
    #[must_use]
    pub fn with_shadow(mut self, shadow: Option<ShadowLayer>) -> Self {
        self.shadow = shadow;
        self
    }

    /// The color to rasterize with: [`Paint::color`] scaled by [`Paint::alpha`].
    pub fn effective_color(&self) -> Color {
        self.color.multiply_alpha(f32::from(self.alpha) / 255.0)
    }
}

/// An image sampled through a transform, clamped at its edges.
#[derive(Clone, Debug)]
pub struct ImageFill {
    /// Image pixels.
    pub image: ImageData,
    /// Map from image space to viewport space.
    pub transform: Affine,
    /// Sampling parameters; both extends are [`Extend::Pad`].
    pub sampler: ImageSampler,
}

impl ImageFill {
    /// An image fill that clamps (never tiles) outside the image bounds.
    pub fn clamped(image: ImageData, transform: Affine) -> Self {
        Self {
            image,
            transform,
            sampler: ImageSampler {
                x_extend: Extend::Pad,
                y_extend: Extend::Pad,
                ..ImageSampler::default()
            },
        }
    }
}

/// Every paint the compositor uses, derived from an [`AvatarConfig`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PaintSet {
    /// Paint used to fill the image circle; the image comes from the active
    /// [`ImageFill`].
    pub image: Paint,
    /// Border ring: fill-and-stroke, carries the shadow.
    pub border: Paint,
    /// Placeholder background.
    pub background: Paint,
    /// Checked-state background; carries the shadow only when allowed.
    pub checked_background: Paint,
    /// Checkmark stroke.
    pub checkmark: Paint,
    /// Placeholder glyph; present only when there is a glyph to draw.
    pub text: Option<Paint>,
}

impl PaintSet {
    /// Derive all paints from `config`.
    ///
    /// `checkmark_stroke_width` is the presentation's checkmark stroke width,
    /// already in device pixels.
    pub fn derive<P: Presentation + ?Sized>(
        config: &AvatarConfig,
        presentation: &P,
        checkmark_stroke_width: f64,
    ) -> Self {
        let alpha = config.alpha;
        let shadow = ShadowLayer::dropped(config.shadow_radius, config.shadow_color);

        let border = Paint::stroke(config.border_color, f64::from(config.border_width_px))
            .with_style(PaintStyle::FillAndStroke)
            .with_shadow(shadow);
        let checked_background = Paint::fill(config.checked_background_color)
            .with_shadow(if config.allow_check_shadow { shadow } else { None });
        let text = config
            .has_placeholder_glyph()
            .then(|| presentation.text_paint(config.text_color, config.text_size_px));

        Self {
            image: Paint::fill(Color::WHITE).with_alpha(alpha),
            border: border.with_alpha(alpha),
            background: Paint::fill(config.background_color).with_alpha(alpha),
            checked_background: checked_background.with_alpha(alpha),
            checkmark: presentation
                .checkmark_paint(checkmark_stroke_width)
                .with_alpha(alpha),
            text: text.map(|p| p.with_alpha(alpha)),
        }
    }

    /// Iterate over every active paint.
    pub fn iter(&self) -> impl Iterator<Item = &Paint> {
        [
            &self.image,
            &self.border,
            &self.background,
            &self.checked_background,
            &self.checkmark,
        ]
        .into_iter()
        .chain(self.text.as_ref())
    }
}
