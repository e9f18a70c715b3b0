// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The circular avatar renderer.

use alloc::string::String;

use peniko::{Color, ImageData};
use tracing::{debug, trace};

use crate::compositor::{Frame, compose};
use crate::config::{AvatarAttributes, AvatarConfig};
use crate::error::AvatarError;
use crate::geometry::{FrameGeometry, Viewport};
use crate::image_fit::{FitInputs, ImageTransform, center_crop};
use crate::paint::{ImageFill, PaintSet};
use crate::placeholder::MAX_PLACEHOLDER_CHARS;
use crate::presentation::{BorderContext, DefaultPresentation, Presentation};
use crate::surface::Surface;
use crate::transition::{AnimationDriver, AnimationHandle, CheckPhase, CheckTransition};
use crate::units::{Dimension, DimensionResolver, DisplayMetrics};

bitflags::bitflags! {
    /// Derived state that is out of date.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    struct Dirty: u8 {
        /// Paints must be re-derived from the config.
        const PAINTS    = 0b0000_0001;
        /// The image transform must be recomputed.
        const IMAGE_FIT = 0b0000_0010;
        /// The host should schedule a draw.
        const REDRAW    = 0b0000_0100;
    }
}

/// A circular avatar: an image cropped to a circle, or a placeholder glyph on
/// a colored disc, with an optional border ring, drop shadow, and an animated
/// checked state.
///
/// The avatar is headless. The host feeds it bounds, images and property
/// changes, polls [`needs_redraw`](Self::needs_redraw) to schedule frames, and
/// calls [`draw`](Self::draw) with a [`Surface`]. Paints and the image
/// transform are derived lazily and cached until an input changes.
///
/// Setters compare against the current value first; an unchanged value is a
/// no-op and does not request a redraw. Redraw requests are a flag, so any
/// number of changes between two frames collapse into one draw.
#[derive(Debug)]
pub struct CircularAvatar<P: Presentation = DefaultPresentation> {
    presentation: P,
    metrics: DisplayMetrics,
    config: AvatarConfig,
    transition: CheckTransition,
    viewport: Viewport,
    image: Option<ImageData>,
    fit_inputs: Option<FitInputs>,
    transform: Option<ImageTransform>,
    image_fill: Option<ImageFill>,
    paints: PaintSet,
    dirty: Dirty,
}

impl CircularAvatar {
    /// Create an avatar with the stock presentation.
    pub fn new(attrs: &AvatarAttributes) -> Self {
        Self::with_presentation(attrs, DefaultPresentation)
    }
}

impl<P: Presentation> CircularAvatar<P> {
    /// Create an avatar with a custom presentation.
    pub fn with_presentation(attrs: &AvatarAttributes, presentation: P) -> Self {
        let text = attrs
            .placeholder_text
            .as_deref()
            .and_then(|raw| placeholder_glyph(&presentation, raw));
        let config = AvatarConfig::from_attributes(attrs, text);
        let metrics = DisplayMetrics::default();
        let paints = derive_paints(&config, &presentation, &metrics);
        Self {
            presentation,
            metrics,
            transition: CheckTransition::new(config.checked),
            config,
            viewport: Viewport::default(),
            image: None,
            fit_inputs: None,
            transform: None,
            image_fill: None,
            paints,
            dirty: Dirty::REDRAW,
        }
    }

    /// The live configuration.
    pub fn config(&self) -> &AvatarConfig {
        &self.config
    }

    /// The presentation strategy.
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns `true` if a draw has been requested since the last frame.
    pub fn needs_redraw(&self) -> bool {
        self.dirty.contains(Dirty::REDRAW)
    }

    /// Take the pending redraw request, clearing it.
    pub fn take_redraw_request(&mut self) -> bool {
        let pending = self.needs_redraw();
        self.dirty.remove(Dirty::REDRAW);
        pending
    }

    fn invalidate(&mut self, what: Dirty) {
        trace!(?what, "avatar invalidated");
        self.dirty |= what | Dirty::REDRAW;
    }

    // --- Units ---

    /// Replace the display metrics used to resolve dimensions.
    ///
    /// Sizes already stored stay as they are; the checkmark stroke width is
    /// re-resolved.
    pub fn set_display_metrics(&mut self, metrics: DisplayMetrics) {
        if self.metrics == metrics {
            return;
        }
        self.metrics = metrics;
        self.invalidate(Dirty::PAINTS);
    }

    /// Display metrics in use.
    pub fn display_metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    // --- Alpha ---

    /// Set the alpha applied to every paint. Only the low 8 bits are used.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the value is masked to 8 bits first"
    )]
    pub fn set_image_alpha(&mut self, alpha: i32) {
        let alpha = (alpha & 0xFF) as u8;
        if self.config.alpha == alpha {
            return;
        }
        self.config.alpha = alpha;
        self.invalidate(Dirty::PAINTS);
    }

    /// Alpha applied to every paint.
    pub fn image_alpha(&self) -> u8 {
        self.config.alpha
    }

    // --- Border ---

    /// Set the border width.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::InvalidArgument`] for a negative or NaN width;
    /// the avatar is left unchanged.
    pub fn set_border_width(&mut self, width: Dimension) -> Result<(), AvatarError> {
        AvatarError::check_non_negative("border width", width.value)?;
        let px = self.metrics.resolve_px(width);
        if self.config.border_width_px != px {
            self.config.border_width_px = px;
            self.invalidate(Dirty::PAINTS | Dirty::IMAGE_FIT);
        }
        Ok(())
    }

    /// Border width in device pixels.
    pub fn border_width(&self) -> u32 {
        self.config.border_width_px
    }

    /// Set the border color.
    pub fn set_border_color(&mut self, color: Color) {
        if self.config.border_color == color {
            return;
        }
        self.config.border_color = color;
        self.invalidate(Dirty::PAINTS);
    }

    /// Border color.
    pub fn border_color(&self) -> Color {
        self.config.border_color
    }

    // --- Checked background ---

    /// Set the background color of the checked state.
    ///
    /// Requests a redraw only while the checked content is shown.
    pub fn set_checked_background_color(&mut self, color: Color) {
        if self.config.checked_background_color == color {
            return;
        }
        self.config.checked_background_color = color;
        self.dirty |= Dirty::PAINTS;
        if self.config.checked {
            self.invalidate(Dirty::empty());
        }
    }

    /// Background color of the checked state.
    pub fn checked_background_color(&self) -> Color {
        self.config.checked_background_color
    }

    // --- Placeholder ---

    /// Set the placeholder text; it is normalized by the presentation.
    pub fn set_placeholder(&mut self, text: &str) {
        let text = placeholder_glyph(&self.presentation, text);
        if self.set_placeholder_glyph(text) {
            self.invalidate(Dirty::PAINTS);
        }
    }

    /// The normalized placeholder glyph.
    pub fn placeholder(&self) -> Option<&str> {
        self.config.placeholder_text.as_deref()
    }

    /// Set the placeholder text size.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::InvalidArgument`] for a negative or NaN size;
    /// the avatar is left unchanged.
    pub fn set_placeholder_text_size(&mut self, size: Dimension) -> Result<(), AvatarError> {
        AvatarError::check_non_negative("text size", size.value)?;
        let px = self.metrics.resolve_px(size);
        if self.config.text_size_px != px {
            self.config.text_size_px = px;
            self.invalidate(Dirty::PAINTS);
        }
        Ok(())
    }

    /// Placeholder text size in device pixels.
    pub fn placeholder_text_size(&self) -> u32 {
        self.config.text_size_px
    }

    /// Set the placeholder glyph color.
    pub fn set_placeholder_text_color(&mut self, color: Color) {
        if self.config.text_color == color {
            return;
        }
        self.config.text_color = color;
        self.invalidate(Dirty::PAINTS);
    }

    /// Set the placeholder background color.
    pub fn set_placeholder_background_color(&mut self, color: Color) {
        if self.config.background_color == color {
            return;
        }
        self.config.background_color = color;
        self.invalidate(Dirty::PAINTS);
    }

    /// Set the placeholder text and both of its colors at once.
    ///
    /// Requests at most one redraw, and none if nothing changed.
    pub fn set_placeholder_with_colors(&mut self, text: &str, background: Color, text_color: Color) {
        let text = placeholder_glyph(&self.presentation, text);
        let mut changed = self.set_placeholder_glyph(text);
        if self.config.background_color != background {
            self.config.background_color = background;
            changed = true;
        }
        if self.config.text_color != text_color {
            self.config.text_color = text_color;
            changed = true;
        }
        if changed {
            self.invalidate(Dirty::PAINTS);
        }
    }

    fn set_placeholder_glyph(&mut self, text: Option<String>) -> bool {
        if self.config.placeholder_text == text {
            return false;
        }
        self.config.placeholder_text = text;
        true
    }

    // --- Shadow ---

    /// Set the shadow radius in device pixels; zero disables the shadow.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::InvalidArgument`] for a negative or NaN radius;
    /// the avatar is left unchanged.
    pub fn set_shadow_radius(&mut self, radius: f32) -> Result<(), AvatarError> {
        AvatarError::check_non_negative("shadow radius", radius)?;
        if self.config.shadow_radius != radius {
            self.config.shadow_radius = radius;
            self.invalidate(Dirty::PAINTS | Dirty::IMAGE_FIT);
        }
        Ok(())
    }

    /// Shadow radius in device pixels.
    pub fn shadow_radius(&self) -> f32 {
        self.config.shadow_radius
    }

    /// Set the shadow color.
    pub fn set_shadow_color(&mut self, color: Color) {
        if self.config.shadow_color == color {
            return;
        }
        self.config.shadow_color = color;
        self.invalidate(Dirty::PAINTS);
    }

    /// Whether the checked background casts the shadow too.
    pub fn set_allow_check_shadow(&mut self, allow: bool) {
        if self.config.allow_check_shadow == allow {
            return;
        }
        self.config.allow_check_shadow = allow;
        self.invalidate(Dirty::PAINTS);
    }

    /// Whether check changes animate.
    ///
    /// Takes effect for the next request; a running animation completes.
    pub fn set_allow_check_animation(&mut self, allow: bool) {
        self.config.allow_check_animation = allow;
    }

    // --- Host events ---

    /// The avatar was laid out at a new size.
    pub fn on_bounds_changed(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.invalidate(Dirty::IMAGE_FIT);
    }

    /// The displayed image was replaced (or removed).
    pub fn on_image_changed(&mut self, image: Option<ImageData>) {
        self.image = image;
        self.invalidate(Dirty::IMAGE_FIT);
    }

    /// The current image, if any.
    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    // --- Checked state ---

    /// Whether the checked content is shown.
    ///
    /// During an animated change this stays at the old value until the
    /// shrink phase completes.
    pub fn is_checked(&self) -> bool {
        self.transition.is_checked()
    }

    /// Phase of the check transition.
    pub fn check_phase(&self) -> CheckPhase {
        self.transition.phase()
    }

    /// The checked state being transitioned to.
    pub fn target_checked(&self) -> bool {
        self.transition.target()
    }

    /// Request the checked state.
    ///
    /// With animation allowed this starts (or retargets) the shrink/grow
    /// transition on `driver`; otherwise the change is applied at once.
    pub fn set_checked<D: AnimationDriver + ?Sized>(&mut self, checked: bool, driver: &mut D) {
        let animate = self.config.allow_check_animation;
        let border = self.should_draw_border();
        let swapped = self.transition.request(checked, animate, driver);
        self.sync_checked(swapped, border);
    }

    /// Flip the checked state being transitioned to.
    pub fn toggle<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        let target = self.transition.target();
        self.set_checked(!target, driver);
    }

    /// Report that the animation `handle` ran to completion.
    pub fn on_animation_finished<D: AnimationDriver + ?Sized>(
        &mut self,
        handle: AnimationHandle,
        driver: &mut D,
    ) {
        let animate = self.config.allow_check_animation;
        let border = self.should_draw_border();
        let swapped = self.transition.finished(handle, animate, driver);
        self.sync_checked(swapped, border);
    }

    /// The avatar is being torn down: cancel any animation in flight.
    ///
    /// The checked flag stays at its last committed value.
    pub fn detach<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        if self.transition.in_flight().is_some() {
            debug!(checked = self.is_checked(), "avatar detached mid-transition");
        }
        let border = self.should_draw_border();
        self.transition.cancel(driver);
        self.sync_checked(false, border);
    }

    /// Commit the transition's checked flag.
    ///
    /// `border_before` is the border policy's answer before the transition
    /// stepped; a phase change that flips it needs a new frame.
    fn sync_checked(&mut self, swapped: bool, border_before: bool) {
        self.config.checked = self.transition.is_checked();
        if swapped || self.should_draw_border() != border_before {
            // The ring and the fit depend on the policy's answer.
            self.invalidate(Dirty::IMAGE_FIT);
        }
    }

    // --- Derived state ---

    fn border_context(&self) -> BorderContext {
        BorderContext {
            checked: self.config.checked,
            phase: self.transition.phase(),
            border_width_px: self.config.border_width_px,
        }
    }

    /// Answer of the border policy for the current state.
    pub fn should_draw_border(&self) -> bool {
        self.presentation.should_draw_border(&self.border_context())
    }

    /// Paints for the current config.
    pub fn paints(&mut self) -> &PaintSet {
        self.ensure_paints();
        &self.paints
    }

    fn ensure_paints(&mut self) {
        if self.dirty.contains(Dirty::PAINTS) {
            self.paints = derive_paints(&self.config, &self.presentation, &self.metrics);
            self.dirty.remove(Dirty::PAINTS);
        }
    }

    /// Center-crop transform of the current image, if one is set and fits.
    pub fn image_transform(&mut self) -> Option<ImageTransform> {
        let draw_border = self.should_draw_border();
        self.ensure_fit(draw_border);
        self.transform
    }

    fn ensure_fit(&mut self, draw_border: bool) {
        let inputs = self.image.as_ref().map(|image| FitInputs {
            image_width: image.width,
            image_height: image.height,
            viewport: self.viewport,
            border_width_px: self.config.border_width_px,
            shadow_radius: self.config.shadow_radius,
            draw_border,
        });
        if !self.dirty.contains(Dirty::IMAGE_FIT) && inputs == self.fit_inputs {
            return;
        }
        self.dirty.remove(Dirty::IMAGE_FIT);
        self.fit_inputs = inputs;
        self.transform = inputs.and_then(center_crop);
        self.image_fill = match (&self.image, self.transform) {
            (Some(image), Some(transform)) => {
                Some(ImageFill::clamped(image.clone(), transform.to_affine()))
            }
            _ => None,
        };
        trace!(transform = ?self.transform, "image transform rebuilt");
    }

    /// Circles for the current frame.
    pub fn geometry(&self) -> FrameGeometry {
        FrameGeometry::resolve(
            self.viewport,
            self.config.border_width_px,
            self.config.shadow_radius,
            self.should_draw_border(),
        )
    }

    /// Draw one frame and clear the redraw request.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.ensure_paints();
        let draw_border = self.should_draw_border();
        self.ensure_fit(draw_border);
        let geometry = FrameGeometry::resolve(
            self.viewport,
            self.config.border_width_px,
            self.config.shadow_radius,
            draw_border,
        );
        trace!(checked = self.config.checked, viewport = ?self.viewport, "drawing avatar");
        compose(
            surface,
            &Frame {
                viewport: self.viewport,
                geometry,
                paints: &self.paints,
                checked: self.config.checked,
                draw_border,
                image: self.image_fill.as_ref(),
                placeholder_text: self.config.placeholder_text.as_deref(),
            },
        );
        self.dirty.remove(Dirty::REDRAW);
    }
}

/// The presentation's glyph, cut to [`MAX_PLACEHOLDER_CHARS`] characters.
fn placeholder_glyph<P: Presentation + ?Sized>(presentation: &P, raw: &str) -> Option<String> {
    let glyph = presentation.format_placeholder(raw)?;
    match glyph.char_indices().nth(MAX_PLACEHOLDER_CHARS) {
        Some((end, _)) => Some(String::from(&glyph[..end])),
        None if glyph.is_empty() => None,
        None => Some(glyph),
    }
}

fn derive_paints<P: Presentation + ?Sized>(
    config: &AvatarConfig,
    presentation: &P,
    metrics: &DisplayMetrics,
) -> PaintSet {
    let stroke = metrics.resolve_px(presentation.checkmark_stroke_width());
    PaintSet::derive(config, presentation, f64::from(stroke))
}
