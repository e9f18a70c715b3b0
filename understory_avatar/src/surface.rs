// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface the compositor renders onto.
//!
//! [`Surface`] is the minimal set of primitives a host backend provides.
//! Scoped state (transforms and image fills) is pushed and popped; the
//! [`SurfaceExt`] helpers pair every push with its pop through a guard, so a
//! scope is closed on every exit path, including unwinding.

use core::ops::{Deref, DerefMut};

use kurbo::{Affine, BezPath, Point};

use crate::paint::{ImageFill, Paint};

/// Vertical metrics of a font at a given size.
///
/// Following the usual convention, `ascent` is negative (above the baseline)
/// and `descent` positive.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the glyph box (negative).
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the glyph box.
    pub descent: f64,
}

/// Drawing primitives consumed by the avatar compositor.
///
/// Coordinates are device pixels in the avatar's viewport, subject to the
/// transforms pushed with [`Surface::push_transform`].
pub trait Surface {
    /// Fill a circle with `paint`.
    ///
    /// Inside an image-fill scope the circle samples the active image fill,
    /// modulated by the paint's alpha, instead of the paint's color.
    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Stroke a circle outline with `paint`'s stroke width.
    fn stroke_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Stroke `path` with `paint`.
    fn draw_path(&mut self, path: &BezPath, paint: &Paint);

    /// Draw `text` horizontally centered on `origin.x`, with its baseline at
    /// `origin.y`.
    fn draw_text(&mut self, text: &str, origin: Point, paint: &Paint);

    /// Metrics of the font selected by `paint` (its text size).
    fn font_metrics(&self, paint: &Paint) -> FontMetrics;

    /// Concatenate `transform` onto the current transform.
    fn push_transform(&mut self, transform: Affine);

    /// Restore the transform saved by the matching [`Surface::push_transform`].
    fn pop_transform(&mut self);

    /// Make `fill` the source for subsequent [`Surface::fill_circle`] calls.
    fn push_image_fill(&mut self, fill: &ImageFill);

    /// End the scope opened by [`Surface::push_image_fill`].
    fn pop_image_fill(&mut self);
}

/// Which scope a [`Scoped`] guard closes on drop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ScopeKind {
    Transform,
    ImageFill,
}

/// Guard over a surface with one pushed scope.
///
/// Dereferences to the surface; dropping it pops the scope.
#[derive(Debug)]
pub struct Scoped<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    kind: ScopeKind,
}

impl<S: Surface + ?Sized> Deref for Scoped<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for Scoped<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for Scoped<'_, S> {
    fn drop(&mut self) {
        match self.kind {
            ScopeKind::Transform => self.surface.pop_transform(),
            ScopeKind::ImageFill => self.surface.pop_image_fill(),
        }
    }
}

/// Scoped helpers for [`Surface`] implementations and callers.
///
/// This is separate from [`Surface`] so that `&mut dyn Surface` stays usable.
pub trait SurfaceExt: Surface {
    /// Push `transform` and return a guard that pops it when dropped.
    fn transformed(&mut self, transform: Affine) -> Scoped<'_, Self> {
        self.push_transform(transform);
        Scoped {
            surface: self,
            kind: ScopeKind::Transform,
        }
    }

    /// Push `fill` and return a guard that pops it when dropped.
    fn image_filled(&mut self, fill: &ImageFill) -> Scoped<'_, Self> {
        self.push_image_fill(fill);
        Scoped {
            surface: self,
            kind: ScopeKind::ImageFill,
        }
    }

    /// Run `f` with the surface rotated by `radians` about `center`.
    fn with_rotation<R>(
        &mut self,
        radians: f64,
        center: Point,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let mut scope = self.transformed(Affine::rotate_about(radians, center));
        f(&mut *scope)
    }

    /// Run `f` with `fill` as the source of circle fills.
    fn with_clamped_image_fill<R>(
        &mut self,
        fill: &ImageFill,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let mut scope = self.image_filled(fill);
        f(&mut *scope)
    }
}

impl<S: Surface + ?Sized> SurfaceExt for S {}
