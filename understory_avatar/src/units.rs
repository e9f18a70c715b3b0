// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dimension units and their conversion to device pixels.
//!
//! The avatar only ever stores device pixels. Sizes arrive from the host as a
//! [`Dimension`] (unit + magnitude) and are resolved through a
//! [`DimensionResolver`], normally the host's [`DisplayMetrics`].

/// Unit of a host-supplied dimension.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// Raw device pixels.
    #[default]
    Px,
    /// Density-independent pixels, scaled by [`DisplayMetrics::density`].
    Dip,
    /// Scale-independent pixels, scaled by [`DisplayMetrics::scaled_density`].
    Sp,
    /// Points (1/72 inch).
    Pt,
    /// Inches.
    In,
    /// Millimeters.
    Mm,
}

/// A magnitude tagged with its unit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dimension {
    /// Unit of `value`.
    pub unit: Unit,
    /// Magnitude in `unit`.
    pub value: f32,
}

impl Dimension {
    /// Create a dimension.
    #[inline]
    pub const fn new(unit: Unit, value: f32) -> Self {
        Self { unit, value }
    }

    /// A dimension in device pixels.
    #[inline]
    pub const fn px(value: f32) -> Self {
        Self::new(Unit::Px, value)
    }

    /// A dimension in density-independent pixels.
    #[inline]
    pub const fn dip(value: f32) -> Self {
        Self::new(Unit::Dip, value)
    }

    /// A dimension in scale-independent pixels.
    #[inline]
    pub const fn sp(value: f32) -> Self {
        Self::new(Unit::Sp, value)
    }
}

/// Converts host dimensions into device pixels.
pub trait DimensionResolver {
    /// Resolve `dimension` to (fractional) device pixels.
    fn resolve(&self, dimension: Dimension) -> f32;

    /// Resolve `dimension` and truncate to whole device pixels.
    ///
    /// Negative results saturate to zero.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "whole-pixel truncation is the intended conversion; `as` saturates"
    )]
    fn resolve_px(&self, dimension: Dimension) -> u32 {
        self.resolve(dimension) as u32
    }
}

/// Display density information used to resolve dimensions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayMetrics {
    /// Device pixels per density-independent pixel.
    pub density: f32,
    /// Device pixels per scale-independent pixel (density times the user's
    /// font scale).
    pub scaled_density: f32,
    /// Physical pixels per inch along the X axis.
    pub xdpi: f32,
}

impl DisplayMetrics {
    /// Metrics for a baseline 160 dpi display with no font scaling.
    pub const BASELINE: Self = Self {
        density: 1.0,
        scaled_density: 1.0,
        xdpi: 160.0,
    };

    /// Metrics for a display with the given density and no font scaling.
    pub const fn with_density(density: f32) -> Self {
        Self {
            density,
            scaled_density: density,
            xdpi: 160.0 * density,
        }
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl DimensionResolver for DisplayMetrics {
    fn resolve(&self, dimension: Dimension) -> f32 {
        let v = dimension.value;
        match dimension.unit {
            Unit::Px => v,
            Unit::Dip => v * self.density,
            Unit::Sp => v * self.scaled_density,
            Unit::Pt => v * self.xdpi / 72.0,
            Unit::In => v * self.xdpi,
            Unit::Mm => v * self.xdpi / 25.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_passes_through() {
        let m = DisplayMetrics::with_density(3.0);
        assert_eq!(m.resolve_px(Dimension::px(7.0)), 7);
    }

    #[test]
    fn dip_and_sp_scale_by_density() {
        let m = DisplayMetrics {
            density: 2.0,
            scaled_density: 2.5,
            xdpi: 320.0,
        };
        assert_eq!(m.resolve_px(Dimension::dip(3.0)), 6);
        assert_eq!(m.resolve_px(Dimension::sp(4.0)), 10);
        assert_eq!(m.resolve_px(Dimension::new(Unit::In, 1.0)), 320);
        assert_eq!(m.resolve_px(Dimension::new(Unit::Pt, 72.0)), 320);
    }

    #[test]
    fn fractional_results_truncate() {
        let m = DisplayMetrics::with_density(1.5);
        assert_eq!(m.resolve(Dimension::dip(3.0)), 4.5);
        assert_eq!(m.resolve_px(Dimension::dip(3.0)), 4);
    }
}
