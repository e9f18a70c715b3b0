// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_avatar --heading-base-level=0

//! Understory Avatar: a headless circular avatar renderer.
//!
//! An avatar shows a bitmap cropped to a circle, or, when no bitmap is set, a
//! one- or two-letter placeholder glyph on a colored disc. It can draw a
//! border ring and a drop shadow, and it has a checked state (a colored disc
//! with a checkmark) entered through a two-phase shrink/grow animation.
//!
//! The crate does not rasterize and does not own a clock. The host provides:
//!
//! - a [`Surface`] with a handful of primitives (circles, a path, centered
//!   text, scoped transforms, and a scoped image fill),
//! - an [`AnimationDriver`] that runs scale animations and reports when they
//!   finish,
//! - [`DisplayMetrics`] to resolve density-independent sizes.
//!
//! [`CircularAvatar`] owns the configuration and derives everything else from
//! it lazily: the [`PaintSet`], the center-crop [`ImageTransform`], and the
//! per-frame [`FrameGeometry`]. Setters only mark what is stale and raise a
//! redraw flag, so many changes between two frames produce one draw.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_avatar::{AvatarAttributes, CircularAvatar, Dimension};
//!
//! let mut avatar = CircularAvatar::new(&AvatarAttributes::default());
//! avatar.on_bounds_changed(96, 96);
//! avatar.set_placeholder("ada");
//! avatar.set_placeholder_text_size(Dimension::sp(20.0)).unwrap();
//! avatar.set_border_width(Dimension::dip(2.0)).unwrap();
//!
//! assert_eq!(avatar.placeholder(), Some("AD"));
//! assert_eq!(avatar.geometry().radius, 48.0);
//! assert!(avatar.needs_redraw());
//! ```
//!
//! ## Checked state
//!
//! With animation allowed, [`CircularAvatar::set_checked`] starts a 150 ms
//! shrink on the driver. When the host reports its completion through
//! [`CircularAvatar::on_animation_finished`], the checked flag flips (at zero
//! scale), a redraw is requested, and the grow phase starts. See
//! [`CheckPhase`] and [`CheckTransition`] for how overlapping requests are
//! resolved.
//!
//! Call [`CircularAvatar::detach`] on teardown so an in-flight animation is
//! cancelled and its completion is never delivered.
//!
//! ## Customization
//!
//! A [`Presentation`] strategy decides whether the border is drawn for a
//! given state, how placeholder text is normalized, and which paints the
//! glyph and checkmark use.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod avatar;
mod checkmark;
mod compositor;
mod config;
mod error;
mod geometry;
mod image_fit;
mod paint;
mod placeholder;
mod presentation;
mod surface;
mod transition;
mod units;

pub use avatar::CircularAvatar;
pub use checkmark::{CHECKMARK_ROTATION, CheckmarkMetrics, checkmark_path};
pub use compositor::{Frame, compose};
pub use config::{
    AvatarAttributes, AvatarConfig, DEFAULT_BACKGROUND_COLOR, DEFAULT_BORDER_COLOR,
    DEFAULT_CHECK_STROKE_COLOR, DEFAULT_CHECK_STROKE_WIDTH_DIP, DEFAULT_CHECKED_BACKGROUND_COLOR,
    DEFAULT_SHADOW_COLOR, DEFAULT_TEXT_COLOR, argb,
};
pub use error::AvatarError;
pub use geometry::{
    FrameGeometry, SHADOW_INSET_FACTOR, Viewport, border_inset, content_offset, shadow_inset,
};
pub use image_fit::{FitInputs, ImageTransform, center_crop, crop_inset};
pub use paint::{ImageFill, Paint, PaintSet, PaintStyle, ShadowLayer};
pub use placeholder::{MAX_PLACEHOLDER_CHARS, format_placeholder_text};
pub use presentation::{BorderContext, DefaultPresentation, Presentation};
pub use surface::{FontMetrics, Scoped, Surface, SurfaceExt};
pub use transition::{
    AnimationDriver, AnimationHandle, AnimationRequest, CHECK_ANIMATION_DURATION_MS, CheckPhase,
    CheckTransition, Easing,
};
pub use units::{Dimension, DimensionResolver, DisplayMetrics, Unit};

pub use kurbo::{Affine, BezPath, Point, Vec2};
pub use peniko::{Color, ImageData};
