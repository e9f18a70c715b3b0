// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_avatar_ref --heading-base-level=0

//! Understory Avatar Reference Host.
//!
//! This crate provides two small host-side collaborators for
//! [`understory_avatar`]:
//!
//! - [`RecordingSurface`], a [`Surface`] that records every operation along
//!   with the surface state (transform, active image fill) at the time it was
//!   applied.
//! - [`ManualAnimator`], an [`AnimationDriver`] whose clock only moves when
//!   the caller advances it.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** rasterize to pixels.
//! - It does **not** shape text; font metrics are a fixed ratio of the text
//!   size.
//! - It is intended primarily for tests and debugging that want to assert on
//!   the emitted draw sequence and on the check transition step by step.
//!
//! ## Example
//!
//! ```rust
//! use understory_avatar::{AvatarAttributes, CheckPhase, CircularAvatar};
//! use understory_avatar_ref::{DrawOp, ManualAnimator, RecordingSurface};
//!
//! let mut avatar = CircularAvatar::new(&AvatarAttributes::default());
//! avatar.on_bounds_changed(64, 64);
//!
//! let mut animator = ManualAnimator::default();
//! avatar.set_checked(true, &mut animator);
//! assert_eq!(avatar.check_phase(), CheckPhase::ShrinkingOut);
//!
//! animator.drive(&mut avatar, 1_000);
//! assert_eq!(avatar.check_phase(), CheckPhase::Checked);
//!
//! let mut surface = RecordingSurface::default();
//! avatar.draw(&mut surface);
//! assert!(matches!(surface.draws().next(), Some((DrawOp::FillCircle { .. }, _))));
//! ```

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Affine, BezPath, Point};
use understory_avatar::{
    AnimationDriver, AnimationHandle, AnimationRequest, CircularAvatar, FontMetrics, ImageFill,
    Paint, Presentation, Surface,
};

/// Snapshot of the surface state when an operation was applied.
#[derive(Clone, Debug)]
pub struct SurfaceState {
    /// Current transform.
    pub transform: Affine,
    /// Number of transforms on the stack.
    pub transform_depth: u32,
    /// Active image fill, if any.
    pub image_fill: Option<ImageFill>,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            transform_depth: 0,
            image_fill: None,
        }
    }
}

/// Scoped state operation.
#[derive(Clone, Debug)]
pub enum StateOp {
    /// A transform was concatenated.
    PushTransform(Affine),
    /// The previous transform was restored.
    PopTransform,
    /// An image fill became active.
    PushImageFill(ImageFill),
    /// The image fill scope ended.
    PopImageFill,
}

/// Drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// [`Surface::fill_circle`].
    FillCircle {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Paint used.
        paint: Paint,
    },
    /// [`Surface::stroke_circle`].
    StrokeCircle {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Paint used.
        paint: Paint,
    },
    /// [`Surface::draw_path`].
    Path {
        /// Path drawn, untransformed.
        path: BezPath,
        /// Paint used.
        paint: Paint,
    },
    /// [`Surface::draw_text`].
    Text {
        /// Text drawn.
        text: String,
        /// Horizontal center and baseline.
        origin: Point,
        /// Paint used.
        paint: Paint,
    },
}

/// Event recorded by [`RecordingSurface`].
#[derive(Clone, Debug)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: SurfaceState,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: SurfaceState,
    },
}

/// A [`Surface`] that records operations instead of drawing them.
///
/// Font metrics are synthesized from the paint's text size: ascent is
/// `-ascent_ratio * size` and descent `descent_ratio * size`.
#[derive(Debug)]
pub struct RecordingSurface {
    events: Vec<Event>,
    state: SurfaceState,
    transform_stack: Vec<Affine>,
    fill_stack: Vec<Option<ImageFill>>,
    ascent_ratio: f64,
    descent_ratio: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::with_font_ratios(0.8, 0.2)
    }
}

impl RecordingSurface {
    /// A surface whose fonts have the given ascent and descent, as fractions
    /// of the text size.
    pub fn with_font_ratios(ascent_ratio: f64, descent_ratio: f64) -> Self {
        Self {
            events: Vec::new(),
            state: SurfaceState::default(),
            transform_stack: Vec::new(),
            fill_stack: Vec::new(),
            ascent_ratio,
            descent_ratio,
        }
    }

    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Iterate over the draw operations with their state snapshots.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp, &SurfaceState)> {
        self.events.iter().filter_map(|e| match e {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
    }

    /// Current state.
    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Returns `true` when every pushed scope has been popped.
    pub fn is_balanced(&self) -> bool {
        self.transform_stack.is_empty() && self.fill_stack.is_empty()
    }

    /// Clears all recorded events. Open scopes stay open.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn record_state(&mut self, op: StateOp) {
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn record_draw(&mut self, op: DrawOp) {
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "scope nesting never approaches u32::MAX"
    )]
    fn sync_depth(&mut self) {
        self.state.transform_depth = self.transform_stack.len() as u32;
    }
}

impl Surface for RecordingSurface {
    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.record_draw(DrawOp::FillCircle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.record_draw(DrawOp::StrokeCircle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn draw_path(&mut self, path: &BezPath, paint: &Paint) {
        self.record_draw(DrawOp::Path {
            path: path.clone(),
            paint: *paint,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, paint: &Paint) {
        self.record_draw(DrawOp::Text {
            text: text.to_string(),
            origin,
            paint: *paint,
        });
    }

    fn font_metrics(&self, paint: &Paint) -> FontMetrics {
        FontMetrics {
            ascent: -self.ascent_ratio * paint.text_size,
            descent: self.descent_ratio * paint.text_size,
        }
    }

    fn push_transform(&mut self, transform: Affine) {
        self.transform_stack.push(self.state.transform);
        self.state.transform *= transform;
        self.sync_depth();
        self.record_state(StateOp::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        // Unbalanced pops are tolerated and leave the identity in place.
        self.state.transform = self.transform_stack.pop().unwrap_or(Affine::IDENTITY);
        self.sync_depth();
        self.record_state(StateOp::PopTransform);
    }

    fn push_image_fill(&mut self, fill: &ImageFill) {
        self.fill_stack.push(self.state.image_fill.take());
        self.state.image_fill = Some(fill.clone());
        self.record_state(StateOp::PushImageFill(fill.clone()));
    }

    fn pop_image_fill(&mut self) {
        self.state.image_fill = self.fill_stack.pop().flatten();
        self.record_state(StateOp::PopImageFill);
    }
}

#[derive(Copy, Clone, Debug)]
struct Running {
    handle: AnimationHandle,
    request: AnimationRequest,
    elapsed_ms: u32,
}

/// An [`AnimationDriver`] driven by an explicit clock.
///
/// Animations only progress in [`advance`](Self::advance); completions are
/// returned to the caller, who delivers them to the avatar. [`drive`](Self::drive)
/// does both for a single avatar.
#[derive(Debug, Default)]
pub struct ManualAnimator {
    next_handle: u64,
    running: Vec<Running>,
    started: Vec<(AnimationHandle, AnimationRequest)>,
    cancelled: Vec<AnimationHandle>,
}

impl ManualAnimator {
    /// Every animation started so far, in order.
    pub fn started(&self) -> &[(AnimationHandle, AnimationRequest)] {
        &self.started
    }

    /// Every animation cancelled so far, in order.
    pub fn cancelled(&self) -> &[AnimationHandle] {
        &self.cancelled
    }

    /// Returns `true` if any animation is running.
    pub fn is_running(&self) -> bool {
        !self.running.is_empty()
    }

    /// Handles of the running animations.
    pub fn running(&self) -> impl Iterator<Item = AnimationHandle> + '_ {
        self.running.iter().map(|r| r.handle)
    }

    /// Current value of a running animation.
    pub fn value(&self, handle: AnimationHandle) -> Option<f32> {
        self.running
            .iter()
            .find(|r| r.handle == handle)
            .map(|r| r.request.value_at(r.elapsed_ms))
    }

    /// Scale an avatar driven by this animator would be drawn at: the value of
    /// the most recently started running animation, or 1 at rest.
    pub fn scale(&self) -> f32 {
        self.running
            .last()
            .map_or(1.0, |r| r.request.value_at(r.elapsed_ms))
    }

    /// Advance the clock by `ms`, returning the animations that finished, in
    /// start order. Finished animations are no longer running.
    pub fn advance(&mut self, ms: u32) -> Vec<AnimationHandle> {
        let mut finished = Vec::new();
        self.running.retain_mut(|r| {
            r.elapsed_ms = r.elapsed_ms.saturating_add(ms);
            if r.elapsed_ms >= r.request.duration_ms {
                finished.push(r.handle);
                false
            } else {
                true
            }
        });
        finished
    }

    /// Advance the clock by up to `ms` for `avatar`, delivering completions as
    /// they happen. Animations started by a completion run on the remaining
    /// time.
    pub fn drive<P: Presentation>(&mut self, avatar: &mut CircularAvatar<P>, ms: u32) {
        let mut remaining = ms;
        loop {
            let step = self
                .running
                .iter()
                .map(|r| r.request.duration_ms.saturating_sub(r.elapsed_ms))
                .min()
                .map_or(0, |left| left.min(remaining));
            if !self.is_running() || (step == 0 && remaining == 0) {
                return;
            }
            remaining -= step;
            let finished = self.advance(step);
            if finished.is_empty() {
                return;
            }
            for handle in finished {
                avatar.on_animation_finished(handle, self);
            }
        }
    }
}

impl AnimationDriver for ManualAnimator {
    fn start(&mut self, request: AnimationRequest) -> AnimationHandle {
        self.next_handle += 1;
        let handle = AnimationHandle(self.next_handle);
        self.running.push(Running {
            handle,
            request,
            elapsed_ms: 0,
        });
        self.started.push((handle, request));
        handle
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.running.retain(|r| r.handle != handle);
        self.cancelled.push(handle);
    }
}
