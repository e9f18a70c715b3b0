// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Check-state transition: shrink out, swap content, grow back in.
//!
//! ## States
//!
//! ```text
//!            request(v), animated                 shrink finished:
//! Unchecked ─────────────────────▶ ShrinkingOut ── flip flag, redraw ──▶ GrowingIn ──▶ Checked
//!     ▲                                                                               │
//!     └──────────── GrowingIn ◀── flip flag, redraw ── ShrinkingOut ◀─────────────────┘
//! ```
//!
//! Without animation the flag flips immediately and no intermediate state is
//! entered.
//!
//! The checked flag only ever changes between the two animation phases, when
//! the avatar is at zero scale, so old and new content are never visible at
//! the same time.
//!
//! ## Requests during a transition
//!
//! The most recent request wins and is applied at the next safe point:
//!
//! - While shrinking, a request replaces the pending target. If the new
//!   target equals the current flag, the swap at the midpoint is skipped and
//!   the avatar grows back with unchanged content.
//! - While growing, a request is queued and starts a new shrink once the
//!   grow completes. A request that returns to the current flag clears the
//!   queue.
//! - A request with animation disabled cancels the running animation and
//!   applies immediately.

use tracing::{debug, trace};

/// Duration of each animation phase, in milliseconds.
pub const CHECK_ANIMATION_DURATION_MS: u32 = 150;

/// Easing curve for an animation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Starts fast and slows down: `1 - (1 - t)^2`.
    #[default]
    Decelerate,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` through the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Parameters of a scalar animation the host should run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationRequest {
    /// Start value.
    pub from: f32,
    /// End value.
    pub to: f32,
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Easing curve.
    pub easing: Easing,
}

impl AnimationRequest {
    /// The shrink phase: scale 1 → 0.
    pub const SHRINK: Self = Self {
        from: 1.0,
        to: 0.0,
        duration_ms: CHECK_ANIMATION_DURATION_MS,
        easing: Easing::Decelerate,
    };

    /// The grow phase: scale 0 → 1.
    pub const GROW: Self = Self {
        from: 0.0,
        to: 1.0,
        duration_ms: CHECK_ANIMATION_DURATION_MS,
        easing: Easing::Decelerate,
    };

    /// Animated value `elapsed_ms` after the start.
    #[allow(
        clippy::cast_precision_loss,
        reason = "animation durations are far below f32's exact integer range"
    )]
    pub fn value_at(&self, elapsed_ms: u32) -> f32 {
        let t = if self.duration_ms == 0 {
            1.0
        } else {
            elapsed_ms as f32 / self.duration_ms as f32
        };
        let eased = self.easing.apply(t);
        self.from + (self.to - self.from) * eased
    }
}

/// Opaque handle to an animation started by an [`AnimationDriver`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationHandle(pub u64);

/// Host animation scheduler.
///
/// The driver animates the avatar's scale (on both axes or just X, as the
/// host prefers) and reports completion by calling
/// [`CircularAvatar::on_animation_finished`](crate::CircularAvatar::on_animation_finished)
/// with the handle, once, on the UI thread.
pub trait AnimationDriver {
    /// Start an animation.
    fn start(&mut self, request: AnimationRequest) -> AnimationHandle;

    /// Cancel an animation; its completion must not be reported.
    ///
    /// The driver should snap the animated scale back to 1.
    fn cancel(&mut self, handle: AnimationHandle);
}

/// Observable phase of the check transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CheckPhase {
    /// Showing unchecked content at rest.
    Unchecked,
    /// Scaling down; content not yet swapped.
    ShrinkingOut,
    /// Scaling up; content already swapped.
    GrowingIn,
    /// Showing checked content at rest.
    Checked,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flight {
    Idle,
    Shrinking {
        handle: AnimationHandle,
        target: bool,
    },
    Growing {
        handle: AnimationHandle,
        queued: Option<bool>,
    },
}

/// The check-state machine.
///
/// Owns the handle of the animation in flight, so it can be cancelled on
/// teardown and stale completions can be told apart from current ones.
///
/// Requests made during a transition resolve to the most recent one, applied
/// at the next safe point. While shrinking, a request replaces the pending
/// target. While growing, it is queued until the grow completes. A request
/// with animation disabled cancels the running animation and applies at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CheckTransition {
    checked: bool,
    flight: Flight,
}

impl CheckTransition {
    /// A transition at rest.
    pub const fn new(checked: bool) -> Self {
        Self {
            checked,
            flight: Flight::Idle,
        }
    }

    /// Whether the checked content is currently shown.
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// The state the transition is heading to once every pending request is
    /// applied.
    pub fn target(&self) -> bool {
        match self.flight {
            Flight::Idle => self.checked,
            Flight::Shrinking { target, .. } => target,
            Flight::Growing { queued, .. } => queued.unwrap_or(self.checked),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> CheckPhase {
        match self.flight {
            Flight::Shrinking { .. } => CheckPhase::ShrinkingOut,
            Flight::Growing { .. } => CheckPhase::GrowingIn,
            Flight::Idle if self.checked => CheckPhase::Checked,
            Flight::Idle => CheckPhase::Unchecked,
        }
    }

    /// The handle of the animation in flight, if any.
    pub fn in_flight(&self) -> Option<AnimationHandle> {
        match self.flight {
            Flight::Idle => None,
            Flight::Shrinking { handle, .. } | Flight::Growing { handle, .. } => Some(handle),
        }
    }

    /// Request the checked state `checked`.
    ///
    /// Returns `true` when the content changed and a redraw is needed.
    pub fn request<D: AnimationDriver + ?Sized>(
        &mut self,
        checked: bool,
        animate: bool,
        driver: &mut D,
    ) -> bool {
        if !animate {
            if self.in_flight().is_none() && checked == self.checked {
                return false;
            }
            self.cancel(driver);
            let changed = self.checked != checked;
            self.checked = checked;
            debug!(checked, "check state applied without animation");
            return changed;
        }

        if checked == self.target() {
            return false;
        }

        let committed = self.checked;
        match &mut self.flight {
            Flight::Idle => {}
            Flight::Shrinking { target, .. } => {
                *target = checked;
                trace!(to = checked, "check transition: retargeted while shrinking");
                return false;
            }
            Flight::Growing { queued, .. } => {
                *queued = (checked != committed).then_some(checked);
                trace!(?queued, "check transition: queued while growing");
                return false;
            }
        }

        let handle = driver.start(AnimationRequest::SHRINK);
        self.flight = Flight::Shrinking {
            handle,
            target: checked,
        };
        debug!(to = checked, ?handle, "check transition: shrinking out");
        false
    }

    /// Handle completion of the animation `handle`.
    ///
    /// Returns `true` when the content was swapped and a redraw is needed.
    /// Completions of animations that are no longer in flight are ignored.
    pub fn finished<D: AnimationDriver + ?Sized>(
        &mut self,
        handle: AnimationHandle,
        animate: bool,
        driver: &mut D,
    ) -> bool {
        if self.in_flight() != Some(handle) {
            trace!(?handle, "ignoring completion of a stale animation");
            return false;
        }

        match self.flight {
            Flight::Idle => false,
            Flight::Shrinking { target, .. } => {
                let swapped = self.checked != target;
                self.checked = target;
                let handle = driver.start(AnimationRequest::GROW);
                self.flight = Flight::Growing {
                    handle,
                    queued: None,
                };
                debug!(checked = self.checked, swapped, "check transition: growing in");
                // The swap happens at zero scale; redraw so the grow phase
                // shows the new content.
                true
            }
            Flight::Growing { queued, .. } => {
                self.flight = Flight::Idle;
                debug!(checked = self.checked, "check transition: done");
                match queued {
                    Some(next) if next != self.checked => self.request(next, animate, driver),
                    _ => false,
                }
            }
        }
    }

    /// Cancel the animation in flight and settle on the current flag.
    ///
    /// A pending target that has not been swapped in yet is dropped.
    pub fn cancel<D: AnimationDriver + ?Sized>(&mut self, driver: &mut D) {
        if let Some(handle) = self.in_flight() {
            driver.cancel(handle);
            debug!(?handle, checked = self.checked, "check transition cancelled");
        }
        self.flight = Flight::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Driver {
        started: Vec<(AnimationHandle, AnimationRequest)>,
        cancelled: Vec<AnimationHandle>,
    }

    impl Driver {
        fn last(&self) -> AnimationHandle {
            self.started.last().unwrap().0
        }
    }

    impl AnimationDriver for Driver {
        fn start(&mut self, request: AnimationRequest) -> AnimationHandle {
            let handle = AnimationHandle(self.started.len() as u64);
            self.started.push((handle, request));
            handle
        }

        fn cancel(&mut self, handle: AnimationHandle) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn decelerate_curve() {
        assert_eq!(Easing::Decelerate.apply(0.0), 0.0);
        assert_eq!(Easing::Decelerate.apply(0.5), 0.75);
        assert_eq!(Easing::Decelerate.apply(1.0), 1.0);
        assert_eq!(Easing::Decelerate.apply(3.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert_eq!(AnimationRequest::SHRINK.value_at(75), 0.25);
        assert_eq!(AnimationRequest::GROW.value_at(150), 1.0);
    }

    #[test]
    fn without_animation_flips_immediately() {
        let mut t = CheckTransition::new(false);
        let mut d = Driver::default();
        assert!(t.request(true, false, &mut d));
        assert!(t.is_checked());
        assert_eq!(t.phase(), CheckPhase::Checked);
        assert!(d.started.is_empty());
        assert!(!t.request(true, false, &mut d));
    }

    #[test]
    fn flag_flips_only_between_phases() {
        let mut t = CheckTransition::new(false);
        let mut d = Driver::default();

        assert!(!t.request(true, true, &mut d));
        assert_eq!(t.phase(), CheckPhase::ShrinkingOut);
        assert!(!t.is_checked());
        assert_eq!(d.started[0].1, AnimationRequest::SHRINK);

        let shrink = d.last();
        assert!(t.finished(shrink, true, &mut d));
        assert!(t.is_checked());
        assert_eq!(t.phase(), CheckPhase::GrowingIn);
        assert_eq!(d.started[1].1, AnimationRequest::GROW);

        let grow = d.last();
        assert!(!t.finished(grow, true, &mut d));
        assert_eq!(t.phase(), CheckPhase::Checked);
        assert_eq!(d.started.len(), 2);
    }

    #[test]
    fn reverting_while_shrinking_skips_the_swap() {
        let mut t = CheckTransition::new(false);
        let mut d = Driver::default();
        t.request(true, true, &mut d);
        t.request(false, true, &mut d);
        assert!(!t.target());
        assert_eq!(d.started.len(), 1);

        let shrink = d.last();
        t.finished(shrink, true, &mut d);
        assert!(!t.is_checked());
        assert_eq!(t.phase(), CheckPhase::GrowingIn);
        let grow = d.last();
        t.finished(grow, true, &mut d);
        assert_eq!(t.phase(), CheckPhase::Unchecked);
    }

    #[test]
    fn request_while_growing_runs_after_grow() {
        let mut t = CheckTransition::new(false);
        let mut d = Driver::default();
        t.request(true, true, &mut d);
        t.finished(d.last(), true, &mut d);
        assert!(t.is_checked());

        assert!(!t.request(false, true, &mut d));
        assert!(t.is_checked());
        assert!(!t.target());
        assert_eq!(d.started.len(), 2);

        t.finished(d.last(), true, &mut d);
        assert_eq!(t.phase(), CheckPhase::ShrinkingOut);
        assert_eq!(d.started.len(), 3);
        t.finished(d.last(), true, &mut d);
        assert!(!t.is_checked());
    }

    #[test]
    fn returning_to_current_flag_clears_queue() {
        let mut t = CheckTransition::new(false);
        let mut d = Driver::default();
        t.request(true, true, &mut d);
        t.finished(d.last(), true, &mut d);
        t.request(false, true, &mut d);
        t.request(true, true, &mut d);
        t.finished(d.last(), true, &mut d);
        assert_eq!(t.phase(), CheckPhase::Checked);
        assert_eq!(d.started.len(), 2);
    }

    #[test]
    fn stale_completions_are_ignored() {
        let mut t = CheckTransition::new(false);
        let mut d = Driver::default();
        t.request(true, true, &mut d);
        assert!(!t.finished(AnimationHandle(99), true, &mut d));
        assert_eq!(t.phase(), CheckPhase::ShrinkingOut);
    }

    #[test]
    fn cancel_settles_and_cancels_handle() {
        let mut t = CheckTransition::new(false);
        let mut d = Driver::default();
        t.request(true, true, &mut d);
        let shrink = d.last();
        t.cancel(&mut d);
        assert_eq!(d.cancelled, [shrink]);
        assert_eq!(t.phase(), CheckPhase::Unchecked);
        assert!(!t.finished(shrink, true, &mut d));
        assert!(!t.is_checked());
    }

    #[test]
    fn immediate_request_during_animation_cancels_it() {
        let mut t = CheckTransition::new(false);
        let mut d = Driver::default();
        t.request(true, true, &mut d);
        let shrink = d.last();
        assert!(t.request(true, false, &mut d));
        assert_eq!(d.cancelled, [shrink]);
        assert!(t.is_checked());
        assert_eq!(t.phase(), CheckPhase::Checked);
    }
}
