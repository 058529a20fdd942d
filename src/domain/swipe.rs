//! Drag tracking and commit/cancel resolution for the photo card.
//!
//! The surface tracks at most one gesture at a time:
//!
//! ```text
//! Idle -> Dragging -> Committing -> Idle
//!                  -> Cancelling -> Idle
//! ```
//!
//! Committing always ends with exactly one outcome, reported by [`SwipeSurface::tick`]
//! once the settle delay has elapsed. Cancelling never reports anything.

use super::SwipeDirection;
use std::time::{Duration, Instant};
use tracing::debug;

/// Tunables for the swipe gesture. One instance is shared by the whole app.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeConfig {
    /// A release commits only when `|offset_x|` is strictly greater than this
    pub commit_threshold: f32,
    /// Badges stay hidden until `|offset_x|` passes this
    pub badge_min_offset: f32,
    /// Offset at which badges reach full opacity
    pub badge_full_offset: f32,
    /// Degrees of tilt per unit of horizontal offset
    pub rotation_per_unit: f32,
    /// Rotation the card settles at when it leaves the viewport
    pub terminal_angle: f32,
    /// Duration of the exit / return animation, and the delay before an
    /// outcome is reported
    pub settle_delay: Duration,
}

impl SwipeConfig {
    /// Commit threshold in terminal columns
    pub const DEFAULT_COMMIT_THRESHOLD: f32 = 12.0;
    pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

    pub fn with_threshold(commit_threshold: f32) -> Self {
        Self {
            commit_threshold,
            badge_min_offset: commit_threshold / 2.0,
            badge_full_offset: commit_threshold,
            ..Self::default()
        }
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            commit_threshold: Self::DEFAULT_COMMIT_THRESHOLD,
            badge_min_offset: Self::DEFAULT_COMMIT_THRESHOLD / 2.0,
            badge_full_offset: Self::DEFAULT_COMMIT_THRESHOLD,
            rotation_per_unit: 0.8,
            terminal_angle: 30.0,
            settle_delay: Self::SETTLE_DELAY,
        }
    }
}

/// Displayed position of the card relative to its resting place
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardTransform {
    pub dx: f32,
    pub dy: f32,
    /// Degrees, positive leans right
    pub rotation: f32,
}

impl CardTransform {
    pub const NEUTRAL: CardTransform = CardTransform {
        dx: 0.0,
        dy: 0.0,
        rotation: 0.0,
    };

    fn lerp(from: CardTransform, to: CardTransform, t: f32) -> CardTransform {
        CardTransform {
            dx: from.dx + (to.dx - from.dx) * t,
            dy: from.dy + (to.dy - from.dy) * t,
            rotation: from.rotation + (to.rotation - from.rotation) * t,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == CardTransform::NEUTRAL
    }
}

/// Which affordance fades in while dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Keep,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Badge {
    pub kind: BadgeKind,
    /// 0.0..=1.0
    pub opacity: f32,
}

/// The single in-flight settle timer of a committing gesture.
///
/// Arming a new timer replaces the previous handle; consuming it in
/// [`SwipeSurface::tick`] is what makes the outcome fire at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTimer {
    pub direction: SwipeDirection,
    armed_at: Instant,
    due: Instant,
}

impl SettleTimer {
    pub fn arm(direction: SwipeDirection, now: Instant, delay: Duration) -> Self {
        Self {
            direction,
            armed_at: now,
            due: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }

    fn progress(&self, now: Instant) -> f32 {
        progress_between(self.armed_at, self.due, now)
    }
}

/// Result of releasing the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEnd {
    /// No gesture was in progress
    Ignored,
    /// The card is leaving in this direction; the outcome follows after the
    /// settle delay
    Committed(SwipeDirection),
    /// The card is returning to rest
    Cancelled,
}

/// Public summary of the surface state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipePhase {
    Idle,
    Dragging,
    Committing(SwipeDirection),
    Cancelling,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    origin_x: f32,
    origin_y: f32,
    offset_x: f32,
    offset_y: f32,
    past_threshold: bool,
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Idle,
    Dragging(DragState),
    Committing {
        from: CardTransform,
        to: CardTransform,
        timer: SettleTimer,
    },
    Cancelling {
        from: CardTransform,
        started: Instant,
    },
}

/// Presents one card and turns pointer input into swipe outcomes
#[derive(Debug)]
pub struct SwipeSurface {
    config: SwipeConfig,
    motion: Motion,
    viewport_width: f32,
}

impl SwipeSurface {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            motion: Motion::Idle,
            viewport_width: 80.0,
        }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Width the card has to clear when it leaves
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(1.0);
    }

    pub fn phase(&self) -> SwipePhase {
        match self.motion {
            Motion::Idle => SwipePhase::Idle,
            Motion::Dragging(_) => SwipePhase::Dragging,
            Motion::Committing { timer, .. } => SwipePhase::Committing(timer.direction),
            Motion::Cancelling { .. } => SwipePhase::Cancelling,
        }
    }

    /// Whether the displayed transform changes without further input
    pub fn is_animating(&self) -> bool {
        matches!(
            self.motion,
            Motion::Committing { .. } | Motion::Cancelling { .. }
        )
    }

    /// Starts a drag. The origin is taken relative to where the card is
    /// displayed right now, so a drag that begins mid-animation picks the
    /// card up where it is.
    ///
    /// Returns false while a commit is in flight.
    pub fn pointer_down(&mut self, x: f32, y: f32, now: Instant) -> bool {
        if matches!(self.motion, Motion::Committing { .. }) {
            debug!("pointer down ignored while committing");
            return false;
        }

        let shown = self.transform(now);
        self.motion = Motion::Dragging(DragState {
            origin_x: x - shown.dx,
            origin_y: y - shown.dy,
            offset_x: shown.dx,
            offset_y: shown.dy,
            past_threshold: shown.dx.abs() > self.config.commit_threshold,
        });
        debug!(x, y, "drag started");
        true
    }

    /// Updates the drag offset. Returns true when this move carried the card
    /// past the commit threshold.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let threshold = self.config.commit_threshold;
        let Motion::Dragging(drag) = &mut self.motion else {
            return false;
        };

        drag.offset_x = x - drag.origin_x;
        drag.offset_y = y - drag.origin_y;

        let past = drag.offset_x.abs() > threshold;
        let crossed = past && !drag.past_threshold;
        drag.past_threshold = past;
        crossed
    }

    /// Ends the drag and resolves it against the commit threshold
    pub fn pointer_up(&mut self, now: Instant) -> GestureEnd {
        let Motion::Dragging(drag) = self.motion else {
            return GestureEnd::Ignored;
        };

        if drag.offset_x.abs() > self.config.commit_threshold {
            let direction = SwipeDirection::from_offset(drag.offset_x);
            self.commit(direction, now);
            GestureEnd::Committed(direction)
        } else {
            self.cancel_drag(now);
            GestureEnd::Cancelled
        }
    }

    /// Sends a dragged card back to rest without resolving it, whatever its
    /// offset. Returns false when no drag was in progress.
    pub fn cancel_drag(&mut self, now: Instant) -> bool {
        let Motion::Dragging(drag) = self.motion else {
            return false;
        };
        debug!(offset_x = drag.offset_x, "drag cancelled");
        self.motion = Motion::Cancelling {
            from: self.drag_transform(&drag),
            started: now,
        };
        true
    }

    /// Commits without a drag, e.g. from a button or a key press.
    ///
    /// Returns false while a commit is already in flight.
    pub fn trigger(&mut self, direction: SwipeDirection, now: Instant) -> bool {
        if matches!(self.motion, Motion::Committing { .. }) {
            return false;
        }
        self.commit(direction, now);
        true
    }

    /// Advances timers. Returns the outcome of a committed gesture exactly
    /// once, when its settle delay has elapsed, and returns the surface to
    /// rest.
    pub fn tick(&mut self, now: Instant) -> Option<SwipeDirection> {
        match self.motion {
            Motion::Committing { timer, .. } if timer.is_due(now) => {
                self.motion = Motion::Idle;
                debug!(direction = ?timer.direction, "settle delay elapsed");
                Some(timer.direction)
            }
            Motion::Cancelling { started, .. }
                if now.saturating_duration_since(started) >= self.config.settle_delay =>
            {
                self.motion = Motion::Idle;
                None
            }
            _ => None,
        }
    }

    /// Time until [`Self::tick`] has something to do
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        match self.motion {
            Motion::Committing { timer, .. } => Some(timer.remaining(now)),
            Motion::Cancelling { started, .. } => Some(
                (started + self.config.settle_delay).saturating_duration_since(now),
            ),
            _ => None,
        }
    }

    /// Where the card is drawn at `now`
    pub fn transform(&self, now: Instant) -> CardTransform {
        match &self.motion {
            Motion::Idle => CardTransform::NEUTRAL,
            Motion::Dragging(drag) => self.drag_transform(drag),
            Motion::Committing { from, to, timer } => {
                CardTransform::lerp(*from, *to, ease_out_cubic(timer.progress(now)))
            }
            Motion::Cancelling { from, started } => {
                let t = progress_between(*started, *started + self.config.settle_delay, now);
                CardTransform::lerp(*from, CardTransform::NEUTRAL, ease_out_cubic(t))
            }
        }
    }

    /// Keep / delete affordance for the card as drawn at `now`
    pub fn badge(&self, now: Instant) -> Option<Badge> {
        self.badge_for_offset(self.transform(now).dx)
    }

    pub fn badge_for_offset(&self, offset_x: f32) -> Option<Badge> {
        if offset_x.abs() <= self.config.badge_min_offset {
            return None;
        }
        let kind = if offset_x > 0.0 {
            BadgeKind::Keep
        } else {
            BadgeKind::Delete
        };
        let opacity = (offset_x.abs() / self.config.badge_full_offset).min(1.0);
        Some(Badge { kind, opacity })
    }

    fn commit(&mut self, direction: SwipeDirection, now: Instant) {
        let from = self.transform(now);
        let to = CardTransform {
            dx: direction.sign() * (self.viewport_width + 1.0),
            dy: from.dy,
            rotation: direction.sign() * self.config.terminal_angle,
        };
        debug!(?direction, "committing swipe");
        self.motion = Motion::Committing {
            from,
            to,
            timer: SettleTimer::arm(direction, now, self.config.settle_delay),
        };
    }

    fn drag_transform(&self, drag: &DragState) -> CardTransform {
        CardTransform {
            dx: drag.offset_x,
            dy: drag.offset_y,
            rotation: drag.offset_x * self.config.rotation_per_unit,
        }
    }
}

impl Default for SwipeSurface {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

fn progress_between(start: Instant, end: Instant, now: Instant) -> f32 {
    let total = end.saturating_duration_since(start).as_secs_f32();
    if total <= 0.0 {
        return 1.0;
    }
    (now.saturating_duration_since(start).as_secs_f32() / total).clamp(0.0, 1.0)
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}
