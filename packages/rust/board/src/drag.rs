//! The active-drag state machine and its input sensors.
//!
//! A press does not start a drag by itself. Each input modality has its own
//! activation policy, tuned to its false-positive risk:
//!
//! - *Pointer*: the press becomes a drag once the pointer has travelled
//!   past a minimum distance from the press point, so an ordinary click
//!   never lifts a card. Both distance thresholds read strictly: at the
//!   boundary the gesture has not crossed it yet.
//! - *Touch*: the press becomes a drag once a hold delay has elapsed,
//!   provided the touch point stayed within a tolerance radius for the
//!   whole delay. Travel beyond the tolerance during the delay reclassifies
//!   the gesture as a scroll and the press can no longer activate.
//!
//! The controller never reads the clock. Callers pass `Instant`s in with
//! every event, so gesture timing is fully deterministic under test and the
//! hosting event loop stays the single source of time.

use std::time::{Duration, Instant};

use leadflow_shared::{BoardConfig, LeadId};

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Sensor configuration
// ---------------------------------------------------------------------------

/// Activation thresholds for the two input sensors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    /// Pointer travel beyond which a card lifts, in surface units.
    pub pointer_min_distance: f32,
    /// Touch hold delay before a card lifts.
    pub touch_hold: Duration,
    /// Touch travel allowed during the hold delay, in surface units.
    pub touch_tolerance: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            pointer_min_distance: 6.0,
            touch_hold: Duration::from_millis(250),
            touch_tolerance: 5.0,
        }
    }
}

impl From<&BoardConfig> for SensorConfig {
    fn from(config: &BoardConfig) -> Self {
        Self {
            pointer_min_distance: config.pointer_min_distance,
            touch_hold: Duration::from_millis(config.touch_hold_ms),
            touch_tolerance: config.touch_tolerance,
        }
    }
}

/// Which input modality produced a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// What a release produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// An active drag ended here; the caller resolves the drop target from
    /// the release position.
    Drop { lead: LeadId, at: Point },
    /// The press never activated; treat it as a plain click on the card.
    Click { lead: LeadId },
}

#[derive(Debug)]
enum Phase {
    Idle,
    /// Pressed, sensor policy not yet satisfied.
    Pending {
        kind: PointerKind,
        lead: LeadId,
        origin: Point,
        pressed_at: Instant,
        position: Point,
    },
    /// Sensor activated; the card is lifted.
    Active { lead: LeadId, position: Point },
}

/// Owns the gesture session from press to release or cancellation.
///
/// At most one session exists at a time; a fresh press silently discards
/// whatever session was in flight. A session never outlives its gesture:
/// every `release` and `cancel` path ends in the idle phase.
#[derive(Debug)]
pub struct DragController {
    config: SensorConfig,
    phase: Phase,
}

impl DragController {
    pub fn new(config: SensorConfig) -> Self {
        Self { config, phase: Phase::Idle }
    }

    /// The lead currently being dragged, if a sensor has activated.
    ///
    /// This is what the render layer keys the floating drag overlay on; a
    /// pending press that has not activated yet is deliberately invisible
    /// here so cards do not lift on a plain click or scroll.
    pub fn active_lead(&self) -> Option<&LeadId> {
        match &self.phase {
            Phase::Active { lead, .. } => Some(lead),
            _ => None,
        }
    }

    /// Current pointer position while a drag is active.
    pub fn position(&self) -> Option<Point> {
        match &self.phase {
            Phase::Active { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    /// Begin tracking a press on `lead` at `at`.
    pub fn press(&mut self, kind: PointerKind, lead: LeadId, at: Point, now: Instant) {
        self.phase = Phase::Pending {
            kind,
            lead,
            origin: at,
            pressed_at: now,
            position: at,
        };
    }

    /// Feed a pointer/touch move into the current session.
    ///
    /// For a pending pointer press this may activate the drag; for a
    /// pending touch press it may reject the gesture as a scroll. For an
    /// active drag it just tracks the overlay position.
    pub fn moved(&mut self, at: Point, now: Instant) {
        match &mut self.phase {
            Phase::Idle => {}
            Phase::Pending { kind: PointerKind::Mouse, lead, origin, position, .. } => {
                *position = at;
                if origin.distance_to(at) > self.config.pointer_min_distance {
                    let lead = lead.clone();
                    tracing::debug!(lead = %lead, "pointer drag activated");
                    self.phase = Phase::Active { lead, position: at };
                }
            }
            Phase::Pending {
                kind: PointerKind::Touch,
                lead,
                origin,
                pressed_at,
                position,
            } => {
                // Hold elapsed before this move arrived: the lift already
                // happened at the last within-tolerance position, and the
                // move belongs to the drag.
                if now.duration_since(*pressed_at) >= self.config.touch_hold {
                    let lead = lead.clone();
                    tracing::debug!(lead = %lead, "touch drag activated");
                    self.phase = Phase::Active { lead, position: at };
                    return;
                }
                *position = at;
                if origin.distance_to(at) > self.config.touch_tolerance {
                    // Travelled past the tolerance during the hold: this is
                    // a scroll, and the press can never become a drag.
                    tracing::trace!(lead = %lead, "touch press rejected as scroll");
                    self.phase = Phase::Idle;
                }
            }
            Phase::Active { position, .. } => *position = at,
        }
    }

    /// Advance gesture timing to `now`.
    ///
    /// The hosting loop calls this on its tick cadence so a held touch
    /// activates even when no further move events arrive.
    pub fn tick(&mut self, now: Instant) {
        if let Phase::Pending {
            kind: PointerKind::Touch,
            lead,
            pressed_at,
            position,
            ..
        } = &self.phase
        {
            if now.duration_since(*pressed_at) >= self.config.touch_hold {
                let lead = lead.clone();
                let position = *position;
                tracing::debug!(lead = %lead, "touch drag activated");
                self.phase = Phase::Active { lead, position };
            }
        }
    }

    /// End the session at `at`, reporting what the gesture amounted to.
    ///
    /// The controller is idle afterwards regardless of outcome.
    pub fn release(&mut self, at: Point, now: Instant) -> Option<ReleaseOutcome> {
        // A touch held past its delay counts as a drag even if the release
        // is the first event after the deadline.
        self.tick(now);

        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => None,
            Phase::Pending { lead, .. } => Some(ReleaseOutcome::Click { lead }),
            Phase::Active { lead, .. } => Some(ReleaseOutcome::Drop { lead, at }),
        }
    }

    /// Abandon the session (focus loss, escape key). The lead's stage is
    /// untouched; nothing downstream runs.
    pub fn cancel(&mut self) {
        if let Phase::Active { lead, .. } | Phase::Pending { lead, .. } = &self.phase {
            tracing::debug!(lead = %lead, "drag cancelled");
        }
        self.phase = Phase::Idle;
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(SensorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> DragController {
        DragController::new(SensorConfig::default())
    }

    fn l1() -> LeadId {
        LeadId::from("L1")
    }

    #[test]
    fn pointer_press_alone_is_not_a_drag() {
        let mut drag = controller();
        let t0 = Instant::now();
        drag.press(PointerKind::Mouse, l1(), Point::new(10.0, 10.0), t0);
        assert!(!drag.is_dragging());
        assert_eq!(drag.active_lead(), None);
    }

    #[test]
    fn pointer_activates_past_the_distance_threshold() {
        let mut drag = controller();
        let t0 = Instant::now();
        drag.press(PointerKind::Mouse, l1(), Point::new(10.0, 10.0), t0);

        // Travel of exactly the threshold is still a click in the making.
        drag.moved(Point::new(16.0, 10.0), t0);
        assert!(!drag.is_dragging());

        drag.moved(Point::new(16.1, 10.0), t0);
        assert!(drag.is_dragging());
        assert_eq!(drag.active_lead(), Some(&l1()));
        assert_eq!(drag.position(), Some(Point::new(16.1, 10.0)));
    }

    #[test]
    fn pointer_release_without_travel_is_a_click() {
        let mut drag = controller();
        let t0 = Instant::now();
        drag.press(PointerKind::Mouse, l1(), Point::new(10.0, 10.0), t0);
        drag.moved(Point::new(12.0, 10.0), t0);

        let outcome = drag.release(Point::new(12.0, 10.0), t0);
        assert_eq!(outcome, Some(ReleaseOutcome::Click { lead: l1() }));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn touch_activates_after_the_hold_delay() {
        let mut drag = controller();
        let t0 = Instant::now();
        drag.press(PointerKind::Touch, l1(), Point::new(10.0, 10.0), t0);

        drag.tick(t0 + Duration::from_millis(249));
        assert!(!drag.is_dragging());

        drag.tick(t0 + Duration::from_millis(250));
        assert!(drag.is_dragging());
        assert_eq!(drag.active_lead(), Some(&l1()));
    }

    #[test]
    fn touch_within_tolerance_still_activates() {
        let mut drag = controller();
        let t0 = Instant::now();
        drag.press(PointerKind::Touch, l1(), Point::new(10.0, 10.0), t0);

        drag.moved(Point::new(15.0, 10.0), t0 + Duration::from_millis(100));
        assert!(!drag.is_dragging());

        drag.tick(t0 + Duration::from_millis(300));
        assert!(drag.is_dragging());
    }

    #[test]
    fn touch_past_tolerance_is_a_scroll_for_good() {
        let mut drag = controller();
        let t0 = Instant::now();
        drag.press(PointerKind::Touch, l1(), Point::new(10.0, 10.0), t0);

        drag.moved(Point::new(15.1, 10.0), t0 + Duration::from_millis(100));
        assert!(!drag.is_dragging());

        // Holding on after the scroll never lifts the card.
        drag.tick(t0 + Duration::from_millis(500));
        assert!(!drag.is_dragging());
        assert_eq!(drag.release(Point::new(15.1, 10.0), t0 + Duration::from_millis(600)), None);
    }

    #[test]
    fn touch_release_after_hold_is_a_drop() {
        let mut drag = controller();
        let t0 = Instant::now();
        drag.press(PointerKind::Touch, l1(), Point::new(10.0, 10.0), t0);

        let outcome = drag.release(Point::new(10.0, 10.0), t0 + Duration::from_millis(300));
        assert_eq!(
            outcome,
            Some(ReleaseOutcome::Drop { lead: l1(), at: Point::new(10.0, 10.0) })
        );
    }

    #[test]
    fn active_release_reports_the_drop_position() {
        let mut drag = controller();
        let t0 = Instant::now();
        drag.press(PointerKind::Mouse, l1(), Point::new(0.0, 0.0), t0);
        drag.moved(Point::new(30.0, 40.0), t0);
        assert!(drag.is_dragging());

        let outcome = drag.release(Point::new(55.0, 40.0), t0);
        assert_eq!(
            outcome,
            Some(ReleaseOutcome::Drop { lead: l1(), at: Point::new(55.0, 40.0) })
        );
        assert!(!drag.is_dragging());
        assert_eq!(drag.position(), None);
    }

    #[test]
    fn cancel_ends_the_session_without_an_outcome() {
        let mut drag = controller();
        let t0 = Instant::now();
        drag.press(PointerKind::Mouse, l1(), Point::new(0.0, 0.0), t0);
        drag.moved(Point::new(10.0, 0.0), t0);
        assert!(drag.is_dragging());

        drag.cancel();
        assert!(!drag.is_dragging());
        assert_eq!(drag.release(Point::new(10.0, 0.0), t0), None);
    }

    #[test]
    fn new_press_discards_the_stale_session() {
        let mut drag = controller();
        let t0 = Instant::now();
        drag.press(PointerKind::Mouse, l1(), Point::new(0.0, 0.0), t0);
        drag.moved(Point::new(10.0, 0.0), t0);
        assert_eq!(drag.active_lead(), Some(&l1()));

        drag.press(PointerKind::Mouse, LeadId::from("L2"), Point::new(50.0, 0.0), t0);
        assert_eq!(drag.active_lead(), None);

        drag.moved(Point::new(60.0, 0.0), t0);
        assert_eq!(drag.active_lead(), Some(&LeadId::from("L2")));
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let config = SensorConfig {
            pointer_min_distance: 1.0,
            touch_hold: Duration::from_millis(10),
            touch_tolerance: 0.5,
        };
        let mut drag = DragController::new(config);
        let t0 = Instant::now();

        drag.press(PointerKind::Mouse, l1(), Point::new(0.0, 0.0), t0);
        drag.moved(Point::new(1.5, 0.0), t0);
        assert!(drag.is_dragging());
    }
}
