//! Board facade for render layers.
//!
//! A render layer owns one [`BoardEngine`] and talks to it in a loop:
//! register each column's drawn rectangle while drawing, feed input events
//! in as they arrive, and re-render from [`BoardEngine::grouped`] after any
//! event that reports a change. The gesture machine, hit testing, and
//! transition rules all live behind this surface, so the host never
//! touches a stage field directly.

use std::sync::Arc;
use std::time::Instant;

use leadflow_board::{
    DragController, DropTarget, LeadStore, Point, PointerKind, ReleaseOutcome, SensorConfig,
    StageColumn, registry, resolve_stage,
};
use leadflow_shared::{Lead, LeadId, StageId};

use crate::transition::{Committed, TransitionService};

/// What a completed gesture amounted to, from the host's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A drop committed this stage change.
    Moved(Committed),
    /// A press ended without ever becoming a drag.
    Clicked(LeadId),
}

/// One pipeline board: snapshot, gesture state, drop targets, transitions.
pub struct BoardEngine {
    store: LeadStore,
    drag: DragController,
    targets: Vec<DropTarget>,
    service: TransitionService,
}

impl BoardEngine {
    pub fn new(store: LeadStore, service: TransitionService, sensors: SensorConfig) -> Self {
        Self {
            store,
            drag: DragController::new(sensors),
            targets: Vec::new(),
            service,
        }
    }

    /// The snapshot to render from.
    pub fn store(&self) -> &LeadStore {
        &self.store
    }

    /// Column order plus each column's current members, recomputed from the
    /// snapshot on every call.
    pub fn grouped(&self) -> Vec<(&'static StageColumn, Vec<Arc<Lead>>)> {
        registry::columns()
            .iter()
            .map(|column| (column, self.store.by_stage(column.stage)))
            .collect()
    }

    /// Register the columns' on-screen rectangles for hit testing. The
    /// render layer calls this every frame with what it actually drew.
    pub fn set_targets(&mut self, targets: Vec<DropTarget>) {
        self.targets = targets;
    }

    // -----------------------------------------------------------------------
    // Gesture input
    // -----------------------------------------------------------------------

    pub fn press(&mut self, kind: PointerKind, lead: LeadId, at: Point, now: Instant) {
        self.drag.press(kind, lead, at, now);
    }

    pub fn moved(&mut self, at: Point, now: Instant) {
        self.drag.moved(at, now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.drag.tick(now);
    }

    pub fn cancel(&mut self) {
        self.drag.cancel();
    }

    /// End the gesture, resolve the drop, and apply the transition.
    ///
    /// Returns `None` for gestures with no effect: no session, a drop
    /// outside every column, or a drop on the lead's own column.
    pub fn release(&mut self, at: Point, now: Instant) -> Option<BoardEvent> {
        match self.drag.release(at, now)? {
            ReleaseOutcome::Click { lead } => Some(BoardEvent::Clicked(lead)),
            ReleaseOutcome::Drop { lead, at } => {
                let target = resolve_stage(at, &self.targets);
                let outcome = self.service.attempt(&self.store, &lead, target);
                // Fire and forget: the dispatched sync task, if any, runs
                // detached when the outcome drops here.
                self.store = outcome.store;
                outcome.committed.map(BoardEvent::Moved)
            }
        }
    }

    /// Move `lead` straight to `target`, skipping the gesture layer. The
    /// keyboard stage-move path; same validation, same sync dispatch.
    pub fn attempt_move(&mut self, lead: &LeadId, target: StageId) -> Option<Committed> {
        let outcome = self.service.attempt(&self.store, lead, Some(target));
        self.store = outcome.store;
        outcome.committed
    }

    // -----------------------------------------------------------------------
    // Drag state for rendering
    // -----------------------------------------------------------------------

    /// The lead to draw as the floating overlay, if a drag is active.
    pub fn active_lead(&self) -> Option<&LeadId> {
        self.drag.active_lead()
    }

    /// Where to draw the overlay.
    pub fn drag_position(&self) -> Option<Point> {
        self.drag.position()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
}
