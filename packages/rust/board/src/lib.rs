//! Pipeline-board building blocks: stage registry, lead snapshots, gesture
//! sensing, and drop-target hit testing.
//!
//! Everything in this crate is synchronous and pure with respect to I/O.
//! The pieces compose into one gesture flow: a render layer feeds presses
//! and moves into [`DragController`], registers each column's on-screen
//! [`DropTarget`] as it draws, resolves the release point with
//! [`resolve_stage`], and applies the outcome to a [`LeadStore`] snapshot.

pub mod collision;
pub mod drag;
pub mod geometry;
pub mod registry;
pub mod store;

pub use collision::{DropTarget, resolve_stage};
pub use drag::{DragController, PointerKind, ReleaseOutcome, SensorConfig};
pub use geometry::{Point, Region};
pub use registry::{StageColumn, column, columns, stage_ids};
pub use store::LeadStore;
