//! Core board orchestration for Leadflow.
//!
//! This crate ties the gesture machine, drop-target resolution, and the
//! remote sync boundary into the transition workflow the render layers
//! drive ([`BoardEngine`], [`TransitionService`]).

pub mod engine;
pub mod transition;

pub use engine::{BoardEngine, BoardEvent};
pub use transition::{
    Committed, SilentListener, StageListener, TransitionOutcome, TransitionService,
};
