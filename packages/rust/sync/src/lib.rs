//! Remote persistence boundary for lead stage changes.
//!
//! The board treats the remote service as write-only confirmation: stage
//! changes are pushed with a single `PUT /leads/{id}/status` per change and
//! responses are never folded back into local state.

mod client;

pub use client::StatusSync;
