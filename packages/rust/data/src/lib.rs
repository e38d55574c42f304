//! Data boundary with the console's CRUD screens.
//!
//! The board never fetches its own data. This crate supplies what the CRUD
//! side would: a demo dataset, JSON lead-file load/save for persistence
//! across runs, and the record kinds behind the non-pipeline screens.

pub mod leads;
pub mod records;

pub use leads::{load_leads, sample_leads, save_leads};
pub use records::{
    Course, Document, TeamProfile, sample_courses, sample_documents, sample_profiles,
};
