//! Shared types, error model, and configuration for Leadflow.
//!
//! This crate is the foundation depended on by all other Leadflow crates.
//! It provides:
//! - [`LeadflowError`] — the unified error type
//! - Domain types ([`Lead`], [`LeadId`], [`StageId`])
//! - Configuration ([`AppConfig`], [`BoardConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BoardConfig, DataConfig, SyncConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from, sync_endpoint,
};
pub use error::{LeadflowError, Result};
pub use types::{Lead, LeadId, StageId, format_usd};
