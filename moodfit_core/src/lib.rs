#![forbid(unsafe_code)]

//! Core domain model and business logic for the Moodfit system.
//!
//! This crate provides:
//! - Domain types (emotions, tiers, exercises, workouts, progress)
//! - Exercise catalog keyed by emotion
//! - Workout composer and manual rescale
//! - Progress tracker (streaks, weekly consistency, totals)
//! - Persistence (history journal, record store, CSV archive)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod scaling;
pub mod composer;
pub mod tracker;
pub mod journal;
pub mod store;
pub mod archive;
pub mod history;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, default_catalog};
pub use config::Config;
pub use composer::{compose, rescale, RescaleDirection};
pub use tracker::record_completion;
pub use journal::{HistorySink, JsonlJournal};
pub use store::FileStore;
pub use history::load_history;
