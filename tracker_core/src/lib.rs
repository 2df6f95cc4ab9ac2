#![forbid(unsafe_code)]

//! Core domain model and calculations for the activity tracker.
//!
//! This crate provides:
//! - Energy formulas (distance, mean speed, calories)
//! - The personal profile attached to every record
//! - Parsers and reports for training and daily-steps records
//! - The driver loop that pushes a batch of raw records through a sink

pub mod error;
pub mod duration;
pub mod spent_energy;
pub mod personal_data;
pub mod day_steps;
pub mod training;
pub mod action_info;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use personal_data::Profile;
pub use day_steps::DaySteps;
pub use training::{ActivityKind, Training};
pub use action_info::{info, DataParser, InfoEvent, InfoSink, InfoSummary, Stage};
pub use config::Config;
