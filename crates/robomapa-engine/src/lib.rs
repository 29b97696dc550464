//! Robomapa Engine
//!
//! Runs the map pipeline for one (quarter, crime type) selection:
//!
//! ```text
//! zone layer (loaded once) ─┐
//!                           ├─ reconcile ─ MapDocument
//! quarter report (per call) ┘
//! ```
//!
//! The zone layer is immutable and shared behind an `Arc`; every call loads
//! the quarter report again and builds a fresh document, so nothing carries
//! over between selections.

#![warn(missing_docs)]

mod config;
mod engine;
mod error;

pub use config::{DataConfig, StrategyKind};
pub use engine::{Engine, QuarterRun};
pub use error::{EngineError, Result};
