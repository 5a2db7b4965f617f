//! Self-play Runner for checkers agents
//!
//! This crate provides infrastructure for:
//! - Playing automated games where agents drive both sides through the same
//!   simulated drags a human would make
//! - Tallying results across a match
//! - Saving and reloading match reports
//!
//! # Usage
//!
//! ```bash
//! # Ten seeded random-vs-random games, report written to JSON
//! cargo run -p selfplay -- match --games 10 --seed 7 --out report.json
//!
//! # Print a saved report
//! cargo run -p selfplay -- show report.json
//! ```

mod error;
mod match_runner;
mod results;

pub use error::*;
pub use match_runner::*;
pub use results::*;
