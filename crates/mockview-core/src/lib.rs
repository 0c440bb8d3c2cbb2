//! mockview-core — question generation, answer scoring, and grading.
//!
//! This crate defines the domain catalog, the scoring heuristics, and the
//! interview and batch-grading flows that the rest of mockview builds on.

pub mod agents;
pub mod catalog;
pub mod chat;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod feedback;
pub mod generator;
pub mod model;
pub mod parser;
pub mod references;
pub mod report;
pub mod results;
pub mod session;
pub mod statistics;
pub mod text;
pub mod traits;
