//! Catalog quality scoring.
//!
//! A catalog record is a set of named numeric attributes. A [`scoring::Scorer`]
//! combines weighted evaluation functions into one score, and the
//! [`throughput`] harness measures how many scorings a worker pool completes
//! per second.

pub mod catalog;
pub mod config;
pub mod output;
pub mod scoring;
pub mod throughput;
