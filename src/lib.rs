//! Warden engine library.
//!
//! Exposes the board model, path search, decision policy, configuration,
//! and protocol modules for use by integration tests and the binary entry
//! point.

pub mod board;
pub mod config;
pub mod engine;
pub mod pathfind;
pub mod policy;
pub mod protocol;
