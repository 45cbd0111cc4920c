//! HAP protocol handling.
//!
//! This module implements the adapters between the game server and the
//! decision core: JSON snapshot decoding, the compact board layout notation,
//! and the command parser for the main loop.

pub mod json;
pub mod layout;
pub mod parser;

pub use json::{parse_snapshot, SnapshotError};
pub use layout::{format_layout, parse_layout, LayoutError};
pub use parser::{parse_command, Command};
