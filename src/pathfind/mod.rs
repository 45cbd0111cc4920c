//! Shortest-path search over the board.
//!
//! Finds the direction and distance to the nearest tile satisfying a
//! caller-supplied predicate.

pub mod bfs;

pub use bfs::{search, search_avoiding, try_search, PathResult};
