//! Breadth-first search for the nearest matching tile.
//!
//! Design: explored nodes live in a flat arena and point at their parent by
//! index, so the first step of a finished path is recovered by walking the
//! parent chain back to the root. A tile is marked visited when it is
//! enqueued, so only the first path to reach it claims it. Only unoccupied
//! tiles are expanded; any tile (occupied or not) can be the match.
//!
//! Neighbours are generated in `Direction::CARDINALS` order, which makes the
//! result deterministic: among equidistant matches the one reached through
//! the earliest first step wins.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt;

use crate::board::{Board, Coord, Direction, HeroRef, Tile};

/// The nearest match found by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathResult {
    /// First step to take from the origin. Never `Stay`.
    pub direction: Direction,
    /// Number of steps from the origin to the matched tile (at least 1).
    pub distance: usize,
    pub coord: Coord,
    /// Copy of the matched tile, so hero and mine attributes travel with
    /// the result.
    pub tile: Tile,
}

impl PathResult {
    /// Attributes of the matched hero, for hero searches.
    pub fn hero(&self) -> Option<&HeroRef> {
        self.tile.hero()
    }
}

/// An explored node: where it is, how it was reached, and from where.
#[derive(Debug, Clone, Copy)]
struct Node {
    coord: Coord,
    /// `None` marks the root.
    arrival: Option<Direction>,
    parent: Option<usize>,
}

/// Flat visited set indexed by `row * size + col`.
struct Visited {
    size: usize,
    seen: Vec<bool>,
}

impl Visited {
    fn new(size: usize) -> Self {
        Visited {
            size,
            seen: vec![false; size * size],
        }
    }

    fn contains(&self, c: Coord) -> bool {
        self.seen[c.row * self.size + c.col]
    }

    fn insert(&mut self, c: Coord) {
        self.seen[c.row * self.size + c.col] = true;
    }
}

/// Finds the nearest tile satisfying `predicate`, searching from `origin`.
///
/// Returns `None` if no matching tile is reachable, including when `origin`
/// is off the board.
pub fn search<F>(board: &Board, origin: Coord, mut predicate: F) -> Option<PathResult>
where
    F: FnMut(&Tile) -> bool,
{
    try_search(board, origin, |t| Ok::<bool, Infallible>(predicate(t)))
}

/// Like [`search`], but with a fallible predicate. A predicate error counts
/// as a non-match for that tile and never aborts the search.
pub fn try_search<F, E>(board: &Board, origin: Coord, predicate: F) -> Option<PathResult>
where
    F: FnMut(&Tile) -> Result<bool, E>,
    E: fmt::Display,
{
    run(board, origin, None, predicate)
}

/// Like [`search`], but never starts a path with `forbidden`: the origin's
/// neighbour in that direction is neither matched nor expanded from the
/// root. It can still be reached later through another route.
pub fn search_avoiding<F>(
    board: &Board,
    origin: Coord,
    forbidden: Direction,
    mut predicate: F,
) -> Option<PathResult>
where
    F: FnMut(&Tile) -> bool,
{
    run(board, origin, Some(forbidden), |t| {
        Ok::<bool, Infallible>(predicate(t))
    })
}

fn run<F, E>(
    board: &Board,
    origin: Coord,
    forbidden: Option<Direction>,
    mut predicate: F,
) -> Option<PathResult>
where
    F: FnMut(&Tile) -> Result<bool, E>,
    E: fmt::Display,
{
    board.tile(origin)?;

    let mut arena = vec![Node {
        coord: origin,
        arrival: None,
        parent: None,
    }];
    let mut visited = Visited::new(board.size());
    visited.insert(origin);
    let mut queue = VecDeque::with_capacity(board.size() * board.size());
    queue.push_back(0usize);

    while let Some(idx) = queue.pop_front() {
        let node = arena[idx];
        for dir in Direction::CARDINALS {
            if node.parent.is_none() && forbidden == Some(dir) {
                continue;
            }
            let Some(next) = board.tile_toward(node.coord, dir) else {
                continue;
            };
            if visited.contains(next.coord) {
                continue;
            }

            let is_goal = match predicate(next) {
                Ok(matched) => matched,
                Err(e) => {
                    tracing::trace!(tile = %next.coord, error = %e, "predicate failed, treating as no match");
                    false
                }
            };

            if is_goal {
                let (direction, distance) = first_step(&arena, idx, dir);
                return Some(PathResult {
                    direction,
                    distance,
                    coord: next.coord,
                    tile: *next,
                });
            }

            if next.is_unoccupied() {
                visited.insert(next.coord);
                arena.push(Node {
                    coord: next.coord,
                    arrival: Some(dir),
                    parent: Some(idx),
                });
                queue.push_back(arena.len() - 1);
            }
        }
    }

    None
}

/// Walks back from `from` (the node the goal was seen from, having stepped
/// `last` to reach it) and returns the first direction of the path and its
/// length.
fn first_step(arena: &[Node], from: usize, last: Direction) -> (Direction, usize) {
    let mut direction = last;
    let mut distance = 1;
    let mut node = arena[from];
    while let (Some(arrival), Some(parent)) = (node.arrival, node.parent) {
        direction = arrival;
        distance += 1;
        node = arena[parent];
    }
    (direction, distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{TileKind, TileType};

    fn is(t: TileType) -> impl Fn(&Tile) -> bool {
        move |tile| tile.tile_type() == t
    }

    #[test]
    fn finds_adjacent_occupied_match() {
        let mut board = Board::open(3);
        board.set(Coord::new(0, 1), TileKind::HealthWell);
        let r = search(&board, Coord::new(1, 1), is(TileType::HealthWell)).unwrap();
        assert_eq!(r.direction, Direction::North);
        assert_eq!(r.distance, 1);
        assert_eq!(r.coord, Coord::new(0, 1));
    }

    #[test]
    fn reports_first_step_of_longer_path() {
        // origin (0,0); wall at (0,1) forces the route down then right.
        let mut board = Board::open(3);
        board.set(Coord::new(0, 1), TileKind::Wall);
        board.set(Coord::new(0, 2), TileKind::HealthWell);
        let r = search(&board, Coord::new(0, 0), is(TileType::HealthWell)).unwrap();
        assert_eq!(r.direction, Direction::South);
        assert_eq!(r.distance, 4);
    }

    #[test]
    fn tie_prefers_earlier_cardinal() {
        let mut board = Board::open(5);
        board.set(Coord::new(2, 4), TileKind::HealthWell);
        board.set(Coord::new(4, 2), TileKind::HealthWell);
        board.set(Coord::new(2, 0), TileKind::HealthWell);
        let r = search(&board, Coord::new(2, 2), is(TileType::HealthWell)).unwrap();
        assert_eq!(r.direction, Direction::East);
        assert_eq!(r.distance, 2);
        assert_eq!(r.coord, Coord::new(2, 4));
    }

    #[test]
    fn no_match_returns_none() {
        let board = Board::open(4);
        assert!(search(&board, Coord::new(0, 0), is(TileType::DiamondMine)).is_none());
    }

    #[test]
    fn off_board_origin_returns_none() {
        let board = Board::open(2);
        assert!(search(&board, Coord::new(2, 0), |_| true).is_none());
    }

    #[test]
    fn occupied_tiles_are_not_expanded() {
        // A mine sits behind a health well in a one-wide corridor.
        let mut board = Board::open(3);
        for c in 0..3 {
            board.set(Coord::new(1, c), TileKind::Wall);
        }
        board.set(Coord::new(0, 1), TileKind::HealthWell);
        board.set(Coord::new(0, 2), TileKind::DiamondMine { owner: None });
        assert!(search(&board, Coord::new(0, 0), is(TileType::DiamondMine)).is_none());
    }

    #[test]
    fn walled_off_match_is_unreachable() {
        let mut board = Board::open(5);
        board.set(Coord::new(2, 2), TileKind::HealthWell);
        for (r, c) in [(1, 2), (2, 1), (2, 3), (3, 2)] {
            board.set(Coord::new(r, c), TileKind::Wall);
        }
        assert!(search(&board, Coord::new(0, 0), is(TileType::HealthWell)).is_none());
        // Adjacent to the well, it is found even though its other sides are walled.
        board.set(Coord::new(1, 2), TileKind::Unoccupied);
        let r = search(&board, Coord::new(1, 2), is(TileType::HealthWell)).unwrap();
        assert_eq!((r.direction, r.distance), (Direction::South, 1));
    }

    #[test]
    fn predicate_errors_are_non_matches() {
        let mut board = Board::open(3);
        board.set(Coord::new(0, 1), TileKind::Wall);
        board.set(Coord::new(2, 1), TileKind::HealthWell);
        let r = try_search(&board, Coord::new(1, 1), |t| match t.tile_type() {
            TileType::Wall => Err("walls are not supported"),
            other => Ok(other == TileType::HealthWell || other == TileType::Wall),
        })
        .unwrap();
        assert_eq!(r.coord, Coord::new(2, 1));
        assert_eq!(r.direction, Direction::South);
    }

    #[test]
    fn avoiding_skips_forbidden_first_step() {
        let mut board = Board::open(3);
        board.set(Coord::new(0, 1), TileKind::HealthWell);
        let r = search_avoiding(&board, Coord::new(1, 1), Direction::North, is(TileType::HealthWell))
            .unwrap();
        assert_ne!(r.direction, Direction::North);
        assert_eq!(r.distance, 3);
        assert_eq!(r.direction, Direction::East);
    }

    #[test]
    fn origin_is_never_matched() {
        let mut board = Board::open(1);
        board.set(Coord::new(0, 0), TileKind::HealthWell);
        assert!(search(&board, Coord::new(0, 0), is(TileType::HealthWell)).is_none());
    }
}
