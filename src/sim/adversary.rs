//! Adversary decision making
//!
//! Adversaries only decide at junctions. In corridors they follow the path,
//! at dead ends they turn back, and at intersections they score each exit by
//! Manhattan distance to the agent: closest while pursuing, farthest while
//! fleeing. Pursuit ties are broken by coin flip from the injected RNG.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Direction;
use super::maze::Maze;
use crate::manhattan;

/// Behaviour for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Pursuing,
    Fleeing,
}

/// A pursuing adversary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adversary {
    /// Spawn tile; captured adversaries return here
    pub start: IVec2,
    pub pos: IVec2,
    pub dir: Option<Direction>,
    pub vulnerable: bool,
}

impl Adversary {
    /// Fresh adversaries head out of the base
    pub const SPAWN_HEADING: Direction = Direction::Up;

    pub fn new(start: IVec2) -> Self {
        Self {
            start,
            pos: start,
            dir: Some(Self::SPAWN_HEADING),
            vulnerable: false,
        }
    }

    /// Back to the spawn tile, no longer vulnerable
    pub fn respawn(&mut self) {
        *self = Self::new(self.start);
    }

    pub fn mode(&self) -> Mode {
        if self.vulnerable {
            Mode::Fleeing
        } else {
            Mode::Pursuing
        }
    }

    /// Enter the vulnerable window and turn around
    pub fn frighten(&mut self) {
        self.vulnerable = true;
        self.dir = self.dir.map(Direction::reverse);
    }

    /// Walkable exits, never doubling back unless standing still.
    /// Order is Left, Right, Up, Down.
    pub fn candidates(&self, maze: &Maze) -> Vec<Direction> {
        let back = self.dir.map(Direction::reverse);
        Direction::ALL
            .into_iter()
            .filter(|&d| Some(d) != back && maze.is_walkable(self.pos + d.delta()))
            .collect()
    }

    /// Advance one tick toward (or away from) `target` and return the new position
    pub fn step<R: Rng + ?Sized>(&mut self, maze: &Maze, target: IVec2, rng: &mut R) -> IVec2 {
        let candidates = self.candidates(maze);

        match (candidates.as_slice(), self.dir) {
            ([], Some(dir)) => {
                let back = dir.reverse();
                if maze.is_walkable(self.pos + back.delta()) {
                    self.dir = Some(back);
                }
                // Otherwise walled in on all sides: stay put this tick
            }
            ([], None) => {}
            ([only], Some(_)) => self.dir = Some(*only),
            _ => self.dir = self.choose(&candidates, target, rng),
        }

        let Some(dir) = self.dir else {
            return self.pos;
        };

        let next = target_tile(maze, self.pos, dir);
        if maze.is_walkable(next) {
            self.pos = next;
        } else if !candidates.is_empty() {
            let fallback = candidates[rng.random_range(0..candidates.len())];
            self.dir = Some(fallback);
            let next = self.pos + fallback.delta();
            if maze.is_walkable(next) {
                self.pos = next;
            }
        }

        self.pos
    }

    fn choose<R: Rng + ?Sized>(
        &self,
        candidates: &[Direction],
        target: IVec2,
        rng: &mut R,
    ) -> Option<Direction> {
        let mode = self.mode();
        let mut best: Option<(Direction, i32)> = None;

        for &dir in candidates {
            let dist = manhattan(self.pos + dir.delta(), target);
            let better = match best {
                None => true,
                Some((_, best_dist)) => match mode {
                    Mode::Fleeing => dist > best_dist,
                    Mode::Pursuing => {
                        dist < best_dist || (dist == best_dist && rng.random_bool(0.5))
                    }
                },
            };
            if better {
                best = Some((dir, dist));
            }
        }

        best.map(|(dir, _)| dir)
    }
}

/// Tile one step from `pos`, wrapping through the side tunnel when the step
/// would leave the grid horizontally
fn target_tile(maze: &Maze, pos: IVec2, dir: Direction) -> IVec2 {
    let next = pos + dir.delta();
    if maze.contains(next) {
        return next;
    }
    let wrapped = maze.wrap_tunnel(pos, Some(dir));
    if wrapped != pos { wrapped } else { next }
}
