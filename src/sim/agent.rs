//! Player-controlled agent
//!
//! Movement is tile-by-tile. A requested direction is buffered and adopted
//! as soon as the tile that way opens up, so turns can be queued before a
//! junction.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::maze::Maze;

/// One of the four unit steps on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Enumeration order used for adversary tie-breaks
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Grid offset (x = column, y = row; up is -y)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// The player's agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub pos: IVec2,
    /// Current heading (`None` = standing still)
    pub dir: Option<Direction>,
    /// Latest input, retained until overwritten
    pub requested: Option<Direction>,
}

impl Agent {
    pub fn new(start: IVec2) -> Self {
        Self {
            pos: start,
            dir: None,
            requested: None,
        }
    }

    /// Back to `start`, standing still, no buffered input
    pub fn reset(&mut self, start: IVec2) {
        *self = Self::new(start);
    }

    /// Advance one tick and return the new position
    pub fn step(&mut self, maze: &Maze) -> IVec2 {
        self.pos = maze.wrap_tunnel(self.pos, self.dir);

        if let Some(requested) = self.requested {
            if maze.is_walkable(self.pos + requested.delta()) {
                self.dir = Some(requested);
            }
        }

        // A blocked agent keeps its heading and resumes once the way opens
        if let Some(dir) = self.dir {
            let next = self.pos + dir.delta();
            if maze.is_walkable(next) {
                self.pos = next;
            }
        }

        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile;
    use proptest::prelude::*;

    fn agent_at(maze: &Maze) -> Agent {
        Agent::new(maze.agent_start())
    }

    #[test]
    fn test_idle_agent_stays_put() {
        let maze = Maze::reference();
        let mut agent = agent_at(&maze);
        assert_eq!(agent.step(&maze), tile(13, 9));
        assert_eq!(agent.dir, None);
    }

    #[test]
    fn test_request_into_wall_is_ignored() {
        let maze = Maze::reference();
        let mut agent = agent_at(&maze);
        // (12, 9) is a wall
        agent.requested = Some(Direction::Up);
        assert_eq!(agent.step(&maze), tile(13, 9));
        assert_eq!(agent.dir, None);
    }

    #[test]
    fn test_buffered_turn_taken_at_junction() {
        let maze = Maze::reference();
        let mut agent = agent_at(&maze);
        agent.requested = Some(Direction::Left);
        assert_eq!(agent.step(&maze), tile(13, 8));
        assert_eq!(agent.step(&maze), tile(13, 7));

        // Queue Up while (12, 7) is a wall; taken once (12, 6) is open
        agent.requested = Some(Direction::Up);
        assert_eq!(agent.step(&maze), tile(13, 6));
        assert_eq!(agent.dir, Some(Direction::Left));
        assert_eq!(agent.step(&maze), tile(12, 6));
        assert_eq!(agent.dir, Some(Direction::Up));
    }

    #[test]
    fn test_blocked_agent_keeps_heading() {
        let maze = Maze::reference();
        let mut agent = Agent::new(tile(13, 2));
        agent.requested = Some(Direction::Left);
        assert_eq!(agent.step(&maze), tile(13, 1));
        assert_eq!(agent.step(&maze), tile(13, 1));
        assert_eq!(agent.dir, Some(Direction::Left));
    }

    #[test]
    fn test_tunnel_wrap_left() {
        let maze = Maze::reference();
        let mut agent = Agent::new(tile(9, 1));
        agent.requested = Some(Direction::Left);
        assert_eq!(agent.step(&maze), tile(9, 0));
        // Re-enters from the right edge and keeps going
        assert_eq!(agent.step(&maze), tile(9, 17));
        assert_eq!(agent.dir, Some(Direction::Left));
    }

    #[test]
    fn test_tunnel_wrap_right() {
        let maze = Maze::reference();
        let mut agent = Agent::new(tile(9, 17));
        agent.requested = Some(Direction::Right);
        assert_eq!(agent.step(&maze), tile(9, 18));
        assert_eq!(agent.step(&maze), tile(9, 1));
    }

    #[test]
    fn test_tunnel_exit_lands_on_edge_when_inner_tile_blocked() {
        let maze = Maze::load(&["PGGGG", "0000E", "11111"]).expect("valid layout");
        let mut agent = Agent::new(tile(1, 0));
        agent.dir = Some(Direction::Left);
        assert_eq!(agent.step(&maze), tile(1, 3));

        let maze = Maze::load(&["PGGGG", "0001E", "11111"]).expect("valid layout");
        let mut agent = Agent::new(tile(1, 0));
        agent.dir = Some(Direction::Left);
        assert_eq!(agent.step(&maze), tile(1, 4));
    }

    #[test]
    fn test_no_wrap_into_walled_edge() {
        let maze = Maze::load(&["PGGGG11", "0111111"]).expect("valid layout");
        let mut agent = Agent::new(tile(0, 0));
        agent.dir = Some(Direction::Left);
        assert_eq!(agent.step(&maze), tile(0, 0));
        assert!(maze.is_walkable(agent.pos));
        assert_eq!(agent.dir, Some(Direction::Left));
    }

    fn direction() -> impl Strategy<Value = Option<Direction>> {
        prop_oneof![
            Just(None),
            Just(Some(Direction::Left)),
            Just(Some(Direction::Right)),
            Just(Some(Direction::Up)),
            Just(Some(Direction::Down)),
        ]
    }

    proptest! {
        #[test]
        fn prop_agent_moves_one_tile_along_one_axis(
            requests in prop::collection::vec(direction(), 1..200)
        ) {
            let maze = Maze::reference();
            let mut agent = agent_at(&maze);
            let last_col = maze.cols() as i32 - 1;

            for requested in requests {
                if requested.is_some() {
                    agent.requested = requested;
                }
                let before = agent.pos;
                let heading = agent.dir;
                let after = agent.step(&maze);

                prop_assert!(maze.is_walkable(after));
                let wrapped = (before.x == 0 && heading == Some(Direction::Left))
                    || (before.x == last_col && heading == Some(Direction::Right));
                if wrapped {
                    prop_assert_eq!(after.y, before.y);
                } else {
                    let d = (after - before).abs();
                    prop_assert!(d.x + d.y <= 1);
                }
            }
        }
    }
}
