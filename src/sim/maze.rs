//! Tile maze model
//!
//! A maze is parsed from rows of text:
//! - `1` wall, `0` collectible, `2` power item
//! - `P` agent start, `G` adversary start, `E` walkable with no item
//! - anything else is a cleared floor tile

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::agent::Direction;
use crate::consts::ADVERSARY_COUNT;

/// The single built-in level (21 rows x 19 columns). Row 9 is the tunnel.
pub const REFERENCE_LAYOUT: [&str; 21] = [
    "1111111111111111111",
    "1200000001000000021",
    "1011011101011101101",
    "1000000000000000001",
    "1011010111110101101",
    "1000010001000100001",
    "1111011101011101111",
    "111101000E000101111",
    "11110101G1G10101111",
    "00000001G1G10000000",
    "1111010111110101111",
    "1111010000000101111",
    "1111010111110101111",
    "100000000P000000001",
    "1011011101011101101",
    "1200010001000100021",
    "1101010111110101011",
    "1000000000000000001",
    "1011111111111111101",
    "1000000000000000001",
    "1111111111111111111",
];

/// What occupies a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    /// Walkable, never held an item (start cells, base exit)
    Empty,
    Collectible,
    PowerItem,
    /// Item eaten, or a tile the layout left blank
    Clear,
}

impl CellKind {
    fn from_layout(c: char) -> Self {
        match c {
            '1' => CellKind::Wall,
            '0' => CellKind::Collectible,
            '2' => CellKind::PowerItem,
            'P' | 'G' | 'E' => CellKind::Empty,
            _ => CellKind::Clear,
        }
    }

    /// Layout character for this cell
    pub fn glyph(self) -> char {
        match self {
            CellKind::Wall => '1',
            CellKind::Collectible => '0',
            CellKind::PowerItem => '2',
            CellKind::Empty => 'E',
            CellKind::Clear => ' ',
        }
    }

    /// True for cells that count toward level completion
    pub fn is_item(self) -> bool {
        matches!(self, CellKind::Collectible | CellKind::PowerItem)
    }
}

/// Item removed by `Maze::consume_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consumed {
    Collectible,
    PowerItem,
}

/// Malformed layout text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {actual} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("layout has no agent start marker")]
    MissingAgentStart,
    #[error("layout has {count} agent start markers, expected exactly one")]
    DuplicateAgentStart { count: usize },
    #[error("layout has {found} adversary start markers, expected {expected}")]
    MissingAdversaryStarts { found: usize, expected: usize },
    #[error("layout has no collectibles or power items")]
    NoItems,
}

/// Coordinate lookup outside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tile (row {row}, col {col}) is outside the {rows}x{cols} maze")]
pub struct OutOfBounds {
    pub row: i32,
    pub col: i32,
    pub rows: usize,
    pub cols: usize,
}

/// Parsed maze with live item state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    rows: usize,
    cols: usize,
    /// Row-major cells, mutated as items are eaten
    cells: Vec<CellKind>,
    /// Cells as loaded, for level restarts
    pristine: Vec<CellKind>,
    agent_start: IVec2,
    adversary_starts: [IVec2; ADVERSARY_COUNT],
    remaining: u32,
}

impl Maze {
    /// Parse a rectangular layout
    pub fn load<S: AsRef<str>>(layout: &[S]) -> Result<Self, LayoutError> {
        let first = layout.first().ok_or(LayoutError::Empty)?;
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(LayoutError::Empty);
        }
        let rows = layout.len();

        let mut cells = Vec::with_capacity(rows * cols);
        let mut agent_starts = Vec::new();
        let mut adversary_starts = Vec::with_capacity(ADVERSARY_COUNT);

        for (row, line) in layout.iter().enumerate() {
            let line = line.as_ref();
            let actual = line.chars().count();
            if actual != cols {
                return Err(LayoutError::Ragged {
                    row,
                    expected: cols,
                    actual,
                });
            }
            for (col, c) in line.chars().enumerate() {
                let pos = IVec2::new(col as i32, row as i32);
                match c {
                    'P' => agent_starts.push(pos),
                    'G' if adversary_starts.len() < ADVERSARY_COUNT => adversary_starts.push(pos),
                    'G' => log::warn!("Ignoring extra adversary start at row {}, col {}", row, col),
                    _ => {}
                }
                cells.push(CellKind::from_layout(c));
            }
        }

        let agent_start = match agent_starts.as_slice() {
            [] => return Err(LayoutError::MissingAgentStart),
            [pos] => *pos,
            many => return Err(LayoutError::DuplicateAgentStart { count: many.len() }),
        };
        let found = adversary_starts.len();
        let adversary_starts: [IVec2; ADVERSARY_COUNT] =
            adversary_starts
                .try_into()
                .map_err(|_| LayoutError::MissingAdversaryStarts {
                    found,
                    expected: ADVERSARY_COUNT,
                })?;

        let remaining = cells.iter().filter(|c| c.is_item()).count() as u32;
        // A board with nothing to eat would clear itself every tick
        if remaining == 0 {
            return Err(LayoutError::NoItems);
        }
        log::debug!("Loaded {}x{} maze with {} items", rows, cols, remaining);

        Ok(Self {
            rows,
            cols,
            pristine: cells.clone(),
            cells,
            agent_start,
            adversary_starts,
            remaining,
        })
    }

    /// The built-in level
    pub fn reference() -> Self {
        Self::load(&REFERENCE_LAYOUT).expect("reference layout is well-formed")
    }

    /// Put every item back as it was loaded
    pub fn restore(&mut self) {
        self.cells.copy_from_slice(&self.pristine);
        self.remaining = self.cells.iter().filter(|c| c.is_item()).count() as u32;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn agent_start(&self) -> IVec2 {
        self.agent_start
    }

    pub fn adversary_starts(&self) -> &[IVec2; ADVERSARY_COUNT] {
        &self.adversary_starts
    }

    /// Collectibles and power items still on the board
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.cols + pos.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.cols && (pos.y as usize) < self.rows
    }

    pub fn cell_at(&self, pos: IVec2) -> Result<CellKind, OutOfBounds> {
        self.index(pos)
            .map(|i| self.cells[i])
            .ok_or(OutOfBounds {
                row: pos.y,
                col: pos.x,
                rows: self.rows,
                cols: self.cols,
            })
    }

    /// In bounds and not a wall
    #[inline]
    pub fn is_walkable(&self, pos: IVec2) -> bool {
        self.index(pos)
            .is_some_and(|i| self.cells[i] != CellKind::Wall)
    }

    /// Eat the item at `pos`, if any
    pub fn consume_at(&mut self, pos: IVec2) -> Option<Consumed> {
        let i = self.index(pos)?;
        let consumed = match self.cells[i] {
            CellKind::Collectible => Consumed::Collectible,
            CellKind::PowerItem => Consumed::PowerItem,
            _ => return None,
        };
        self.cells[i] = CellKind::Clear;
        self.remaining -= 1;
        Some(consumed)
    }

    /// Teleport across the horizontal edges: a mover on the first column heading
    /// left comes out on the last, and vice versa. Only open columns wrap.
    pub fn wrap_tunnel(&self, pos: IVec2, dir: Option<Direction>) -> IVec2 {
        let last = self.cols as i32 - 1;
        let exit = match dir {
            Some(Direction::Left) if pos.x <= 0 => IVec2::new(last, pos.y),
            Some(Direction::Right) if pos.x >= last => IVec2::new(0, pos.y),
            _ => return pos,
        };
        if self.is_walkable(exit) { exit } else { pos }
    }

    /// Rows of cells, top to bottom
    pub fn grid(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.cols)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid() {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
