//! Maze Chase - a single-screen tile-maze chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, agent, adversaries, round state)
//! - `driver`: Fixed-period tick clock that feeds the simulation
//! - `settings`: Data-driven game rules

pub mod driver;
pub mod settings;
pub mod sim;

pub use driver::TickDriver;
pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Number of adversaries in every layout
    pub const ADVERSARY_COUNT: usize = 4;
    /// Lives at the start of a new game
    pub const STARTING_LIVES: u8 = 3;

    /// Points per collectible
    pub const COLLECTIBLE_POINTS: u64 = 10;
    /// Points per power item
    pub const POWER_ITEM_POINTS: u64 = 50;
    /// Points per captured adversary
    pub const CAPTURE_POINTS: u64 = 200;
    /// Ticks the adversaries stay vulnerable after a power item
    pub const VULNERABLE_DURATION_TICKS: u32 = 100;

    /// Tick interval on level 1 (ms)
    pub const BASE_TICK_MS: u64 = 150;
    /// Interval shaved off per level (ms)
    pub const TICK_MS_PER_LEVEL: u64 = 10;
    /// Fastest allowed tick interval (ms)
    pub const MIN_TICK_MS: u64 = 50;
    /// Pause between clearing a level and starting the next (ms)
    pub const LEVEL_COMPLETE_DELAY_MS: u64 = 2000;

    /// Maximum ticks per driver advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Tile coordinate from (row, col). Tiles are stored as x = column, y = row.
#[inline]
pub const fn tile(row: i32, col: i32) -> IVec2 {
    IVec2::new(col, row)
}

/// |Δrow| + |Δcol|
#[inline]
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

/// max(|Δrow|, |Δcol|)
#[inline]
pub fn chebyshev(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().max_element()
}
