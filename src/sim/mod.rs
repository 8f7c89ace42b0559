//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete update per tick
//! - Seeded RNG only
//! - Stable iteration order (adversary slot order)
//! - No rendering or platform dependencies

pub mod adversary;
pub mod agent;
pub mod maze;
pub mod state;
pub mod tick;

pub use adversary::{Adversary, Mode};
pub use agent::{Agent, Direction};
pub use maze::{CellKind, Consumed, LayoutError, Maze, OutOfBounds, REFERENCE_LAYOUT};
pub use state::{ActorView, AgentView, GameEvent, GamePhase, GameState, PendingTransition, Snapshot};
pub use tick::{TickInput, tick};
