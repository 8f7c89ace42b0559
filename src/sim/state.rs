//! Game state and round lifecycle
//!
//! All state that must be persisted for determinism lives here. External
//! input enters through the `request_*` methods; `tick` advances the rest.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::adversary::Adversary;
use super::agent::{Agent, Direction};
use super::maze::{CellKind, Consumed, LayoutError, Maze};
use crate::consts::ADVERSARY_COUNT;
use crate::settings::Settings;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, or paused; waiting for a start signal
    Intro,
    /// Active gameplay
    Active,
    /// Agent was caught this tick (resolved before the tick returns)
    Dying,
    /// Board cleared, next level pending
    LevelComplete,
    /// Out of lives
    GameOver,
}

/// Something that happened during a tick, for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    ItemConsumed { item: Consumed, pos: IVec2 },
    VulnerabilityStarted { ticks: u32 },
    VulnerabilityEnded,
    AdversaryCaptured { index: usize },
    AgentCaught { by: usize },
    LifeLost { lives_left: u8 },
    GameOver { score: u64 },
    LevelCleared { level: u32 },
}

/// Next-level start scheduled by a cleared board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransition {
    /// Simulation tick on which the next level begins
    pub fires_at: u64,
    /// Level the transition was scheduled for; anything else is stale
    pub level: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    /// Tie-break source for adversary pursuit
    pub(crate) rng: Pcg32,
    pub(crate) settings: Settings,
    pub(crate) phase: GamePhase,
    pub(crate) maze: Maze,
    pub(crate) agent: Agent,
    pub(crate) adversaries: [Adversary; ADVERSARY_COUNT],
    pub(crate) lives: u8,
    pub(crate) score: u64,
    /// Current level (1-based)
    pub(crate) level: u32,
    /// Shared vulnerability countdown (ticks)
    pub(crate) vulnerable_ticks: u32,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    pub(crate) pending: Option<PendingTransition>,
    /// Events raised outside `tick` (start requests), drained by the next tick
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Reference layout, default rules
    pub fn new(seed: u64) -> Self {
        Self::from_maze(Maze::reference(), Settings::default(), seed)
    }

    /// Custom layout and rules
    pub fn with_layout<S: AsRef<str>>(
        layout: &[S],
        settings: Settings,
        seed: u64,
    ) -> Result<Self, LayoutError> {
        Ok(Self::from_maze(Maze::load(layout)?, settings, seed))
    }

    fn from_maze(maze: Maze, settings: Settings, seed: u64) -> Self {
        let settings = settings.validated();
        let agent = Agent::new(maze.agent_start());
        let starts = *maze.adversary_starts();
        let adversaries = starts.map(Adversary::new);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: settings.starting_lives,
            settings,
            phase: GamePhase::Intro,
            maze,
            agent,
            adversaries,
            score: 0,
            level: 1,
            vulnerable_ticks: 0,
            time_ticks: 0,
            pending: None,
            events: Vec::new(),
        }
    }

    // === Input ===

    /// Buffer a direction for the agent; the latest request wins
    pub fn request_direction(&mut self, dir: Direction) {
        self.agent.requested = Some(dir);
    }

    /// Start a new game from the title screen or after a game over.
    /// Returns false (and does nothing) mid-game.
    pub fn request_start(&mut self) -> bool {
        match self.phase {
            GamePhase::Intro | GamePhase::GameOver => {
                self.start_new_game();
                true
            }
            _ => false,
        }
    }

    /// Drop back to the title screen. Nothing is reset here, but the next
    /// start begins a fresh game.
    pub fn request_pause(&mut self) -> bool {
        if self.phase == GamePhase::Active {
            log::info!("Paused on level {} with score {}", self.level, self.score);
            self.phase = GamePhase::Intro;
            true
        } else {
            false
        }
    }

    // === Lifecycle ===

    pub(crate) fn start_new_game(&mut self) {
        self.level = 1;
        self.lives = self.settings.starting_lives;
        self.score = 0;
        log::info!("New game (seed {})", self.seed);
        self.start_level();
    }

    /// Restore the board and put everyone back at their starts
    pub(crate) fn start_level(&mut self) {
        self.maze.restore();
        self.reset_positions();
        self.pending = None;
        self.phase = GamePhase::Active;
        log::info!(
            "Level {} started: {} items, {} lives",
            self.level,
            self.maze.remaining(),
            self.lives
        );
        self.events.push(GameEvent::LevelStarted { level: self.level });
    }

    pub(crate) fn reset_positions(&mut self) {
        self.agent.reset(self.maze.agent_start());
        for adversary in &mut self.adversaries {
            adversary.respawn();
        }
        self.vulnerable_ticks = 0;
    }

    // === Queries ===

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn adversaries(&self) -> &[Adversary; ADVERSARY_COUNT] {
        &self.adversaries
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Ticks left in the vulnerability window (renderers blink near the end)
    pub fn vulnerable_ticks(&self) -> u32 {
        self.vulnerable_ticks
    }

    pub fn remaining(&self) -> u32 {
        self.maze.remaining()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn pending_transition(&self) -> Option<PendingTransition> {
        self.pending
    }

    /// Everything a renderer needs for one frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            cells: self.maze.grid().map(|row| row.to_vec()).collect(),
            agent: AgentView {
                pos: self.agent.pos,
                dir: self.agent.dir,
            },
            adversaries: self
                .adversaries
                .iter()
                .map(|a| ActorView {
                    pos: a.pos,
                    dir: a.dir,
                    vulnerable: a.vulnerable,
                })
                .collect(),
            score: self.score,
            lives: self.lives,
            level: self.level,
            vulnerable_ticks: self.vulnerable_ticks,
            remaining: self.maze.remaining(),
        }
    }
}

/// Position and heading of the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentView {
    /// (x = column, y = row)
    pub pos: IVec2,
    pub dir: Option<Direction>,
}

/// Position, heading and vulnerability of an adversary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorView {
    /// (x = column, y = row)
    pub pos: IVec2,
    pub dir: Option<Direction>,
    pub vulnerable: bool,
}

/// Read-only frame view of the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Row-major cells
    pub cells: Vec<Vec<CellKind>>,
    pub agent: AgentView,
    pub adversaries: Vec<ActorView>,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub vulnerable_ticks: u32,
    pub remaining: u32,
}
