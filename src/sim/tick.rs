//! Fixed timestep simulation tick
//!
//! Core game loop that advances the round deterministically: agent first,
//! then the item under it, then each adversary in slot order.

use serde::{Deserialize, Serialize};

use super::agent::Direction;
use super::maze::Consumed;
use super::state::{GameEvent, GamePhase, GameState, PendingTransition};
use crate::chebyshev;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Most recent direction pressed since the last tick. It stays buffered
    /// on the agent, but every level start or lost life clears it, so a
    /// turn pressed during the level-complete pause is dropped.
    pub direction: Option<Direction>,
    /// Start signal
    pub start: bool,
    /// Pause signal
    pub pause: bool,
}

/// Advance the game state by one tick and return what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    if input.pause {
        state.request_pause();
    }
    let started = input.start && state.request_start();
    // Applied after a start so it survives the reset
    if let Some(dir) = input.direction {
        state.request_direction(dir);
    }
    // The start tick only sets the board up
    if started {
        return std::mem::take(&mut state.events);
    }

    match state.phase {
        GamePhase::Active => {
            state.time_ticks += 1;
            tick_active(state);
        }
        GamePhase::LevelComplete => {
            state.time_ticks += 1;
            tick_level_complete(state);
        }
        GamePhase::Intro | GamePhase::Dying | GamePhase::GameOver => {}
    }

    std::mem::take(&mut state.events)
}

fn tick_active(state: &mut GameState) {
    // Vulnerability window
    if state.vulnerable_ticks > 0 {
        state.vulnerable_ticks -= 1;
        if state.vulnerable_ticks == 0 {
            for adversary in &mut state.adversaries {
                adversary.vulnerable = false;
            }
            state.events.push(GameEvent::VulnerabilityEnded);
        }
    }

    let pos = state.agent.step(&state.maze);

    if let Some(item) = state.maze.consume_at(pos) {
        state.events.push(GameEvent::ItemConsumed { item, pos });
        match item {
            Consumed::Collectible => state.score += state.settings.collectible_points,
            Consumed::PowerItem => {
                state.score += state.settings.power_item_points;
                let ticks = state.settings.vulnerable_ticks;
                if ticks > 0 {
                    state.vulnerable_ticks = ticks;
                    for adversary in &mut state.adversaries {
                        adversary.frighten();
                    }
                    state.events.push(GameEvent::VulnerabilityStarted { ticks });
                }
            }
        }
    }

    // A cleared board wins the tick, whatever the adversaries are doing
    if state.maze.remaining() == 0 {
        complete_level(state);
        return;
    }

    for index in 0..state.adversaries.len() {
        let agent_pos = state.agent.pos;
        let adversary = &mut state.adversaries[index];
        let distance = chebyshev(adversary.pos, agent_pos);

        if adversary.vulnerable {
            if distance == 0 {
                adversary.respawn();
                state.score += state.settings.capture_points;
                state.events.push(GameEvent::AdversaryCaptured { index });
                log::debug!("Adversary {} captured, score {}", index, state.score);
            }
        } else if distance <= 1 {
            lose_life(state, index);
            return;
        }

        state.adversaries[index].step(&state.maze, agent_pos, &mut state.rng);
    }
}

/// Caught by adversary `by`. Resolved within the same tick.
fn lose_life(state: &mut GameState, by: usize) {
    state.phase = GamePhase::Dying;
    state.events.push(GameEvent::AgentCaught { by });
    state.lives = state.lives.saturating_sub(1);
    state.reset_positions();

    if state.lives == 0 {
        log::info!(
            "Game over on level {} with score {}",
            state.level,
            state.score
        );
        state.level = 1;
        state.pending = None;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
    } else {
        log::debug!("Caught by adversary {}, {} lives left", by, state.lives);
        state.phase = GamePhase::Active;
        state.events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
    }
}

fn complete_level(state: &mut GameState) {
    let cleared = state.level;
    state.level += 1;
    state.phase = GamePhase::LevelComplete;
    schedule_next_level(state, cleared);
    log::info!("Level {} cleared, score {}", cleared, state.score);
    state.events.push(GameEvent::LevelCleared { level: cleared });
}

/// Delay is measured in ticks of the level just played
fn schedule_next_level(state: &mut GameState, cleared: u32) {
    let delay = state.settings.level_complete_delay_ticks(cleared);
    state.pending = Some(PendingTransition {
        fires_at: state.time_ticks + delay,
        level: state.level,
    });
}

fn tick_level_complete(state: &mut GameState) {
    match state.pending {
        Some(pending) if pending.level == state.level => {
            if state.time_ticks >= pending.fires_at {
                state.start_level();
            }
        }
        stale => {
            log::warn!(
                "Replacing level transition {:?} for level {}",
                stale,
                state.level
            );
            let previous = state.level.saturating_sub(1).max(1);
            schedule_next_level(state, previous);
        }
    }
}
