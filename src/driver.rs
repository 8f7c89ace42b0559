//! Fixed-period tick clock
//!
//! Accumulates wall-clock time from the host loop and runs one simulation
//! tick per elapsed interval of the current level. Input that arrives
//! between ticks is buffered here and handed to exactly one tick.

use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;
use crate::sim::{Direction, GameEvent, GameState, TickInput, tick};

/// Longest frame the driver will try to catch up on
const MAX_FRAME: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    accumulator: Duration,
    input: TickInput,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any direction not yet seen by a tick
    pub fn request_direction(&mut self, dir: Direction) {
        self.input.direction = Some(dir);
    }

    pub fn request_start(&mut self) {
        self.input.start = true;
    }

    pub fn request_pause(&mut self) {
        self.input.pause = true;
    }

    /// Input waiting for the next tick
    pub fn pending_input(&self) -> &TickInput {
        &self.input
    }

    /// Run as many ticks as `elapsed` covers (at most `MAX_SUBSTEPS`)
    pub fn advance(&mut self, state: &mut GameState, elapsed: Duration) -> Vec<GameEvent> {
        self.accumulator += elapsed.min(MAX_FRAME);

        let mut events = Vec::new();
        let mut substeps = 0;
        loop {
            // Level can change mid-frame, so re-read the period every tick
            let period = state.settings().tick_interval(state.level());
            if self.accumulator < period || substeps >= MAX_SUBSTEPS {
                break;
            }
            let input = std::mem::take(&mut self.input);
            events.extend(tick(state, &input));
            self.accumulator -= period;
            substeps += 1;
        }

        // Drop the backlog rather than spiral
        if substeps >= MAX_SUBSTEPS {
            self.accumulator = Duration::ZERO;
        }

        events
    }
}
