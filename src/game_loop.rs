//! The update-then-render cycle.
//!
//! One thread does everything in order each frame: poll input, advance the
//! simulation, draw, present, then wait for the next frame boundary. The
//! quit action is honoured after the frame it arrives in has been drawn.

use log::info;
use rand::Rng;

use crate::compute::{init_state, tick};
use crate::entities::GameState;
use crate::error::Result;
use crate::platform::{Clock, InputSource, Renderer};
use crate::scene;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

pub struct GameLoop<I, R, C, G> {
    state: GameState,
    input: I,
    renderer: R,
    clock: C,
    rng: G,
}

impl<I, R, C, G> GameLoop<I, R, C, G>
where
    I: InputSource,
    R: Renderer,
    C: Clock,
    G: Rng,
{
    pub fn new(input: I, renderer: R, clock: C, rng: G) -> Self {
        Self {
            state: init_state(),
            input,
            renderer,
            clock,
            rng,
        }
    }

    /// Start from an arbitrary state instead of a fresh session.
    pub fn with_state(mut self, state: GameState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run exactly one frame.
    pub fn step(&mut self) -> Result<LoopControl> {
        let controls = self.input.poll()?;
        self.state = tick(&self.state, &controls, &mut self.rng);
        scene::render(&mut self.renderer, &self.state, self.clock.ticks_ms())?;

        if controls.quit {
            return Ok(LoopControl::Quit);
        }
        self.clock.wait_for_next_frame();
        Ok(LoopControl::Continue)
    }

    /// Run frames until the quit action.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? == LoopControl::Continue {}
        info!(
            "quit after {} frames with score {} on wave {}",
            self.state.frame, self.state.score, self.state.wave
        );
        Ok(())
    }
}
