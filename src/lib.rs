//! Space Defender - a single-screen arcade shooter
//!
//! Core modules:
//! - `entities`: plain game data (player, enemies, boss, projectiles, particles)
//! - `compute`: the per-frame simulation step
//! - `platform`: collaborator traits (input, renderer, clock)
//! - `scene`: turns a `GameState` into renderer calls
//! - `display`: crossterm implementations of the collaborators
//! - `game_loop`: update-then-render cycle tying it all together

pub mod compute;
pub mod consts;
pub mod display;
pub mod entities;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod scene;

pub use error::{GameError, Result};
pub use game_loop::{GameLoop, LoopControl};
