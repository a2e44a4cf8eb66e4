//! Platform abstraction layer
//!
//! Where per-tick input comes from. A windowed front end would map keys to
//! `Actions` here; the headless build drives the game from a script or from
//! the demo autopilot.

pub mod autopilot;
pub mod scripted;

use crate::sim::{GameState, TickInput};

pub use autopilot::Autopilot;
pub use scripted::ScriptedInput;

/// Produces the input for the next tick
pub trait InputSource {
    /// Called once per simulation tick, before `tick`
    fn poll(&mut self, state: &GameState) -> TickInput;
}
