//! Pre-recorded input

use std::collections::VecDeque;

use super::InputSource;
use crate::sim::{Actions, GameState, TickInput};

/// Replays a queue of inputs, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append one frame
    pub fn push(&mut self, input: TickInput) -> &mut Self {
        self.frames.push_back(input);
        self
    }

    /// Append `ticks` copies of `input`
    pub fn repeat(&mut self, input: TickInput, ticks: usize) -> &mut Self {
        self.frames.extend(std::iter::repeat_n(input, ticks));
        self
    }

    /// Append a single-tick press of `actions`
    pub fn press(&mut self, actions: Actions) -> &mut Self {
        self.push(TickInput::pressed(actions))
    }

    /// Append `ticks` empty frames
    pub fn wait(&mut self, ticks: usize) -> &mut Self {
        self.repeat(TickInput::default(), ticks)
    }

    /// Frames not yet consumed
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Load a script from a JSON array of `TickInput`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let frames: Vec<TickInput> = serde_json::from_str(json)?;
        Ok(Self::new(frames))
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        self.frames.pop_front().unwrap_or_default()
    }
}
