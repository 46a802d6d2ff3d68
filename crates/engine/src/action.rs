//! Action input and per-action frame output.

use crate::core::ValidationError;
use crate::frame::Frame;
use crate::types::{GameAction, GameState, MAX_PAYLOAD_COORD};

/// Output coordinate attached to a complex action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionPayload {
    pub x: i32,
    pub y: i32,
}

/// One player input
///
/// Only ACTION6 carries a payload; it addresses a cell of the 64×64 output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionInput {
    pub action: GameAction,
    pub data: Option<ActionPayload>,
}

impl ActionInput {
    /// Action without payload
    pub fn new(action: GameAction) -> Self {
        Self { action, data: None }
    }

    /// Action with an (x, y) payload
    pub fn with_position(action: GameAction, x: i32, y: i32) -> Self {
        Self {
            action,
            data: Some(ActionPayload { x, y }),
        }
    }

    pub fn reset() -> Self {
        Self::new(GameAction::Reset)
    }

    pub fn position(&self) -> Option<(i32, i32)> {
        self.data.map(|p| (p.x, p.y))
    }

    /// Check that the payload matches the action
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.action.is_complex(), self.data) {
            (true, None) => Err(ValidationError::PayloadMismatch {
                action: self.action.as_str(),
                expected_payload: true,
            }),
            (false, Some(_)) => Err(ValidationError::PayloadMismatch {
                action: self.action.as_str(),
                expected_payload: false,
            }),
            (true, Some(ActionPayload { x, y })) => {
                let range = 0..=MAX_PAYLOAD_COORD;
                if range.contains(&x) && range.contains(&y) {
                    Ok(())
                } else {
                    Err(ValidationError::PayloadOutOfRange { x, y })
                }
            }
            (false, None) => Ok(()),
        }
    }
}

/// How the frame loop for an action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionOutcome {
    /// Game logic signalled completion (or the game was already over)
    Completed,
    /// The per-action frame cap cut the loop off
    FrameCapReached,
}

impl ActionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionOutcome::Completed => "completed",
            ActionOutcome::FrameCapReached => "frame_cap_reached",
        }
    }
}

/// Everything produced by one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameData {
    pub game_id: String,
    /// One frame per step, in order; never empty
    pub frames: Vec<Frame>,
    pub state: GameState,
    pub levels_completed: u32,
    pub action: ActionInput,
    pub outcome: ActionOutcome,
}

impl FrameData {
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
