//! Protocol module - JSON message types for the line driver
//!
//! One JSON object per line. Inbound messages carry `type` and `seq`;
//! every outbound message echoes the `seq` it answers.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::ValidationError;
use crate::engine::{ActionInput, ActionOutcome, ActionPayload, Frame, FrameData};
use crate::types::{GameAction, GameState};

/// Maximum number of actions in one batch
pub const MAX_BATCH: usize = 32;

// ============== Client -> Engine Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "action")]
    Action,
}

impl Default for ActionType {
    fn default() -> Self {
        Self::Action
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchType {
    #[serde(rename = "batch")]
    Batch,
}

impl Default for BatchType {
    fn default() -> Self {
        Self::Batch
    }
}

/// Action given by name (case-insensitive) or numeric id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionRef(pub GameAction);

impl<'de> Deserialize<'de> for ActionRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = ActionRef;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an action name or an id between 0 and 7")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                GameAction::from_str(v)
                    .map(ActionRef)
                    .ok_or_else(|| E::custom("unknown action"))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u8::try_from(v)
                    .ok()
                    .and_then(GameAction::from_id)
                    .map(ActionRef)
                    .ok_or_else(|| E::custom("unknown action id"))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(v)
                    .map_err(|_| E::custom("unknown action id"))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(V)
    }
}

impl Serialize for ActionRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

/// (x, y) payload of a complex action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayloadData {
    pub x: i32,
    pub y: i32,
}

/// Single action message
#[derive(Debug, Clone, Deserialize)]
pub struct ActionMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ActionType,
    pub seq: u64,
    pub action: ActionRef,
    #[serde(default)]
    pub data: Option<PayloadData>,
}

impl ActionMessage {
    pub fn to_input(&self) -> ActionInput {
        to_input(self.action, self.data)
    }
}

/// One entry of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BatchEntry {
    pub action: ActionRef,
    #[serde(default)]
    pub data: Option<PayloadData>,
}

impl BatchEntry {
    pub fn to_input(&self) -> ActionInput {
        to_input(self.action, self.data)
    }
}

fn to_input(action: ActionRef, data: Option<PayloadData>) -> ActionInput {
    ActionInput {
        action: action.0,
        data: data.map(|d| ActionPayload { x: d.x, y: d.y }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchList(pub ArrayVec<BatchEntry, MAX_BATCH>);

impl<'de> Deserialize<'de> for BatchList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = BatchList;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an array of at most {MAX_BATCH} actions")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut out = ArrayVec::<BatchEntry, MAX_BATCH>::new();
                while let Some(entry) = seq.next_element::<BatchEntry>()? {
                    out.try_push(entry)
                        .map_err(|_| serde::de::Error::custom("too many actions"))?;
                }
                Ok(BatchList(out))
            }
        }

        deserializer.deserialize_seq(V)
    }
}

/// Several actions applied in order
#[derive(Debug, Clone, Deserialize)]
pub struct BatchMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: BatchType,
    pub seq: u64,
    pub actions: BatchList,
}

// ============== Engine -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    #[serde(rename = "frame")]
    Frame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Line is not valid JSON or does not match a known message shape
    #[serde(rename = "invalid_message")]
    InvalidMessage,
    #[serde(rename = "unknown_type")]
    UnknownType,
    /// Payload does not fit the action
    #[serde(rename = "invalid_action")]
    InvalidAction,
    /// Any other validation failure reported by the engine
    #[serde(rename = "rejected")]
    Rejected,
}

impl From<&ValidationError> for ErrorCode {
    fn from(err: &ValidationError) -> Self {
        match err.code() {
            "invalid_action" => ErrorCode::InvalidAction,
            _ => ErrorCode::Rejected,
        }
    }
}

fn serialize_state<S>(state: &GameState, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(state.as_str())
}

fn serialize_outcome<S>(outcome: &ActionOutcome, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(outcome.as_str())
}

/// Echo of the action that produced a frame message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionEcho {
    pub action: ActionRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PayloadData>,
}

/// Frames produced by one action
#[derive(Debug, Clone, Serialize)]
pub struct FrameMessage {
    #[serde(rename = "type")]
    pub msg_type: FrameType,
    pub seq: u64,
    pub game_id: String,
    pub frames: Vec<Frame>,
    #[serde(serialize_with = "serialize_state")]
    pub state: GameState,
    pub levels_completed: u32,
    #[serde(serialize_with = "serialize_outcome")]
    pub outcome: ActionOutcome,
    pub action: ActionEcho,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Anything the driver writes
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Frame(FrameMessage),
    Error(ErrorMessage),
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Action(ActionMessage),
    Batch(BatchMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
    pub msg_type: String,
}

/// Parse a JSON message from a string
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "action")]
        Action(ActionMessage),
        #[serde(rename = "batch")]
        Batch(BatchMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Action(m)) => Ok(ParsedMessage::Action(m)),
        Ok(InboundMessage::Batch(m)) => Ok(ParsedMessage::Batch(m)),
        Err(e) => {
            // An unknown type is answered with an error message, not a parse failure
            #[derive(Debug, Deserialize)]
            struct Header {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let header = serde_json::from_str::<Header>(json)?;
            let msg_type = header.msg_type.unwrap_or_else(|| "unknown".to_string());
            if msg_type != "action" && msg_type != "batch" {
                return Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: header.seq.unwrap_or(0),
                    msg_type,
                }));
            }
            Err(e)
        }
    }
}

// ============== Utility Functions ==============

/// Create a frame message from the result of an action
pub fn create_frame(seq: u64, data: FrameData) -> FrameMessage {
    FrameMessage {
        msg_type: FrameType::Frame,
        seq,
        game_id: data.game_id,
        frames: data.frames,
        state: data.state,
        levels_completed: data.levels_completed,
        outcome: data.outcome,
        action: ActionEcho {
            action: ActionRef(data.action.action),
            data: data.action.data.map(|p| PayloadData { x: p.x, y: p.y }),
        },
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        code,
        message: message.to_string(),
    }
}
