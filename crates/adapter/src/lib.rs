//! Adapter module - drive a game controller with line-delimited JSON
//!
//! External agents (bots, test harnesses, recorded sessions) send one JSON
//! message per line and receive one JSON reply per produced result. The
//! driver works on any `BufRead`/`Write` pair: stdin/stdout, a file, or an
//! in-memory buffer.
//!
//! # Message Types
//!
//! ## Client → Engine
//!
//! - **action**: one action by name (case-insensitive) or id, with an optional
//!   `data` payload for ACTION6
//! - **batch**: up to 32 actions applied in order
//!
//! ## Engine → Client
//!
//! - **frame**: the frames, state and score produced by one action
//! - **error**: error response with code and message
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Engine: {"type":"action","seq":1,"action":"ACTION6","data":{"x":12,"y":40}}
//! Engine -> Client: {"type":"frame","seq":1,"game_id":"maze","frames":[[[5,5,...],...]],"state":"NOT_FINISHED","levels_completed":0,"outcome":"completed","action":{"action":"ACTION6","data":{"x":12,"y":40}}}
//! Client -> Engine: {"type":"action","seq":2,"action":"ACTION6"}
//! Engine -> Client: {"type":"error","seq":2,"code":"invalid_action","message":"ACTION6 requires an (x, y) payload"}
//! ```
//!
//! # Error Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | `invalid_message` | not JSON, or a known type with bad fields |
//! | `unknown_type` | `type` is neither `action` nor `batch` |
//! | `invalid_action` | payload missing, unexpected or outside 0..=63 |
//! | `rejected` | any other engine validation failure |

pub mod driver;
pub mod protocol;

pub use grid_arcade_core as core;
pub use grid_arcade_engine as engine;
pub use grid_arcade_types as types;

// Re-export protocol types for convenience
pub use driver::{handle_line, run_lines};
pub use protocol::*;
