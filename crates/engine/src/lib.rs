//! Engine - camera, overlays and the turn-based game loop
//!
//! This crate turns levels from [`grid_arcade_core`] into 64×64 frames and
//! drives games through actions.
//!
//! # Module Structure
//!
//! - [`frame`]: fixed 64×64 output grid
//! - [`camera`]: viewport compositing, letterboxing and display-to-world mapping
//! - [`ui`]: overlays drawn on the final frame
//! - [`action`]: action input, outcome and per-action frame data
//! - [`controller`]: the [`Game`] trait, [`Session`] and [`GameController`]
//! - [`config`]: engine configuration from the environment
//!
//! # Example
//!
//! ```
//! use grid_arcade_core::{Level, Sprite};
//! use grid_arcade_engine::{ActionInput, EngineConfig, Game, GameController, Session};
//! use grid_arcade_types::{BlockingMode, GameAction, GameState};
//!
//! struct Slide;
//!
//! impl Game for Slide {
//!     fn step(&mut self, session: &mut Session) {
//!         if session.action().map(|a| a.action) == Some(GameAction::Action4) {
//!             session.try_move_named("player", 1, 0).unwrap();
//!         }
//!         session.complete_action();
//!     }
//! }
//!
//! let player = Sprite::new(&[[3]])
//!     .unwrap()
//!     .with_name("player")
//!     .unwrap()
//!     .with_blocking(BlockingMode::PixelPerfect);
//! let level = Level::new(vec![player]).with_grid_size(8, 8).unwrap();
//!
//! let mut controller =
//!     GameController::with_config("slide", Slide, vec![level], None, EngineConfig::default())
//!         .unwrap();
//!
//! let data = controller
//!     .perform_action(ActionInput::new(GameAction::Action4))
//!     .unwrap();
//! assert_eq!(data.state, GameState::NotFinished);
//! assert_eq!(data.frames.len(), 1);
//!
//! // The 8×8 viewport is scaled by 8: the player now covers output cells 8..16
//! let frame = &data.frames[0];
//! assert_eq!(frame.get(8, 0), Some(3));
//! assert_eq!(frame.get(0, 0), Some(5));
//! ```

pub mod action;
pub mod camera;
pub mod config;
pub mod controller;
pub mod frame;
pub mod ui;

pub use grid_arcade_core as core;
pub use grid_arcade_types as types;

pub use action::{ActionInput, ActionOutcome, ActionPayload, FrameData};
pub use camera::Camera;
pub use config::EngineConfig;
pub use controller::{Game, GameController, Session};
pub use frame::Frame;
pub use ui::{ToggleableDisplay, UserDisplay};
