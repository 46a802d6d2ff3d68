//! Core sprite logic - pure, deterministic, and testable
//!
//! This crate contains the sprite model, pixel transforms, collision rules
//! and level bookkeeping. It has no dependencies on rendering backends or I/O:
//!
//! - **Deterministic**: rendering is a pure function of pixels and transform
//! - **Validated**: constructors and setters reject bad input with a typed
//!   [`ValidationError`] and leave the receiver unchanged
//! - **Isolated**: cloning a level deep-copies its sprites
//!
//! # Module Structure
//!
//! - [`pixels`]: rectangular palette grids with rotation, mirroring and scaling
//! - [`sprite`]: positioned sprites, transforms, tags and collision tests
//! - [`level`]: ordered sprite collections, queries and collision-checked moves
//! - [`merge`]: compositing of `static` sprites at level construction
//! - [`names`]: unique name generation for unnamed sprites
//! - [`error`]: validation errors
//!
//! # Collision Rules
//!
//! | Either sprite | Result |
//! |---------------|--------|
//! | same instance | never collides |
//! | INTANGIBLE or REMOVED | never collides |
//! | NOT_BLOCKED | never collides |
//! | BOUNDING_BOX | rendered rectangles overlap |
//! | both PIXEL_PERFECT | opaque pixels share a world cell |
//!
//! # Example
//!
//! ```
//! use grid_arcade_core::{Level, MoveOutcome, Sprite};
//! use grid_arcade_types::BlockingMode;
//!
//! let player = Sprite::new(&[[2]])
//!     .unwrap()
//!     .with_blocking(BlockingMode::PixelPerfect);
//! let wall = Sprite::new(&[[1], [1]])
//!     .unwrap()
//!     .with_position(1, 0)
//!     .with_blocking(BlockingMode::BoundingBox);
//!
//! let player_id = player.id();
//! let mut level = Level::new(vec![player, wall]);
//!
//! // Walking into the wall is reverted
//! let outcome = level.try_move(player_id, 1, 0).unwrap();
//! assert!(matches!(outcome, MoveOutcome::Blocked(_)));
//! assert_eq!(level.get_sprite(player_id).unwrap().x(), 0);
//!
//! // Walking away is fine
//! assert!(level.try_move(player_id, 0, 1).unwrap().is_moved());
//! ```

pub mod error;
pub mod level;
pub mod merge;
pub mod names;
pub mod pixels;
pub mod sprite;

pub use grid_arcade_types as types;

// Re-export commonly used types for convenience
pub use error::ValidationError;
pub use level::{Level, MoveOutcome};
pub use merge::merge_static;
pub use names::{default_name, NameGenerator, SequentialNames};
pub use pixels::PixelGrid;
pub use sprite::{Bounds, Sprite, SpriteConfig, SpriteId};
