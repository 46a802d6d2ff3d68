//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (sprite logic, rendering, the JSON line protocol).
//!
//! # Output Dimensions
//!
//! Every rendered frame is a fixed square of palette indices:
//!
//! - **Width / height**: 64 cells (indexed 0-63)
//! - **Palette**: 16 colors (0-15)
//! - **Transparent**: sprite pixels may use `-1`, which is never written to a frame
//!
//! # Engine Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_SIZE` | 64 | Width and height of every output frame |
//! | `MAX_FRAMES_PER_ACTION` | 1000 | Hard cap on frames produced by one action |
//! | `TRANSPARENT` | -1 | Sprite pixel value that is skipped while compositing |
//! | `MAX_COLOR` | 15 | Highest palette index |
//! | `DEFAULT_BACKGROUND` | 5 | Camera background when none is configured |
//! | `DEFAULT_LETTERBOX` | 5 | Camera letterbox when none is configured |
//!
//! # Examples
//!
//! ```
//! use grid_arcade_types::{GameAction, GameState, Rotation, FRAME_SIZE};
//!
//! // Parse actions (case-insensitive)
//! let action = GameAction::from_str("action6").unwrap();
//! assert_eq!(action, GameAction::Action6);
//! assert!(action.is_complex());
//!
//! // Rotations are quarter turns
//! let rotation = Rotation::from_degrees(-90).unwrap();
//! assert_eq!(rotation, Rotation::Deg270);
//! assert_eq!(rotation.rotate_cw(), Rotation::Deg0);
//!
//! assert_eq!(GameState::default(), GameState::NotPlayed);
//! assert_eq!(FRAME_SIZE, 64);
//! ```

/// Width and height of every rendered frame (64 cells)
pub const FRAME_SIZE: usize = 64;

/// Number of cells in a rendered frame
pub const FRAME_CELLS: usize = FRAME_SIZE * FRAME_SIZE;

/// Largest camera viewport dimension
pub const MAX_VIEWPORT: u32 = FRAME_SIZE as u32;

/// Hard cap on the number of frames a single action may produce
pub const MAX_FRAMES_PER_ACTION: usize = 1000;

/// Sprite pixel value treated as transparent
pub const TRANSPARENT: i8 = -1;

/// Highest palette index
pub const MAX_COLOR: i8 = 15;

/// Default camera background color
pub const DEFAULT_BACKGROUND: u8 = 5;

/// Default camera letterbox color
pub const DEFAULT_LETTERBOX: u8 = 5;

/// Tag marking immutable background sprites eligible for static merging
pub const STATIC_TAG: &str = "static";

/// Largest coordinate accepted in a complex action payload (inclusive)
pub const MAX_PAYLOAD_COORD: i32 = FRAME_SIZE as i32 - 1;

/// Returns true if `value` is a valid sprite pixel (`-1..=15`)
#[inline]
pub fn is_valid_pixel(value: i8) -> bool {
    (TRANSPARENT..=MAX_COLOR).contains(&value)
}

/// Returns true if `value` is a valid palette color (`0..=15`)
#[inline]
pub fn is_valid_color(value: i32) -> bool {
    (0..=MAX_COLOR as i32).contains(&value)
}

/// Collision policy of a sprite
///
/// - **NotBlocked**: never takes part in collision tests
/// - **BoundingBox**: rectangle overlap of the rendered extent
/// - **PixelPerfect**: overlap of non-transparent rendered pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockingMode {
    #[default]
    NotBlocked,
    BoundingBox,
    PixelPerfect,
}

impl BlockingMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "NOT_BLOCKED" => Some(BlockingMode::NotBlocked),
            "BOUNDING_BOX" => Some(BlockingMode::BoundingBox),
            "PIXEL_PERFECT" => Some(BlockingMode::PixelPerfect),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockingMode::NotBlocked => "NOT_BLOCKED",
            BlockingMode::BoundingBox => "BOUNDING_BOX",
            BlockingMode::PixelPerfect => "PIXEL_PERFECT",
        }
    }
}

/// Visibility and collidability of a sprite
///
/// | Mode | Visible | Collidable |
/// |------|---------|------------|
/// | Tangible | yes | yes |
/// | Intangible | yes | no |
/// | Invisible | no | yes |
/// | Removed | no | no |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionMode {
    #[default]
    Tangible,
    Intangible,
    Invisible,
    Removed,
}

impl InteractionMode {
    /// Whether sprites in this mode are drawn by the camera
    pub fn is_visible(&self) -> bool {
        matches!(self, InteractionMode::Tangible | InteractionMode::Intangible)
    }

    /// Whether sprites in this mode take part in collision tests
    pub fn is_collidable(&self) -> bool {
        matches!(self, InteractionMode::Tangible | InteractionMode::Invisible)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "TANGIBLE" => Some(InteractionMode::Tangible),
            "INTANGIBLE" => Some(InteractionMode::Intangible),
            "INVISIBLE" => Some(InteractionMode::Invisible),
            "REMOVED" => Some(InteractionMode::Removed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Tangible => "TANGIBLE",
            InteractionMode::Intangible => "INTANGIBLE",
            InteractionMode::Invisible => "INVISIBLE",
            InteractionMode::Removed => "REMOVED",
        }
    }
}

/// Sprite rotation in clockwise quarter turns
///
/// The rotation cycle goes: 0° → 90° → 180° → 270° → 0°
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Reduce an angle in degrees to a rotation
    ///
    /// Any multiple of 90 is accepted, including negative and >360 values.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_arcade_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(450), Some(Rotation::Deg90));
    /// assert_eq!(Rotation::from_degrees(-180), Some(Rotation::Deg180));
    /// assert_eq!(Rotation::from_degrees(45), None);
    /// ```
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// Angle in degrees (0, 90, 180 or 270)
    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Number of clockwise quarter turns (0-3)
    pub fn quarter_turns(&self) -> usize {
        (self.degrees() / 90) as usize
    }

    /// Whether width and height trade places under this rotation
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_arcade_types::Rotation;
    ///
    /// assert_eq!(Rotation::Deg0.rotate_cw(), Rotation::Deg90);
    /// assert_eq!(Rotation::Deg270.rotate_cw(), Rotation::Deg0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg0,
        }
    }
}

/// Overall game lifecycle
///
/// `Win` and `GameOver` are terminal until a full reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    NotPlayed,
    NotFinished,
    Win,
    GameOver,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Win | GameState::GameOver)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "NOT_PLAYED" => Some(GameState::NotPlayed),
            "NOT_FINISHED" => Some(GameState::NotFinished),
            "WIN" => Some(GameState::Win),
            "GAME_OVER" => Some(GameState::GameOver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::NotPlayed => "NOT_PLAYED",
            GameState::NotFinished => "NOT_FINISHED",
            GameState::Win => "WIN",
            GameState::GameOver => "GAME_OVER",
        }
    }
}

/// Player actions consumed by the turn loop
///
/// `Reset` restarts the level (or the whole game); `Action1`-`Action7` are
/// game-defined. `Action6` is the only complex action and carries an
/// `(x, y)` coordinate in output-frame space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Reset,
    Action1,
    Action2,
    Action3,
    Action4,
    Action5,
    Action6,
    Action7,
}

impl GameAction {
    /// Every action in id order
    pub const ALL: [GameAction; 8] = [
        GameAction::Reset,
        GameAction::Action1,
        GameAction::Action2,
        GameAction::Action3,
        GameAction::Action4,
        GameAction::Action5,
        GameAction::Action6,
        GameAction::Action7,
    ];

    /// Numeric id (0 = Reset, 1-7 = Action1-Action7)
    pub fn id(&self) -> u8 {
        match self {
            GameAction::Reset => 0,
            GameAction::Action1 => 1,
            GameAction::Action2 => 2,
            GameAction::Action3 => 3,
            GameAction::Action4 => 4,
            GameAction::Action5 => 5,
            GameAction::Action6 => 6,
            GameAction::Action7 => 7,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Whether this action requires an `(x, y)` payload
    pub fn is_complex(&self) -> bool {
        matches!(self, GameAction::Action6)
    }

    pub fn is_simple(&self) -> bool {
        !self.is_complex()
    }

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_arcade_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("RESET"), Some(GameAction::Reset));
    /// assert_eq!(GameAction::from_str("action3"), Some(GameAction::Action3));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "RESET" => Some(GameAction::Reset),
            "ACTION1" => Some(GameAction::Action1),
            "ACTION2" => Some(GameAction::Action2),
            "ACTION3" => Some(GameAction::Action3),
            "ACTION4" => Some(GameAction::Action4),
            "ACTION5" => Some(GameAction::Action5),
            "ACTION6" => Some(GameAction::Action6),
            "ACTION7" => Some(GameAction::Action7),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Reset => "RESET",
            GameAction::Action1 => "ACTION1",
            GameAction::Action2 => "ACTION2",
            GameAction::Action3 => "ACTION3",
            GameAction::Action4 => "ACTION4",
            GameAction::Action5 => "ACTION5",
            GameAction::Action6 => "ACTION6",
            GameAction::Action7 => "ACTION7",
        }
    }
}
