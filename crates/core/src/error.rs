//! Validation errors raised by constructors and setters.
//!
//! Every fallible operation validates eagerly and leaves its receiver
//! untouched on failure.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    ZeroScale,
    IndivisibleScale {
        width: usize,
        height: usize,
        factor: usize,
    },
    InvalidRotation(i32),
    EmptyPixels,
    RaggedPixels {
        row: usize,
        expected: usize,
        found: usize,
    },
    PixelOutOfRange {
        x: usize,
        y: usize,
        value: i32,
    },
    ColorOutOfRange(i32),
    EmptyName,
    InvalidViewport {
        width: u32,
        height: u32,
    },
    NoLevels,
    LevelIndexOutOfRange {
        index: usize,
        len: usize,
    },
    LevelNotFound(String),
    SpriteNotFound(String),
    PayloadMismatch {
        action: &'static str,
        expected_payload: bool,
    },
    PayloadOutOfRange {
        x: i32,
        y: i32,
    },
    DisplayIndexOutOfRange {
        index: usize,
        len: usize,
    },
}

impl ValidationError {
    /// Stable machine-readable code (used by the JSON line protocol)
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::ZeroScale
            | ValidationError::IndivisibleScale { .. } => "invalid_scale",
            ValidationError::InvalidRotation(_) => "invalid_rotation",
            ValidationError::EmptyPixels
            | ValidationError::RaggedPixels { .. }
            | ValidationError::PixelOutOfRange { .. } => "invalid_pixels",
            ValidationError::ColorOutOfRange(_) => "invalid_color",
            ValidationError::EmptyName => "invalid_name",
            ValidationError::InvalidViewport { .. } => "invalid_viewport",
            ValidationError::NoLevels => "no_levels",
            ValidationError::LevelIndexOutOfRange { .. } | ValidationError::LevelNotFound(_) => {
                "level_not_found"
            }
            ValidationError::SpriteNotFound(_) => "sprite_not_found",
            ValidationError::PayloadMismatch { .. } | ValidationError::PayloadOutOfRange { .. } => {
                "invalid_action"
            }
            ValidationError::DisplayIndexOutOfRange { .. } => "display_not_found",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroScale => write!(f, "scale cannot be zero"),
            ValidationError::IndivisibleScale {
                width,
                height,
                factor,
            } => write!(
                f,
                "dimensions ({width}, {height}) must be divisible by scale factor {factor}"
            ),
            ValidationError::InvalidRotation(r) => {
                write!(f, "rotation must be one of 0, 90, 180, 270 (got {r})")
            }
            ValidationError::EmptyPixels => write!(f, "pixel grid must not be empty"),
            ValidationError::RaggedPixels {
                row,
                expected,
                found,
            } => write!(
                f,
                "pixel grid must be rectangular: row {row} has {found} pixels, expected {expected}"
            ),
            ValidationError::PixelOutOfRange { x, y, value } => {
                write!(f, "pixel ({x}, {y}) = {value} is outside -1..=15")
            }
            ValidationError::ColorOutOfRange(c) => write!(f, "color {c} is outside 0..=15"),
            ValidationError::EmptyName => write!(f, "name cannot be empty"),
            ValidationError::InvalidViewport { width, height } => write!(
                f,
                "viewport {width}x{height} must have both dimensions in 1..=64"
            ),
            ValidationError::NoLevels => write!(f, "game must have at least one level"),
            ValidationError::LevelIndexOutOfRange { index, len } => {
                write!(f, "level index {index} out of range [0, {len})")
            }
            ValidationError::LevelNotFound(name) => write!(f, "level '{name}' not found"),
            ValidationError::SpriteNotFound(what) => write!(f, "no sprite found: {what}"),
            ValidationError::PayloadMismatch {
                action,
                expected_payload: true,
            } => write!(f, "{action} requires an (x, y) payload"),
            ValidationError::PayloadMismatch {
                action,
                expected_payload: false,
            } => write!(f, "{action} does not accept a payload"),
            ValidationError::PayloadOutOfRange { x, y } => {
                write!(f, "payload ({x}, {y}) is outside 0..=63")
            }
            ValidationError::DisplayIndexOutOfRange { index, len } => {
                write!(f, "display index {index} out of range [0, {len})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
