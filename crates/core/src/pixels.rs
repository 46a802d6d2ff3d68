//! Pixel grid module - rectangular palette images
//!
//! A grid is stored as a flat row-major vector of palette indices.
//! Coordinates: (x, y) where x is the column (left to right) and y is the row
//! (top to bottom). `-1` marks a transparent pixel.

use std::slice::ChunksExact;

use crate::error::ValidationError;
use crate::types::{is_valid_color, is_valid_pixel, TRANSPARENT};

/// Rectangular grid of palette indices in `-1..=15`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    /// Flat array of pixels, row-major order (y * width + x)
    cells: Vec<i8>,
}

impl PixelGrid {
    /// Build a grid from rows, validating shape and pixel range
    ///
    /// Fails on an empty grid, rows of unequal length, or values outside `-1..=15`.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, ValidationError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ValidationError::EmptyPixels);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ValidationError::RaggedPixels {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                let pixel = i8::try_from(value)
                    .ok()
                    .filter(|&p| is_valid_pixel(p))
                    .ok_or(ValidationError::PixelOutOfRange { x, y, value })?;
                cells.push(pixel);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Create a grid with every pixel set to `value`
    ///
    /// Panics if either dimension is zero or `value` is not a valid pixel.
    pub fn filled(width: usize, height: usize, value: i8) -> Self {
        assert!(width > 0 && height > 0, "pixel grid must not be empty");
        assert!(is_valid_pixel(value), "pixel value out of range");
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Create a fully transparent grid
    pub fn transparent(width: usize, height: usize) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get pixel at (x, y), None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<i8> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Returns true if the pixel at (x, y) exists and is not transparent
    pub fn is_opaque(&self, x: usize, y: usize) -> bool {
        matches!(self.get(x, y), Some(p) if p != TRANSPARENT)
    }

    /// Set pixel at (x, y)
    /// Returns false if out of bounds or the value is not a valid pixel
    pub fn set(&mut self, x: usize, y: usize, value: i8) -> bool {
        if !is_valid_pixel(value) {
            return false;
        }
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Row-major pixel slice
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    /// Iterate over rows from top to bottom
    pub fn rows(&self) -> ChunksExact<'_, i8> {
        self.cells.chunks_exact(self.width)
    }

    /// Convert to nested rows
    pub fn to_rows(&self) -> Vec<Vec<i8>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Whether both dimensions are divisible by `factor`
    pub fn divisible_by(&self, factor: usize) -> bool {
        factor > 0 && self.width % factor == 0 && self.height % factor == 0
    }

    /// Rotate 90° clockwise
    ///
    /// The result is `height` wide and `width` tall; four rotations are the identity.
    pub fn rotate_cw(&self) -> Self {
        let (w, h) = (self.width, self.height);
        let mut cells = Vec::with_capacity(w * h);
        // Output row y is input column y, read bottom to top.
        for y in 0..w {
            for x in 0..h {
                cells.push(self.cells[(h - 1 - x) * w + y]);
            }
        }
        Self {
            width: h,
            height: w,
            cells,
        }
    }

    /// Mirror top to bottom
    pub fn flip_vertical(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in self.rows().rev() {
            cells.extend_from_slice(row);
        }
        Self {
            cells,
            ..self.clone()
        }
    }

    /// Mirror left to right
    pub fn flip_horizontal(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in self.rows() {
            cells.extend(row.iter().rev());
        }
        Self {
            cells,
            ..self.clone()
        }
    }

    /// Nearest-neighbor upscale: every pixel becomes a `factor`×`factor` block
    pub fn upscale(&self, factor: usize) -> Self {
        if factor <= 1 {
            return self.clone();
        }
        let width = self.width * factor;
        let height = self.height * factor;
        let mut cells = Vec::with_capacity(width * height);
        for row in self.rows() {
            let mut scaled_row = Vec::with_capacity(width);
            for &p in row {
                scaled_row.extend(std::iter::repeat(p).take(factor));
            }
            for _ in 0..factor {
                cells.extend_from_slice(&scaled_row);
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Collapse every `factor`×`factor` block to its top-left pixel
    ///
    /// The caller must have checked [`divisible_by`](Self::divisible_by).
    pub fn downscale(&self, factor: usize) -> Self {
        if factor <= 1 {
            return self.clone();
        }
        debug_assert!(self.divisible_by(factor));
        let width = self.width / factor;
        let height = self.height / factor;
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(self.cells[(y * factor) * self.width + x * factor]);
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Recolor pixels in place
    ///
    /// `from = Some(c)` recolors pixels equal to `c`; `from = None` recolors every
    /// non-transparent pixel. Returns the number of pixels changed.
    pub fn remap(&mut self, from: Option<i8>, to: i32) -> Result<usize, ValidationError> {
        if !is_valid_color(to) {
            return Err(ValidationError::ColorOutOfRange(to));
        }
        let to = to as i8;
        let mut changed = 0;
        for cell in &mut self.cells {
            let hit = match from {
                Some(c) => *cell == c,
                None => *cell != TRANSPARENT,
            };
            if hit && *cell != to {
                *cell = to;
                changed += 1;
            }
        }
        Ok(changed)
    }
}
