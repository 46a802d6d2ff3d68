//! Fixed-size output frame of palette indices.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::core::PixelGrid;
use crate::types::{FRAME_CELLS, FRAME_SIZE, TRANSPARENT};

/// 64×64 grid of colors in `0..=15`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Row-major cells (y * 64 + x)
    cells: Box<[u8; FRAME_CELLS]>,
}

impl Frame {
    pub fn new(fill: u8) -> Self {
        Self {
            cells: Box::new([fill; FRAME_CELLS]),
        }
    }

    #[inline(always)]
    fn idx(x: i32, y: i32) -> Option<usize> {
        let size = FRAME_SIZE as i32;
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some((y as usize) * FRAME_SIZE + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        Self::idx(x, y).map(|i| self.cells[i])
    }

    /// Set one cell; writes outside the frame are clipped.
    pub fn set(&mut self, x: i32, y: i32, color: u8) -> bool {
        match Self::idx(x, y) {
            Some(i) => {
                self.cells[i] = color;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, color: u8) {
        self.cells.fill(color);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u8) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, color);
            }
        }
    }

    /// Paint the opaque pixels of `grid` with its top-left corner at (x, y).
    pub fn draw_grid(&mut self, grid: &PixelGrid, x: i32, y: i32) {
        for (gy, row) in grid.rows().enumerate() {
            for (gx, &pixel) in row.iter().enumerate() {
                if pixel != TRANSPARENT {
                    self.set(x + gx as i32, y + gy as i32, pixel as u8);
                }
            }
        }
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells[..]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks_exact(FRAME_SIZE)
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

/// Serialized as 64 rows of 64 colors.
impl Serialize for Frame {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(FRAME_SIZE))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}
