//! Camera - turns a level's sprites into a 64×64 frame
//!
//! Rendering happens in two stages:
//!
//! 1. **Viewport**: a `width`×`height` grid filled with the background, onto
//!    which every visible sprite is composited in (layer, insertion) order at
//!    its position relative to the camera origin. Transparent pixels are
//!    skipped and sprites are clipped to the viewport.
//! 2. **Output**: the viewport is upscaled by `floor(64 / max(width, height))`,
//!    centered on a 64×64 frame filled with the letterbox color, and UI
//!    overlays are drawn on top in registration order.
//!
//! A 20×20 viewport therefore becomes a 60×60 image with a 2-cell border.

use std::fmt;

use crate::config::EngineConfig;
use crate::core::{PixelGrid, Sprite, ValidationError};
use crate::frame::Frame;
use crate::types::{is_valid_color, DEFAULT_BACKGROUND, DEFAULT_LETTERBOX, FRAME_SIZE, MAX_VIEWPORT};
use crate::ui::UserDisplay;

pub struct Camera {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    background: u8,
    letterbox: u8,
    interfaces: Vec<Box<dyn UserDisplay>>,
}

fn check_viewport(width: u32, height: u32) -> Result<(), ValidationError> {
    if !(1..=MAX_VIEWPORT).contains(&width) || !(1..=MAX_VIEWPORT).contains(&height) {
        return Err(ValidationError::InvalidViewport { width, height });
    }
    Ok(())
}

fn check_color(color: i32) -> Result<u8, ValidationError> {
    if !is_valid_color(color) {
        return Err(ValidationError::ColorOutOfRange(color));
    }
    Ok(color as u8)
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: MAX_VIEWPORT,
            height: MAX_VIEWPORT,
            background: DEFAULT_BACKGROUND,
            letterbox: DEFAULT_LETTERBOX,
            interfaces: Vec::new(),
        }
    }
}

impl fmt::Debug for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("background", &self.background)
            .field("letterbox", &self.letterbox)
            .field("interfaces", &self.interfaces.len())
            .finish()
    }
}

impl Camera {
    pub fn new(
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        background: i32,
        letterbox: i32,
    ) -> Result<Self, ValidationError> {
        check_viewport(width, height)?;
        Ok(Self {
            x,
            y,
            width,
            height,
            background: check_color(background)?,
            letterbox: check_color(letterbox)?,
            interfaces: Vec::new(),
        })
    }

    /// Full-size camera using the configured default colors
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            background: config.background,
            letterbox: config.letterbox,
            ..Self::default()
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> u8 {
        self.background
    }

    pub fn letterbox(&self) -> u8 {
        self.letterbox
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ValidationError> {
        check_viewport(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn set_background(&mut self, color: i32) -> Result<(), ValidationError> {
        self.background = check_color(color)?;
        Ok(())
    }

    pub fn set_letterbox(&mut self, color: i32) -> Result<(), ValidationError> {
        self.letterbox = check_color(color)?;
        Ok(())
    }

    // Overlays

    pub fn add_interface(&mut self, display: impl UserDisplay + 'static) {
        self.interfaces.push(Box::new(display));
    }

    pub fn replace_interface(&mut self, displays: Vec<Box<dyn UserDisplay>>) {
        self.interfaces = displays;
    }

    pub fn clear_interfaces(&mut self) {
        self.interfaces.clear();
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    // Rendering

    /// (scale, x offset, y offset) of the viewport inside the output frame
    pub fn scale_and_offset(&self) -> (u32, u32, u32) {
        let size = FRAME_SIZE as u32;
        let scale = size / self.width.max(self.height);
        let x_offset = (size - self.width * scale) / 2;
        let y_offset = (size - self.height * scale) / 2;
        (scale, x_offset, y_offset)
    }

    /// Composite visible sprites onto a viewport-sized grid
    pub fn render_viewport<'a, I>(&self, sprites: I) -> PixelGrid
    where
        I: IntoIterator<Item = &'a Sprite>,
    {
        let mut view = PixelGrid::filled(
            self.width as usize,
            self.height as usize,
            self.background as i8,
        );

        // sort_by_key is stable, so insertion order breaks layer ties
        let mut visible: Vec<&Sprite> = sprites.into_iter().filter(|s| s.is_visible()).collect();
        visible.sort_by_key(|s| s.layer());

        let (w, h) = (self.width as i32, self.height as i32);
        for sprite in visible {
            let rel_x = sprite.x().saturating_sub(self.x);
            let rel_y = sprite.y().saturating_sub(self.y);
            for (sy, row) in sprite.render().rows().enumerate() {
                let vy = rel_y.saturating_add(sy as i32);
                if vy < 0 || vy >= h {
                    continue;
                }
                for (sx, &pixel) in row.iter().enumerate() {
                    let vx = rel_x.saturating_add(sx as i32);
                    if pixel < 0 || vx < 0 || vx >= w {
                        continue;
                    }
                    view.set(vx as usize, vy as usize, pixel);
                }
            }
        }
        view
    }

    /// Render the sprites to a 64×64 frame
    pub fn render<'a, I>(&self, sprites: I) -> Frame
    where
        I: IntoIterator<Item = &'a Sprite>,
    {
        let view = self.render_viewport(sprites);
        let (scale, x_offset, y_offset) = self.scale_and_offset();

        let mut frame = Frame::new(self.letterbox);
        frame.draw_grid(&view.upscale(scale as usize), x_offset as i32, y_offset as i32);

        for display in &self.interfaces {
            display.render_interface(&mut frame);
        }
        frame
    }

    /// Map an output coordinate back to a world coordinate
    ///
    /// Returns None for points outside the frame or inside the letterbox.
    pub fn display_to_grid(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        let (scale, x_offset, y_offset) = self.scale_and_offset();
        let (scale, x_offset, y_offset) = (scale as i32, x_offset as i32, y_offset as i32);
        let local_x = x - x_offset;
        let local_y = y - y_offset;
        let scaled_w = self.width as i32 * scale;
        let scaled_h = self.height as i32 * scale;
        if local_x < 0 || local_y < 0 || local_x >= scaled_w || local_y >= scaled_h {
            return None;
        }
        Some((
            self.x.saturating_add(local_x / scale),
            self.y.saturating_add(local_y / scale),
        ))
    }
}
