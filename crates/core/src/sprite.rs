//! Sprite module - positioned, transformable pixel images
//!
//! A sprite owns a source [`PixelGrid`] plus the transform applied to it when
//! rendered: clockwise rotation, optional mirroring, then integer scaling.
//! The rendered grid is recomputed eagerly whenever one of those inputs
//! changes, so rendering and collision never redo the transform.
//!
//! # Scale
//!
//! - `1`: source size
//! - `n > 1`: every pixel becomes an n×n block
//! - `n < 0`: every (|n|+1)×(|n|+1) block collapses to its top-left pixel;
//!   both source dimensions must be divisible by |n|+1
//! - `0` is never valid

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ValidationError;
use crate::names::{default_name, NameGenerator};
use crate::pixels::PixelGrid;
use crate::types::{BlockingMode, InteractionMode, Rotation};

static NEXT_SPRITE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique sprite identity
///
/// Every constructed or cloned sprite gets a fresh id, so an id names one
/// live instance and never a copy of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(u64);

impl SpriteId {
    fn next() -> Self {
        SpriteId(NEXT_SPRITE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Axis-aligned rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Overlapping region, None when the rectangles are disjoint
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Bounds {
            x,
            y,
            width: self.right().min(other.right()) - x,
            height: self.bottom().min(other.bottom()) - y,
        })
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds {
            x,
            y,
            width: self.right().max(other.right()).saturating_sub(x),
            height: self.bottom().max(other.bottom()).saturating_sub(y),
        }
    }
}

/// Construction parameters for a [`Sprite`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteConfig {
    pub name: Option<String>,
    pub x: i32,
    pub y: i32,
    pub scale: i32,
    /// Degrees; any multiple of 90
    pub rotation: i32,
    pub layer: i32,
    pub blocking: BlockingMode,
    pub interaction: InteractionMode,
    pub tags: Vec<String>,
    pub mirror_ud: bool,
    pub mirror_lr: bool,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            name: None,
            x: 0,
            y: 0,
            scale: 1,
            rotation: 0,
            layer: 0,
            blocking: BlockingMode::NotBlocked,
            interaction: InteractionMode::Tangible,
            tags: Vec::new(),
            mirror_ud: false,
            mirror_lr: false,
        }
    }
}

/// Check that `scale` can be applied to a source grid of the given size
fn validate_scale(pixels: &PixelGrid, scale: i32) -> Result<(), ValidationError> {
    if scale == 0 {
        return Err(ValidationError::ZeroScale);
    }
    if scale < 0 {
        let factor = scale.unsigned_abs() as usize + 1;
        if !pixels.divisible_by(factor) {
            return Err(ValidationError::IndivisibleScale {
                width: pixels.width(),
                height: pixels.height(),
                factor,
            });
        }
    }
    Ok(())
}

/// Apply rotation, then mirrors, then scale
fn transform(
    pixels: &PixelGrid,
    rotation: Rotation,
    mirror_ud: bool,
    mirror_lr: bool,
    scale: i32,
) -> PixelGrid {
    let mut grid = pixels.clone();
    for _ in 0..rotation.quarter_turns() {
        grid = grid.rotate_cw();
    }
    if mirror_ud {
        grid = grid.flip_vertical();
    }
    if mirror_lr {
        grid = grid.flip_horizontal();
    }
    if scale > 1 {
        grid.upscale(scale as usize)
    } else if scale < 0 {
        grid.downscale(scale.unsigned_abs() as usize + 1)
    } else {
        grid
    }
}

#[derive(Debug)]
pub struct Sprite {
    id: SpriteId,
    name: String,
    pixels: PixelGrid,
    x: i32,
    y: i32,
    scale: i32,
    rotation: Rotation,
    layer: i32,
    blocking: BlockingMode,
    interaction: InteractionMode,
    tags: BTreeSet<String>,
    mirror_ud: bool,
    mirror_lr: bool,
    /// Transformed pixels, kept in sync with the fields above
    rendered: PixelGrid,
}

impl Sprite {
    /// Create a sprite with default settings from rows of pixels
    pub fn new<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, ValidationError> {
        Self::from_config(rows, SpriteConfig::default())
    }

    /// Create a sprite from rows of pixels and a configuration
    ///
    /// Unnamed sprites draw their name from the process-wide generator.
    pub fn from_config<R: AsRef<[i32]>>(
        rows: &[R],
        config: SpriteConfig,
    ) -> Result<Self, ValidationError> {
        let grid = PixelGrid::from_rows(rows)?;
        Self::build(grid, config, &mut default_name)
    }

    /// Like [`from_config`](Self::from_config) with an explicit name source
    pub fn from_config_with_names<R: AsRef<[i32]>>(
        rows: &[R],
        config: SpriteConfig,
        names: &mut dyn NameGenerator,
    ) -> Result<Self, ValidationError> {
        let grid = PixelGrid::from_rows(rows)?;
        Self::build(grid, config, names)
    }

    /// Wrap an already validated grid with default settings
    pub fn from_grid(grid: PixelGrid) -> Self {
        let rendered = grid.clone();
        Self {
            id: SpriteId::next(),
            name: default_name(),
            pixels: grid,
            x: 0,
            y: 0,
            scale: 1,
            rotation: Rotation::Deg0,
            layer: 0,
            blocking: BlockingMode::NotBlocked,
            interaction: InteractionMode::Tangible,
            tags: BTreeSet::new(),
            mirror_ud: false,
            mirror_lr: false,
            rendered,
        }
    }

    fn build(
        grid: PixelGrid,
        config: SpriteConfig,
        names: &mut dyn NameGenerator,
    ) -> Result<Self, ValidationError> {
        validate_scale(&grid, config.scale)?;
        let rotation = Rotation::from_degrees(config.rotation)
            .ok_or(ValidationError::InvalidRotation(config.rotation))?;
        let name = match config.name {
            Some(name) if name.is_empty() => return Err(ValidationError::EmptyName),
            Some(name) => name,
            None => names.next_name(),
        };
        let rendered = transform(
            &grid,
            rotation,
            config.mirror_ud,
            config.mirror_lr,
            config.scale,
        );

        Ok(Self {
            id: SpriteId::next(),
            name,
            pixels: grid,
            x: config.x,
            y: config.y,
            scale: config.scale,
            rotation,
            layer: config.layer,
            blocking: config.blocking,
            interaction: config.interaction,
            tags: config.tags.into_iter().collect(),
            mirror_ud: config.mirror_ud,
            mirror_lr: config.mirror_lr,
            rendered,
        })
    }

    fn refresh(&mut self) {
        self.rendered = transform(
            &self.pixels,
            self.rotation,
            self.mirror_ud,
            self.mirror_lr,
            self.scale,
        );
    }

    // Fluent helpers for building sprites inline

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.set_position(x, y);
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_blocking(mut self, blocking: BlockingMode) -> Self {
        self.blocking = blocking;
        self
    }

    pub fn with_interaction(mut self, interaction: InteractionMode) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Result<Self, ValidationError> {
        self.set_name(name)?;
        Ok(self)
    }

    pub fn with_scale(mut self, scale: i32) -> Result<Self, ValidationError> {
        self.set_scale(scale)?;
        Ok(self)
    }

    pub fn with_rotation(mut self, degrees: i32) -> Result<Self, ValidationError> {
        self.set_rotation(degrees)?;
        Ok(self)
    }

    // Accessors

    pub fn id(&self) -> SpriteId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn blocking(&self) -> BlockingMode {
        self.blocking
    }

    pub fn interaction(&self) -> InteractionMode {
        self.interaction
    }

    pub fn mirror_ud(&self) -> bool {
        self.mirror_ud
    }

    pub fn mirror_lr(&self) -> bool {
        self.mirror_lr
    }

    /// Untransformed source pixels
    pub fn pixels(&self) -> &PixelGrid {
        &self.pixels
    }

    /// Pixels after rotation, mirroring and scaling
    ///
    /// Pure function of the source grid and transform: equal inputs always
    /// give equal output.
    pub fn render(&self) -> &PixelGrid {
        &self.rendered
    }

    /// (width, height) of the rendered grid
    pub fn rendered_size(&self) -> (usize, usize) {
        (self.rendered.width(), self.rendered.height())
    }

    /// World-space rectangle covered by the rendered grid
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.rendered.width() as i32,
            height: self.rendered.height() as i32,
        }
    }

    /// Whether the world point lies inside the rendered rectangle
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.bounds().contains(x, y)
    }

    /// Drawn by the camera (TANGIBLE or INTANGIBLE)
    pub fn is_visible(&self) -> bool {
        self.interaction.is_visible()
    }

    /// Takes part in collisions (TANGIBLE or INVISIBLE)
    pub fn is_collidable(&self) -> bool {
        self.interaction.is_collidable()
    }

    // Mutation

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Positions saturate at the `i32` range
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    pub fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }

    pub fn set_blocking(&mut self, blocking: BlockingMode) {
        self.blocking = blocking;
    }

    pub fn set_interaction(&mut self, interaction: InteractionMode) {
        self.interaction = interaction;
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    /// Set the scale factor
    ///
    /// Fails without changing anything when `scale` is 0, or negative and the
    /// source dimensions are not divisible by |scale|+1.
    pub fn set_scale(&mut self, scale: i32) -> Result<(), ValidationError> {
        validate_scale(&self.pixels, scale)?;
        if scale != self.scale {
            self.scale = scale;
            self.refresh();
        }
        Ok(())
    }

    /// Move the scale to `scale + delta` one unit at a time, skipping 0
    ///
    /// Every intermediate scale must be valid; on failure the scale is
    /// left as it was. A walk that crosses 0 does not count it as a step,
    /// and a target of 0 lands on -1 or 1 in the direction of travel.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_arcade_core::Sprite;
    ///
    /// let mut sprite = Sprite::new(&[[1, 1], [1, 1]]).unwrap();
    /// sprite.adjust_scale(2).unwrap();
    /// assert_eq!(sprite.scale(), 3);
    /// // 3 -> 2 -> 1 -> -1
    /// sprite.adjust_scale(-4).unwrap();
    /// assert_eq!(sprite.scale(), -1);
    /// assert!(sprite.adjust_scale(-1).is_err());
    /// assert_eq!(sprite.scale(), -1);
    /// ```
    pub fn adjust_scale(&mut self, delta: i32) -> Result<(), ValidationError> {
        if delta == 0 {
            return Ok(());
        }
        let step = delta.signum();
        let mut target = self.scale.saturating_add(delta);
        if target == 0 {
            target = step;
        }

        let mut scale = self.scale;
        while scale != target {
            scale += step;
            if scale == 0 {
                scale = step;
            }
            validate_scale(&self.pixels, scale)?;
        }
        self.set_scale(scale)
    }

    /// Set rotation in degrees; any multiple of 90 is reduced mod 360
    pub fn set_rotation(&mut self, degrees: i32) -> Result<(), ValidationError> {
        let rotation =
            Rotation::from_degrees(degrees).ok_or(ValidationError::InvalidRotation(degrees))?;
        if rotation != self.rotation {
            self.rotation = rotation;
            self.refresh();
        }
        Ok(())
    }

    /// Rotate by `delta` degrees relative to the current rotation
    pub fn rotate(&mut self, delta: i32) -> Result<(), ValidationError> {
        if Rotation::from_degrees(delta).is_none() {
            return Err(ValidationError::InvalidRotation(delta));
        }
        self.set_rotation(self.rotation.degrees() + delta.rem_euclid(360))
    }

    pub fn set_mirror_ud(&mut self, mirror: bool) {
        if mirror != self.mirror_ud {
            self.mirror_ud = mirror;
            self.refresh();
        }
    }

    pub fn set_mirror_lr(&mut self, mirror: bool) {
        if mirror != self.mirror_lr {
            self.mirror_lr = mirror;
            self.refresh();
        }
    }

    /// Replace the source pixels
    ///
    /// The new grid must be valid and compatible with the current scale.
    pub fn set_pixels<R: AsRef<[i32]>>(&mut self, rows: &[R]) -> Result<(), ValidationError> {
        let grid = PixelGrid::from_rows(rows)?;
        self.set_grid(grid)
    }

    pub fn set_grid(&mut self, grid: PixelGrid) -> Result<(), ValidationError> {
        validate_scale(&grid, self.scale)?;
        self.pixels = grid;
        self.refresh();
        Ok(())
    }

    /// Recolor source pixels; see [`PixelGrid::remap`]
    pub fn color_remap(&mut self, from: Option<i8>, to: i32) -> Result<usize, ValidationError> {
        let changed = self.pixels.remap(from, to)?;
        if changed > 0 {
            self.refresh();
        }
        Ok(changed)
    }

    // Tags

    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.iter().map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn has_all_tags<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().all(|t| self.has_tag(t.as_ref()))
    }

    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|t| self.has_tag(t.as_ref()))
    }

    /// Returns false if the tag was already present
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Returns false if the tag was not present
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    // Collision

    /// Whether this sprite blocks `other` at their current positions
    ///
    /// A sprite never collides with itself. REMOVED and INTANGIBLE sprites
    /// and NOT_BLOCKED sprites never collide. If either side uses
    /// BOUNDING_BOX the rendered rectangles decide; two PIXEL_PERFECT
    /// sprites collide only where both have an opaque pixel on the same
    /// world cell. The relation is symmetric.
    pub fn collides_with(&self, other: &Sprite) -> bool {
        if std::ptr::eq(self, other) || self.id == other.id {
            return false;
        }
        if !self.is_collidable() || !other.is_collidable() {
            return false;
        }
        if self.blocking == BlockingMode::NotBlocked || other.blocking == BlockingMode::NotBlocked {
            return false;
        }

        let Some(overlap) = self.bounds().intersection(&other.bounds()) else {
            return false;
        };
        if self.blocking == BlockingMode::BoundingBox || other.blocking == BlockingMode::BoundingBox
        {
            return true;
        }

        for wy in overlap.y..overlap.bottom() {
            for wx in overlap.x..overlap.right() {
                let mine = self
                    .rendered
                    .is_opaque((wx - self.x) as usize, (wy - self.y) as usize);
                let theirs = other
                    .rendered
                    .is_opaque((wx - other.x) as usize, (wy - other.y) as usize);
                if mine && theirs {
                    return true;
                }
            }
        }
        false
    }
}

impl Clone for Sprite {
    /// Deep copy with a fresh identity
    fn clone(&self) -> Self {
        Self {
            id: SpriteId::next(),
            name: self.name.clone(),
            pixels: self.pixels.clone(),
            x: self.x,
            y: self.y,
            scale: self.scale,
            rotation: self.rotation,
            layer: self.layer,
            blocking: self.blocking,
            interaction: self.interaction,
            tags: self.tags.clone(),
            mirror_ud: self.mirror_ud,
            mirror_lr: self.mirror_lr,
            rendered: self.rendered.clone(),
        }
    }
}

/// Equality compares configuration; identity is ignored
impl PartialEq for Sprite {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.pixels == other.pixels
            && self.x == other.x
            && self.y == other.y
            && self.scale == other.scale
            && self.rotation == other.rotation
            && self.layer == other.layer
            && self.blocking == other.blocking
            && self.interaction == other.interaction
            && self.tags == other.tags
            && self.mirror_ud == other.mirror_ud
            && self.mirror_lr == other.mirror_lr
    }
}

impl Eq for Sprite {}
