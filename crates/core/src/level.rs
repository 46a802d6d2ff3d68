//! Level module - an ordered collection of sprites
//!
//! Insertion order is significant: it breaks paint ties between sprites on
//! the same layer and decides which sprite wins a point query.
//!
//! Levels passed to a controller act as templates. The controller plays on
//! a clone, and cloning deep-copies every sprite, so a reset always starts
//! from the pristine template.

use std::collections::BTreeSet;

use log::trace;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::merge::merge_static;
use crate::sprite::{Sprite, SpriteId};
use crate::types::{InteractionMode, MAX_VIEWPORT};

/// Result of [`Level::try_move`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The move was reverted; ids of the sprites in the way
    Blocked(Vec<SpriteId>),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }

    pub fn blockers(&self) -> &[SpriteId] {
        match self {
            MoveOutcome::Moved => &[],
            MoveOutcome::Blocked(ids) => ids,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    name: Option<String>,
    grid_size: Option<(u32, u32)>,
    sprites: Vec<Sprite>,
    data: Map<String, Value>,
}

impl Level {
    /// Create a level, merging `static`-tagged sprites
    pub fn new(sprites: Vec<Sprite>) -> Self {
        Self {
            name: None,
            grid_size: None,
            sprites: merge_static(sprites),
            data: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare the playfield size the camera should use for this level
    pub fn with_grid_size(mut self, width: u32, height: u32) -> Result<Self, ValidationError> {
        if !(1..=MAX_VIEWPORT).contains(&width) || !(1..=MAX_VIEWPORT).contains(&height) {
            return Err(ValidationError::InvalidViewport { width, height });
        }
        self.grid_size = Some((width, height));
        Ok(self)
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn grid_size(&self) -> Option<(u32, u32)> {
        self.grid_size
    }

    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    // Mutation

    /// Append a sprite on top of the insertion order
    pub fn add_sprite(&mut self, sprite: Sprite) -> SpriteId {
        let id = sprite.id();
        self.sprites.push(sprite);
        id
    }

    /// Remove a sprite, returning it if it was part of this level
    pub fn remove_sprite(&mut self, id: SpriteId) -> Option<Sprite> {
        let idx = self.position(id)?;
        Some(self.sprites.remove(idx))
    }

    fn position(&self, id: SpriteId) -> Option<usize> {
        self.sprites.iter().position(|s| s.id() == id)
    }

    // Queries

    /// All sprites in insertion order
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Snapshot of the sprite list; changes to the returned vector do not
    /// affect the level
    pub fn get_sprites(&self) -> Vec<&Sprite> {
        self.sprites.iter().collect()
    }

    pub fn get_sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.id() == id)
    }

    pub fn get_sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.id() == id)
    }

    pub fn get_sprites_by_name(&self, name: &str) -> Vec<&Sprite> {
        self.sprites.iter().filter(|s| s.name() == name).collect()
    }

    /// First sprite with the given name
    pub fn get_sprite_by_name_mut(&mut self, name: &str) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.name() == name)
    }

    pub fn get_sprites_by_tag(&self, tag: &str) -> Vec<&Sprite> {
        self.sprites.iter().filter(|s| s.has_tag(tag)).collect()
    }

    pub fn get_sprites_by_tag_mut<'a>(
        &'a mut self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a mut Sprite> + 'a {
        self.sprites.iter_mut().filter(move |s| s.has_tag(tag))
    }

    /// Sprites carrying every tag in `tags`; an empty list matches nothing
    pub fn get_sprites_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<&Sprite> {
        if tags.is_empty() {
            return Vec::new();
        }
        self.sprites.iter().filter(|s| s.has_all_tags(tags)).collect()
    }

    /// Sprites carrying at least one tag in `tags`
    pub fn get_sprites_by_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> Vec<&Sprite> {
        self.sprites.iter().filter(|s| s.has_any_tag(tags)).collect()
    }

    /// Every tag used in the level, sorted
    pub fn get_all_tags(&self) -> BTreeSet<String> {
        self.sprites
            .iter()
            .flat_map(|s| s.tags())
            .map(str::to_owned)
            .collect()
    }

    /// Topmost sprite whose rendered rectangle contains the world point
    ///
    /// REMOVED sprites are skipped. Higher layers win; on equal layers the
    /// later sprite wins. With `tag`, only sprites carrying it are considered.
    pub fn get_sprite_at(&self, x: i32, y: i32, tag: Option<&str>) -> Option<&Sprite> {
        self.sprites
            .iter()
            .filter(|s| s.interaction() != InteractionMode::Removed)
            .filter(|s| tag.map_or(true, |t| s.has_tag(t)))
            .filter(|s| s.contains_point(x, y))
            .max_by_key(|s| s.layer())
    }

    /// Ids of every sprite that `id` currently collides with
    pub fn collisions(&self, id: SpriteId) -> Result<Vec<SpriteId>, ValidationError> {
        let sprite = self
            .get_sprite(id)
            .ok_or_else(|| ValidationError::SpriteNotFound(format!("id {}", id.get())))?;
        Ok(self
            .sprites
            .iter()
            .filter(|other| sprite.collides_with(other))
            .map(Sprite::id)
            .collect())
    }

    /// Move a sprite by (dx, dy) unless that would make it collide
    ///
    /// On collision the sprite is put back exactly where it was and the
    /// blocking sprites are reported.
    pub fn try_move(
        &mut self,
        id: SpriteId,
        dx: i32,
        dy: i32,
    ) -> Result<MoveOutcome, ValidationError> {
        let idx = self
            .position(id)
            .ok_or_else(|| ValidationError::SpriteNotFound(format!("id {}", id.get())))?;

        let origin = (self.sprites[idx].x(), self.sprites[idx].y());
        self.sprites[idx].move_by(dx, dy);
        let moved = &self.sprites[idx];
        let blockers: Vec<SpriteId> = self
            .sprites
            .iter()
            .filter(|other| moved.collides_with(other))
            .map(Sprite::id)
            .collect();

        if blockers.is_empty() {
            trace!("{} moved by ({dx}, {dy})", moved.name());
            Ok(MoveOutcome::Moved)
        } else {
            trace!(
                "{} blocked moving by ({dx}, {dy}) by {} sprite(s)",
                moved.name(),
                blockers.len()
            );
            self.sprites[idx].set_position(origin.0, origin.1);
            Ok(MoveOutcome::Blocked(blockers))
        }
    }
}
