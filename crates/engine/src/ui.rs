//! UI overlays drawn on top of the final 64×64 frame.
//!
//! Overlays address output coordinates directly, after the camera has
//! scaled and letterboxed the world view, so a HUD can use the letterbox
//! border as well.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{Sprite, ValidationError};
use crate::frame::Frame;

pub trait UserDisplay {
    fn render_interface(&self, frame: &mut Frame);
}

/// Lets game logic keep a handle to an overlay the camera also draws.
impl<T: UserDisplay + ?Sized> UserDisplay for Rc<RefCell<T>> {
    fn render_interface(&self, frame: &mut Frame) {
        self.borrow().render_interface(frame);
    }
}

impl<T: UserDisplay + ?Sized> UserDisplay for Box<T> {
    fn render_interface(&self, frame: &mut Frame) {
        (**self).render_interface(frame);
    }
}

/// Pairs of sprites where each pair shows one of its two sprites
///
/// An enabled pair draws its first sprite, a disabled pair its second.
/// Pairs start enabled.
#[derive(Debug, Clone)]
pub struct ToggleableDisplay {
    pairs: Vec<(Sprite, Sprite)>,
    enabled: Vec<bool>,
}

impl ToggleableDisplay {
    pub fn new(pairs: Vec<(Sprite, Sprite)>) -> Self {
        let enabled = vec![true; pairs.len()];
        Self { pairs, enabled }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn check(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.pairs.len() {
            return Err(ValidationError::DisplayIndexOutOfRange {
                index,
                len: self.pairs.len(),
            });
        }
        Ok(())
    }

    pub fn is_enabled(&self, index: usize) -> Result<bool, ValidationError> {
        self.check(index)?;
        Ok(self.enabled[index])
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<(), ValidationError> {
        self.check(index)?;
        self.enabled[index] = enabled;
        Ok(())
    }

    pub fn enable(&mut self, index: usize) -> Result<(), ValidationError> {
        self.set_enabled(index, true)
    }

    pub fn disable(&mut self, index: usize) -> Result<(), ValidationError> {
        self.set_enabled(index, false)
    }

    pub fn enable_all(&mut self) {
        self.enabled.fill(true);
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled.iter().filter(|&&e| e).count()
    }

    /// Pair at `index` as (enabled sprite, disabled sprite)
    pub fn pair(&self, index: usize) -> Option<&(Sprite, Sprite)> {
        self.pairs.get(index)
    }

    fn first_by_tag(&self, tag: &str, enabled: bool) -> Option<usize> {
        self.pairs
            .iter()
            .zip(&self.enabled)
            .position(|((on, off), &e)| e == enabled && (on.has_tag(tag) || off.has_tag(tag)))
    }

    /// Disable the first enabled pair tagged `tag`; false if there is none
    pub fn disable_first_by_tag(&mut self, tag: &str) -> bool {
        match self.first_by_tag(tag, true) {
            Some(i) => {
                self.enabled[i] = false;
                true
            }
            None => false,
        }
    }

    /// Enable the first disabled pair tagged `tag`; false if there is none
    pub fn enable_first_by_tag(&mut self, tag: &str) -> bool {
        match self.first_by_tag(tag, false) {
            Some(i) => {
                self.enabled[i] = true;
                true
            }
            None => false,
        }
    }
}

impl UserDisplay for ToggleableDisplay {
    fn render_interface(&self, frame: &mut Frame) {
        let mut shown: Vec<&Sprite> = self
            .pairs
            .iter()
            .zip(&self.enabled)
            .map(|((on, off), &e)| if e { on } else { off })
            .filter(|s| s.is_visible())
            .collect();
        shown.sort_by_key(|s| s.layer());
        for sprite in shown {
            frame.draw_grid(sprite.render(), sprite.x(), sprite.y());
        }
    }
}
