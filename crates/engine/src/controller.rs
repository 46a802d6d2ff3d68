//! Game controller - the turn-based action/frame loop
//!
//! The controller owns the pristine level templates, the live level being
//! played and the camera. Game rules live outside the engine behind the
//! [`Game`] trait; during a step they see the engine through a [`Session`].
//!
//! # Lifecycle
//!
//! ```text
//! NOT_PLAYED --first action--> NOT_FINISHED --win()--> WIN
//!                                           --lose()--> GAME_OVER
//! WIN / GAME_OVER --RESET--> NOT_FINISHED (full reset)
//! ```
//!
//! # Action Loop
//!
//! For every non-RESET action the controller clears the completion flag and
//! then repeats `step -> render -> append` until the game calls
//! [`Session::complete_action`] or the frame cap is reached. Level changes
//! requested during a step run the [`Game::on_set_level`] hook after the
//! step returns and before its frame is rendered.

use log::{debug, warn};

use crate::action::{ActionInput, ActionOutcome, FrameData};
use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::core::{Level, MoveOutcome, SpriteId, ValidationError};
use crate::frame::Frame;
use crate::types::{GameAction, GameState};

/// Game rules plugged into a [`GameController`]
pub trait Game {
    /// Advance the game by one frame of the current action.
    ///
    /// Must eventually call [`Session::complete_action`]; otherwise the loop
    /// runs until the frame cap.
    fn step(&mut self, session: &mut Session);

    /// Called whenever a level is entered, including the first one.
    fn on_set_level(&mut self, _session: &mut Session) {}
}

/// Engine state visible to game logic
#[derive(Debug)]
pub struct Session {
    game_id: String,
    config: EngineConfig,
    templates: Vec<Level>,
    level_index: usize,
    level: Level,
    camera: Camera,
    action: Option<ActionInput>,
    action_complete: bool,
    state: GameState,
    levels_completed: u32,
    action_count: u32,
    level_changed: bool,
}

impl Session {
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.templates.len()
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 == self.templates.len()
    }

    /// Action currently being processed
    pub fn action(&self) -> Option<&ActionInput> {
        self.action.as_ref()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn levels_completed(&self) -> u32 {
        self.levels_completed
    }

    /// Actions performed since the last reset
    pub fn action_count(&self) -> u32 {
        self.action_count
    }

    /// End the current action after this step's frame
    pub fn complete_action(&mut self) {
        self.action_complete = true;
    }

    pub fn is_action_complete(&self) -> bool {
        self.action_complete
    }

    pub fn win(&mut self) {
        self.state = GameState::Win;
    }

    pub fn lose(&mut self) {
        self.state = GameState::GameOver;
    }

    /// Replace the live level with a fresh clone of template `index`
    pub fn set_level(&mut self, index: usize) -> Result<(), ValidationError> {
        let template = self
            .templates
            .get(index)
            .ok_or(ValidationError::LevelIndexOutOfRange {
                index,
                len: self.templates.len(),
            })?;
        if let Some((width, height)) = template.grid_size() {
            self.camera.resize(width, height)?;
        }
        self.level = template.clone();
        self.level_index = index;
        self.level_changed = true;
        debug!(
            "{}: entered level {} ({})",
            self.game_id,
            index,
            self.level.name().unwrap_or("unnamed")
        );
        Ok(())
    }

    pub fn set_level_by_name(&mut self, name: &str) -> Result<(), ValidationError> {
        let index = self
            .templates
            .iter()
            .position(|l| l.name() == Some(name))
            .ok_or_else(|| ValidationError::LevelNotFound(name.to_string()))?;
        self.set_level(index)
    }

    /// Count the current level as completed and advance
    ///
    /// Completing the last level wins the game. Fails only if the next
    /// level cannot be entered, leaving the current one in place.
    pub fn next_level(&mut self) -> Result<(), ValidationError> {
        if self.is_last_level() {
            self.win();
        } else {
            self.set_level(self.level_index + 1)?;
        }
        self.levels_completed += 1;
        Ok(())
    }

    /// Move a sprite of the live level; see [`Level::try_move`]
    pub fn try_move(
        &mut self,
        id: SpriteId,
        dx: i32,
        dy: i32,
    ) -> Result<MoveOutcome, ValidationError> {
        self.level.try_move(id, dx, dy)
    }

    /// Move the first sprite named `name`
    pub fn try_move_named(
        &mut self,
        name: &str,
        dx: i32,
        dy: i32,
    ) -> Result<MoveOutcome, ValidationError> {
        let id = self
            .level
            .get_sprites_by_name(name)
            .first()
            .map(|s| s.id())
            .ok_or_else(|| ValidationError::SpriteNotFound(format!("name {name}")))?;
        self.level.try_move(id, dx, dy)
    }

    /// Render the live level through the camera
    pub fn render(&self) -> Frame {
        self.camera.render(self.level.sprites())
    }

    fn take_level_change(&mut self) -> bool {
        std::mem::take(&mut self.level_changed)
    }

    fn reset_level(&mut self) -> Result<(), ValidationError> {
        self.set_level(self.level_index)
    }

    fn full_reset(&mut self) -> Result<(), ValidationError> {
        self.set_level(0)?;
        self.levels_completed = 0;
        self.action_count = 0;
        self.state = GameState::NotPlayed;
        Ok(())
    }
}

/// Drives a [`Game`] through levels and actions
pub struct GameController<G> {
    game: G,
    session: Session,
}

impl<G: Game> GameController<G> {
    /// Create a controller with configuration read from the environment
    pub fn new(
        game_id: impl Into<String>,
        game: G,
        levels: Vec<Level>,
        camera: Option<Camera>,
    ) -> Result<Self, ValidationError> {
        Self::with_config(game_id, game, levels, camera, EngineConfig::from_env())
    }

    pub fn with_config(
        game_id: impl Into<String>,
        game: G,
        levels: Vec<Level>,
        camera: Option<Camera>,
        config: EngineConfig,
    ) -> Result<Self, ValidationError> {
        let Some(first) = levels.first() else {
            return Err(ValidationError::NoLevels);
        };
        let level = first.clone();
        let camera = camera.unwrap_or_else(|| Camera::from_config(&config));

        let mut controller = Self {
            game,
            session: Session {
                game_id: game_id.into(),
                config,
                templates: levels,
                level_index: 0,
                level,
                camera,
                action: None,
                action_complete: false,
                state: GameState::NotPlayed,
                levels_completed: 0,
                action_count: 0,
                level_changed: false,
            },
        };
        controller.set_level(0)?;
        Ok(controller)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn game_id(&self) -> &str {
        self.session.game_id()
    }

    pub fn state(&self) -> GameState {
        self.session.state
    }

    pub fn level(&self) -> &Level {
        &self.session.level
    }

    pub fn camera(&self) -> &Camera {
        &self.session.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.session.camera
    }

    pub fn level_index(&self) -> usize {
        self.session.level_index
    }

    pub fn levels_completed(&self) -> u32 {
        self.session.levels_completed
    }

    fn run_level_hook(&mut self) {
        if self.session.take_level_change() {
            self.game.on_set_level(&mut self.session);
        }
    }

    pub fn set_level(&mut self, index: usize) -> Result<(), ValidationError> {
        self.session.set_level(index)?;
        self.run_level_hook();
        Ok(())
    }

    pub fn set_level_by_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.session.set_level_by_name(name)?;
        self.run_level_hook();
        Ok(())
    }

    pub fn next_level(&mut self) -> Result<(), ValidationError> {
        self.session.next_level()?;
        self.run_level_hook();
        Ok(())
    }

    /// Back to level 0 with a clean score and NOT_PLAYED state
    pub fn full_reset(&mut self) -> Result<(), ValidationError> {
        self.session.full_reset()?;
        self.run_level_hook();
        Ok(())
    }

    /// Render the live level without stepping
    pub fn render(&self) -> Frame {
        self.session.render()
    }

    fn frame_data(&self, input: ActionInput, frames: Vec<Frame>, outcome: ActionOutcome) -> FrameData {
        FrameData {
            game_id: self.session.game_id.clone(),
            frames,
            state: self.session.state,
            levels_completed: self.session.levels_completed,
            action: input,
            outcome,
        }
    }

    /// Apply one action and collect the frames it produces
    ///
    /// Fails only when the payload does not match the action; the game is
    /// untouched in that case.
    pub fn perform_action(&mut self, input: ActionInput) -> Result<FrameData, ValidationError> {
        input.validate()?;

        if input.action == GameAction::Reset {
            if self.session.state.is_terminal() || self.session.action_count == 0 {
                debug!("{}: full reset", self.session.game_id);
                self.full_reset()?;
            } else {
                debug!("{}: level reset", self.session.game_id);
                self.session.reset_level()?;
                self.run_level_hook();
            }
            self.session.state = GameState::NotFinished;
            self.session.action_count = 0;
        } else {
            if self.session.state.is_terminal() {
                let frame = self.session.render();
                return Ok(self.frame_data(input, vec![frame], ActionOutcome::Completed));
            }
            if self.session.state == GameState::NotPlayed {
                self.session.state = GameState::NotFinished;
            }
            self.session.action_count += 1;
        }

        self.session.action = Some(input);
        self.session.action_complete = false;

        let cap = self.session.config.frame_cap();
        let mut frames = Vec::new();
        let outcome = loop {
            self.game.step(&mut self.session);
            self.run_level_hook();
            frames.push(self.session.render());

            if self.session.action_complete {
                break ActionOutcome::Completed;
            }
            if frames.len() >= cap {
                warn!(
                    "{}: {} cut off after {} frames",
                    self.session.game_id,
                    input.action.as_str(),
                    frames.len()
                );
                break ActionOutcome::FrameCapReached;
            }
        };

        Ok(self.frame_data(input, frames, outcome))
    }
}
