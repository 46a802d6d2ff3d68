//! Controller tests - action loop, resets and level progression

use grid_arcade::core::{Level, Sprite};
use grid_arcade::engine::{
    ActionInput, ActionOutcome, Camera, EngineConfig, Game, GameController, Session,
};
use grid_arcade::types::{BlockingMode, GameAction, GameState, MAX_FRAMES_PER_ACTION};

/// ACTION1-4 move the player; ACTION6 teleports it to the clicked cell;
/// stepping onto the goal advances the level. ACTION5 slides right one
/// cell per frame until blocked, ignoring goals.
struct Maze;

impl Maze {
    fn check_goal(session: &mut Session) {
        let level = session.level();
        let player = level.get_sprites_by_name("player")[0];
        if level.get_sprites_by_tag("goal")[0].contains_point(player.x(), player.y()) {
            session.next_level().unwrap();
        }
    }
}

impl Game for Maze {
    fn step(&mut self, session: &mut Session) {
        let Some(input) = session.action().copied() else {
            session.complete_action();
            return;
        };
        let (dx, dy) = match input.action {
            GameAction::Action1 => (0, -1),
            GameAction::Action2 => (0, 1),
            GameAction::Action3 => (-1, 0),
            GameAction::Action4 => (1, 0),
            GameAction::Action5 => {
                let moved = session.try_move_named("player", 1, 0).unwrap().is_moved();
                if !moved {
                    session.complete_action();
                }
                return;
            }
            GameAction::Action6 => {
                if let Some((px, py)) = input.position() {
                    if let Some((x, y)) = session.camera().display_to_grid(px, py) {
                        if let Some(p) = session.level_mut().get_sprite_by_name_mut("player") {
                            p.set_position(x, y);
                        }
                    }
                }
                Self::check_goal(session);
                session.complete_action();
                return;
            }
            _ => (0, 0),
        };
        session.try_move_named("player", dx, dy).unwrap();
        Self::check_goal(session);
        session.complete_action();
    }
}

/// ACTION1 reshapes the whole level; everything else is a no-op
struct Vandal;

impl Game for Vandal {
    fn step(&mut self, session: &mut Session) {
        if session.action().map(|a| a.action) == Some(GameAction::Action1) {
            let level = session.level_mut();
            if let Some(player) = level.get_sprite_by_name_mut("player") {
                player.rotate(90).unwrap();
                player.set_scale(2).unwrap();
                player.color_remap(None, 9).unwrap();
                player.set_mirror_lr(true);
                player.move_by(3, 1);
                player.set_layer(4);
                player.add_tag("scarred");
            }
            let doomed = level.get_sprites_by_name("crate").first().map(|s| s.id());
            if let Some(id) = doomed {
                level.remove_sprite(id);
            }
            level.add_sprite(Sprite::new(&[[6, 6]]).unwrap().with_position(5, 5));
            let moves = level.get_data("moves").and_then(|v| v.as_i64()).unwrap_or(0);
            level.set_data("moves", moves + 1);
        }
        session.complete_action();
    }
}

fn vandal_level() -> Level {
    let player = Sprite::new(&[[2, 3], [4, -1]])
        .unwrap()
        .with_name("player")
        .unwrap()
        .with_blocking(BlockingMode::PixelPerfect);
    let crate_box = Sprite::new(&[[7]])
        .unwrap()
        .with_name("crate")
        .unwrap()
        .with_position(4, 4);
    Level::new(vec![player, crate_box])
        .with_name("yard")
        .with_grid_size(16, 16)
        .unwrap()
        .with_data("moves", 0)
}

/// Never finishes an action
struct Spinner;

impl Game for Spinner {
    fn step(&mut self, _session: &mut Session) {}
}

fn maze_level(name: &str, goal_x: i32) -> Level {
    let player = Sprite::new(&[[2]])
        .unwrap()
        .with_name("player")
        .unwrap()
        .with_blocking(BlockingMode::BoundingBox);
    let goal = Sprite::new(&[[3]])
        .unwrap()
        .with_position(goal_x, 0)
        .with_layer(-1)
        .with_tag("goal");
    let wall = Sprite::new(&[[1]])
        .unwrap()
        .with_position(7, 0)
        .with_blocking(BlockingMode::BoundingBox);
    Level::new(vec![player, goal, wall])
        .with_name(name)
        .with_grid_size(8, 8)
        .unwrap()
}

fn maze() -> GameController<Maze> {
    GameController::with_config(
        "maze",
        Maze,
        vec![maze_level("first", 2), maze_level("second", 4)],
        None,
        EngineConfig::default(),
    )
    .unwrap()
}

fn act(controller: &mut GameController<Maze>, action: GameAction) -> GameState {
    controller
        .perform_action(ActionInput::new(action))
        .unwrap()
        .state
}

#[test]
fn test_requires_levels() {
    let result = GameController::with_config("empty", Maze, vec![], None, EngineConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_first_action_starts_the_game() {
    let mut c = maze();
    assert_eq!(c.state(), GameState::NotPlayed);
    assert_eq!(act(&mut c, GameAction::Action7), GameState::NotFinished);
}

#[test]
fn test_levels_advance_to_win() {
    let mut c = maze();
    act(&mut c, GameAction::Action4);
    let data = c.perform_action(ActionInput::new(GameAction::Action4)).unwrap();
    assert_eq!(data.levels_completed, 1);
    assert_eq!(c.level_index(), 1);
    assert_eq!(c.level().name(), Some("second"));

    for _ in 0..3 {
        act(&mut c, GameAction::Action4);
    }
    assert_eq!(act(&mut c, GameAction::Action4), GameState::Win);
    assert_eq!(c.levels_completed(), 2);
}

#[test]
fn test_actions_after_game_end_do_nothing() {
    let mut c = maze();
    for _ in 0..6 {
        act(&mut c, GameAction::Action4);
    }
    assert_eq!(c.state(), GameState::Win);
    let before = c.render();
    let data = c.perform_action(ActionInput::new(GameAction::Action3)).unwrap();
    assert_eq!(data.frames.len(), 1);
    assert_eq!(data.frames[0], before);
    assert_eq!(data.state, GameState::Win);
}

#[test]
fn test_reset_restores_level_and_keeps_score() {
    let mut c = maze();
    act(&mut c, GameAction::Action4);
    act(&mut c, GameAction::Action4);
    act(&mut c, GameAction::Action4);
    assert_eq!(c.level_index(), 1);

    let data = c.perform_action(ActionInput::reset()).unwrap();
    assert_eq!(data.state, GameState::NotFinished);
    assert_eq!(data.levels_completed, 1);
    assert_eq!(c.level_index(), 1);
    assert_eq!(c.level().get_sprites_by_name("player")[0].x(), 0);
}

#[test]
fn test_double_reset_is_full_reset() {
    let mut c = maze();
    act(&mut c, GameAction::Action4);
    act(&mut c, GameAction::Action4);
    assert_eq!(c.level_index(), 1);

    let first = c.perform_action(ActionInput::reset()).unwrap();
    let second = c.perform_action(ActionInput::reset()).unwrap();
    assert_eq!(second.levels_completed, 0);
    assert_eq!(c.level_index(), 0);

    // Resetting again from the same state gives the same frames
    let third = c.perform_action(ActionInput::reset()).unwrap();
    assert_eq!(second.frames, third.frames);
    assert_eq!(first.levels_completed, 1);
}

#[test]
fn test_reset_after_win_starts_over() {
    let mut c = maze();
    for _ in 0..6 {
        act(&mut c, GameAction::Action4);
    }
    let data = c.perform_action(ActionInput::reset()).unwrap();
    assert_eq!(data.state, GameState::NotFinished);
    assert_eq!(data.levels_completed, 0);
    assert_eq!(c.level_index(), 0);
}

#[test]
fn test_multi_frame_action() {
    let mut c = maze();
    let data = c.perform_action(ActionInput::new(GameAction::Action5)).unwrap();
    // Six moves up to the wall at x=7, then one blocked frame
    assert_eq!(data.outcome, ActionOutcome::Completed);
    assert_eq!(data.frames.len(), 7);
    assert_eq!(c.level_index(), 0);
    assert_eq!(c.level().get_sprites_by_name("player")[0].x(), 6);
}

#[test]
fn test_click_payload_maps_to_world() {
    let mut c = maze();
    // 8×8 viewport: scale 8, so output (20, 3) is world (2, 0)
    let data = c
        .perform_action(ActionInput::with_position(GameAction::Action6, 20, 3))
        .unwrap();
    assert_eq!(data.levels_completed, 1);

    let err = c
        .perform_action(ActionInput::new(GameAction::Action6))
        .unwrap_err();
    assert_eq!(err.code(), "invalid_action");
    assert!(c
        .perform_action(ActionInput::with_position(GameAction::Action6, 64, 0))
        .is_err());
}

#[test]
fn test_frame_cap_bounds_output() {
    let level = Level::new(vec![Sprite::new(&[[1]]).unwrap()]);
    let mut c = GameController::with_config(
        "spin",
        Spinner,
        vec![level],
        Some(Camera::default()),
        EngineConfig {
            max_frames_per_action: 5,
            ..EngineConfig::default()
        },
    )
    .unwrap();
    let data = c.perform_action(ActionInput::new(GameAction::Action1)).unwrap();
    assert_eq!(data.frames.len(), 5);
    assert_eq!(data.outcome, ActionOutcome::FrameCapReached);
}

#[test]
fn test_reset_restores_deeply_mutated_level() {
    let template = vandal_level();
    let mut c = GameController::with_config(
        "vandal",
        Vandal,
        vec![template.clone()],
        None,
        EngineConfig::default(),
    )
    .unwrap();
    let pristine = c.render();

    for _ in 0..3 {
        c.perform_action(ActionInput::new(GameAction::Action1)).unwrap();
    }
    assert_ne!(c.level(), &template);
    assert_eq!(c.level().len(), 4);
    assert_eq!(c.level().get_data("moves"), Some(&serde_json::json!(3)));

    // Level reset, then full reset: both land on the template
    let data = c.perform_action(ActionInput::reset()).unwrap();
    assert_eq!(c.level(), &template);
    assert_eq!(data.frames.last(), Some(&pristine));

    c.perform_action(ActionInput::reset()).unwrap();
    assert_eq!(c.level(), &template);
    assert_eq!(c.render(), pristine);
}

#[test]
fn test_default_frame_cap_is_one_thousand() {
    let level = Level::new(vec![Sprite::new(&[[1]]).unwrap()]);
    let mut c =
        GameController::with_config("spin", Spinner, vec![level], None, EngineConfig::default())
            .unwrap();
    let data = c.perform_action(ActionInput::new(GameAction::Action2)).unwrap();
    assert_eq!(data.frames.len(), MAX_FRAMES_PER_ACTION);
    assert_eq!(data.frames.len(), 1000);
    assert_eq!(data.outcome, ActionOutcome::FrameCapReached);
    assert_eq!(data.state, GameState::NotFinished);
}

#[test]
fn test_frame_cap_never_exceeds_limit() {
    let config = EngineConfig {
        max_frames_per_action: 1_000_000,
        ..EngineConfig::default()
    };
    assert_eq!(config.frame_cap(), MAX_FRAMES_PER_ACTION);
}

#[test]
fn test_same_actions_same_frames() {
    let actions = [
        GameAction::Action4,
        GameAction::Action5,
        GameAction::Reset,
        GameAction::Action1,
        GameAction::Action3,
    ];
    let run = || {
        let mut c = maze();
        actions
            .iter()
            .map(|&a| c.perform_action(ActionInput::new(a)).unwrap().frames)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
