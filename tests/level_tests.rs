//! Level tests - queries, movement and static merging

use grid_arcade::core::{Level, MoveOutcome, Sprite};
use grid_arcade::types::{BlockingMode, InteractionMode, STATIC_TAG};

fn block(x: i32, y: i32, blocking: BlockingMode) -> Sprite {
    Sprite::new(&[[1, 1], [1, 1]])
        .unwrap()
        .with_position(x, y)
        .with_blocking(blocking)
}

#[test]
fn test_move_is_atomic() {
    let player = block(0, 0, BlockingMode::PixelPerfect).with_name("player").unwrap();
    let wall = block(3, 0, BlockingMode::BoundingBox).with_name("wall").unwrap();
    let wall_id = wall.id();
    let mut level = Level::new(vec![player, wall]);
    let id = level.get_sprites_by_name("player")[0].id();

    // Moving by two would overlap the wall at x=3
    let outcome = level.try_move(id, 2, 0).unwrap();
    assert_eq!(outcome, MoveOutcome::Blocked(vec![wall_id]));
    let player = level.get_sprite(id).unwrap();
    assert_eq!((player.x(), player.y()), (0, 0));

    assert!(level.try_move(id, 1, 0).unwrap().is_moved());
    assert_eq!(level.get_sprite(id).unwrap().x(), 1);
}

#[test]
fn test_not_blocked_sprites_pass_through() {
    let ghost = block(0, 0, BlockingMode::NotBlocked);
    let id = ghost.id();
    let mut level = Level::new(vec![ghost, block(1, 0, BlockingMode::BoundingBox)]);
    assert!(level.try_move(id, 1, 0).unwrap().is_moved());
}

#[test]
fn test_intangible_sprites_do_not_block() {
    let player = block(0, 0, BlockingMode::BoundingBox);
    let id = player.id();
    let door = block(2, 0, BlockingMode::BoundingBox).with_interaction(InteractionMode::Intangible);
    let mut level = Level::new(vec![player, door]);
    assert!(level.try_move(id, 2, 0).unwrap().is_moved());
}

#[test]
fn test_tag_queries() {
    let level = Level::new(vec![
        block(0, 0, BlockingMode::NotBlocked).with_tag("enemy").with_tag("flying"),
        block(5, 0, BlockingMode::NotBlocked).with_tag("enemy"),
        block(9, 0, BlockingMode::NotBlocked).with_tag("coin"),
    ]);
    assert_eq!(level.get_sprites_by_tag("enemy").len(), 2);
    assert_eq!(level.get_sprites_by_tags(&["enemy", "flying"]).len(), 1);
    assert_eq!(level.get_sprites_by_any_tag(&["flying", "coin"]).len(), 2);
    assert!(level.get_sprites_by_tags::<&str>(&[]).is_empty());
    let tags: Vec<String> = level.get_all_tags().into_iter().collect();
    assert_eq!(tags, vec!["coin", "enemy", "flying"]);
}

#[test]
fn test_sprite_at_prefers_higher_layer() {
    let floor = block(0, 0, BlockingMode::NotBlocked).with_name("floor").unwrap();
    let chest = block(1, 1, BlockingMode::NotBlocked)
        .with_layer(2)
        .with_name("chest")
        .unwrap()
        .with_tag("item");
    let gone = block(1, 1, BlockingMode::NotBlocked)
        .with_layer(9)
        .with_interaction(InteractionMode::Removed);
    let level = Level::new(vec![floor, chest, gone]);

    assert_eq!(level.get_sprite_at(1, 1, None).unwrap().name(), "chest");
    assert_eq!(level.get_sprite_at(0, 0, None).unwrap().name(), "floor");
    assert_eq!(level.get_sprite_at(0, 0, Some("item")).map(|s| s.name()), None);
    assert!(level.get_sprite_at(10, 10, None).is_none());
}

#[test]
fn test_static_sprites_merge_into_one() {
    let tiles: Vec<Sprite> = (0..4)
        .map(|i| {
            Sprite::new(&[[3]])
                .unwrap()
                .with_position(i * 2, 0)
                .with_blocking(BlockingMode::PixelPerfect)
                .with_tag(STATIC_TAG)
        })
        .collect();
    let player = Sprite::new(&[[2]])
        .unwrap()
        .with_position(1, 1)
        .with_blocking(BlockingMode::PixelPerfect);
    let id = player.id();

    let mut sprites = tiles;
    sprites.push(player);
    let mut level = Level::new(sprites);
    assert_eq!(level.len(), 2);

    let floor = &level.get_sprites_by_tag(STATIC_TAG)[0];
    assert_eq!(floor.render().to_rows(), vec![vec![3, -1, 3, -1, 3, -1, 3]]);

    // Gaps in the composite stay passable, painted cells do not
    assert!(level.try_move(id, 0, -1).unwrap().is_moved());
    assert!(!level.try_move(id, 1, 0).unwrap().is_moved());
    assert_eq!(level.get_sprite(id).unwrap().x(), 1);
}

#[test]
fn test_level_data_round_trip() {
    let mut level = Level::new(vec![]).with_name("intro").with_data("moves", 12);
    assert_eq!(level.name(), Some("intro"));
    assert_eq!(level.get_data("moves"), Some(&serde_json::json!(12)));
    level.set_data("moves", 11);
    assert_eq!(level.get_data("moves").and_then(|v| v.as_i64()), Some(11));
    assert!(level.get_data("missing").is_none());
}

#[test]
fn test_clone_is_independent() {
    let template = Level::new(vec![block(0, 0, BlockingMode::NotBlocked).with_name("p").unwrap()]);
    let mut copy = template.clone();
    copy.get_sprite_by_name_mut("p").unwrap().set_position(7, 7);
    assert_eq!(template.get_sprites_by_name("p")[0].x(), 0);
    assert_eq!(template, {
        let mut back = copy.clone();
        back.get_sprite_by_name_mut("p").unwrap().set_position(0, 0);
        back
    });
}
