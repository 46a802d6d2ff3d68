//! Camera tests - viewport scaling, letterboxing and overlays

use std::cell::RefCell;
use std::rc::Rc;

use grid_arcade::core::{Level, Sprite};
use grid_arcade::engine::{Camera, ToggleableDisplay};
use grid_arcade::types::{BlockingMode, InteractionMode, FRAME_SIZE, STATIC_TAG};

fn solid(color: i32, w: usize, h: usize) -> Sprite {
    Sprite::new(&vec![vec![color; w]; h]).unwrap()
}

#[test]
fn test_twenty_by_twenty_letterbox() {
    let camera = Camera::new(0, 0, 20, 20, 0, 4).unwrap();
    let frame = camera.render(&[] as &[Sprite]);
    let size = FRAME_SIZE as i32;

    for y in 0..size {
        for x in 0..size {
            let inside = (2..62).contains(&x) && (2..62).contains(&y);
            let expected = if inside { 0 } else { 4 };
            assert_eq!(frame.get(x, y), Some(expected), "cell ({x}, {y})");
        }
    }
}

#[test]
fn test_sprite_is_scaled_into_frame() {
    let camera = Camera::new(0, 0, 16, 16, 0, 0).unwrap();
    let sprite = solid(9, 1, 1).with_position(15, 15);
    let frame = camera.render([&sprite]);

    // 16 -> scale 4, no letterbox
    for y in 60..64 {
        for x in 60..64 {
            assert_eq!(frame.get(x, y), Some(9));
        }
    }
    assert_eq!(frame.get(59, 59), Some(0));
}

#[test]
fn test_camera_offset_and_clipping() {
    let camera = Camera::new(10, 10, 8, 8, 0, 0).unwrap();
    let outside = solid(3, 4, 4).with_position(0, 0);
    let edge = solid(7, 4, 4).with_position(8, 8);
    let view = camera.render_viewport([&outside, &edge]);

    assert_eq!(view.get(0, 0), Some(7));
    assert_eq!(view.get(1, 1), Some(7));
    assert_eq!(view.get(2, 2), Some(0));
}

#[test]
fn test_layers_and_visibility() {
    let camera = Camera::new(0, 0, 4, 4, 0, 0).unwrap();
    let top = solid(2, 2, 2).with_layer(1);
    let bottom = solid(1, 3, 3);
    let hidden = solid(6, 4, 4)
        .with_layer(5)
        .with_interaction(InteractionMode::Invisible);
    let view = camera.render_viewport([&top, &bottom, &hidden]);

    assert_eq!(view.get(0, 0), Some(2));
    assert_eq!(view.get(2, 2), Some(1));
    assert_eq!(view.get(3, 3), Some(0));
}

#[test]
fn test_transparent_pixels_show_background() {
    let camera = Camera::new(0, 0, 2, 1, 8, 0).unwrap();
    let sprite = Sprite::new(&[[-1, 3]]).unwrap();
    let view = camera.render_viewport([&sprite]);
    assert_eq!(view.to_rows(), vec![vec![8, 3]]);
}

#[test]
fn test_display_to_grid() {
    let camera = Camera::new(4, 6, 20, 20, 0, 0).unwrap();
    assert_eq!(camera.display_to_grid(0, 0), None);
    assert_eq!(camera.display_to_grid(2, 2), Some((4, 6)));
    assert_eq!(camera.display_to_grid(61, 61), Some((23, 25)));
    assert_eq!(camera.display_to_grid(62, 10), None);
}

#[test]
fn test_overlay_shares_state_with_game() {
    let hud = Rc::new(RefCell::new(ToggleableDisplay::new(vec![(
        solid(12, 1, 1).with_tag("heart"),
        solid(13, 1, 1).with_tag("heart"),
    )])));
    let mut camera = Camera::new(0, 0, 64, 64, 0, 0).unwrap();
    camera.add_interface(Rc::clone(&hud));

    assert_eq!(camera.render(&[] as &[Sprite]).get(0, 0), Some(12));
    assert!(hud.borrow_mut().disable_first_by_tag("heart"));
    assert_eq!(camera.render(&[] as &[Sprite]).get(0, 0), Some(13));
}

#[test]
fn test_invalid_cameras_rejected() {
    assert!(Camera::new(0, 0, 0, 10, 0, 0).is_err());
    assert!(Camera::new(0, 0, 65, 10, 0, 0).is_err());
    assert!(Camera::new(0, 0, 10, 10, 16, 0).is_err());
    assert!(Camera::new(0, 0, 10, 10, 0, -1).is_err());
}

#[test]
fn test_static_merge_keeps_the_picture() {
    let tile = |x: i32, y: i32, color: i32| {
        Sprite::new(&[[color]])
            .unwrap()
            .with_position(x, y)
            .with_tag(STATIC_TAG)
    };
    let raw = vec![
        tile(0, 0, 1),
        Sprite::new(&[[2]]).unwrap().with_position(1, 0),
        tile(1, 0, 3),
        tile(2, 0, 4),
        tile(2, 0, 6).with_layer(-1),
        Sprite::new(&[[7, 7]]).unwrap().with_position(0, 1).with_layer(-1),
        tile(0, 1, 8).with_layer(-1),
        tile(1, 1, 9).with_blocking(BlockingMode::PixelPerfect),
        tile(1, 1, 10),
    ];
    let camera = Camera::new(0, 0, 4, 2, 0, 0).unwrap();

    let before = camera.render_viewport(&raw);
    let level = Level::new(raw.clone());
    assert!(level.len() < raw.len());
    assert_eq!(camera.render_viewport(level.sprites()), before);
    assert_eq!(before.to_rows(), vec![vec![1, 3, 4, 0], vec![8, 10, 0, 0]]);
}
