mod common;

use block_shooter::entities::*;

use common::{enemy, make_state, projectile};

fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect { x, y, width, height }
}

#[test]
fn entity_clone_and_eq() {
    assert_eq!(GameStatus::Running, GameStatus::Running);
    assert_ne!(GameStatus::Running, GameStatus::GameOver);
    assert_ne!(Key::MoveLeft, Key::MoveRight);
    assert_eq!(enemy(1.0, 2.0).clone(), enemy(1.0, 2.0));
}

#[test]
fn bounds_mirror_fields() {
    assert_eq!(projectile(3.0, 4.0).bounds(), rect(3.0, 4.0, 10.0, 20.0));
    assert_eq!(enemy(5.0, 6.0).bounds(), rect(5.0, 6.0, 40.0, 40.0));
    assert_eq!(make_state().player.bounds(), rect(375.0, 550.0, 50.0, 50.0));
}

#[test]
fn overlap_is_symmetric() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(5.0, 5.0, 10.0, 10.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn containment_overlaps() {
    let outer = rect(0.0, 0.0, 100.0, 100.0);
    let inner = rect(40.0, 40.0, 5.0, 5.0);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn shared_edges_do_not_overlap() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));
    assert!(!a.overlaps(&rect(0.0, 10.0, 10.0, 10.0)));
    assert!(!a.overlaps(&rect(-10.0, 0.0, 10.0, 10.0)));
    assert!(!a.overlaps(&rect(0.0, -10.0, 10.0, 10.0)));
}

#[test]
fn separated_on_one_axis_does_not_overlap() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&rect(5.0, 50.0, 10.0, 10.0)));
    assert!(!a.overlaps(&rect(50.0, 5.0, 10.0, 10.0)));
}

#[test]
fn is_over_tracks_status() {
    let mut s = make_state();
    assert!(!s.is_over());
    s.status = GameStatus::GameOver;
    assert!(s.is_over());
}

#[test]
fn game_state_clone_is_independent() {
    let original = make_state();
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.enemies.push(enemy(5.0, 5.0));

    assert_eq!(original.player.x, 375.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
