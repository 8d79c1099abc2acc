use dino_runner::config::Config;
use dino_runner::entities::*;

fn config() -> Config {
    Config::default()
}

fn grounded_player() -> Player {
    Player::new(&config())
}

// ── Player: construction & gravity ────────────────────────────────────────────

#[test]
fn new_player_stands_on_ground_with_full_health() {
    let p = grounded_player();
    assert_eq!(p.ground_y, 170); // 200 - 30
    assert_eq!(p.rect.bottom(), 170);
    assert_eq!(p.rect.height, 60);
    assert_eq!(p.rect.width, 40);
    assert_eq!(p.velocity_y, 0);
    assert_eq!(p.health, 100);
    assert!(!p.is_crouching);
    assert!(p.is_grounded());
}

#[test]
fn resting_player_stays_put() {
    let mut p = grounded_player();
    for _ in 0..10 {
        p.advance();
        assert_eq!(p.rect.bottom(), 170);
        assert_eq!(p.velocity_y, 0);
    }
}

#[test]
fn jump_arc_never_sinks_below_ground() {
    let mut p = grounded_player();
    p.jump();
    assert_eq!(p.velocity_y, -18);

    let mut airborne_frames = 0;
    for _ in 0..100 {
        p.advance();
        assert!(p.rect.bottom() <= p.ground_y);
        if p.is_grounded() {
            assert_eq!(p.velocity_y, 0);
        } else {
            airborne_frames += 1;
        }
    }
    assert!(airborne_frames > 0);
    assert!(p.is_grounded());
}

#[test]
fn jump_applies_on_the_same_frame() {
    let mut p = grounded_player();
    p.jump();
    p.advance();
    // -18 + gravity 1 = -17
    assert_eq!(p.velocity_y, -17);
    assert_eq!(p.rect.bottom(), 170 - 17);
}

#[test]
fn jump_apex_height() {
    let mut p = grounded_player();
    p.jump();
    let mut highest = p.rect.bottom();
    for _ in 0..40 {
        p.advance();
        highest = highest.min(p.rect.bottom());
    }
    // 17 + 16 + ... + 1 = 153
    assert_eq!(highest, 170 - 153);
}

// ── Player: jump guard ────────────────────────────────────────────────────────

#[test]
fn jump_is_ignored_while_airborne() {
    let mut p = grounded_player();
    p.jump();
    p.advance();
    let v = p.velocity_y;
    p.jump();
    assert_eq!(p.velocity_y, v);
}

#[test]
fn jump_is_ignored_when_above_ground_at_rest() {
    let mut p = grounded_player();
    p.rect.set_bottom(150);
    p.jump();
    assert_eq!(p.velocity_y, 0);
}

// ── Player: crouch / stand ────────────────────────────────────────────────────

#[test]
fn crouch_halves_height_and_pins_feet() {
    let mut p = grounded_player();
    p.crouch();
    assert!(p.is_crouching);
    assert_eq!(p.rect.height, 30);
    assert_eq!(p.rect.bottom(), 170);
    assert_eq!(p.sprite(), SpriteKind::PlayerCrouching);
}

#[test]
fn crouch_then_stand_restores_rect_exactly() {
    let mut p = grounded_player();
    let before = p.rect;
    p.crouch();
    p.stand_up();
    assert_eq!(p.rect, before);
    assert!(!p.is_crouching);
    assert_eq!(p.sprite(), SpriteKind::PlayerStanding);
}

#[test]
fn crouch_twice_is_a_no_op() {
    let mut p = grounded_player();
    p.crouch();
    let rect = p.rect;
    p.crouch();
    assert_eq!(p.rect, rect);
}

#[test]
fn crouch_is_ignored_while_airborne() {
    let mut p = grounded_player();
    p.jump();
    p.advance();
    let rect = p.rect;
    p.crouch();
    assert!(!p.is_crouching);
    assert_eq!(p.rect, rect);
}

#[test]
fn stand_up_without_crouch_is_a_no_op() {
    let mut p = grounded_player();
    let rect = p.rect;
    p.stand_up();
    assert_eq!(p.rect, rect);
}

#[test]
fn crouching_player_can_still_jump() {
    // Jumping while crouched is allowed (feet are on the ground).
    let mut p = grounded_player();
    p.crouch();
    p.jump();
    assert_eq!(p.velocity_y, -18);
}

#[test]
fn standing_up_mid_air_keeps_the_arc_and_lands() {
    let mut p = grounded_player();
    p.crouch();
    p.jump();
    for _ in 0..5 {
        p.advance();
    }
    // -18 + 5 = -13; 170 - (17 + 16 + 15 + 14 + 13) = 95
    assert_eq!(p.velocity_y, -13);
    assert_eq!(p.rect.bottom(), 95);

    // Full height comes back with the feet pinned to the ground line.
    p.stand_up();
    assert!(!p.is_crouching);
    assert_eq!(p.rect.height, 60);
    assert_eq!(p.rect.bottom(), 170);
    assert_eq!(p.velocity_y, -13);
    assert_eq!(p.sprite(), SpriteKind::PlayerStanding);

    p.advance();
    assert_eq!(p.velocity_y, -12);
    assert_eq!(p.rect.bottom(), 158);

    for _ in 0..100 {
        p.advance();
        assert!(p.rect.bottom() <= p.ground_y);
        if p.is_grounded() {
            assert_eq!(p.velocity_y, 0);
        }
    }
    assert!(p.is_grounded());
}

// ── Player: damage ────────────────────────────────────────────────────────────

#[test]
fn damage_can_overshoot_zero() {
    let mut p = grounded_player();
    p.take_damage(90);
    assert!(!p.is_defeated());
    p.take_damage(20);
    assert_eq!(p.health, -10);
    assert!(p.is_defeated());
}

#[test]
fn exactly_zero_health_is_defeat() {
    let mut p = grounded_player();
    p.take_damage(100);
    assert_eq!(p.health, 0);
    assert!(p.is_defeated());
}

// ── Ground obstacle ───────────────────────────────────────────────────────────

#[test]
fn obstacle_enters_at_right_edge_on_ground() {
    let o = GroundObstacle::new(&config());
    assert_eq!(o.rect.left(), 800);
    assert_eq!(o.rect.bottom(), 170);
    assert_eq!((o.rect.width, o.rect.height), (20, 40));
    assert_eq!(o.velocity_x, -10);
    assert!(o.is_alive());
}

#[test]
fn obstacle_dies_exactly_when_right_edge_goes_negative() {
    let mut o = GroundObstacle::new(&config());
    // right edge starts at 820 and loses 10 per frame
    for _ in 0..82 {
        o.advance();
        assert!(o.is_alive(), "died early with right edge {}", o.rect.right());
    }
    assert_eq!(o.rect.right(), 0);
    o.advance();
    assert_eq!(o.rect.right(), -10);
    assert!(!o.is_alive());
}

#[test]
fn obstacle_never_moves_vertically() {
    let mut o = GroundObstacle::new(&config());
    for _ in 0..50 {
        o.advance();
        assert_eq!(o.rect.bottom(), 170);
    }
}

// ── Pursuer ───────────────────────────────────────────────────────────────────

#[test]
fn pursuer_spawns_above_ground_with_heading() {
    let up = Pursuer::new(&config(), Heading::Up);
    assert_eq!(up.rect.left(), 800);
    assert_eq!(up.rect.bottom(), 120); // ground 170 - 50
    assert_eq!(up.rect.top(), 20);
    assert_eq!(up.velocity_y, -5);
    assert_eq!(up.health, 200);

    let down = Pursuer::new(&config(), Heading::Down);
    assert_eq!(down.velocity_y, 5);
}

#[test]
fn pursuer_flips_exactly_at_the_top() {
    let mut p = Pursuer::new(&config(), Heading::Up);
    // top: 20 → 15 → 10 → 5 → 0
    for _ in 0..3 {
        p.advance();
        assert_eq!(p.velocity_y, -5);
    }
    p.advance();
    assert_eq!(p.rect.top(), 0);
    assert_eq!(p.velocity_y, 5);
    p.advance();
    assert_eq!(p.rect.top(), 5);
    assert_eq!(p.velocity_y, 5);
}

#[test]
fn pursuer_flips_exactly_at_the_bottom() {
    let mut p = Pursuer::new(&config(), Heading::Down);
    // bottom: 120 → 200 takes 16 frames
    for frame in 1..=16 {
        p.advance();
        if frame < 16 {
            assert_eq!(p.velocity_y, 5, "flipped early on frame {}", frame);
        }
    }
    assert_eq!(p.rect.bottom(), 200);
    assert_eq!(p.velocity_y, -5);
}

#[test]
fn pursuer_bounce_keeps_it_inside_the_field() {
    let mut p = Pursuer::new(&config(), Heading::Down);
    for _ in 0..500 {
        p.advance();
        assert!(p.rect.top() >= 0);
        assert!(p.rect.bottom() <= 200);
    }
}

#[test]
fn pursuer_moves_left_and_is_not_culled_by_default() {
    let mut p = Pursuer::new(&config(), Heading::Up);
    for _ in 0..400 {
        p.advance();
    }
    assert_eq!(p.rect.left(), 800 - 5 * 400);
    assert!(p.is_alive());
    assert_eq!(p.health, 200);
}

#[test]
fn pursuer_is_culled_off_screen_when_enabled() {
    let cfg = Config { cull_offscreen_pursuers: true, ..Config::default() };
    let mut p = Pursuer::new(&cfg, Heading::Up);
    // right edge 880 → -5 after 177 frames
    for _ in 0..176 {
        p.advance();
        assert!(p.is_alive());
    }
    assert_eq!(p.rect.right(), 0);
    p.advance();
    assert!(!p.is_alive());
}

// ── Hazard tagging ────────────────────────────────────────────────────────────

#[test]
fn hazards_carry_kind_and_damage() {
    let o = Hazard::Obstacle(GroundObstacle::new(&config()));
    let p = Hazard::Pursuer(Pursuer::new(&config(), Heading::Up));
    assert_eq!(o.kind(), HazardKind::Obstacle);
    assert_eq!(o.damage(), 10);
    assert_eq!(o.sprite(), SpriteKind::Obstacle);
    assert_eq!(p.kind(), HazardKind::Pursuer);
    assert_eq!(p.damage(), 20);
    assert_eq!(p.sprite(), SpriteKind::Pursuer);
}

#[test]
fn hazard_advance_delegates() {
    let mut h = Hazard::Obstacle(GroundObstacle::new(&config()));
    h.advance();
    assert_eq!(h.rect().left(), 790);
}
