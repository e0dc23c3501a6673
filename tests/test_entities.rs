use space_invaders::entities::*;
use space_invaders::tuning::*;

// ── Player::move_toward ───────────────────────────────────────────────────────

#[test]
fn move_left_from_zero_stays_at_zero() {
    let mut p = Player::new(0, 510);
    p.move_toward(Direction::Left, 800);
    assert_eq!(p.x, 0);
}

#[test]
fn move_left_steps_by_speed() {
    let mut p = Player::new(40, 510);
    assert_eq!(p.speed, 8);
    p.move_toward(Direction::Left, 800);
    assert_eq!(p.x, 32);
}

#[test]
fn move_left_clamps_near_boundary() {
    let mut p = Player::new(5, 510);
    p.move_toward(Direction::Left, 800);
    assert_eq!(p.x, 0); // not -3
}

#[test]
fn move_right_steps_by_speed() {
    let mut p = Player::new(40, 510);
    p.move_toward(Direction::Right, 800);
    assert_eq!(p.x, 48);
}

#[test]
fn move_right_clamps_at_boundary() {
    let mut p = Player::new(800 - PLAYER_WIDTH, 510);
    p.move_toward(Direction::Right, 800);
    assert_eq!(p.x, 740);
}

#[test]
fn move_right_clamps_near_boundary() {
    let mut p = Player::new(736, 510);
    p.move_toward(Direction::Right, 800);
    assert_eq!(p.x, 740); // not 744
}

#[test]
fn repeated_moves_never_leave_the_playfield() {
    let mut p = Player::new(370, 510);
    for _ in 0..200 {
        p.move_toward(Direction::Right, 800);
        assert!(p.x >= 0 && p.x <= 800 - p.width);
    }
    for _ in 0..200 {
        p.move_toward(Direction::Left, 800);
        assert!(p.x >= 0 && p.x <= 800 - p.width);
    }
    assert_eq!(p.x, 0);
}

// ── Player::take_damage ───────────────────────────────────────────────────────

#[test]
fn new_player_has_three_lives() {
    let p = Player::new(370, 510);
    assert_eq!(p.lives, 3);
    assert!(p.alive);
}

#[test]
fn take_damage_reports_survival() {
    let mut p = Player::new(370, 510);
    assert!(p.take_damage());
    assert_eq!(p.lives, 2);
    assert!(p.take_damage());
    assert_eq!(p.lives, 1);
    assert!(!p.take_damage());
    assert_eq!(p.lives, 0);
    assert!(!p.alive);
}

#[test]
fn take_damage_saturates_at_zero() {
    let mut p = Player::new(370, 510);
    p.lives = 0;
    p.alive = false;
    assert!(!p.take_damage());
    assert_eq!(p.lives, 0);
}

// ── Player::shoot ─────────────────────────────────────────────────────────────

#[test]
fn player_shot_is_centred_above_the_ship() {
    let p = Player::new(370, 510);
    let spec = p.shoot();
    assert_eq!(spec.x, 370 + 30 - 3);
    assert_eq!(spec.y, 510 - 15);
    assert_eq!((spec.width, spec.height), (6, 15));
    assert_eq!(spec.speed, PLAYER_BULLET_SPEED);
}

// ── Enemy::shoot ──────────────────────────────────────────────────────────────

#[test]
fn enemy_shot_is_centred_below_the_enemy() {
    let mut e = Enemy::new(80, 80);
    let spec = e.shoot(5_000).unwrap();
    assert_eq!(spec.x, 80 + 20 - 3);
    assert_eq!(spec.y, 80 + 25);
    assert_eq!(spec.speed, ENEMY_BULLET_SPEED);
}

#[test]
fn enemy_shot_respects_own_cooldown() {
    let t = 5_000;
    let mut e = Enemy::new(80, 80);
    assert_eq!(e.shot_cooldown_ms, 2000);
    assert!(e.shoot(t).is_some());
    assert!(e.shoot(t + 1000).is_none());
    assert!(e.shoot(t + 2100).is_some());
}

#[test]
fn enemy_cooldown_boundary_is_exclusive() {
    let mut e = Enemy::new(80, 80);
    assert!(e.shoot(1_000).is_some());
    assert!(e.shoot(3_000).is_none()); // exactly 2000 later
    assert!(e.shoot(3_001).is_some());
}

#[test]
fn enemy_shoot_records_last_shot_only_on_success() {
    let mut e = Enemy::new(80, 80);
    assert_eq!(e.last_shot_ms, None);
    e.shoot(1_000);
    assert_eq!(e.last_shot_ms, Some(1_000));
    e.shoot(1_500);
    assert_eq!(e.last_shot_ms, Some(1_000));
}

// ── Bullet ────────────────────────────────────────────────────────────────────

fn bullet(y: i32, owner: BulletOwner) -> Bullet {
    Bullet { x: 100, y, width: 6, height: 15, speed: 10, owner }
}

#[test]
fn player_bullet_moves_up() {
    let mut b = bullet(300, BulletOwner::Player);
    b.update();
    assert_eq!(b.y, 290);
}

#[test]
fn enemy_bullet_moves_down() {
    let mut b = bullet(300, BulletOwner::Enemy);
    b.update();
    assert_eq!(b.y, 310);
}

#[test]
fn player_bullet_out_once_fully_above_top() {
    assert!(!bullet(0, BulletOwner::Player).is_out_of_bounds(600));
    assert!(!bullet(-15, BulletOwner::Player).is_out_of_bounds(600)); // bottom edge at 0
    assert!(bullet(-16, BulletOwner::Player).is_out_of_bounds(600));
}

#[test]
fn enemy_bullet_out_once_past_bottom() {
    assert!(!bullet(590, BulletOwner::Enemy).is_out_of_bounds(600));
    assert!(!bullet(600, BulletOwner::Enemy).is_out_of_bounds(600));
    assert!(bullet(601, BulletOwner::Enemy).is_out_of_bounds(600));
}

#[test]
fn bullet_from_spec_keeps_geometry() {
    let spec = BulletSpec { x: 10, y: 20, width: 6, height: 15, speed: 5 };
    let b = Bullet::from_spec(spec, BulletOwner::Enemy);
    assert_eq!(b.rect(), Rect::new(10, 20, 6, 15));
    assert_eq!(b.speed, 5);
    assert_eq!(b.owner, BulletOwner::Enemy);
}
