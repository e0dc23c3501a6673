//! Game entity types and their per-entity behaviour.
//!
//! Entities never touch the scene's collections: shooting returns a
//! [`BulletSpec`] and the Playing scene decides what to do with it.

use crate::tuning::{
    BULLET_HEIGHT, BULLET_WIDTH, ENEMY_BULLET_SPEED, ENEMY_HEIGHT, ENEMY_SHOT_COOLDOWN_MS,
    ENEMY_WIDTH, PLAYER_BULLET_SPEED, PLAYER_HEIGHT, PLAYER_LIVES, PLAYER_SPEED, PLAYER_WIDTH,
};

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    /// Travels upward.
    Player,
    /// Travels downward.
    Enemy,
}

/// Position and size of a bullet about to be fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulletSpec {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn from_spec(spec: BulletSpec, owner: BulletOwner) -> Self {
        Self {
            x: spec.x,
            y: spec.y,
            width: spec.width,
            height: spec.height,
            speed: spec.speed,
            owner,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Advance one step along the owner's direction of travel.
    pub fn update(&mut self) {
        match self.owner {
            BulletOwner::Player => self.y -= self.speed,
            BulletOwner::Enemy => self.y += self.speed,
        }
    }

    /// True once the bullet has fully left the playfield on its side of travel.
    pub fn is_out_of_bounds(&self, playfield_height: i32) -> bool {
        match self.owner {
            BulletOwner::Player => self.y + self.height < 0,
            BulletOwner::Enemy => self.y > playfield_height,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    pub lives: u32,
    pub alive: bool,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            lives: PLAYER_LIVES,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Shift by one step, clamped to `0..=boundary_width - width`.
    pub fn move_toward(&mut self, direction: Direction, boundary_width: i32) {
        let max_x = (boundary_width - self.width).max(0);
        self.x = match direction {
            Direction::Left => (self.x - self.speed).max(0),
            Direction::Right => (self.x + self.speed).min(max_x),
        };
    }

    /// Lose one life. Returns whether the player is still alive afterwards.
    pub fn take_damage(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.alive = false;
        }
        self.alive
    }

    /// Bullet centred on the ship's nose, just above it.
    pub fn shoot(&self) -> BulletSpec {
        BulletSpec {
            x: self.x + self.width / 2 - BULLET_WIDTH / 2,
            y: self.y - BULLET_HEIGHT,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            speed: PLAYER_BULLET_SPEED,
        }
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Never flips back to `true` once cleared.
    pub alive: bool,
    /// Clock time of this enemy's previous shot; `None` until it first fires.
    pub last_shot_ms: Option<u64>,
    pub shot_cooldown_ms: u64,
}

impl Enemy {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            alive: true,
            last_shot_ms: None,
            shot_cooldown_ms: ENEMY_SHOT_COOLDOWN_MS,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Try to fire at `now_ms`.
    ///
    /// Returns `None` while the enemy is still within its own cooldown
    /// (`now - last_shot <= cooldown`). A successful shot records `now_ms` as
    /// the new last-shot time, so this call mutates the enemy.
    pub fn shoot(&mut self, now_ms: u64) -> Option<BulletSpec> {
        if let Some(last) = self.last_shot_ms {
            if now_ms.saturating_sub(last) <= self.shot_cooldown_ms {
                return None;
            }
        }
        self.last_shot_ms = Some(now_ms);
        Some(BulletSpec {
            x: self.x + self.width / 2 - BULLET_WIDTH / 2,
            y: self.y + self.height,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            speed: ENEMY_BULLET_SPEED,
        })
    }
}
