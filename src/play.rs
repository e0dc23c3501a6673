//! The Playing scene: owns the live entity set and runs one simulation tick
//! per frame.
//!
//! Tick order is fixed: advance bullets, player bullets against enemies,
//! enemy bullets against the player, end-of-round checks, then enemy fire.
//! A round ends at most once; the handoff to GameOver is queued as a
//! [`ScheduledTransition`] that the frame driver collects when it falls due.

use tracing::{debug, info};

use crate::collision::collide;
use crate::entities::{Bullet, BulletOwner, Direction, Enemy, Player};
use crate::input::{Action, InputSnapshot};
use crate::ports::RandomSource;
use crate::scene::Payload;
use crate::scheduler::EnemyShotScheduler;
use crate::tuning::{
    ENEMY_COLS, ENEMY_GRID_ORIGIN_X, ENEMY_GRID_ORIGIN_Y, ENEMY_ROWS, ENEMY_SPACING_X,
    ENEMY_SPACING_Y, PLAYER_SHOT_COOLDOWN_MS, PLAYER_SPAWN_X, PLAYER_SPAWN_Y, PLAYFIELD_HEIGHT,
    PLAYFIELD_WIDTH, ROUND_END_DELAY_MS, SCORE_PER_KILL,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Active,
    Ended { won: bool },
}

/// A scene change requested for a later frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTransition {
    pub due_ms: u64,
    pub payload: Payload,
}

/// Build the standard enemy formation, row by row.
pub fn spawn_enemy_grid(rows: usize, cols: usize) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            enemies.push(Enemy::new(
                ENEMY_GRID_ORIGIN_X + col as i32 * ENEMY_SPACING_X,
                ENEMY_GRID_ORIGIN_Y + row as i32 * ENEMY_SPACING_Y,
            ));
        }
    }
    enemies
}

#[derive(Clone, Debug)]
pub struct PlayState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub score: u32,
    status: RoundStatus,
    last_player_shot_ms: Option<u64>,
    scheduler: EnemyShotScheduler,
    pending: Option<ScheduledTransition>,
}

impl Default for PlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayState {
    /// Fresh round: player at the spawn point and a full enemy grid.
    pub fn new() -> Self {
        Self::with_enemies(spawn_enemy_grid(ENEMY_ROWS, ENEMY_COLS))
    }

    pub fn with_enemies(enemies: Vec<Enemy>) -> Self {
        Self {
            player: Player::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            enemies,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            score: 0,
            status: RoundStatus::Active,
            last_player_shot_ms: None,
            scheduler: EnemyShotScheduler::default(),
            pending: None,
        }
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.status, RoundStatus::Ended { .. })
    }

    pub fn won(&self) -> bool {
        matches!(self.status, RoundStatus::Ended { won: true })
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn pending_transition(&self) -> Option<&ScheduledTransition> {
        self.pending.as_ref()
    }

    // ── Input ────────────────────────────────────────────────────────────────

    /// Apply this frame's held actions. Ignored once the round has ended.
    pub fn handle_input(&mut self, input: &InputSnapshot, now_ms: u64) {
        if self.is_ended() {
            return;
        }
        if input.is_active(Action::MoveLeft) {
            self.player.move_toward(Direction::Left, PLAYFIELD_WIDTH);
        }
        if input.is_active(Action::MoveRight) {
            self.player.move_toward(Direction::Right, PLAYFIELD_WIDTH);
        }
        if input.is_active(Action::Fire) {
            self.player_shoot(now_ms);
        }
    }

    /// Fire a player bullet unless the previous one left less than
    /// `PLAYER_SHOT_COOLDOWN_MS` ago. Returns whether a bullet was added.
    pub fn player_shoot(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_player_shot_ms {
            if now_ms.saturating_sub(last) < PLAYER_SHOT_COOLDOWN_MS {
                return false;
            }
        }
        let spec = self.player.shoot();
        self.bullets.push(Bullet::from_spec(spec, BulletOwner::Player));
        self.last_player_shot_ms = Some(now_ms);
        true
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    pub fn update(&mut self, now_ms: u64, rng: &mut dyn RandomSource) {
        if self.is_ended() {
            return;
        }

        self.advance_bullets();
        self.resolve_collisions(now_ms);
        self.check_round_status(now_ms);

        if self.is_ended() {
            return;
        }
        if let Some(bullet) = self.scheduler.run(now_ms, &mut self.enemies, rng) {
            self.enemy_bullets.push(bullet);
        }
    }

    fn advance_bullets(&mut self) {
        for bullets in [&mut self.bullets, &mut self.enemy_bullets] {
            bullets.retain_mut(|bullet| {
                bullet.update();
                !bullet.is_out_of_bounds(PLAYFIELD_HEIGHT)
            });
        }
    }

    /// Player bullets against enemies, then enemy bullets against the player.
    ///
    /// Each player bullet kills at most one enemy: the first live one it
    /// overlaps in grid order. Every enemy bullet touching the player costs
    /// one life.
    pub fn resolve_collisions(&mut self, now_ms: u64) {
        let enemies = &mut self.enemies;
        let mut kills = 0u32;
        self.bullets.retain(|bullet| {
            let rect = bullet.rect();
            match enemies.iter_mut().find(|e| e.alive && collide(&rect, &e.rect())) {
                Some(enemy) => {
                    enemy.kill();
                    kills += 1;
                    debug!(x = enemy.x, y = enemy.y, "enemy destroyed");
                    false
                }
                None => true,
            }
        });
        self.score += kills * SCORE_PER_KILL;

        let player_rect = self.player.rect();
        let before = self.enemy_bullets.len();
        self.enemy_bullets
            .retain(|bullet| !collide(&bullet.rect(), &player_rect));
        let hits = before - self.enemy_bullets.len();

        for _ in 0..hits {
            let still_alive = self.player.take_damage();
            debug!(lives = self.player.lives, "player hit");
            if !still_alive {
                self.end_round(false, now_ms);
            }
        }
    }

    /// Ends the round as won once every enemy is down.
    pub fn check_round_status(&mut self, now_ms: u64) {
        if self.alive_enemies() == 0 {
            self.end_round(true, now_ms);
        }
    }

    /// First call wins; later calls in the same or following ticks are no-ops.
    fn end_round(&mut self, won: bool, now_ms: u64) {
        if self.is_ended() {
            return;
        }
        self.status = RoundStatus::Ended { won };
        self.pending = Some(ScheduledTransition {
            due_ms: now_ms + ROUND_END_DELAY_MS,
            payload: Payload::result(self.score, won),
        });
        info!(won, score = self.score, "round ended");
    }

    /// Hand over the queued GameOver payload once its delay has passed.
    /// Yields it exactly once.
    pub fn take_due_transition(&mut self, now_ms: u64) -> Option<Payload> {
        match &self.pending {
            Some(t) if now_ms >= t.due_ms => self.pending.take().map(|t| t.payload),
            _ => None,
        }
    }

    /// Payload contributed when the scene is left: the result, if the round
    /// finished.
    pub fn exit_payload(&self) -> Option<Payload> {
        match self.status {
            RoundStatus::Ended { won } => Some(Payload::result(self.score, won)),
            RoundStatus::Active => None,
        }
    }
}
