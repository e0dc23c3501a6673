use tracing::debug;

use crate::entities::{Bullet, BulletOwner, Enemy};
use crate::ports::RandomSource;
use crate::tuning::ENEMY_GLOBAL_SHOT_COOLDOWN_MS;

/// Picks at most one enemy to fire per tick.
///
/// Two independent gates must both pass: the scene-wide cooldown held here and
/// the chosen enemy's own cooldown inside [`Enemy::shoot`]. The scene-wide
/// timer only advances when a bullet is actually produced.
#[derive(Clone, Debug)]
pub struct EnemyShotScheduler {
    global_cooldown_ms: u64,
    last_shot_ms: Option<u64>,
}

impl Default for EnemyShotScheduler {
    fn default() -> Self {
        Self::new(ENEMY_GLOBAL_SHOT_COOLDOWN_MS)
    }
}

impl EnemyShotScheduler {
    pub fn new(global_cooldown_ms: u64) -> Self {
        Self { global_cooldown_ms, last_shot_ms: None }
    }

    pub fn last_shot_ms(&self) -> Option<u64> {
        self.last_shot_ms
    }

    pub fn run(
        &mut self,
        now_ms: u64,
        enemies: &mut [Enemy],
        rng: &mut dyn RandomSource,
    ) -> Option<Bullet> {
        if let Some(last) = self.last_shot_ms {
            if now_ms.saturating_sub(last) < self.global_cooldown_ms {
                return None;
            }
        }

        let alive: Vec<usize> = enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive)
            .map(|(i, _)| i)
            .collect();
        if alive.is_empty() {
            return None;
        }

        let pick = alive[rng.next_index(alive.len()) % alive.len()];
        let spec = enemies[pick].shoot(now_ms)?;

        self.last_shot_ms = Some(now_ms);
        debug!(enemy = pick, x = spec.x, y = spec.y, "enemy fired");
        Some(Bullet::from_spec(spec, BulletOwner::Enemy))
    }
}
