// Gameplay tuning. All distances are logical playfield pixels, all times are
// milliseconds on the injected clock.

// ── Playfield ────────────────────────────────────────────────────────────────

pub const PLAYFIELD_WIDTH: i32 = 800;
pub const PLAYFIELD_HEIGHT: i32 = 600;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_SPAWN_X: i32 = 370;
pub const PLAYER_SPAWN_Y: i32 = 510;
pub const PLAYER_WIDTH: i32 = 60;
pub const PLAYER_HEIGHT: i32 = 25;
pub const PLAYER_SPEED: i32 = 8;
pub const PLAYER_LIVES: u32 = 3;
pub const PLAYER_SHOT_COOLDOWN_MS: u64 = 300;

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_ROWS: usize = 3;
pub const ENEMY_COLS: usize = 8;
pub const ENEMY_GRID_ORIGIN_X: i32 = 80;
pub const ENEMY_GRID_ORIGIN_Y: i32 = 80;
pub const ENEMY_SPACING_X: i32 = 80;
pub const ENEMY_SPACING_Y: i32 = 60;
pub const ENEMY_WIDTH: i32 = 40;
pub const ENEMY_HEIGHT: i32 = 25;
pub const ENEMY_SHOT_COOLDOWN_MS: u64 = 2000;
/// Scene-wide gap between any two enemy shots.
pub const ENEMY_GLOBAL_SHOT_COOLDOWN_MS: u64 = 300;

// ── Bullets ──────────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: i32 = 6;
pub const BULLET_HEIGHT: i32 = 15;
pub const PLAYER_BULLET_SPEED: i32 = 10;
pub const ENEMY_BULLET_SPEED: i32 = 5;

// ── Scoring & round flow ─────────────────────────────────────────────────────

pub const SCORE_PER_KILL: u32 = 100;
/// Pause between the end of a round and the switch to the GameOver scene.
pub const ROUND_END_DELAY_MS: u64 = 1000;
/// Rows shown on the leaderboard screen.
pub const LEADERBOARD_DISPLAY_ROWS: usize = 10;
