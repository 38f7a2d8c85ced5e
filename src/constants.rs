//! Default tuning values.  `GameConfig::default()` is built from these, and the
//! tests use them directly when they need to reason about exact numbers.

// ── Display ──────────────────────────────────────────────────────────────────

pub const DISPLAY_WIDTH: f32 = 900.0;
pub const DISPLAY_HEIGHT: f32 = 600.0;

/// 1000 / 90 ≈ 11 ms per frame (90 FPS).
pub const FRAME_DELAY_MS: u64 = 11;

// ── Player ship ──────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 50.0;
pub const PLAYER_START_X: f32 = 425.0;
pub const PLAYER_START_Y: f32 = 400.0;
pub const PLAYER_HEALTH: u8 = 3;
pub const MAX_HEALTH: u8 = 3;
pub const PLAYER_VEL: f32 = 3.0;

/// Frames the firing-effect sprite stays up after a shot.
pub const FIRING_FRAMES: u32 = 9;
pub const FIRING_INTERVAL_MS: u64 = 300;
pub const BOOSTED_FIRING_INTERVAL_MS: u64 = 150;

/// Horizontal gun offsets, measured from the ship's left edge.
pub const LEFT_GUN_OFFSET: f32 = 4.8;
pub const RIGHT_GUN_INSET: f32 = 6.0;
pub const GUN_Y_OFFSET: f32 = 15.0;

pub const STUN_BLIT_RATE: u32 = 30;
pub const STUN_FRAME_DURATION: u32 = 240;
pub const PLAYER_POWERUP_DURATION_MS: u64 = 10_000;

// ── Enemy ships ──────────────────────────────────────────────────────────────

pub const ENEMY_WIDTH: f32 = 50.0;
pub const ENEMY_HEIGHT: f32 = 50.0;
pub const ENEMY_VEL: f32 = 1.0;
pub const ENEMY_SPAWN_Y: f32 = -50.0;
/// Enemies spawn with `x` in `[ENEMY_SPAWN_MARGIN, width - ENEMY_SPAWN_MARGIN]`.
pub const ENEMY_SPAWN_MARGIN: f32 = 50.0;
pub const SPAWN_INTERVAL_MS: u64 = 1_200;
pub const MAX_ENEMIES: usize = 6;

// ── Lasers ───────────────────────────────────────────────────────────────────

pub const LASER_RANGE: f32 = 250.0;
pub const LASER_WIDTH: f32 = 3.0;
pub const LASER_HEIGHT: f32 = 15.0;
pub const LASER_VEL: f32 = 5.0;

// ── Explosions ───────────────────────────────────────────────────────────────

pub const EXPLOSION_WIDTH: f32 = 75.0;
pub const EXPLOSION_HEIGHT: f32 = 75.0;
/// Frames each animation image is held before advancing.
pub const EXPLOSION_FRAMES: u32 = 3;
/// Explosions are drawn slightly left of the ship they replace.
pub const EXPLOSION_X_SHIFT: f32 = 2.2;

// ── Powerups ─────────────────────────────────────────────────────────────────

pub const POWERUP_WIDTH: f32 = 25.0;
pub const POWERUP_HEIGHT: f32 = 25.0;
pub const POWERUP_FRAME_DURATION: i32 = 800;
pub const POWERUP_FLASHING_FRAMES: i32 = 300;
pub const POWERUP_FLASH_RATE: i32 = 45;
/// A kill drops a powerup when `randint(1..=DROP_ROLL_MAX) % DROP_ROLL_DIVISOR == 0`.
pub const POWERUP_DROP_ROLL_MAX: u32 = 10;
pub const POWERUP_DROP_ROLL_DIVISOR: u32 = 5;

// ── Healthbar ────────────────────────────────────────────────────────────────

pub const HEALTHBAR_WIDTH: f32 = 175.0;
pub const HEALTHBAR_HEIGHT: f32 = 75.0;
pub const HEALTHBAR_BOTTOM_OFFSET: f32 = 60.0;

// ── Menu layout ──────────────────────────────────────────────────────────────

pub const TITLE_TXT_WIDTH: f32 = 600.0;
pub const TITLE_TXT_HEIGHT: f32 = 75.0;
pub const START_TXT_WIDTH: f32 = 325.0;
pub const START_TXT_HEIGHT: f32 = 45.0;
pub const CREDITS_TXT_WIDTH: f32 = 135.0;
pub const CREDITS_TXT_HEIGHT: f32 = 35.0;
pub const GAME_OVER_TXT_WIDTH: f32 = 500.0;
pub const GAME_OVER_TXT_HEIGHT: f32 = 75.0;
pub const RESTART_TXT_WIDTH: f32 = 150.0;
pub const RESTART_TXT_HEIGHT: f32 = 45.0;
pub const MAIN_MENU_TXT_WIDTH: f32 = 175.0;
pub const MAIN_MENU_TXT_HEIGHT: f32 = 45.0;

pub const CAPTION: &str = "Earth Defense";
