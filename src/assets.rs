//! Asset paths.  The core never opens these files; they are handed to the
//! presentation layer, which decides what a path looks or sounds like.

// ── Backgrounds & UI ─────────────────────────────────────────────────────────

pub const SPACE_BACKGROUND: &str = "images/backgrounds/space_background_colormod.jpg";
pub const MENU_BACKGROUND: &str = "images/backgrounds/black.png";

/// Indexed by remaining health (0..=3).
pub const HEALTHBAR_IMGS: [&str; 4] = [
    "images/UI/healthbar_empty.png",
    "images/UI/healthbar_onelife.png",
    "images/UI/healthbar_twolives.png",
    "images/UI/healthbar_full.png",
];

// ── Ships & projectiles ──────────────────────────────────────────────────────

pub const PLAYER_SHIP: &str = "images/sprites/playerShip1_green_updatedguns2.png";
pub const PLAYER_SHIP_FIRING: &str =
    "images/sprites/playerShip1_green_updatedguns2_fire_effect.png";

pub const ENEMY_SPRITES: [&str; 5] = [
    "images/sprites/enemyRed1.png",
    "images/sprites/enemyRed2.png",
    "images/sprites/enemyRed3.png",
    "images/sprites/enemyRed4.png",
    "images/sprites/enemyRed5.png",
];

pub const LASER: &str = "images/sprites/laserGreen06.png";

pub const EXPLOSION_ANIMATION: [&str; 11] = [
    "images/sprites/explosion/explosion1.png",
    "images/sprites/explosion/explosion2.png",
    "images/sprites/explosion/explosion3.png",
    "images/sprites/explosion/explosion4.png",
    "images/sprites/explosion/explosion5.png",
    "images/sprites/explosion/explosion6.png",
    "images/sprites/explosion/explosion7.png",
    "images/sprites/explosion/explosion8.png",
    "images/sprites/explosion/explosion9.png",
    "images/sprites/explosion/explosion10.png",
    "images/sprites/explosion/explosion11.png",
];

// ── Powerups ─────────────────────────────────────────────────────────────────

pub const POWERUP_SHIELD: &str = "images/sprites/powerups/shield_green_custom.png";
pub const POWERUP_FIRE_RATE: &str = "images/sprites/powerups/ammo_blue_custom.png";
pub const POWERUP_HEALTH: &str = "images/sprites/powerups/pill_red.png";
pub const POWERUP_ZAP_FIELD: &str = "images/sprites/powerups/bolt_gold.png";

// ── Menus ────────────────────────────────────────────────────────────────────

pub const TITLE_TXT: &str = "images/menus/EARTH-DEFENSE.png";
pub const START_TXT: &str = "images/menus/CLICK-HERE-TO-PLAY.png";
pub const START_TXT_HOVERED: &str = "images/menus/CLICK-HERE-TO-PLAY-HOVERED.png";
pub const CREDITS_TXT: &str = "images/menus/CREDITS.png";
pub const CREDITS_TXT_HOVERED: &str = "images/menus/CREDITS-HOVERED.png";
pub const GAME_OVER_TXT: &str = "images/menus/GAME-OVER.png";
pub const RESTART_TXT: &str = "images/menus/RESTART.png";
pub const RESTART_TXT_HOVERED: &str = "images/menus/RESTART_hovered.png";
pub const MAIN_MENU_TXT: &str = "images/menus/MAIN-MENU.png";
pub const MAIN_MENU_TXT_HOVERED: &str = "images/menus/MAIN-MENU_hovered.png";

// ── Audio ────────────────────────────────────────────────────────────────────

pub const GAME_MUSIC: &str = "music/Eric Skiff - We're all under the stars.mp3";
