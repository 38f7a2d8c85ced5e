//! Tunable game parameters, optionally loaded from a TOML file.
//!
//! Every section falls back to the values in [`crate::constants`], so a config
//! file only needs to name what it changes.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::GameError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: f32,
    pub height: f32,
    pub frame_delay_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            frame_delay_ms: FRAME_DELAY_MS,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub health: u8,
    pub velocity: f32,
    pub firing_frames: u32,
    pub firing_interval_ms: u64,
    pub boosted_firing_interval_ms: u64,
    pub powerup_duration_ms: u64,
    pub stun_frames: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            start_x: PLAYER_START_X,
            start_y: PLAYER_START_Y,
            health: PLAYER_HEALTH,
            velocity: PLAYER_VEL,
            firing_frames: FIRING_FRAMES,
            firing_interval_ms: FIRING_INTERVAL_MS,
            boosted_firing_interval_ms: BOOSTED_FIRING_INTERVAL_MS,
            powerup_duration_ms: PLAYER_POWERUP_DURATION_MS,
            stun_frames: STUN_FRAME_DURATION,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    pub spawn_interval_ms: u64,
    pub max_enemies: usize,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            velocity: ENEMY_VEL,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            max_enemies: MAX_ENEMIES,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LaserConfig {
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    pub range: f32,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            width: LASER_WIDTH,
            height: LASER_HEIGHT,
            velocity: LASER_VEL,
            range: LASER_RANGE,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExplosionConfig {
    pub width: f32,
    pub height: f32,
    pub hold_frames: u32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            width: EXPLOSION_WIDTH,
            height: EXPLOSION_HEIGHT,
            hold_frames: EXPLOSION_FRAMES,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PowerUpConfig {
    pub width: f32,
    pub height: f32,
    pub lifetime_frames: i32,
    pub flashing_frames: i32,
    pub drop_roll_max: u32,
    pub drop_roll_divisor: u32,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            width: POWERUP_WIDTH,
            height: POWERUP_HEIGHT,
            lifetime_frames: POWERUP_FRAME_DURATION,
            flashing_frames: POWERUP_FLASHING_FRAMES,
            drop_roll_max: POWERUP_DROP_ROLL_MAX,
            drop_roll_divisor: POWERUP_DROP_ROLL_DIVISOR,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub display: DisplayConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub laser: LaserConfig,
    pub explosion: ExplosionConfig,
    pub powerup: PowerUpConfig,
}

impl GameConfig {
    /// Read, parse, and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&text).map_err(|err| GameError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        positive("display.width", self.display.width)?;
        positive("display.height", self.display.height)?;
        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("player.velocity", self.player.velocity)?;
        positive("enemy.width", self.enemy.width)?;
        positive("enemy.height", self.enemy.height)?;
        positive("enemy.velocity", self.enemy.velocity)?;
        positive("laser.width", self.laser.width)?;
        positive("laser.height", self.laser.height)?;
        positive("laser.velocity", self.laser.velocity)?;
        positive("laser.range", self.laser.range)?;
        positive("explosion.width", self.explosion.width)?;
        positive("explosion.height", self.explosion.height)?;
        positive("powerup.width", self.powerup.width)?;
        positive("powerup.height", self.powerup.height)?;

        if self.player.health == 0 || self.player.health > MAX_HEALTH {
            return Err(GameError::InvalidConfig {
                field: "player.health",
                reason: format!("must be in 1..={MAX_HEALTH}, got {}", self.player.health),
            });
        }
        if self.display.width <= 2.0 * ENEMY_SPAWN_MARGIN {
            return Err(GameError::InvalidConfig {
                field: "display.width",
                reason: format!("must leave room for the {ENEMY_SPAWN_MARGIN}px spawn margins"),
            });
        }
        if self.powerup.lifetime_frames <= 0 {
            return Err(GameError::InvalidConfig {
                field: "powerup.lifetime_frames",
                reason: format!("must be positive, got {}", self.powerup.lifetime_frames),
            });
        }
        if self.powerup.flashing_frames < 0 {
            return Err(GameError::InvalidConfig {
                field: "powerup.flashing_frames",
                reason: format!("must not be negative, got {}", self.powerup.flashing_frames),
            });
        }
        if self.powerup.flashing_frames > self.powerup.lifetime_frames {
            return Err(GameError::InvalidConfig {
                field: "powerup.flashing_frames",
                reason: "must not exceed powerup.lifetime_frames".to_string(),
            });
        }
        if self.powerup.drop_roll_max == 0 || self.powerup.drop_roll_divisor == 0 {
            return Err(GameError::InvalidConfig {
                field: "powerup.drop_roll_divisor",
                reason: "drop roll bounds must be non-zero".to_string(),
            });
        }
        if self.enemy.max_enemies == 0 {
            tracing::warn!("enemy.max_enemies is 0; no enemies will ever spawn");
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), GameError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}
