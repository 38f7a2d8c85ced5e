//! Everything one game owns: the entity collections and the game-wide flags.

use crate::config::GameConfig;
use crate::constants::EXPLOSION_X_SHIFT;
use crate::entities::{EnemyShip, Explosion, Laser, PlayerShip, PowerUp};

/// Spawn timing, caps, and the game-over sequencing flags.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Tick at which the current spawn interval started.
    pub interval_start_ms: u64,
    pub spawn_interval_ms: u64,
    pub max_enemies: usize,
    pub running: bool,
    pub game_over: bool,
    /// Health hit zero but the terminal explosion is still animating.
    pub final_explosion_pending: bool,
    /// Simulation frames stepped so far.
    pub frame: u64,
}

impl GameState {
    pub fn new(config: &GameConfig, now_ms: u64) -> Self {
        Self {
            interval_start_ms: now_ms,
            spawn_interval_ms: config.enemy.spawn_interval_ms,
            max_enemies: config.enemy.max_enemies,
            running: true,
            game_over: false,
            final_explosion_pending: false,
            frame: 0,
        }
    }

    /// The game-over screen may only appear once this holds.
    pub fn ready_for_game_over_screen(&self) -> bool {
        self.game_over && !self.final_explosion_pending
    }
}

/// The entire state of one game, owned by the screen controller and handed to
/// the frame step by `&mut`.
#[derive(Clone, Debug)]
pub struct World {
    pub config: GameConfig,
    pub player: PlayerShip,
    pub enemies: Vec<EnemyShip>,
    pub lasers: Vec<Laser>,
    pub explosions: Vec<Explosion>,
    pub powerups: Vec<PowerUp>,
    pub state: GameState,
    /// Images in the explosion animation.
    pub explosion_frames: usize,
    /// Number of enemy sprite variants to pick from.
    pub enemy_variants: usize,
}

impl World {
    pub fn new(config: GameConfig, now_ms: u64) -> Self {
        let player = PlayerShip::new(&config.player);
        let state = GameState::new(&config, now_ms);
        Self {
            player,
            enemies: Vec::new(),
            lasers: Vec::new(),
            explosions: Vec::new(),
            powerups: Vec::new(),
            state,
            explosion_frames: crate::assets::EXPLOSION_ANIMATION.len(),
            enemy_variants: crate::assets::ENEMY_SPRITES.len(),
            config,
        }
    }

    /// Explosion in place of a destroyed enemy, nudged left to line up with
    /// the ship's sprite.
    pub fn explode_enemy(&mut self, enemy: &EnemyShip) -> &mut Explosion {
        let explosion = Explosion::new(
            enemy.x - EXPLOSION_X_SHIFT,
            enemy.y,
            self.explosion_frames,
            &self.config.explosion,
        );
        self.explosions.push(explosion);
        let last = self.explosions.len() - 1;
        &mut self.explosions[last]
    }
}
