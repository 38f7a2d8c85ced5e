//! Game entity types: plain data plus the small per-entity updates the frame
//! step drives.  Every position change goes through a method that refreshes the
//! hitbox, so no caller ever reads a stale one.

use crate::collision::{Collidable, Collider, Rect};
use crate::config::{EnemyConfig, ExplosionConfig, LaserConfig, PlayerConfig, PowerUpConfig};
use crate::constants::{GUN_Y_OFFSET, LEFT_GUN_OFFSET, MAX_HEALTH, RIGHT_GUN_INSET};

// ── Powerup kinds ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Enemy rams no longer stun the ship while active.
    Shield,
    /// Switches to the boosted firing interval while active.
    FireRate,
    /// Restores one point of Earth's health, capped at the maximum.
    Health,
    /// Destroys every live enemy on pickup.
    ZapField,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::FireRate,
        PowerUpKind::Health,
        PowerUpKind::ZapField,
    ];

    /// Position in [`PowerUpKind::ALL`]; sprite tables are indexed by it.
    pub fn index(self) -> usize {
        match self {
            PowerUpKind::Shield => 0,
            PowerUpKind::FireRate => 1,
            PowerUpKind::Health => 2,
            PowerUpKind::ZapField => 3,
        }
    }

    /// Shield and fire-rate last for a while; the rest apply once.
    pub fn is_timed(self) -> bool {
        matches!(self, PowerUpKind::Shield | PowerUpKind::FireRate)
    }
}

// ── Player ship ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PlayerShip {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub hitbox: Rect,
    /// Earth's remaining health, 0..=MAX_HEALTH.
    pub health: u8,
    pub vel: f32,

    pub firing: bool,
    pub fire_frame_count: u32,

    pub stunned: bool,
    /// Frames of stun left; counts down to zero.
    pub stun_frame_count: u32,

    pub shield: bool,
    pub rapid_fire: bool,
    pub firing_interval_ms: u64,
    pub boosted_firing_interval_ms: u64,
    /// Tick of the last shot; `None` until the first one.
    pub prev_fire_ms: Option<u64>,
    /// Tick the current timed powerup was picked up.
    pub powerup_start_ms: Option<u64>,
}

impl PlayerShip {
    pub fn new(cfg: &PlayerConfig) -> Self {
        let mut ship = Self {
            x: cfg.start_x,
            y: cfg.start_y,
            width: cfg.width,
            height: cfg.height,
            hitbox: Rect::new(0.0, 0.0, 0.0, 0.0),
            health: cfg.health.min(MAX_HEALTH),
            vel: cfg.velocity,
            firing: false,
            fire_frame_count: 0,
            stunned: false,
            stun_frame_count: 0,
            shield: false,
            rapid_fire: false,
            firing_interval_ms: cfg.firing_interval_ms,
            boosted_firing_interval_ms: cfg.boosted_firing_interval_ms,
            prev_fire_ms: None,
            powerup_start_ms: None,
        };
        ship.update_hitbox();
        ship
    }

    pub fn update_hitbox(&mut self) {
        self.hitbox = Rect::new(self.x, self.y, self.width, self.height);
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.update_hitbox();
    }

    /// Apply one frame of held-direction movement inside a `width × height`
    /// field.  Left/right wrap around once half the ship is off-screen;
    /// up/down stop at the top margin and above Earth's healthbar.
    pub fn steer(&mut self, dir: Steering, field_width: f32, field_height: f32) {
        let mut x = self.x;
        let mut y = self.y;
        let half_w = self.width / 2.0;

        if dir.left {
            if x <= -half_w {
                x = field_width - half_w;
            } else {
                x -= self.vel;
            }
        }
        if dir.right {
            if x >= field_width - half_w {
                x = -half_w;
            } else {
                x += self.vel;
            }
        }
        if dir.up && y > self.height / 2.0 {
            y -= self.vel;
        }
        if dir.down && y < field_height - 2.0 * self.height {
            y += self.vel;
        }
        self.set_position(x, y);
    }

    pub fn current_firing_interval_ms(&self) -> u64 {
        if self.rapid_fire {
            self.boosted_firing_interval_ms
        } else {
            self.firing_interval_ms
        }
    }

    pub fn can_fire(&self, now_ms: u64) -> bool {
        if self.stunned {
            return false;
        }
        match self.prev_fire_ms {
            None => true,
            Some(prev) => now_ms.saturating_sub(prev) >= self.current_firing_interval_ms(),
        }
    }

    /// Fire both guns: records the shot time, switches to the firing sprite,
    /// and returns the left and right lasers.
    pub fn fire(&mut self, now_ms: u64, laser: &LaserConfig) -> [Laser; 2] {
        self.prev_fire_ms = Some(now_ms);
        self.firing = true;
        self.fire_frame_count = 0;

        let gun_y = self.y + GUN_Y_OFFSET;
        [
            Laser::new(self.x + LEFT_GUN_OFFSET, gun_y, laser),
            Laser::new(self.x + (self.width - RIGHT_GUN_INSET), gun_y, laser),
        ]
    }

    /// Advance the firing-effect timer, reverting after `firing_frames`.
    pub fn tick_firing(&mut self, firing_frames: u32) {
        if self.firing {
            self.fire_frame_count += 1;
            if self.fire_frame_count >= firing_frames {
                self.firing = false;
            }
        }
    }

    pub fn stun(&mut self, frames: u32) {
        self.stunned = frames > 0;
        self.stun_frame_count = frames;
    }

    pub fn tick_stun(&mut self) {
        if self.stunned {
            self.stun_frame_count = self.stun_frame_count.saturating_sub(1);
            if self.stun_frame_count == 0 {
                self.stunned = false;
            }
        }
    }

    pub fn has_timed_powerup(&self) -> bool {
        self.shield || self.rapid_fire
    }

    /// Clear shield and fire-rate once `duration_ms` has passed since pickup.
    /// Returns `true` if something expired.
    pub fn expire_powerup(&mut self, now_ms: u64, duration_ms: u64) -> bool {
        if !self.has_timed_powerup() {
            return false;
        }
        match self.powerup_start_ms {
            Some(start) if now_ms.saturating_sub(start) >= duration_ms => {
                self.remove_powerup();
                true
            }
            _ => false,
        }
    }

    pub fn remove_powerup(&mut self) {
        self.shield = false;
        self.rapid_fire = false;
        self.powerup_start_ms = None;
    }

    /// Apply a collected powerup.  Returns `true` for a zap field, whose effect
    /// lands on the enemies rather than the ship.
    pub fn apply_powerup(&mut self, kind: PowerUpKind, now_ms: u64) -> bool {
        match kind {
            PowerUpKind::Shield => {
                self.shield = true;
                self.powerup_start_ms = Some(now_ms);
                false
            }
            PowerUpKind::FireRate => {
                self.rapid_fire = true;
                self.powerup_start_ms = Some(now_ms);
                false
            }
            PowerUpKind::Health => {
                self.restore_health();
                false
            }
            PowerUpKind::ZapField => true,
        }
    }

    /// Earth takes a hit.  Returns the remaining health.
    pub fn lose_health(&mut self) -> u8 {
        self.health = self.health.saturating_sub(1);
        self.health
    }

    pub fn restore_health(&mut self) {
        self.health = (self.health + 1).min(MAX_HEALTH);
    }

    /// Stunned ships blink: drawn for four frames out of every `blit_rate`.
    pub fn visible(&self, blit_rate: u32) -> bool {
        !self.stunned || self.stun_frame_count % blit_rate.max(1) <= 3
    }
}

impl Collidable for PlayerShip {
    fn collider(&self) -> Collider {
        Collider::Body(self.hitbox)
    }
}

/// Held movement keys for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

// ── Enemy ships ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct EnemyShip {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub hitbox: Rect,
    pub vel: f32,
    /// Index into the enemy sprite list.
    pub variant: usize,
}

impl EnemyShip {
    pub fn new(x: f32, y: f32, variant: usize, cfg: &EnemyConfig) -> Self {
        Self {
            x,
            y,
            width: cfg.width,
            height: cfg.height,
            hitbox: Rect::new(x, y, cfg.width, cfg.height),
            vel: cfg.velocity,
            variant,
        }
    }

    pub fn update_hitbox(&mut self) {
        self.hitbox = Rect::new(self.x, self.y, self.width, self.height);
    }

    /// Move one frame closer to Earth.
    pub fn descend(&mut self) {
        self.y += self.vel;
        self.update_hitbox();
    }

    pub fn center(&self) -> (f32, f32) {
        self.hitbox.center()
    }
}

impl Collidable for EnemyShip {
    fn collider(&self) -> Collider {
        Collider::Body(self.hitbox)
    }
}

// ── Lasers ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Laser {
    pub x: f32,
    pub y: f32,
    pub init_y: f32,
    pub width: f32,
    pub height: f32,
    pub vel: f32,
}

impl Laser {
    pub fn new(x: f32, y: f32, cfg: &LaserConfig) -> Self {
        Self {
            x,
            y,
            init_y: y,
            width: cfg.width,
            height: cfg.height,
            vel: cfg.velocity,
        }
    }

    /// Distance travelled since firing.
    pub fn travel(&self) -> f32 {
        (self.y - self.init_y).abs()
    }

    pub fn advance(&mut self) {
        self.y -= self.vel;
    }
}

impl Collidable for Laser {
    fn collider(&self) -> Collider {
        Collider::Projectile(Rect::new(self.x, self.y, self.width, self.height))
    }
}

// ── Explosions ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Number of images in the animation.
    pub frames: usize,
    /// Image currently shown.
    pub index: usize,
    /// Frames the current image has been held.
    pub frame_count: u32,
    /// Set on the explosion caused by the fatal hit; its end shows game over.
    pub terminal: bool,
}

impl Explosion {
    pub fn new(x: f32, y: f32, frames: usize, cfg: &ExplosionConfig) -> Self {
        Self {
            x,
            y,
            width: cfg.width,
            height: cfg.height,
            frames: frames.max(1),
            index: 0,
            frame_count: 0,
            terminal: false,
        }
    }

    pub fn on_last_frame(&self) -> bool {
        self.index + 1 >= self.frames
    }

    /// Advance the animation by one game frame.  Returns `true` once the last
    /// image has been held for `hold` frames and the explosion should go.
    pub fn advance(&mut self, hold: u32) -> bool {
        if self.frame_count >= hold {
            if self.on_last_frame() {
                return true;
            }
            self.index += 1;
            self.frame_count = 0;
        } else {
            self.frame_count += 1;
        }
        false
    }
}

// ── Powerups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub hitbox: Rect,
    pub kind: PowerUpKind,
    /// Frames left before the powerup disappears.
    pub frame_count: i32,
    pub flashing: bool,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind, cfg: &PowerUpConfig) -> Self {
        Self {
            x,
            y,
            width: cfg.width,
            height: cfg.height,
            hitbox: Rect::new(x, y, cfg.width, cfg.height),
            kind,
            frame_count: cfg.lifetime_frames,
            flashing: false,
        }
    }

    /// A powerup dropped by `enemy`, centred on it.
    pub fn dropped_by(enemy: &EnemyShip, kind: PowerUpKind, cfg: &PowerUpConfig) -> Self {
        let x = enemy.x + (enemy.width / 2.0 - cfg.width / 2.0);
        let y = enemy.y + (enemy.height / 2.0 - cfg.height / 2.0);
        Self::new(x, y, kind, cfg)
    }

    /// Flashing powerups are drawn for the first half of every `flash_rate`
    /// frames.
    pub fn visible(&self, flash_rate: i32) -> bool {
        let rate = flash_rate.max(1);
        !self.flashing || self.frame_count.rem_euclid(rate) <= rate / 2
    }
}

impl Collidable for PowerUp {
    fn collider(&self) -> Collider {
        Collider::Body(self.hitbox)
    }
}
