//! The per-frame simulation step.
//!
//! [`step`] advances a [`World`] by exactly one frame: movement, firing,
//! laser hits, spawning, enemy descent, explosion animation, and powerups, in
//! that order.  All randomness comes through the injected `rng`, and all time
//! through `now_ms`, so a seeded RNG and a scripted clock replay a game exactly.

use std::collections::HashSet;
use std::mem;

use rand::Rng;
use tracing::{debug, info};

use crate::collision::collides;
use crate::constants::{ENEMY_SPAWN_MARGIN, ENEMY_SPAWN_Y};
use crate::entities::{EnemyShip, PowerUp, PowerUpKind, Steering};
use crate::presentation::Key;
use crate::world::World;

/// Player intent for one frame, read from the held keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub steering: Steering,
    pub fire: bool,
}

impl FrameInput {
    /// WASD or arrows steer; Space or Enter fires.
    pub fn from_keys(keys: &HashSet<Key>) -> Self {
        let held = |a: Key, b: Key| keys.contains(&a) || keys.contains(&b);
        Self {
            steering: Steering {
                left: held(Key::Left, Key::Char('a')),
                right: held(Key::Right, Key::Char('d')),
                up: held(Key::Up, Key::Char('w')),
                down: held(Key::Down, Key::Char('s')),
            },
            fire: held(Key::Space, Key::Enter),
        }
    }
}

/// What happened during one step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub lasers_fired: usize,
    pub enemies_spawned: usize,
    pub enemies_destroyed: usize,
    pub earth_hits: usize,
    pub powerups_dropped: usize,
    pub powerups_collected: usize,
    /// Earth's health reached zero this frame.
    pub game_over: bool,
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
pub fn step<R: Rng + ?Sized>(
    world: &mut World,
    input: &FrameInput,
    now_ms: u64,
    rng: &mut R,
) -> StepReport {
    let mut report = StepReport::default();
    world.state.frame += 1;

    move_player(world, input);
    let firing_frames = world.config.player.firing_frames;
    world.player.tick_firing(firing_frames);
    expire_player_powerup(world, now_ms);
    fire_lasers(world, input, now_ms, &mut report);
    update_lasers(world, rng, &mut report);
    spawn_enemies(world, now_ms, rng, &mut report);
    update_enemies(world, &mut report);
    update_explosions(world);
    update_powerups(world, now_ms, &mut report);

    report
}

// ── 1. Player ────────────────────────────────────────────────────────────────

pub fn move_player(world: &mut World, input: &FrameInput) {
    if world.player.stunned {
        world.player.update_hitbox();
        return;
    }
    let (width, height) = (world.config.display.width, world.config.display.height);
    world.player.steer(input.steering, width, height);
}

pub fn expire_player_powerup(world: &mut World, now_ms: u64) {
    let duration = world.config.player.powerup_duration_ms;
    if world.player.expire_powerup(now_ms, duration) {
        debug!(frame = world.state.frame, "player powerup expired");
    }
}

/// Fire both guns if the trigger is held and the cooldown has elapsed.
pub fn fire_lasers(world: &mut World, input: &FrameInput, now_ms: u64, report: &mut StepReport) {
    if !input.fire || !world.player.can_fire(now_ms) {
        return;
    }
    let lasers = world.player.fire(now_ms, &world.config.laser);
    report.lasers_fired += lasers.len();
    world.lasers.extend(lasers);
}

// ── 2. Lasers ────────────────────────────────────────────────────────────────

/// Retire lasers past their range, resolve hits, and move the rest upward.
/// A laser destroys at most one enemy.
pub fn update_lasers<R: Rng + ?Sized>(world: &mut World, rng: &mut R, report: &mut StepReport) {
    let range = world.config.laser.range;
    let lasers = mem::take(&mut world.lasers);
    let mut kept = Vec::with_capacity(lasers.len());

    for mut laser in lasers {
        if laser.travel() >= range {
            continue;
        }

        match world.enemies.iter().position(|enemy| collides(&laser, enemy)) {
            Some(index) => {
                let enemy = world.enemies.remove(index);
                world.explode_enemy(&enemy);
                report.enemies_destroyed += 1;
                debug!(x = enemy.x, y = enemy.y, "enemy shot down");
                maybe_drop_powerup(world, &enemy, rng, report);
            }
            None => {
                laser.advance();
                kept.push(laser);
            }
        }
    }

    world.lasers = kept;
}

fn maybe_drop_powerup<R: Rng + ?Sized>(
    world: &mut World,
    enemy: &EnemyShip,
    rng: &mut R,
    report: &mut StepReport,
) {
    let cfg = &world.config.powerup;
    let roll = rng.gen_range(1..=cfg.drop_roll_max);
    if roll % cfg.drop_roll_divisor != 0 {
        return;
    }
    let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
    world.powerups.push(PowerUp::dropped_by(enemy, kind, cfg));
    report.powerups_dropped += 1;
    debug!(?kind, "powerup dropped");
}

// ── 3. Enemies ───────────────────────────────────────────────────────────────

/// Spawn one enemy above the top edge when the spawn interval has elapsed and
/// the field is below its cap.
pub fn spawn_enemies<R: Rng + ?Sized>(
    world: &mut World,
    now_ms: u64,
    rng: &mut R,
    report: &mut StepReport,
) {
    let state = &mut world.state;
    if now_ms.saturating_sub(state.interval_start_ms) < state.spawn_interval_ms
        || world.enemies.len() >= state.max_enemies
    {
        return;
    }
    state.interval_start_ms = now_ms;

    let lo = ENEMY_SPAWN_MARGIN as i32;
    let hi = (world.config.display.width - ENEMY_SPAWN_MARGIN) as i32;
    let x = rng.gen_range(lo..=hi.max(lo)) as f32;
    let variant = rng.gen_range(0..world.enemy_variants.max(1));

    world
        .enemies
        .push(EnemyShip::new(x, ENEMY_SPAWN_Y, variant, &world.config.enemy));
    report.enemies_spawned += 1;
    debug!(x, variant, "enemy spawned");
}

/// Each enemy either reaches Earth, rams the player, or moves down.
pub fn update_enemies(world: &mut World, report: &mut StepReport) {
    let earth_line = world.config.display.height - world.config.explosion.height / 2.0;
    let stun_frames = world.config.player.stun_frames;
    let enemies = mem::take(&mut world.enemies);
    let mut kept = Vec::with_capacity(enemies.len());

    for mut enemy in enemies {
        if enemy.y >= earth_line {
            let already_over = world.state.game_over;
            let remaining = world.player.lose_health();
            report.earth_hits += 1;

            let fatal = remaining == 0 && !already_over;
            world.explode_enemy(&enemy).terminal = fatal;
            debug!(x = enemy.x, remaining, "enemy reached earth");

            if fatal {
                world.state.game_over = true;
                world.state.final_explosion_pending = true;
                report.game_over = true;
                info!(frame = world.state.frame, "earth destroyed, final explosion started");
            }
        } else if collides(&world.player, &enemy) {
            world.explode_enemy(&enemy);
            report.enemies_destroyed += 1;
            if !world.player.shield {
                world.player.stun(stun_frames);
                debug!(stun_frames, "player rammed and stunned");
            }
        } else {
            enemy.descend();
            kept.push(enemy);
        }
    }

    world.enemies = kept;
}

// ── 4. Explosions ────────────────────────────────────────────────────────────

pub fn update_explosions(world: &mut World) {
    let hold = world.config.explosion.hold_frames;
    let mut terminal_done = false;

    world.explosions.retain_mut(|explosion| {
        if explosion.advance(hold) {
            terminal_done |= explosion.terminal;
            false
        } else {
            true
        }
    });

    if terminal_done && world.state.final_explosion_pending {
        world.state.final_explosion_pending = false;
        info!(frame = world.state.frame, "final explosion finished");
    }
}

// ── 5. Powerups ──────────────────────────────────────────────────────────────

/// Flash, expire, and collect powerups, then count down the player's stun.
pub fn update_powerups(world: &mut World, now_ms: u64, report: &mut StepReport) {
    let flashing_frames = world.config.powerup.flashing_frames;
    let powerups = mem::take(&mut world.powerups);
    let mut kept = Vec::with_capacity(powerups.len());
    let mut zap = false;

    for mut powerup in powerups {
        if !powerup.flashing && powerup.frame_count <= flashing_frames {
            powerup.flashing = true;
        } else if powerup.flashing && powerup.frame_count <= 0 {
            continue;
        }

        // No pickups once the game is over.
        if !world.state.game_over && collides(&world.player, &powerup) {
            report.powerups_collected += 1;
            debug!(kind = ?powerup.kind, timed = powerup.kind.is_timed(), "powerup collected");
            zap |= world.player.apply_powerup(powerup.kind, now_ms);
            continue;
        }

        powerup.frame_count -= 1;
        kept.push(powerup);
    }
    world.powerups = kept;

    if zap {
        let enemies = mem::take(&mut world.enemies);
        report.enemies_destroyed += enemies.len();
        for enemy in &enemies {
            world.explode_enemy(enemy);
        }
        debug!(destroyed = enemies.len(), "zap field cleared the sky");
    }

    world.player.tick_stun();
}
