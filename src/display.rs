//! Drawing layer.
//!
//! [`Sprites`] loads and scales every image once at startup; the draw functions
//! take an immutable view of the world and only translate it into blits.  No
//! game logic happens here.

use crate::assets;
use crate::collision::Rect;
use crate::config::GameConfig;
use crate::constants::*;
use crate::entities::PowerUpKind;
use crate::error::GameError;
use crate::presentation::{load_scaled, ImageHandle, Presentation};
use crate::world::World;

// ── Sprite table ─────────────────────────────────────────────────────────────

/// A menu button image and its hovered variant.
#[derive(Clone, Copy, Debug)]
pub struct ButtonSprites {
    pub normal: ImageHandle,
    pub hovered: ImageHandle,
}

#[derive(Clone, Debug)]
pub struct Sprites {
    pub space_background: ImageHandle,
    pub menu_background: ImageHandle,
    /// Indexed by health.
    pub healthbar: [ImageHandle; 4],
    pub player: ImageHandle,
    pub player_firing: ImageHandle,
    pub enemies: Vec<ImageHandle>,
    pub laser: ImageHandle,
    pub explosion: Vec<ImageHandle>,
    /// Indexed by [`PowerUpKind::index`].
    pub powerups: [ImageHandle; 4],

    pub title: ImageHandle,
    pub start: ButtonSprites,
    pub credits: ButtonSprites,
    pub game_over: ImageHandle,
    pub restart: ButtonSprites,
    pub main_menu: ButtonSprites,
}

impl Sprites {
    /// Load every image the game draws.  A missing asset is fatal.
    pub fn load<P: Presentation + ?Sized>(p: &mut P, cfg: &GameConfig) -> Result<Self, GameError> {
        let (w, h) = (cfg.display.width, cfg.display.height);

        let mut healthbar = [ImageHandle(0); 4];
        for (slot, path) in healthbar.iter_mut().zip(assets::HEALTHBAR_IMGS) {
            *slot = load_scaled(p, path, HEALTHBAR_WIDTH, HEALTHBAR_HEIGHT)?;
        }

        let mut powerups = [ImageHandle(0); 4];
        for kind in PowerUpKind::ALL {
            powerups[kind.index()] =
                load_scaled(p, powerup_asset(kind), cfg.powerup.width, cfg.powerup.height)?;
        }

        let enemies = assets::ENEMY_SPRITES
            .iter()
            .map(|path| load_scaled(p, path, cfg.enemy.width, cfg.enemy.height))
            .collect::<Result<Vec<_>, _>>()?;
        let explosion = assets::EXPLOSION_ANIMATION
            .iter()
            .map(|path| load_scaled(p, path, cfg.explosion.width, cfg.explosion.height))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            space_background: load_scaled(p, assets::SPACE_BACKGROUND, w, h)?,
            menu_background: load_scaled(p, assets::MENU_BACKGROUND, w, h)?,
            healthbar,
            player: load_scaled(p, assets::PLAYER_SHIP, cfg.player.width, cfg.player.height)?,
            player_firing: load_scaled(
                p,
                assets::PLAYER_SHIP_FIRING,
                cfg.player.width,
                cfg.player.height,
            )?,
            enemies,
            laser: load_scaled(p, assets::LASER, cfg.laser.width, cfg.laser.height)?,
            explosion,
            powerups,
            title: load_scaled(p, assets::TITLE_TXT, TITLE_TXT_WIDTH, TITLE_TXT_HEIGHT)?,
            start: load_button(
                p,
                assets::START_TXT,
                assets::START_TXT_HOVERED,
                START_TXT_WIDTH,
                START_TXT_HEIGHT,
            )?,
            credits: load_button(
                p,
                assets::CREDITS_TXT,
                assets::CREDITS_TXT_HOVERED,
                CREDITS_TXT_WIDTH,
                CREDITS_TXT_HEIGHT,
            )?,
            game_over: load_scaled(
                p,
                assets::GAME_OVER_TXT,
                GAME_OVER_TXT_WIDTH,
                GAME_OVER_TXT_HEIGHT,
            )?,
            restart: load_button(
                p,
                assets::RESTART_TXT,
                assets::RESTART_TXT_HOVERED,
                RESTART_TXT_WIDTH,
                RESTART_TXT_HEIGHT,
            )?,
            main_menu: load_button(
                p,
                assets::MAIN_MENU_TXT,
                assets::MAIN_MENU_TXT_HOVERED,
                MAIN_MENU_TXT_WIDTH,
                MAIN_MENU_TXT_HEIGHT,
            )?,
        })
    }

    pub fn healthbar_for(&self, health: u8) -> ImageHandle {
        self.healthbar[usize::from(health).min(self.healthbar.len() - 1)]
    }
}

fn powerup_asset(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Shield => assets::POWERUP_SHIELD,
        PowerUpKind::FireRate => assets::POWERUP_FIRE_RATE,
        PowerUpKind::Health => assets::POWERUP_HEALTH,
        PowerUpKind::ZapField => assets::POWERUP_ZAP_FIELD,
    }
}

fn load_button<P: Presentation + ?Sized>(
    p: &mut P,
    normal: &str,
    hovered: &str,
    width: f32,
    height: f32,
) -> Result<ButtonSprites, GameError> {
    Ok(ButtonSprites {
        normal: load_scaled(p, normal, width, height)?,
        hovered: load_scaled(p, hovered, width, height)?,
    })
}

// ── In-game frame ────────────────────────────────────────────────────────────

/// Draw one complete game frame.  Later blits land on top.
///
/// While the final explosion is playing, only the background, explosions, and
/// healthbar are drawn so the field appears frozen around it.
pub fn draw_game<P: Presentation + ?Sized>(
    p: &mut P,
    world: &World,
    sprites: &Sprites,
) -> Result<(), GameError> {
    p.blit(sprites.space_background, 0.0, 0.0)?;

    if !world.state.final_explosion_pending {
        let player = &world.player;
        if player.visible(STUN_BLIT_RATE) {
            let sprite = if player.firing {
                sprites.player_firing
            } else {
                sprites.player
            };
            p.blit(sprite, player.x, player.y)?;
        }

        for laser in &world.lasers {
            p.blit(sprites.laser, laser.x, laser.y)?;
        }

        for powerup in &world.powerups {
            if powerup.visible(POWERUP_FLASH_RATE) {
                p.blit(sprites.powerups[powerup.kind.index()], powerup.x, powerup.y)?;
            }
        }

        for enemy in &world.enemies {
            if let Some(&sprite) = sprites.enemies.get(enemy.variant) {
                p.blit(sprite, enemy.x, enemy.y)?;
            }
        }
    }

    for explosion in &world.explosions {
        if let Some(&sprite) = sprites.explosion.get(explosion.index) {
            p.blit(sprite, explosion.x, explosion.y)?;
        }
    }

    let (w, h) = (world.config.display.width, world.config.display.height);
    p.blit(
        sprites.healthbar_for(world.player.health),
        (w - HEALTHBAR_WIDTH) / 2.0,
        h - HEALTHBAR_BOTTOM_OFFSET,
    )?;

    p.present()
}

// ── Menu screens ─────────────────────────────────────────────────────────────

/// A static image on a menu screen.
#[derive(Clone, Copy, Debug)]
pub struct Label {
    pub image: ImageHandle,
    pub x: f32,
    pub y: f32,
}

/// Draw a menu: background, fixed labels, then each button in its hovered or
/// normal look.
pub fn draw_menu<P: Presentation + ?Sized>(
    p: &mut P,
    background: ImageHandle,
    labels: &[Label],
    buttons: &[(Rect, ButtonSprites, bool)],
) -> Result<(), GameError> {
    p.blit(background, 0.0, 0.0)?;
    for label in labels {
        p.blit(label.image, label.x, label.y)?;
    }
    for (rect, sprites, hovered) in buttons {
        let image = if *hovered {
            sprites.hovered
        } else {
            sprites.normal
        };
        p.blit(image, rect.x, rect.y)?;
    }
    p.present()
}
