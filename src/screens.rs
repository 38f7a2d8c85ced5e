//! Screen state machine: main menu, credits, in-game, and game over.
//!
//! ```text
//! MainMenu ──Start──▶ InGame ──health 0 + final explosion done──▶ GameOver
//!    │  ▲                ▲                                          │
//!    │  └──Main Menu─────┼───────────────────Main Menu──────────────┤
//!    └─Credits─▶ Credits └──────────────────Restart─────────────────┘
//! ```
//!
//! A quit event on any screen ends the run.

use rand::Rng;
use tracing::{debug, info};

use crate::assets;
use crate::collision::Rect;
use crate::compute::{step, FrameInput};
use crate::config::GameConfig;
use crate::constants::*;
use crate::display::{draw_game, draw_menu, ButtonSprites, Label, Sprites};
use crate::error::GameError;
use crate::presentation::{Event, ImageHandle, Presentation};
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Credits,
    InGame,
    GameOver,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Credits,
    Restart,
    MainMenu,
}

/// A clickable region on a menu screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Button {
    pub choice: MenuChoice,
    pub rect: Rect,
}

impl Button {
    /// A `width × height` button horizontally centred on a `field_width` screen.
    pub fn centered(choice: MenuChoice, field_width: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            choice,
            rect: Rect::new(field_width / 2.0 - width / 2.0, top, width, height),
        }
    }
}

// ── Layouts ──────────────────────────────────────────────────────────────────

pub fn main_menu_buttons(width: f32, height: f32) -> [Button; 2] {
    [
        Button::centered(
            MenuChoice::Start,
            width,
            height * (9.0 / 12.0),
            START_TXT_WIDTH,
            START_TXT_HEIGHT,
        ),
        Button::centered(
            MenuChoice::Credits,
            width,
            height * (12.0 / 14.0),
            CREDITS_TXT_WIDTH,
            CREDITS_TXT_HEIGHT,
        ),
    ]
}

pub fn game_over_buttons(width: f32, height: f32) -> [Button; 2] {
    [
        Button::centered(
            MenuChoice::Restart,
            width,
            height * (5.0 / 9.0),
            RESTART_TXT_WIDTH,
            RESTART_TXT_HEIGHT,
        ),
        Button::centered(
            MenuChoice::MainMenu,
            width,
            height * (4.0 / 6.0),
            MAIN_MENU_TXT_WIDTH,
            MAIN_MENU_TXT_HEIGHT,
        ),
    ]
}

pub fn credits_buttons(width: f32, height: f32) -> [Button; 1] {
    [Button::centered(
        MenuChoice::MainMenu,
        width,
        height * (4.0 / 6.0),
        MAIN_MENU_TXT_WIDTH,
        MAIN_MENU_TXT_HEIGHT,
    )]
}

/// The first button strictly containing the pointer, if any.
pub fn hovered_button(buttons: &[Button], x: f32, y: f32) -> Option<MenuChoice> {
    buttons
        .iter()
        .find(|button| button.rect.contains_point(x, y))
        .map(|button| button.choice)
}

// ── Controller ───────────────────────────────────────────────────────────────

pub struct ScreenController<P, R> {
    presenter: P,
    sprites: Sprites,
    config: GameConfig,
    rng: R,
}

impl<P: Presentation, R: Rng> ScreenController<P, R> {
    /// Open the window, load every sprite, and start the music.
    pub fn new(mut presenter: P, config: GameConfig, rng: R) -> Result<Self, GameError> {
        presenter.create_window(
            config.display.width.round() as u32,
            config.display.height.round() as u32,
        )?;
        presenter.set_caption(CAPTION)?;
        let sprites = Sprites::load(&mut presenter, &config)?;
        presenter.play_music(assets::GAME_MUSIC, true)?;

        Ok(Self {
            presenter,
            sprites,
            config,
            rng,
        })
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Drive screens until the player quits.
    pub fn run(&mut self) -> Result<(), GameError> {
        self.run_from(Screen::MainMenu)
    }

    pub fn run_from(&mut self, mut screen: Screen) -> Result<(), GameError> {
        loop {
            info!(?screen, "entering screen");
            screen = match screen {
                Screen::MainMenu => self.main_menu()?,
                Screen::Credits => self.credits()?,
                Screen::InGame => {
                    let mut world = self.new_world();
                    self.play(&mut world)?
                }
                Screen::GameOver => self.game_over()?,
                Screen::Exit => return Ok(()),
            };
        }
    }

    /// A fresh world: full health, empty sky.
    pub fn new_world(&self) -> World {
        World::new(self.config.clone(), self.presenter.ticks())
    }

    // ── In-game loop ─────────────────────────────────────────────────────────

    /// Run the game loop until quit or until the game-over screen is due.
    pub fn play(&mut self, world: &mut World) -> Result<Screen, GameError> {
        let frame_delay = self.config.display.frame_delay_ms;

        while world.state.running {
            for event in self.presenter.poll_events()? {
                if event == Event::Quit {
                    world.state.running = false;
                    return Ok(Screen::Exit);
                }
            }

            if world.state.ready_for_game_over_screen() {
                info!(frame = world.state.frame, "game over");
                return Ok(Screen::GameOver);
            }

            let input = FrameInput::from_keys(&self.presenter.pressed_keys());
            let now = self.presenter.ticks();
            let report = step(world, &input, now, &mut self.rng);
            if report.enemies_destroyed > 0 || report.earth_hits > 0 {
                debug!(frame = world.state.frame, ?report, "frame events");
            }

            draw_game(&mut self.presenter, world, &self.sprites)?;
            self.presenter.delay(frame_delay);
        }

        Ok(Screen::Exit)
    }

    // ── Menus ────────────────────────────────────────────────────────────────

    pub fn main_menu(&mut self) -> Result<Screen, GameError> {
        let (w, h) = self.field_size();
        let labels = [Label {
            image: self.sprites.title,
            x: w / 2.0 - TITLE_TXT_WIDTH / 2.0,
            y: h / 8.0,
        }];
        let buttons = main_menu_buttons(w, h);
        let looks = [self.sprites.start, self.sprites.credits];

        Ok(match self.await_choice(&labels, &buttons, &looks)? {
            Some(MenuChoice::Start) => Screen::InGame,
            Some(MenuChoice::Credits) => Screen::Credits,
            Some(_) => Screen::MainMenu,
            None => Screen::Exit,
        })
    }

    pub fn credits(&mut self) -> Result<Screen, GameError> {
        let (w, h) = self.field_size();
        let labels = [Label {
            image: self.sprites.credits.normal,
            x: w / 2.0 - CREDITS_TXT_WIDTH / 2.0,
            y: h / 3.0,
        }];
        let buttons = credits_buttons(w, h);
        let looks = [self.sprites.main_menu];

        Ok(match self.await_choice(&labels, &buttons, &looks)? {
            Some(_) => Screen::MainMenu,
            None => Screen::Exit,
        })
    }

    pub fn game_over(&mut self) -> Result<Screen, GameError> {
        let (w, h) = self.field_size();
        let labels = [Label {
            image: self.sprites.game_over,
            x: w / 2.0 - GAME_OVER_TXT_WIDTH / 2.0,
            y: h / 3.0,
        }];
        let buttons = game_over_buttons(w, h);
        let looks = [self.sprites.restart, self.sprites.main_menu];

        Ok(match self.await_choice(&labels, &buttons, &looks)? {
            Some(MenuChoice::Restart) => Screen::InGame,
            Some(MenuChoice::MainMenu) => Screen::MainMenu,
            Some(_) => Screen::GameOver,
            None => Screen::Exit,
        })
    }

    /// Redraw the menu every polled frame, highlighting the hovered button,
    /// until a press-and-release lands on a button.  `None` means quit.
    fn await_choice(
        &mut self,
        labels: &[Label],
        buttons: &[Button],
        looks: &[ButtonSprites],
    ) -> Result<Option<MenuChoice>, GameError> {
        let background: ImageHandle = self.sprites.menu_background;
        let frame_delay = self.config.display.frame_delay_ms;
        let mut pressed = false;

        loop {
            let (px, py) = self.presenter.pointer_position();
            let hovered = hovered_button(buttons, px, py);
            let drawn: Vec<_> = buttons
                .iter()
                .zip(looks)
                .map(|(button, look)| (button.rect, *look, hovered == Some(button.choice)))
                .collect();
            draw_menu(&mut self.presenter, background, labels, &drawn)?;

            for event in self.presenter.poll_events()? {
                match event {
                    Event::Quit => return Ok(None),
                    Event::PointerDown { .. } => pressed = true,
                    Event::PointerUp { x, y } => {
                        if pressed {
                            if let Some(choice) = hovered_button(buttons, x, y) {
                                info!(?choice, "menu selection");
                                return Ok(Some(choice));
                            }
                        }
                        pressed = false;
                    }
                    _ => {}
                }
            }

            self.presenter.delay(frame_delay);
        }
    }

    fn field_size(&self) -> (f32, f32) {
        (self.config.display.width, self.config.display.height)
    }
}
