mod common;

use common::{quiet_world, seeded_rng, ScriptedPresenter};
use earth_defense::assets;
use earth_defense::config::GameConfig;
use earth_defense::constants::*;
use earth_defense::entities::EnemyShip;
use earth_defense::error::GameError;
use earth_defense::presentation::{Event, Key};
use earth_defense::screens::*;
use rand::rngs::StdRng;

const START: (f32, f32) = (450.0, 470.0);
const CREDITS: (f32, f32) = (450.0, 530.0);
const RESTART: (f32, f32) = (450.0, 355.0);
const MAIN_MENU: (f32, f32) = (450.0, 420.0);

fn controller(presenter: ScriptedPresenter) -> ScreenController<ScriptedPresenter, StdRng> {
    match ScreenController::new(presenter, GameConfig::default(), seeded_rng()) {
        Ok(controller) => controller,
        Err(err) => panic!("controller setup failed: {err}"),
    }
}

fn click(at: (f32, f32)) -> Vec<Event> {
    ScriptedPresenter::click(at.0, at.1)
}

// ── Button layout ────────────────────────────────────────────────────────────

#[test]
fn main_menu_buttons_are_hit_by_their_centres() {
    let buttons = main_menu_buttons(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    assert_eq!(buttons[0].rect.x, 287.5);
    assert_eq!(buttons[0].rect.y, 450.0);
    assert_eq!(hovered_button(&buttons, START.0, START.1), Some(MenuChoice::Start));
    assert_eq!(hovered_button(&buttons, CREDITS.0, CREDITS.1), Some(MenuChoice::Credits));
    assert_eq!(hovered_button(&buttons, 10.0, 10.0), None);
}

#[test]
fn button_borders_are_not_hovered() {
    let buttons = main_menu_buttons(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    assert_eq!(hovered_button(&buttons, 287.5, 470.0), None);
    assert_eq!(hovered_button(&buttons, 450.0, 450.0), None);
}

#[test]
fn game_over_and_credits_buttons() {
    let buttons = game_over_buttons(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    assert_eq!(hovered_button(&buttons, RESTART.0, RESTART.1), Some(MenuChoice::Restart));
    assert_eq!(hovered_button(&buttons, MAIN_MENU.0, MAIN_MENU.1), Some(MenuChoice::MainMenu));

    let buttons = credits_buttons(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    assert_eq!(hovered_button(&buttons, MAIN_MENU.0, MAIN_MENU.1), Some(MenuChoice::MainMenu));
}

// ── Setup ────────────────────────────────────────────────────────────────────

#[test]
fn setup_opens_window_loads_assets_and_plays_music() {
    let c = controller(ScriptedPresenter::new());
    let p = c.presenter();
    assert_eq!(p.window, Some((900, 600)));
    assert_eq!(p.caption.as_deref(), Some(CAPTION));
    assert_eq!(p.music, vec![(assets::GAME_MUSIC.to_string(), true)]);

    let expected = assets::ENEMY_SPRITES
        .iter()
        .chain(assets::EXPLOSION_ANIMATION.iter())
        .chain(assets::HEALTHBAR_IMGS.iter())
        .chain([assets::PLAYER_SHIP, assets::LASER, assets::MAIN_MENU_TXT_HOVERED].iter());
    for path in expected {
        assert!(p.handles.iter().any(|h| h == path), "{path} not loaded");
    }
    assert!(p.frames.is_empty());
}

#[test]
fn missing_asset_fails_setup() {
    let mut presenter = ScriptedPresenter::new();
    presenter.missing.insert(assets::LASER.to_string());
    let result = ScreenController::new(presenter, GameConfig::default(), seeded_rng());
    match result {
        Err(GameError::UnknownAsset { path }) => assert_eq!(path, assets::LASER),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("setup should fail"),
    }
}

// ── Menus ────────────────────────────────────────────────────────────────────

#[test]
fn clicking_start_enters_the_game() {
    let mut c = controller(ScriptedPresenter::with_script(vec![click(START)]));
    assert_eq!(c.main_menu().ok(), Some(Screen::InGame));
}

#[test]
fn clicking_credits_opens_credits() {
    let mut c = controller(ScriptedPresenter::with_script(vec![click(CREDITS)]));
    assert_eq!(c.main_menu().ok(), Some(Screen::Credits));
}

#[test]
fn quit_on_main_menu_exits() {
    let mut c = controller(ScriptedPresenter::with_script(vec![vec![Event::Quit]]));
    assert_eq!(c.main_menu().ok(), Some(Screen::Exit));
}

#[test]
fn release_without_press_is_ignored() {
    let up = Event::PointerUp {
        x: START.0,
        y: START.1,
    };
    let mut c = controller(ScriptedPresenter::with_script(vec![vec![up]]));
    // The script then runs dry and quits.
    assert_eq!(c.main_menu().ok(), Some(Screen::Exit));
    assert_eq!(c.presenter().frames.len(), 2);
}

#[test]
fn hovered_button_is_highlighted() {
    let hover = Event::PointerMoved {
        x: START.0,
        y: START.1,
    };
    let mut c = controller(ScriptedPresenter::with_script(vec![vec![hover]]));
    assert_eq!(c.main_menu().ok(), Some(Screen::Exit));

    let frames = &c.presenter().frames;
    assert!(ScriptedPresenter::frame_contains(&frames[0], assets::START_TXT));
    assert!(!ScriptedPresenter::frame_contains(&frames[0], assets::START_TXT_HOVERED));
    assert!(ScriptedPresenter::frame_contains(&frames[1], assets::START_TXT_HOVERED));
    assert!(ScriptedPresenter::frame_contains(&frames[1], assets::TITLE_TXT));
}

#[test]
fn game_over_menu_choices() {
    let mut c = controller(ScriptedPresenter::with_script(vec![click(RESTART)]));
    assert_eq!(c.game_over().ok(), Some(Screen::InGame));

    let mut c = controller(ScriptedPresenter::with_script(vec![click(MAIN_MENU)]));
    assert_eq!(c.game_over().ok(), Some(Screen::MainMenu));
}

#[test]
fn credits_round_trip() {
    let script = vec![click(CREDITS), click(MAIN_MENU)];
    let mut c = controller(ScriptedPresenter::with_script(script));
    assert!(c.run().is_ok());

    let frames = &c.presenter().frames;
    assert_eq!(frames.len(), 3);
    assert!(ScriptedPresenter::frame_contains(&frames[1], assets::MAIN_MENU_TXT));
    assert!(ScriptedPresenter::frame_contains(&frames[2], assets::TITLE_TXT));
}

// ── In game ──────────────────────────────────────────────────────────────────

#[test]
fn quit_during_play_exits() {
    let mut c = controller(ScriptedPresenter::with_script(vec![vec![Event::Quit]]));
    let mut world = c.new_world();
    assert_eq!(c.play(&mut world).ok(), Some(Screen::Exit));
    assert!(!world.state.running);
    assert!(c.presenter().frames.is_empty());
}

#[test]
fn held_keys_steer_the_ship() {
    let mut presenter = ScriptedPresenter::with_script(vec![vec![]]);
    presenter.keys.insert(Key::Right);
    let mut c = controller(presenter);
    let mut world = quiet_world();

    assert_eq!(c.play(&mut world).ok(), Some(Screen::Exit));
    assert_eq!(world.player.x, PLAYER_START_X + PLAYER_VEL);

    let frames = &c.presenter().frames;
    assert_eq!(frames.len(), 1);
    assert!(frames[0]
        .iter()
        .any(|(path, x, _)| path == assets::PLAYER_SHIP && *x == world.player.x));
    assert_eq!(c.presenter().clock_ms, FRAME_DELAY_MS);
}

#[test]
fn game_over_screen_waits_for_the_final_explosion() {
    let mut c = controller(ScriptedPresenter::with_script(vec![vec![]; 100]));
    let mut world = quiet_world();
    world.player.set_position(800.0, 100.0);
    world.player.health = 1;
    let enemy = EnemyShip::new(100.0, DISPLAY_HEIGHT, 0, &world.config.enemy);
    world.enemies.push(enemy);

    assert_eq!(c.play(&mut world).ok(), Some(Screen::GameOver));

    let frames = &c.presenter().frames;
    assert_eq!(frames.len(), 4 * world.explosion_frames);
    // The field freezes around the final explosion: no ship while it plays.
    for frame in &frames[..frames.len() - 1] {
        assert!(!ScriptedPresenter::frame_contains(frame, assets::PLAYER_SHIP));
        assert!(ScriptedPresenter::frame_contains(frame, assets::HEALTHBAR_IMGS[0]));
    }
}

#[test]
fn restart_from_game_over_starts_a_fresh_game() {
    let script = vec![click(RESTART), vec![]];
    let mut c = controller(ScriptedPresenter::with_script(script));
    assert!(c.run_from(Screen::GameOver).is_ok());

    let frames = &c.presenter().frames;
    assert_eq!(frames.len(), 2);
    let game = &frames[1];
    assert!(ScriptedPresenter::frame_contains(game, assets::SPACE_BACKGROUND));
    assert!(ScriptedPresenter::frame_contains(game, assets::PLAYER_SHIP));
    assert!(ScriptedPresenter::frame_contains(game, assets::HEALTHBAR_IMGS[3]));
}
