//! Terminal backend for [`Presentation`], built on crossterm.
//!
//! The 900×600 pixel field is scaled proportionally onto the terminal grid.
//! Each asset path maps to a small glyph sprite; an unknown path fails at load
//! time just like a missing image file would.  Input arrives on a dedicated
//! reader thread and is drained without blocking once per frame.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent,
        MouseEventKind, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::assets;
use crate::error::GameError;
use crate::presentation::{Event, ImageHandle, Key, Presentation};

/// Without key-release events a key counts as held for this long after its
/// last press or repeat.  OS key repeat runs at 15 Hz or faster, so a held key
/// refreshes well inside the window.
const HOLD_WINDOW_MS: u64 = 133;

// ── Glyph sprites ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
enum Glyph {
    /// Full-screen backdrop; `stars` sprinkles a fixed starfield.
    Backdrop { stars: bool },
    Art { lines: Vec<String>, color: Color },
}

impl Glyph {
    fn art(lines: &[&str], color: Color) -> Self {
        Glyph::Art {
            lines: lines.iter().map(|line| line.to_string()).collect(),
            color,
        }
    }

    fn text(text: &str, color: Color) -> Self {
        Glyph::art(&[text], color)
    }
}

const ENEMY_ART: [[&str; 2]; 5] = [
    ["\\-v-/", " (O) "],
    ["<=V=>", " \\./ "],
    ["/vVv\\", " |o| "],
    ["{-W-}", "  v  "],
    ["[\\v/]", " <o> "],
];

const EXPLOSION_ART: [&[&str]; 11] = [
    &["*"],
    &[".*."],
    &[" . ", ".*.", " ' "],
    &["\\|/", "-*-", "/|\\"],
    &["\\ | /", "-(*)-", "/ | \\"],
    &[" \\|/ ", "-(@)-", " /|\\ "],
    &["  .  ", ".(@).", "  '  "],
    &[" . . ", ". @ .", " ' ' "],
    &[" . . ", ".   .", " ' ' "],
    &[".   .", "     ", "'   '"],
    &[".", " ", "'"],
];

/// The glyph drawn for an asset path, or `None` if the path is unknown.
fn glyph_for(path: &str) -> Option<Glyph> {
    let glyph = match path {
        assets::SPACE_BACKGROUND => Glyph::Backdrop { stars: true },
        assets::MENU_BACKGROUND => Glyph::Backdrop { stars: false },
        assets::PLAYER_SHIP => Glyph::art(&[" /^\\ ", "|[#]|", " ` ` "], Color::Green),
        assets::PLAYER_SHIP_FIRING => Glyph::art(&["!/^\\!", "|[#]|", " ` ` "], Color::Green),
        assets::LASER => Glyph::text("|", Color::Green),
        assets::POWERUP_SHIELD => Glyph::text("(S)", Color::Green),
        assets::POWERUP_FIRE_RATE => Glyph::text("[A]", Color::Blue),
        assets::POWERUP_HEALTH => Glyph::text("<+>", Color::Red),
        assets::POWERUP_ZAP_FIELD => Glyph::text("/Z/", Color::Yellow),
        assets::TITLE_TXT => Glyph::text("E A R T H   D E F E N S E", Color::Cyan),
        assets::START_TXT => Glyph::text("CLICK HERE TO PLAY", Color::White),
        assets::START_TXT_HOVERED => Glyph::text("> CLICK HERE TO PLAY <", Color::Yellow),
        assets::CREDITS_TXT => Glyph::text("CREDITS", Color::White),
        assets::CREDITS_TXT_HOVERED => Glyph::text("> CREDITS <", Color::Yellow),
        assets::GAME_OVER_TXT => Glyph::text("G A M E   O V E R", Color::Red),
        assets::RESTART_TXT => Glyph::text("RESTART", Color::White),
        assets::RESTART_TXT_HOVERED => Glyph::text("> RESTART <", Color::Yellow),
        assets::MAIN_MENU_TXT => Glyph::text("MAIN MENU", Color::White),
        assets::MAIN_MENU_TXT_HOVERED => Glyph::text("> MAIN MENU <", Color::Yellow),
        _ => return indexed_glyph(path),
    };
    Some(glyph)
}

/// Assets that come in numbered sets: healthbars, enemies, explosion frames.
fn indexed_glyph(path: &str) -> Option<Glyph> {
    if let Some(health) = assets::HEALTHBAR_IMGS.iter().position(|p| *p == path) {
        let bar = format!("EARTH [{}{}]", "#".repeat(health), "-".repeat(3 - health));
        let color = if health <= 1 { Color::Red } else { Color::Green };
        return Some(Glyph::text(&bar, color));
    }
    if let Some(variant) = assets::ENEMY_SPRITES.iter().position(|p| *p == path) {
        return Some(Glyph::art(&ENEMY_ART[variant % ENEMY_ART.len()], Color::Red));
    }
    if let Some(frame) = assets::EXPLOSION_ANIMATION.iter().position(|p| *p == path) {
        let color = if frame < 4 { Color::Yellow } else { Color::DarkYellow };
        return Some(Glyph::art(EXPLOSION_ART[frame % EXPLOSION_ART.len()], color));
    }
    None
}

#[derive(Clone, Debug)]
struct Sprite {
    glyph: Glyph,
    /// Pixel size after scaling; `None` draws the art at its natural size.
    size: Option<(f32, f32)>,
}

// ── Pixel ↔ cell mapping ─────────────────────────────────────────────────────

/// Cell index covering pixel coordinate `px` on an axis of `extent` pixels
/// spread over `cells` cells.
fn to_cell(px: f32, extent: f32, cells: u16) -> i32 {
    if extent <= 0.0 {
        return 0;
    }
    (px / extent * f32::from(cells)).floor() as i32
}

/// Pixel coordinate at the centre of cell `cell`.
fn to_pixel(cell: u16, extent: f32, cells: u16) -> f32 {
    (f32::from(cell) + 0.5) * extent / f32::from(cells.max(1))
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Forward terminal events from a blocking reader thread.
fn spawn_reader() -> mpsc::Receiver<TermEvent> {
    let (tx, rx) = mpsc::channel::<TermEvent>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });
    rx
}

// ── Presenter ────────────────────────────────────────────────────────────────

pub struct TerminalPresenter<W: Write> {
    out: W,
    /// `None` until the reader thread is running.
    rx: Option<mpsc::Receiver<TermEvent>>,
    start: Instant,
    cols: u16,
    rows: u16,
    field: (f32, f32),
    sprites: Vec<Sprite>,
    /// Each held key → tick of its last press or repeat.
    key_seen: HashMap<Key, u64>,
    pointer: (f32, f32),
    keyboard_enhanced: bool,
    restored: bool,
}

impl<W: Write> TerminalPresenter<W> {
    /// Put the terminal into raw, alternate-screen, mouse-capturing mode and
    /// start the input reader thread.
    pub fn open(out: W) -> Result<Self, GameError> {
        terminal::enable_raw_mode()?;
        // From here on an early return drops the presenter, which restores
        // the terminal.
        let mut presenter = Self::detached(out);
        presenter.enter()?;

        let (cols, rows) = terminal::size()?;
        presenter.cols = cols;
        presenter.rows = rows;
        presenter.rx = Some(spawn_reader());
        tracing::info!(
            cols,
            rows,
            keyboard_enhanced = presenter.keyboard_enhanced,
            "terminal opened"
        );
        Ok(presenter)
    }

    /// A presenter that has not touched the terminal yet and reads no input.
    fn detached(out: W) -> Self {
        Self {
            out,
            rx: None,
            start: Instant::now(),
            cols: 0,
            rows: 0,
            field: (crate::constants::DISPLAY_WIDTH, crate::constants::DISPLAY_HEIGHT),
            sprites: Vec::new(),
            key_seen: HashMap::new(),
            pointer: (0.0, 0.0),
            keyboard_enhanced: false,
            restored: false,
        }
    }

    fn enter(&mut self) -> Result<(), GameError> {
        self.out.execute(terminal::EnterAlternateScreen)?;
        self.out.execute(cursor::Hide)?;
        self.out.execute(EnableMouseCapture)?;

        // Kitty-protocol terminals report key releases; others fall back to
        // the hold window.
        self.keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
            && self
                .out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        Ok(())
    }

    /// Give the terminal back in the state it was found.  Every step is
    /// attempted; the first failure is returned.
    pub fn restore(&mut self) -> Result<(), GameError> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let steps = [
            self.out.execute(DisableMouseCapture).map(drop),
            self.out.execute(cursor::Show).map(drop),
            self.out.execute(terminal::LeaveAlternateScreen).map(drop),
            terminal::disable_raw_mode(),
        ];
        steps.into_iter().collect::<std::io::Result<()>>()?;
        Ok(())
    }

    /// Restore the terminal after a run.  If the run failed, its error wins
    /// over a restore failure, which is only logged.
    pub fn finish(&mut self, outcome: Result<(), GameError>) -> Result<(), GameError> {
        match (outcome, self.restore()) {
            (Err(err), Err(restore_err)) => {
                tracing::error!(%restore_err, "failed to restore the terminal");
                Err(err)
            }
            (Err(err), Ok(())) => Err(err),
            (Ok(()), restored) => restored,
        }
    }

    fn sprite(&self, handle: ImageHandle) -> Result<&Sprite, GameError> {
        self.sprites
            .get(handle.0 as usize)
            .ok_or_else(|| GameError::UnknownAsset {
                path: format!("image handle {}", handle.0),
            })
    }

    fn handle_key(&mut self, key_event: KeyEvent, now: u64, events: &mut Vec<Event>) {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key_event;
        let Some(key) = map_key(code) else {
            return;
        };
        match kind {
            KeyEventKind::Press => {
                if is_quit(code, modifiers) {
                    events.push(Event::Quit);
                }
                self.key_seen.insert(key, now);
                events.push(Event::KeyDown(key));
            }
            KeyEventKind::Repeat => {
                self.key_seen.insert(key, now);
            }
            KeyEventKind::Release => {
                self.key_seen.remove(&key);
                events.push(Event::KeyUp(key));
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, events: &mut Vec<Event>) {
        let x = to_pixel(mouse.column, self.field.0, self.cols);
        let y = to_pixel(mouse.row, self.field.1, self.rows);
        self.pointer = (x, y);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => events.push(Event::PointerDown { x, y }),
            MouseEventKind::Up(MouseButton::Left) => events.push(Event::PointerUp { x, y }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                events.push(Event::PointerMoved { x, y })
            }
            _ => {}
        }
    }

    fn draw_backdrop(&mut self, stars: bool) -> std::io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        if !stars || self.cols == 0 {
            return Ok(());
        }
        self.out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        for row in 0..self.rows {
            for seed in [37u32, 53] {
                let col = (u32::from(row) * seed + seed / 3) % u32::from(self.cols);
                self.out.queue(cursor::MoveTo(col as u16, row))?;
                self.out.queue(Print('.'))?;
            }
        }
        Ok(())
    }

    /// Draw art centred in the cell box covering `(x, y, w, h)`, clipped to
    /// the terminal.
    fn draw_art(
        &mut self,
        lines: &[String],
        color: Color,
        x: f32,
        y: f32,
        size: Option<(f32, f32)>,
    ) -> std::io::Result<()> {
        let art_rows = lines.len() as i32;
        let art_cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
        let col0 = to_cell(x, self.field.0, self.cols);
        let row0 = to_cell(y, self.field.1, self.rows);
        let (box_cols, box_rows) = match size {
            Some((w, h)) => (
                to_cell(x + w, self.field.0, self.cols) - col0,
                to_cell(y + h, self.field.1, self.rows) - row0,
            ),
            None => (art_cols, art_rows),
        };
        let left = col0 + (box_cols - art_cols) / 2;
        let top = row0 + (box_rows - art_rows) / 2;

        self.out.queue(style::SetForegroundColor(color))?;
        for (i, line) in lines.iter().enumerate() {
            let row = top + i as i32;
            if row < 0 || row >= i32::from(self.rows) {
                continue;
            }
            for (j, ch) in line.chars().enumerate() {
                let col = left + j as i32;
                if ch == ' ' || col < 0 || col >= i32::from(self.cols) {
                    continue;
                }
                self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                self.out.queue(Print(ch))?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Drop for TerminalPresenter<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl<W: Write> Presentation for TerminalPresenter<W> {
    fn create_window(&mut self, width: u32, height: u32) -> Result<(), GameError> {
        self.field = (width as f32, height as f32);
        let (cols, rows) = terminal::size()?;
        self.cols = cols;
        self.rows = rows;
        Ok(())
    }

    fn set_caption(&mut self, caption: &str) -> Result<(), GameError> {
        self.out.execute(terminal::SetTitle(caption))?;
        Ok(())
    }

    fn load_image(&mut self, path: &str) -> Result<ImageHandle, GameError> {
        let glyph = glyph_for(path).ok_or_else(|| GameError::UnknownAsset {
            path: path.to_string(),
        })?;
        self.sprites.push(Sprite { glyph, size: None });
        Ok(ImageHandle((self.sprites.len() - 1) as u32))
    }

    fn scale_image(&mut self, handle: ImageHandle, width: u32, height: u32) -> ImageHandle {
        let Some(sprite) = self.sprites.get(handle.0 as usize) else {
            return handle;
        };
        let scaled = Sprite {
            glyph: sprite.glyph.clone(),
            size: Some((width as f32, height as f32)),
        };
        self.sprites.push(scaled);
        ImageHandle((self.sprites.len() - 1) as u32)
    }

    fn blit(&mut self, handle: ImageHandle, x: f32, y: f32) -> Result<(), GameError> {
        let sprite = self.sprite(handle)?.clone();
        match sprite.glyph {
            Glyph::Backdrop { stars } => self.draw_backdrop(stars)?,
            Glyph::Art { lines, color } => self.draw_art(&lines, color, x, y, sprite.size)?,
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), GameError> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<Event>, GameError> {
        let now = self.ticks();
        let mut events = Vec::new();
        let Some(rx) = self.rx.take() else {
            return Ok(events);
        };
        loop {
            match rx.try_recv() {
                Ok(TermEvent::Key(key_event)) => self.handle_key(key_event, now, &mut events),
                Ok(TermEvent::Mouse(mouse)) => self.handle_mouse(mouse, &mut events),
                Ok(TermEvent::Resize(cols, rows)) => {
                    self.cols = cols;
                    self.rows = rows;
                }
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("terminal input closed");
                    events.push(Event::Quit);
                    break;
                }
            }
        }
        self.rx = Some(rx);
        Ok(events)
    }

    fn pressed_keys(&self) -> HashSet<Key> {
        let now = self.ticks();
        self.key_seen
            .iter()
            .filter(|(_, last)| {
                self.keyboard_enhanced || now.saturating_sub(**last) <= HOLD_WINDOW_MS
            })
            .map(|(key, _)| *key)
            .collect()
    }

    fn pointer_position(&self) -> (f32, f32) {
        self.pointer
    }

    fn play_music(&mut self, path: &str, looped: bool) -> Result<(), GameError> {
        if path != assets::GAME_MUSIC {
            return Err(GameError::UnknownAsset {
                path: path.to_string(),
            });
        }
        tracing::info!(path, looped, "music requested; the terminal backend is silent");
        Ok(())
    }

    fn ticks(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn delay(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}
