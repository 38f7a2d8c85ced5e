#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};

use earth_defense::config::GameConfig;
use earth_defense::error::GameError;
use earth_defense::presentation::{Event, ImageHandle, Key, Presentation};
use earth_defense::world::World;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A world with spawning switched off so tests control every enemy.
pub fn quiet_world() -> World {
    let mut world = World::new(GameConfig::default(), 0);
    world.state.spawn_interval_ms = u64::MAX;
    world
}

/// In-memory presenter: events come from a script, one batch per poll, and
/// every presented frame is recorded as the asset paths that were blitted.
/// Once the script runs out every poll reports a quit.
#[derive(Default)]
pub struct ScriptedPresenter {
    pub window: Option<(u32, u32)>,
    pub caption: Option<String>,
    pub music: Vec<(String, bool)>,
    pub missing: HashSet<String>,
    pub script: VecDeque<Vec<Event>>,
    pub keys: HashSet<Key>,
    pub pointer: (f32, f32),
    pub clock_ms: u64,
    /// Path behind each handle; scaled handles keep their source path.
    pub handles: Vec<String>,
    pub pending: Vec<(String, f32, f32)>,
    pub frames: Vec<Vec<(String, f32, f32)>>,
    pub polls: usize,
}

impl ScriptedPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<Vec<Event>>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }

    pub fn click(x: f32, y: f32) -> Vec<Event> {
        vec![Event::PointerDown { x, y }, Event::PointerUp { x, y }]
    }

    pub fn frame_contains(frame: &[(String, f32, f32)], path: &str) -> bool {
        frame.iter().any(|(p, _, _)| p == path)
    }
}

impl Presentation for ScriptedPresenter {
    fn create_window(&mut self, width: u32, height: u32) -> Result<(), GameError> {
        self.window = Some((width, height));
        Ok(())
    }

    fn set_caption(&mut self, caption: &str) -> Result<(), GameError> {
        self.caption = Some(caption.to_string());
        Ok(())
    }

    fn load_image(&mut self, path: &str) -> Result<ImageHandle, GameError> {
        if self.missing.contains(path) {
            return Err(GameError::UnknownAsset {
                path: path.to_string(),
            });
        }
        self.handles.push(path.to_string());
        Ok(ImageHandle((self.handles.len() - 1) as u32))
    }

    fn scale_image(&mut self, handle: ImageHandle, _width: u32, _height: u32) -> ImageHandle {
        let path = self.handles[handle.0 as usize].clone();
        self.handles.push(path);
        ImageHandle((self.handles.len() - 1) as u32)
    }

    fn blit(&mut self, handle: ImageHandle, x: f32, y: f32) -> Result<(), GameError> {
        let path = self.handles[handle.0 as usize].clone();
        self.pending.push((path, x, y));
        Ok(())
    }

    fn present(&mut self) -> Result<(), GameError> {
        let frame = std::mem::take(&mut self.pending);
        self.frames.push(frame);
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<Event>, GameError> {
        self.polls += 1;
        let events = self
            .script
            .pop_front()
            .unwrap_or_else(|| vec![Event::Quit]);
        for event in &events {
            match *event {
                Event::PointerDown { x, y }
                | Event::PointerUp { x, y }
                | Event::PointerMoved { x, y } => self.pointer = (x, y),
                _ => {}
            }
        }
        Ok(events)
    }

    fn pressed_keys(&self) -> HashSet<Key> {
        self.keys.clone()
    }

    fn pointer_position(&self) -> (f32, f32) {
        self.pointer
    }

    fn play_music(&mut self, path: &str, looped: bool) -> Result<(), GameError> {
        self.music.push((path.to_string(), looped));
        Ok(())
    }

    fn ticks(&self) -> u64 {
        self.clock_ms
    }

    fn delay(&mut self, ms: u64) {
        self.clock_ms += ms;
    }
}
