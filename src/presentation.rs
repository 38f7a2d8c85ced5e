//! The rendering / input collaborator the game runs on.
//!
//! The simulation never touches a terminal or window directly; the screen
//! controller and the drawing code go through [`Presentation`].  The shipped
//! implementation is [`crate::terminal::TerminalPresenter`].

use std::collections::HashSet;

use crate::error::GameError;

/// Opaque handle to a loaded (and possibly scaled) image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    /// Letters are reported lowercase.
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Window closed or quit requested.
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
}

pub trait Presentation {
    fn create_window(&mut self, width: u32, height: u32) -> Result<(), GameError>;

    fn set_caption(&mut self, caption: &str) -> Result<(), GameError>;

    /// Fails with [`GameError::UnknownAsset`] when the asset cannot be found.
    fn load_image(&mut self, path: &str) -> Result<ImageHandle, GameError>;

    /// A new handle drawing `handle` at `width × height` pixels.
    fn scale_image(&mut self, handle: ImageHandle, width: u32, height: u32) -> ImageHandle;

    /// Draw an image with its top-left corner at pixel `(x, y)`.
    fn blit(&mut self, handle: ImageHandle, x: f32, y: f32) -> Result<(), GameError>;

    /// Show everything blitted since the last present.
    fn present(&mut self) -> Result<(), GameError>;

    fn poll_events(&mut self) -> Result<Vec<Event>, GameError>;

    fn pressed_keys(&self) -> HashSet<Key>;

    fn pointer_position(&self) -> (f32, f32);

    fn play_music(&mut self, path: &str, looped: bool) -> Result<(), GameError>;

    /// Monotonic milliseconds since the presenter started.
    fn ticks(&self) -> u64;

    fn delay(&mut self, ms: u64);
}

/// Load an image and scale it in one go.
pub fn load_scaled<P: Presentation + ?Sized>(
    presenter: &mut P,
    path: &str,
    width: f32,
    height: f32,
) -> Result<ImageHandle, GameError> {
    let handle = presenter.load_image(path)?;
    Ok(presenter.scale_image(handle, width.round() as u32, height.round() as u32))
}
