//! Earth Defense: hold the line against descending waves of enemy ships.
//!
//! The simulation ([`compute`], [`entities`], [`collision`], [`world`]) is pure
//! game logic driven by injected input, time, and randomness.  Drawing and
//! input go through the [`presentation::Presentation`] trait; [`terminal`]
//! implements it on top of crossterm.

pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod display;
pub mod entities;
pub mod error;
pub mod presentation;
pub mod screens;
pub mod terminal;
pub mod world;

pub use config::GameConfig;
pub use error::GameError;
pub use screens::{Screen, ScreenController};
pub use world::World;
