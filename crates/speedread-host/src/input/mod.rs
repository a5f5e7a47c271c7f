//! Terminal keyboard input.

mod keyboard;

pub use keyboard::{KeyboardError, KeyboardInput, map_key};
