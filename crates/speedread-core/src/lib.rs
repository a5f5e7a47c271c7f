//! Core of the speedread RSVP reader: tokenizing, pacing, and the playback
//! state machine. Platform crates supply input, persistence, and rendering.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app;
pub mod content;
pub mod input;
pub mod pacing;
pub mod render;
pub mod session;
pub mod settings;
pub mod text_policy;
