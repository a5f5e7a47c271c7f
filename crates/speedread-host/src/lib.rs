//! Std-side collaborators for the speedread core: document extraction, file
//! backed stores, terminal rendering and keyboard decoding.

pub mod document;
pub mod input;
pub mod render;
pub mod storage;
