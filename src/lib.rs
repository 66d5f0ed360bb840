//! Liquid Density Explorer Library
//!
//! Exposes the catalogue, layout engine and selection controller for testing
//! and reuse, plus the Bevy plugins that draw them.

pub mod error;
pub mod render;
pub mod resources;
pub mod simulation;
pub mod ui;
