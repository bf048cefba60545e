//! Animated particle-network backdrop for web pages.
//!
//! A fixed number of points drift across a canvas with wrap-around edges, and every pair
//! closer than a threshold is joined by a line that fades out with distance. The point count
//! and threshold are picked once from the viewport width when the backdrop is mounted.
//!
//! The simulation and renderer run against the `Surface` and `SurfaceHost` traits; the
//! browser implementations and the JavaScript-facing `Backdrop` live in `web`.

mod utils;

pub mod color;
pub mod engine;
pub mod error;
pub mod host;
pub mod particle;
pub mod renderer;
pub mod simulation;
pub mod viewport;
pub mod web;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

pub use color::Color;
pub use engine::{Engine, EngineConfig, EngineState};
pub use error::EngineError;
pub use host::{FrameToken, SurfaceHost, Unsubscribe};
pub use particle::Particle;
pub use renderer::{RenderStats, RenderStyle, Surface};
pub use viewport::{SimulationParameters, Tier, TierParams, TierTable, Viewport};
pub use web::{Backdrop, CanvasSurface, WindowHost};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging(log::LevelFilter::Info);
}
