//! Core logic for the halftone mascot widget.
//!
//! Everything here is pure arithmetic and state: shader math, palettes, the
//! mascot rig, the motion simulator, geometry generation, and input
//! normalization. No platform APIs, so the crate builds and tests on the
//! host while the wasm and native front-ends consume it unchanged.

pub mod camera;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod input;
pub mod mascot;
pub mod palette;
pub mod scene;
pub mod shading;

pub static MASCOT_WGSL: &str = include_str!("../shaders/mascot.wgsl");
pub static FLAT_WGSL: &str = include_str!("../shaders/flat.wgsl");

pub use camera::Camera;
pub use config::{ConfigError, WidgetConfig};
pub use input::{PointerState, ScrollState, ViewportState};
pub use mascot::{EyeRig, Mascot, Mouth};
pub use palette::{default_palettes, Palette, Rgb};
pub use scene::{MascotScene, SimParams};
pub use shading::{BodyUniforms, FlatUniforms, ToneBand};
