//! Host-side mirror of the WGSL shader math, plus the uniform blocks.
//!
//! The fragment and vertex stages are pure functions of their inputs, so
//! the exact band thresholds and dot-grid rules are duplicated here in Rust
//! and tested on the host; the WGSL in `shaders/` follows this module.

use glam::{Vec2, Vec3};

use crate::constants::{
    BRIGHT_BAND_MIN, BRIGHT_DOT_RADIUS, HALFTONE_REF_HEIGHT, LIGHT_DIR, MID_BAND_MIN,
    MID_DOT_RADIUS, WOBBLE_AMPLITUDE, WOBBLE_FREQUENCY,
};
use crate::palette::{Palette, Rgb};

/// Sinusoidal vertex wobble: each vertex is perturbed on X and Z as a
/// function of its own undisplaced Y and global time. No per-vertex state.
#[inline]
pub fn displace(position: Vec3, time: f32) -> Vec3 {
    Vec3::new(
        position.x + (position.y * WOBBLE_FREQUENCY + time).sin() * WOBBLE_AMPLITUDE,
        position.y,
        position.z + (position.y * WOBBLE_FREQUENCY + time).cos() * WOBBLE_AMPLITUDE,
    )
}

/// Diffuse term remapped to \[0, 1\]: faces perpendicular to the light are
/// darkest, not zero-lit.
#[inline]
pub fn diffuse_intensity(normal: Vec3, light_dir: Vec3) -> f32 {
    normal.dot(light_dir) * 0.5 + 0.5
}

/// The three hard-threshold tone bands of the comic look.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneBand {
    Bright,
    Mid,
    Dark,
}

#[inline]
pub fn tone_band(intensity: f32) -> ToneBand {
    if intensity > BRIGHT_BAND_MIN {
        ToneBand::Bright
    } else if intensity > MID_BAND_MIN {
        ToneBand::Mid
    } else {
        ToneBand::Dark
    }
}

/// Dot pitch in physical pixels for a given density. The grid is anchored
/// to the reference height, so this is independent of the live viewport.
#[inline]
pub fn cell_pitch_px(dot_scale: f32) -> f32 {
    HALFTONE_REF_HEIGHT / dot_scale
}

/// Signed offset from the nearest dot-grid cell center, per axis in
/// \[-1, 1\]: `2·fract(u) − 1`.
#[inline]
pub fn cell_offset(frag_px: Vec2, dot_scale: f32) -> Vec2 {
    let uv = frag_px * dot_scale / HALFTONE_REF_HEIGHT;
    // GLSL-style fract (x − floor x), correct for negative coordinates too
    Vec2::new(
        (uv.x - uv.x.floor()) * 2.0 - 1.0,
        (uv.y - uv.y.floor()) * 2.0 - 1.0,
    )
}

/// Euclidean distance from the nearest dot center.
#[inline]
pub fn dot_distance(frag_px: Vec2, dot_scale: f32) -> f32 {
    cell_offset(frag_px, dot_scale).length()
}

/// Quantize intensity into three bands; within the two upper bands pick
/// between two palette colors by the per-band dot radius. The lowest band
/// is always the flat dark color.
pub fn halftone_shade(intensity: f32, dot_dist: f32, palette: &Palette) -> Rgb {
    match tone_band(intensity) {
        ToneBand::Bright => {
            if dot_dist > BRIGHT_DOT_RADIUS {
                palette.primary
            } else {
                palette.secondary
            }
        }
        ToneBand::Mid => {
            if dot_dist > MID_DOT_RADIUS {
                palette.secondary
            } else {
                palette.dark
            }
        }
        ToneBand::Dark => palette.dark,
    }
}

/// Per-body uniform block; layout mirrors `BodyUniforms` in mascot.wgsl.
/// Each body owns exactly one of these.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyUniforms {
    pub model: [[f32; 4]; 4],
    pub color_primary: [f32; 4],
    pub color_secondary: [f32; 4],
    pub color_dark: [f32; 4],
    pub light_dir: [f32; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub dot_scale: f32,
    pub wobble_amp: f32,
    pub wobble_freq: f32,
    pub _pad: [f32; 2],
}

impl BodyUniforms {
    pub fn new(palette: &Palette, dot_scale: f32, resolution: [f32; 2]) -> Self {
        let light = Vec3::from_array(LIGHT_DIR).normalize();
        let mut u = Self {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            color_primary: [0.0; 4],
            color_secondary: [0.0; 4],
            color_dark: [0.0; 4],
            light_dir: [light.x, light.y, light.z, 0.0],
            resolution,
            time: 0.0,
            dot_scale,
            wobble_amp: WOBBLE_AMPLITUDE,
            wobble_freq: WOBBLE_FREQUENCY,
            _pad: [0.0; 2],
        };
        u.apply_palette(palette);
        u
    }

    /// Copy the palette into the color uniforms. Idempotent by construction:
    /// the same palette always writes the same bytes.
    pub fn apply_palette(&mut self, palette: &Palette) {
        self.color_primary = palette.primary.to_vec4();
        self.color_secondary = palette.secondary.to_vec4();
        self.color_dark = palette.dark.to_vec4();
    }

    pub fn set_resolution(&mut self, resolution: [f32; 2]) {
        self.resolution = resolution;
    }
}

/// Uniforms for the flat-color pipeline (eyes, pupils, mouth).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlatUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// View-projection block shared by every pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
}
