//! Widget configuration and validation.

use glam::Vec2;
use thiserror::Error;

use crate::constants::{
    DEFAULT_BOUNDS_X, DEFAULT_BOUNDS_Y, DEFAULT_DOT_SCALE, DEFAULT_EASING, DEFAULT_FOV_DEGREES,
    DEFAULT_IDLE_SPIN, DEFAULT_PALETTE_PERIOD_SEC, DEFAULT_SWAP_DISTANCE, SPEED_MAX, SPEED_MIN,
};
use crate::palette::{default_palettes, Palette};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported mascot count {0} (expected 1 or 3)")]
    UnsupportedCount(usize),
    #[error("palette list is empty")]
    NoPalettes,
    #[error("bounds must be positive, got ({0}, {1})")]
    InvalidBounds(f32, f32),
    #[error("speed range [{0}, {1}] is empty or negative")]
    InvalidSpeedRange(f32, f32),
    #[error("palette period {0} must be positive")]
    InvalidPalettePeriod(f32),
}

/// Recognized widget options; `Default` is the single hero mascot.
#[derive(Clone, Debug)]
pub struct WidgetConfig {
    /// 1 for the hero mascot, 3 for the bouncing swarm.
    pub mascot_count: usize,
    pub palettes: Vec<Palette>,
    pub fov_degrees: f32,
    /// Half extents of the bounce box in multi-body mode.
    pub bounds: Vec2,
    /// Distance below which two bodies exchange velocities wholesale.
    pub swap_distance: f32,
    /// Initial per-axis speed range, units per tick.
    pub speed_range: (f32, f32),
    /// Per-tick exponential smoothing factor for the cursor-follow tilt.
    pub easing: f32,
    /// Constant Z spin per tick, radians.
    pub idle_spin: f32,
    /// Halftone cells along the reference height.
    pub dot_scale: f32,
    /// Whether mascots carry the reactive mouth.
    pub mouth: bool,
    pub palette_period_sec: f32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            mascot_count: 1,
            palettes: default_palettes(),
            fov_degrees: DEFAULT_FOV_DEGREES,
            bounds: Vec2::new(DEFAULT_BOUNDS_X, DEFAULT_BOUNDS_Y),
            swap_distance: DEFAULT_SWAP_DISTANCE,
            speed_range: (SPEED_MIN, SPEED_MAX),
            easing: DEFAULT_EASING,
            idle_spin: DEFAULT_IDLE_SPIN,
            dot_scale: DEFAULT_DOT_SCALE,
            mouth: true,
            palette_period_sec: DEFAULT_PALETTE_PERIOD_SEC,
        }
    }
}

impl WidgetConfig {
    /// The bouncing three-mascot variant.
    pub fn swarm() -> Self {
        Self {
            mascot_count: 3,
            mouth: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mascot_count != 1 && self.mascot_count != 3 {
            return Err(ConfigError::UnsupportedCount(self.mascot_count));
        }
        if self.palettes.is_empty() {
            return Err(ConfigError::NoPalettes);
        }
        if self.bounds.x <= 0.0 || self.bounds.y <= 0.0 {
            return Err(ConfigError::InvalidBounds(self.bounds.x, self.bounds.y));
        }
        let (lo, hi) = self.speed_range;
        if lo <= 0.0 || hi < lo {
            return Err(ConfigError::InvalidSpeedRange(lo, hi));
        }
        // the palette clock drains in period-sized steps; a non-positive
        // period would spin forever
        if self.palette_period_sec <= 0.0 {
            return Err(ConfigError::InvalidPalettePeriod(self.palette_period_sec));
        }
        Ok(())
    }
}
