//! Pointer, scroll, and viewport state fed to the per-frame update.
//!
//! These are plain last-write-wins registers owned by the widget instance:
//! event handlers write them, the animation loop reads them. No smoothing
//! happens here; easing lives downstream in the mascot rig.

use glam::Vec2;

/// Convert raw client coordinates to normalized device-style coordinates in
/// \[-1, 1\], with Y inverted so "up" is positive.
#[inline]
pub fn normalize_pointer(client: Vec2, viewport: Vec2) -> Vec2 {
    let w = viewport.x.max(1.0);
    let h = viewport.y.max(1.0);
    Vec2::new(
        (client.x / w) * 2.0 - 1.0,
        -((client.y / h) * 2.0 - 1.0),
    )
}

/// Last known normalized pointer position.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub ndc: Vec2,
}

impl PointerState {
    pub fn set_from_client(&mut self, client: Vec2, viewport: Vec2) {
        self.ndc = normalize_pointer(client, viewport);
    }
}

/// Page scroll progress in \[0, 1\]; drives the scroll choreography.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollState {
    pub progress: f32,
}

impl ScrollState {
    pub fn set(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }
}

/// Renderer output size in physical pixels.
#[derive(Clone, Copy, Debug)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
}

impl ViewportState {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    #[inline]
    pub fn resolution(&self) -> [f32; 2] {
        [self.width, self.height]
    }
}
