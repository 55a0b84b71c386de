//! Scene graph and per-frame driver shared by both front-ends.
//!
//! `MascotScene` owns the mascots, the shared geometry, the camera, and the
//! multi-body motion simulator of the swarm variant. The front-ends call
//! `advance` once per animation frame and then hand the scene to their
//! renderer.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;

use crate::camera::Camera;
use crate::config::{ConfigError, WidgetConfig};
use crate::constants::{
    BOB_AMPLITUDE, BODY_RADIUS, BODY_SUBDIVISIONS, DRIFT_AMPLITUDE, DRIFT_X_RATE, MOUTH_RADIUS,
    MOUTH_TUBE,
};
use crate::geometry::{self, MeshData};
use crate::input::ViewportState;
use crate::mascot::Mascot;

/// Immutable geometry shared read-only by every mascot. The unit eye
/// sphere is reused for both sclera and pupil via the model scale.
#[derive(Clone)]
pub struct SceneGeometry {
    pub body: Arc<MeshData>,
    pub eye: Arc<MeshData>,
    pub mouth: Arc<MeshData>,
}

impl SceneGeometry {
    fn build() -> Self {
        Self {
            body: Arc::new(geometry::icosphere(BODY_RADIUS, BODY_SUBDIVISIONS)),
            eye: Arc::new(geometry::uv_sphere(1.0, 24, 16)),
            mouth: Arc::new(geometry::half_ring(MOUTH_RADIUS, MOUTH_TUBE, 24, 8)),
        }
    }
}

/// Bounce box and swap threshold of the motion simulator.
#[derive(Clone, Copy, Debug)]
pub struct SimParams {
    pub bounds: Vec2,
    pub swap_distance: f32,
}

/// Draw one per-axis velocity: magnitude uniform in `[lo, hi]`, independent
/// random sign per axis.
pub fn draw_velocity<R: Rng>(rng: &mut R, speed_range: (f32, f32)) -> Vec2 {
    let (lo, hi) = speed_range;
    let x = rng.gen_range(lo..=hi) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let y = rng.gen_range(lo..=hi) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    Vec2::new(x, y)
}

/// Starting positions: centered for the hero, spread for the swarm.
fn home_positions(count: usize) -> Vec<Vec3> {
    match count {
        1 => vec![Vec3::ZERO],
        _ => vec![
            Vec3::new(-2.4, 0.3, 0.0),
            Vec3::new(2.4, -0.2, 0.0),
            Vec3::new(0.0, 0.25, 0.0),
        ],
    }
}

pub struct MascotScene {
    pub mascots: SmallVec<[Mascot; 3]>,
    pub geometry: SceneGeometry,
    pub camera: Camera,
    pub viewport: ViewportState,
    pub config: WidgetConfig,
    sim: Option<SimParams>,
    elapsed: f32,
    palette_accum: f32,
    rng: StdRng,
}

impl MascotScene {
    /// Build the scene graph once at mount. The seed drives initial
    /// velocities and every later palette draw, so runs are reproducible.
    pub fn new(config: WidgetConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let geometry = SceneGeometry::build();

        let mut mascots: SmallVec<[Mascot; 3]> = SmallVec::new();
        for (i, home) in home_positions(config.mascot_count)
            .into_iter()
            .take(config.mascot_count)
            .enumerate()
        {
            let palette = config.palettes[i % config.palettes.len()];
            let mut m = Mascot::new(i, home, palette, &config);
            if config.mascot_count > 1 {
                m.velocity = draw_velocity(&mut rng, config.speed_range);
            }
            mascots.push(m);
        }

        let sim = (config.mascot_count > 1).then(|| SimParams {
            bounds: config.bounds,
            swap_distance: config.swap_distance,
        });

        log::info!(
            "[scene] built {} mascot(s), sim={}, {} palettes",
            mascots.len(),
            sim.is_some(),
            config.palettes.len()
        );

        Ok(Self {
            mascots,
            geometry,
            camera: Camera::widget_default(config.fov_degrees, 1.0),
            viewport: ViewportState::new(1.0, 1.0),
            config,
            sim,
            elapsed: 0.0,
            palette_accum: 0.0,
            rng,
        })
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Propagate a new output size to the camera aspect and every body's
    /// resolution uniform.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.camera.set_aspect(self.viewport.aspect());
        for m in &mut self.mascots {
            m.uniforms.set_resolution(self.viewport.resolution());
        }
    }

    /// One animation tick: advance time, update every mascot, move bodies
    /// (bob or simulation), and run the palette clock.
    pub fn advance(&mut self, dt: f32, pointer: Vec2, scroll: f32) {
        self.elapsed += dt.max(0.0);
        let t = self.elapsed;

        for m in &mut self.mascots {
            m.update(t, pointer, scroll, &self.config);
        }

        match self.sim {
            Some(params) => {
                for m in &mut self.mascots {
                    // gentle ambient drift on top of the velocity integration
                    m.position.x += (t * DRIFT_X_RATE + m.position.y).sin() * DRIFT_AMPLITUDE;
                    m.position.y += (t + m.position.x).sin() * DRIFT_AMPLITUDE;
                }
                Self::step_simulation(&mut self.mascots, &params);
            }
            None => {
                for m in &mut self.mascots {
                    m.position.y = m.home.y + t.sin() * BOB_AMPLITUDE;
                }
            }
        }

        self.palette_accum += dt.max(0.0);
        while self.palette_accum >= self.config.palette_period_sec {
            self.palette_accum -= self.config.palette_period_sec;
            self.rotate_palettes();
        }
    }

    /// One simulator tick over a slice of mascots: integrate velocities,
    /// hard-reflect at the bounce box, then swap velocities wholesale for
    /// any pair closer than the threshold. A body may sit outside the box
    /// for a frame; there is deliberately no clamp back inside.
    pub fn step_simulation(mascots: &mut [Mascot], params: &SimParams) {
        for m in mascots.iter_mut() {
            m.position.x += m.velocity.x;
            m.position.y += m.velocity.y;

            if m.position.x > params.bounds.x || m.position.x < -params.bounds.x {
                m.velocity.x = -m.velocity.x;
            }
            if m.position.y > params.bounds.y || m.position.y < -params.bounds.y {
                m.velocity.y = -m.velocity.y;
            }
        }

        // Cheap stand-in for collision response: exact exchange, no blending.
        for i in 0..mascots.len() {
            for j in (i + 1)..mascots.len() {
                let dist = mascots[i].position.distance(mascots[j].position);
                if dist < params.swap_distance {
                    let vi = mascots[i].velocity;
                    mascots[i].velocity = mascots[j].velocity;
                    mascots[j].velocity = vi;
                }
            }
        }
    }

    /// Reassign palettes from the configured list: one random base index,
    /// offset by body index so simultaneous bodies show related hues.
    /// Exposed for the external click trigger as well as the timer.
    pub fn trigger_palette_shift(&mut self) {
        self.rotate_palettes();
    }

    fn rotate_palettes(&mut self) {
        let n = self.config.palettes.len();
        let base = self.rng.gen_range(0..n);
        for (i, m) in self.mascots.iter_mut().enumerate() {
            m.apply_palette(self.config.palettes[(base + i) % n]);
        }
        log::debug!("[palette] rotated to base index {}", base);
    }
}
