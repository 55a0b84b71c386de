//! The mascot rig: deformable body, eye pair, optional mouth.
//!
//! A mascot owns its shader parameter block exclusively; geometry is shared
//! read-only across mascots (see `scene::SceneGeometry`). All gains here
//! are per-tick, tuned for a ~60 Hz animation cadence.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::config::WidgetConfig;
use crate::constants::{
    BASE_SCALE, CROSS_EYE_BIAS, CROSS_EYE_RATE, EYE_OFFSET_X, EYE_OFFSET_Y, EYE_OFFSET_Z,
    LOOK_TARGET_DEPTH, LOOK_TARGET_SPREAD, MOUTH_FORWARD, MOUTH_LIFT, MOUTH_OFFSET_Y,
    MOUTH_OPEN_MIN, PUPIL_FORWARD, PUPIL_OFFSET_MAX, PUPIL_RADIUS, PUPIL_TRACK_GAIN,
    SCLERA_RADIUS, SCROLL_SCALE_BASE, SCROLL_SCALE_FADE, TILT_GAIN,
};
use crate::palette::Palette;
use crate::shading::BodyUniforms;

/// Shared view-space point both eyes orient toward, derived from the
/// normalized pointer at a fixed depth in front of the scene.
#[inline]
pub fn look_target(pointer: Vec2) -> Vec3 {
    Vec3::new(
        pointer.x * LOOK_TARGET_SPREAD,
        pointer.y * LOOK_TARGET_SPREAD,
        LOOK_TARGET_DEPTH,
    )
}

/// Keep the pupil inside the sclera.
#[inline]
pub fn clamp_pupil_offset(offset: Vec2) -> Vec2 {
    offset.clamp(
        Vec2::splat(-PUPIL_OFFSET_MAX),
        Vec2::splat(PUPIL_OFFSET_MAX),
    )
}

/// One sclera + pupil pair attached to the body at a fixed offset.
///
/// The rig owns no animation state beyond its aim: orientation is
/// recomputed every frame from the shared look target.
#[derive(Clone, Debug)]
pub struct EyeRig {
    /// Attach point in body space.
    pub offset: Vec3,
    /// World-space aim, recomputed each frame.
    pub rotation: Quat,
    /// Lateral pupil offset in eye space, clamped to the sclera.
    pub pupil_offset: Vec2,
    /// World position after the last `aim`.
    pub world: Vec3,
    bias_sign: f32,
}

impl EyeRig {
    fn new(offset: Vec3, bias_sign: f32) -> Self {
        Self {
            offset,
            rotation: Quat::IDENTITY,
            pupil_offset: Vec2::ZERO,
            world: offset,
            bias_sign,
        }
    }

    /// Orient toward `target` from the rig's current world position, with a
    /// slowly oscillating per-eye squint bias (opposite sign per eye).
    pub fn aim(&mut self, body_model: &Mat4, target: Vec3, pointer: Vec2, time: f32) {
        self.world = body_model.transform_point3(self.offset);
        let dir = (target - self.world).normalize_or_zero();
        let base = if dir.length_squared() > 0.0 {
            Quat::from_rotation_arc(Vec3::Z, dir)
        } else {
            Quat::IDENTITY
        };
        let bias = CROSS_EYE_BIAS * (time * CROSS_EYE_RATE).sin() * self.bias_sign;
        self.rotation = Quat::from_rotation_y(bias) * base;
        self.pupil_offset = clamp_pupil_offset(pointer * PUPIL_TRACK_GAIN);
    }

    pub fn sclera_model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(SCLERA_RADIUS),
            self.rotation,
            self.world,
        )
    }

    pub fn pupil_model(&self) -> Mat4 {
        let local = Vec3::new(self.pupil_offset.x, self.pupil_offset.y, PUPIL_FORWARD);
        Mat4::from_scale_rotation_translation(
            Vec3::splat(PUPIL_RADIUS),
            self.rotation,
            self.world + self.rotation * local,
        )
    }
}

/// Reactive half-ring mouth; mood follows pointer height.
#[derive(Clone, Debug, Default)]
pub struct Mouth {
    /// 0 = pointer at the bottom of the viewport, 1 = at the top.
    pub mood: f32,
}

impl Mouth {
    /// Map pointer Y in \[-1, 1\] to mood in \[0, 1\], clamped before the
    /// interpolation downstream.
    pub fn update(&mut self, pointer_y: f32) {
        self.mood = ((pointer_y + 1.0) * 0.5).clamp(0.0, 1.0);
    }

    /// Vertical opening scale, between nearly-closed and fully open.
    pub fn open_amount(&self) -> f32 {
        MOUTH_OPEN_MIN + (1.0 - MOUTH_OPEN_MIN) * self.mood
    }

    /// Vertical offset added to the resting position.
    pub fn lift(&self) -> f32 {
        MOUTH_LIFT * self.mood
    }

    /// Faces the camera: translated with the body but not rotated by it.
    pub fn model(&self, body_position: Vec3, body_scale: f32) -> Mat4 {
        let pos = body_position
            + Vec3::new(
                0.0,
                (MOUTH_OFFSET_Y + self.lift()) * body_scale,
                MOUTH_FORWARD * body_scale,
            );
        Mat4::from_scale_rotation_translation(
            Vec3::new(body_scale, body_scale * self.open_amount(), body_scale),
            Quat::IDENTITY,
            pos,
        )
    }
}

/// One animated body with its exclusive shader parameters and attachments.
#[derive(Clone, Debug)]
pub struct Mascot {
    /// Rest position; bob and the simulator move `position` around it.
    pub home: Vec3,
    pub position: Vec3,
    /// Euler rotation (radians), eased toward the pointer tilt.
    pub rotation: Vec3,
    pub scale: f32,
    /// Used only in multi-body mode, units per tick.
    pub velocity: Vec2,
    pub palette: Palette,
    pub uniforms: BodyUniforms,
    pub eyes: [EyeRig; 2],
    pub mouth: Option<Mouth>,
    /// Cached model matrix from the last update.
    pub model: Mat4,
    /// Scroll spin direction, alternating by body index.
    spin_sign: f32,
}

impl Mascot {
    pub fn new(index: usize, home: Vec3, palette: Palette, config: &WidgetConfig) -> Self {
        let uniforms = BodyUniforms::new(&palette, config.dot_scale, [1.0, 1.0]);
        let left = EyeRig::new(Vec3::new(-EYE_OFFSET_X, EYE_OFFSET_Y, EYE_OFFSET_Z), 1.0);
        let right = EyeRig::new(Vec3::new(EYE_OFFSET_X, EYE_OFFSET_Y, EYE_OFFSET_Z), -1.0);
        Self {
            home,
            position: home,
            rotation: Vec3::ZERO,
            scale: BASE_SCALE,
            velocity: Vec2::ZERO,
            palette,
            uniforms,
            eyes: [left, right],
            mouth: config.mouth.then(Mouth::default),
            model: Mat4::IDENTITY,
            spin_sign: if index % 2 == 0 { 1.0 } else { -1.0 },
        }
    }

    /// Per-tick update: shader time, cursor-follow tilt with exponential
    /// easing, constant idle spin, scroll choreography, eye aim, mouth mood.
    /// Translation (bob or simulation) is owned by the scene.
    pub fn update(&mut self, time: f32, pointer: Vec2, scroll: f32, config: &WidgetConfig) {
        self.uniforms.time = time;

        let scroll_yaw = self.spin_sign * scroll * std::f32::consts::TAU;
        let target_x = pointer.y * TILT_GAIN;
        let target_y = pointer.x * TILT_GAIN + scroll_yaw;
        self.rotation.x += (target_x - self.rotation.x) * config.easing;
        self.rotation.y += (target_y - self.rotation.y) * config.easing;
        self.rotation.z += config.idle_spin;

        let scale_target = if scroll > 0.0 {
            SCROLL_SCALE_BASE - scroll * SCROLL_SCALE_FADE
        } else {
            BASE_SCALE
        };
        self.scale += (scale_target - self.scale) * config.easing;

        self.model = self.model_matrix();

        let target = look_target(pointer);
        for eye in &mut self.eyes {
            eye.aim(&self.model, target, pointer, time);
        }
        if let Some(mouth) = &mut self.mouth {
            mouth.update(pointer.y);
        }
        self.uniforms.model = self.model.to_cols_array_2d();
    }

    /// Replace this body's palette. Applying the same palette twice leaves
    /// the color uniforms unchanged.
    pub fn apply_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.uniforms.apply_palette(&palette);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(
                glam::EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            self.position,
        )
    }
}
