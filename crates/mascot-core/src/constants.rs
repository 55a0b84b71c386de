//! Rig, shader, and simulation tuning constants.

// Vertex wobble (breathing deformation)
pub const WOBBLE_AMPLITUDE: f32 = 0.05;
pub const WOBBLE_FREQUENCY: f32 = 4.0;

// Halftone banding thresholds and per-band dot radii
pub const BRIGHT_BAND_MIN: f32 = 0.8;
pub const MID_BAND_MIN: f32 = 0.4;
pub const BRIGHT_DOT_RADIUS: f32 = 0.6;
pub const MID_DOT_RADIUS: f32 = 0.8;

// Dot density: cells along the reference height. The halftone grid is
// anchored to REF_HEIGHT pixels so dot pitch in screen pixels does not
// change when the viewport is resized.
pub const DEFAULT_DOT_SCALE: f32 = 60.0;
pub const HALFTONE_REF_HEIGHT: f32 = 1080.0;

// Body mesh
pub const BODY_RADIUS: f32 = 1.8;
pub const BODY_SUBDIVISIONS: u32 = 4;

// Eye rig, in body space
pub const EYE_OFFSET_X: f32 = 0.6;
pub const EYE_OFFSET_Y: f32 = 0.5;
pub const EYE_OFFSET_Z: f32 = 1.4;
pub const SCLERA_RADIUS: f32 = 0.3;
pub const PUPIL_RADIUS: f32 = 0.12;
pub const PUPIL_FORWARD: f32 = 0.25;
pub const PUPIL_TRACK_GAIN: f32 = 0.25;
pub const PUPIL_OFFSET_MAX: f32 = 0.18;

// Shared look target derived from the pointer
pub const LOOK_TARGET_SPREAD: f32 = 5.0;
pub const LOOK_TARGET_DEPTH: f32 = 10.0;
pub const CROSS_EYE_BIAS: f32 = 0.06; // radians of deliberate comedic squint
pub const CROSS_EYE_RATE: f32 = 0.35;

// Mouth (half ring below the eyes)
pub const MOUTH_RADIUS: f32 = 0.5;
pub const MOUTH_TUBE: f32 = 0.07;
pub const MOUTH_OFFSET_Y: f32 = -0.55;
pub const MOUTH_FORWARD: f32 = 1.5;
pub const MOUTH_OPEN_MIN: f32 = 0.15;
pub const MOUTH_LIFT: f32 = 0.12;

// Cursor-follow tilt and idle motion. These are per-tick gains, tuned for
// a ~60 Hz cadence.
pub const TILT_GAIN: f32 = 0.5;
pub const DEFAULT_EASING: f32 = 0.05;
pub const DEFAULT_IDLE_SPIN: f32 = 0.01; // rad per tick
pub const BOB_AMPLITUDE: f32 = 0.22;
pub const DRIFT_AMPLITUDE: f32 = 0.002;
pub const DRIFT_X_RATE: f32 = 0.2;

// Multi-body simulation
pub const DEFAULT_BOUNDS_X: f32 = 3.5;
pub const DEFAULT_BOUNDS_Y: f32 = 2.6;
pub const DEFAULT_SWAP_DISTANCE: f32 = 3.2; // approximate combined visual radius
pub const SPEED_MIN: f32 = 0.006; // units per tick
pub const SPEED_MAX: f32 = 0.018;

// Palette rotation
pub const DEFAULT_PALETTE_PERIOD_SEC: f32 = 7.0;

// Scroll-driven choreography
pub const SCROLL_SCALE_BASE: f32 = 0.9;
pub const SCROLL_SCALE_FADE: f32 = 0.08;

// Camera
pub const CAMERA_Z: f32 = 6.5;
pub const DEFAULT_FOV_DEGREES: f32 = 75.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

// Base body scale before scroll fade
pub const BASE_SCALE: f32 = 1.0;

// Lighting
pub const LIGHT_DIR: [f32; 3] = [1.0, 1.0, 1.0]; // normalized in uniforms
