// Tuning constants for the particle field.
// All distances are logical pixels; all rates are per frame.

/// Clock increment per frame (~one frame at 60 Hz), independent of wall time
pub const TIME_STEP: f32 = 0.016;

/// Fraction of velocity retained after each frame
pub const FRICTION: f32 = 0.9;

/// Velocity components smaller than this are snapped to rest
pub const REST_VELOCITY: f32 = 1e-4;

/// Scale applied to the pointer attraction before it is added to velocity
pub const ATTRACTION_GAIN: f32 = 0.02;

/// Particles closer than this are joined by a line
pub const CONNECTION_DISTANCE: f32 = 150.0;

/// Alpha multiplier for particle-to-particle lines (clamped to 1.0)
pub const CONNECTION_OPACITY_GAIN: f32 = 1.5;

/// Upper bound for particle-to-particle line width
pub const CONNECTION_MAX_WIDTH: f32 = 1.5;

/// Alpha multiplier for particle-to-pointer lines
pub const POINTER_OPACITY_GAIN: f32 = 0.8;

/// Width multiplier shared by both kinds of line
pub const LINE_WIDTH_GAIN: f32 = 2.0;

/// Hard cap on particles per epoch; the pair pass is quadratic in this number
pub const MAX_PARTICLES: u32 = 2_000;

// Generation ranges (half-open)
pub const INITIAL_VELOCITY_RANGE: (f32, f32) = (-1.0, 1.0);
pub const RADIUS_RANGE: (f32, f32) = (1.0, 2.5);
pub const AMPLITUDE_RANGE: (f32, f32) = (15.0, 35.0);
pub const SPEED_RANGE: (f32, f32) = (0.01, 0.21);

/// How long a toast stays on screen, in seconds
pub const TOAST_SECONDS: f32 = 5.0;
