use spark_core::constants::{ATTRACTION_GAIN, FRICTION, REST_VELOCITY};
use spark_core::{Particle, SurfaceSize};

/// Euclidean distance between two points; symmetric in its arguments
pub fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Periodic offset around the anchor at clock time `time`
pub fn oscillation_offset(p: &Particle, time: f32) -> [f32; 2] {
    let angle = time * p.speed + p.phase;
    [angle.cos() * p.amplitude, angle.sin() * p.amplitude]
}

/// Pointer attraction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    pub force: f32,
    pub radius: f32,
}

impl Attraction {
    /// Velocity impulse pulling `from` toward `pointer`.
    ///
    /// Zero outside the radius and when the two points coincide (no direction).
    pub fn impulse(&self, from: [f32; 2], pointer: [f32; 2]) -> [f32; 2] {
        let dx = pointer[0] - from[0];
        let dy = pointer[1] - from[1];
        let d = (dx * dx + dy * dy).sqrt();
        if d >= self.radius || d == 0.0 {
            return [0.0, 0.0];
        }
        let falloff = (self.radius - d) / self.radius;
        let k = falloff * self.force * ATTRACTION_GAIN / d;
        [dx * k, dy * k]
    }
}

/// Decay velocity by one frame of friction, snapping tiny components to rest
pub fn apply_friction(velocity: &mut [f32; 2]) {
    for v in velocity.iter_mut() {
        *v *= FRICTION;
        if v.abs() < REST_VELOCITY {
            *v = 0.0;
        }
    }
}

/// Clamp a position into the surface and reflect the velocity of any axis that crossed.
///
/// Returns true if either axis bounced. Applying it to an in-bounds position is a no-op.
pub fn bounce(position: &mut [f32; 2], velocity: &mut [f32; 2], surface: &SurfaceSize) -> bool {
    let x = bounce_axis(&mut position[0], &mut velocity[0], surface.width);
    let y = bounce_axis(&mut position[1], &mut velocity[1], surface.height);
    x || y
}

fn bounce_axis(pos: &mut f32, vel: &mut f32, extent: f32) -> bool {
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = -*vel;
        true
    } else if *pos > extent {
        *pos = extent;
        *vel = -*vel;
        true
    } else {
        false
    }
}
