use rand::Rng;
use spark_core::constants::{AMPLITUDE_RANGE, INITIAL_VELOCITY_RANGE, RADIUS_RANGE, SPEED_RANGE};
use spark_core::{Particle, SurfaceSize};

/// Generate a fresh particle set spread uniformly over the surface.
///
/// Returns an empty set for an unmeasured surface.
pub fn generate_field(count: usize, surface: &SurfaceSize, rng: &mut impl Rng) -> Vec<Particle> {
    if !surface.is_measured() {
        return Vec::new();
    }
    (0..count).map(|_| create_particle(surface, rng)).collect()
}

fn create_particle(surface: &SurfaceSize, rng: &mut impl Rng) -> Particle {
    let anchor = [
        rng.gen_range(0.0..surface.width),
        rng.gen_range(0.0..surface.height),
    ];

    // Starts with a small impulse so the field is not static on frame one
    let velocity = [
        rng.gen_range(INITIAL_VELOCITY_RANGE.0..INITIAL_VELOCITY_RANGE.1),
        rng.gen_range(INITIAL_VELOCITY_RANGE.0..INITIAL_VELOCITY_RANGE.1),
    ];

    Particle {
        anchor,
        position: anchor,
        velocity,
        radius: rng.gen_range(RADIUS_RANGE.0..RADIUS_RANGE.1),
        phase: rng.gen_range(0.0..std::f32::consts::TAU),
        amplitude: rng.gen_range(AMPLITUDE_RANGE.0..AMPLITUDE_RANGE.1),
        speed: rng.gen_range(SPEED_RANGE.0..SPEED_RANGE.1),
    }
}
