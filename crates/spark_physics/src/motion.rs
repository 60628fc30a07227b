use spark_core::{Particle, SurfaceSize};

use super::forces::{apply_friction, bounce, oscillation_offset, Attraction};

/// Inputs shared by every particle in one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Clock value after this frame's advance
    pub time: f32,
    /// Pointer position when the pointer is active
    pub pointer: Option<[f32; 2]>,
    pub attraction: Attraction,
    pub surface: SurfaceSize,
}

/// Advance one particle by one frame.
///
/// Order is fixed: attraction (measured from last frame's position), position
/// from anchor, friction, then clamp-and-reflect. A particle leaving through
/// an edge therefore ends the frame with its already-damped velocity reversed.
pub fn advance_particle(p: &mut Particle, input: &FrameInput) {
    let offset = oscillation_offset(p, input.time);

    if let Some(pointer) = input.pointer {
        let impulse = input.attraction.impulse(p.position, pointer);
        p.velocity[0] += impulse[0];
        p.velocity[1] += impulse[1];
    }

    p.position = [
        p.anchor[0] + offset[0] + p.velocity[0],
        p.anchor[1] + offset[1] + p.velocity[1],
    ];

    apply_friction(&mut p.velocity);
    bounce(&mut p.position, &mut p.velocity, &input.surface);
}

/// Advance every particle; positions are final for the frame once this returns
pub fn advance_all(particles: &mut [Particle], input: &FrameInput) {
    for p in particles.iter_mut() {
        advance_particle(p, input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn input(pointer: Option<[f32; 2]>) -> FrameInput {
        FrameInput {
            time: 0.016,
            pointer,
            attraction: Attraction {
                force: 40.0,
                radius: 150.0,
            },
            surface: SurfaceSize::new(100.0, 100.0, 1.0),
        }
    }

    #[test]
    fn test_edge_bounce_after_friction() {
        // Anchor on the corner moving left: clamps to 0 and reverses the damped velocity
        let mut p = Particle::at_rest([0.0, 0.0], 1.0);
        p.velocity = [-5.0, 0.0];
        advance_particle(&mut p, &input(None));
        assert_eq!(p.position[0], 0.0);
        assert!((p.velocity[0] - 4.5).abs() < 1e-6, "velocity {:?}", p.velocity);
        assert_eq!(p.velocity[1], 0.0);
    }

    #[test]
    fn test_position_follows_anchor() {
        let mut p = Particle::at_rest([40.0, 60.0], 1.0);
        p.velocity = [2.0, -1.0];
        advance_particle(&mut p, &input(None));
        assert_eq!(p.position, [42.0, 59.0]);
        assert!((p.velocity[0] - 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_pulls_velocity() {
        let mut p = Particle::at_rest([50.0, 50.0], 1.0);
        advance_particle(&mut p, &input(Some([80.0, 50.0])));
        assert!(p.velocity[0] > 0.0);
        assert!(p.position[0] > 50.0);

        // Without the pointer only friction acts
        let before = p.velocity;
        advance_particle(&mut p, &input(None));
        assert!(p.velocity[0] < before[0]);
    }

    #[test]
    fn test_never_leaves_surface() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let surface = SurfaceSize::new(100.0, 100.0, 1.0);
        let mut particles: Vec<Particle> = (0..64)
            .map(|_| {
                let mut p = Particle::at_rest(
                    [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)],
                    1.0,
                );
                p.amplitude = rng.gen_range(15.0..35.0);
                p.speed = rng.gen_range(0.01..0.21);
                p.velocity = [rng.gen_range(-60.0..60.0), rng.gen_range(-60.0..60.0)];
                p
            })
            .collect();

        let mut time = 0.0;
        for frame in 0..600 {
            time += 0.016;
            let pointer = (frame % 3 != 0).then(|| [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)]);
            let input = FrameInput {
                time,
                pointer,
                attraction: Attraction {
                    force: 400.0,
                    radius: 150.0,
                },
                surface,
            };
            advance_all(&mut particles, &input);
            for p in &particles {
                assert!(surface.contains(p.position), "frame {frame}: {:?}", p.position);
            }
        }
    }
}
