use bevy::math::Isometry2d;
use bevy::prelude::*;
use spark_core::SurfaceSize;
use spark_sim::{Canvas, Paint, ParticleField};

/// Spacing between the concentric rings that fill a particle
const FILL_STEP: f32 = 0.75;

/// Canvas over Bevy's immediate-mode gizmos.
///
/// Field coordinates (origin top-left, y down) are mapped onto the 2D camera's
/// world space (origin centre, y up). Gizmo lines share one width, so the
/// per-line width is carried by alpha alone.
pub struct GizmoCanvas<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    half: Vec2,
}

impl<'a, 'w, 's> GizmoCanvas<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>, surface: SurfaceSize) -> Self {
        Self {
            gizmos,
            half: Vec2::new(surface.width, surface.height) * 0.5,
        }
    }

    fn to_world(&self, p: [f32; 2]) -> Vec2 {
        field_to_world(p, self.half)
    }
}

pub fn field_to_world(p: [f32; 2], half: Vec2) -> Vec2 {
    Vec2::new(p[0] - half.x, half.y - p[1])
}

fn paint_color(paint: Paint) -> Color {
    Color::srgba_u8(paint.color.r, paint.color.g, paint.color.b, paint.alpha)
}

impl Canvas for GizmoCanvas<'_, '_, '_> {
    fn clear(&mut self, _surface: &SurfaceSize) {
        // Gizmos only live for the frame they are drawn in
    }

    fn fill_circle(&mut self, center: [f32; 2], radius: f32, paint: Paint) {
        let c = self.to_world(center);
        let color = paint_color(paint);
        let mut r = radius;
        while r > 0.0 {
            self.gizmos.circle_2d(Isometry2d::from_translation(c), r, color);
            r -= FILL_STEP;
        }
    }

    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], _width: f32, paint: Paint) {
        let (a, b) = (self.to_world(from), self.to_world(to));
        self.gizmos.line_2d(a, b, paint_color(paint));
    }
}

/// Render the field's current frame through gizmos
pub fn draw_particle_field(mut field: ResMut<ParticleField>, mut gizmos: Gizmos) {
    let surface = field.surface();
    let mut canvas = GizmoCanvas::new(&mut gizmos, surface);
    field.render(&mut canvas);
}
