use spark_core::{Rgb, SurfaceSize};

/// Color plus 8-bit alpha for a single draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: u8,
}

impl Paint {
    pub fn opaque(color: Rgb) -> Self {
        Self { color, alpha: 255 }
    }

    /// Opacity in [0, 1] quantized down to 8 bits
    pub fn with_opacity(color: Rgb, opacity: f32) -> Self {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).floor() as u8;
        Self { color, alpha }
    }
}

/// 2D drawing target in logical pixels, origin top-left, y down
pub trait Canvas {
    /// Erase the previous frame
    fn clear(&mut self, surface: &SurfaceSize);
    fn fill_circle(&mut self, center: [f32; 2], radius: f32, paint: Paint);
    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, paint: Paint);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: [f32; 2],
        radius: f32,
        paint: Paint,
    },
    Line {
        from: [f32; 2],
        to: [f32; 2],
        width: f32,
        paint: Paint,
    },
}

/// Keeps every call of the current frame; `clear` starts a new frame
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
    pub frames: u64,
}

impl RecordingCanvas {
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Lines with one end exactly at `point`
    pub fn lines_touching(&self, point: [f32; 2]) -> usize {
        self.lines()
            .filter(|c| match c {
                DrawCommand::Line { from, to, .. } => *from == point || *to == point,
                _ => false,
            })
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, _surface: &SurfaceSize) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn fill_circle(&mut self, center: [f32; 2], radius: f32, paint: Paint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint,
        });
    }

    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, paint: Paint) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            paint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_quantization() {
        assert_eq!(Paint::with_opacity(Rgb::WHITE, 1.0).alpha, 255);
        assert_eq!(Paint::with_opacity(Rgb::WHITE, 0.5).alpha, 127);
        assert_eq!(Paint::with_opacity(Rgb::WHITE, -2.0).alpha, 0);
        assert_eq!(Paint::with_opacity(Rgb::WHITE, 7.0).alpha, 255);
    }

    #[test]
    fn test_clear_starts_new_frame() {
        let mut canvas = RecordingCanvas::default();
        let surface = SurfaceSize::new(10.0, 10.0, 1.0);
        canvas.clear(&surface);
        canvas.fill_circle([1.0, 1.0], 2.0, Paint::opaque(Rgb::WHITE));
        canvas.stroke_line([1.0, 1.0], [2.0, 2.0], 1.0, Paint::opaque(Rgb::WHITE));
        assert_eq!(canvas.commands.len(), 3);
        canvas.clear(&surface);
        assert_eq!(canvas.commands, vec![DrawCommand::Clear]);
        assert_eq!(canvas.frames, 2);
    }
}
