pub mod canvas;
pub mod field;
pub mod frame_loop;
pub mod pipeline;

pub use canvas::{Canvas, DrawCommand, Paint, RecordingCanvas};
pub use field::ParticleField;
pub use frame_loop::FrameLoop;
