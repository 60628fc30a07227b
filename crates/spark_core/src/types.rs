use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::TIME_STEP;

/// Solid sRGB color; alpha is chosen per draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the short form `#rgb`
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError(s.to_string()))?;
        // from_str_radix would also accept a leading '+'
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| ColorParseError(s.to_string()));

        match hex.len() {
            6 => Ok(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => {
                // #abc == #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            _ => Err(ColorParseError(s.to_string())),
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}, expected #rrggbb", self.0)
    }
}

impl std::error::Error for ColorParseError {}

/// One point of the field.
///
/// Motion is expressed relative to `anchor`: the drawn position is
/// `anchor + oscillation + velocity`, so a particle never drifts away for good.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Fixed reference point chosen at creation
    pub anchor: [f32; 2],
    /// Drawn position, recomputed every frame
    pub position: [f32; 2],
    /// Accumulated pointer impulse, decayed by friction
    pub velocity: [f32; 2],
    pub radius: f32,
    /// Oscillation phase offset in [0, 2π)
    pub phase: f32,
    pub amplitude: f32,
    /// Oscillation frequency
    pub speed: f32,
}

impl Particle {
    /// A particle resting on its anchor with no oscillation
    pub fn at_rest(anchor: [f32; 2], radius: f32) -> Self {
        Self {
            anchor,
            position: anchor,
            velocity: [0.0, 0.0],
            radius,
            phase: 0.0,
            amplitude: 0.0,
            speed: 0.0,
        }
    }
}

/// Pointer position in surface-local coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub position: [f32; 2],
    /// Set on movement, cleared when the pointer leaves the tracked region
    pub active: bool,
}

/// Drawing surface dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Logical width used for layout and all simulation math
    pub width: f32,
    pub height: f32,
    /// Device pixels per logical pixel
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
        }
    }

    /// A surface that has not been laid out yet cannot hold particles
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Backing store size in physical pixels
    pub fn physical(&self) -> [u32; 2] {
        [
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        ]
    }

    pub fn contains(&self, p: [f32; 2]) -> bool {
        (0.0..=self.width).contains(&p[0]) && (0.0..=self.height).contains(&p[1])
    }
}

/// Frame-counted clock; advances by a fixed step, never by wall time
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    pub elapsed: f32,
    pub frames: u64,
}

impl SimClock {
    pub fn advance(&mut self) {
        self.elapsed += TIME_STEP;
        self.frames += 1;
    }
}
