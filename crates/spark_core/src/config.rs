use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::constants::MAX_PARTICLES;
use super::types::Rgb;

/// How the pair pass finds particles within connection distance.
/// Both strategies report exactly the same pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionIndex {
    /// Compare every unordered pair, O(n²)
    #[default]
    AllPairs,
    /// Bucket particles into cells one connection-distance wide
    Grid,
}

/// Particle field configuration, fixed for the lifetime of one mount
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    /// Particles generated per initialization
    pub particle_count: u32,
    /// Accepted for compatibility, no effect on motion
    pub staticity: f32,
    /// Accepted for compatibility, no effect on motion
    pub ease: f32,
    /// Toggling this flag forces a full re-initialization
    pub refresh: bool,
    /// Fill and stroke color, `#rrggbb`
    pub color: String,
    /// Accepted for compatibility, no effect on motion
    pub base_velocity_x: f32,
    /// Accepted for compatibility, no effect on motion
    pub base_velocity_y: f32,
    /// Strength of pointer attraction
    pub mouse_force: f32,
    /// Radius of pointer attraction and pointer lines
    pub mouse_radius: f32,
    /// Random seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub connection_index: ConnectionIndex,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            particle_count: 200,
            staticity: 50.0,
            ease: 50.0,
            refresh: false,
            color: "#ffffff".into(),
            base_velocity_x: 0.0,
            base_velocity_y: 0.0,
            mouse_force: 40.0,
            mouse_radius: 150.0,
            seed: None,
            connection_index: ConnectionIndex::AllPairs,
        }
    }
}

impl ParticlesConfig {
    /// Particle count after applying the hard cap
    pub fn effective_count(&self) -> usize {
        self.particle_count.min(MAX_PARTICLES) as usize
    }

    /// Configured color, or white when the string does not parse
    pub fn resolved_color(&self) -> Rgb {
        Rgb::parse(&self.color).unwrap_or(Rgb::WHITE)
    }

    /// Pointer radius clamped to a usable value (non-finite or negative disables it)
    pub fn effective_mouse_radius(&self) -> f32 {
        if self.mouse_radius.is_finite() && self.mouse_radius > 0.0 {
            self.mouse_radius
        } else {
            0.0
        }
    }

    /// Whether any of the inert tunables differ from their defaults
    pub fn has_inert_overrides(&self) -> bool {
        let d = Self::default();
        self.staticity != d.staticity
            || self.ease != d.ease
            || self.base_velocity_x != d.base_velocity_x
            || self.base_velocity_y != d.base_velocity_y
    }
}

/// Default attendee details used by the keyboard registration shortcut
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendeeProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub university: String,
}

/// Top-level site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub particles: ParticlesConfig,
    /// Festival starts this many days after launch
    pub fest_offset_days: u32,
    /// Registration collection file; `None` leaves the store uninitialized
    pub store_path: Option<PathBuf>,
    /// Read-only stores reject writes with a permission error
    pub store_read_only: bool,
    pub attendee: AttendeeProfile,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            particles: ParticlesConfig::default(),
            fest_offset_days: 30,
            store_path: Some(PathBuf::from("data/registrations.bin")),
            store_read_only: false,
            attendee: AttendeeProfile::default(),
        }
    }
}

impl SiteConfig {
    /// Environment variable that overrides the config file location
    pub const PATH_ENV: &'static str = "SPARK_CONFIG";
    pub const DEFAULT_PATH: &'static str = "spark.json";

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Load from `$SPARK_CONFIG` or `spark.json` in the working directory
    pub fn load_default() -> anyhow::Result<Self> {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_PATH));
        Self::load(&path)
    }
}
