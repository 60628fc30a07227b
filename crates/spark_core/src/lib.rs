pub mod catalog;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod types;

pub use catalog::*;
pub use config::{AttendeeProfile, ConnectionIndex, ParticlesConfig, SiteConfig};
pub use constants::*;
pub use countdown::Countdown;
pub use types::*;
