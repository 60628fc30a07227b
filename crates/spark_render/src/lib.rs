pub mod camera;
pub mod canvas;
pub mod controls;
pub mod hud;
pub mod plugin;
pub mod registration;
pub mod toast;
