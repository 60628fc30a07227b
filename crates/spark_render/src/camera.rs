use bevy::prelude::*;

/// Marker for the camera the background is drawn through
#[derive(Component)]
pub struct BackgroundCamera;

/// Orthographic 2D camera centred on the window; 1 world unit = 1 logical pixel
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, IsDefaultUiCamera, BackgroundCamera));
    info!("Background camera spawned");
}
