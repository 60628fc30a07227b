use bevy::prelude::*;
use spark_sim::pipeline::{RefreshField, UnmountField};

/// [R] regenerates the particles, [Esc] unmounts the background
pub fn field_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut refresh: EventWriter<RefreshField>,
    mut unmount: EventWriter<UnmountField>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        refresh.send(RefreshField);
    }
    if keys.just_pressed(KeyCode::Escape) {
        info!("Unmounting particle background");
        unmount.send(UnmountField);
    }
}
