use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowEvent, WindowResized};
use spark_core::ParticlesConfig;

use super::field::ParticleField;

/// Configuration the field is mounted with
#[derive(Resource, Clone, Debug)]
pub struct FieldSettings(pub ParticlesConfig);

/// Flip the field's refresh flag, regenerating every particle
#[derive(Event, Debug, Clone, Copy)]
pub struct RefreshField;

/// Tear the field down; no frames run afterwards
#[derive(Event, Debug, Clone, Copy)]
pub struct UnmountField;

/// Ordering of the per-frame work: signals, then update, then drawing
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSet {
    Signals,
    Advance,
    Draw,
}

/// Bevy plugin mounting the particle field on the primary window
pub struct ParticleFieldPlugin {
    pub config: ParticlesConfig,
}

impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(FieldSettings(self.config.clone()))
            .add_event::<RefreshField>()
            .add_event::<UnmountField>()
            .configure_sets(
                Update,
                (FieldSet::Signals, FieldSet::Advance, FieldSet::Draw).chain(),
            )
            .add_systems(Startup, mount_field)
            .add_systems(
                Update,
                (track_resize, track_pointer, handle_refresh, handle_unmount)
                    .chain()
                    .in_set(FieldSet::Signals)
                    .run_if(resource_exists::<ParticleField>),
            )
            .add_systems(
                Update,
                advance_field
                    .in_set(FieldSet::Advance)
                    .run_if(resource_exists::<ParticleField>),
            );
    }
}

/// Create the field and size it to the primary window
fn mount_field(
    mut commands: Commands,
    settings: Res<FieldSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let mut field = ParticleField::mount(settings.0.clone());
    match windows.get_single() {
        Ok(window) => field.init_surface(window.width(), window.height(), window.scale_factor()),
        Err(_) => warn!("No primary window; particle field waits for a resize"),
    }
    commands.insert_resource(field);
}

fn track_resize(
    mut field: ResMut<ParticleField>,
    mut resized: EventReader<WindowResized>,
    windows: Query<&Window>,
) {
    // Only the latest size matters within one frame
    if let Some(ev) = resized.read().last() {
        let scale = windows
            .get(ev.window)
            .map(|w| w.scale_factor())
            .unwrap_or(1.0);
        field.resize(ev.width, ev.height, scale);
    }
}

/// Cursor events applied in arrival order, so a leave followed by a move
/// within one frame leaves the pointer active. The window is the container,
/// so its origin is (0, 0).
fn track_pointer(mut field: ResMut<ParticleField>, mut events: EventReader<WindowEvent>) {
    for ev in events.read() {
        match ev {
            WindowEvent::CursorMoved(moved) => {
                field.pointer_moved(moved.position.to_array(), [0.0, 0.0]);
            }
            WindowEvent::CursorLeft(_) => field.pointer_left(),
            _ => {}
        }
    }
}

fn handle_refresh(mut field: ResMut<ParticleField>, mut events: EventReader<RefreshField>) {
    for _ in events.read() {
        field.refresh();
    }
}

fn handle_unmount(
    mut commands: Commands,
    mut field: ResMut<ParticleField>,
    mut events: EventReader<UnmountField>,
) {
    if events.read().next().is_some() {
        field.teardown();
        commands.remove_resource::<ParticleField>();
    }
}

fn advance_field(mut field: ResMut<ParticleField>) {
    field.advance_frame();
}
