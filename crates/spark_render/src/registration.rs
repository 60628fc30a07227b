use bevy::prelude::*;
use spark_storage::{submit, FileStore, RegistrationForm, SUCCESS_MESSAGE};
use std::time::SystemTime;

use super::hud::Catalog;
use super::toast::Notify;

/// Store and the attendee details the shortcut submits with
#[derive(Resource)]
pub struct Registrations {
    pub store: FileStore,
    pub attendee: RegistrationForm,
}

/// Register the attendee for the event in a 1-based catalog slot
#[derive(Event, Debug, Clone, Copy)]
pub struct RegisterForEvent {
    pub slot: usize,
}

const SLOT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

pub fn registration_keys(keys: Res<ButtonInput<KeyCode>>, mut writer: EventWriter<RegisterForEvent>) {
    for (i, key) in SLOT_KEYS.iter().enumerate() {
        if keys.just_pressed(*key) {
            writer.send(RegisterForEvent { slot: i + 1 });
        }
    }
}

pub fn handle_registrations(
    mut events: EventReader<RegisterForEvent>,
    catalog: Res<Catalog>,
    mut registrations: ResMut<Registrations>,
    mut notify: EventWriter<Notify>,
) {
    let Registrations { store, attendee } = &mut *registrations;
    for ev in events.read() {
        let Some(event) = catalog.0.by_slot(ev.slot) else {
            debug!("No event in slot {}", ev.slot);
            continue;
        };
        match submit(store, attendee, &event.title, SystemTime::now()) {
            Ok(_) => notify.send(Notify::success(SUCCESS_MESSAGE)),
            Err(e) => notify.send(Notify::error(e.user_message())),
        };
    }
}
