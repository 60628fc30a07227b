use bevy::prelude::*;
use spark_core::{countdown::festival_date, EventCatalog, SiteConfig};
use spark_sim::pipeline::FieldSet;
use spark_sim::ParticleField;
use spark_storage::{FileStore, RegistrationForm};
use std::time::SystemTime;

use super::camera;
use super::canvas;
use super::controls;
use super::hud::{self, Catalog, FestClock};
use super::registration::{self, RegisterForEvent, Registrations};
use super::toast::{self, Notify};

/// Everything drawn on top of and around the particle field
pub struct SparkRenderPlugin {
    pub site: SiteConfig,
}

impl Plugin for SparkRenderPlugin {
    fn build(&self, app: &mut App) {
        let target = festival_date(SystemTime::now(), self.site.fest_offset_days);
        let store = FileStore::new(self.site.store_path.clone(), self.site.store_read_only);
        if store.path().is_none() {
            warn!("No registration store configured; registrations will fail");
        }

        app.insert_resource(Catalog(EventCatalog::festival()))
            .insert_resource(FestClock::new(target))
            .insert_resource(Registrations {
                store,
                attendee: RegistrationForm::from(&self.site.attendee),
            })
            .add_event::<Notify>()
            .add_event::<RegisterForEvent>()
            .add_systems(
                Startup,
                (camera::spawn_camera, hud::spawn_hud, toast::spawn_toast_stack),
            )
            .add_systems(
                Update,
                canvas::draw_particle_field
                    .in_set(FieldSet::Draw)
                    .run_if(resource_exists::<ParticleField>),
            )
            .add_systems(
                Update,
                (
                    controls::field_controls,
                    hud::update_countdown,
                    registration::registration_keys,
                    registration::handle_registrations.after(registration::registration_keys),
                    toast::show_toasts.after(registration::handle_registrations),
                    toast::expire_toasts,
                ),
            );
    }
}
