use anyhow::Context;
use bevy::prelude::*;
use spark_core::SiteConfig;
use spark_render::plugin::SparkRenderPlugin;
use spark_sim::pipeline::ParticleFieldPlugin;

fn main() -> anyhow::Result<()> {
    let site = SiteConfig::load_default().context("failed to load site config")?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tech Fest".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.02, 0.01, 0.06)))
        .add_plugins(ParticleFieldPlugin {
            config: site.particles.clone(),
        })
        .add_plugins(SparkRenderPlugin { site })
        .run();

    Ok(())
}
