use bevy::prelude::*;
use spark_core::{Countdown, EventCatalog};
use std::time::SystemTime;

/// Marker for the countdown line
#[derive(Component)]
pub struct CountdownText;

/// Marker for the programme panel
#[derive(Component)]
pub struct CatalogText;

/// Festival start and the once-per-second refresh timer
#[derive(Resource)]
pub struct FestClock {
    pub target: SystemTime,
    pub timer: Timer,
}

impl FestClock {
    pub fn new(target: SystemTime) -> Self {
        Self {
            target,
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Spawn the hero overlay: title, countdown, programme
pub fn spawn_hud(mut commands: Commands, catalog: Res<Catalog>, clock: Res<FestClock>) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(24.0),
            left: Val::Px(24.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("TECH FEST"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            let left = Countdown::until(clock.target, SystemTime::now());
            parent.spawn((
                Text::new(countdown_line(&left)),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.85)),
                CountdownText,
            ));

            parent.spawn((
                Text::new(catalog_lines(&catalog.0)),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
                CatalogText,
            ));
        });
}

/// Published programme, shared by the HUD and registrations
#[derive(Resource, Clone)]
pub struct Catalog(pub EventCatalog);

fn countdown_line(c: &Countdown) -> String {
    if c.is_over() {
        "The festival is live!".to_string()
    } else {
        format!(
            "{} days  {} hours  {} minutes  {} seconds",
            c.days, c.hours, c.minutes, c.seconds
        )
    }
}

fn catalog_lines(catalog: &EventCatalog) -> String {
    let mut out = String::from("Events\n");
    for (i, e) in catalog.events.iter().enumerate() {
        out.push_str(&format!("[{}] {} - {}\n    {}\n", i + 1, e.title, e.schedule, e.description));
    }
    out.push_str(&format!("\n{}\n", EventCatalog::highlights().join("  |  ")));
    out.push_str(&format!("\nLocation\n    {}\n", EventCatalog::location().join("\n    ")));
    out.push_str(&format!("\nContact Us\n    {}\n", EventCatalog::contact().join("\n    ")));
    out.push_str("\n[1-9] Register  [R] Refresh particles  [Esc] Stop particles");
    out
}

/// Recompute the countdown once per second
pub fn update_countdown(
    time: Res<Time>,
    mut clock: ResMut<FestClock>,
    mut query: Query<&mut Text, With<CountdownText>>,
) {
    if !clock.timer.tick(time.delta()).just_finished() {
        return;
    }
    let left = Countdown::until(clock.target, SystemTime::now());
    if let Ok(mut text) = query.get_single_mut() {
        **text = countdown_line(&left);
    }
}
