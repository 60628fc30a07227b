use bevy::prelude::*;
use spark_core::TOAST_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Request to show a message in the top-right corner
#[derive(Event, Debug, Clone)]
pub struct Notify {
    pub kind: ToastKind,
    pub message: String,
}

impl Notify {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// A visible toast; despawned when its timer runs out
#[derive(Component)]
pub struct Toast {
    pub timer: Timer,
}

/// Column that toasts are stacked into
#[derive(Component)]
pub struct ToastStack;

pub fn spawn_toast_stack(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            right: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            max_width: Val::Px(420.0),
            ..default()
        },
        ToastStack,
    ));
}

fn toast_colors(kind: ToastKind) -> (Color, Color) {
    match kind {
        ToastKind::Success => (Color::srgba(0.05, 0.35, 0.15, 0.92), Color::WHITE),
        ToastKind::Error => (Color::srgba(0.45, 0.05, 0.08, 0.92), Color::WHITE),
    }
}

pub fn show_toasts(
    mut commands: Commands,
    mut events: EventReader<Notify>,
    stack: Query<Entity, With<ToastStack>>,
) {
    let Ok(stack) = stack.get_single() else {
        // Nowhere to show them; drop quietly
        events.clear();
        return;
    };
    for ev in events.read() {
        let (background, foreground) = toast_colors(ev.kind);
        commands.entity(stack).with_children(|parent| {
            parent.spawn((
                Text::new(ev.message.clone()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(foreground),
                Node {
                    padding: UiRect::all(Val::Px(12.0)),
                    ..default()
                },
                BackgroundColor(background),
                Toast {
                    timer: Timer::from_seconds(TOAST_SECONDS, TimerMode::Once),
                },
            ));
        });
    }
}

pub fn expire_toasts(
    mut commands: Commands,
    time: Res<Time>,
    mut toasts: Query<(Entity, &mut Toast)>,
) {
    for (entity, mut toast) in &mut toasts {
        if toast.timer.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<Notify>()
            .add_systems(Startup, spawn_toast_stack)
            .add_systems(Update, (show_toasts, expire_toasts).chain());
        app
    }

    fn toast_count(app: &mut App) -> usize {
        app.world_mut().query::<&Toast>().iter(app.world()).count()
    }

    #[test]
    fn test_notify_spawns_toast() {
        let mut app = app();
        app.update();
        app.world_mut().send_event(Notify::success("Saved"));
        app.world_mut().send_event(Notify::error("Nope"));
        app.update();
        assert_eq!(toast_count(&mut app), 2);
    }

    #[test]
    fn test_toast_expires() {
        let mut app = app();
        app.update();
        app.world_mut().send_event(Notify::success("Saved"));
        app.update();
        assert_eq!(toast_count(&mut app), 1);

        for mut toast in app.world_mut().query::<&mut Toast>().iter_mut(app.world_mut()) {
            toast.timer.tick(Duration::from_secs_f32(TOAST_SECONDS));
        }
        app.update();
        assert_eq!(toast_count(&mut app), 0);
    }
}
