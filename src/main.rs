use bevy::prelude::*;
use platformer_locomotion::plugins::locomotion::LocomotionBundle;
use platformer_locomotion::plugins::{ArenaPlugin, ContactPlugin, IntentPlugin, LocomotionPlugin};
use platformer_locomotion::{MovementConfig, Position};

/// World units are small; zoom the camera in so the arena fills the window
const CAMERA_SCALE: f32 = 1.0 / 32.0;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(LocomotionPlugin {
            config_path: std::env::args().nth(1),
        })
        .add_plugins(IntentPlugin)
        .add_plugins(ContactPlugin)
        .add_plugins(ArenaPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands, config: Res<MovementConfig>) {
    let mut camera = Camera2dBundle::default();
    camera.projection.scale = CAMERA_SCALE;
    camera.transform.translation.y = 5.0;
    commands.spawn(camera);

    commands.spawn((
        LocomotionBundle::new(Position::new(0.0, 5.0), &config),
        SpriteBundle {
            sprite: Sprite {
                color: Color::rgb(0.9, 0.9, 0.9),
                custom_size: Some(Vec2::new(0.75, 1.0)),
                anchor: bevy::sprite::Anchor::BottomCenter,
                ..default()
            },
            ..default()
        },
    ));

    info!("Arrows/A-D to walk, Space to jump");
}
