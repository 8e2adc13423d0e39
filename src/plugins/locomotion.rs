use crate::components::{ContactNormals, ContactState, Player, Position, TickInput};
use crate::config::{MovementConfig, load_config_from_file};
use crate::enums::MovementStateKind;
use crate::locomotion::Locomotion;
use bevy::prelude::*;

/// Per-tick pipeline stages, chained in `Update`.
///
/// Contacts classified in tick N see the position written by `Physics` in
/// tick N-1, never the motion in progress.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    Input,
    Contacts,
    Advance,
    Physics,
}

/// Event sent whenever a character decides to change movement state
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct LocomotionTransition {
    pub entity: Entity,
    pub from: MovementStateKind,
    pub to: MovementStateKind,
}

/// Everything a locomotion-driven player needs
#[derive(Bundle)]
pub struct LocomotionBundle {
    pub player: Player,
    pub position: Position,
    pub input: TickInput,
    pub normals: ContactNormals,
    pub contacts: ContactState,
    pub locomotion: Locomotion,
}

impl LocomotionBundle {
    pub fn new(position: Position, config: &MovementConfig) -> Self {
        Self {
            player: Player,
            position,
            input: TickInput::default(),
            normals: ContactNormals::default(),
            contacts: ContactState::default(),
            locomotion: Locomotion::new(config),
        }
    }
}

/// Plugin for the locomotion tick and its configuration.
///
/// Tuning comes from, in order: a `MovementConfig` resource already in the
/// app, the JSON file at `config_path`, or the defaults.
#[derive(Default)]
pub struct LocomotionPlugin {
    pub config_path: Option<String>,
}

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        if !app.world.contains_resource::<MovementConfig>() {
            app.insert_resource(self.resolve_config());
        }

        app.add_event::<LocomotionTransition>()
            .configure_sets(
                Update,
                (
                    LocomotionSet::Input,
                    LocomotionSet::Contacts,
                    LocomotionSet::Advance,
                    LocomotionSet::Physics,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                advance_locomotion_system.in_set(LocomotionSet::Advance),
            )
            .add_systems(PostUpdate, sync_transform_system);
    }
}

impl LocomotionPlugin {
    fn resolve_config(&self) -> MovementConfig {
        let Some(path) = &self.config_path else {
            return MovementConfig::default();
        };

        match load_config_from_file(path) {
            Ok(config) => {
                info!("Loaded movement config from {}", path);
                config
            }
            Err(e) => {
                error!("{}", e);
                warn!("Falling back to default movement config");
                MovementConfig::default()
            }
        }
    }
}

/// Advance every character's state machine by one tick
fn advance_locomotion_system(
    config: Res<MovementConfig>,
    time: Res<Time>,
    mut query: Query<(
        Entity,
        &TickInput,
        &ContactState,
        &mut Locomotion,
        &mut Position,
    )>,
    mut transitions: EventWriter<LocomotionTransition>,
) {
    let delta_time = time.delta_seconds();

    for (entity, input, contacts, mut locomotion, mut position) in query.iter_mut() {
        if let Some(to) = locomotion.advance(&config, input, contacts, &mut position, delta_time) {
            transitions.send(LocomotionTransition {
                entity,
                from: locomotion.kind(),
                to,
            });
        }
    }
}

/// Mirror the simulated position onto the render transform
fn sync_transform_system(mut query: Query<(&Position, &mut Transform), With<Player>>) {
    for (position, mut transform) in query.iter_mut() {
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::WallSide;
    use crate::locomotion::MovementState;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_plugin_inserts_default_config() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(LocomotionPlugin::default());

        assert_eq!(
            *app.world.resource::<MovementConfig>(),
            MovementConfig::default()
        );
    }

    #[test]
    fn test_plugin_keeps_existing_config() {
        let config = MovementConfig {
            walk_speed: 9.0,
            ..Default::default()
        };
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(config.clone())
            .add_plugins(LocomotionPlugin {
                config_path: Some("missing_movement.json".to_string()),
            });

        assert_eq!(*app.world.resource::<MovementConfig>(), config);
    }

    #[test]
    fn test_plugin_loads_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(br#"{"jump_height_cap": 4.0}"#).unwrap();
        temp_file.flush().unwrap();

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(LocomotionPlugin {
                config_path: Some(temp_file.path().to_str().unwrap().to_string()),
            });

        assert_eq!(app.world.resource::<MovementConfig>().jump_height_cap, 4.0);
    }

    #[test]
    fn test_plugin_falls_back_on_bad_config() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(LocomotionPlugin {
                config_path: Some("missing_movement.json".to_string()),
            });

        assert_eq!(
            *app.world.resource::<MovementConfig>(),
            MovementConfig::default()
        );
    }

    #[test]
    fn test_transition_event_sent() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(LocomotionPlugin::default());

        let config = app.world.resource::<MovementConfig>().clone();
        let mut bundle = LocomotionBundle::new(Position::new(0.0, 0.0), &config);
        bundle.contacts = ContactState::new(false, WallSide::Left);
        let player = app.world.spawn(bundle).id();

        app.update();

        let events = app.world.resource::<Events<LocomotionTransition>>();
        let mut reader = events.get_reader();
        let sent: Vec<_> = reader.read(events).copied().collect();
        assert_eq!(
            sent,
            vec![LocomotionTransition {
                entity: player,
                from: MovementStateKind::InAirDown,
                to: MovementStateKind::WallSlide,
            }]
        );
        assert_eq!(
            app.world.get::<Locomotion>(player).unwrap().next_kind(),
            Some(MovementStateKind::WallSlide)
        );
    }

    #[test]
    fn test_transform_follows_position() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(LocomotionPlugin::default());

        let player = app
            .world
            .spawn((
                Player,
                Position::new(3.0, 4.0),
                Transform::default(),
                TickInput::default(),
                ContactState::new(true, WallSide::None),
                Locomotion::entering(MovementState::on_floor(), 1),
            ))
            .id();

        app.update();

        let transform = app.world.get::<Transform>(player).unwrap();
        assert_eq!(transform.translation.x, 3.0);
        assert_eq!(transform.translation.y, 4.0);
    }
}
