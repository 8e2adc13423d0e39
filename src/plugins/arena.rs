use crate::components::{ContactNormals, Position};
use crate::plugins::locomotion::LocomotionSet;
use bevy::prelude::*;

/// Box-shaped play area: a floor and two walls.
///
/// Bodies are treated as points. A body resting exactly on a boundary is in
/// contact with it.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub left: f32,
    pub right: f32,
    pub floor: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            left: -10.0,
            right: 10.0,
            floor: 0.0,
        }
    }
}

impl Arena {
    /// Pushes `position` back inside and returns the normals of every
    /// boundary it touches.
    pub fn resolve(&self, position: &mut Position) -> Vec<Vec2> {
        position.x = position.x.clamp(self.left, self.right);
        position.y = position.y.max(self.floor);

        let mut normals = Vec::new();
        if position.y <= self.floor {
            normals.push(Vec2::Y);
        }
        if position.x <= self.left {
            normals.push(Vec2::X);
        }
        if position.x >= self.right {
            normals.push(Vec2::NEG_X);
        }
        normals
    }
}

/// Minimal contact provider used by the demo and the integration tests
pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Arena>().add_systems(
            Update,
            resolve_arena_contacts_system.in_set(LocomotionSet::Physics),
        );
    }
}

fn resolve_arena_contacts_system(
    arena: Res<Arena>,
    mut query: Query<(&mut Position, &mut ContactNormals)>,
) {
    for (mut position, mut contacts) in query.iter_mut() {
        contacts.normals = arena.resolve(&mut position);
    }
}
