use crate::components::{ContactNormals, ContactState};
use crate::plugins::locomotion::LocomotionSet;
use bevy::prelude::*;

/// Plugin that turns the physics provider's contact normals into a
/// `ContactState` for the current tick
pub struct ContactPlugin;

impl Plugin for ContactPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            classify_contacts_system.in_set(LocomotionSet::Contacts),
        );
    }
}

fn classify_contacts_system(mut query: Query<(&ContactNormals, &mut ContactState)>) {
    for (normals, mut contacts) in query.iter_mut() {
        let classified = ContactState::from_normals(&normals.normals);
        if *contacts != classified {
            *contacts = classified;
        }
    }
}
