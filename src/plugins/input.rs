use crate::components::{Player, TickInput};
use crate::plugins::locomotion::LocomotionSet;
use bevy::prelude::*;

/// Plugin that samples the keyboard into a `TickInput` once per tick
pub struct IntentPlugin;

impl Plugin for IntentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sample_input_system.in_set(LocomotionSet::Input));
    }
}

/// Left/A and Right/D build the walk axis, Space drives the jump edge and level
fn sample_input_system(
    keyboard: Res<Input<KeyCode>>,
    mut query: Query<&mut TickInput, With<Player>>,
) {
    let mut walk_axis = 0.0;
    if keyboard.pressed(KeyCode::Right) || keyboard.pressed(KeyCode::D) {
        walk_axis += 1.0;
    }
    if keyboard.pressed(KeyCode::Left) || keyboard.pressed(KeyCode::A) {
        walk_axis -= 1.0;
    }
    let jump_pressed = keyboard.just_pressed(KeyCode::Space);
    let jump_held = keyboard.pressed(KeyCode::Space);

    for mut input in query.iter_mut() {
        *input = TickInput::new(walk_axis, jump_pressed, jump_held);
    }
}
