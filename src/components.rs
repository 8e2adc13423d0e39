use crate::enums::WallSide;
use bevy::prelude::*;

/// Position component - world coordinates, y grows upward
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Player marker component
#[derive(Component)]
pub struct Player;

/// Player intent for one tick.
///
/// `jump_pressed` is edge-triggered (true only on the tick the control goes
/// down), `jump_held` is level-triggered.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    walk_axis: f32,
    jump_pressed: bool,
    jump_held: bool,
}

impl TickInput {
    /// Builds a snapshot, clamping the walk axis into [-1, 1] (NaN reads as 0).
    pub fn new(walk_axis: f32, jump_pressed: bool, jump_held: bool) -> Self {
        let walk_axis = if walk_axis.is_nan() {
            0.0
        } else {
            walk_axis.clamp(-1.0, 1.0)
        };
        Self {
            walk_axis,
            jump_pressed,
            jump_held,
        }
    }

    pub fn walk_axis(&self) -> f32 {
        self.walk_axis
    }

    /// Walk direction discretized to -1, 0 or +1. No deadzone.
    pub fn walk_sign(&self) -> i32 {
        if self.walk_axis > 0.0 {
            1
        } else if self.walk_axis < 0.0 {
            -1
        } else {
            0
        }
    }

    pub fn jump_pressed(&self) -> bool {
        self.jump_pressed
    }

    pub fn jump_held(&self) -> bool {
        self.jump_held
    }
}

/// Contact normals reported by the physics provider for the current tick
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct ContactNormals {
    pub normals: Vec<Vec2>,
}

/// Floor and wall contact for one tick, with no memory of earlier ticks
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactState {
    pub on_floor: bool,
    pub wall_side: WallSide,
}

impl ContactState {
    pub fn new(on_floor: bool, wall_side: WallSide) -> Self {
        Self { on_floor, wall_side }
    }

    /// Classifies raw contact normals using exact unit-vector equality.
    ///
    /// A normal pointing right means the wall is on the left, and vice versa.
    /// If both walls are touched the last normal scanned wins.
    pub fn from_normals(normals: &[Vec2]) -> Self {
        let mut contacts = Self::default();
        for normal in normals {
            if *normal == Vec2::Y {
                contacts.on_floor = true;
            }
            if *normal == Vec2::X {
                contacts.wall_side = WallSide::Left;
            }
            if *normal == Vec2::NEG_X {
                contacts.wall_side = WallSide::Right;
            }
        }
        contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_translate() {
        let mut pos = Position::new(1.0, 2.0);
        pos.translate(Vec2::new(0.5, -1.0));
        assert_eq!(pos, Position::new(1.5, 1.0));
    }

    #[test]
    fn test_tick_input_clamps_axis() {
        assert_eq!(TickInput::new(3.0, false, false).walk_axis(), 1.0);
        assert_eq!(TickInput::new(-7.5, false, false).walk_axis(), -1.0);
        assert_eq!(TickInput::new(f32::NAN, false, false).walk_axis(), 0.0);
    }

    #[test]
    fn test_walk_sign_has_no_deadzone() {
        assert_eq!(TickInput::new(0.001, false, false).walk_sign(), 1);
        assert_eq!(TickInput::new(-0.001, false, false).walk_sign(), -1);
        assert_eq!(TickInput::new(0.0, false, false).walk_sign(), 0);
    }

    #[test]
    fn test_contacts_floor_from_up_normal() {
        let contacts = ContactState::from_normals(&[Vec2::Y]);
        assert!(contacts.on_floor);
        assert_eq!(contacts.wall_side, WallSide::None);
    }

    #[test]
    fn test_contacts_side_mapping_is_inverted() {
        let left = ContactState::from_normals(&[Vec2::X]);
        assert_eq!(left.wall_side, WallSide::Left);

        let right = ContactState::from_normals(&[Vec2::NEG_X]);
        assert_eq!(right.wall_side, WallSide::Right);
    }

    #[test]
    fn test_contacts_require_exact_normals() {
        let contacts = ContactState::from_normals(&[
            Vec2::new(0.0, 0.999),
            Vec2::new(0.7071, 0.7071),
            Vec2::NEG_Y,
        ]);
        assert_eq!(contacts, ContactState::default());
    }

    #[test]
    fn test_contacts_floor_and_wall_together() {
        let contacts = ContactState::from_normals(&[Vec2::NEG_X, Vec2::Y]);
        assert!(contacts.on_floor);
        assert_eq!(contacts.wall_side, WallSide::Right);
    }

    #[test]
    fn test_contacts_empty() {
        assert_eq!(ContactState::from_normals(&[]), ContactState::default());
    }
}
