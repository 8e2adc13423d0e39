use std::fmt;

/// Side of the character a wall is touching
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

impl WallSide {
    /// -1 for left, +1 for right, 0 when no wall is touched
    pub fn sign(self) -> i32 {
        match self {
            WallSide::None => 0,
            WallSide::Left => -1,
            WallSide::Right => 1,
        }
    }

    pub fn is_some(self) -> bool {
        self != WallSide::None
    }

    /// Returns `self` unless it is `None`, in which case `fallback`
    pub fn or(self, fallback: WallSide) -> WallSide {
        if self.is_some() { self } else { fallback }
    }
}

/// Movement state tag without the state-local working values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementStateKind {
    OnFloor,
    InAirUp,
    InAirDown,
    WallSlide,
    WallJump,
    DoubleJump,
}

impl fmt::Display for MovementStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MovementStateKind::OnFloor => "on-floor",
            MovementStateKind::InAirUp => "in-air-up",
            MovementStateKind::InAirDown => "in-air-down",
            MovementStateKind::WallSlide => "wall-slide",
            MovementStateKind::WallJump => "wall-jump",
            MovementStateKind::DoubleJump => "double-jump",
        };
        write!(f, "{}", name)
    }
}
