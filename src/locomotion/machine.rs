use crate::components::{ContactState, Position, TickInput};
use crate::config::MovementConfig;
use crate::enums::MovementStateKind;
use crate::locomotion::states::{MovementState, TickContext};
use bevy::prelude::*;

/// Per-character locomotion runtime: the active state, a transition decided
/// last tick but not yet entered, and the remaining double-jump charges.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Locomotion {
    state: MovementState,
    pending: Option<MovementState>,
    charges: u32,
}

impl Locomotion {
    /// A freshly spawned character is falling with a full set of charges
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            state: MovementState::in_air_down(),
            pending: None,
            charges: config.double_jump_cap,
        }
    }

    /// Starts in `state`; its enter hook runs at the beginning of the first
    /// `advance`, until then `kind()` reports `InAirDown`.
    #[cfg(test)]
    pub(crate) fn entering(state: MovementState, charges: u32) -> Self {
        Self {
            state: MovementState::in_air_down(),
            pending: Some(state),
            charges,
        }
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn kind(&self) -> MovementStateKind {
        self.state.kind()
    }

    /// State decided by the last tick that will be entered on the next one
    pub fn next_kind(&self) -> Option<MovementStateKind> {
        self.pending.map(|s| s.kind())
    }

    pub fn charges(&self) -> u32 {
        self.charges
    }

    /// Runs one tick.
    ///
    /// Enters any state decided last tick, integrates the active state,
    /// moves `position`, then evaluates transitions. Returns the kind of the
    /// newly decided state, if any. Negative or non-finite `dt` is treated
    /// as zero.
    pub fn advance(
        &mut self,
        config: &MovementConfig,
        input: &TickInput,
        contacts: &ContactState,
        position: &mut Position,
        dt: f32,
    ) -> Option<MovementStateKind> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if let Some(mut next) = self.pending.take() {
            on_enter(&mut next, &mut self.charges, config, position);
            self.state = next;
        }

        let ctx = TickContext {
            config,
            input,
            contacts,
            position: position.as_vec2(),
            dt,
            charges: self.charges,
        };
        let step = self.state.execute(&ctx);
        position.translate(step.delta);

        let next = step.next?;
        on_exit(&self.state, &next);
        self.pending = Some(next);
        Some(next.kind())
    }
}

/// Captures the state-local working values and refills or spends charges
fn on_enter(
    state: &mut MovementState,
    charges: &mut u32,
    config: &MovementConfig,
    position: &Position,
) {
    match state {
        MovementState::OnFloor | MovementState::WallSlide { .. } => {
            *charges = config.double_jump_cap;
        }
        MovementState::InAirUp { start_height } => {
            *start_height = position.y;
        }
        MovementState::InAirDown { fall_speed } => {
            *fall_speed = 0.0;
        }
        MovementState::WallJump {
            start_x, folded, ..
        } => {
            *start_x = position.x;
            *folded = false;
        }
        MovementState::DoubleJump {
            enter_height,
            dip_completed,
            fall_speed,
        } => {
            debug_assert!(*charges > 0, "double jump entered without a charge");
            *charges = charges.saturating_sub(1);
            *enter_height = position.y;
            *dip_completed = false;
            *fall_speed = 0.0;
        }
    }
}

fn on_exit(from: &MovementState, to: &MovementState) {
    debug!("locomotion: {} -> {}", from.kind(), to.kind());
}
