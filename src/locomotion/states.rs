use crate::components::{ContactState, TickInput};
use crate::config::MovementConfig;
use crate::enums::{MovementStateKind, WallSide};
use bevy::prelude::*;

/// Active movement state with its state-local working values.
///
/// Working values are filled in by the enter hook and discarded on
/// transition. Use the constructors to build a fresh state to transition to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MovementState {
    OnFloor,
    InAirUp {
        start_height: f32,
    },
    InAirDown {
        fall_speed: f32,
    },
    WallSlide {
        side: WallSide,
    },
    WallJump {
        origin: WallSide,
        start_x: f32,
        folded: bool,
    },
    DoubleJump {
        enter_height: f32,
        dip_completed: bool,
        fall_speed: f32,
    },
}

/// Read-only view of everything one tick of integration needs
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub config: &'a MovementConfig,
    pub input: &'a TickInput,
    pub contacts: &'a ContactState,
    /// Body position before this tick's displacement
    pub position: Vec2,
    pub dt: f32,
    pub charges: u32,
}

impl TickContext<'_> {
    fn walk(&self) -> f32 {
        self.input.walk_sign() as f32 * self.config.walk_speed * self.dt
    }

    fn can_double_jump(&self) -> bool {
        self.input.jump_pressed() && self.charges > 0
    }

    /// Accelerates `fall_speed` under gravity, capped at the max fall speed,
    /// and returns the (negative) vertical displacement for this tick.
    fn fall(&self, fall_speed: &mut f32) -> f32 {
        *fall_speed = (*fall_speed + self.config.gravity * self.dt).min(self.config.max_fall_speed);
        -*fall_speed * self.dt
    }
}

/// Outcome of one tick: the displacement to apply and an optional next state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub delta: Vec2,
    pub next: Option<MovementState>,
}

impl Step {
    fn stay(delta: Vec2) -> Self {
        Self { delta, next: None }
    }

    fn to(delta: Vec2, next: MovementState) -> Self {
        Self {
            delta,
            next: Some(next),
        }
    }
}

impl MovementState {
    pub fn on_floor() -> Self {
        MovementState::OnFloor
    }

    pub fn in_air_up() -> Self {
        MovementState::InAirUp { start_height: 0.0 }
    }

    pub fn in_air_down() -> Self {
        MovementState::InAirDown { fall_speed: 0.0 }
    }

    pub fn wall_slide(side: WallSide) -> Self {
        MovementState::WallSlide { side }
    }

    pub fn wall_jump(origin: WallSide) -> Self {
        MovementState::WallJump {
            origin,
            start_x: 0.0,
            folded: false,
        }
    }

    pub fn double_jump() -> Self {
        MovementState::DoubleJump {
            enter_height: 0.0,
            dip_completed: false,
            fall_speed: 0.0,
        }
    }

    pub fn kind(&self) -> MovementStateKind {
        match self {
            MovementState::OnFloor => MovementStateKind::OnFloor,
            MovementState::InAirUp { .. } => MovementStateKind::InAirUp,
            MovementState::InAirDown { .. } => MovementStateKind::InAirDown,
            MovementState::WallSlide { .. } => MovementStateKind::WallSlide,
            MovementState::WallJump { .. } => MovementStateKind::WallJump,
            MovementState::DoubleJump { .. } => MovementStateKind::DoubleJump,
        }
    }

    /// Integrates one tick and evaluates the exit predicates in priority
    /// order against the post-integration position. First match wins.
    pub fn execute(&mut self, ctx: &TickContext) -> Step {
        match self {
            MovementState::OnFloor => {
                let delta = Vec2::new(ctx.walk(), 0.0);
                if !ctx.contacts.on_floor {
                    return Step::to(delta, MovementState::in_air_down());
                }
                if ctx.input.jump_pressed() {
                    return Step::to(delta, MovementState::in_air_up());
                }
                Step::stay(delta)
            }

            MovementState::InAirUp { start_height } => {
                let remaining =
                    (ctx.config.jump_height_cap - (ctx.position.y - *start_height)).max(0.0);
                let rise_step = ctx.config.jump_impulse_rate * ctx.dt;
                let held = ctx.input.jump_held();
                let rise = if held { rise_step.min(remaining) } else { 0.0 };
                let capped = held && rise_step >= remaining;
                let delta = Vec2::new(ctx.walk(), rise);

                if ctx.can_double_jump() {
                    return Step::to(delta, MovementState::double_jump());
                }
                if !held || capped {
                    return Step::to(delta, MovementState::in_air_down());
                }
                Step::stay(delta)
            }

            MovementState::InAirDown { fall_speed } => {
                let delta = Vec2::new(ctx.walk(), ctx.fall(fall_speed));
                if ctx.contacts.on_floor {
                    return Step::to(delta, MovementState::on_floor());
                }
                if ctx.contacts.wall_side.is_some() {
                    return Step::to(delta, MovementState::wall_slide(ctx.contacts.wall_side));
                }
                if ctx.can_double_jump() {
                    return Step::to(delta, MovementState::double_jump());
                }
                Step::stay(delta)
            }

            MovementState::WallSlide { side } => {
                *side = ctx.contacts.wall_side.or(*side);
                let delta = Vec2::new(0.0, -ctx.config.wall_slide_speed * ctx.dt);

                // Any walk input drops off once the wall is no longer touched
                let walk_sign = ctx.input.walk_sign();
                if walk_sign != 0 && walk_sign != ctx.contacts.wall_side.sign() {
                    return Step::to(delta, MovementState::in_air_down());
                }
                if ctx.input.jump_pressed() {
                    return Step::to(delta, MovementState::wall_jump(*side));
                }
                if ctx.contacts.on_floor {
                    return Step::to(delta, MovementState::on_floor());
                }
                Step::stay(delta)
            }

            MovementState::WallJump {
                origin,
                start_x,
                folded,
            } => {
                let away = -origin.sign() as f32;
                let push = ctx.config.wall_jump_force_h * ctx.dt;
                let lift = ctx.config.wall_jump_force_v * ctx.dt;

                if !*folded {
                    let delta = Vec2::new(push * away, lift);
                    let travel = (ctx.position.x + delta.x - *start_x).abs();
                    if travel >= ctx.config.wall_jump_limit_h {
                        *folded = true;
                    }
                    return Self::airborne_fallthrough(ctx, delta);
                }

                let delta = Vec2::new(-push * away, lift);
                if ctx.contacts.wall_side == *origin {
                    return Step::to(delta, MovementState::wall_slide(*origin));
                }
                if (ctx.position.x + delta.x - *start_x) * away < 0.0 {
                    return Step::to(delta, MovementState::in_air_down());
                }
                Self::airborne_fallthrough(ctx, delta)
            }

            MovementState::DoubleJump {
                enter_height,
                dip_completed,
                fall_speed,
            } => {
                let walk = ctx.walk();
                if !*dip_completed {
                    let delta = Vec2::new(walk, ctx.fall(fall_speed));
                    if *enter_height - (ctx.position.y + delta.y) > ctx.config.double_jump_dip {
                        *dip_completed = true;
                    }
                    return Self::airborne_fallthrough(ctx, delta);
                }

                let delta = Vec2::new(walk, ctx.config.double_jump_lift_rate * ctx.dt);
                if ctx.position.y + delta.y - *enter_height > ctx.config.double_jump_height_cap {
                    return Step::to(delta, MovementState::in_air_down());
                }
                Self::airborne_fallthrough(ctx, delta)
            }
        }
    }

    /// Shared tail of the timed airborne states: land, keep going while the
    /// jump is held, otherwise start falling.
    fn airborne_fallthrough(ctx: &TickContext, delta: Vec2) -> Step {
        if ctx.contacts.on_floor {
            return Step::to(delta, MovementState::on_floor());
        }
        if ctx.input.jump_held() {
            return Step::stay(delta);
        }
        Step::to(delta, MovementState::in_air_down())
    }
}
