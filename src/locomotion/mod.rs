//! Locomotion core: movement states, per-state integration and the
//! transition driver. Nothing in here depends on a running `App`.

pub mod machine;
pub mod states;

pub use machine::Locomotion;
pub use states::{MovementState, Step, TickContext};
