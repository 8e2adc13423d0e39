pub mod arena;
pub mod contacts;
pub mod input;
pub mod locomotion;

pub use arena::ArenaPlugin;
pub use contacts::ContactPlugin;
pub use input::IntentPlugin;
pub use locomotion::LocomotionPlugin;
