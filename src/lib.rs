pub mod components;
pub mod config;
pub mod enums;
pub mod locomotion;
pub mod plugins;

pub use components::*;
pub use config::*;
pub use enums::*;
