//! Game session: player stats and screen flow

pub mod controller;
pub mod player;

pub use controller::{Screen, SessionController};
pub use player::PlayerState;
