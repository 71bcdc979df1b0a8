//! Forge Drill - crafting recipe trainer

pub mod analytics;
pub mod catalog;
pub mod coach;
pub mod core;
pub mod history;
pub mod round;
pub mod session;
pub mod ui;
