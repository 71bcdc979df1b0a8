pub mod config;
pub mod error;
pub mod types;

pub use config::QuizConfig;
pub use error::{ForgeError, Result};
