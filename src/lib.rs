pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod field;
pub mod input;

pub use error::{GameError, Result};
