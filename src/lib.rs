pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod roster;
pub mod ui;

pub use error::{AppError, Result};
