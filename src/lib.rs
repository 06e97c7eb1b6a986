pub mod cache;
pub mod clients;
pub mod config;
pub mod dto;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
pub use utils::errors::{AppError, AppResult};
