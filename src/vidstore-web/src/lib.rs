//! Vidstore web service - REST resource for video records

pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod validate;

pub use error::ApiError;
pub use server::{router, serve};
pub use state::AppState;
