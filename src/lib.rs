// Vantiq REST API client
pub mod client;

// Error taxonomy for client calls
pub mod error;

// Re-export public types
pub use client::Vantiq;
pub use error::{ApiError, VantiqError};
