// handlers - HTTP endpoints
//
// teachers: the roster endpoints (mounted under the configured path)
// service:  root info, health check and the unknown-route fallback

pub mod service;
pub mod teachers;

pub use service::{fallback, health, root};
