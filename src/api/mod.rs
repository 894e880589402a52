//! API Module
//!
//! Small HTTP surface for operators.
//!
//! # Endpoints
//! - `GET /stats` - Administrator cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
