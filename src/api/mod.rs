//! HTTP API for the tune-in graph

pub mod handlers;
pub mod query;
pub mod routes;
pub mod tune_in_handlers;

pub use query::*;
pub use routes::create_router;
