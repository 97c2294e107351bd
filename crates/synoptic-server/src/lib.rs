//! HTTP layer: organ index, form schemas, report generation, static assets.
//!
//! The router is composable: [`build_router`] returns a `Router` that can be
//! mounted on any axum server instance; [`serve`] binds and runs it.

#![deny(unsafe_code)]

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod state;

pub use crate::error::ApiError;
pub use crate::router::build_router;
pub use crate::server::serve;
pub use crate::state::AppContext;
