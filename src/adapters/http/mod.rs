//! HTTP adapters - REST API implementations.
//!
//! Each feature has its own `dto`/`handlers`/`routes` triple; `router`
//! merges them under `/api` behind the auth middleware.

pub mod checks;
pub mod code;
pub mod documents;
pub mod error;
pub mod estimates;
pub mod jobs;
pub mod middleware;
pub mod projects;
pub mod proposals;
pub mod reports;
mod router;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{build_router, RouterConfig};
pub use state::{AppState, Repositories};
