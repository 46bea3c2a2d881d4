//! hostprobe: a small HTTP service reporting a greeting and the host uptime.
//!
//! `GET /hello` returns a constant JSON greeting. `GET /status` runs the
//! host's `uptime -p` command on every request and returns its output.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod probe;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
