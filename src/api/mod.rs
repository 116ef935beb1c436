//! Stub backend: an in-process axum server speaking the REST contract the
//! client expects, over seeded in-memory data.
//!
//! Routes are nested under `/api/v1`. The stack is Audit → Auth → Handler;
//! public routes skip Auth.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod store;
pub mod types;

pub use router::stub_router;
pub use server::{start_stub_server, start_stub_server_on, StubServer};
pub use types::ApiContext;
