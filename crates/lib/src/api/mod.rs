//! HTTP service boundary of the user store.
//!
//! | Operation | Method | Path          |
//! |-----------|--------|---------------|
//! | login     | POST   | `/login`      |
//! | logout    | POST   | `/logout`     |
//! | register  | POST   | `/register`   |
//! | list      | GET    | `/users`      |
//! | get       | GET    | `/users/{id}` |
//! | update    | PUT    | `/users/{id}` |
//! | delete    | DELETE | `/users/{id}` |
//! | health    | GET    | `/health`     |
//!
//! Failures are answered with a non-2xx status and an `{"error": "..."}` body.

pub mod errors;
pub mod protocol;
pub mod server;
pub mod tokens;

pub use errors::{ApiError, ApiResult};
pub use server::{AppState, ServerConfig, ServerHandle, router, start};
pub use tokens::TokenRegistry;
