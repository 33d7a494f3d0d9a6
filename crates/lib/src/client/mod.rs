//! API client and session holder.

mod api_client;
pub mod errors;
pub mod session;

pub use api_client::ApiClient;
pub use errors::{ClientError, ClientResult};
pub use session::{FileSession, MemorySession, SESSION_KEY, SessionStorage};
