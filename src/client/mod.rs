//! Terminal client for the mood API: session handling, a typed HTTP client
//! and the statistics shown on the dashboard.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod session;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use session::Session;
