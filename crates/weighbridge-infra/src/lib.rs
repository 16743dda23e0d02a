//! Infrastructure layer - backend HTTP client and response decoding

pub mod api_client;
pub mod envelope;
pub mod receipt;

pub use api_client::{ApiClient, ClientConfig};
