//! Application service layer - entry session, setup use cases, config, export

pub mod config;
pub mod export;
pub mod logging;
pub mod session;
pub mod setup;

pub use config::Config;
pub use session::EntrySession;
