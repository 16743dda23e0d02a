//! Domain layer: axle-weight classification, GVM aggregation and the entry table reducer

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::WeighbridgeApi;
