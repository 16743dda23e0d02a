//! Error types for the weighbridge client

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised while talking to the backend API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid base URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to initialise HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request to {resource} failed: {message}")]
    Network { resource: String, message: String },

    #[error("{resource} returned HTTP {status}")]
    HttpStatus { resource: String, status: u16 },

    #[error("Invalid response from {resource}: {message}")]
    InvalidResponse { resource: String, message: String },
}

/// Failures resolving or editing rows of the axle entry table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("Axle group {0} not found")]
    AxleGroupNotFound(i64),

    #[error("Vehicle type {0} not found")]
    VehicleTypeNotFound(i64),

    #[error("Sale {0} not found")]
    SaleNotFound(i64),

    #[error("Row {index} is out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Row {0} is the GVM summary row and cannot be edited")]
    SummaryRowNotEditable(usize),

    #[error("Invalid axle weight: {0}")]
    InvalidWeight(f64),
}

/// Local validation failures that block a request before it reaches the network
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("At least one axle weight must be recorded")]
    NoAxleWeights,

    #[error("Truck number is required")]
    MissingTruckNumber,

    #[error("Sale price is required")]
    MissingSalePrice,

    #[error("Vehicle type is required")]
    MissingVehicleType,

    #[error("{field}: {message}")]
    InvalidField { field: &'static str, message: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Receipt error: {0}")]
    Receipt(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, Error>;
