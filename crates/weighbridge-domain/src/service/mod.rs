//! Domain services
//!
//! Pure functions over axle rows and reference data.

pub mod axle_lookup;
pub mod gvm_aggregator;
pub mod row_classifier;
pub mod sales_filter;
pub mod setup_validation;

pub use axle_lookup::{resolve_axle_group, ResolvedAxleGroup};
pub use gvm_aggregator::{aggregate, GvmRollup};
pub use row_classifier::{classify, classify_row, is_overload, Classification};
pub use sales_filter::filter_sales;
pub use setup_validation::{validate_credentials, validate_new_axle_group, validate_new_vehicle_type};
