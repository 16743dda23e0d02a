//! Setup, history and receipt use cases
//!
//! Every request is validated locally first; invalid input never reaches the backend.

use tracing::{info, warn};
use weighbridge_domain::service::{
    filter_sales, validate_credentials, validate_new_axle_group, validate_new_vehicle_type,
};
use weighbridge_domain::WeighbridgeApi;
use weighbridge_types::{
    Credentials, NewAxleGroup, NewVehicleType, Receipt, Result, SaleRecord,
};

/// Log in and return the access token
pub async fn login<A: WeighbridgeApi + ?Sized>(api: &A, credentials: &Credentials) -> Result<String> {
    validate_credentials(credentials)?;
    let token = api.login(credentials).await?;
    info!(email = %credentials.email, "Logged in");
    Ok(token)
}

pub async fn create_axle_group<A: WeighbridgeApi + ?Sized>(api: &A, group: &NewAxleGroup) -> Result<()> {
    validate_new_axle_group(group)?;
    api.create_axle_group(group).await?;
    info!(group_name = %group.group_name, limit = group.allowed, "Axle group created");
    Ok(())
}

pub async fn create_vehicle_type<A: WeighbridgeApi + ?Sized>(
    api: &A,
    vehicle_type: &NewVehicleType,
) -> Result<()> {
    validate_new_vehicle_type(vehicle_type)?;
    api.create_vehicle_type(vehicle_type).await?;
    info!(vehicle_type = %vehicle_type.vehicle_type, "Vehicle type created");
    Ok(())
}

/// Sales history narrowed by an optional keyword
pub async fn search_sales<A: WeighbridgeApi + ?Sized>(
    api: &A,
    keyword: Option<&str>,
) -> Result<Vec<SaleRecord>> {
    let sales = api.fetch_sales().await?;
    Ok(match keyword {
        Some(keyword) => filter_sales(&sales, keyword).into_iter().cloned().collect(),
        None => sales,
    })
}

pub async fn fetch_receipt<A: WeighbridgeApi + ?Sized>(api: &A, sale_id: i64) -> Result<Receipt> {
    let receipt = api.fetch_receipt(sale_id).await?;
    if !receipt.is_pdf() {
        warn!(sale_id, bytes = receipt.pdf.len(), "Receipt does not look like a PDF");
    }
    Ok(receipt)
}
