//! Port to the weighbridge backend

use async_trait::async_trait;

use weighbridge_types::{
    AxleGroupDefinition, AxleRow, Credentials, Error, NewAxleGroup, NewVehicleType, Receipt,
    SaleRecord, SaleTransaction, VehicleTypeDefinition,
};

/// Remote operations the client relies on.
///
/// Implementations are plain request/response; nothing is retried.
#[async_trait]
pub trait WeighbridgeApi: Send + Sync {
    /// Exchange credentials for an access token
    async fn login(&self, credentials: &Credentials) -> Result<String, Error>;

    async fn fetch_axle_groups(&self) -> Result<Vec<AxleGroupDefinition>, Error>;

    async fn create_axle_group(&self, group: &NewAxleGroup) -> Result<(), Error>;

    async fn fetch_vehicle_types(&self) -> Result<Vec<VehicleTypeDefinition>, Error>;

    async fn create_vehicle_type(&self, vehicle_type: &NewVehicleType) -> Result<(), Error>;

    /// Sales history, newest first as returned by the backend
    async fn fetch_sales(&self) -> Result<Vec<SaleRecord>, Error>;

    /// Initial axle rows for a vehicle type, optionally for a re-weigh of `parent_id`
    async fn fetch_axle_template(
        &self,
        vehicle_type_id: i64,
        parent_id: Option<i64>,
    ) -> Result<Vec<AxleRow>, Error>;

    async fn create_sale(&self, sale: &SaleTransaction) -> Result<(), Error>;

    async fn fetch_receipt(&self, sale_id: i64) -> Result<Receipt, Error>;
}
