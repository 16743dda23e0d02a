//! Reference data fetched once per session

use weighbridge_types::{AxleGroupDefinition, LookupError, VehicleTypeDefinition};

/// Axle groups and vehicle types cached read-only by the client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub axle_groups: Vec<AxleGroupDefinition>,
    pub vehicle_types: Vec<VehicleTypeDefinition>,
}

impl ReferenceData {
    pub fn vehicle_type(&self, id: i64) -> Result<&VehicleTypeDefinition, LookupError> {
        self.vehicle_types
            .iter()
            .find(|vt| vt.id == id)
            .ok_or(LookupError::VehicleTypeNotFound(id))
    }

    pub fn is_loaded(&self) -> bool {
        !self.axle_groups.is_empty() && !self.vehicle_types.is_empty()
    }
}
