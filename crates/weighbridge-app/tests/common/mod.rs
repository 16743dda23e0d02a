//! In-memory backend shared by the app integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use weighbridge_domain::WeighbridgeApi;
use weighbridge_types::{
    ApiError, AxleGroupDefinition, AxleGroupRef, AxleRow, Credentials, Error, NewAxleGroup,
    NewVehicleType, Receipt, RowStatus, SaleRecord, SaleTransaction, VehicleTypeDefinition,
    VehicleTypeSummary,
};

/// Backend double. `None` in a fixture field makes that call fail with HTTP 503.
#[derive(Default)]
pub struct MockApi {
    pub axle_groups: Option<Vec<AxleGroupDefinition>>,
    pub vehicle_types: Option<Vec<VehicleTypeDefinition>>,
    pub sales: Option<Vec<SaleRecord>>,
    pub template: Option<Vec<AxleRow>>,
    pub fail_create_sale: bool,
    pub calls: Mutex<Vec<String>>,
    pub template_requests: Mutex<Vec<(i64, Option<i64>)>>,
    pub created_sales: Mutex<Vec<SaleTransaction>>,
}

fn unavailable(resource: &str) -> Error {
    Error::Api(ApiError::HttpStatus {
        resource: resource.to_string(),
        status: 503,
    })
}

impl MockApi {
    /// Two groups, a rigid truck (10) using both, and a two-tandem trailer (11)
    pub fn seeded() -> Self {
        Self {
            axle_groups: Some(axle_groups()),
            vehicle_types: Some(vec![
                VehicleTypeDefinition {
                    id: 10,
                    vehicle_type: "Rigid".to_string(),
                    price: Some(20.0),
                    axle_groups: vec![AxleGroupRef::Id(1), AxleGroupRef::Id(2)],
                },
                VehicleTypeDefinition {
                    id: 11,
                    vehicle_type: "Trailer".to_string(),
                    price: Some(35.0),
                    axle_groups: vec![AxleGroupRef::Id(2), AxleGroupRef::Id(2)],
                },
            ]),
            sales: Some(vec![sale(55, "T123ABC", 10)]),
            template: Some(rigid_template()),
            ..Default::default()
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn call_count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }
}

pub fn axle_groups() -> Vec<AxleGroupDefinition> {
    vec![
        AxleGroupDefinition {
            id: 1,
            group_name: "Single".to_string(),
            description: "Steer axle".to_string(),
            weight_limit: 600.0,
        },
        AxleGroupDefinition {
            id: 2,
            group_name: "Tandem".to_string(),
            description: String::new(),
            weight_limit: 1200.0,
        },
    ]
}

/// Template as the backend sends it, trailing GVM row included
pub fn rigid_template() -> Vec<AxleRow> {
    vec![
        AxleRow {
            axle_group_id: Some(1),
            group_name: "Single".to_string(),
            weight_limit: Some(600.0),
            ..Default::default()
        },
        AxleRow {
            axle_group_id: Some(2),
            group_name: "Tandem".to_string(),
            weight_limit: Some(1200.0),
            ..Default::default()
        },
        AxleRow {
            group_name: "GVM".to_string(),
            axle_weight: Some(0.0),
            weight_limit: Some(1800.0),
            ..Default::default()
        },
    ]
}

pub fn sale(id: i64, truck_number: &str, vehicle_type_id: i64) -> SaleRecord {
    SaleRecord {
        id,
        truck_number: truck_number.to_string(),
        vehicle_type: Some(VehicleTypeSummary {
            id: vehicle_type_id,
            vehicle_type: "Rigid".to_string(),
        }),
        gvm_axle_weight: 1900.0,
        gvm_weight_limit: 1800.0,
        gvm_status: RowStatus::Overload,
        gvm_overload: 100.0,
        gvm_allowance: 0.0,
        sale_price: Some(20.0),
        parent_id: 0,
        created_time: Some("2024-03-07T14:15:00".to_string()),
    }
}

#[async_trait]
impl WeighbridgeApi for MockApi {
    async fn login(&self, _credentials: &Credentials) -> Result<String, Error> {
        self.record("login");
        Ok("token-123".to_string())
    }

    async fn fetch_axle_groups(&self) -> Result<Vec<AxleGroupDefinition>, Error> {
        self.record("fetch_axle_groups");
        self.axle_groups.clone().ok_or_else(|| unavailable("axle groups"))
    }

    async fn create_axle_group(&self, _group: &NewAxleGroup) -> Result<(), Error> {
        self.record("create_axle_group");
        Ok(())
    }

    async fn fetch_vehicle_types(&self) -> Result<Vec<VehicleTypeDefinition>, Error> {
        self.record("fetch_vehicle_types");
        self.vehicle_types.clone().ok_or_else(|| unavailable("vehicle types"))
    }

    async fn create_vehicle_type(&self, _vehicle_type: &NewVehicleType) -> Result<(), Error> {
        self.record("create_vehicle_type");
        Ok(())
    }

    async fn fetch_sales(&self) -> Result<Vec<SaleRecord>, Error> {
        self.record("fetch_sales");
        self.sales.clone().ok_or_else(|| unavailable("sales"))
    }

    async fn fetch_axle_template(
        &self,
        vehicle_type_id: i64,
        parent_id: Option<i64>,
    ) -> Result<Vec<AxleRow>, Error> {
        self.record("fetch_axle_template");
        self.template_requests
            .lock()
            .unwrap()
            .push((vehicle_type_id, parent_id));
        self.template.clone().ok_or_else(|| unavailable("axle template"))
    }

    async fn create_sale(&self, sale: &SaleTransaction) -> Result<(), Error> {
        self.record("create_sale");
        if self.fail_create_sale {
            return Err(unavailable("sales"));
        }
        self.created_sales.lock().unwrap().push(sale.clone());
        Ok(())
    }

    async fn fetch_receipt(&self, sale_id: i64) -> Result<Receipt, Error> {
        self.record("fetch_receipt");
        Ok(Receipt {
            sale_id,
            pdf: b"%PDF-1.4 receipt".to_vec(),
        })
    }
}
