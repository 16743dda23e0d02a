//! Entry Session - one weigh-in from vehicle type selection to submission
//!
//! Wraps the `EntryState` reducer with the backend calls it depends on.
//! Template fetches are tagged with the state generation so a response for a
//! superseded selection is dropped ("last selection wins").

use std::sync::Arc;

use tracing::{debug, info, warn};
use weighbridge_domain::{EntryEvent, EntryState, ReferenceData, TemplateRequest, WeighbridgeApi};
use weighbridge_types::{AxleRow, Error, LookupError, Result, SaleRecord, SaleTransaction};

pub struct EntrySession<A: WeighbridgeApi> {
    api: Arc<A>,
    reference: ReferenceData,
    state: EntryState,
}

impl<A: WeighbridgeApi> EntrySession<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            reference: ReferenceData::default(),
            state: EntryState::new(),
        }
    }

    /// Session over reference data that is already loaded
    pub fn with_reference(api: Arc<A>, reference: ReferenceData) -> Self {
        Self {
            api,
            reference,
            state: EntryState::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn state(&self) -> &EntryState {
        &self.state
    }

    pub fn rows(&self) -> &[AxleRow] {
        self.state.table.rows()
    }

    /// Fetch axle groups and vehicle types.
    ///
    /// Each list is fetched independently; a failed list is left empty and the
    /// first error is returned after both attempts.
    pub async fn load_reference_data(&mut self) -> Result<()> {
        let mut first_error = None;

        match self.api.fetch_axle_groups().await {
            Ok(groups) => {
                debug!(count = groups.len(), "Loaded axle groups");
                self.reference.axle_groups = groups;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch axle groups");
                self.reference.axle_groups.clear();
                first_error = Some(e);
            }
        }

        match self.api.fetch_vehicle_types().await {
            Ok(types) => {
                debug!(count = types.len(), "Loaded vehicle types");
                self.reference.vehicle_types = types;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch vehicle types");
                self.reference.vehicle_types.clear();
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Apply an event; on error the state is left untouched
    pub fn apply(&mut self, event: EntryEvent) -> Result<()> {
        self.state = self.state.apply(event, &self.reference)?;
        Ok(())
    }

    /// Select a vehicle type and return the template fetch to issue for it
    pub fn begin_vehicle_type(&mut self, vehicle_type_id: i64) -> Result<TemplateRequest> {
        self.apply(EntryEvent::VehicleTypeSelected(vehicle_type_id))?;
        self.current_request(vehicle_type_id)
    }

    pub async fn fetch_template(&self, request: TemplateRequest) -> Result<Vec<AxleRow>> {
        self.api
            .fetch_axle_template(request.vehicle_type_id, request.parent_id)
            .await
    }

    /// Deliver a template fetch result.
    ///
    /// Returns `Ok(false)` when the request was superseded and the rows were dropped.
    /// A failed fetch keeps the slot layout derived from the reference data.
    pub fn complete_template(
        &mut self,
        request: TemplateRequest,
        result: Result<Vec<AxleRow>>,
    ) -> Result<bool> {
        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    vehicle_type_id = request.vehicle_type_id,
                    error = %e,
                    "Failed to fetch axle template"
                );
                return Err(e);
            }
        };
        let current = request.generation == self.state.generation;
        self.apply(EntryEvent::TemplateLoaded {
            generation: request.generation,
            rows,
        })?;
        Ok(current)
    }

    /// Select a vehicle type and load its axle template
    pub async fn select_vehicle_type(&mut self, vehicle_type_id: i64) -> Result<()> {
        let request = self.begin_vehicle_type(vehicle_type_id)?;
        let result = self.fetch_template(request).await;
        self.complete_template(request, result)?;
        Ok(())
    }

    /// Start a re-weigh of a prior sale and return the template fetch to issue for it.
    ///
    /// Truck number and vehicle type are copied; weights start empty.
    pub fn begin_reweigh(&mut self, sale: &SaleRecord) -> Result<TemplateRequest> {
        let event = EntryEvent::reweigh_of(sale)?;
        self.apply(event)?;
        let vehicle_type_id = self.state.vehicle_type_id.unwrap_or_default();
        self.current_request(vehicle_type_id)
    }

    pub async fn load_for_reweigh(&mut self, sale: &SaleRecord) -> Result<()> {
        let request = self.begin_reweigh(sale)?;
        let result = self.fetch_template(request).await;
        self.complete_template(request, result)?;
        Ok(())
    }

    /// Look a sale up in the history
    pub async fn find_sale(&self, sale_id: i64) -> Result<SaleRecord> {
        let sales = self.api.fetch_sales().await?;
        let sale = sales
            .into_iter()
            .find(|sale| sale.id == sale_id)
            .ok_or(LookupError::SaleNotFound(sale_id))?;
        Ok(sale)
    }

    pub async fn load_for_reweigh_by_id(&mut self, sale_id: i64) -> Result<()> {
        let sale = self.find_sale(sale_id).await?;
        self.load_for_reweigh(&sale).await
    }

    pub fn assign_axle_group(&mut self, row: usize, axle_group_id: i64) -> Result<()> {
        self.apply(EntryEvent::AxleGroupAssigned { row, axle_group_id })
    }

    pub fn set_axle_weight(&mut self, row: usize, weight: Option<f64>) -> Result<()> {
        self.apply(EntryEvent::AxleWeightEntered { row, weight })
    }

    /// Override the number of axle slots laid out for the vehicle type
    pub fn set_slot_count(&mut self, count: usize) -> Result<()> {
        self.apply(EntryEvent::SlotCountEntered(count))
    }

    pub fn set_truck_number(&mut self, truck_number: impl Into<String>) -> Result<()> {
        self.apply(EntryEvent::TruckNumberEntered(truck_number.into()))
    }

    pub fn set_sale_price(&mut self, price: Option<f64>) -> Result<()> {
        self.apply(EntryEvent::SalePriceEntered(price))
    }

    /// Cancel or start fresh
    pub fn reset(&mut self) -> Result<()> {
        self.apply(EntryEvent::Reset)
    }

    /// Validate locally, submit, and reset on success.
    ///
    /// Validation failures never reach the network. A failed submission keeps
    /// the entered rows so the operator can resubmit.
    pub async fn submit(&mut self) -> Result<SaleTransaction> {
        let transaction = self.state.to_transaction()?;
        if let Err(e) = self.api.create_sale(&transaction).await {
            warn!(
                truck_number = %transaction.truck_number,
                error = %e,
                "Sale submission failed; entry kept for retry"
            );
            return Err(e);
        }
        info!(
            truck_number = %transaction.truck_number,
            rows = transaction.axles_weight_list.len(),
            reweigh = transaction.is_reweigh(),
            "Sale submitted"
        );
        self.reset()?;
        Ok(transaction)
    }

    fn current_request(&self, vehicle_type_id: i64) -> Result<TemplateRequest> {
        self.state
            .template_request()
            .ok_or(Error::Lookup(LookupError::VehicleTypeNotFound(vehicle_type_id)))
    }
}
