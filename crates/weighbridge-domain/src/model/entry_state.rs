//! Weigh-in entry state as a reducer: `(state, event) -> state'`

use tracing::debug;
use weighbridge_types::{AxleRow, LookupError, SaleRecord, SaleTransaction, ValidationError};

use super::axle_table::AxleRowTable;
use super::reference::ReferenceData;
use crate::service::resolve_axle_group;

/// Operator input and fetch completions that change the entry state
#[derive(Debug, Clone, PartialEq)]
pub enum EntryEvent {
    /// Clear the table and lay out one slot per axle group of the vehicle type.
    /// Rejected with `AxleGroupNotFound` when a group is missing from the reference data.
    VehicleTypeSelected(i64),
    /// Axle-row template arrived for the fetch tagged with `generation`
    TemplateLoaded { generation: u64, rows: Vec<AxleRow> },
    AxleGroupAssigned { row: usize, axle_group_id: i64 },
    AxleWeightEntered { row: usize, weight: Option<f64> },
    /// Operator-entered number of axle slots, overriding the vehicle type's group count
    SlotCountEntered(usize),
    TruckNumberEntered(String),
    SalePriceEntered(Option<f64>),
    /// Start a re-weigh derived from a prior sale
    ReweighLoaded {
        sale_id: i64,
        truck_number: String,
        vehicle_type_id: i64,
    },
    Reset,
}

impl EntryEvent {
    /// Re-weigh event for a history record. Records without a vehicle type
    /// report `VehicleTypeNotFound(0)`.
    pub fn reweigh_of(sale: &SaleRecord) -> Result<Self, LookupError> {
        let vehicle_type_id = sale
            .vehicle_type_id()
            .ok_or(LookupError::VehicleTypeNotFound(0))?;
        Ok(EntryEvent::ReweighLoaded {
            sale_id: sale.id,
            truck_number: sale.truck_number.clone(),
            vehicle_type_id,
        })
    }
}

/// Template fetch to issue for the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateRequest {
    pub generation: u64,
    pub vehicle_type_id: i64,
    /// Prior sale for a re-weigh
    pub parent_id: Option<i64>,
}

/// State of one weigh-in entry session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryState {
    pub vehicle_type_id: Option<i64>,
    pub truck_number: String,
    pub sale_price: Option<f64>,
    /// 0 for a fresh weigh-in
    pub parent_id: i64,
    pub table: AxleRowTable,
    /// Bumped on every selection change; template responses carrying another value are stale
    pub generation: u64,
}

impl EntryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. On error the caller keeps the previous state.
    pub fn apply(&self, event: EntryEvent, reference: &ReferenceData) -> Result<Self, LookupError> {
        let mut next = self.clone();
        match event {
            EntryEvent::VehicleTypeSelected(id) => {
                next.select_vehicle_type(id, reference)?;
            }
            EntryEvent::TemplateLoaded { generation, rows } => {
                if generation != self.generation {
                    debug!(
                        generation,
                        current = self.generation,
                        "Discarding stale axle template"
                    );
                    return Ok(next);
                }
                next.table = AxleRowTable::from_template(rows);
            }
            EntryEvent::AxleGroupAssigned { row, axle_group_id } => {
                let group = resolve_axle_group(axle_group_id, &reference.axle_groups)?;
                next.table.assign_axle_group(row, &group)?;
            }
            EntryEvent::AxleWeightEntered { row, weight } => {
                next.table.set_axle_weight(row, weight)?;
            }
            EntryEvent::SlotCountEntered(count) => {
                next.table.set_slot_count(count);
            }
            EntryEvent::TruckNumberEntered(truck_number) => {
                next.truck_number = truck_number.trim().to_string();
            }
            EntryEvent::SalePriceEntered(price) => {
                next.sale_price = price;
            }
            EntryEvent::ReweighLoaded {
                sale_id,
                truck_number,
                vehicle_type_id,
            } => {
                next.parent_id = sale_id;
                next.truck_number = truck_number.trim().to_string();
                next.select_vehicle_type(vehicle_type_id, reference)?;
            }
            EntryEvent::Reset => {
                next = EntryState {
                    generation: self.generation + 1,
                    ..EntryState::default()
                };
            }
        }
        Ok(next)
    }

    fn select_vehicle_type(&mut self, id: i64, reference: &ReferenceData) -> Result<(), LookupError> {
        let vehicle_type = reference.vehicle_type(id)?;
        let slots = vehicle_type
            .axle_group_ids()
            .into_iter()
            .map(|group_id| -> Result<AxleRow, LookupError> {
                let group = resolve_axle_group(group_id, &reference.axle_groups)?;
                Ok(AxleRow {
                    axle_group_id: Some(group.id),
                    group_name: group.group_name,
                    weight_limit: Some(group.weight_limit),
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.vehicle_type_id = Some(id);
        self.sale_price = vehicle_type.price;
        self.table = AxleRowTable::with_slots(slots);
        self.generation += 1;
        Ok(())
    }

    /// Template fetch matching the current vehicle type selection, if any
    pub fn template_request(&self) -> Option<TemplateRequest> {
        self.vehicle_type_id.map(|vehicle_type_id| TemplateRequest {
            generation: self.generation,
            vehicle_type_id,
            parent_id: (self.parent_id != 0).then_some(self.parent_id),
        })
    }

    pub fn is_reweigh(&self) -> bool {
        self.parent_id != 0
    }

    /// Validate locally and build the sale to submit.
    ///
    /// Only axle rows count towards validation; the derived GVM row is appended
    /// to `axelsWeightList` after them.
    pub fn to_transaction(&self) -> Result<SaleTransaction, ValidationError> {
        if self.table.recorded_rows().is_empty() {
            return Err(ValidationError::NoAxleWeights);
        }
        let vehicle_type_id = self
            .vehicle_type_id
            .ok_or(ValidationError::MissingVehicleType)?;
        if self.truck_number.trim().is_empty() {
            return Err(ValidationError::MissingTruckNumber);
        }
        let sale_price = self.sale_price.ok_or(ValidationError::MissingSalePrice)?;

        Ok(SaleTransaction {
            vehicle_type_id,
            truck_number: self.truck_number.clone(),
            sale_price,
            axles_weight_list: self.table.submitted_rows(),
            parent_id: self.parent_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weighbridge_types::{
        AxleGroupDefinition, AxleGroupRef, RowStatus, VehicleTypeDefinition, GVM_LABEL,
    };

    fn reference() -> ReferenceData {
        ReferenceData {
            axle_groups: vec![
                AxleGroupDefinition {
                    id: 1,
                    group_name: "Single".to_string(),
                    description: String::new(),
                    weight_limit: 600.0,
                },
                AxleGroupDefinition {
                    id: 2,
                    group_name: "Tandem".to_string(),
                    description: String::new(),
                    weight_limit: 1200.0,
                },
            ],
            vehicle_types: vec![
                VehicleTypeDefinition {
                    id: 10,
                    vehicle_type: "Rigid".to_string(),
                    price: Some(20.0),
                    axle_groups: vec![AxleGroupRef::Id(1), AxleGroupRef::Id(2)],
                },
                VehicleTypeDefinition {
                    id: 12,
                    vehicle_type: "Unknown group".to_string(),
                    price: Some(15.0),
                    axle_groups: vec![AxleGroupRef::Id(1), AxleGroupRef::Id(99)],
                },
            ],
        }
    }

    fn apply_all(events: Vec<EntryEvent>) -> EntryState {
        let reference = reference();
        events
            .into_iter()
            .fold(EntryState::new(), |state, event| state.apply(event, &reference).unwrap())
    }

    #[test]
    fn test_vehicle_type_lays_out_slots_and_price() {
        let state = apply_all(vec![EntryEvent::VehicleTypeSelected(10)]);
        assert_eq!(state.table.slot_count(), 2);
        assert_eq!(state.table.rows()[1].group_name, "Tandem");
        assert_eq!(state.sale_price, Some(20.0));
        assert_eq!(state.generation, 1);
        assert_eq!(state.table.summary().weight_limit, Some(1800.0));
    }

    #[test]
    fn test_assign_axle_group_is_idempotent() {
        let once = apply_all(vec![
            EntryEvent::VehicleTypeSelected(10),
            EntryEvent::AxleWeightEntered { row: 0, weight: Some(1000.0) },
            EntryEvent::AxleGroupAssigned { row: 0, axle_group_id: 2 },
        ]);
        let reference = reference();
        let twice = once
            .apply(EntryEvent::AxleGroupAssigned { row: 0, axle_group_id: 2 }, &reference)
            .unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.table.rows()[0].allowance, 200.0);
    }

    #[test]
    fn test_unknown_axle_group_leaves_state_unchanged() {
        let state = apply_all(vec![EntryEvent::VehicleTypeSelected(10)]);
        let err = state
            .apply(EntryEvent::AxleGroupAssigned { row: 0, axle_group_id: 42 }, &reference())
            .unwrap_err();
        assert_eq!(err, LookupError::AxleGroupNotFound(42));
        assert_eq!(state.table.rows()[0].group_name, "Single");
    }

    #[test]
    fn test_reassign_recomputes_against_new_limit() {
        let state = apply_all(vec![
            EntryEvent::VehicleTypeSelected(10),
            EntryEvent::AxleWeightEntered { row: 0, weight: Some(700.0) },
        ]);
        assert_eq!(state.table.rows()[0].status, RowStatus::Overload);
        let state = state
            .apply(EntryEvent::AxleGroupAssigned { row: 0, axle_group_id: 2 }, &reference())
            .unwrap();
        assert_eq!(state.table.rows()[0].status, RowStatus::NotOverload);
        assert_eq!(state.table.rows()[0].allowance, 500.0);
    }

    #[test]
    fn test_stale_template_is_discarded() {
        let state = apply_all(vec![EntryEvent::VehicleTypeSelected(10)]);
        let stale_generation = state.generation;
        let state = state
            .apply(EntryEvent::VehicleTypeSelected(10), &reference())
            .unwrap();
        let template = vec![AxleRow::default(), AxleRow::summary()];
        let after = state
            .apply(
                EntryEvent::TemplateLoaded { generation: stale_generation, rows: template.clone() },
                &reference(),
            )
            .unwrap();
        assert_eq!(after.table.slot_count(), 2);

        let current = state.generation;
        let after = state
            .apply(EntryEvent::TemplateLoaded { generation: current, rows: template }, &reference())
            .unwrap();
        assert_eq!(after.table.slot_count(), 1);
    }

    #[test]
    fn test_validation_rejects_table_without_weights() {
        let state = apply_all(vec![
            EntryEvent::TemplateLoaded {
                generation: 0,
                rows: vec![AxleRow::default(), AxleRow::summary()],
            },
            EntryEvent::TruckNumberEntered("T123ABC".to_string()),
        ]);
        assert_eq!(state.table.len(), 2);
        assert_eq!(state.to_transaction(), Err(ValidationError::NoAxleWeights));
    }

    #[test]
    fn test_transaction_contains_recorded_rows_then_gvm() {
        let state = apply_all(vec![
            EntryEvent::VehicleTypeSelected(10),
            EntryEvent::TruckNumberEntered(" T123ABC ".to_string()),
            EntryEvent::AxleWeightEntered { row: 1, weight: Some(1250.0) },
        ]);
        let tx = state.to_transaction().unwrap();
        assert_eq!(tx.vehicle_type_id, 10);
        assert_eq!(tx.truck_number, "T123ABC");
        assert_eq!(tx.sale_price, 20.0);
        assert_eq!(tx.parent_id, 0);
        assert_eq!(tx.axles_weight_list.len(), 2);
        assert_eq!(tx.axles_weight_list[0].group_name, "Tandem");
        assert_eq!(tx.axles_weight_list[0].status, RowStatus::Overload);
        let gvm = &tx.axles_weight_list[1];
        assert_eq!(gvm.group_name, GVM_LABEL);
        assert_eq!(gvm.axle_weight, Some(1250.0));
        assert_eq!(gvm.weight_limit, Some(1800.0));
        assert_eq!(gvm.status, RowStatus::NotOverload);
    }

    #[test]
    fn test_validation_requires_truck_number() {
        let state = apply_all(vec![
            EntryEvent::VehicleTypeSelected(10),
            EntryEvent::AxleWeightEntered { row: 0, weight: Some(100.0) },
        ]);
        assert_eq!(state.to_transaction(), Err(ValidationError::MissingTruckNumber));
    }

    #[test]
    fn test_reweigh_then_reset() {
        let state = apply_all(vec![EntryEvent::ReweighLoaded {
            sale_id: 55,
            truck_number: "T777AAA".to_string(),
            vehicle_type_id: 10,
        }]);
        assert_eq!(state.parent_id, 55);
        assert_eq!(state.truck_number, "T777AAA");
        assert_eq!(state.table.slot_count(), 2);
        assert!(state.table.rows()[0].axle_weight.is_none());
        assert_eq!(
            state.template_request().map(|r| r.parent_id),
            Some(Some(55))
        );

        let reset = state.apply(EntryEvent::Reset, &reference()).unwrap();
        assert_eq!(reset.parent_id, 0);
        assert!(reset.table.is_empty());
        assert!(reset.generation > state.generation);
    }

    #[test]
    fn test_vehicle_type_with_unknown_group_is_rejected() {
        let state = apply_all(vec![EntryEvent::VehicleTypeSelected(10)]);
        let err = state
            .apply(EntryEvent::VehicleTypeSelected(12), &reference())
            .unwrap_err();
        assert_eq!(err, LookupError::AxleGroupNotFound(99));
        assert_eq!(state.vehicle_type_id, Some(10));
        assert_eq!(state.table.slot_count(), 2);
    }

    #[test]
    fn test_vehicle_type_without_axle_groups_loaded() {
        let reference = ReferenceData {
            axle_groups: Vec::new(),
            ..reference()
        };
        let err = EntryState::new()
            .apply(EntryEvent::VehicleTypeSelected(10), &reference)
            .unwrap_err();
        assert_eq!(err, LookupError::AxleGroupNotFound(1));
    }

    #[test]
    fn test_operator_slot_count_overrides_layout() {
        let state = apply_all(vec![
            EntryEvent::VehicleTypeSelected(10),
            EntryEvent::SlotCountEntered(4),
            EntryEvent::AxleGroupAssigned { row: 3, axle_group_id: 2 },
            EntryEvent::AxleWeightEntered { row: 3, weight: Some(1000.0) },
        ]);
        assert_eq!(state.table.slot_count(), 4);
        assert_eq!(state.table.rows()[1].group_name, "Tandem");
        assert_eq!(state.table.summary().weight_limit, Some(3000.0));
        assert_eq!(state.table.summary().allowance, 2000.0);
    }
}
