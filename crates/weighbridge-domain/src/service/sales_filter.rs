//! Keyword search over the sales history

use weighbridge_types::SaleRecord;

/// Case-insensitive substring match over truck number, vehicle type, GVM status and date.
/// A blank keyword matches everything.
pub fn filter_sales<'a>(records: &'a [SaleRecord], keyword: &str) -> Vec<&'a SaleRecord> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| {
            [
                record.truck_number.clone(),
                record.vehicle_type_name().to_string(),
                record.gvm_status.label().to_string(),
                record.created_label(),
                record.id.to_string(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
