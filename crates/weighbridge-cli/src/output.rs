//! Output formatting module

use serde::Serialize;
use weighbridge_types::{
    AxleGroupDefinition, AxleRow, OutputFormat, Result, SaleRecord, SaleTransaction,
    VehicleTypeDefinition,
};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{:.0}", v)).unwrap_or_else(|| "-".to_string())
}

pub fn output_axle_groups(output_format: OutputFormat, groups: &[AxleGroupDefinition]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(groups);
    }

    println!("\nAxle Groups ({})", groups.len());
    println!("===============");
    println!("{:>5}  {:<20} {:>10}  Description", "ID", "Name", "Limit");
    for group in groups {
        println!(
            "{:>5}  {:<20} {:>10.0}  {}",
            group.id, group.group_name, group.weight_limit, group.description
        );
    }
    Ok(())
}

pub fn output_vehicle_types(output_format: OutputFormat, types: &[VehicleTypeDefinition]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(types);
    }

    println!("\nVehicle Types ({})", types.len());
    println!("=================");
    println!("{:>5}  {:<20} {:>10}  Axle groups", "ID", "Type", "Price");
    for vehicle_type in types {
        println!(
            "{:>5}  {:<20} {:>10}  {}",
            vehicle_type.id,
            vehicle_type.vehicle_type,
            vehicle_type
                .price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "-".to_string()),
            vehicle_type.axle_group_names()
        );
    }
    Ok(())
}

/// Axle table with the GVM row last
pub fn output_axle_rows(output_format: OutputFormat, rows: &[AxleRow]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(rows);
    }

    println!(
        "\n{:>4}  {:<14} {:>10} {:>10} {:>10} {:>10}  Status",
        "Row", "Axle group", "Weight", "Limit", "Overload", "Allowance"
    );
    let summary_index = rows.len().saturating_sub(1);
    for (i, row) in rows.iter().enumerate() {
        if i == summary_index {
            println!("{}", "-".repeat(76));
        }
        let label = if i == summary_index {
            String::new()
        } else {
            (i + 1).to_string()
        };
        println!(
            "{:>4}  {:<14} {:>10} {:>10} {:>10.0} {:>10.0}  {}",
            label,
            if row.has_group() { row.group_name.as_str() } else { "-" },
            optional(row.axle_weight),
            optional(row.weight_limit),
            row.overload,
            row.allowance,
            row.status
        );
    }
    Ok(())
}

pub fn output_transaction(output_format: OutputFormat, sale: &SaleTransaction) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(sale);
    }

    println!("\nSale");
    println!("====");
    println!("Vehicle type:    {}", sale.vehicle_type_id);
    println!("Truck number:    {}", sale.truck_number);
    println!("Sale price:      {:.2}", sale.sale_price);
    // The GVM row is always last
    println!(
        "Axle rows:       {}",
        sale.axles_weight_list.len().saturating_sub(1)
    );
    if sale.is_reweigh() {
        println!("Re-weigh of:     {}", sale.parent_id);
    }
    Ok(())
}

pub fn output_sales(output_format: OutputFormat, sales: &[&SaleRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(sales);
    }

    println!("\nSales ({})", sales.len());
    println!("=========");
    println!(
        "{:>6}  {:<15} {:<12} {:<14} {:>9} {:>9} {:>9} {:>9}  Status",
        "ID", "Date", "Truck", "Vehicle type", "GVM", "Limit", "Overload", "Allow."
    );
    for sale in sales {
        println!(
            "{:>6}  {:<15} {:<12} {:<14} {:>9.0} {:>9.0} {:>9.0} {:>9.0}  {}{}",
            sale.id,
            sale.created_label(),
            sale.truck_number,
            sale.vehicle_type_name(),
            sale.gvm_axle_weight,
            sale.gvm_weight_limit,
            sale.gvm_overload,
            sale.gvm_allowance,
            sale.gvm_status,
            if sale.parent_id != 0 {
                format!(" (re-weigh of {})", sale.parent_id)
            } else {
                String::new()
            }
        );
    }
    Ok(())
}
