//! Sales report export (Excel and CSV)

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use weighbridge_types::{Error, Result, SaleRecord};

const HEADERS: [&str; 11] = [
    "Sale ID",
    "Date",
    "Truck Number",
    "Vehicle Type",
    "GVM Axle Weight",
    "GVM Weight Limit",
    "Status",
    "GVM Overload",
    "GVM Allowance",
    "Sale Price",
    "Parent Sale",
];

/// Totals shown under the sales table
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalesTotals {
    pub count: usize,
    pub overloaded: usize,
    pub reweighs: usize,
    pub revenue: f64,
}

impl SalesTotals {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        Self {
            count: records.len(),
            overloaded: records.iter().filter(|r| r.gvm_status.is_overload()).count(),
            reweighs: records.iter().filter(|r| r.parent_id != 0).count(),
            revenue: records.iter().filter_map(|r| r.sale_price).sum(),
        }
    }
}

/// Export by file extension (`.xlsx` or `.csv`)
pub fn export_sales(records: &[SaleRecord], output_path: &Path) -> Result<()> {
    let extension = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("xlsx") => export_sales_to_excel(records, output_path),
        Some("csv") => export_sales_to_csv(records, output_path),
        _ => Err(Error::Export(format!(
            "unsupported report format: {} (use .xlsx or .csv)",
            output_path.display()
        ))),
    }
}

fn parent_label(record: &SaleRecord) -> String {
    if record.parent_id == 0 {
        String::new()
    } else {
        record.parent_id.to_string()
    }
}

pub fn export_sales_to_csv(records: &[SaleRecord], output_path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(output_path).map_err(|e| Error::Export(e.to_string()))?;
    writer
        .write_record(HEADERS)
        .map_err(|e| Error::Export(e.to_string()))?;

    for record in records {
        writer
            .write_record([
                record.id.to_string(),
                record.created_label(),
                record.truck_number.clone(),
                record.vehicle_type_name().to_string(),
                record.gvm_axle_weight.to_string(),
                record.gvm_weight_limit.to_string(),
                record.gvm_status.label().to_string(),
                record.gvm_overload.to_string(),
                record.gvm_allowance.to_string(),
                record.sale_price.map(|p| format!("{:.2}", p)).unwrap_or_default(),
                parent_label(record),
            ])
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

pub fn export_sales_to_excel(records: &[SaleRecord], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_sales_sheet(sheet, records)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Export(e.to_string()))?;

    Ok(())
}

fn write_sales_sheet(sheet: &mut Worksheet, records: &[SaleRecord]) -> Result<()> {
    sheet
        .set_name("Sales")
        .map_err(|e| Error::Export(e.to_string()))?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        write_sales_row(sheet, row, record).map_err(|e| Error::Export(e.to_string()))?;
    }

    // Totals
    let totals = SalesTotals::from_records(records);
    let row = (records.len() + 2) as u32;
    sheet
        .write_string_with_format(row, 0, "Total sales", &header_format)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_number(row, 1, totals.count as f64)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_string_with_format(row + 1, 0, "Overloaded", &header_format)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_number(row + 1, 1, totals.overloaded as f64)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_string_with_format(row + 2, 0, "Re-weighs", &header_format)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_number(row + 2, 1, totals.reweighs as f64)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_string_with_format(row + 3, 0, "Revenue", &header_format)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .write_number(row + 3, 1, totals.revenue)
        .map_err(|e| Error::Export(e.to_string()))?;

    Ok(())
}

fn write_sales_row(
    sheet: &mut Worksheet,
    row: u32,
    record: &SaleRecord,
) -> std::result::Result<(), rust_xlsxwriter::XlsxError> {
    sheet.write_number(row, 0, record.id as f64)?;
    sheet.write_string(row, 1, record.created_label())?;
    sheet.write_string(row, 2, &record.truck_number)?;
    sheet.write_string(row, 3, record.vehicle_type_name())?;
    sheet.write_number(row, 4, record.gvm_axle_weight)?;
    sheet.write_number(row, 5, record.gvm_weight_limit)?;
    sheet.write_string(row, 6, record.gvm_status.label())?;
    sheet.write_number(row, 7, record.gvm_overload)?;
    sheet.write_number(row, 8, record.gvm_allowance)?;
    if let Some(price) = record.sale_price {
        sheet.write_number(row, 9, price)?;
    }
    if record.parent_id != 0 {
        sheet.write_number(row, 10, record.parent_id as f64)?;
    }
    Ok(())
}
