//! Core types for weigh-in entry, setup data and sales history
//!
//! Field names on the wire follow the backend (`axelWeight`, `axelsWeightList`,
//! `type`, ...). Numeric fields are decoded leniently because the backend and
//! older clients send numbers, numeric strings, `""` and `null` interchangeably.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Label used for the synthetic gross-vehicle-mass row
pub const GVM_LABEL: &str = "GVM";

/// Deserialize null as default value
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

/// Deserialize a number that may arrive as a number, a numeric string, "" or null
fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawNumber::Number(n)) => Ok(Some(n)),
        Some(RawNumber::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid number '{}'", text)))
        }
    }
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    optional_number(deserializer).map(|n| n.unwrap_or(0.0))
}

/// Overload classification of a single axle row or of the GVM summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RowStatus {
    #[default]
    #[serde(rename = "Not Overload")]
    NotOverload,
    Overload,
}

impl RowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::NotOverload => "Not Overload",
            RowStatus::Overload => "Overload",
        }
    }

    pub fn is_overload(&self) -> bool {
        matches!(self, RowStatus::Overload)
    }
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// Anything other than "Overload" (including "" and null) reads as not overloaded.
impl<'de> Deserialize<'de> for RowStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("overload") => RowStatus::Overload,
            _ => RowStatus::NotOverload,
        })
    }
}

/// Axle group reference data (fetched from the backend, read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxleGroupDefinition {
    pub id: i64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub group_name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: String,
    /// Configured weight limit
    #[serde(default, deserialize_with = "number_or_zero")]
    pub weight_limit: f64,
}

/// Axle group entry inside a vehicle type, either a bare id or a full definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxleGroupRef {
    Id(i64),
    Definition(AxleGroupDefinition),
}

impl AxleGroupRef {
    pub fn id(&self) -> i64 {
        match self {
            AxleGroupRef::Id(id) => *id,
            AxleGroupRef::Definition(def) => def.id,
        }
    }
}

/// Vehicle type reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleTypeDefinition {
    pub id: i64,
    #[serde(rename = "type", default, deserialize_with = "null_to_default")]
    pub vehicle_type: String,
    /// Unit sale price for one weighing
    #[serde(default, deserialize_with = "optional_number")]
    pub price: Option<f64>,
    /// Axle groups in slot order
    #[serde(
        rename = "axels",
        alias = "axleGroups",
        default,
        deserialize_with = "null_to_default"
    )]
    pub axle_groups: Vec<AxleGroupRef>,
}

impl VehicleTypeDefinition {
    pub fn axle_group_ids(&self) -> Vec<i64> {
        self.axle_groups.iter().map(AxleGroupRef::id).collect()
    }

    /// Number of axle-row slots (excluding the GVM row)
    pub fn slot_count(&self) -> usize {
        self.axle_groups.len()
    }

    /// Comma separated axle group names, when the backend sent full definitions
    pub fn axle_group_names(&self) -> String {
        self.axle_groups
            .iter()
            .map(|group| match group {
                AxleGroupRef::Id(id) => format!("#{}", id),
                AxleGroupRef::Definition(def) => def.group_name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One row of the weigh-in entry table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxleRow {
    /// Axle group chosen for this slot, when known
    #[serde(rename = "axelGroupId", default, skip_serializing_if = "Option::is_none")]
    pub axle_group_id: Option<i64>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub group_name: String,
    /// Measured weight; `None` until the operator enters one
    #[serde(rename = "axelWeight", default, deserialize_with = "optional_number")]
    pub axle_weight: Option<f64>,
    /// Limit copied from the axle group; `None` until a group is assigned
    #[serde(default, deserialize_with = "optional_number")]
    pub weight_limit: Option<f64>,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub overload: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub allowance: f64,
    #[serde(default)]
    pub status: RowStatus,
}

impl AxleRow {
    /// Blank GVM summary row
    pub fn summary() -> Self {
        Self {
            group_name: GVM_LABEL.to_string(),
            ..Default::default()
        }
    }

    pub fn has_group(&self) -> bool {
        !self.group_name.trim().is_empty()
    }

    /// Row carries both an axle group and a measured weight
    pub fn is_recorded(&self) -> bool {
        self.has_group() && self.axle_weight.is_some()
    }

    /// Limit used for classification (0 until a group is assigned)
    pub fn effective_limit(&self) -> f64 {
        self.weight_limit.unwrap_or(0.0)
    }
}

/// Sale submitted for a weigh-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTransaction {
    #[serde(rename = "vehicleType")]
    pub vehicle_type_id: i64,
    pub truck_number: String,
    pub sale_price: f64,
    #[serde(rename = "axelsWeightList")]
    pub axles_weight_list: Vec<AxleRow>,
    /// 0 for a fresh weigh-in, otherwise the sale this re-weigh derives from
    pub parent_id: i64,
}

impl SaleTransaction {
    pub fn is_reweigh(&self) -> bool {
        self.parent_id != 0
    }
}

/// Vehicle type as embedded in a sale record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleTypeSummary {
    pub id: i64,
    #[serde(rename = "type", default, deserialize_with = "null_to_default")]
    pub vehicle_type: String,
}

/// Sale record from the sales history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub truck_number: String,
    #[serde(default)]
    pub vehicle_type: Option<VehicleTypeSummary>,
    #[serde(rename = "gvmAxelWeight", default, deserialize_with = "number_or_zero")]
    pub gvm_axle_weight: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub gvm_weight_limit: f64,
    #[serde(rename = "gvmWeightStatus", default)]
    pub gvm_status: RowStatus,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub gvm_overload: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub gvm_allowance: f64,
    #[serde(default, deserialize_with = "optional_number")]
    pub sale_price: Option<f64>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub parent_id: i64,
    #[serde(default)]
    pub created_time: Option<String>,
}

impl SaleRecord {
    pub fn vehicle_type_id(&self) -> Option<i64> {
        self.vehicle_type.as_ref().map(|vt| vt.id)
    }

    pub fn vehicle_type_name(&self) -> &str {
        self.vehicle_type
            .as_ref()
            .map(|vt| vt.vehicle_type.as_str())
            .unwrap_or("")
    }

    /// Parse `createdTime` (RFC 3339 or a naive ISO timestamp)
    pub fn created_at(&self) -> Option<chrono::NaiveDateTime> {
        let raw = self.created_time.as_deref()?.trim();
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_local());
        }
        let formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
        formats
            .iter()
            .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(raw, fmt).ok())
    }

    /// Display form used in the history table, e.g. "07/03 02:15 PM"
    pub fn created_label(&self) -> String {
        match self.created_at() {
            Some(dt) => dt.format("%d/%m %I:%M %p").to_string(),
            None => self.created_time.clone().unwrap_or_default(),
        }
    }
}

/// Payload for creating an axle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAxleGroup {
    pub group_name: String,
    pub description: String,
    /// Weight limit for the group
    pub allowed: f64,
}

/// Payload for creating a vehicle type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicleType {
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub price: f64,
    #[serde(rename = "axelGroup")]
    pub axle_group_ids: Vec<i64>,
}

/// Login credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Rendered weight-sale receipt
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub sale_id: i64,
    pub pdf: Vec<u8>,
}

impl Receipt {
    pub fn is_pdf(&self) -> bool {
        self.pdf.starts_with(b"%PDF")
    }

    pub fn default_file_name(&self) -> String {
        format!("receipt-{}.pdf", self.sale_id)
    }
}
