//! Axle group limit lookup

use weighbridge_types::{AxleGroupDefinition, LookupError};

/// Display name and limit resolved for one axle group
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAxleGroup {
    pub id: i64,
    pub group_name: String,
    pub weight_limit: f64,
}

impl From<&AxleGroupDefinition> for ResolvedAxleGroup {
    fn from(def: &AxleGroupDefinition) -> Self {
        Self {
            id: def.id,
            group_name: def.group_name.clone(),
            weight_limit: def.weight_limit,
        }
    }
}

/// Resolve an axle group id against the fetched definitions (unsorted, keyed by id)
pub fn resolve_axle_group(
    axle_group_id: i64,
    definitions: &[AxleGroupDefinition],
) -> Result<ResolvedAxleGroup, LookupError> {
    definitions
        .iter()
        .find(|def| def.id == axle_group_id)
        .map(ResolvedAxleGroup::from)
        .ok_or(LookupError::AxleGroupNotFound(axle_group_id))
}
