//! Gross vehicle mass (GVM) rollup over the axle rows of one weigh-in

use weighbridge_types::{AxleRow, GVM_LABEL};

use super::row_classifier::classify;

/// Summary row plus the per-row totals it was derived from
#[derive(Debug, Clone, PartialEq)]
pub struct GvmRollup {
    pub summary: AxleRow,
    /// Sum of per-row overloads over rows with an assigned group
    pub row_overload_total: f64,
    /// Sum of per-row allowances over rows with an assigned group
    pub row_allowance_total: f64,
    pub overloaded_rows: usize,
}

/// Recompute the GVM summary from the non-summary rows.
///
/// Weights are summed over rows that have one; limits over rows with an
/// assigned group. The summary status comes from classifying the sums, so a
/// truck can be over its gross limit with no single axle group overloaded.
pub fn aggregate(rows: &[AxleRow]) -> GvmRollup {
    let total_weight: f64 = rows.iter().filter_map(|row| row.axle_weight).sum();

    let mut total_limit = 0.0;
    let mut row_overload_total = 0.0;
    let mut row_allowance_total = 0.0;
    for row in rows.iter().filter(|row| row.weight_limit.is_some()) {
        total_limit += row.effective_limit();
        row_overload_total += row.overload;
        row_allowance_total += row.allowance;
    }

    let classification = classify(total_weight, total_limit);
    let summary = AxleRow {
        axle_group_id: None,
        group_name: GVM_LABEL.to_string(),
        axle_weight: Some(total_weight),
        weight_limit: Some(total_limit),
        overload: classification.overload,
        allowance: classification.allowance,
        status: classification.status,
    };

    GvmRollup {
        summary,
        row_overload_total,
        row_allowance_total,
        overloaded_rows: rows.iter().filter(|row| row.status.is_overload()).count(),
    }
}
