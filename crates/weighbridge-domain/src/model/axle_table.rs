//! Axle row table with its trailing GVM summary row

use weighbridge_types::{AxleRow, LookupError};

use crate::service::{aggregate, classify_row, GvmRollup, ResolvedAxleGroup};

/// Ordered axle rows followed by one derived GVM row.
///
/// Invariant: `rows.len() >= 1` and `rows[len - 1]` is the summary, always
/// recomputed from the rows before it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxleRowTable {
    rows: Vec<AxleRow>,
}

impl Default for AxleRowTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AxleRowTable {
    /// Table with no axle slots, only the summary row
    pub fn new() -> Self {
        Self::with_slots(Vec::new())
    }

    /// Build a table from axle slots; each slot is reclassified and the summary derived
    pub fn with_slots(slots: Vec<AxleRow>) -> Self {
        let mut rows = slots;
        for row in rows.iter_mut() {
            classify_row(row).apply_to(row);
        }
        rows.push(AxleRow::summary());
        let mut table = Self { rows };
        table.recompute_summary();
        table
    }

    /// Build a table from a backend template.
    ///
    /// The template's last row is its GVM row whatever its label; it is
    /// replaced by the locally derived summary.
    pub fn from_template(mut rows: Vec<AxleRow>) -> Self {
        rows.pop();
        Self::with_slots(rows)
    }

    /// Total rows including the summary
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no axle slots
    pub fn is_empty(&self) -> bool {
        self.slot_count() == 0
    }

    pub fn slot_count(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn summary_index(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn rows(&self) -> &[AxleRow] {
        &self.rows
    }

    /// Axle rows without the summary
    pub fn axle_rows(&self) -> &[AxleRow] {
        &self.rows[..self.summary_index()]
    }

    pub fn summary(&self) -> &AxleRow {
        &self.rows[self.summary_index()]
    }

    /// Rows with both an axle group and a weight, in table order
    pub fn recorded_rows(&self) -> Vec<AxleRow> {
        self.axle_rows()
            .iter()
            .filter(|row| row.is_recorded())
            .cloned()
            .collect()
    }

    /// Rows sent as `axelsWeightList`: recorded axle rows, then the GVM row
    pub fn submitted_rows(&self) -> Vec<AxleRow> {
        let mut rows = self.recorded_rows();
        rows.push(self.summary().clone());
        rows
    }

    pub fn rollup(&self) -> GvmRollup {
        aggregate(self.axle_rows())
    }

    /// Store the resolved group on a slot and reclassify its existing weight
    pub fn assign_axle_group(
        &mut self,
        index: usize,
        group: &ResolvedAxleGroup,
    ) -> Result<(), LookupError> {
        let row = self.slot_mut(index)?;
        row.axle_group_id = Some(group.id);
        row.group_name = group.group_name.clone();
        row.weight_limit = Some(group.weight_limit);
        classify_row(row).apply_to(row);
        self.recompute_summary();
        Ok(())
    }

    /// Store a weight (or clear it) on a slot and reclassify
    pub fn set_axle_weight(&mut self, index: usize, weight: Option<f64>) -> Result<(), LookupError> {
        if let Some(w) = weight {
            if !w.is_finite() || w < 0.0 {
                return Err(LookupError::InvalidWeight(w));
            }
        }
        let row = self.slot_mut(index)?;
        row.axle_weight = weight;
        classify_row(row).apply_to(row);
        self.recompute_summary();
        Ok(())
    }

    /// Fix the number of axle slots. Slots past `count` are dropped, missing ones added blank.
    pub fn set_slot_count(&mut self, count: usize) {
        let summary = self.summary_index();
        self.rows.truncate(summary);
        self.rows.resize(count, AxleRow::default());
        self.rows.push(AxleRow::summary());
        self.recompute_summary();
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut AxleRow, LookupError> {
        let len = self.rows.len();
        if index >= len {
            return Err(LookupError::RowOutOfRange { index, len });
        }
        if index == len - 1 {
            return Err(LookupError::SummaryRowNotEditable(index));
        }
        Ok(&mut self.rows[index])
    }

    fn recompute_summary(&mut self) {
        let summary = self.rollup().summary;
        let last = self.summary_index();
        self.rows[last] = summary;
    }
}
