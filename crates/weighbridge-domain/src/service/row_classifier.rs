//! Per-row overload classification

use weighbridge_types::{AxleRow, RowStatus};

/// Overload, allowance and status derived from one weight/limit pair
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Classification {
    pub overload: f64,
    pub allowance: f64,
    pub status: RowStatus,
}

impl Classification {
    /// Copy the derived fields onto a row
    pub fn apply_to(&self, row: &mut AxleRow) {
        row.overload = self.overload;
        row.allowance = self.allowance;
        row.status = self.status;
    }
}

/// Overload boundary. A weight equal to the limit is not an overload.
pub fn is_overload(axle_weight: f64, weight_limit: f64) -> bool {
    axle_weight > weight_limit
}

/// Classify a measured weight against its limit.
///
/// Exactly one branch holds and `overload - allowance == axle_weight - weight_limit`.
pub fn classify(axle_weight: f64, weight_limit: f64) -> Classification {
    if is_overload(axle_weight, weight_limit) {
        Classification {
            overload: axle_weight - weight_limit,
            allowance: 0.0,
            status: RowStatus::Overload,
        }
    } else {
        Classification {
            overload: 0.0,
            allowance: weight_limit - axle_weight,
            status: RowStatus::NotOverload,
        }
    }
}

/// Classify a row; a row without a weight keeps the neutral default
pub fn classify_row(row: &AxleRow) -> Classification {
    match row.axle_weight {
        Some(weight) => classify(weight, row.effective_limit()),
        None => Classification::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_over_limit() {
        let c = classify(1300.0, 1200.0);
        assert_eq!(c.status, RowStatus::Overload);
        assert_eq!(c.overload, 100.0);
        assert_eq!(c.allowance, 0.0);
    }

    #[test]
    fn test_classify_under_limit() {
        let c = classify(1000.0, 1200.0);
        assert_eq!(c.status, RowStatus::NotOverload);
        assert_eq!(c.overload, 0.0);
        assert_eq!(c.allowance, 200.0);
    }

    #[test]
    fn test_classify_at_limit_is_not_overload() {
        let c = classify(1200.0, 1200.0);
        assert_eq!(c.status, RowStatus::NotOverload);
        assert_eq!(c.overload, 0.0);
        assert_eq!(c.allowance, 0.0);
    }

    #[test]
    fn test_signed_identity_holds() {
        let samples = [0.0, 1.0, 599.5, 600.0, 600.5, 1200.0, 25000.0];
        for &weight in &samples {
            for &limit in &samples {
                let c = classify(weight, limit);
                assert!(c.overload >= 0.0 && c.allowance >= 0.0);
                assert!((c.overload - c.allowance - (weight - limit)).abs() < 1e-9);
                assert_eq!(c.status.is_overload(), weight > limit);
            }
        }
    }

    #[test]
    fn test_classify_row_without_weight_is_neutral() {
        let row = AxleRow {
            group_name: "Steer".to_string(),
            weight_limit: Some(6000.0),
            ..Default::default()
        };
        assert_eq!(classify_row(&row), Classification::default());
    }

    #[test]
    fn test_classify_row_without_group_uses_zero_limit() {
        let row = AxleRow {
            axle_weight: Some(500.0),
            ..Default::default()
        };
        let c = classify_row(&row);
        assert_eq!(c.status, RowStatus::Overload);
        assert_eq!(c.overload, 500.0);
    }
}
