//! Reductions over selected voxel values

use log::debug;
use serde::Serialize;

use crate::errors::{RoiError, RoiResult};

use super::kind::StatKind;

/// Reduce a sequence of values with the named statistic
///
/// The result does not depend on the order of `values`. Sum of an empty
/// sequence is 0; every other reduction fails with `EmptyInput` so callers
/// can tell "zero intensity" apart from "no voxels selected". A NaN
/// anywhere in `values` makes every statistic NaN.
///
/// # Arguments
/// * `values` - Values of the selected voxels
/// * `kind` - Reduction to apply
///
/// # Returns
/// The reduced scalar or an error
pub fn reduce(values: &[f64], kind: StatKind) -> RoiResult<f64> {
    if values.is_empty() && !kind.defined_on_empty() {
        debug!("Refusing to compute {} of an empty selection", kind);
        return Err(RoiError::EmptyInput(kind));
    }

    if values.iter().any(|v| v.is_nan()) {
        debug!("NaN among {} values, {} is NaN", values.len(), kind);
        return Ok(f64::NAN);
    }

    let result = match kind {
        StatKind::Sum => sum(values),
        StatKind::Mean => mean(values),
        StatKind::Median => median(values),
        StatKind::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        StatKind::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        StatKind::Var => variance(values),
        StatKind::Std => variance(values).sqrt(),
    };

    Ok(result)
}

fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

fn mean(values: &[f64]) -> f64 {
    sum(values) / values.len() as f64
}

/// Middle value, or the mean of the two middle values for even counts
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population variance (divisor n), two-pass
fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// All reductions of one value sequence
///
/// `sum` and `count` are always present; the other fields are None for an
/// empty selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatSummary {
    pub count: usize,
    pub sum: f64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub var: Option<f64>,
    pub std: Option<f64>,
}

impl StatSummary {
    /// Compute every statistic of a value sequence
    pub fn from_values(values: &[f64]) -> Self {
        let optional = |kind: StatKind| reduce(values, kind).ok();
        StatSummary {
            count: values.len(),
            sum: sum(values),
            mean: optional(StatKind::Mean),
            median: optional(StatKind::Median),
            min: optional(StatKind::Min),
            max: optional(StatKind::Max),
            var: optional(StatKind::Var),
            std: optional(StatKind::Std),
        }
    }

    /// Look up one statistic, with the same empty-input rule as `reduce`
    pub fn get(&self, kind: StatKind) -> RoiResult<f64> {
        let value = match kind {
            StatKind::Sum => Some(self.sum),
            StatKind::Mean => self.mean,
            StatKind::Median => self.median,
            StatKind::Min => self.min,
            StatKind::Max => self.max,
            StatKind::Var => self.var,
            StatKind::Std => self.std,
        };
        value.ok_or(RoiError::EmptyInput(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_nan_propagates_to_every_statistic() {
        let values = [f64::NAN, 1.0, 2.0];
        for kind in StatKind::ALL {
            assert!(reduce(&values, kind).unwrap().is_nan(), "{}", kind);
        }
        assert!(reduce(&[f64::NAN], StatKind::Min).unwrap().is_nan());

        let summary = StatSummary::from_values(&[2.0, f64::NAN]);
        assert!(summary.sum.is_nan());
        assert!(summary.median.unwrap().is_nan());
        assert!(summary.max.unwrap().is_nan());
    }

    #[test]
    fn test_reference_values() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(reduce(&values, StatKind::Sum).unwrap(), 10.0);
        assert_eq!(reduce(&values, StatKind::Mean).unwrap(), 2.5);
        assert_eq!(reduce(&values, StatKind::Median).unwrap(), 2.5);
        assert_eq!(reduce(&values, StatKind::Min).unwrap(), 1.0);
        assert_eq!(reduce(&values, StatKind::Max).unwrap(), 4.0);
        assert!((reduce(&values, StatKind::Var).unwrap() - 1.25).abs() < EPS);
        assert!((reduce(&values, StatKind::Std).unwrap() - 1.25f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn test_order_independent() {
        let values = [4.0, 1.0, 3.0, 2.0];
        let shuffled = [2.0, 4.0, 1.0, 3.0];
        for kind in StatKind::ALL {
            let a = reduce(&values, kind).unwrap();
            let b = reduce(&shuffled, kind).unwrap();
            assert!((a - b).abs() < EPS, "{} differs: {} vs {}", kind, a, b);
        }
    }

    #[test]
    fn test_odd_median() {
        assert_eq!(reduce(&[7.0, -1.0, 3.0], StatKind::Median).unwrap(), 3.0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(reduce(&[], StatKind::Sum).unwrap(), 0.0);
        for kind in StatKind::ALL.iter().filter(|k| **k != StatKind::Sum) {
            assert!(matches!(reduce(&[], *kind), Err(RoiError::EmptyInput(k)) if k == *kind));
        }
    }

    #[test]
    fn test_summary_matches_reduce() {
        let values = [1.0, 2.0, 3.0, 4.0, 10.0];
        let summary = StatSummary::from_values(&values);
        assert_eq!(summary.count, 5);
        for kind in StatKind::ALL {
            assert_eq!(summary.get(kind).unwrap(), reduce(&values, kind).unwrap());
        }

        let empty = StatSummary::from_values(&[]);
        assert_eq!(empty.get(StatKind::Sum).unwrap(), 0.0);
        assert!(matches!(empty.get(StatKind::Median), Err(RoiError::EmptyInput(StatKind::Median))));
    }
}
