//! Descriptive statistics for numeric columns.

use rayon::prelude::*;
use serde::Serialize;

use crate::processing::reduce::{mean, numeric_values, quantile_sorted, sample_std};
use crate::types::DataSet;

/// Summary of one numeric column. Statistics of an empty column are NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescription {
    pub column: String,
    /// Present (non-missing) numeric cells.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN below two values.
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Describe every numeric column, in declared order.
///
/// Columns are summarized in parallel on the rayon global pool.
pub fn describe(dataset: &DataSet) -> Vec<ColumnDescription> {
    dataset
        .schema
        .fields
        .par_iter()
        .enumerate()
        .filter(|(_, field)| field.is_numeric())
        .map(|(idx, field)| {
            let mut values = numeric_values(dataset, idx);
            values.sort_by(f64::total_cmp);
            let q = |p: f64| quantile_sorted(&values, p).unwrap_or(f64::NAN);
            ColumnDescription {
                column: field.name.clone(),
                count: values.len(),
                mean: mean(&values).unwrap_or(f64::NAN),
                std: sample_std(&values).unwrap_or(f64::NAN),
                min: q(0.0),
                p25: q(0.25),
                p50: q(0.5),
                p75: q(0.75),
                max: q(1.0),
            }
        })
        .collect()
}
