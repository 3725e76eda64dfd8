//! Column reductions for [`crate::types::DataSet`].

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including missing cells).
    Count,
    /// Sum numeric values, ignoring missing cells.
    Sum,
    /// Minimum numeric value, ignoring missing cells.
    Min,
    /// Maximum numeric value, ignoring missing cells.
    Max,
    /// Arithmetic mean of present numeric values, as Float64.
    Mean,
    /// Median of present numeric values (midpoint average for even counts), as Float64.
    Median,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For numeric ops, returns `Some(Value::Null)` if there are no present values or the
///   column is not numeric.
/// - For `Count`, always returns `Some(Value::Int64(row_count))`.
/// - An Int64 `Sum` that does not fit in `i64` is returned as a Float64 sum.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;
    let field = dataset.schema.fields.get(idx)?;

    if op == ReduceOp::Count {
        return Some(Value::Int64(dataset.row_count() as i64));
    }
    if !field.is_numeric() {
        return Some(Value::Null);
    }

    let out = match op {
        ReduceOp::Mean => mean(&numeric_values(dataset, idx)).map(Value::Float64),
        ReduceOp::Median => median(&mut numeric_values(dataset, idx)).map(Value::Float64),
        _ => match field.data_type {
            DataType::Int64 => match fold_int64(dataset, idx, op) {
                Some(total) => total.map(Value::Int64),
                None => fold_float64(dataset, idx, op).map(Value::Float64),
            },
            _ => fold_float64(dataset, idx, op).map(Value::Float64),
        },
    };
    Some(out.unwrap_or(Value::Null))
}

/// Outer `None` means the sum overflowed `i64`.
fn fold_int64(dataset: &DataSet, idx: usize, op: ReduceOp) -> Option<Option<i64>> {
    dataset.column(idx).try_fold(None::<i64>, |acc, v| match v {
        Value::Int64(v) => Some(Some(match (op, acc) {
            (ReduceOp::Sum, Some(a)) => a.checked_add(*v)?,
            (ReduceOp::Min, Some(a)) => a.min(*v),
            (ReduceOp::Max, Some(a)) => a.max(*v),
            (_, _) => *v,
        })),
        _ => Some(acc),
    })
}

fn fold_float64(dataset: &DataSet, idx: usize, op: ReduceOp) -> Option<f64> {
    dataset
        .column(idx)
        .filter_map(Value::as_f64)
        .fold(None, |acc, v| {
            Some(match (op, acc) {
                (ReduceOp::Sum, Some(a)) => a + v,
                (ReduceOp::Min, Some(a)) => a.min(v),
                (ReduceOp::Max, Some(a)) => a.max(v),
                (_, _) => v,
            })
        })
}

/// Present numeric cells of column `idx`, in row order.
pub(crate) fn numeric_values(dataset: &DataSet, idx: usize) -> Vec<f64> {
    dataset.column(idx).filter_map(Value::as_f64).collect()
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sorts `values` in place.
pub(crate) fn median(values: &mut [f64]) -> Option<f64> {
    values.sort_by(f64::total_cmp);
    quantile_sorted(values, 0.5)
}

/// Linear-interpolated quantile of already sorted values.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Sample standard deviation (n - 1 denominator). `None` below two values.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}
