//! Exploratory summaries over a [`DataSet`].
//!
//! - [`head`] / [`tail`]: first or last rows
//! - [`missing_counts`]: missing cells per column
//! - [`value_counts`]: distinct values of one column with their frequency
//! - [`describe()`]: count/mean/std/quantiles of numeric columns
//! - [`correlation_matrix`]: pairwise Pearson correlation of numeric columns
//! - [`column_choices`]: a selectable column list minus already chosen columns

pub mod correlation;
pub mod describe;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{EdaError, EdaResult};
use crate::types::{DataSet, Value};

pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use describe::{describe, ColumnDescription};

/// Row count shown by head/tail when the caller has no preference.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// First `n` rows.
pub fn head(dataset: &DataSet, n: usize) -> DataSet {
    dataset.head(n)
}

/// Last `n` rows.
pub fn tail(dataset: &DataSet, n: usize) -> DataSet {
    dataset.tail(n)
}

/// Missing-cell count of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCount {
    pub column: String,
    pub missing: usize,
}

/// Missing cells per column, in declared order.
pub fn missing_counts(dataset: &DataSet) -> Vec<ColumnCount> {
    let counts = dataset.reduce_rows(vec![0usize; dataset.column_count()], |mut acc, row| {
        for (slot, v) in acc.iter_mut().zip(row) {
            if v.is_missing() {
                *slot += 1;
            }
        }
        acc
    });

    dataset
        .schema
        .field_names()
        .zip(counts)
        .map(|(name, missing)| ColumnCount {
            column: name.to_string(),
            missing,
        })
        .collect()
}

/// Frequency of one distinct value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: Value,
    pub count: usize,
}

/// Distinct present values of `column`, most frequent first.
///
/// Missing cells are not counted. Ties keep first-seen order.
pub fn value_counts(dataset: &DataSet, column: &str) -> EdaResult<Vec<ValueCount>> {
    let idx = dataset
        .schema
        .index_of(column)
        .ok_or_else(|| EdaError::UnknownColumn {
            column: column.to_string(),
        })?;

    // Position in `counts` per distinct value; `counts` stays in first-seen order.
    let mut positions: HashMap<ValueKey<'_>, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();
    for v in dataset.column(idx).filter(|v| !v.is_missing()) {
        let Some(key) = ValueKey::of(v) else {
            continue;
        };
        match positions.get(&key) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(key, counts.len());
                counts.push(ValueCount {
                    value: v.clone(),
                    count: 1,
                });
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(counts)
}

/// Hashable view of a present [`Value`].
#[derive(Debug, PartialEq, Eq, Hash)]
enum ValueKey<'a> {
    Int64(i64),
    Float64(u64),
    Bool(bool),
    Utf8(&'a str),
}

impl<'a> ValueKey<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Int64(v) => Some(ValueKey::Int64(*v)),
            Value::Float64(v) if v.is_nan() => None,
            // -0.0 == 0.0
            Value::Float64(v) if *v == 0.0 => Some(ValueKey::Float64(0f64.to_bits())),
            Value::Float64(v) => Some(ValueKey::Float64(v.to_bits())),
            Value::Bool(v) => Some(ValueKey::Bool(*v)),
            Value::Utf8(s) => Some(ValueKey::Utf8(s)),
        }
    }
}

/// Columns from `base` that are not in `exclude`, in `base` order.
///
/// Used to offer a second column choice that excludes the first; `base` is never modified.
pub fn column_choices<S: AsRef<str>>(base: &[S], exclude: &[&str]) -> Vec<String> {
    base.iter()
        .map(|s| s.as_ref())
        .filter(|name| !exclude.contains(name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{column_choices, missing_counts, value_counts, ColumnCount, ValueCount};
    use crate::error::EdaError;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("species", DataType::Utf8),
            Field::new("mass", DataType::Float64),
        ]);
        let s = |v: &str| Value::Utf8(v.to_string());
        DataSet::new(
            schema,
            vec![
                vec![s("gentoo"), Value::Float64(5.1)],
                vec![s("adelie"), Value::Null],
                vec![Value::Null, Value::Float64(3.7)],
                vec![s("adelie"), Value::Float64(f64::NAN)],
                vec![s("chinstrap"), Value::Float64(3.7)],
                vec![s("gentoo"), Value::Float64(4.9)],
            ],
        )
    }

    #[test]
    fn missing_counts_per_column() {
        assert_eq!(
            missing_counts(&sample_dataset()),
            vec![
                ColumnCount { column: "species".into(), missing: 1 },
                ColumnCount { column: "mass".into(), missing: 2 },
            ]
        );
    }

    #[test]
    fn value_counts_sorted_by_frequency_then_first_seen() {
        let counts = value_counts(&sample_dataset(), "species").unwrap();
        assert_eq!(
            counts,
            vec![
                ValueCount { value: Value::Utf8("gentoo".into()), count: 2 },
                ValueCount { value: Value::Utf8("adelie".into()), count: 2 },
                ValueCount { value: Value::Utf8("chinstrap".into()), count: 1 },
            ]
        );

        let mass = value_counts(&sample_dataset(), "mass").unwrap();
        assert_eq!(mass[0], ValueCount { value: Value::Float64(3.7), count: 2 });
        assert_eq!(mass.iter().map(|c| c.count).sum::<usize>(), 4);
    }

    #[test]
    fn value_counts_scales_to_many_distinct_values() {
        let schema = Schema::new(vec![Field::new("id", DataType::Int64)]);
        let rows = (0..50_000).map(|i| vec![Value::Int64(i % 25_000)]).collect();
        let ds = DataSet::new(schema, rows);

        let counts = value_counts(&ds, "id").unwrap();
        assert_eq!(counts.len(), 25_000);
        assert!(counts.iter().all(|c| c.count == 2));
        // Ties keep first-seen order.
        assert_eq!(counts[0].value, Value::Int64(0));
        assert_eq!(counts[24_999].value, Value::Int64(24_999));
    }

    #[test]
    fn value_counts_treats_signed_zeros_as_one_value() {
        let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
        let ds = DataSet::new(
            schema,
            vec![vec![Value::Float64(0.0)], vec![Value::Float64(-0.0)]],
        );
        let counts = value_counts(&ds, "x").unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn value_counts_rejects_unknown_column() {
        let err = value_counts(&sample_dataset(), "island").unwrap_err();
        assert!(matches!(err, EdaError::UnknownColumn { ref column } if column == "island"));
        assert_eq!(err.to_string(), "unknown column 'island'");
    }

    #[test]
    fn column_choices_excludes_without_mutating_base() {
        let base = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(column_choices(&base, &["b"]), vec!["a", "c"]);
        assert_eq!(column_choices(&base, &["a"]), vec!["b", "c"]);
        assert_eq!(base.len(), 3);
    }
}
