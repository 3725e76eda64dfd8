//! Missing-value resolution with an audit trail.
//!
//! Three strategies are supported, all pure functions of a borrowed [`DataSet`]:
//!
//! - [`resolve_fill_statistic`]: fill numeric columns with their mean or median
//! - [`resolve_fill_literal`]: fill every column with one caller-supplied text value
//! - [`resolve_drop`]: remove every row holding at least one missing cell
//!
//! Each returns a [`Resolution`]: the new dataset plus an [`AuditTrail`] recording every
//! cell replaced or row dropped, in discovery order (column-major for fills, row-major for
//! drops). Audit entries render as fixed human-readable sentences via [`fmt::Display`].
//!
//! ```rust
//! use tabular_eda::resolver::{resolve_fill_statistic, FillStatistic};
//! use tabular_eda::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("A", DataType::Int64),
//!     Field::new("B", DataType::Int64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::Null],
//!         vec![Value::Null, Value::Int64(5)],
//!         vec![Value::Int64(3), Value::Int64(6)],
//!     ],
//! );
//!
//! let out = resolve_fill_statistic(&ds, FillStatistic::Mean);
//! assert_eq!(
//!     out.audit.messages(),
//!     vec![
//!         "The missing value at index 1 in column 'A' was replaced with 2.00.",
//!         "The missing value at index 0 in column 'B' was replaced with 5.50.",
//!     ]
//! );
//! assert_eq!(out.dataset.missing_count(), 0);
//! ```

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::ingestion::csv::parse_bool;
use crate::processing::reduce::{mean, median, numeric_values};
use crate::types::{DataSet, DataType, Value};

/// Statistic used to fill numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStatistic {
    Mean,
    Median,
}

impl FillStatistic {
    /// Compute the statistic over the present numeric cells of column `idx`.
    ///
    /// NaN when the column has no present numeric cells.
    pub fn compute(self, dataset: &DataSet, idx: usize) -> f64 {
        let mut values = numeric_values(dataset, idx);
        let out = match self {
            FillStatistic::Mean => mean(&values),
            FillStatistic::Median => median(&mut values),
        };
        out.unwrap_or(f64::NAN)
    }
}

impl fmt::Display for FillStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStatistic::Mean => f.write_str("mean"),
            FillStatistic::Median => f.write_str("median"),
        }
    }
}

/// What to fill missing cells with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillValue {
    Statistic(FillStatistic),
    Literal(String),
}

impl FillValue {
    /// `"mean"` and `"median"` select a statistic; any other text is a literal.
    pub fn parse(text: &str) -> Self {
        match text {
            "mean" => FillValue::Statistic(FillStatistic::Mean),
            "median" => FillValue::Statistic(FillStatistic::Median),
            other => FillValue::Literal(other.to_string()),
        }
    }
}

/// A missing-value handling request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValueStrategy {
    Fill(FillValue),
    Drop,
}

/// Value written into a filled cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Replacement {
    Statistic(f64),
    Literal(String),
}

/// One resolved cell or dropped row. `row` is the row's index label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEntry {
    Filled {
        row: usize,
        column: String,
        replacement: Replacement,
    },
    Dropped {
        row: usize,
    },
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEntry::Filled {
                row,
                column,
                replacement: Replacement::Statistic(value),
            } => write!(
                f,
                "The missing value at index {row} in column '{column}' was replaced with {}.",
                format_fixed2(*value)
            ),
            AuditEntry::Filled {
                row,
                column,
                replacement: Replacement::Literal(value),
            } => write!(
                f,
                "The missing value at index {row} in column '{column}' was replaced with '{value}'."
            ),
            AuditEntry::Dropped { row } => {
                write!(f, "Row at index {row} with missing values was dropped.")
            }
        }
    }
}

/// Two decimals, with `nan`/`inf`/`-inf` for non-finite values.
fn format_fixed2(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Ordered audit entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AuditTrail {
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered sentences, one per entry.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    fn push(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }
}

impl<'a> IntoIterator for &'a AuditTrail {
    type Item = &'a AuditEntry;
    type IntoIter = std::slice::Iter<'a, AuditEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Output of every resolver operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub dataset: DataSet,
    pub audit: AuditTrail,
}

/// Resolve missing cells according to `strategy`.
pub fn resolve(dataset: &DataSet, strategy: &MissingValueStrategy) -> Resolution {
    match strategy {
        MissingValueStrategy::Fill(FillValue::Statistic(stat)) => {
            resolve_fill_statistic(dataset, *stat)
        }
        MissingValueStrategy::Fill(FillValue::Literal(literal)) => {
            resolve_fill_literal(dataset, literal)
        }
        MissingValueStrategy::Drop => resolve_drop(dataset),
    }
}

/// Fill missing cells of numeric columns with the column's mean or median.
///
/// Categorical columns are left untouched. A numeric column with no present values gets a
/// NaN statistic, which is written as-is (the cells stay missing). Int64 columns that
/// receive a fill become Float64.
pub fn resolve_fill_statistic(dataset: &DataSet, statistic: FillStatistic) -> Resolution {
    let mut out = dataset.clone();
    let mut audit = AuditTrail::default();

    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        if !field.is_numeric() {
            continue;
        }
        let missing = missing_rows(dataset, idx);
        if missing.is_empty() {
            continue;
        }

        let value = statistic.compute(dataset, idx);
        if value.is_nan() {
            warn!(column = %field.name, %statistic, "no present values; filling with NaN");
        }
        if field.data_type == DataType::Int64 {
            promote_to_float(&mut out, idx);
        }

        for pos in missing {
            audit.push(AuditEntry::Filled {
                row: dataset.index[pos],
                column: field.name.clone(),
                replacement: Replacement::Statistic(value),
            });
            out.rows[pos][idx] = Value::Float64(value);
        }
    }

    debug!(%statistic, filled = audit.len(), "filled missing values");
    Resolution {
        dataset: out,
        audit,
    }
}

/// Fill missing cells of every column with `literal`.
///
/// The literal is stored in the column's type when it parses as one (an Int64 column
/// becomes Float64 for a fractional literal); otherwise it is stored as text without
/// validation.
pub fn resolve_fill_literal(dataset: &DataSet, literal: &str) -> Resolution {
    let mut out = dataset.clone();
    let mut audit = AuditTrail::default();

    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        let missing = missing_rows(dataset, idx);
        if missing.is_empty() {
            continue;
        }

        let value = coerce_literal(field.data_type, literal);
        if field.data_type == DataType::Int64 && matches!(value, Value::Float64(_)) {
            promote_to_float(&mut out, idx);
        }

        for pos in missing {
            audit.push(AuditEntry::Filled {
                row: dataset.index[pos],
                column: field.name.clone(),
                replacement: Replacement::Literal(literal.to_string()),
            });
            out.rows[pos][idx] = value.clone();
        }
    }

    debug!(literal, filled = audit.len(), "filled missing values");
    Resolution {
        dataset: out,
        audit,
    }
}

/// Drop every row that holds a missing cell in any column.
///
/// Surviving rows keep their index labels.
pub fn resolve_drop(dataset: &DataSet) -> Resolution {
    let mut audit = AuditTrail::default();
    for (label, row) in dataset.index.iter().zip(dataset.rows.iter()) {
        if row.iter().any(Value::is_missing) {
            audit.push(AuditEntry::Dropped { row: *label });
        }
    }

    let out = dataset.filter_rows(|row| !row.iter().any(Value::is_missing));
    debug!(
        dropped = audit.len(),
        remaining = out.row_count(),
        "dropped rows with missing values"
    );
    Resolution {
        dataset: out,
        audit,
    }
}

/// Row positions of missing cells in column `idx`, ascending.
fn missing_rows(dataset: &DataSet, idx: usize) -> Vec<usize> {
    dataset
        .column(idx)
        .enumerate()
        .filter(|(_, v)| v.is_missing())
        .map(|(pos, _)| pos)
        .collect()
}

fn promote_to_float(dataset: &mut DataSet, idx: usize) {
    dataset.schema.fields[idx].data_type = DataType::Float64;
    for row in &mut dataset.rows {
        if let Value::Int64(v) = row[idx] {
            row[idx] = Value::Float64(v as f64);
        }
    }
}

fn coerce_literal(data_type: DataType, literal: &str) -> Value {
    let trimmed = literal.trim();
    // A NaN would leave the cell missing, so "nan" is stored as text.
    let as_float = || {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .map(Value::Float64)
    };
    let parsed = match data_type {
        DataType::Int64 => trimmed.parse::<i64>().map(Value::Int64).ok().or_else(as_float),
        DataType::Float64 => as_float(),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).ok(),
        DataType::Utf8 => None,
    };
    parsed.unwrap_or_else(|| Value::Utf8(literal.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{
        format_fixed2, resolve, resolve_drop, resolve_fill_literal, resolve_fill_statistic,
        AuditEntry, FillStatistic, FillValue, MissingValueStrategy, Replacement,
    };
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    /// Columns `[A, B]`, rows `[(1, missing), (missing, 5), (3, 6)]`.
    fn two_column_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("A", DataType::Int64),
            Field::new("B", DataType::Int64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Null],
                vec![Value::Null, Value::Int64(5)],
                vec![Value::Int64(3), Value::Int64(6)],
            ],
        )
    }

    fn mixed_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("score", DataType::Float64),
            Field::new("city", DataType::Utf8),
            Field::new("n", DataType::Int64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Null, Value::Utf8("Oslo".into()), Value::Int64(1)],
                vec![Value::Float64(2.0), Value::Null, Value::Int64(4)],
                vec![Value::Float64(f64::NAN), Value::Utf8("Rome".into()), Value::Null],
                vec![Value::Float64(7.0), Value::Utf8("Lima".into()), Value::Int64(10)],
            ],
        )
    }

    #[test]
    fn fill_mean_matches_worked_example() {
        let out = resolve_fill_statistic(&two_column_dataset(), FillStatistic::Mean);
        assert_eq!(
            out.dataset.rows,
            vec![
                vec![Value::Float64(1.0), Value::Float64(5.5)],
                vec![Value::Float64(2.0), Value::Float64(5.0)],
                vec![Value::Float64(3.0), Value::Float64(6.0)],
            ]
        );
        assert_eq!(
            out.audit.messages(),
            vec![
                "The missing value at index 1 in column 'A' was replaced with 2.00.",
                "The missing value at index 0 in column 'B' was replaced with 5.50.",
            ]
        );
        assert_eq!(out.dataset.schema.fields[0].data_type, DataType::Float64);
    }

    #[test]
    fn fill_median_visits_columns_in_order_and_skips_categorical() {
        let ds = mixed_dataset();
        let out = resolve_fill_statistic(&ds, FillStatistic::Median);
        assert_eq!(
            out.audit.messages(),
            vec![
                "The missing value at index 0 in column 'score' was replaced with 4.50.",
                "The missing value at index 2 in column 'score' was replaced with 4.50.",
                "The missing value at index 2 in column 'n' was replaced with 4.00.",
            ]
        );
        assert_eq!(out.dataset.rows[1][1], Value::Null);
        assert_eq!(out.dataset.rows[2][2], Value::Float64(4.0));
        assert_eq!(out.dataset.missing_count(), 1);
        // Input untouched
        assert_eq!(ds.missing_count(), 4);
    }

    #[test]
    fn fill_statistic_leaves_complete_int_columns_alone() {
        let schema = Schema::new(vec![Field::new("n", DataType::Int64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Int64(1)], vec![Value::Int64(2)]]);
        let out = resolve_fill_statistic(&ds, FillStatistic::Mean);
        assert!(out.audit.is_empty());
        assert_eq!(out.dataset, ds);
    }

    #[test]
    fn fill_statistic_on_wholly_missing_column_writes_nan() {
        let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Null], vec![Value::Null]]);
        let out = resolve_fill_statistic(&ds, FillStatistic::Mean);
        assert_eq!(
            out.audit.messages(),
            vec![
                "The missing value at index 0 in column 'x' was replaced with nan.",
                "The missing value at index 1 in column 'x' was replaced with nan.",
            ]
        );
        assert!(out.dataset.rows.iter().all(|r| r[0].is_missing()));
    }

    #[test]
    fn fill_literal_covers_every_column_with_quoted_value() {
        let out = resolve_fill_literal(&mixed_dataset(), "0");
        assert_eq!(
            out.audit.messages(),
            vec![
                "The missing value at index 0 in column 'score' was replaced with '0'.",
                "The missing value at index 2 in column 'score' was replaced with '0'.",
                "The missing value at index 1 in column 'city' was replaced with '0'.",
                "The missing value at index 2 in column 'n' was replaced with '0'.",
            ]
        );
        assert_eq!(out.dataset.rows[0][0], Value::Float64(0.0));
        assert_eq!(out.dataset.rows[1][1], Value::Utf8("0".into()));
        assert_eq!(out.dataset.rows[2][2], Value::Int64(0));
        assert_eq!(out.dataset.schema.fields[2].data_type, DataType::Int64);
        assert_eq!(out.dataset.missing_count(), 0);
    }

    #[test]
    fn fill_literal_stores_unparseable_text_in_numeric_columns() {
        let out = resolve_fill_literal(&two_column_dataset(), "unknown");
        assert_eq!(out.dataset.rows[0][1], Value::Utf8("unknown".into()));
        assert_eq!(out.dataset.rows[1][0], Value::Utf8("unknown".into()));
        assert!(out.dataset.schema.fields[0].is_numeric());
    }

    #[test]
    fn fill_literal_nan_is_stored_as_text_and_stays_filled() {
        for literal in ["nan", "NaN"] {
            let schema = Schema::new(vec![
                Field::new("x", DataType::Float64),
                Field::new("n", DataType::Int64),
            ]);
            let ds = DataSet::new(
                schema,
                vec![
                    vec![Value::Null, Value::Null],
                    vec![Value::Float64(1.0), Value::Int64(2)],
                ],
            );

            let once = resolve_fill_literal(&ds, literal);
            assert_eq!(once.audit.len(), 2);
            assert_eq!(once.dataset.missing_count(), 0);
            assert_eq!(
                once.dataset.rows[0],
                vec![Value::Utf8(literal.into()), Value::Utf8(literal.into())]
            );
            // Int column is not promoted for a text fill.
            assert_eq!(once.dataset.rows[1][1], Value::Int64(2));

            let twice = resolve_fill_literal(&once.dataset, literal);
            assert!(twice.audit.is_empty());
        }
    }

    #[test]
    fn fill_literal_fraction_promotes_int_column() {
        let out = resolve_fill_literal(&two_column_dataset(), "2.5");
        assert_eq!(out.dataset.schema.fields[0].data_type, DataType::Float64);
        assert_eq!(out.dataset.rows[0][0], Value::Float64(1.0));
        assert_eq!(out.dataset.rows[1][0], Value::Float64(2.5));
    }

    #[test]
    fn drop_matches_worked_example_and_keeps_labels() {
        let out = resolve_drop(&two_column_dataset());
        assert_eq!(out.dataset.index, vec![2]);
        assert_eq!(out.dataset.rows, vec![vec![Value::Int64(3), Value::Int64(6)]]);
        assert_eq!(
            out.audit.messages(),
            vec![
                "Row at index 0 with missing values was dropped.",
                "Row at index 1 with missing values was dropped.",
            ]
        );
    }

    #[test]
    fn audit_reports_index_labels_after_a_drop() {
        let dropped = resolve_drop(&mixed_dataset()).dataset;
        assert_eq!(dropped.index, vec![3]);

        let schema = Schema::new(vec![Field::new("v", DataType::Float64)]);
        let ds = DataSet::with_index(
            schema,
            vec![4, 9],
            vec![vec![Value::Float64(1.0)], vec![Value::Null]],
        );
        let out = resolve_fill_statistic(&ds, FillStatistic::Mean);
        assert_eq!(
            out.audit.entries(),
            &[AuditEntry::Filled {
                row: 9,
                column: "v".into(),
                replacement: Replacement::Statistic(1.0),
            }]
        );
    }

    #[test]
    fn every_strategy_is_idempotent_after_one_pass() {
        let strategies = [
            MissingValueStrategy::Fill(FillValue::parse("mean")),
            MissingValueStrategy::Fill(FillValue::parse("median")),
            MissingValueStrategy::Fill(FillValue::parse("n/a")),
            MissingValueStrategy::Drop,
        ];
        for strategy in &strategies {
            let first = resolve(&mixed_dataset(), strategy);
            let second = resolve(&first.dataset, strategy);
            assert!(second.audit.is_empty(), "{strategy:?} not idempotent");
            assert_eq!(second.dataset, first.dataset);
        }
    }

    #[test]
    fn empty_dataset_is_a_no_op() {
        let schema = Schema::new(vec![Field::new("v", DataType::Float64)]);
        let ds = DataSet::new(schema, Vec::new());
        for strategy in [
            MissingValueStrategy::Drop,
            MissingValueStrategy::Fill(FillValue::parse("mean")),
            MissingValueStrategy::Fill(FillValue::parse("median")),
            MissingValueStrategy::Fill(FillValue::parse("unknown")),
        ] {
            let out = resolve(&ds, &strategy);
            assert!(out.audit.is_empty());
            assert_eq!(out.dataset, ds);
        }
    }

    #[test]
    fn fill_value_parse_recognizes_statistics() {
        assert_eq!(FillValue::parse("mean"), FillValue::Statistic(FillStatistic::Mean));
        assert_eq!(FillValue::parse("median"), FillValue::Statistic(FillStatistic::Median));
        assert_eq!(FillValue::parse("Mean"), FillValue::Literal("Mean".into()));
    }

    #[test]
    fn fixed2_formatting_handles_non_finite() {
        assert_eq!(format_fixed2(2.0), "2.00");
        assert_eq!(format_fixed2(5.555), "5.55");
        assert_eq!(format_fixed2(f64::NAN), "nan");
        assert_eq!(format_fixed2(f64::NEG_INFINITY), "-inf");
    }
}
