//! One entry point for every exploratory activity.
//!
//! An [`Activity`] names an operation together with its parameters; [`run_activity`] runs it
//! against a dataset and returns an [`ActivityOutput`]. Nothing here knows how the output is
//! displayed.

use serde::Serialize;

use crate::error::EdaResult;
use crate::resolver::{resolve, AuditTrail, MissingValueStrategy};
use crate::summary::{
    self, correlation_matrix, describe, missing_counts, value_counts, ColumnCount,
    ColumnDescription, CorrelationMatrix, ValueCount,
};
use crate::types::DataSet;

/// A requested exploratory operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    /// Every row of the dataset.
    ShowAll,
    Head { n: usize },
    Tail { n: usize },
    Describe,
    MissingValues,
    UniqueValues { column: String },
    Correlation,
    HandleMissing(MissingValueStrategy),
}

/// Result of [`run_activity`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "activity", rename_all = "snake_case")]
pub enum ActivityOutput {
    Rows {
        dataset: DataSet,
    },
    Description {
        columns: Vec<ColumnDescription>,
    },
    MissingValues {
        counts: Vec<ColumnCount>,
    },
    UniqueValues {
        column: String,
        counts: Vec<ValueCount>,
    },
    Correlation {
        matrix: CorrelationMatrix,
    },
    Resolved {
        dataset: DataSet,
        audit: AuditTrail,
        messages: Vec<String>,
        /// Missing cells per column after resolution.
        remaining_missing: Vec<ColumnCount>,
    },
}

/// Run `activity` against `dataset`.
///
/// Only [`Activity::UniqueValues`] can fail, when the column does not exist.
pub fn run_activity(dataset: &DataSet, activity: &Activity) -> EdaResult<ActivityOutput> {
    tracing::debug!(?activity, rows = dataset.row_count(), "running activity");

    let out = match activity {
        Activity::ShowAll => ActivityOutput::Rows {
            dataset: dataset.clone(),
        },
        Activity::Head { n } => ActivityOutput::Rows {
            dataset: summary::head(dataset, *n),
        },
        Activity::Tail { n } => ActivityOutput::Rows {
            dataset: summary::tail(dataset, *n),
        },
        Activity::Describe => ActivityOutput::Description {
            columns: describe(dataset),
        },
        Activity::MissingValues => ActivityOutput::MissingValues {
            counts: missing_counts(dataset),
        },
        Activity::UniqueValues { column } => ActivityOutput::UniqueValues {
            column: column.clone(),
            counts: value_counts(dataset, column)?,
        },
        Activity::Correlation => ActivityOutput::Correlation {
            matrix: correlation_matrix(dataset),
        },
        Activity::HandleMissing(strategy) => {
            let resolution = resolve(dataset, strategy);
            let remaining_missing = missing_counts(&resolution.dataset);
            ActivityOutput::Resolved {
                messages: resolution.audit.messages(),
                dataset: resolution.dataset,
                audit: resolution.audit,
                remaining_missing,
            }
        }
    };
    Ok(out)
}
