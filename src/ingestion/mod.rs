//! Loading CSV files into a [`crate::types::DataSet`].
//!
//! Most callers should use [`load_csv`], which:
//!
//! - uses an explicit [`crate::types::Schema`] when given one, otherwise infers it
//! - parses every cell into the field type (empty cells and NA markers such as `NA`,
//!   `N/A` or `null` become missing; see [`csv::DEFAULT_NA_VALUES`])
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! The lower-level functions live in [`csv`].

pub mod csv;
pub mod observability;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::EdaResult;
use crate::types::{DataSet, Schema};

pub use self::csv::{
    default_na_values, infer_schema_from_reader, ingest_csv_from_path, ingest_csv_from_reader,
    ingest_csv_inferred, InferOptions, DEFAULT_NA_VALUES,
};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};

/// Options controlling [`load_csv`].
#[derive(Clone)]
pub struct LoadOptions {
    /// Explicit schema. If `None`, the schema is inferred.
    pub schema: Option<Schema>,
    /// Sampling limits for inference, and the NA markers used on both paths.
    pub infer: InferOptions,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("schema", &self.schema)
            .field("infer", &self.infer)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            schema: None,
            infer: InferOptions::default(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a CSV file into a [`DataSet`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` with row/column/missing-cell stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use tabular_eda::ingestion::{load_csv, LoadOptions};
///
/// # fn main() -> Result<(), tabular_eda::EdaError> {
/// let ds = load_csv("data.csv", &LoadOptions::default())?;
/// println!("rows={} numeric={:?}", ds.row_count(), ds.schema.numeric_columns());
/// # Ok(())
/// # }
/// ```
pub fn load_csv(path: impl AsRef<Path>, options: &LoadOptions) -> EdaResult<DataSet> {
    let path = path.as_ref();
    let ctx = LoadContext {
        path: path.to_path_buf(),
        inferred_schema: options.schema.is_none(),
    };

    let result = match &options.schema {
        Some(schema) => ingest_csv_from_path(path, schema, &options.infer.na_values),
        None => ingest_csv_inferred(path, &options.infer),
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                    missing_cells: ds.missing_count(),
                },
            ),
            Err(e) => {
                let sev = LoadSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}
