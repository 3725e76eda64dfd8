//! CSV ingestion and schema inference.

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{EdaError, EdaResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Cell spellings read as missing by default, besides the empty cell.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// [`DEFAULT_NA_VALUES`] as owned strings.
pub fn default_na_values() -> Vec<String> {
    DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect()
}

/// Options for [`infer_schema_from_reader`] and [`ingest_csv_inferred`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferOptions {
    /// Maximum number of data rows sampled per column. `None` samples every row.
    pub max_rows: Option<usize>,
    /// Trimmed cell contents treated as missing. Empty cells are always missing.
    pub na_values: Vec<String>,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            max_rows: Some(1_000),
            na_values: default_na_values(),
        }
    }
}

fn is_na(cell: &str, na_values: &[String]) -> bool {
    cell.is_empty() || na_values.iter().any(|na| na == cell)
}

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ).
/// - Each value is parsed according to the schema field type.
/// - Empty cells and cells matching one of `na_values` become [`Value::Null`].
pub fn ingest_csv_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    na_values: &[String],
) -> EdaResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema, na_values)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
    na_values: &[String],
) -> EdaResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(EdaError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw, na_values)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Infer a [`Schema`] from a CSV file, then ingest it.
pub fn ingest_csv_inferred(path: impl AsRef<Path>, options: &InferOptions) -> EdaResult<DataSet> {
    let mut file = std::fs::File::open(path)?;
    let schema = {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(&mut file);
        infer_schema_from_reader(&mut rdr, &options)?
    };
    file.seek(SeekFrom::Start(0))?;
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
    ingest_csv_from_reader(&mut rdr, &schema, &options.na_values)
}

/// Infer a schema from the header and (up to `options.max_rows`) data rows.
///
/// Field order follows the header. Per column, the narrowest type every non-empty cell
/// parses as wins, in the order Int64, Float64, Bool, Utf8. Cells matching
/// `options.na_values` are skipped like empty ones. Columns with no present cells are Float64.
pub fn infer_schema_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    options: &InferOptions,
) -> EdaResult<Schema> {
    let headers = rdr.headers()?.clone();
    let mut candidates: Vec<Candidates> = vec![Candidates::default(); headers.len()];

    for (row_idx0, result) in rdr.records().enumerate() {
        if options.max_rows.is_some_and(|max| row_idx0 >= max) {
            break;
        }
        let record = result?;
        for (cand, raw) in candidates.iter_mut().zip(record.iter()) {
            cand.observe(raw.trim(), &options.na_values);
        }
    }

    let fields = headers
        .iter()
        .zip(candidates.iter())
        .map(|(name, cand)| Field::new(name, cand.resolve()))
        .collect();
    Ok(Schema::new(fields))
}

#[derive(Debug, Clone, Copy)]
struct Candidates {
    seen: bool,
    int: bool,
    float: bool,
    boolean: bool,
}

impl Default for Candidates {
    fn default() -> Self {
        Self {
            seen: false,
            int: true,
            float: true,
            boolean: true,
        }
    }
}

impl Candidates {
    fn observe(&mut self, cell: &str, na_values: &[String]) {
        if is_na(cell, na_values) {
            return;
        }
        self.seen = true;
        self.int &= cell.parse::<i64>().is_ok();
        self.float &= cell.parse::<f64>().is_ok();
        self.boolean &= parse_bool(cell).is_ok();
    }

    fn resolve(&self) -> DataType {
        if !self.seen {
            DataType::Float64
        } else if self.int {
            DataType::Int64
        } else if self.float {
            DataType::Float64
        } else if self.boolean {
            DataType::Bool
        } else {
            DataType::Utf8
        }
    }
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
    na_values: &[String],
) -> EdaResult<Value> {
    let trimmed = raw.trim();
    if is_na(trimmed, na_values) {
        return Ok(Value::Null);
    }

    let parse_err = |message: String| EdaError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_err),
    }
}

/// Parse the boolean spellings accepted in CSV cells.
pub(crate) fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" => Ok(true),
        "false" | "f" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/yes/no)".to_string()),
    }
}
