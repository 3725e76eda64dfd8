//! `tabular-eda` is a small library for exploring a CSV dataset in memory: load it into a
//! [`types::DataSet`], summarize it, and resolve its missing values with a full audit trail.
//!
//! The primary entrypoints are [`ingestion::load_csv`] (schema inferred unless you supply one)
//! and [`analysis::run_activity`], which dispatches every exploratory operation.
//!
//! ## Data model
//!
//! Cells are typed [`types::Value`]s matching a [`types::Schema`]. Supported logical types are:
//!
//! - [`types::DataType::Int64`] and [`types::DataType::Float64`]: numeric columns
//! - [`types::DataType::Bool`] and [`types::DataType::Utf8`]: categorical columns
//!
//! Empty CSV cells become [`types::Value::Null`]; `Null` and NaN both count as missing.
//!
//! ## Resolving missing values
//!
//! ```rust
//! use tabular_eda::resolver::resolve_drop;
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
//! let out = resolve_drop(&ds);
//! assert_eq!(out.dataset.index, vec![2]);
//! for message in out.audit.messages() {
//!     println!("{message}");
//! }
//! ```
//!
//! ## Running an activity
//!
//! ```no_run
//! use tabular_eda::analysis::{run_activity, Activity};
//! use tabular_eda::ingestion::{load_csv, LoadOptions};
//! use tabular_eda::resolver::{FillValue, MissingValueStrategy};
//!
//! # fn main() -> Result<(), tabular_eda::EdaError> {
//! let ds = load_csv("data.csv", &LoadOptions::default())?;
//! let fill = Activity::HandleMissing(MissingValueStrategy::Fill(FillValue::parse("median")));
//! let out = run_activity(&ds, &fill)?;
//! println!("{}", serde_json::to_string_pretty(&out).unwrap());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV loading, schema inference and load observers
//! - [`types`]: schema + in-memory dataset types
//! - [`resolver`]: missing-value fill/drop with audit trail
//! - [`summary`]: head/tail, describe, missing and unique counts, correlation
//! - [`analysis`]: activity dispatch
//! - [`processing`]: column reductions
//! - [`error`]: error types

pub mod analysis;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod resolver;
pub mod summary;
pub mod types;

pub use error::{EdaError, EdaResult};
