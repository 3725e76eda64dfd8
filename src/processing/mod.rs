//! In-memory column reductions.
//!
//! [`reduce()`] computes count/sum/min/max/mean/median over one column, ignoring missing
//! cells. The helpers behind it are shared with [`crate::summary`] and [`crate::resolver`].
//!
//! ```rust
//! use tabular_eda::processing::{reduce, ReduceOp};
//! use tabular_eda::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![Field::new("score", DataType::Float64)]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Float64(10.0)],
//!         vec![Value::Null],
//!         vec![Value::Float64(20.0)],
//!     ],
//! );
//!
//! assert_eq!(reduce(&ds, "score", ReduceOp::Mean), Some(Value::Float64(15.0)));
//! assert_eq!(reduce(&ds, "score", ReduceOp::Count), Some(Value::Int64(3)));
//! ```

pub mod reduce;

pub use reduce::{reduce, ReduceOp};
