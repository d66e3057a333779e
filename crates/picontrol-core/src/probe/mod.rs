//! Metric probes: the static table, its compiled form, and post-processing.
//!
//! - `table`: the catalog as plain data, embedded in the binary.
//! - `catalog`: patterns and expressions compiled once, plus extraction.
//! - `expr`: the narrow arithmetic grammar used by `post`.

pub mod catalog;
pub mod expr;
pub mod table;

pub use catalog::{CompiledCategory, CompiledProbe, MetricCatalog};
pub use expr::{Expr, Number};
pub use table::{lookup, Category, ProbeDef, METRIC_TABLE};
