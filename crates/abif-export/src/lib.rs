//! Text table export for ABIF trace matrices.
//!
//! A [`TraceMatrix`](abif_format::TraceMatrix) is written as comma-separated
//! text: a header line naming the four channels, then one line per sample
//! with a 1-based position.
//!
//! # Example
//!
//! ```no_run
//! use abif_export::{output_path, write_table_to_path};
//!
//! let traces = abif_format::read_traces("run01.fsa")?;
//! write_table_to_path(&traces, output_path("run01.fsa"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod csv;
mod error;

pub use csv::{output_path, write_table, write_table_to_path, COLUMNS, OUTPUT_SUFFIX};
pub use error::{Error, Result};
