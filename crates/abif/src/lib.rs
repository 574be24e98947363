//! abif - ABIF trace file reading and export library.
//!
//! This crate provides a unified interface to the abif crates for working
//! with capillary-electrophoresis `.fsa` files.
//!
//! # Crates
//!
//! - [`abif_common`] - Big-endian stream reading
//! - [`abif_format`] - ABIF directory parsing, type decoding, trace extraction
//! - [`abif_export`] - Comma-separated trace tables
//!
//! # Example
//!
//! ```no_run
//! use abif::prelude::*;
//!
//! let mut container = Container::open("A01.fsa")?;
//! let traces = TraceMatrix::extract(&mut container)?;
//! drop(container);
//!
//! write_table_to_path(&traces, output_path("A01.fsa"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use abif_common as common;
pub use abif_export as export;
pub use abif_format as format;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use abif_common::ByteCursor;
    pub use abif_export::{output_path, write_table, write_table_to_path};
    pub use abif_format::{
        read_traces, Container, DirectoryEntry, ElementType, ErrorKind, Tag, TraceMatrix, Value,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
