//! Common utilities for abif.
//!
//! This crate provides the foundational reader used across all abif crates:
//!
//! - [`ByteCursor`] - Big-endian reading from any seekable byte stream
//! - [`Error`] - Stream-level failures (short reads, bad magic, I/O)

mod cursor;
mod error;

pub use cursor::ByteCursor;
pub use error::{Error, Result};
