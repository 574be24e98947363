//! ABIF container reader for capillary-electrophoresis trace files.
//!
//! ABIF (`.fsa`, `.ab1`) is a tagged-directory binary format. A fixed root
//! record points at an array of directory entries; each entry names a typed
//! data field stored elsewhere in the file, or packed into the entry itself
//! when it fits in four bytes.
//!
//! # File Format
//!
//! All values are big-endian:
//! - 4 bytes: Magic ("ABIF")
//! - 2 bytes: Version
//! - 28 bytes: Root directory entry (points at the entry array)
//! - N x 28 bytes: Directory entries, at the root entry's data offset
//!
//! # Example
//!
//! ```no_run
//! use abif_format::{Container, Tag, TraceMatrix};
//!
//! let mut container = Container::open("sample.fsa")?;
//! println!("Version: {}", container.version());
//!
//! for entry in container.entries() {
//!     println!("{}", entry);
//! }
//!
//! let model = container.data(Tag::new(b"MODL"), 1)?;
//! println!("Instrument: {}", model);
//!
//! let traces = TraceMatrix::extract(&mut container)?;
//! println!("{} samples", traces.len());
//! # Ok::<(), abif_format::Error>(())
//! ```

mod container;
mod decode;
mod entry;
mod error;
mod trace;
mod types;
mod value;

#[cfg(test)]
mod fixture;

pub use container::{Container, ABIF_MAGIC};
pub use decode::decode;
pub use entry::{DirectoryEntry, Tag};
pub use error::{Error, ErrorKind, Result};
pub use trace::{read_traces, TraceMatrix, CHANNEL_COUNT, DATA_TAG};
pub use types::{ElementType, USER_TYPE_START};
pub use value::{Date, Thumb, Time, Value};
