//! Trace channel extraction.
//!
//! Fragment-analysis files store the four dye channels as the `DATA` entries
//! numbered 1 to 4. [`TraceMatrix`] gathers them into one row-major table.

use std::io::{Read, Seek};
use std::path::Path;

use crate::container::Container;
use crate::entry::Tag;
use crate::{Error, Result};

/// Number of trace channels.
pub const CHANNEL_COUNT: usize = 4;

/// Name of the raw trace entries.
pub const DATA_TAG: Tag = Tag::new(b"DATA");

/// Rectangular table of trace samples.
///
/// Rows are sample positions and columns are the four channels, in entry
/// number order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceMatrix {
    /// Row-major samples, `CHANNEL_COUNT` per row.
    values: Vec<i64>,
}

impl TraceMatrix {
    /// Extract `DATA` 1 to 4 from a container.
    ///
    /// Each channel must be present, decode to an integer array, and have the
    /// same length as the others. Nothing is returned on any failure.
    pub fn extract<R: Read + Seek>(container: &mut Container<R>) -> Result<Self> {
        let mut channels: Vec<Vec<i64>> = Vec::with_capacity(CHANNEL_COUNT);

        for number in 1..=CHANNEL_COUNT as i32 {
            let entry = *container.get(DATA_TAG, number).ok_or(Error::MissingField {
                name: DATA_TAG,
                number,
            })?;

            let value = container.decode_entry(&entry)?;
            if value.is_unsupported() {
                return Err(Error::UnsupportedType {
                    name: DATA_TAG,
                    number,
                    element_type: entry.element_type,
                });
            }

            let samples = value.to_integers().ok_or_else(|| Error::UnexpectedKind {
                name: DATA_TAG,
                number,
                expected: "integer array",
                actual: value.kind_name(),
            })?;

            if let Some(first) = channels.first() {
                if samples.len() != first.len() {
                    return Err(Error::Entry {
                        name: DATA_TAG,
                        number,
                        offset: entry.effective_offset()?,
                        source: Box::new(Error::ChannelLengthMismatch {
                            channel: number,
                            expected: first.len(),
                            actual: samples.len(),
                        }),
                    });
                }
            }

            log::debug!("channel {}: {} samples", number, samples.len());
            channels.push(samples);
        }

        Ok(Self::interleave(&channels))
    }

    /// Build a matrix from four equal-length channels.
    pub fn from_channels(channels: [Vec<i64>; CHANNEL_COUNT]) -> Result<Self> {
        let expected = channels[0].len();
        for (k, channel) in channels.iter().enumerate() {
            if channel.len() != expected {
                return Err(Error::ChannelLengthMismatch {
                    channel: k as i32 + 1,
                    expected,
                    actual: channel.len(),
                });
            }
        }
        Ok(Self::interleave(&channels))
    }

    fn interleave(channels: &[Vec<i64>]) -> Self {
        let rows = channels.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows * CHANNEL_COUNT);
        for i in 0..rows {
            values.extend(channels.iter().map(|channel| channel[i]));
        }
        Self { values }
    }

    /// Number of rows (samples per channel).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len() / CHANNEL_COUNT
    }

    /// Check if the matrix has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get one row by 0-based index.
    pub fn row(&self, index: usize) -> Option<[i64; CHANNEL_COUNT]> {
        let start = index.checked_mul(CHANNEL_COUNT)?;
        let row = self.values.get(start..start.checked_add(CHANNEL_COUNT)?)?;
        Some([row[0], row[1], row[2], row[3]])
    }

    /// Iterate over rows in sample order.
    pub fn rows(&self) -> impl Iterator<Item = [i64; CHANNEL_COUNT]> + '_ {
        self.values
            .chunks_exact(CHANNEL_COUNT)
            .map(|row| [row[0], row[1], row[2], row[3]])
    }

    /// Iterate over one channel by 0-based column index.
    ///
    /// Columns outside `0..CHANNEL_COUNT` yield nothing.
    pub fn channel(&self, column: usize) -> impl Iterator<Item = i64> + '_ {
        let values: &[i64] = match column {
            c if c < CHANNEL_COUNT => self.values.get(c..).unwrap_or_default(),
            _ => &[],
        };
        values.iter().step_by(CHANNEL_COUNT).copied()
    }
}

/// Open a file, extract its trace matrix and close it again.
pub fn read_traces<P: AsRef<Path>>(path: P) -> Result<TraceMatrix> {
    let mut container = Container::open(path)?;
    TraceMatrix::extract(&mut container)
}
