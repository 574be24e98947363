//! Directory entries and four-character tags.

use std::fmt;
use std::io::{Read, Seek};

use abif_common::ByteCursor;
use zerocopy::byteorder::big_endian::{I16, I32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::types::ElementType;
use crate::{Error, Result};

/// A four-character field name such as `DATA` or `tdir`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// Create a tag from its raw bytes.
    #[inline]
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    /// Parse a tag from a string of exactly four bytes.
    pub fn parse(name: &str) -> Option<Self> {
        let bytes: [u8; 4] = name.as_bytes().try_into().ok()?;
        Some(Self(bytes))
    }

    /// Get the raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", char::from(b))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({:?})", self.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// On-disk layout of a directory entry (28 bytes, big-endian).
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
struct RawEntry {
    name: [u8; 4],
    number: I32,
    element_type: I16,
    element_size: I16,
    num_elements: I32,
    data_size: I32,
    data_offset: I32,
    data_handle: I32,
}

/// A parsed directory entry.
///
/// Describes one named, numbered, typed data field. Small values
/// (`data_size <= 4`) are stored inside the offset field itself; use
/// [`DirectoryEntry::effective_offset`] rather than `data_offset` to locate
/// the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DirectoryEntry {
    /// Field name.
    pub name: Tag,
    /// Discriminator among fields sharing a name.
    pub number: i32,
    /// Raw element type tag.
    pub element_type: i16,
    /// Size in bytes of one element.
    pub element_size: i16,
    /// Number of elements.
    pub num_elements: i32,
    /// Total size of the data in bytes.
    pub data_size: i32,
    /// File position of the offset field within this record.
    pub data_offset_pos: u64,
    /// Stored offset value (or packed inline data).
    pub data_offset: i32,
    /// Reserved handle.
    pub data_handle: i32,
}

impl DirectoryEntry {
    /// Size of an on-disk entry record.
    pub const SIZE: usize = std::mem::size_of::<RawEntry>();

    /// Distance from the start of a record to its offset field.
    const OFFSET_FIELD: u64 = 20;

    /// Largest data size that is packed inline.
    pub const INLINE_LIMIT: i32 = 4;

    /// Read one entry record at the cursor's position.
    pub fn read<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<Self> {
        let start = cursor.tell();
        let bytes = cursor.read_bytes(Self::SIZE)?;
        let raw = RawEntry::read_from_bytes(&bytes).map_err(|_| abif_common::Error::UnexpectedEof {
            position: start,
            needed: Self::SIZE,
        })?;

        Ok(Self {
            name: Tag(raw.name),
            number: raw.number.get(),
            element_type: raw.element_type.get(),
            element_size: raw.element_size.get(),
            num_elements: raw.num_elements.get(),
            data_size: raw.data_size.get(),
            data_offset_pos: start + Self::OFFSET_FIELD,
            data_offset: raw.data_offset.get(),
            data_handle: raw.data_handle.get(),
        })
    }

    /// Whether the data is packed into the offset field.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.data_size <= Self::INLINE_LIMIT
    }

    /// File position where this entry's data starts.
    pub fn effective_offset(&self) -> Result<u64> {
        if self.is_inline() {
            return Ok(self.data_offset_pos);
        }
        u64::try_from(self.data_offset).map_err(|_| Error::NegativeOffset {
            name: self.name,
            number: self.number,
            offset: self.data_offset,
        })
    }

    /// Decoded element type.
    #[inline]
    pub fn kind(&self) -> ElementType {
        ElementType::from_raw(self.element_type)
    }

    /// Human-readable type name.
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) / {} ({})",
            self.name,
            self.number,
            self.type_name(),
            self.num_elements
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn record(data_size: i32, data_offset: i32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"DATA");
        bytes.extend_from_slice(&2i32.to_be_bytes());
        bytes.extend_from_slice(&4i16.to_be_bytes());
        bytes.extend_from_slice(&2i16.to_be_bytes());
        bytes.extend_from_slice(&(data_size / 2).to_be_bytes());
        bytes.extend_from_slice(&data_size.to_be_bytes());
        bytes.extend_from_slice(&data_offset.to_be_bytes());
        bytes.extend_from_slice(&0i32.to_be_bytes());
        bytes
    }

    #[test]
    fn test_record_size() {
        assert_eq!(DirectoryEntry::SIZE, 28);
    }

    #[test]
    fn test_read_entry_fields() {
        let mut data = vec![0u8; 10];
        data.extend(record(200, 512));
        let mut cursor = ByteCursor::new(Cursor::new(data)).unwrap();
        cursor.seek(10).unwrap();

        let entry = DirectoryEntry::read(&mut cursor).unwrap();
        assert_eq!(entry.name, Tag::new(b"DATA"));
        assert_eq!(entry.number, 2);
        assert_eq!(entry.kind(), ElementType::Short);
        assert_eq!(entry.element_size, 2);
        assert_eq!(entry.num_elements, 100);
        assert_eq!(entry.data_size, 200);
        assert_eq!(entry.data_offset_pos, 30);
        assert_eq!(entry.data_offset, 512);
        assert_eq!(cursor.tell(), 38);
    }

    #[test]
    fn test_effective_offset_inline_vs_pointer() {
        let mut cursor = ByteCursor::new(Cursor::new(record(4, 9999))).unwrap();
        let inline = DirectoryEntry::read(&mut cursor).unwrap();
        assert!(inline.is_inline());
        assert_eq!(inline.effective_offset().unwrap(), 20);

        let mut cursor = ByteCursor::new(Cursor::new(record(6, 9999))).unwrap();
        let external = DirectoryEntry::read(&mut cursor).unwrap();
        assert!(!external.is_inline());
        assert_eq!(external.effective_offset().unwrap(), 9999);
    }

    #[test]
    fn test_negative_offset_rejected() {
        let mut cursor = ByteCursor::new(Cursor::new(record(8, -1))).unwrap();
        let entry = DirectoryEntry::read(&mut cursor).unwrap();
        assert!(matches!(
            entry.effective_offset(),
            Err(Error::NegativeOffset { offset: -1, .. })
        ));
    }

    #[test]
    fn test_display() {
        let mut cursor = ByteCursor::new(Cursor::new(record(10, 64))).unwrap();
        let entry = DirectoryEntry::read(&mut cursor).unwrap();
        assert_eq!(entry.to_string(), "DATA (2) / short (5)");
    }

    #[test]
    fn test_tag_parse() {
        assert_eq!(Tag::parse("DATA"), Some(Tag::new(b"DATA")));
        assert_eq!(Tag::parse("DAT"), None);
        assert_eq!(Tag::new(b"tdir").to_string(), "tdir");
    }
}
