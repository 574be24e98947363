//! ABIF container reader.
//!
//! An ABIF file starts with the magic `ABIF`, a version number and a root
//! directory entry. The root entry's offset points at an array of further
//! directory entries; each of those describes one tagged field.

use std::fs::File;
use std::hash::BuildHasherDefault;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use abif_common::ByteCursor;
use hashbrown::HashMap as FastHashMap;
use rustc_hash::FxHasher;

use crate::decode::decode;
use crate::entry::{DirectoryEntry, Tag};
use crate::value::Value;
use crate::{Error, Result};

type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Magic bytes at the start of every ABIF file.
pub const ABIF_MAGIC: &[u8; 4] = b"ABIF";

/// Cap on entries reserved before reading, whatever the root record claims.
const PREALLOC_ENTRIES: usize = 4096;

/// A parsed ABIF container.
///
/// The directory is read once at open time. The container keeps the stream
/// open so entries can be decoded on demand; dropping it releases the file.
#[derive(Debug)]
pub struct Container<R> {
    cursor: ByteCursor<R>,
    version: i16,
    root: DirectoryEntry,
    entries: Vec<DirectoryEntry>,
    /// (name, number) -> index of the first matching entry.
    index: FxHashMap<(Tag, i32), usize>,
}

impl Container<BufReader<File>> {
    /// Open and parse an ABIF file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("opening ABIF container {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> Container<R> {
    /// Parse an ABIF container from a seekable stream positioned at its start.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut cursor = ByteCursor::new(reader)?;

        cursor.expect_magic(ABIF_MAGIC).map_err(|e| match e {
            abif_common::Error::InvalidMagic { actual, .. } => Error::NotAbif { actual },
            other => Error::from(other),
        })?;

        let version = cursor.read_i16()?;
        let root = DirectoryEntry::read(&mut cursor)?;

        let count = usize::try_from(root.num_elements).map_err(|_| Error::NegativeCount {
            count: root.num_elements,
            offset: root.data_offset_pos,
        })?;
        let directory_offset = u64::try_from(root.data_offset).map_err(|_| Error::NegativeOffset {
            name: root.name,
            number: root.number,
            offset: root.data_offset,
        })?;

        cursor.seek(directory_offset)?;
        let mut entries = Vec::with_capacity(count.min(PREALLOC_ENTRIES));
        for _ in 0..count {
            entries.push(DirectoryEntry::read(&mut cursor)?);
        }

        let mut index = FxHashMap::default();
        for (i, entry) in entries.iter().enumerate() {
            let key = (entry.name, entry.number);
            if index.contains_key(&key) {
                log::warn!(
                    "duplicate directory entry {} ({}), keeping the first",
                    entry.name,
                    entry.number
                );
                continue;
            }
            index.insert(key, i);
        }

        log::debug!(
            "parsed ABIF v{} directory: {} entries at offset {}",
            version,
            entries.len(),
            directory_offset
        );

        Ok(Self {
            cursor,
            version,
            root,
            entries,
            index,
        })
    }

    /// Get the file format version.
    #[inline]
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Get the root directory record.
    #[inline]
    pub fn root(&self) -> &DirectoryEntry {
        &self.root
    }

    /// All directory entries in file order.
    #[inline]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Number of directory entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the directory is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by tag and number.
    #[inline]
    pub fn get(&self, name: Tag, number: i32) -> Option<&DirectoryEntry> {
        self.index.get(&(name, number)).map(|&i| &self.entries[i])
    }

    /// Find an entry by name and number.
    ///
    /// Names that are not exactly four bytes never match.
    pub fn lookup(&self, name: &str, number: i32) -> Option<&DirectoryEntry> {
        Tag::parse(name).and_then(|tag| self.get(tag, number))
    }

    /// Seek to an entry's data and decode it.
    ///
    /// Failures are wrapped in [`Error::Entry`] with the entry's name, number
    /// and data offset.
    pub fn decode_entry(&mut self, entry: &DirectoryEntry) -> Result<Value> {
        let offset = entry.effective_offset()?;
        self.cursor
            .seek(offset)
            .map_err(Error::from)
            .and_then(|()| decode(&mut self.cursor, entry.kind(), entry.num_elements))
            .map_err(|e| Error::Entry {
                name: entry.name,
                number: entry.number,
                offset,
                source: Box::new(e),
            })
    }

    /// Look up and decode an entry, failing if it is absent.
    pub fn data(&mut self, name: Tag, number: i32) -> Result<Value> {
        let entry = *self
            .get(name, number)
            .ok_or(Error::MissingField { name, number })?;
        self.decode_entry(&entry)
    }

    /// Release the underlying stream.
    pub fn into_inner(self) -> R {
        self.cursor.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;
    use crate::fixture::ContainerBuilder;
    use crate::ErrorKind;

    #[test]
    fn test_entry_count_matches_root() {
        let bytes = ContainerBuilder::new(101)
            .shorts(b"DATA", 1, &[1, 2, 3, 4, 5])
            .field(b"MODL", 1, 2, 1, 4, b"3130".to_vec())
            .field(b"LANE", 1, 4, 2, 1, 7i16.to_be_bytes().to_vec())
            .build();
        let container = Container::from_reader(Cursor::new(bytes)).unwrap();

        assert_eq!(container.version(), 101);
        assert_eq!(container.root().num_elements, 3);
        assert_eq!(container.len(), 3);
        assert_eq!(container.entries()[1].name, Tag::new(b"MODL"));
    }

    #[test]
    fn test_lookup_and_data() {
        let bytes = ContainerBuilder::new(101)
            .shorts(b"DATA", 1, &[10, 20, 30])
            .field(b"MODL", 1, 2, 1, 4, b"3130".to_vec())
            .field(b"LANE", 1, 4, 2, 1, 7i16.to_be_bytes().to_vec())
            .build();
        let mut container = Container::from_reader(Cursor::new(bytes)).unwrap();

        assert!(container.lookup("DATA", 1).is_some());
        assert!(container.lookup("DATA", 2).is_none());
        assert!(container.lookup("DAT", 1).is_none());

        assert_eq!(
            container.data(Tag::new(b"DATA"), 1).unwrap(),
            Value::Shorts(vec![10, 20, 30])
        );
        assert_eq!(container.data(Tag::new(b"MODL"), 1).unwrap(), Value::Text("3130".into()));
        assert_eq!(container.data(Tag::new(b"LANE"), 1).unwrap(), Value::Short(7));

        let err = container.data(Tag::new(b"PBAS"), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let bytes = ContainerBuilder::new(101)
            .shorts(b"DATA", 1, &[1, 1, 1])
            .shorts(b"DATA", 1, &[2, 2, 2])
            .build();
        let mut container = Container::from_reader(Cursor::new(bytes)).unwrap();

        assert_eq!(container.len(), 2);
        assert_eq!(
            container.data(Tag::new(b"DATA"), 1).unwrap(),
            Value::Shorts(vec![1, 1, 1])
        );
    }

    #[test]
    fn test_bad_magic_reads_nothing_else() {
        // Only the magic is present: a parser that read further would hit EOF.
        let err = Container::from_reader(Cursor::new(b"RIFF".to_vec())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(err, Error::NotAbif { ref actual } if actual == b"RIFF"));
    }

    #[test]
    fn test_truncated_directory_is_io() {
        let mut bytes = ContainerBuilder::new(101).shorts(b"DATA", 1, &[1, 2, 3]).build();
        bytes.truncate(bytes.len() - 10);
        let err = Container::from_reader(Cursor::new(bytes)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_inline_storage_uses_offset_field() {
        // DATA/1 lives in an external region starting right after the header.
        // DATA/9 holds two shorts [0, 40] inline; read as a pointer they would
        // point at byte 40, inside DATA/1's region.
        let bytes = ContainerBuilder::new(101)
            .shorts(b"DATA", 1, &[100, 101, 102, 103, 104, 105, 106, 107, 108, 109])
            .shorts(b"DATA", 9, &[0, 40])
            .build();
        let container = Container::from_reader(Cursor::new(bytes.clone())).unwrap();
        let inline = *container.lookup("DATA", 9).unwrap();
        assert!(inline.is_inline());
        assert_eq!(inline.data_offset, 40);
        let pos = inline.data_offset_pos as usize;

        // Bytes at the stored pointer do not affect the inline value.
        let mut pointer_mutated = bytes.clone();
        pointer_mutated[40..44].copy_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);
        let mut container = Container::from_reader(Cursor::new(pointer_mutated)).unwrap();
        assert_eq!(
            container.data(Tag::new(b"DATA"), 9).unwrap(),
            Value::Shorts(vec![0, 40])
        );
        assert_ne!(
            container.data(Tag::new(b"DATA"), 1).unwrap(),
            Value::Shorts(vec![100, 101, 102, 103, 104, 105, 106, 107, 108, 109])
        );

        // Bytes at the offset field do.
        let mut inline_mutated = bytes;
        inline_mutated[pos..pos + 4].copy_from_slice(&[0x00, 0x05, 0x00, 0x06]);
        let mut container = Container::from_reader(Cursor::new(inline_mutated)).unwrap();
        assert_eq!(
            container.data(Tag::new(b"DATA"), 9).unwrap(),
            Value::Shorts(vec![5, 6])
        );
    }

    #[test]
    fn test_decode_errors_carry_entry_context() {
        let bytes = ContainerBuilder::new(101)
            .field(b"WEIR", 3, 9, 2, 4, vec![0; 8])
            .build();
        let mut container = Container::from_reader(Cursor::new(bytes)).unwrap();

        let err = container.data(Tag::new(b"WEIR"), 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        match err {
            Error::Entry { name, number, source, .. } => {
                assert_eq!(name, Tag::new(b"WEIR"));
                assert_eq!(number, 3);
                assert!(matches!(*source, Error::UnknownElementType { element_type: 9, .. }));
            }
            other => panic!("expected entry error, got {:?}", other),
        }
    }

    #[test]
    fn test_user_type_decodes_to_marker() {
        let bytes = ContainerBuilder::new(101)
            .field(b"USER", 1, 1024, 1, 6, vec![1, 2, 3, 4, 5, 6])
            .build();
        let mut container = Container::from_reader(Cursor::new(bytes)).unwrap();

        assert_eq!(container.lookup("USER", 1).unwrap().type_name(), "user");
        assert_eq!(
            container.data(Tag::new(b"USER"), 1).unwrap(),
            Value::Unsupported { element_type: 1024 }
        );
    }

    #[test]
    fn test_open_from_disk() {
        let bytes = ContainerBuilder::new(101).shorts(b"DATA", 4, &[9, 8, 7]).build();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let mut container = Container::open(file.path()).unwrap();
        assert_eq!(
            container.data(Tag::new(b"DATA"), 4).unwrap(),
            Value::Shorts(vec![9, 8, 7])
        );
    }

    #[test]
    fn test_open_missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = Container::open(dir.path().join("absent.fsa")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
