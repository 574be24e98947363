//! Big-endian cursor over a seekable byte stream.
//!
//! This module provides [`ByteCursor`], a reader that tracks its own position
//! and decodes network-order integers and floats from any `Read + Seek`
//! source (usually a buffered file).

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{Error, Result};

/// A big-endian binary reader over a seekable stream.
///
/// The cursor owns the stream; dropping the cursor (or calling
/// [`ByteCursor::into_inner`]) releases it.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use abif_common::ByteCursor;
///
/// let data = [b'A', b'B', b'I', b'F', 0x00, 0x65, 0xFF, 0xFE];
/// let mut cursor = ByteCursor::new(Cursor::new(&data[..])).unwrap();
///
/// assert_eq!(cursor.read_fixed_string(4).unwrap(), "ABIF");
/// assert_eq!(cursor.read_i16().unwrap(), 101);
/// assert_eq!(cursor.read_i16().unwrap(), -2);
/// assert_eq!(cursor.tell(), 8);
/// ```
#[derive(Debug)]
pub struct ByteCursor<R> {
    inner: R,
    position: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Wrap a stream, starting at its current position.
    pub fn new(mut inner: R) -> Result<Self> {
        let position = inner.stream_position()?;
        Ok(Self { inner, position })
    }

    /// Release the underlying stream.
    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Get a reference to the underlying stream.
    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Get the current absolute position in the stream.
    #[inline]
    pub fn tell(&self) -> u64 {
        self.position
    }

    /// Seek to an absolute position.
    pub fn seek(&mut self, position: u64) -> Result<()> {
        self.position = self.inner.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Run a fixed-width read, advancing the tracked position on success.
    ///
    /// A short read becomes [`Error::UnexpectedEof`] carrying the offset at
    /// which the read started. On any failure the tracked position follows
    /// whatever the stream consumed.
    fn fixed<T>(&mut self, needed: usize, read: impl FnOnce(&mut R) -> io::Result<T>) -> Result<T> {
        let start = self.position;
        match read(&mut self.inner) {
            Ok(value) => {
                self.position += needed as u64;
                Ok(value)
            }
            Err(e) => {
                self.resync()?;
                if e.kind() == io::ErrorKind::UnexpectedEof {
                    Err(Error::UnexpectedEof {
                        position: start,
                        needed,
                    })
                } else {
                    Err(Error::Io(e))
                }
            }
        }
    }

    fn resync(&mut self) -> Result<()> {
        self.position = self.inner.stream_position()?;
        Ok(())
    }

    /// Read exactly `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let start = self.position;
        // Grow with the data actually present instead of trusting `count`.
        let mut bytes = Vec::new();
        if let Err(e) = (&mut self.inner).take(count as u64).read_to_end(&mut bytes) {
            self.resync()?;
            return Err(Error::Io(e));
        }
        self.position += bytes.len() as u64;
        if bytes.len() < count {
            return Err(Error::UnexpectedEof {
                position: start,
                needed: count,
            });
        }
        Ok(bytes)
    }

    /// Read `length` bytes as characters.
    ///
    /// Every byte maps to the code point of the same value, so arbitrary
    /// bytes never fail to decode.
    pub fn read_fixed_string(&mut self, length: usize) -> Result<String> {
        let bytes = self.read_bytes(length)?;
        Ok(bytes.into_iter().map(char::from).collect())
    }

    /// Read an unsigned byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.fixed(1, |r| r.read_u8())
    }

    /// Read a signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.fixed(1, |r| r.read_i8())
    }

    /// Read a big-endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.fixed(2, |r| r.read_i16::<BigEndian>())
    }

    /// Read a big-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.fixed(2, |r| r.read_u16::<BigEndian>())
    }

    /// Read a big-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.fixed(4, |r| r.read_u32::<BigEndian>())
    }

    /// Read a big-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.fixed(4, |r| r.read_i32::<BigEndian>())
    }

    /// Read a big-endian IEEE-754 f32.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.fixed(4, |r| r.read_f32::<BigEndian>())
    }

    /// Read a big-endian IEEE-754 f64.
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        self.fixed(8, |r| r.read_f64::<BigEndian>())
    }

    /// Expect specific magic bytes.
    pub fn expect_magic(&mut self, expected: &[u8]) -> Result<()> {
        let actual = self.read_bytes(expected.len())?;
        if actual != expected {
            return Err(Error::InvalidMagic {
                expected: expected.to_vec(),
                actual,
            });
        }
        Ok(())
    }
}
