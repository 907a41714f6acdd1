//! Big-endian bit-field cursors.
//!
//! [`Reader`] and [`Writer`] pair a buffer with the offset of the next byte to
//! consume. Every access is bounds checked and fails with
//! [`Error::OutOfBounds`] rather than panicking, and the offset only moves
//! forward. The one exception is [`Writer::patch_u16`], which back-fills a
//! field reserved earlier through a [`Bookmark`]; RTCP length fields are written
//! that way once the body size is known.
//!
//! ```
//! use rtc_shared::cursor::{Reader, Writer};
//!
//! let mut buf = [0u8; 7];
//! let mut writer = Writer::new(&mut buf);
//! writer.write_u8(0x80).unwrap();
//! writer.write_u16(1000).unwrap();
//! writer.write_u32(90000).unwrap();
//! assert_eq!(writer.remaining(), 0);
//!
//! let mut reader = Reader::new(&buf);
//! assert_eq!(reader.read_u8().unwrap(), 0x80);
//! assert_eq!(reader.read_u16().unwrap(), 1000);
//! assert_eq!(reader.read_u32().unwrap(), 90000);
//! assert!(reader.read_u8().is_err());
//! ```

use crate::error::{Error, Result};


/// Read cursor over a borrowed byte slice.
///
/// `Reader` is `Copy`: handing it to a decoder by value and getting the
/// advanced copy back keeps the caller's original offset intact when decoding
/// fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    /// Creates a reader positioned at `offset`.
    pub fn with_offset(buf: &'a [u8], offset: usize) -> Result<Self> {
        if offset > buf.len() {
            return Err(Error::InvalidArgument("offset is past the end of the buffer"));
        }

        Ok(Reader { buf, pos: offset })
    }

    /// Offset of the next byte, measured from the start of the original buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// The unread bytes.
    pub fn chunk(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn check(&self, ahead: usize, needed: usize) -> Result<usize> {
        let start = self.pos.saturating_add(ahead);
        match start.checked_add(needed) {
            Some(end) if end <= self.buf.len() => Ok(start),
            _ => Err(Error::OutOfBounds {
                offset: start,
                needed,
                len: self.buf.len(),
            }),
        }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let start = self.check(0, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[start..start + N]);
        self.pos += N;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.take::<1>()?;
        Ok(b)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take()?))
    }

    /// Reads a 24-bit big-endian value into the low bits of a `u32`.
    pub fn read_u24(&mut self) -> Result<u32> {
        let [b0, b1, b2] = self.take::<3>()?;
        Ok(u32::from_be_bytes([0, b0, b1, b2]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.take()?))
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let start = self.check(0, n)?;
        self.pos += n;
        Ok(&self.buf[start..start + n])
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.check(0, n)?;
        self.pos += n;
        Ok(())
    }

    /// Returns the byte `ahead` bytes past the current position without consuming it.
    pub fn peek_u8(&self, ahead: usize) -> Result<u8> {
        let start = self.check(ahead, 1)?;
        Ok(self.buf[start])
    }

    /// Returns the big-endian `u16` `ahead` bytes past the current position without consuming it.
    pub fn peek_u16(&self, ahead: usize) -> Result<u16> {
        let start = self.check(ahead, 2)?;
        Ok(u16::from_be_bytes([self.buf[start], self.buf[start + 1]]))
    }

    /// Splits the next `n` bytes off into their own reader and advances past them.
    ///
    /// The returned reader keeps offsets relative to the original buffer, but
    /// can never read beyond the `n` bytes it was given.
    pub fn split_to(&mut self, n: usize) -> Result<Reader<'a>> {
        let start = self.check(0, n)?;
        self.pos += n;
        Ok(Reader {
            buf: &self.buf[..start + n],
            pos: start,
        })
    }

    /// Drops `n` bytes from the end of the readable region.
    pub fn truncate_end(&mut self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(Error::OutOfBounds {
                offset: self.pos,
                needed: n,
                len: self.buf.len(),
            });
        }

        self.buf = &self.buf[..self.buf.len() - n];
        Ok(())
    }

    /// Last byte of the readable region.
    pub fn last_u8(&self) -> Result<u8> {
        self.peek_u8(self.remaining().saturating_sub(1))
    }
}

/// Position in a [`Writer`] recorded before a placeholder was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark(usize);

impl Bookmark {
    pub fn position(&self) -> usize {
        self.0
    }
}

/// Write cursor over a caller-owned mutable byte slice.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Writer { buf, pos: 0 }
    }

    /// Creates a writer positioned at `offset`.
    pub fn with_offset(buf: &'a mut [u8], offset: usize) -> Result<Self> {
        if offset > buf.len() {
            return Err(Error::InvalidArgument("offset is past the end of the buffer"));
        }

        Ok(Writer { buf, pos: offset })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn reserve(&mut self, needed: usize) -> Result<&mut [u8]> {
        if needed > self.remaining() {
            return Err(Error::OutOfBounds {
                offset: self.pos,
                needed,
                len: self.buf.len(),
            });
        }

        let start = self.pos;
        self.pos += needed;
        Ok(&mut self.buf[start..start + needed])
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes the low 24 bits of `value`; the high byte must be zero.
    pub fn write_u24(&mut self, value: u32) -> Result<()> {
        if value > 0x00FF_FFFF {
            return Err(Error::InvalidArgument("value does not fit in 24 bits"));
        }

        self.write_bytes(&value.to_be_bytes()[1..])
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    pub fn write_zeros(&mut self, n: usize) -> Result<()> {
        self.reserve(n)?.fill(0);
        Ok(())
    }

    /// Records the current position so a placeholder written next can be patched later.
    pub fn bookmark(&self) -> Bookmark {
        Bookmark(self.pos)
    }

    /// Number of bytes written since `mark` was taken.
    pub fn written_since(&self, mark: Bookmark) -> usize {
        self.pos.saturating_sub(mark.0)
    }

    /// Overwrites the two bytes at `mark`, which must already have been written.
    pub fn patch_u16(&mut self, mark: Bookmark, value: u16) -> Result<()> {
        let start = mark.0;
        if start + 2 > self.pos {
            return Err(Error::InvalidArgument("bookmark does not cover a written field"));
        }

        self.buf[start..start + 2].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }
}
