//! Growable, null-terminated byte string
//!
//! `DynamicString` keeps its own length and capacity on top of a zero-filled
//! byte buffer. When allocated, the byte at `len` is always `0`, so the live
//! contents are never flush against the end of the buffer. The stream readers
//! rely on that spare byte: a read that fills every remaining byte without
//! hitting a newline means the line is longer than the buffer, and reading
//! continues after growing it.

use crate::error::ReadError;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{self, BufRead, Read};

/// Smallest allocated buffer (16 bytes plus the terminator)
const DEFAULT_NONZERO_CAP: usize = 16 + 1;

/// Growth step while reading a line
const LINE_CHUNK: usize = 64;

/// Growth step while reading a whole stream
const STREAM_CHUNK: usize = 1024;

/// A growable byte string with an explicit capacity policy.
///
/// Comparison, equality and hashing are byte-wise over the live contents,
/// matching `strcmp` ordering.
#[derive(Clone, Default)]
pub struct DynamicString {
    len: usize,
    buf: Vec<u8>,
}

impl DynamicString {
    /// Create an empty, unallocated string
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            len: 0,
            buf: Vec::new(),
        }
    }

    /// Create an empty string able to hold `cap` bytes without growing
    ///
    /// A capacity of zero leaves the string unallocated.
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        if cap == 0 {
            return Self::new();
        }
        Self {
            len: 0,
            buf: vec![0; cap + 1],
        }
    }

    /// Number of live bytes
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Size of the buffer, terminator included (0 when unallocated)
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The live bytes, without the terminator
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The live bytes as UTF-8
    ///
    /// # Errors
    /// Returns the UTF-8 error if the buffer holds invalid UTF-8, which can
    /// happen after reading arbitrary bytes from a stream.
    #[inline]
    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    /// The live bytes as text, replacing invalid UTF-8
    #[inline]
    #[must_use]
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Make room for `additional` more bytes
    ///
    /// Grows to the larger of the exact requirement (plus terminator), twice
    /// the current capacity, and the 17-byte floor. Never shrinks.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len + additional;
        if required < self.capacity() {
            return;
        }
        let new_cap = (required + 1)
            .max(self.capacity().saturating_mul(2))
            .max(DEFAULT_NONZERO_CAP);
        self.buf.resize(new_cap, 0);
    }

    /// Append a string slice
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.push_bytes(s.as_bytes());
    }

    /// Append raw bytes
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.reserve(bytes.len());
        let end = self.len + bytes.len();
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        self.terminate();
    }

    /// Reset to empty, keeping the allocation
    pub fn clear(&mut self) {
        self.len = 0;
        self.terminate();
    }

    /// ASCII-lowercase in place
    pub fn make_ascii_lowercase(&mut self) {
        self.buf[..self.len].make_ascii_lowercase();
    }

    /// ASCII-uppercase in place
    pub fn make_ascii_uppercase(&mut self) {
        self.buf[..self.len].make_ascii_uppercase();
    }

    /// Strip leading and trailing ASCII whitespace
    pub fn trim(&mut self) {
        self.trim_leading();
        self.trim_trailing();
    }

    /// Strip leading ASCII whitespace, shifting the rest to the front
    pub fn trim_leading(&mut self) {
        let skip = self
            .as_bytes()
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        if skip > 0 {
            self.buf.copy_within(skip..self.len, 0);
            self.len -= skip;
            self.terminate();
        }
    }

    /// Strip trailing ASCII whitespace
    pub fn trim_trailing(&mut self) {
        self.trim_end_matching(u8::is_ascii_whitespace);
    }

    /// Strip trailing `\n` and `\r` only
    pub fn trim_newline(&mut self) {
        self.trim_end_matching(|b| matches!(b, b'\n' | b'\r'));
    }

    fn trim_end_matching(&mut self, strip: impl Fn(&u8) -> bool) {
        while self.len > 0 && strip(&self.buf[self.len - 1]) {
            self.len -= 1;
        }
        self.terminate();
    }

    /// Write the terminator after the live bytes, if allocated
    #[inline]
    fn terminate(&mut self) {
        if let Some(byte) = self.buf.get_mut(self.len) {
            *byte = 0;
        }
    }

    /// Replace the contents with the next line of `reader`
    ///
    /// The trailing newline (`\n` or `\r\n`) is removed. Lines longer than
    /// the buffer are read in several passes, growing between them.
    ///
    /// # Errors
    /// - [`ReadError::EndOfStream`] if the stream had no more input
    /// - [`ReadError::Io`] if the underlying read failed
    pub fn read_line_into<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> Result<(), ReadError> {
        self.clear();
        self.reserve(LINE_CHUNK);

        let end = self.capacity() - 1;
        let read = read_line_chunk(reader, &mut self.buf[..end])?;
        if read == 0 {
            return Err(ReadError::EndOfStream);
        }
        self.len = read;

        // A full buffer without a newline is only part of the line
        while self.len == self.capacity() - 1 && self.buf[self.len - 1] != b'\n' {
            self.reserve(LINE_CHUNK);
            let end = self.capacity() - 1;
            let read = read_line_chunk(reader, &mut self.buf[self.len..end])?;
            if read == 0 {
                break;
            }
            self.len += read;
        }

        self.terminate();
        self.trim_newline();
        Ok(())
    }

    /// Replace the contents with everything left in `reader`
    ///
    /// Trailing newlines are removed.
    ///
    /// # Errors
    /// - [`ReadError::EndOfStream`] if the stream was already exhausted
    /// - [`ReadError::Io`] if the underlying read failed
    pub fn read_all_into<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<(), ReadError> {
        self.clear();
        self.reserve(STREAM_CHUNK);

        let end = self.capacity() - 1;
        let read = read_fill(reader, &mut self.buf[..end])?;
        if read == 0 {
            return Err(ReadError::EndOfStream);
        }
        self.len = read;

        while self.len == self.capacity() - 1 {
            self.reserve(STREAM_CHUNK);
            let end = self.capacity() - 1;
            let read = read_fill(reader, &mut self.buf[self.len..end])?;
            if read == 0 {
                break;
            }
            self.len += read;
        }

        self.terminate();
        self.trim_newline();
        Ok(())
    }
}

/// Read bytes into `dst` up to and including the next `\n`
///
/// Stops early at a newline or end of stream; returns the number of bytes
/// written (0 only at end of stream or when `dst` is empty).
fn read_line_chunk<R: BufRead + ?Sized>(reader: &mut R, dst: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < dst.len() {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }

        let room = (dst.len() - filled).min(available.len());
        let take = available[..room]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(room, |newline| newline + 1);
        dst[filled..filled + take].copy_from_slice(&available[..take]);
        reader.consume(take);
        filled += take;

        if dst[filled - 1] == b'\n' {
            break;
        }
    }
    Ok(filled)
}

/// Read until `dst` is full or the stream ends
fn read_fill<R: Read + ?Sized>(reader: &mut R, dst: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < dst.len() {
        match reader.read(&mut dst[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

impl From<&str> for DynamicString {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            return Self::new();
        }
        let mut string = Self {
            len: 0,
            buf: vec![0; (s.len() + 1).max(DEFAULT_NONZERO_CAP)],
        };
        string.push_str(s);
        string
    }
}

impl fmt::Write for DynamicString {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl fmt::Display for DynamicString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl fmt::Debug for DynamicString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicString")
            .field("value", &self.to_str_lossy())
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl PartialEq for DynamicString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for DynamicString {}

impl PartialEq<str> for DynamicString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for DynamicString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialOrd for DynamicString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DynamicString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for DynamicString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}
