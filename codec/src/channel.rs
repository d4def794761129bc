//! Byte channels that codec operations read from and write to
//!
//! Every codec operation is built on two single-byte primitives:
//! [ByteSource::read_byte] and [ByteSink::write_byte]. The multi-byte helpers
//! on each trait are compositions of the primitive, so a failed call leaves
//! the channel advanced by exactly the bytes transferred before the failure.
//!
//! Adapters are provided for in-memory slices ([SliceSource], [SliceSink]),
//! growable buffers ([Vec] and [bytes::BytesMut]), and blocking `std::io`
//! streams ([StreamSource], [StreamSink]).

use crate::Error;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io;

/// A source of bytes.
pub trait ByteSource {
    /// Reads the next byte, or [Error::EndOfData] if the source is exhausted.
    fn read_byte(&mut self) -> Result<u8, Error>;

    /// Reads exactly `len` bytes.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::with_capacity(len);
        for _ in 0..len {
            bytes.push(self.read_byte()?);
        }
        Ok(bytes)
    }

    /// Reads exactly `N` bytes into an array.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut bytes = [0u8; N];
        for byte in bytes.iter_mut() {
            *byte = self.read_byte()?;
        }
        Ok(bytes)
    }
}

/// A destination for bytes.
///
/// Fixed-capacity sinks report exhaustion with [Error::CapacityExhausted].
/// Growable sinks never fail.
pub trait ByteSink {
    /// Writes a single byte.
    fn write_byte(&mut self, byte: u8) -> Result<(), Error>;

    /// Writes all of `bytes`.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn read_byte(&mut self) -> Result<u8, Error> {
        (**self).read_byte()
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        (**self).write_byte(byte)
    }
}

/// A [ByteSource] over a borrowed slice.
#[derive(Debug)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Number of bytes read so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_byte(&mut self) -> Result<u8, Error> {
        let byte = *self.bytes.get(self.position).ok_or(Error::EndOfData)?;
        self.position += 1;
        Ok(byte)
    }
}

/// A [ByteSink] over a borrowed mutable slice.
#[derive(Debug)]
pub struct SliceSink<'a> {
    bytes: &'a mut [u8],
    position: usize,
}

impl<'a> SliceSink<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes of capacity left.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }
}

impl ByteSink for SliceSink<'_> {
    fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        let slot = self
            .bytes
            .get_mut(self.position)
            .ok_or(Error::CapacityExhausted)?;
        *slot = byte;
        self.position += 1;
        Ok(())
    }
}

/// A [ByteSource] over a blocking [io::Read] stream.
#[derive(Debug)]
pub struct StreamSource<R: io::Read> {
    inner: R,
    position: u64,
}

impl<R: io::Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes read so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> ByteSource for StreamSource<R> {
    fn read_byte(&mut self) -> Result<u8, Error> {
        let mut byte = [0u8; 1];
        self.inner.read_exact(&mut byte).map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                Error::EndOfData
            } else {
                Error::Io(err)
            }
        })?;
        self.position += 1;
        Ok(byte[0])
    }
}

/// A [ByteSink] over a blocking [io::Write] stream.
#[derive(Debug)]
pub struct StreamSink<W: io::Write> {
    inner: W,
    position: u64,
}

impl<W: io::Write> StreamSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> ByteSink for StreamSink<W> {
    fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.inner.write_all(&[byte])?;
        self.position += 1;
        Ok(())
    }
}

impl ByteSource for Bytes {
    fn read_byte(&mut self) -> Result<u8, Error> {
        if !self.has_remaining() {
            return Err(Error::EndOfData);
        }
        Ok(self.get_u8())
    }
}

impl ByteSink for Vec<u8> {
    fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.push(byte);
        Ok(())
    }
}

impl ByteSink for BytesMut {
    fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.put_u8(byte);
        Ok(())
    }
}
