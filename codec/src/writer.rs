//! Encoding codec values to a byte sink

use crate::{ByteOrder, ByteSink, Error, StringEncoding, leb128};
use paste::paste;

macro_rules! impl_write_fixed {
    ($type:ty) => {
        paste! {
            #[doc = concat!("Writes a `", stringify!($type), "` in the writer's byte order.")]
            #[inline]
            pub fn [<write_ $type>](&mut self, value: $type) -> Result<(), Error> {
                let bytes = match self.order {
                    ByteOrder::BigEndian => value.to_be_bytes(),
                    ByteOrder::LittleEndian => value.to_le_bytes(),
                };
                self.sink.write_bytes(&bytes)
            }
        }
    };
}

/// Encodes values to an underlying [ByteSink].
///
/// The byte order is fixed at construction and applies to every fixed-width
/// write. Variable-length integers and strings are order-independent.
#[derive(Debug)]
pub struct Writer<S: ByteSink> {
    sink: S,
    order: ByteOrder,
}

impl<S: ByteSink> Writer<S> {
    pub fn new(sink: S, order: ByteOrder) -> Self {
        Self { sink, order }
    }

    pub fn big_endian(sink: S) -> Self {
        Self::new(sink, ByteOrder::BigEndian)
    }

    pub fn little_endian(sink: S) -> Self {
        Self::new(sink, ByteOrder::LittleEndian)
    }

    /// The byte order applied to fixed-width writes.
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    impl_write_fixed!(u8);
    impl_write_fixed!(u16);
    impl_write_fixed!(u32);
    impl_write_fixed!(u64);
    impl_write_fixed!(i8);
    impl_write_fixed!(i16);
    impl_write_fixed!(i32);
    impl_write_fixed!(i64);

    /// Writes an `f32` as the raw bit pattern of a `u32`.
    ///
    /// NaN payloads pass through untouched.
    #[inline]
    pub fn write_f32(&mut self, value: f32) -> Result<(), Error> {
        self.write_u32(value.to_bits())
    }

    /// Writes an `f64` as the raw bit pattern of a `u64`.
    #[inline]
    pub fn write_f64(&mut self, value: f64) -> Result<(), Error> {
        self.write_u64(value.to_bits())
    }

    /// Writes all of `bytes`.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.sink.write_bytes(bytes)
    }

    /// Writes an unsigned LEB128 integer.
    pub fn write_uleb128(&mut self, value: u64) -> Result<(), Error> {
        leb128::write(&mut self.sink, value)
    }

    /// Shifts `value` up by one and writes it as an unsigned LEB128 integer.
    pub fn write_uleb128_p1(&mut self, value: i64) -> Result<(), Error> {
        leb128::write_plus_one(&mut self.sink, value)
    }

    /// Writes a signed LEB128 integer.
    pub fn write_sleb128(&mut self, value: i32) -> Result<(), Error> {
        leb128::write_signed(&mut self.sink, value)
    }

    /// Encodes `units` as `encoding` and writes the bytes.
    ///
    /// Encoding happens before any byte reaches the sink, so nothing is
    /// written when `units` contains an unpaired surrogate.
    pub fn write_string(&mut self, units: &[u16], encoding: StringEncoding) -> Result<(), Error> {
        let bytes = encoding.encode(units)?;
        self.sink.write_bytes(&bytes)
    }

    /// Encodes a string slice as `encoding` and writes the bytes.
    pub fn write_str(&mut self, string: &str, encoding: StringEncoding) -> Result<(), Error> {
        let bytes = encoding.encode_str(string);
        self.sink.write_bytes(&bytes)
    }
}
