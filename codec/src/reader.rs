//! Decoding codec values from a byte source

use crate::{ByteOrder, ByteSource, Error, StringEncoding, leb128};
use paste::paste;

macro_rules! impl_read_fixed {
    ($type:ty, $size:expr) => {
        paste! {
            #[doc = concat!("Reads a `", stringify!($type), "` in the reader's byte order.")]
            #[inline]
            pub fn [<read_ $type>](&mut self) -> Result<$type, Error> {
                let bytes: [u8; $size] = self.source.read_array()?;
                Ok(match self.order {
                    ByteOrder::BigEndian => <$type>::from_be_bytes(bytes),
                    ByteOrder::LittleEndian => <$type>::from_le_bytes(bytes),
                })
            }
        }
    };
}

/// Decodes values from an underlying [ByteSource].
///
/// The byte order is fixed at construction and applies to every fixed-width
/// read. Variable-length integers and strings are order-independent.
#[derive(Debug)]
pub struct Reader<S: ByteSource> {
    source: S,
    order: ByteOrder,
}

impl<S: ByteSource> Reader<S> {
    pub fn new(source: S, order: ByteOrder) -> Self {
        Self { source, order }
    }

    pub fn big_endian(source: S) -> Self {
        Self::new(source, ByteOrder::BigEndian)
    }

    pub fn little_endian(source: S) -> Self {
        Self::new(source, ByteOrder::LittleEndian)
    }

    /// The byte order applied to fixed-width reads.
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    impl_read_fixed!(u8, 1);
    impl_read_fixed!(u16, 2);
    impl_read_fixed!(u32, 4);
    impl_read_fixed!(u64, 8);
    impl_read_fixed!(i8, 1);
    impl_read_fixed!(i16, 2);
    impl_read_fixed!(i32, 4);
    impl_read_fixed!(i64, 8);

    /// Reads an `f32` as the raw bit pattern of a `u32`.
    ///
    /// NaN payloads pass through untouched.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Reads an `f64` as the raw bit pattern of a `u64`.
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Reads exactly `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, Error> {
        self.source.read_bytes(len)
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        self.source.read_array::<N>()
    }

    /// Reads an unsigned LEB128 integer.
    pub fn read_uleb128(&mut self) -> Result<u64, Error> {
        leb128::read(&mut self.source)
    }

    /// Reads an unsigned LEB128 integer and shifts it down by one.
    pub fn read_uleb128_p1(&mut self) -> Result<i64, Error> {
        leb128::read_plus_one(&mut self.source)
    }

    /// Reads a signed LEB128 integer.
    pub fn read_sleb128(&mut self) -> Result<i32, Error> {
        leb128::read_signed(&mut self.source)
    }

    /// Reads `len` bytes and decodes them as `encoding`.
    pub fn read_string(&mut self, len: usize, encoding: StringEncoding) -> Result<Vec<u16>, Error> {
        let bytes = self.source.read_bytes(len)?;
        encoding.decode(&bytes)
    }

    /// Reads `len` bytes and decodes them as `encoding` into an owned string.
    pub fn read_str(&mut self, len: usize, encoding: StringEncoding) -> Result<String, Error> {
        let bytes = self.source.read_bytes(len)?;
        encoding.decode_to_string(&bytes)
    }
}
