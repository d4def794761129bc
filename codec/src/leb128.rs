//! Variable-length integer encoding
//!
//! LEB128 packs an integer into groups of 7 bits, least-significant group
//! first. Each encoded byte carries:
//! - 7 bits of payload (the low bits)
//! - 1 continuation bit (the high bit), set when another byte follows
//!
//! Three flavors are provided, matching the DWARF and DEX conventions:
//! - [read]/[write]: unsigned
//! - [read_plus_one]/[write_plus_one]: the value shifted up by one before
//!   unsigned encoding, so `-1` fits in a single zero byte
//! - [read_signed]/[write_signed]: signed, sign-extended from the final group

use crate::{ByteSink, ByteSource, Error};

/// The mask for the payload bits of an encoded byte.
const DATA_BITS_MASK: u8 = 0x7F;

/// The mask for the continuation bit of an encoded byte.
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// The mask for the sign bit of a final signed group.
const SIGN_BIT_MASK: u8 = 0x40;

/// Decodes an unsigned integer from `source`.
///
/// Accepts encodings of any length: payload groups past the 64-bit boundary
/// wrap their shift distance, so oversized inputs fold into the result
/// instead of failing.
pub fn read(source: &mut impl ByteSource) -> Result<u64, Error> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        let byte = source.read_byte()?;
        result |= u64::from(byte & DATA_BITS_MASK).wrapping_shl(shift);
        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok(result);
        }
        shift = shift.wrapping_add(7);
    }
}

/// Encodes an unsigned integer to `sink`.
///
/// Values below 128 occupy a single byte. `u64::MAX` occupies ten.
pub fn write(sink: &mut impl ByteSink, value: u64) -> Result<(), Error> {
    let mut value = value;
    while value >= u64::from(CONTINUATION_BIT_MASK) {
        sink.write_byte((value as u8) | CONTINUATION_BIT_MASK)?;
        value >>= 7;
    }
    sink.write_byte(value as u8)
}

/// Decodes an unsigned integer from `source` and shifts it down by one.
pub fn read_plus_one(source: &mut impl ByteSource) -> Result<i64, Error> {
    Ok((read(source)? as i64).wrapping_sub(1))
}

/// Shifts `value` up by one and encodes the sum as an unsigned integer to
/// `sink`.
///
/// `-1` encodes as a single zero byte, which makes it a convenient sentinel
/// in formats with optional indices.
pub fn write_plus_one(sink: &mut impl ByteSink, value: i64) -> Result<(), Error> {
    write(sink, value.wrapping_add(1) as u64)
}

/// Decodes a signed 32-bit integer from `source`.
///
/// If the final group leaves the value narrower than 32 bits and its sign bit
/// is set, the result is sign-extended.
pub fn read_signed(source: &mut impl ByteSource) -> Result<i32, Error> {
    let mut result: i32 = 0;
    let mut shift: u32 = 0;
    loop {
        let byte = source.read_byte()?;
        result |= i32::from(byte & DATA_BITS_MASK).wrapping_shl(shift);
        shift = shift.wrapping_add(7);
        if byte & CONTINUATION_BIT_MASK == 0 {
            if shift < 31 && byte & SIGN_BIT_MASK != 0 {
                result |= (-1i32).wrapping_shl(shift);
            }
            return Ok(result);
        }
    }
}

/// Encodes a signed 32-bit integer to `sink`.
///
/// Groups are peeled off with an arithmetic shift. The encoding terminates on
/// the first group whose sign bit agrees with every remaining bit, so small
/// magnitudes of either sign stay short.
pub fn write_signed(sink: &mut impl ByteSink, value: i32) -> Result<(), Error> {
    let mut value = value;
    loop {
        let mut byte = (value as u8) & DATA_BITS_MASK;
        value >>= 7;
        let terminal = (value == 0 && byte & SIGN_BIT_MASK == 0)
            || (value == -1 && byte & SIGN_BIT_MASK != 0);
        if !terminal {
            byte |= CONTINUATION_BIT_MASK;
        }
        sink.write_byte(byte)?;
        if terminal {
            return Ok(());
        }
    }
}
