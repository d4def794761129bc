//! String encoding and decoding between UTF-16 code units and bytes
//!
//! Three encodings share the same byte shapes for single code units and
//! diverge on supplementary characters (above U+FFFF, carried in UTF-16 by a
//! surrogate pair) and on the null code unit:
//!
//! - [StringEncoding::Utf8]: a surrogate pair combines into one code point,
//!   emitted as a single 4-byte group. Surrogates themselves are rejected on
//!   decode.
//! - [StringEncoding::Cesu8]: each half of a surrogate pair is emitted as its
//!   own 3-byte group, 6 bytes per supplementary character.
//! - [StringEncoding::ModifiedUtf8]: CESU-8, except the null code unit uses
//!   its 2-byte form so encoded strings never contain a zero byte.
//!
//! Decoding is permissive where the rules above allow it: overlong forms of
//! 1-3 byte groups are accepted, and a group is validated by shape rather
//! than by the range of its payload.

use crate::error::{Error, Surrogate};

const HIGH_SURROGATE_MIN: u16 = 0xD800;
const HIGH_SURROGATE_MAX: u16 = 0xDBFF;
const LOW_SURROGATE_MIN: u16 = 0xDC00;
const LOW_SURROGATE_MAX: u16 = 0xDFFF;

/// Takes the next byte, failing when the input is exhausted.
fn take(bytes: &[u8], pos: &mut usize) -> Result<u8, Error> {
    let byte = *bytes.get(*pos).ok_or(Error::EndOfData)?;
    *pos += 1;
    Ok(byte)
}

/// Takes the next byte and checks that it has the continuation shape.
fn continuation(bytes: &[u8], pos: &mut usize) -> Result<u8, Error> {
    let byte = take(bytes, pos)?;
    if byte & 0b1100_0000 != 0b1000_0000 {
        return Err(Error::InvalidByte {
            offset: *pos - 1,
            expected: "10xxxxxx",
            found: byte,
        });
    }
    Ok(byte)
}

/// A string encoding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    Utf8,
    Cesu8,
    ModifiedUtf8,
}

impl StringEncoding {
    /// Encodes a sequence of UTF-16 code units.
    ///
    /// Surrogates must appear in high/low pairs. A high surrogate without a
    /// low surrogate directly after it (or a bare low surrogate) fails with
    /// [Error::UnpairedSurrogate].
    pub fn encode(self, units: &[u16]) -> Result<Vec<u8>, Error> {
        // At most three bytes per code unit in every variant.
        let mut bytes = Vec::with_capacity(units.len() * 3);
        let mut i = 0;
        while i < units.len() {
            let c = units[i];
            match c {
                0x0000 if self == Self::ModifiedUtf8 => {
                    bytes.push(0b1100_0000);
                    bytes.push(0b1000_0000);
                }
                0x0000..=0x007F => bytes.push(c as u8),
                0x0080..=0x07FF => {
                    bytes.push(0b1100_0000 | (c >> 6) as u8);
                    bytes.push(0b1000_0000 | (c & 0x3F) as u8);
                }
                HIGH_SURROGATE_MIN..=HIGH_SURROGATE_MAX => {
                    let d = match units.get(i + 1) {
                        Some(&d) if (LOW_SURROGATE_MIN..=LOW_SURROGATE_MAX).contains(&d) => d,
                        _ => {
                            return Err(Error::UnpairedSurrogate {
                                index: i,
                                unit: c,
                                surrogate: Surrogate::High,
                            })
                        }
                    };
                    i += 1;
                    self.encode_pair(&mut bytes, c, d);
                }
                LOW_SURROGATE_MIN..=LOW_SURROGATE_MAX => {
                    return Err(Error::UnpairedSurrogate {
                        index: i,
                        unit: c,
                        surrogate: Surrogate::Low,
                    })
                }
                // 0x0800..=0xD7FF and 0xE000..=0xFFFF
                _ => {
                    bytes.push(0b1110_0000 | (c >> 12) as u8);
                    bytes.push(0b1000_0000 | ((c >> 6) & 0x3F) as u8);
                    bytes.push(0b1000_0000 | (c & 0x3F) as u8);
                }
            }
            i += 1;
        }
        Ok(bytes)
    }

    /// Emits a surrogate pair: one 4-byte group ([StringEncoding::Utf8]) or
    /// two 3-byte groups (the CESU-8 family).
    fn encode_pair(self, bytes: &mut Vec<u8>, high: u16, low: u16) {
        match self {
            Self::Utf8 => {
                let code_point = 0x10000
                    + ((u32::from(high - HIGH_SURROGATE_MIN) << 10)
                        | u32::from(low - LOW_SURROGATE_MIN));
                bytes.push(0b1111_0000 | (code_point >> 18) as u8);
                bytes.push(0b1000_0000 | ((code_point >> 12) & 0x3F) as u8);
                bytes.push(0b1000_0000 | ((code_point >> 6) & 0x3F) as u8);
                bytes.push(0b1000_0000 | (code_point & 0x3F) as u8);
            }
            Self::Cesu8 | Self::ModifiedUtf8 => {
                let top = high - HIGH_SURROGATE_MIN;
                bytes.push(0b1110_1101);
                bytes.push(0b1010_0000 | (top >> 6) as u8);
                bytes.push(0b1000_0000 | (top & 0x3F) as u8);
                let bottom = low - LOW_SURROGATE_MIN;
                bytes.push(0b1110_1101);
                bytes.push(0b1011_0000 | (bottom >> 6) as u8);
                bytes.push(0b1000_0000 | (bottom & 0x3F) as u8);
            }
        }
    }

    /// Decodes bytes into UTF-16 code units.
    ///
    /// Each group's lead byte selects its length and every following byte of
    /// the group must have the continuation shape. Beyond that, payloads are
    /// taken as-is: an overlong group decodes to the unit it spells, and a
    /// 4-byte group decodes to a surrogate pair without a range check.
    pub fn decode(self, bytes: &[u8]) -> Result<Vec<u16>, Error> {
        let mut units = Vec::with_capacity(bytes.len());
        let mut pos = 0;
        while pos < bytes.len() {
            let start = pos;
            let x = bytes[pos];
            pos += 1;
            if x & 0b1000_0000 == 0 {
                if x == 0 && self == Self::ModifiedUtf8 {
                    return Err(Error::RawNull { offset: start });
                }
                units.push(u16::from(x));
            } else if x & 0b1110_0000 == 0b1100_0000 {
                let y = continuation(bytes, &mut pos)?;
                units.push(u16::from(x & 0x1F) << 6 | u16::from(y & 0x3F));
            } else if x & 0b1111_0000 == 0b1110_0000 {
                let y = continuation(bytes, &mut pos)?;
                match self {
                    Self::Utf8 => {
                        let z = continuation(bytes, &mut pos)?;
                        if x == 0xED && y & 0b0010_0000 != 0 {
                            let surrogate = if y & 0b0001_0000 == 0 {
                                Surrogate::High
                            } else {
                                Surrogate::Low
                            };
                            return Err(Error::EncodedSurrogate {
                                offset: start,
                                surrogate,
                            });
                        }
                        units.push(
                            u16::from(x & 0x0F) << 12
                                | u16::from(y & 0x3F) << 6
                                | u16::from(z & 0x3F),
                        );
                    }
                    Self::Cesu8 | Self::ModifiedUtf8
                        if x == 0xED && y & 0b1111_0000 == 0b1010_0000 =>
                    {
                        // A high surrogate group must be followed by a low
                        // surrogate group to form a pair.
                        let z = continuation(bytes, &mut pos)?;
                        let a = take(bytes, &mut pos)?;
                        if a != 0b1110_1101 {
                            return Err(Error::InvalidByte {
                                offset: pos - 1,
                                expected: "11101101",
                                found: a,
                            });
                        }
                        let b = take(bytes, &mut pos)?;
                        if b & 0b1111_0000 != 0b1011_0000 {
                            return Err(Error::InvalidByte {
                                offset: pos - 1,
                                expected: "1011xxxx",
                                found: b,
                            });
                        }
                        let c = continuation(bytes, &mut pos)?;
                        units.push(0xD800 | u16::from(y & 0x0F) << 6 | u16::from(z & 0x3F));
                        units.push(0xDC00 | u16::from(b & 0x0F) << 6 | u16::from(c & 0x3F));
                    }
                    Self::Cesu8 | Self::ModifiedUtf8
                        if x == 0xED && y & 0b1111_0000 == 0b1011_0000 =>
                    {
                        return Err(Error::EncodedSurrogate {
                            offset: start,
                            surrogate: Surrogate::Low,
                        });
                    }
                    Self::Cesu8 | Self::ModifiedUtf8 => {
                        let z = continuation(bytes, &mut pos)?;
                        units.push(
                            u16::from(x & 0x0F) << 12
                                | u16::from(y & 0x3F) << 6
                                | u16::from(z & 0x3F),
                        );
                    }
                }
            } else if x & 0b1111_1000 == 0b1111_0000 && self == Self::Utf8 {
                let y = continuation(bytes, &mut pos)?;
                let z = continuation(bytes, &mut pos)?;
                let w = continuation(bytes, &mut pos)?;
                // The high unit is built with addition, not OR: the code
                // point's distance above 0x10000 has to carry into the
                // surrogate base.
                units.push(
                    0xD7C0
                        + (u16::from(x & 0x07) << 8
                            | u16::from(y & 0x3F) << 2
                            | u16::from(z & 0x30) >> 4),
                );
                units.push(0xDC00 | u16::from(z & 0x0F) << 6 | u16::from(w & 0x3F));
            } else {
                let expected = match self {
                    Self::Utf8 => "0xxxxxxx, 110xxxxx, 1110xxxx or 11110xxx",
                    Self::Cesu8 | Self::ModifiedUtf8 => "0xxxxxxx, 110xxxxx or 1110xxxx",
                };
                return Err(Error::InvalidByte {
                    offset: start,
                    expected,
                    found: x,
                });
            }
        }
        Ok(units)
    }

    /// Encodes a string slice.
    pub fn encode_str(self, string: &str) -> Vec<u8> {
        let units: Vec<u16> = string.encode_utf16().collect();
        self.encode(&units).expect("well-formed UTF-16 from &str")
    }

    /// Decodes bytes and collects the code units into an owned string.
    ///
    /// A permissive decode can yield unpaired surrogates from non-canonical
    /// input. Those are representable as code units but not as `char`, so
    /// they fail here with [Error::UnpairedSurrogate].
    pub fn decode_to_string(self, bytes: &[u8]) -> Result<String, Error> {
        let units = self.decode(bytes)?;
        let mut string = String::with_capacity(units.len());
        let mut index = 0;
        for decoded in char::decode_utf16(units.iter().copied()) {
            match decoded {
                Ok(c) => {
                    string.push(c);
                    index += c.len_utf16();
                }
                Err(err) => {
                    let unit = err.unpaired_surrogate();
                    let surrogate = if (HIGH_SURROGATE_MIN..=HIGH_SURROGATE_MAX).contains(&unit) {
                        Surrogate::High
                    } else {
                        Surrogate::Low
                    };
                    return Err(Error::UnpairedSurrogate {
                        index,
                        unit,
                        surrogate,
                    });
                }
            }
        }
        Ok(string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [StringEncoding; 3] = [
        StringEncoding::Utf8,
        StringEncoding::Cesu8,
        StringEncoding::ModifiedUtf8,
    ];

    #[test]
    fn test_utf8_conformity() {
        let units = [
            0x0000, 0x0024, 0x00A2, 0x20AC, 0xD800, 0xDF48, 0xD801, 0xDC00,
        ];
        let bytes = [
            0x00, 0x24, 0xC2, 0xA2, 0xE2, 0x82, 0xAC, 0xF0, 0x90, 0x8D, 0x88, 0xF0, 0x90, 0x90,
            0x80,
        ];
        assert_eq!(StringEncoding::Utf8.encode(&units).unwrap(), bytes);
        assert_eq!(StringEncoding::Utf8.decode(&bytes).unwrap(), units);
    }

    #[test]
    fn test_utf8_supplementary_extremes() {
        // U+24B62 and U+10FFFF as surrogate pairs.
        let cases: &[(&[u16], &[u8])] = &[
            (&[0xD852, 0xDF62], &[0xF0, 0xA4, 0xAD, 0xA2]),
            (&[0xDBFF, 0xDFFF], &[0xF4, 0x8F, 0xBF, 0xBF]),
        ];
        for (units, bytes) in cases {
            assert_eq!(StringEncoding::Utf8.encode(units).unwrap(), *bytes);
            assert_eq!(StringEncoding::Utf8.decode(bytes).unwrap(), *units);
        }
    }

    #[test]
    fn test_cesu8_conformity() {
        let units = [0x0000, 0x0024, 0x00A2, 0x20AC, 0xD801, 0xDC00];
        let bytes = [
            0x00, 0x24, 0xC2, 0xA2, 0xE2, 0x82, 0xAC, 0xED, 0xA0, 0x81, 0xED, 0xB0, 0x80,
        ];
        assert_eq!(StringEncoding::Cesu8.encode(&units).unwrap(), bytes);
        assert_eq!(StringEncoding::Cesu8.decode(&bytes).unwrap(), units);
    }

    #[test]
    fn test_cesu8_supplementary() {
        // Supplementary characters span two 3-byte groups.
        let cases: &[(&[u16], &[u8])] = &[
            (&[0xD800, 0xDF48], &[0xED, 0xA0, 0x80, 0xED, 0xBD, 0x88]),
            (&[0xD852, 0xDF62], &[0xED, 0xA1, 0x92, 0xED, 0xBD, 0xA2]),
        ];
        for (units, bytes) in cases {
            assert_eq!(StringEncoding::Cesu8.encode(units).unwrap(), *bytes);
            assert_eq!(StringEncoding::Cesu8.decode(bytes).unwrap(), *units);
        }
    }

    #[test]
    fn test_modified_utf8_conformity() {
        let units = [0x0000, 0x0024, 0x00A2, 0x20AC, 0xD801, 0xDC00];
        let bytes = [
            0xC0, 0x80, 0x24, 0xC2, 0xA2, 0xE2, 0x82, 0xAC, 0xED, 0xA0, 0x81, 0xED, 0xB0, 0x80,
        ];
        assert_eq!(StringEncoding::ModifiedUtf8.encode(&units).unwrap(), bytes);
        assert_eq!(StringEncoding::ModifiedUtf8.decode(&bytes).unwrap(), units);
    }

    #[test]
    fn test_ed_lead_is_not_special_below_surrogates() {
        // U+D700's 3-byte group starts with 0xED but is an ordinary
        // character in all three encodings.
        let units = [0xD700];
        let bytes = [0xED, 0x9C, 0x80];
        for encoding in ALL {
            assert_eq!(encoding.encode(&units).unwrap(), bytes);
            assert_eq!(encoding.decode(&bytes).unwrap(), units);
        }
    }

    #[test]
    fn test_unpaired_surrogates_rejected_on_encode() {
        for encoding in ALL {
            assert!(matches!(
                encoding.encode(&[0xD800, 0x0000]),
                Err(Error::UnpairedSurrogate {
                    index: 0,
                    unit: 0xD800,
                    surrogate: Surrogate::High,
                })
            ));
            assert!(matches!(
                encoding.encode(&[0x0041, 0xD800]),
                Err(Error::UnpairedSurrogate {
                    index: 1,
                    unit: 0xD800,
                    surrogate: Surrogate::High,
                })
            ));
            assert!(matches!(
                encoding.encode(&[0xDC00]),
                Err(Error::UnpairedSurrogate {
                    index: 0,
                    unit: 0xDC00,
                    surrogate: Surrogate::Low,
                })
            ));
        }
    }

    #[test]
    fn test_utf8_decode_errors() {
        let utf8 = StringEncoding::Utf8;
        assert!(matches!(
            utf8.decode(&[0xC0, 0x00]),
            Err(Error::InvalidByte {
                offset: 1,
                expected: "10xxxxxx",
                found: 0x00,
            })
        ));
        assert!(matches!(
            utf8.decode(&[0xED, 0x00]),
            Err(Error::InvalidByte { offset: 1, .. })
        ));
        // Continuation shapes are checked for the whole group before the
        // payload is inspected for surrogates.
        assert!(matches!(
            utf8.decode(&[0xED, 0xA0, 0x00]),
            Err(Error::InvalidByte { offset: 2, .. })
        ));
        assert!(matches!(
            utf8.decode(&[0xED, 0xA0, 0x80]),
            Err(Error::EncodedSurrogate {
                offset: 0,
                surrogate: Surrogate::High,
            })
        ));
        assert!(matches!(
            utf8.decode(&[0xED, 0xB0, 0x80]),
            Err(Error::EncodedSurrogate {
                offset: 0,
                surrogate: Surrogate::Low,
            })
        ));
        assert!(matches!(
            utf8.decode(&[0xF0, 0x00]),
            Err(Error::InvalidByte { offset: 1, .. })
        ));
        assert!(matches!(
            utf8.decode(&[0xF0, 0x80, 0x00]),
            Err(Error::InvalidByte { offset: 2, .. })
        ));
        assert!(matches!(
            utf8.decode(&[0xF0, 0x80, 0x80, 0x00]),
            Err(Error::InvalidByte { offset: 3, .. })
        ));
        assert!(matches!(
            utf8.decode(&[0xF8]),
            Err(Error::InvalidByte {
                offset: 0,
                found: 0xF8,
                ..
            })
        ));
    }

    #[test]
    fn test_cesu8_decode_errors() {
        for encoding in [StringEncoding::Cesu8, StringEncoding::ModifiedUtf8] {
            assert!(matches!(
                encoding.decode(&[0xC0, 0x00]),
                Err(Error::InvalidByte {
                    offset: 1,
                    expected: "10xxxxxx",
                    found: 0x00,
                })
            ));
            assert!(matches!(
                encoding.decode(&[0xED, 0x00]),
                Err(Error::InvalidByte { offset: 1, .. })
            ));
            assert!(matches!(
                encoding.decode(&[0xED, 0xA0, 0x00]),
                Err(Error::InvalidByte { offset: 2, .. })
            ));
            assert!(matches!(
                encoding.decode(&[0xED, 0xA0, 0x80, 0x00]),
                Err(Error::InvalidByte {
                    offset: 3,
                    expected: "11101101",
                    found: 0x00,
                })
            ));
            assert!(matches!(
                encoding.decode(&[0xED, 0xA0, 0x80, 0xED, 0x00]),
                Err(Error::InvalidByte {
                    offset: 4,
                    expected: "1011xxxx",
                    found: 0x00,
                })
            ));
            assert!(matches!(
                encoding.decode(&[0xED, 0xA0, 0x80, 0xED, 0xB0, 0x00]),
                Err(Error::InvalidByte {
                    offset: 5,
                    expected: "10xxxxxx",
                    found: 0x00,
                })
            ));
            assert!(matches!(
                encoding.decode(&[0xED, 0xB0, 0x80]),
                Err(Error::EncodedSurrogate {
                    offset: 0,
                    surrogate: Surrogate::Low,
                })
            ));
            // 4-byte groups do not exist in the CESU-8 family.
            assert!(matches!(
                encoding.decode(&[0xF0, 0x90, 0x8D, 0x88]),
                Err(Error::InvalidByte {
                    offset: 0,
                    found: 0xF0,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_raw_null() {
        assert!(matches!(
            StringEncoding::ModifiedUtf8.decode(&[0x00]),
            Err(Error::RawNull { offset: 0 })
        ));
        assert!(matches!(
            StringEncoding::ModifiedUtf8.decode(&[0x61, 0x00, 0x62]),
            Err(Error::RawNull { offset: 1 })
        ));
        assert_eq!(StringEncoding::Utf8.decode(&[0x00]).unwrap(), [0x0000]);
        assert_eq!(StringEncoding::Cesu8.decode(&[0x00]).unwrap(), [0x0000]);
    }

    #[test]
    fn test_overlong_forms_accepted() {
        for encoding in ALL {
            assert_eq!(encoding.decode(&[0xC0, 0x80]).unwrap(), [0x0000]);
            assert_eq!(encoding.decode(&[0xE0, 0x81, 0x81]).unwrap(), [0x0041]);
        }
    }

    #[test]
    fn test_truncated_groups() {
        for encoding in ALL {
            assert!(matches!(encoding.decode(&[0xC2]), Err(Error::EndOfData)));
            assert!(matches!(
                encoding.decode(&[0xE2, 0x82]),
                Err(Error::EndOfData)
            ));
        }
        assert!(matches!(
            StringEncoding::Utf8.decode(&[0xF0, 0x90, 0x8D]),
            Err(Error::EndOfData)
        ));
        assert!(matches!(
            StringEncoding::Cesu8.decode(&[0xED, 0xA0, 0x80]),
            Err(Error::EndOfData)
        ));
        assert!(matches!(
            StringEncoding::Cesu8.decode(&[0xED, 0xA0, 0x80, 0xED]),
            Err(Error::EndOfData)
        ));
    }

    #[test]
    fn test_round_trips() {
        let sequences: &[&[u16]] = &[
            &[],
            &[0x0041, 0x0042, 0x0043],
            &[0x00E9, 0x0431, 0x4E2D],
            &[0xD800, 0xDC00, 0xDBFF, 0xDFFF],
            &[0x0024, 0xD852, 0xDF62, 0x20AC],
        ];
        for encoding in ALL {
            for units in sequences {
                let encoded = encoding.encode(units).unwrap();
                assert_eq!(encoding.decode(&encoded).unwrap(), *units);
            }
        }
    }

    #[test]
    fn test_string_helpers() {
        let sample = "$\u{A2}\u{20AC}\u{10348}";

        // For strings the UTF-8 variant agrees with the standard library.
        let encoded = StringEncoding::Utf8.encode_str(sample);
        assert_eq!(encoded, sample.as_bytes());
        assert_eq!(
            StringEncoding::Utf8.decode_to_string(&encoded).unwrap(),
            sample
        );

        for encoding in ALL {
            let encoded = encoding.encode_str(sample);
            assert_eq!(encoding.decode_to_string(&encoded).unwrap(), sample);
        }
    }

    #[test]
    fn test_decode_to_string_rejects_lone_units() {
        // A bare high surrogate group decodes to a unit with no pair.
        assert!(matches!(
            StringEncoding::Cesu8.decode_to_string(&[0xED, 0xA0, 0x81]),
            Err(Error::UnpairedSurrogate {
                index: 0,
                unit: 0xD801,
                surrogate: Surrogate::High,
            })
        ));
    }
}
