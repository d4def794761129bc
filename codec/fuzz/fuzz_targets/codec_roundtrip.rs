#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use paste::paste;
use wirebyte_codec::{ByteOrder, Reader, SliceSource, StringEncoding, Writer, leb128};

const ORDERS: [ByteOrder; 2] = [ByteOrder::BigEndian, ByteOrder::LittleEndian];
const ENCODINGS: [StringEncoding; 3] = [
    StringEncoding::Utf8,
    StringEncoding::Cesu8,
    StringEncoding::ModifiedUtf8,
];

macro_rules! impl_roundtrip_fixed {
    ($type:ty) => {
        paste! {
            fn [<roundtrip_ $type>](value: $type) {
                for order in ORDERS {
                    let mut writer = Writer::new(Vec::new(), order);
                    writer.[<write_ $type>](value).expect("Failed to write to a growable sink!");
                    let bytes = writer.into_inner();

                    let mut reader = Reader::new(SliceSource::new(&bytes), order);
                    let decoded = reader
                        .[<read_ $type>]()
                        .expect("Failed to decode a successfully encoded input!");
                    assert_eq!(value, decoded);
                    assert_eq!(reader.get_ref().remaining(), 0);
                }
            }
        }
    };
}

impl_roundtrip_fixed!(u8);
impl_roundtrip_fixed!(u16);
impl_roundtrip_fixed!(u32);
impl_roundtrip_fixed!(u64);
impl_roundtrip_fixed!(i8);
impl_roundtrip_fixed!(i16);
impl_roundtrip_fixed!(i32);
impl_roundtrip_fixed!(i64);

// NOTE: Separate float cases to compare bit patterns, so NaN payloads are
// covered too
fn roundtrip_f32(value: f32) {
    for order in ORDERS {
        let mut writer = Writer::new(Vec::new(), order);
        writer.write_f32(value).expect("Failed to write to a growable sink!");
        let bytes = writer.into_inner();

        let mut reader = Reader::new(SliceSource::new(&bytes), order);
        let decoded = reader
            .read_f32()
            .expect("Failed to decode a successfully encoded input!");
        assert_eq!(value.to_bits(), decoded.to_bits());
    }
}

fn roundtrip_f64(value: f64) {
    for order in ORDERS {
        let mut writer = Writer::new(Vec::new(), order);
        writer.write_f64(value).expect("Failed to write to a growable sink!");
        let bytes = writer.into_inner();

        let mut reader = Reader::new(SliceSource::new(&bytes), order);
        let decoded = reader
            .read_f64()
            .expect("Failed to decode a successfully encoded input!");
        assert_eq!(value.to_bits(), decoded.to_bits());
    }
}

fn roundtrip_uleb128(value: u64) {
    let mut encoded = Vec::new();
    leb128::write(&mut encoded, value).expect("Failed to write to a growable sink!");
    let mut source = SliceSource::new(&encoded);
    let decoded = leb128::read(&mut source).expect("Failed to decode a successfully encoded input!");
    assert_eq!(value, decoded);
    assert_eq!(source.remaining(), 0);
}

fn roundtrip_uleb128_p1(value: i64) {
    let mut encoded = Vec::new();
    leb128::write_plus_one(&mut encoded, value).expect("Failed to write to a growable sink!");
    let mut source = SliceSource::new(&encoded);
    let decoded =
        leb128::read_plus_one(&mut source).expect("Failed to decode a successfully encoded input!");
    assert_eq!(value, decoded);
}

fn roundtrip_sleb128(value: i32) {
    let mut encoded = Vec::new();
    leb128::write_signed(&mut encoded, value).expect("Failed to write to a growable sink!");
    let mut source = SliceSource::new(&encoded);
    let decoded =
        leb128::read_signed(&mut source).expect("Failed to decode a successfully encoded input!");
    assert_eq!(value, decoded);
    assert_eq!(source.remaining(), 0);
}

fn roundtrip_units(units: Vec<u16>) {
    for encoding in ENCODINGS {
        // Unpaired surrogates are unencodable; everything encodable must
        // round-trip exactly.
        if let Ok(encoded) = encoding.encode(&units) {
            let decoded = encoding
                .decode(&encoded)
                .expect("Failed to decode a successfully encoded input!");
            assert_eq!(units, decoded);
        }
    }
}

fn roundtrip_str(string: &str) {
    for encoding in ENCODINGS {
        let encoded = encoding.encode_str(string);
        let decoded = encoding
            .decode_to_string(&encoded)
            .expect("Failed to decode a successfully encoded input!");
        assert_eq!(string, decoded);
    }
}

fn decode_leb128_raw(data: &[u8]) {
    // Arbitrary input must produce a value or a typed error, never a panic.
    let mut source = SliceSource::new(data);
    let _ = leb128::read(&mut source);
    let mut source = SliceSource::new(data);
    let _ = leb128::read_plus_one(&mut source);
    let mut source = SliceSource::new(data);
    let _ = leb128::read_signed(&mut source);
}

fn decode_text_raw(data: &[u8]) {
    for encoding in ENCODINGS {
        let _ = encoding.decode(data);
        let _ = encoding.decode_to_string(data);
    }
}

fn read_mixed(data: &[u8]) {
    let mut reader = Reader::big_endian(Bytes::copy_from_slice(data));
    let _ = reader.read_u64();
    let _ = reader.read_uleb128();
    let _ = reader.read_sleb128();
    let _ = reader.read_string(16, StringEncoding::ModifiedUtf8);
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    // Raw decoder inputs
    LebBytes(&'a [u8]),
    TextBytes(&'a [u8]),
    MixedBytes(&'a [u8]),

    // Varints
    Uleb128(u64),
    Uleb128P1(i64),
    Sleb128(i32),

    // Strings
    Units(Vec<u16>),
    Str(&'a str),

    // Fixed-width primitives
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

fn fuzz(input: FuzzInput) {
    match input {
        // Raw decoder inputs
        FuzzInput::LebBytes(data) => decode_leb128_raw(data),
        FuzzInput::TextBytes(data) => decode_text_raw(data),
        FuzzInput::MixedBytes(data) => read_mixed(data),
        // Varints
        FuzzInput::Uleb128(v) => roundtrip_uleb128(v),
        FuzzInput::Uleb128P1(v) => roundtrip_uleb128_p1(v),
        FuzzInput::Sleb128(v) => roundtrip_sleb128(v),
        // Strings
        FuzzInput::Units(units) => roundtrip_units(units),
        FuzzInput::Str(s) => roundtrip_str(s),
        // Fixed-width primitives
        FuzzInput::U8(v) => roundtrip_u8(v),
        FuzzInput::U16(v) => roundtrip_u16(v),
        FuzzInput::U32(v) => roundtrip_u32(v),
        FuzzInput::U64(v) => roundtrip_u64(v),
        FuzzInput::I8(v) => roundtrip_i8(v),
        FuzzInput::I16(v) => roundtrip_i16(v),
        FuzzInput::I32(v) => roundtrip_i32(v),
        FuzzInput::I64(v) => roundtrip_i64(v),
        FuzzInput::F32(v) => roundtrip_f32(v),
        FuzzInput::F64(v) => roundtrip_f64(v),
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
