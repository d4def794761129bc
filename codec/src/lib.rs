//! Encode and decode byte-oriented wire formats.
//!
//! # Overview
//!
//! Formats that mix fixed-width fields, variable-length integers, and
//! length-prefixed strings are all built from the same small set of
//! primitives. This crate provides those primitives over a pair of one-byte
//! channel traits ([ByteSource] and [ByteSink]), so the same codec code runs
//! against in-memory slices, growable buffers, and blocking `std::io`
//! streams:
//!
//! - Fixed-width integers and floats in either byte order ([Reader]/[Writer])
//! - LEB128 varints in three flavors ([leb128])
//! - Strings in UTF-8, CESU-8, or Modified UTF-8 ([StringEncoding])
//!
//! Decoding never panics on malformed input. Each operation either returns a
//! value or a typed [Error], and a failed operation leaves the channel
//! advanced by exactly the bytes it consumed before failing.
//!
//! # Example
//!
//! ```
//! use wirebyte_codec::{Reader, SliceSource, StringEncoding, Writer};
//!
//! // Encode a frame: a fixed-width magic, a varint, and a string.
//! let mut writer = Writer::big_endian(Vec::new());
//! writer.write_u32(0xC0DEC0DE)?;
//! writer.write_uleb128(624485)?;
//! writer.write_str("hi", StringEncoding::ModifiedUtf8)?;
//! let bytes = writer.into_inner();
//!
//! // Decode it back.
//! let mut reader = Reader::big_endian(SliceSource::new(&bytes));
//! assert_eq!(reader.read_u32()?, 0xC0DEC0DE);
//! assert_eq!(reader.read_uleb128()?, 624485);
//! assert_eq!(reader.read_str(2, StringEncoding::ModifiedUtf8)?, "hi");
//! # Ok::<(), wirebyte_codec::Error>(())
//! ```

pub mod channel;
pub mod error;
pub mod leb128;
pub mod order;
pub mod reader;
pub mod text;
pub mod writer;

// Re-export main types and traits
pub use channel::{ByteSink, ByteSource, SliceSink, SliceSource, StreamSink, StreamSource};
pub use error::{Error, Surrogate};
pub use order::ByteOrder;
pub use reader::Reader;
pub use text::StringEncoding;
pub use writer::Writer;
