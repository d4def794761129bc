//! Byte order selection for fixed-width values

/// The order in which the bytes of a fixed-width value appear on the wire.
///
/// Selected once when constructing a [crate::Reader] or [crate::Writer] and
/// applied to every fixed-width operation on it. Variable-length integers and
/// strings are byte sequences and are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most-significant byte first.
    BigEndian,
    /// Least-significant byte first.
    LittleEndian,
}
