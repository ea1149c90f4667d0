//! Constants and magic numbers for the Arbor format

/// File magic bytes: "ARB" + version 0x01
pub const FILE_MAGIC: [u8; 4] = [0x41, 0x52, 0x42, 0x01]; // "ARB\x01"

/// Size of the fixed header portion (magic + flags).
pub const FIXED_HEADER_LEN: usize = 8;

/// Size of the trailing body checksum.
pub const CHECKSUM_LEN: usize = 4;

/// Mask of header flag bits understood by this version. All are reserved.
pub const FLAG_KNOWN_MASK: u32 = 0;

/// Node tag for a group record.
pub const NODE_GROUP: u8 = 0x01;
/// Node tag for a dataset record.
pub const NODE_DATASET: u8 = 0x02;

/// Dtype code for booleans (one byte per element).
pub const DTYPE_BOOL: u8 = 1;
/// Dtype code for signed 64-bit integers (ZigZag + ULEB128).
pub const DTYPE_INT64: u8 = 2;
/// Dtype code for 64-bit floats (little-endian IEEE 754).
pub const DTYPE_FLOAT64: u8 = 3;
/// Dtype code for length-prefixed byte strings.
pub const DTYPE_BYTES: u8 = 4;

/// Rank byte for scalar datasets.
pub const RANK_SCALAR: u8 = 0;
/// Rank byte for one-dimensional datasets.
pub const RANK_VECTOR: u8 = 1;
