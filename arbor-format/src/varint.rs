//! Variable-length integer encoding (ULEB128 / ZigZag)

use smallvec::SmallVec;

use crate::error::{ArborError, Result};

/// Longest valid ULEB128 encoding of a u64.
pub const MAX_ULEB128_LEN: usize = 10;

/// Encode a u64 as ULEB128
pub fn encode_uleb128(val: u64) -> SmallVec<[u8; MAX_ULEB128_LEN]> {
    let mut out = SmallVec::new();
    let mut rest = val;

    while rest >= 0x80 {
        out.push((rest & 0x7F) as u8 | 0x80);
        rest >>= 7;
    }
    out.push(rest as u8);

    out
}

/// Decode ULEB128 from the front of `bytes`, returning the value and bytes consumed
pub fn decode_uleb128(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;

    for (i, &byte) in bytes.iter().enumerate() {
        if i >= MAX_ULEB128_LEN {
            return Err(ArborError::LimitExceeded("ULEB128 too long".to_string()));
        }

        value |= ((byte & 0x7F) as u64) << (7 * i);

        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(ArborError::UnexpectedEof)
}

/// ZigZag encode a signed integer
pub fn zigzag_encode(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

/// ZigZag decode to signed integer
pub fn zigzag_decode(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}
