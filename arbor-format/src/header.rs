//! File header structures

use crate::constants::{FILE_MAGIC, FIXED_HEADER_LEN, FLAG_KNOWN_MASK};
use crate::error::{ArborError, Result};

/// File header: magic, version and flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    /// File flags (no bits are defined in version 1)
    pub flags: u32,
}

impl FileHeader {
    /// Encode header to bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(FIXED_HEADER_LEN);
        result.extend_from_slice(&FILE_MAGIC);
        result.extend_from_slice(&self.flags.to_le_bytes());
        result
    }

    /// Decode header from bytes, returning it with the number of bytes consumed
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.len() < 4 {
            return Err(ArborError::UnexpectedEof);
        }

        if bytes[..3] != FILE_MAGIC[..3] {
            return Err(ArborError::InvalidMagic);
        }
        let version = bytes[3];
        if version != FILE_MAGIC[3] {
            return Err(ArborError::UnsupportedVersion(version));
        }

        if bytes.len() < FIXED_HEADER_LEN {
            return Err(ArborError::UnexpectedEof);
        }

        let flags = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if flags & !FLAG_KNOWN_MASK != 0 {
            return Err(ArborError::CorruptHeader);
        }

        Ok((Self { flags }, FIXED_HEADER_LEN))
    }
}
