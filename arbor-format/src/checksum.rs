//! CRC32C checksum utilities

/// Compute CRC32C for data
pub fn compute_crc32c(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

/// Verify CRC32C for data
pub fn verify_crc32c(data: &[u8], expected: u32) -> Result<(), crate::error::ArborError> {
    let actual = compute_crc32c(data);
    if actual == expected {
        Ok(())
    } else {
        Err(crate::error::ArborError::ChecksumMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_detects_flipped_bit() {
        let data = b"group/dataset".to_vec();
        let crc = compute_crc32c(&data);
        assert!(verify_crc32c(&data, crc).is_ok());

        let mut tampered = data.clone();
        tampered[0] ^= 0x01;
        assert!(matches!(
            verify_crc32c(&tampered, crc),
            Err(crate::error::ArborError::ChecksumMismatch)
        ));
    }
}
