//! Binary encoding of a whole group/dataset hierarchy
//!
//! Layout: file header, ULEB128 body length, body, CRC32C of the body (u32 LE).
//! The body is the root group record. Each record starts with a node tag:
//!
//! - group: entry count, then `(name length, name bytes, record)` per entry
//! - dataset: dtype byte, rank byte, element count when rank is 1, payload

use std::convert::TryFrom;

use crate::checksum::{compute_crc32c, verify_crc32c};
use crate::constants::{CHECKSUM_LEN, NODE_DATASET, NODE_GROUP, RANK_SCALAR, RANK_VECTOR};
use crate::dataset::{Data, Dataset};
use crate::error::{ArborError, Result};
use crate::group::{Group, Node};
use crate::header::FileHeader;
use crate::limits::Limits;
use crate::types::{DType, Shape};
use crate::varint::{decode_uleb128, encode_uleb128, zigzag_decode, zigzag_encode};

/// Encode `root` and everything below it into a complete container file image.
pub fn encode_hierarchy(root: &Group, limits: &Limits) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    encode_group(root, 0, limits, &mut body)?;

    let mut out = FileHeader::default().encode();
    out.extend_from_slice(&encode_uleb128(body.len() as u64));
    out.extend_from_slice(&body);
    out.extend_from_slice(&compute_crc32c(&body).to_le_bytes());
    Ok(out)
}

/// Decode a container file image produced by [`encode_hierarchy`].
pub fn decode_hierarchy(bytes: &[u8], limits: &Limits) -> Result<Group> {
    let (_header, mut pos) = FileHeader::decode(bytes)?;

    let (body_len, len_bytes) = decode_uleb128(&bytes[pos..])?;
    pos += len_bytes;
    let body_len = usize::try_from(body_len)
        .map_err(|_| ArborError::LimitExceeded("body length exceeds address space".to_string()))?;

    let body_end = pos.checked_add(body_len).ok_or(ArborError::CorruptHeader)?;
    let crc_end = body_end
        .checked_add(CHECKSUM_LEN)
        .ok_or(ArborError::CorruptHeader)?;
    if crc_end > bytes.len() {
        return Err(ArborError::UnexpectedEof);
    }
    if crc_end != bytes.len() {
        return Err(ArborError::CorruptNode(format!(
            "{} trailing bytes after checksum",
            bytes.len() - crc_end
        )));
    }

    let body = &bytes[pos..body_end];
    let crc = u32::from_le_bytes([
        bytes[body_end],
        bytes[body_end + 1],
        bytes[body_end + 2],
        bytes[body_end + 3],
    ]);
    verify_crc32c(body, crc)?;

    let mut reader = ByteReader::new(body);
    match reader.read_u8()? {
        NODE_GROUP => {}
        tag => {
            return Err(ArborError::CorruptNode(format!(
                "root record has tag {:#04x}, expected a group",
                tag
            )))
        }
    }
    let root = decode_group(&mut reader, 0, limits)?;
    if !reader.is_exhausted() {
        return Err(ArborError::CorruptNode(
            "unread bytes after root group".to_string(),
        ));
    }
    Ok(root)
}

fn encode_group(group: &Group, depth: usize, limits: &Limits, out: &mut Vec<u8>) -> Result<()> {
    limits.check_depth(depth)?;
    limits.check_entries(group.len())?;

    out.push(NODE_GROUP);
    out.extend_from_slice(&encode_uleb128(group.len() as u64));
    for (name, node) in group.iter() {
        limits.check_name(name)?;
        out.extend_from_slice(&encode_uleb128(name.len() as u64));
        out.extend_from_slice(name.as_bytes());
        match node {
            Node::Group(child) => encode_group(child, depth + 1, limits, out)?,
            Node::Dataset(dataset) => encode_dataset(dataset, limits, out)?,
        }
    }
    Ok(())
}

// Mirrors the checks in `decode_dataset` so nothing is written that cannot be read.
fn encode_dataset(dataset: &Dataset, limits: &Limits, out: &mut Vec<u8>) -> Result<()> {
    limits.check_dataset(dataset)?;

    out.push(NODE_DATASET);
    out.push(dataset.dtype() as u8);
    out.push(dataset.shape().rank());
    if let Shape::Vector(len) = dataset.shape() {
        out.extend_from_slice(&encode_uleb128(len as u64));
    }

    match dataset.data() {
        Data::Bool(values) => out.extend(values.iter().map(|&b| b as u8)),
        Data::Int(values) => {
            for &v in values {
                out.extend_from_slice(&encode_uleb128(zigzag_encode(v)));
            }
        }
        Data::Float(values) => {
            for v in values {
                out.extend_from_slice(&v.to_le_bytes());
            }
        }
        Data::Bytes(values) => {
            for v in values {
                out.extend_from_slice(&encode_uleb128(v.len() as u64));
                out.extend_from_slice(v);
            }
        }
    }
    Ok(())
}

fn decode_group(reader: &mut ByteReader<'_>, depth: usize, limits: &Limits) -> Result<Group> {
    limits.check_depth(depth)?;

    let entry_count = reader.read_len("entry count", limits.max_entries_per_group)?;
    let mut group = Group::new();
    for _ in 0..entry_count {
        let name_len = reader.read_len("name length", limits.max_name_len)?;
        let name = String::from_utf8(reader.read_slice(name_len)?.to_vec())?;

        let node = match reader.read_u8()? {
            NODE_GROUP => Node::Group(decode_group(reader, depth + 1, limits)?),
            NODE_DATASET => Node::Dataset(decode_dataset(reader, limits)?),
            tag => {
                return Err(ArborError::CorruptNode(format!(
                    "unknown node tag {:#04x} for entry {:?}",
                    tag, name
                )))
            }
        };
        group.insert_decoded(name, node)?;
    }
    Ok(group)
}

fn decode_dataset(reader: &mut ByteReader<'_>, limits: &Limits) -> Result<Dataset> {
    let dtype = DType::from_u8(reader.read_u8()?)?;
    let shape = match reader.read_u8()? {
        RANK_SCALAR => Shape::Scalar,
        RANK_VECTOR => Shape::Vector(
            reader.read_len("element count", limits.max_elements_per_dataset)?,
        ),
        rank => {
            return Err(ArborError::UnsupportedFeature(format!(
                "dataset rank {}",
                rank
            )))
        }
    };

    let count = shape.element_count();
    // Every element takes at least one byte, so this bounds the allocation.
    let capacity = count.min(reader.remaining());
    let data = match dtype {
        DType::Bool => {
            let mut values = Vec::with_capacity(capacity);
            for _ in 0..count {
                values.push(match reader.read_u8()? {
                    0 => false,
                    1 => true,
                    other => {
                        return Err(ArborError::CorruptNode(format!(
                            "boolean byte {:#04x}",
                            other
                        )))
                    }
                });
            }
            Data::Bool(values)
        }
        DType::Int64 => {
            let mut values = Vec::with_capacity(capacity);
            for _ in 0..count {
                values.push(zigzag_decode(reader.read_uleb128()?));
            }
            Data::Int(values)
        }
        DType::Float64 => {
            let mut values = Vec::with_capacity(capacity / 8);
            for _ in 0..count {
                let raw = reader.read_slice(8)?;
                let mut buf = [0u8; 8];
                buf.copy_from_slice(raw);
                values.push(f64::from_le_bytes(buf));
            }
            Data::Float(values)
        }
        DType::Bytes => {
            let mut values = Vec::with_capacity(capacity);
            for _ in 0..count {
                let len = reader.read_len("string length", limits.max_string_len)?;
                values.push(reader.read_slice(len)?.to_vec());
            }
            Data::Bytes(values)
        }
    };

    match shape {
        Shape::Scalar => Dataset::scalar(data),
        Shape::Vector(_) => Ok(Dataset::vector(data)),
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn is_exhausted(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = *self.bytes.get(self.pos).ok_or(ArborError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_uleb128(&mut self) -> Result<u64> {
        let (value, consumed) = decode_uleb128(&self.bytes[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    fn read_len(&mut self, what: &str, max: usize) -> Result<usize> {
        let value = self.read_uleb128()?;
        let len = usize::try_from(value).map_err(|_| {
            ArborError::LimitExceeded(format!("{} exceeds supported size", what))
        })?;
        if len > max {
            return Err(ArborError::LimitExceeded(format!(
                "{} {} exceeds limit {}",
                what, len, max
            )));
        }
        Ok(len)
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(ArborError::UnexpectedEof)?;
        if end > self.bytes.len() {
            return Err(ArborError::UnexpectedEof);
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}
