//! # Field Reader / Writer
//!
//! Bounds are checked once, against the layout length, when the reader is
//! created. Individual reads then slice the borrowed buffer directly.

use super::errors::{DecodeError, EncodeError};
use super::layouts::{Field, MessageLayout};

/// Borrowing reader over a message whose length has been validated.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    bytes: &'a [u8],
}

impl<'a> FieldReader<'a> {
    /// Validate `bytes` against the layout's fixed length.
    ///
    /// Longer buffers are accepted; trailing bytes are ignored.
    pub fn new(bytes: &'a [u8], layout: &MessageLayout) -> Result<Self, DecodeError> {
        if bytes.len() < layout.len {
            return Err(DecodeError::TruncatedMessage {
                expected: layout.len,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    fn slice(&self, field: Field) -> &'a [u8] {
        &self.bytes[field.offset..field.end()]
    }

    /// Big-endian unsigned integer of any width up to 8 bytes.
    pub fn uint(&self, field: Field) -> u64 {
        self.slice(field)
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
    }

    pub fn u8(&self, field: Field) -> u8 {
        self.bytes[field.offset]
    }

    pub fn u16(&self, field: Field) -> u16 {
        self.uint(field) as u16
    }

    pub fn u32(&self, field: Field) -> u32 {
        self.uint(field) as u32
    }

    pub fn u64(&self, field: Field) -> u64 {
        self.uint(field)
    }

    /// Space-padded ASCII text, right-trimmed.
    pub fn alpha(&self, field: Field) -> Result<String, DecodeError> {
        let raw = self.slice(field);
        if !raw.iter().all(|b| (0x20..0x7f).contains(b)) {
            return Err(DecodeError::InvalidText {
                field: field.name,
                offset: field.offset,
            });
        }
        let trimmed = raw
            .iter()
            .rposition(|b| *b != b' ')
            .map_or(&raw[..0], |last| &raw[..=last]);
        Ok(trimmed.iter().map(|b| char::from(*b)).collect())
    }
}

/// Fixed-size output buffer for the re-encoder.
#[derive(Debug)]
pub struct FieldWriter {
    buf: Vec<u8>,
}

impl FieldWriter {
    /// Zero-filled buffer of the layout's length, tag already written.
    pub fn new(layout: &MessageLayout) -> Self {
        let mut buf = vec![0u8; layout.len];
        buf[0] = layout.tag;
        Self { buf }
    }

    pub fn put_uint(&mut self, field: Field, value: u64) {
        let be = value.to_be_bytes();
        self.buf[field.offset..field.end()].copy_from_slice(&be[8 - field.len..]);
    }

    pub fn put_u8(&mut self, field: Field, value: u8) {
        self.buf[field.offset] = value;
    }

    /// Left-aligned text, padded with spaces to the field width.
    pub fn put_alpha(&mut self, field: Field, text: &str) -> Result<(), EncodeError> {
        if !text.is_ascii() {
            return Err(EncodeError::NonAsciiText { field: field.name });
        }
        if text.len() > field.len {
            return Err(EncodeError::FieldTooLong {
                field: field.name,
                max: field.len,
                actual: text.len(),
            });
        }
        let target = &mut self.buf[field.offset..field.end()];
        target.fill(b' ');
        target[..text.len()].copy_from_slice(text.as_bytes());
        Ok(())
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
