//! Borsh-compatible cursor engine.
//!
//! One generic [`Decoder`]/[`Encoder`] pair implements the wire rules once;
//! record schemas are expressed as ordered sequences of field reads and
//! writes on top of it. Wire rules:
//!
//! - fixed-width integers are little-endian, no padding;
//! - `bool` is one byte, strictly 0 or 1;
//! - `String` is a u32 byte-length prefix followed by UTF-8 bytes;
//! - `Vec<T>` is a u32 element-count prefix followed by the elements;
//! - fixed arrays are exactly N elements with no prefix;
//! - `Option<T>` is a 1-byte flag (strictly 0 or 1) followed by the value
//!   when present;
//! - unit enums are a 1-byte variant index in declaration order.
//!
//! Every read carries the field name being decoded so failures surface as
//! [`DecodeError`]s with a name and byte offset. Trailing bytes after a
//! complete record are permitted; on-chain accounts may be padded.

use solana_sdk::pubkey::Pubkey;

use crate::error::{DecodeError, DecodeErrorKind};

/// Cursor over an immutable byte buffer.
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Start decoding at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left in the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn fail(&self, field: &'static str, offset: usize, kind: DecodeErrorKind) -> DecodeError {
        DecodeError { field, offset, kind }
    }

    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(self.fail(
                field,
                self.pos,
                DecodeErrorKind::BufferExhausted { needed: n - self.remaining() },
            ));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a `u8`.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take(1, field)?[0])
    }

    /// Read a little-endian `u32`.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        let bytes = self.take(4, field)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian `u64`.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read_u64(&mut self, field: &'static str) -> Result<u64, DecodeError> {
        let bytes: [u8; 8] = self.read_fixed(field)?;
        Ok(u64::from_le_bytes(bytes))
    }

    /// Read a little-endian `u128`.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read_u128(&mut self, field: &'static str) -> Result<u128, DecodeError> {
        let bytes: [u8; 16] = self.read_fixed(field)?;
        Ok(u128::from_le_bytes(bytes))
    }

    /// Read a little-endian `i32`.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read_i32(&mut self, field: &'static str) -> Result<i32, DecodeError> {
        let bytes: [u8; 4] = self.read_fixed(field)?;
        Ok(i32::from_le_bytes(bytes))
    }

    /// Read a little-endian `i64`.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read_i64(&mut self, field: &'static str) -> Result<i64, DecodeError> {
        let bytes: [u8; 8] = self.read_fixed(field)?;
        Ok(i64::from_le_bytes(bytes))
    }

    /// Read a little-endian `f32`.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read_f32(&mut self, field: &'static str) -> Result<f32, DecodeError> {
        let bytes: [u8; 4] = self.read_fixed(field)?;
        Ok(f32::from_le_bytes(bytes))
    }

    /// Read a strict boolean byte.
    ///
    /// # Errors
    /// Fails with `InvalidBool` on any byte other than 0 or 1.
    pub fn read_bool(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        let offset = self.pos;
        match self.read_u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(self.fail(field, offset, DecodeErrorKind::InvalidBool { value })),
        }
    }

    /// Read a 32-byte public key.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read_pubkey(&mut self, field: &'static str) -> Result<Pubkey, DecodeError> {
        let bytes: [u8; 32] = self.read_fixed(field)?;
        Ok(Pubkey::new_from_array(bytes))
    }

    /// Read a fixed-size byte array.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read_fixed<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let slice = self.take(N, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read a u32-length-prefixed UTF-8 string.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` or `InvalidUtf8`.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let len = self.read_u32(field)? as usize;
        let offset = self.pos;
        let bytes = self.take(len, field)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| self.fail(field, offset, DecodeErrorKind::InvalidUtf8))
    }

    /// Read an `Option<T>` with a strict 1-byte presence flag.
    ///
    /// # Errors
    /// Fails with `InvalidOptionFlag` on any flag byte other than 0 or 1, or
    /// with whatever `read` fails with.
    pub fn read_option<T>(
        &mut self,
        field: &'static str,
        read: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        let offset = self.pos;
        match self.read_u8(field)? {
            0 => Ok(None),
            1 => Ok(Some(read(self)?)),
            value => Err(self.fail(field, offset, DecodeErrorKind::InvalidOptionFlag { value })),
        }
    }

    /// Read a u32-count-prefixed sequence of elements.
    ///
    /// # Errors
    /// Propagates the first element failure, or `BufferExhausted` on a short
    /// prefix.
    pub fn read_vec<T>(
        &mut self,
        field: &'static str,
        mut read: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let count = self.read_u32(field)? as usize;
        // Guard against a hostile count prefix: each element is at least 1 byte.
        if count > self.remaining() {
            return Err(self.fail(
                field,
                self.pos,
                DecodeErrorKind::BufferExhausted { needed: count - self.remaining() },
            ));
        }
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(read(self)?);
        }
        Ok(out)
    }

    /// Read exactly `N` elements with no prefix.
    ///
    /// # Errors
    /// Propagates the first element failure.
    pub fn read_array<T: Copy + Default, const N: usize>(
        &mut self,
        _field: &'static str,
        mut read: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<[T; N], DecodeError> {
        let mut out = [T::default(); N];
        for slot in &mut out {
            *slot = read(self)?;
        }
        Ok(out)
    }

    /// Consume a leading 8-byte discriminator, failing unless it equals
    /// `expected`.
    ///
    /// # Errors
    /// Fails with `DiscriminatorMismatch` naming `record` if the tag differs,
    /// or `BufferExhausted` on a short buffer.
    pub fn expect_discriminator(
        &mut self,
        expected: [u8; 8],
        record: &'static str,
    ) -> Result<(), DecodeError> {
        let offset = self.pos;
        let actual: [u8; 8] = self.read_fixed("discriminator")?;
        if actual != expected {
            return Err(self.fail(
                "discriminator",
                offset,
                DecodeErrorKind::DiscriminatorMismatch { record },
            ));
        }
        Ok(())
    }
}

/// Growing byte buffer with typed append operations.
///
/// Encoding a well-typed value never fails, so writers return `()`.
#[derive(Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Start with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an 8-byte discriminator already written.
    pub fn with_discriminator(tag: [u8; 8]) -> Self {
        Self { buf: tag.to_vec() }
    }

    /// Finish encoding and take the buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Append a `u8`.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a little-endian `u64`.
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a little-endian `u128`.
    pub fn write_u128(&mut self, value: u128) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a little-endian `i32`.
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a little-endian `i64`.
    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a little-endian `f32`.
    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a boolean as one byte.
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Append a 32-byte public key.
    pub fn write_pubkey(&mut self, value: &Pubkey) {
        self.buf.extend_from_slice(value.as_ref());
    }

    /// Append raw bytes with no prefix.
    pub fn write_fixed(&mut self, value: &[u8]) {
        self.buf.extend_from_slice(value);
    }

    /// Append a u32-length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) {
        self.write_u32(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Append an option flag byte, then the value when present.
    pub fn write_option<T>(&mut self, value: &Option<T>, write: impl FnOnce(&mut Self, &T)) {
        match value {
            None => self.write_u8(0),
            Some(inner) => {
                self.write_u8(1);
                write(self, inner);
            }
        }
    }

    /// Append a u32-count-prefixed sequence of elements.
    pub fn write_vec<T>(&mut self, values: &[T], mut write: impl FnMut(&mut Self, &T)) {
        self.write_u32(values.len() as u32);
        for value in values {
            write(self, value);
        }
    }

    /// Append exactly the given elements with no prefix.
    pub fn write_array<T>(&mut self, values: &[T], mut write: impl FnMut(&mut Self, &T)) {
        for value in values {
            write(self, value);
        }
    }
}
