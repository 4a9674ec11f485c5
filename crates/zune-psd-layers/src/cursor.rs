/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Big endian reads on top of a seekable byte source
//!
//! Photoshop stores everything big endian and describes nested blocks
//! with absolute lengths, so the cursor exposes its position
//! for callers to compute block ends and jump there.
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use zune_core::bytestream::{ZByteIoError, ZByteReaderTrait, ZReader};

/// Big endian primitive reader used by the decoder
pub struct ByteCursor<T: ZByteReaderTrait> {
    stream: ZReader<T>
}

impl<T: ZByteReaderTrait> ByteCursor<T> {
    pub fn new(source: T) -> ByteCursor<T> {
        ByteCursor {
            stream: ZReader::new(source)
        }
    }

    /// Absolute position from the start of the source
    #[inline]
    pub fn position(&mut self) -> Result<u64, ZByteIoError> {
        self.stream.position()
    }

    /// Move to an absolute position
    #[inline]
    pub fn set_position(&mut self, position: u64) -> Result<(), ZByteIoError> {
        self.stream.set_position(usize::try_from(position)?)
    }

    /// Move to an absolute position, failing if the source
    /// ends before it
    pub fn set_position_within(&mut self, position: u64) -> Result<(), ZByteIoError> {
        match position.checked_sub(1) {
            Some(last) => {
                // the byte before `position` must exist
                self.set_position(last)?;
                self.read_u8()?;
                Ok(())
            }
            None => self.set_position(0)
        }
    }

    /// Move `num` bytes forward
    #[inline]
    pub fn skip(&mut self, num: u64) -> Result<(), ZByteIoError> {
        if num != 0 {
            self.stream.skip(usize::try_from(num)?)?;
        }
        Ok(())
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, ZByteIoError> {
        self.stream.read_u8_err()
    }

    /// Any non zero byte is true
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, ZByteIoError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_bytes(&mut self, num: usize) -> Result<Vec<u8>, ZByteIoError> {
        let mut bytes = vec![0; num];
        self.stream.read_exact_bytes(&mut bytes)?;
        Ok(bytes)
    }

    #[inline]
    pub fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], ZByteIoError> {
        self.stream.read_fixed_bytes_or_error::<N>()
    }

    #[inline]
    pub fn read_u16_be(&mut self) -> Result<u16, ZByteIoError> {
        self.stream.get_u16_be_err()
    }

    #[inline]
    pub fn read_i16_be(&mut self) -> Result<i16, ZByteIoError> {
        Ok(self.stream.get_u16_be_err()? as i16)
    }

    #[inline]
    pub fn read_u32_be(&mut self) -> Result<u32, ZByteIoError> {
        self.stream.get_u32_be_err()
    }

    #[inline]
    pub fn read_i32_be(&mut self) -> Result<i32, ZByteIoError> {
        Ok(self.stream.get_u32_be_err()? as i32)
    }

    #[inline]
    pub fn read_u64_be(&mut self) -> Result<u64, ZByteIoError> {
        self.stream.get_u64_be_err()
    }

    #[inline]
    pub fn read_i64_be(&mut self) -> Result<i64, ZByteIoError> {
        Ok(self.stream.get_u64_be_err()? as i64)
    }

    /// Read `num` bytes as text, invalid sequences are replaced
    pub fn read_ascii(&mut self, num: usize) -> Result<String, ZByteIoError> {
        let bytes = self.read_bytes(num)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a length prefixed string
    ///
    /// One length byte followed by that many bytes of UTF-8.
    /// If `padding` is non zero, the length byte and payload together
    /// are padded to a multiple of `padding` and the padding is skipped.
    pub fn read_pascal_string(&mut self, padding: usize) -> Result<String, ZByteIoError> {
        let length = usize::from(self.read_u8()?);
        let bytes = self.read_bytes(length)?;

        if padding > 0 {
            // +1 for the length byte
            let rem = (length + 1) % padding;
            if rem != 0 {
                self.skip((padding - rem) as u64)?;
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
