/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Field widths that depend on the file version
//!
//! PSB (large document format) widens most lengths
//! from 32 to 64 bits and scan line lengths from 16 to 32 bits.
use zune_core::bytestream::{ZByteIoError, ZByteReaderTrait};

use crate::cursor::ByteCursor;

/// Photoshop file format version
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FormatVersion {
    /// Regular `.psd`
    V1 = 1,
    /// Large document `.psb`
    V2 = 2
}

/// Returns true for versions this crate can read
pub const fn is_supported_version(version: u16) -> bool {
    matches!(version, 1 | 2)
}

/// Round `value` up to a multiple of `multiple` by adding the remainder.
///
/// This is only a true round up for `multiple == 2`, which
/// is the only way it's used.
pub const fn round_up(value: u64, multiple: u64) -> u64 {
    value.saturating_add(value % multiple)
}

impl FormatVersion {
    pub const fn from_u16(version: u16) -> Option<FormatVersion> {
        match version {
            1 => Some(FormatVersion::V1),
            2 => Some(FormatVersion::V2),
            _ => None
        }
    }

    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    pub fn read_layer_and_mask_info_length<T: ZByteReaderTrait>(
        self, stream: &mut ByteCursor<T>
    ) -> Result<u64, ZByteIoError> {
        self.read_length(stream)
    }

    /// Layer info length, rounded up to an even number of bytes
    pub fn read_layer_info_length<T: ZByteReaderTrait>(
        self, stream: &mut ByteCursor<T>
    ) -> Result<u64, ZByteIoError> {
        Ok(round_up(self.read_length(stream)?, 2))
    }

    pub fn read_channel_length<T: ZByteReaderTrait>(
        self, stream: &mut ByteCursor<T>
    ) -> Result<u64, ZByteIoError> {
        self.read_length(stream)
    }

    /// Byte count of one compressed scan line in an RLE channel
    pub fn read_channel_scan_line_length<T: ZByteReaderTrait>(
        self, stream: &mut ByteCursor<T>
    ) -> Result<i32, ZByteIoError> {
        match self {
            FormatVersion::V1 => Ok(i32::from(stream.read_i16_be()?)),
            FormatVersion::V2 => stream.read_i32_be()
        }
    }

    fn read_length<T: ZByteReaderTrait>(
        self, stream: &mut ByteCursor<T>
    ) -> Result<u64, ZByteIoError> {
        match self {
            FormatVersion::V1 => Ok(u64::from(stream.read_u32_be()?)),
            FormatVersion::V2 => stream.read_u64_be()
        }
    }
}

#[cfg(test)]
mod tests {
    use zune_core::bytestream::ZCursor;

    use crate::cursor::ByteCursor;
    use crate::version::{is_supported_version, round_up, FormatVersion};

    #[test]
    fn test_supported_versions() {
        assert!(is_supported_version(1));
        assert!(is_supported_version(2));

        for version in [0, 3, 4, 100, u16::MAX] {
            assert!(!is_supported_version(version));
            assert!(FormatVersion::from_u16(version).is_none());
        }
    }

    #[test]
    fn test_round_up() {
        assert_eq!(round_up(0, 2), 0);
        assert_eq!(round_up(10, 2), 10);
        assert_eq!(round_up(11, 2), 12);

        for value in 0..200 {
            let once = round_up(value, 2);
            assert_eq!(round_up(once, 2), once);
            assert_eq!(once % 2, 0);
        }
    }

    #[test]
    fn test_length_widths() {
        let data = [0, 0, 0, 0, 0, 0, 0, 3];

        let mut cursor = ByteCursor::new(ZCursor::new(&data[..]));
        assert_eq!(
            FormatVersion::V1
                .read_layer_and_mask_info_length(&mut cursor)
                .unwrap(),
            0
        );
        assert_eq!(cursor.position().unwrap(), 4);

        let mut cursor = ByteCursor::new(ZCursor::new(&data[..]));
        assert_eq!(
            FormatVersion::V2.read_channel_length(&mut cursor).unwrap(),
            3
        );
        assert_eq!(cursor.position().unwrap(), 8);

        // odd layer info length is rounded up
        let mut cursor = ByteCursor::new(ZCursor::new(&data[..]));
        assert_eq!(
            FormatVersion::V2.read_layer_info_length(&mut cursor).unwrap(),
            4
        );
    }

    #[test]
    fn test_scan_line_widths() {
        let data = [0xFF, 0xFF, 0x00, 0x10];

        let mut cursor = ByteCursor::new(ZCursor::new(&data[..]));
        assert_eq!(
            FormatVersion::V1
                .read_channel_scan_line_length(&mut cursor)
                .unwrap(),
            -1
        );
        assert_eq!(cursor.position().unwrap(), 2);

        let mut cursor = ByteCursor::new(ZCursor::new(&data[..]));
        assert_eq!(
            FormatVersion::V2
                .read_channel_scan_line_length(&mut cursor)
                .unwrap(),
            -65520
        );
        assert_eq!(cursor.position().unwrap(), 4);
    }
}
