/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use zune_core::bytestream::ZByteIoError;

use crate::constants::{BLEND_SIGNATURE, MAX_CHANNELS, PSD_IDENTIFIER};

/// Errors that can occur during PSD decoding
///
/// Every variant here aborts decoding, layers whose pixels
/// cannot be understood (unknown compression, odd channel layouts)
/// are not reported as errors but as an unsupported image
/// on the layer itself.
pub enum PsdDecodeErrors {
    /// The first four bytes were not `8BPS`
    WrongMagicBytes([u8; 4]),
    /// Version is neither 1 (PSD) nor 2 (PSB)
    UnsupportedVersion(u16),
    /// The six reserved header bytes must be zero
    NonZeroReserved([u8; 6]),
    /// Channel count outside 1..=56
    UnsupportedChannelCount(u16),
    /// Bit depth not one of 1,8,16,32
    UnsupportedBitDepth(u16),
    /// Color mode outside 0..=9
    UnknownColorMode(u16),
    /// Dimensions larger than what the decoder options allow
    ///
    /// # Arguments
    /// - 1st argument is the maximum allowed
    /// - 2nd argument is the value found
    LargeDimensions(usize, usize),
    /// A layer whose right/bottom edge lies before its left/top edge
    ///
    /// Contains the computed width and height
    InvalidLayerBounds(i64, i64),
    /// A layer's blend mode block did not start with `8BIM`
    InvalidBlendSignature([u8; 4]),
    /// Channel compression tag outside 0..=3
    InvalidCompressionTag(u16),
    /// Pixel data was already loaded for this document or layer
    AlreadyLoaded,
    /// Tried to decode a channel whose pixel data position is unknown
    UnresolvedChannel,
    /// RLE stream did not exactly fill the channel plane
    BadRle,
    Generic(&'static str),
    IoErrors(ZByteIoError)
}

impl PsdDecodeErrors {
    /// Returns true if this error originated from validating
    /// the fixed document header
    pub const fn is_malformed_header(&self) -> bool {
        matches!(
            self,
            PsdDecodeErrors::WrongMagicBytes(_)
                | PsdDecodeErrors::UnsupportedVersion(_)
                | PsdDecodeErrors::NonZeroReserved(_)
                | PsdDecodeErrors::UnsupportedChannelCount(_)
                | PsdDecodeErrors::UnsupportedBitDepth(_)
                | PsdDecodeErrors::UnknownColorMode(_)
                | PsdDecodeErrors::LargeDimensions(..)
        )
    }
}

impl Debug for PsdDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PsdDecodeErrors::WrongMagicBytes(bytes) => {
                writeln!(
                    f,
                    "Expected {:?} but found {:?}, not a PSD image",
                    PSD_IDENTIFIER, bytes
                )
            }
            PsdDecodeErrors::UnsupportedVersion(version) => {
                writeln!(
                    f,
                    "Unsupported file version {version:?}, known versions are 1 and 2",
                )
            }
            PsdDecodeErrors::NonZeroReserved(bytes) => {
                writeln!(f, "Reserved header bytes should be zero, found {bytes:?}")
            }
            PsdDecodeErrors::UnsupportedChannelCount(channels) => {
                writeln!(
                    f,
                    "Unsupported channel count {channels:?}, expected 1 to {MAX_CHANNELS}"
                )
            }
            PsdDecodeErrors::UnsupportedBitDepth(depth) => {
                writeln!(
                    f,
                    "Unsupported bit depth {depth:?}, known depths are 1,8,16 and 32",
                )
            }
            PsdDecodeErrors::UnknownColorMode(mode) => {
                writeln!(f, "Unknown color mode {mode}, expected 0 to 9")
            }
            PsdDecodeErrors::LargeDimensions(supported, found) => {
                writeln!(
                    f,
                    "Too large dimensions, supported {supported} but found {found}",
                )
            }
            PsdDecodeErrors::InvalidLayerBounds(width, height) => {
                writeln!(
                    f,
                    "Invalid layer bounds, computed width {width} and height {height}"
                )
            }
            PsdDecodeErrors::InvalidBlendSignature(signature) => {
                writeln!(
                    f,
                    "Invalid blend mode signature, expected {:?} but found {:?}",
                    BLEND_SIGNATURE, signature
                )
            }
            PsdDecodeErrors::InvalidCompressionTag(tag) => {
                writeln!(f, "Invalid channel compression {tag}")
            }
            PsdDecodeErrors::AlreadyLoaded => {
                writeln!(f, "Image data is already loaded")
            }
            PsdDecodeErrors::UnresolvedChannel => {
                writeln!(f, "Channel image data position was never resolved")
            }
            PsdDecodeErrors::BadRle => {
                writeln!(f, "Bad RLE")
            }
            PsdDecodeErrors::Generic(reason) => {
                writeln!(f, "{reason}")
            }
            PsdDecodeErrors::IoErrors(e) => {
                writeln!(f, "I/O error :{:?}", e)
            }
        }
    }
}

impl Display for PsdDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PsdDecodeErrors {}

impl From<&'static str> for PsdDecodeErrors {
    fn from(r: &'static str) -> Self {
        Self::Generic(r)
    }
}

impl From<ZByteIoError> for PsdDecodeErrors {
    fn from(r: ZByteIoError) -> Self {
        Self::IoErrors(r)
    }
}
