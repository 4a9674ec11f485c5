/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per channel metadata and pixel decoding
use zune_core::bytestream::ZByteReaderTrait;
use zune_core::log::trace;

use crate::constants::CompressionMethod;
use crate::cursor::ByteCursor;
use crate::errors::PsdDecodeErrors;
use crate::rle::decode_rle;
use crate::version::FormatVersion;

/// What a layer channel stores
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChannelRole {
    Alpha,
    Red,
    Green,
    Blue,
    /// Masks and anything else we do not interpret,
    /// holds the raw channel id
    Other(i16)
}

impl ChannelRole {
    pub const fn from_id(id: i16) -> ChannelRole {
        match id {
            -1 => ChannelRole::Alpha,
            0 => ChannelRole::Red,
            1 => ChannelRole::Green,
            2 => ChannelRole::Blue,
            _ => ChannelRole::Other(id)
        }
    }

    pub const fn id(self) -> i16 {
        match self {
            ChannelRole::Alpha => -1,
            ChannelRole::Red => 0,
            ChannelRole::Green => 1,
            ChannelRole::Blue => 2,
            ChannelRole::Other(id) => id
        }
    }
}

/// Outcome of decoding one channel
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChannelStatus {
    Decoded,
    /// A compression scheme we recognise but do not decode
    Unsupported(CompressionMethod)
}

/// A single channel of a layer
///
/// Channel image data lives after all layer records, so the
/// range is only known once every layer has been read, see
/// [`resolve_position`](Self::resolve_position)
#[derive(Debug, Clone)]
pub struct PsdChannel {
    role:    ChannelRole,
    length:  u64,
    version: FormatVersion,
    range:   Option<(u64, u64)>
}

impl PsdChannel {
    /// Read channel id and data length from a layer record
    pub(crate) fn read<T: ZByteReaderTrait>(
        version: FormatVersion, stream: &mut ByteCursor<T>
    ) -> Result<PsdChannel, PsdDecodeErrors> {
        let role = ChannelRole::from_id(stream.read_i16_be()?);
        let length = version.read_channel_length(stream)?;

        Ok(PsdChannel {
            role,
            length,
            version,
            range: None
        })
    }

    pub const fn role(&self) -> ChannelRole {
        self.role
    }

    /// Length of the channel data, including the compression tag
    pub const fn encoded_length(&self) -> u64 {
        self.length
    }

    /// Absolute start and end of the channel data in the source,
    /// `None` before positions are resolved
    pub const fn data_range(&self) -> Option<(u64, u64)> {
        self.range
    }

    /// Record that this channel's data starts at the current position
    /// and move the stream past it
    pub(crate) fn resolve_position<T: ZByteReaderTrait>(
        &mut self, stream: &mut ByteCursor<T>
    ) -> Result<(), PsdDecodeErrors> {
        if self.range.is_some() {
            return Err(PsdDecodeErrors::Generic(
                "Channel image data position already resolved"
            ));
        }
        let start = stream.position()?;
        let end = start
            .checked_add(self.length)
            .ok_or(PsdDecodeErrors::Generic("Channel length overflows"))?;

        // declared length must fit in the source
        stream.set_position_within(end)?;
        self.range = Some((start, end));

        Ok(())
    }

    /// Decode the channel into `plane`
    ///
    /// `height` is the layer height, one scan line length
    /// is stored per row before RLE data.
    pub(crate) fn decode_into<T: ZByteReaderTrait>(
        &self, plane: &mut [u8], height: usize, stream: &mut ByteCursor<T>
    ) -> Result<ChannelStatus, PsdDecodeErrors> {
        let (start, end) = self.range.ok_or(PsdDecodeErrors::UnresolvedChannel)?;

        stream.set_position(start)?;

        let tag = stream.read_u16_be()?;
        let compression =
            CompressionMethod::from_int(tag).ok_or(PsdDecodeErrors::InvalidCompressionTag(tag))?;

        match compression {
            CompressionMethod::RLE => {
                // scan line byte counts, we decode the plane as one stream
                for _ in 0..height {
                    self.version.read_channel_scan_line_length(stream)?;
                }
                let remaining = end
                    .checked_sub(stream.position()?)
                    .ok_or(PsdDecodeErrors::BadRle)?;
                let rle_data = stream.read_bytes(usize::try_from(remaining).map_err(|_| {
                    PsdDecodeErrors::Generic("Channel data too large for this platform")
                })?)?;

                decode_rle(&rle_data, plane)?;

                Ok(ChannelStatus::Decoded)
            }
            other => {
                trace!("Channel {:?} uses unsupported compression {:?}", self.role, other);
                Ok(ChannelStatus::Unsupported(other))
            }
        }
    }
}
