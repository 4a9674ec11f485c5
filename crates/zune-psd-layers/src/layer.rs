/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Layer records
//!
//! A layer record describes the layer bounds, its channels and blending
//! information. Pixel data for the channels is stored separately after
//! all layer records, and is loaded in a second pass.
use alloc::string::String;
use alloc::vec::Vec;

use zune_core::bytestream::ZByteReaderTrait;
use zune_core::log::{debug, trace};
use zune_core::options::DecoderOptions;

use crate::channel::{ChannelRole, ChannelStatus, PsdChannel};
use crate::constants::{BLEND_SIGNATURE, LAYER_NAME_PADDING};
use crate::cursor::ByteCursor;
use crate::errors::PsdDecodeErrors;
use crate::image::ImagePlanes;
use crate::version::FormatVersion;

/// A single photoshop layer
#[derive(Debug, Clone)]
pub struct PsdLayer {
    x:          i32,
    y:          i32,
    width:      i32,
    height:     i32,
    channels:   Vec<PsdChannel>,
    blend_mode: [u8; 4],
    opacity:    u8,
    clipping:   bool,
    visible:    bool,
    name:       String,
    image:      ImagePlanes,
    loaded:     bool
}

impl PsdLayer {
    /// Read a layer record, the stream is left at the start of the next record.
    pub(crate) fn read<T: ZByteReaderTrait>(
        version: FormatVersion, options: &DecoderOptions, stream: &mut ByteCursor<T>
    ) -> Result<PsdLayer, PsdDecodeErrors> {
        let top = stream.read_i32_be()?;
        let left = stream.read_i32_be()?;
        let bottom = stream.read_i32_be()?;
        let right = stream.read_i32_be()?;

        let width = i64::from(right) - i64::from(left);
        let height = i64::from(bottom) - i64::from(top);

        let (width, height) = match (i32::try_from(width), i32::try_from(height)) {
            (Ok(w), Ok(h)) if w >= 0 && h >= 0 => (w, h),
            _ => return Err(PsdDecodeErrors::InvalidLayerBounds(width, height))
        };

        if width as usize > options.max_width() {
            return Err(PsdDecodeErrors::LargeDimensions(
                options.max_width(),
                width as usize
            ));
        }
        if height as usize > options.max_height() {
            return Err(PsdDecodeErrors::LargeDimensions(
                options.max_height(),
                height as usize
            ));
        }

        // stored signed, a negative count declares no channels
        let channel_count = usize::try_from(stream.read_i16_be()?).unwrap_or(0);

        let channels = (0..channel_count)
            .map(|_| PsdChannel::read(version, stream))
            .collect::<Result<Vec<PsdChannel>, PsdDecodeErrors>>()?;

        let signature = stream.read_fixed_bytes::<4>()?;

        if signature != BLEND_SIGNATURE {
            return Err(PsdDecodeErrors::InvalidBlendSignature(signature));
        }

        let blend_mode = stream.read_fixed_bytes::<4>()?;
        let opacity = stream.read_u8()?;
        let clipping = stream.read_bool()?;
        let visible = stream.read_bool()?;
        // filler
        stream.skip(1)?;

        let extra_length = stream.read_u32_be()?;
        let extra_end = stream.position()? + u64::from(extra_length);

        // layer mask data
        let mask_length = stream.read_u32_be()?;
        stream.skip(u64::from(mask_length))?;

        // layer blending ranges
        let ranges_length = stream.read_u32_be()?;
        stream.skip(u64::from(ranges_length))?;

        let name = stream.read_pascal_string(LAYER_NAME_PADDING)?;

        // additional layer information is not read
        stream.set_position(extra_end)?;

        trace!(
            "Layer {:?}: {}x{} at ({},{}), {} channels, blend mode {:?}",
            name,
            width,
            height,
            left,
            top,
            channels.len(),
            blend_mode
        );

        Ok(PsdLayer {
            x: left,
            y: top,
            width,
            height,
            channels,
            blend_mode,
            opacity,
            clipping,
            visible,
            name,
            image: ImagePlanes::Unsupported,
            loaded: false
        })
    }

    /// Decode channel pixel data into the layer image
    ///
    /// Does nothing for unsupported images. If any channel uses a compression
    /// we can't decode the whole image is marked unsupported.
    pub(crate) fn load_pixel_data<T: ZByteReaderTrait>(
        &mut self, stream: &mut ByteCursor<T>
    ) -> Result<(), PsdDecodeErrors> {
        let ImagePlanes::Rgba {
            height,
            red,
            green,
            blue,
            alpha,
            ..
        } = &mut self.image
        else {
            return Ok(());
        };

        if self.loaded {
            return Err(PsdDecodeErrors::AlreadyLoaded);
        }

        let mut supported = true;

        for channel in &self.channels {
            let plane = match channel.role() {
                ChannelRole::Alpha => &mut *alpha,
                ChannelRole::Red => &mut *red,
                ChannelRole::Green => &mut *green,
                ChannelRole::Blue => &mut *blue,
                ChannelRole::Other(_) => continue
            };
            if let ChannelStatus::Unsupported(_) = channel.decode_into(plane, *height, stream)? {
                supported = false;
            }
        }

        if !supported {
            debug!("Layer {:?} uses unsupported compression, skipping it", self.name);
            self.image = ImagePlanes::Unsupported;
        }
        self.loaded = true;

        Ok(())
    }

    /// Decide whether the layer is RGBA and allocate its planes,
    /// channel positions must be resolved first
    pub(crate) fn classify_image(&mut self) {
        self.image =
            ImagePlanes::for_channels(self.width as usize, self.height as usize, &self.channels);

        trace!("Layer {:?} rgba: {}", self.name, self.image.is_rgba());
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [PsdChannel] {
        &mut self.channels
    }

    /// Left edge of the layer
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Top edge of the layer
    pub const fn y(&self) -> i32 {
        self.y
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub fn channels(&self) -> &[PsdChannel] {
        &self.channels
    }

    /// Four character blend mode key, e.g `norm` or `mul `
    pub const fn blend_mode(&self) -> [u8; 4] {
        self.blend_mode
    }

    pub const fn opacity(&self) -> u8 {
        self.opacity
    }

    pub const fn clipping(&self) -> bool {
        self.clipping
    }

    pub const fn visible(&self) -> bool {
        self.visible
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn image(&self) -> &ImagePlanes {
        &self.image
    }

    /// Whether pixel data loading already ran for this layer
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }
}
