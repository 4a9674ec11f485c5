/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A layered PSD reader.
//!
//! Reads the document header, skips color mode data and image resources,
//! and parses the layer records. Channel pixel data can then be decoded
//! into per layer RGBA planes.
//!
//! Only RLE compressed channels are decoded; layers using anything else,
//! or with channels other than exactly red, green, blue and alpha, are
//! reported as [`ImagePlanes::Unsupported`](crate::ImagePlanes::Unsupported).
use alloc::vec::Vec;

use zune_core::bit_depth::BitDepth;
use zune_core::bytestream::ZByteReaderTrait;
use zune_core::log::{debug, trace};
use zune_core::options::DecoderOptions;

use crate::constants::{ColorModes, MAX_CHANNELS, MAX_DIMENSIONS, PSD_IDENTIFIER};
use crate::cursor::ByteCursor;
use crate::errors::PsdDecodeErrors;
use crate::layer::PsdLayer;
use crate::version::FormatVersion;

/// A decoded photoshop document
#[derive(Debug, Clone)]
pub struct PsdDocument {
    version:       FormatVersion,
    channel_count: u16,
    width:         usize,
    height:        usize,
    depth:         u16,
    color_mode:    u16,
    layers:        Vec<PsdLayer>,
    pixels_loaded: bool
}

impl PsdDocument {
    pub const fn version(&self) -> FormatVersion {
        self.version
    }

    /// Channels of the composite image, as declared in the header
    pub const fn channel_count(&self) -> u16 {
        self.channel_count
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Bits per channel, one of 1,8,16 or 32
    pub const fn depth(&self) -> u16 {
        self.depth
    }

    /// Bit depth, or `None` for 1 bit bitmap images
    pub const fn bit_depth(&self) -> Option<BitDepth> {
        match self.depth {
            8 => Some(BitDepth::Eight),
            16 => Some(BitDepth::Sixteen),
            32 => Some(BitDepth::Float32),
            _ => None
        }
    }

    /// Color mode, `None` for the two codes in range photoshop leaves unnamed
    pub fn color_mode(&self) -> Option<ColorModes> {
        ColorModes::from_int(self.color_mode)
    }

    pub const fn color_mode_raw(&self) -> u16 {
        self.color_mode
    }

    /// Layers in file order, bottom most first
    pub fn layers(&self) -> &[PsdLayer] {
        &self.layers
    }

    pub fn into_layers(self) -> Vec<PsdLayer> {
        self.layers
    }

    pub const fn pixels_loaded(&self) -> bool {
        self.pixels_loaded
    }
}

/// A photoshop document reader that extracts layers
///
/// Decoding happens in two passes, the first reads the header and
/// all layer records ([`decode_headers`](Self::decode_headers)),
/// the second decodes channel pixel data
/// ([`load_pixel_data`](Self::load_pixel_data)).
///
/// # Example
/// ```no_run
/// use zune_core::bytestream::ZCursor;
/// use zune_psd_layers::{ImagePlanes, PsdDecodeErrors, PsdLayerDecoder};
///
/// fn main() -> Result<(), PsdDecodeErrors> {
///     let mut decoder = PsdLayerDecoder::new(ZCursor::new(&[]));
///     let document = decoder.decode(true)?;
///
///     for layer in document.layers() {
///         if let ImagePlanes::Rgba { red, .. } = layer.image() {
///             println!("{}: {} bytes of red", layer.name(), red.len());
///         }
///     }
///     Ok(())
/// }
/// ```
pub struct PsdLayerDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:   ByteCursor<T>,
    options:  DecoderOptions,
    document: Option<PsdDocument>
}

impl<T> PsdLayerDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new decoder that reads a photoshop encoded file
    /// from `T`
    ///
    /// Width and height are limited to 300,000 pixels, the largest
    /// a large document (PSB) may be, in place of the `DecoderOptions`
    /// default of 16384.
    ///
    /// # Arguments
    /// - data: Data source, it has to implement `ZByteReaderTrait`
    pub fn new(data: T) -> PsdLayerDecoder<T> {
        let options = DecoderOptions::default()
            .set_max_width(MAX_DIMENSIONS)
            .set_max_height(MAX_DIMENSIONS);

        Self::new_with_options(data, options)
    }

    /// Creates a new decoder with options that influence decoding routines
    ///
    /// Maximum width and height limit both the document and each layer,
    /// they are used as given so `DecoderOptions::default()` caps both at 16384.
    pub fn new_with_options(data: T, options: DecoderOptions) -> PsdLayerDecoder<T> {
        PsdLayerDecoder {
            stream: ByteCursor::new(data),
            options,
            document: None
        }
    }

    /// Read the header and every layer record, without pixel data
    ///
    /// Calling this again after success does nothing.
    /// On error no document is kept.
    pub fn decode_headers(&mut self) -> Result<(), PsdDecodeErrors> {
        if self.document.is_some() {
            return Ok(());
        }
        self.stream.set_position(0)?;

        let mut document = self.read_file_header()?;

        self.skip_color_mode_data()?;
        self.skip_image_resources()?;
        self.read_layer_and_mask_info(&mut document)?;

        debug!("Read {} layers", document.layers.len());

        self.document = Some(document);
        Ok(())
    }

    /// Decode pixel data of every layer
    ///
    /// Headers are decoded first if that hasn't happened yet.
    ///
    /// # Errors
    /// [`PsdDecodeErrors::AlreadyLoaded`] if pixels were already loaded,
    /// or any error encountered decoding channels, in which case the
    /// document is discarded
    pub fn load_pixel_data(&mut self) -> Result<(), PsdDecodeErrors> {
        self.decode_headers()?;

        let mut document = self
            .document
            .take()
            .ok_or(PsdDecodeErrors::Generic("Document headers not decoded"))?;

        if document.pixels_loaded {
            self.document = Some(document);
            return Err(PsdDecodeErrors::AlreadyLoaded);
        }

        for layer in &mut document.layers {
            layer.load_pixel_data(&mut self.stream)?;
        }
        document.pixels_loaded = true;

        self.document = Some(document);
        Ok(())
    }

    /// Decode the document, optionally with pixel data
    pub fn decode(&mut self, load_pixels: bool) -> Result<&PsdDocument, PsdDecodeErrors> {
        self.decode_headers()?;

        if load_pixels && !self.document.as_ref().is_some_and(|x| x.pixels_loaded) {
            self.load_pixel_data()?;
        }
        self.document
            .as_ref()
            .ok_or(PsdDecodeErrors::Generic("Document headers not decoded"))
    }

    /// The decoded document or `None` if headers weren't decoded
    pub const fn document(&self) -> Option<&PsdDocument> {
        self.document.as_ref()
    }

    /// Consume the decoder returning the document
    pub fn into_document(self) -> Option<PsdDocument> {
        self.document
    }

    /// Get image width and height respectively or None if the
    /// headers haven't been decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.document.as_ref().map(|x| (x.width, x.height))
    }

    fn read_file_header(&mut self) -> Result<PsdDocument, PsdDecodeErrors> {
        let stream = &mut self.stream;

        let magic = stream.read_fixed_bytes::<4>()?;

        if magic != PSD_IDENTIFIER {
            return Err(PsdDecodeErrors::WrongMagicBytes(magic));
        }

        let raw_version = stream.read_u16_be()?;
        let version = FormatVersion::from_u16(raw_version)
            .ok_or(PsdDecodeErrors::UnsupportedVersion(raw_version))?;

        let reserved = stream.read_fixed_bytes::<6>()?;

        if reserved != [0; 6] {
            return Err(PsdDecodeErrors::NonZeroReserved(reserved));
        }

        // Read the number of channels (R, G, B, A, etc).
        let channel_count = stream.read_u16_be()?;

        if !(1..=MAX_CHANNELS).contains(&channel_count) {
            return Err(PsdDecodeErrors::UnsupportedChannelCount(channel_count));
        }

        let height = stream.read_u32_be()? as usize;
        let width = stream.read_u32_be()? as usize;

        if width > self.options.max_width() {
            return Err(PsdDecodeErrors::LargeDimensions(
                self.options.max_width(),
                width
            ));
        }

        if height > self.options.max_height() {
            return Err(PsdDecodeErrors::LargeDimensions(
                self.options.max_height(),
                height
            ));
        }

        let depth = stream.read_u16_be()?;

        if !matches!(depth, 1 | 8 | 16 | 32) {
            return Err(PsdDecodeErrors::UnsupportedBitDepth(depth));
        }

        let color_mode = stream.read_u16_be()?;

        if color_mode > 9 {
            return Err(PsdDecodeErrors::UnknownColorMode(color_mode));
        }

        trace!("Version: {:?}", version);
        trace!("Image width:{}", width);
        trace!("Image height:{}", height);
        trace!("Channels: {}", channel_count);
        trace!("Bit depth : {}", depth);
        trace!("Color mode: {:?}", ColorModes::from_int(color_mode));

        Ok(PsdDocument {
            version,
            channel_count,
            width,
            height,
            depth,
            color_mode,
            layers: Vec::new(),
            pixels_loaded: false
        })
    }

    fn skip_color_mode_data(&mut self) -> Result<(), PsdDecodeErrors> {
        let bytes = self.stream.read_u32_be()?;
        self.stream.skip(u64::from(bytes))?;
        Ok(())
    }

    fn skip_image_resources(&mut self) -> Result<(), PsdDecodeErrors> {
        let bytes = self.stream.read_u32_be()?;
        self.stream.skip(u64::from(bytes))?;
        Ok(())
    }

    fn read_layer_and_mask_info(
        &mut self, document: &mut PsdDocument
    ) -> Result<(), PsdDecodeErrors> {
        let length = document
            .version
            .read_layer_and_mask_info_length(&mut self.stream)?;

        if length == 0 {
            return Ok(());
        }
        let end = block_end(self.stream.position()?, length)?;

        self.read_layer_info(document)?;

        // global layer mask info and additional layer info are not read
        self.stream.set_position(end)?;

        Ok(())
    }

    fn read_layer_info(&mut self, document: &mut PsdDocument) -> Result<(), PsdDecodeErrors> {
        let version = document.version;
        let length = version.read_layer_info_length(&mut self.stream)?;

        if length == 0 {
            return Ok(());
        }
        let end = block_end(self.stream.position()?, length)?;

        // the count may be negative, only the magnitude is the layer count
        let layer_count = self.stream.read_i16_be()?.unsigned_abs();

        trace!("Layer count: {}", layer_count);

        if layer_count == 0 {
            return Ok(());
        }

        let mut layers = Vec::with_capacity(usize::from(layer_count));
        // (layer, channel) in declaration order
        let mut pending = Vec::new();

        for layer_index in 0..usize::from(layer_count) {
            let layer = PsdLayer::read(version, &self.options, &mut self.stream)?;

            pending.extend((0..layer.channels().len()).map(|channel| (layer_index, channel)));
            layers.push(layer);
        }

        // channel image data follows the last layer record, laid
        // out in the same order the channels were declared
        for (layer_index, channel_index) in pending {
            layers[layer_index].channels_mut()[channel_index].resolve_position(&mut self.stream)?;
        }
        for layer in &mut layers {
            layer.classify_image();
        }

        self.stream.set_position(end)?;

        document.layers = layers;

        Ok(())
    }
}

fn block_end(start: u64, length: u64) -> Result<u64, PsdDecodeErrors> {
    start
        .checked_add(length)
        .ok_or(PsdDecodeErrors::Generic("Block length overflows"))
}
