//! A layered PSD reader
//!
//! This crate reads Photoshop `.psd` and large document `.psb` files
//! into a list of layers, each with its bounds, blending information,
//! name and pixel data as separate red, green, blue and alpha planes.
//!
//! ## What it reads
//! Photoshop is a complicated format, this library only extracts what
//! is needed to get the pixels of simple RGBA layers out.
//!
//! - Color mode data, image resources, layer masks, blending ranges and
//!   additional layer information are skipped.
//! - Only RLE compressed channels are decoded. Layers with raw or zip compressed
//!   channels, and layers that are not exactly one red, green, blue and alpha
//!   channel are reported as [`ImagePlanes::Unsupported`] instead of failing the
//!   whole document.
//! - It does not composite layers.
//!
//! # Example
//! - Reading layers from a psd file
//! ```no_run
//! use zune_psd_layers::errors::PsdDecodeErrors;
//! use zune_psd_layers::PsdLayerDecoder;
//!
//! fn main() -> Result<(), PsdDecodeErrors> {
//!     use zune_core::bytestream::ZCursor;
//!     let mut decoder = PsdLayerDecoder::new(ZCursor::new(&[]));
//!     // read layer records first
//!     decoder.decode_headers()?;
//!     // then decode the pixels
//!     decoder.load_pixel_data()?;
//!
//!     let document = decoder.into_document().unwrap();
//!
//!     for layer in document.layers() {
//!         let rgba = layer.image().to_rgba_interleaved();
//!         println!("{} has pixels: {}", layer.name(), rgba.is_some());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//! - `std`: Implements `std::error::Error` for errors and allows reading from
//!   anything implementing `BufRead + Seek`
//! - `log`: Forwards internal traces to the `log` crate
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;
pub extern crate zune_core;

pub use channel::{ChannelRole, ChannelStatus, PsdChannel};
pub use constants::{ColorModes, CompressionMethod};
pub use cursor::ByteCursor;
pub use decoder::{PsdDocument, PsdLayerDecoder};
pub use errors::PsdDecodeErrors;
pub use image::ImagePlanes;
pub use layer::PsdLayer;
pub use version::{is_supported_version, round_up, FormatVersion};

mod channel;
mod constants;
pub mod cursor;
pub mod decoder;
pub mod errors;
mod image;
mod layer;
pub mod rle;
mod version;
