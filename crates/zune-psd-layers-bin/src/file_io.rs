/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::options::EncoderOptions;
use zune_png::PngEncoder;

use crate::errors::ExportErrors;

/// File name for a layer, characters that can't appear
/// in a file name are replaced with `_`
pub fn layer_file_name(name: &str, index: usize) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' | ':' => '_',
            c if c.is_control() => '_',
            c => c
        })
        .collect();

    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return format!("layer_{index}.png");
    }
    format!("{cleaned}.png")
}

/// Encode interleaved RGBA8 pixels as png and write them to `directory/file_name`
pub fn write_png(
    directory: &Path, file_name: &str, width: usize, height: usize, rgba: &[u8]
) -> Result<PathBuf, ExportErrors> {
    let options = EncoderOptions::new(width, height, ColorSpace::RGBA, BitDepth::Eight);

    let mut encoded = Vec::new();
    PngEncoder::new(rgba, options).encode(&mut encoded)?;

    let path = directory.join(file_name);

    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(&path)?;

    let mut writer = BufWriter::new(file);
    writer.write_all(&encoded)?;
    writer.flush()?;

    debug!("Wrote {} bytes to {:?}", encoded.len(), path);

    Ok(path)
}
