/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use zune_core::bytestream::ZCursor;
use zune_psd_layers::PsdLayerDecoder;

use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::ExportErrors;
use crate::file_io::{layer_file_name, write_png};

/// Decode the input document and write every RGBA layer as a png
/// into the output directory.
///
/// Returns the number of files written
pub(crate) fn export_layers(cmd_opts: &CmdOptions) -> Result<usize, ExportErrors> {
    verify_file_paths(&cmd_opts.input, &cmd_opts.output, cmd_opts.overwrite)?;

    info!("Reading file {:?}", cmd_opts.input);
    let data = fs::read(&cmd_opts.input)?;

    let mut decoder = PsdLayerDecoder::new_with_options(ZCursor::new(&data), cmd_opts.options);
    let document = decoder.decode(true)?;

    info!(
        "Document {}x{}, {} layers",
        document.width(),
        document.height(),
        document.layers().len()
    );

    fs::create_dir_all(&cmd_opts.output)?;

    let mut written = 0;

    for (index, layer) in document.layers().iter().enumerate() {
        let Some(rgba) = layer.image().to_rgba_interleaved() else {
            info!("Skipping layer {:?}, not an RGBA layer", layer.name());
            continue;
        };
        let (width, height) = layer.image().dimensions();

        if width == 0 || height == 0 {
            debug!("Skipping empty layer {:?}", layer.name());
            continue;
        }

        let file_name = layer_file_name(layer.name(), index);
        let path = write_png(&cmd_opts.output, &file_name, width, height, &rgba)?;

        info!("Saved file: {:?}", path);
        written += 1;
    }

    if written == 0 {
        warn!("No layers were exported");
    }
    Ok(written)
}

fn verify_file_paths(input: &Path, output: &Path, overwrite: bool) -> Result<(), ExportErrors> {
    if !input.exists() {
        return Err(ExportErrors::GenericString(format!(
            "Path {:?}, does not exist",
            input
        )));
    }

    if !input.is_file() {
        return Err(ExportErrors::GenericString(format!(
            "Path {:?} is not a file",
            input
        )));
    }

    if output.exists() {
        if !overwrite {
            return Err(ExportErrors::GenericString(format!(
                "Output directory {:?} exists, use --overwrite to replace it",
                output
            )));
        }
        if !output.is_dir() {
            return Err(ExportErrors::GenericString(format!(
                "Output path {:?} is not a directory",
                output
            )));
        }
        info!("Removing existing directory {:?}", output);
        fs::remove_dir_all(output)?;
    }
    Ok(())
}
