/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::ArgMatches;
use log::{info, Level};
use zune_core::options::DecoderOptions;

use crate::cmd_parsers::get_decoder_options;

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub input:     PathBuf,
    pub output:    PathBuf,
    pub overwrite: bool,
    pub options:   DecoderOptions
}

pub fn parse_options(options: &ArgMatches) -> Result<CmdOptions, String> {
    let input = options
        .get_one::<String>("in")
        .ok_or_else(|| String::from("No input file specified"))?;
    let output = options
        .get_one::<String>("out")
        .ok_or_else(|| String::from("No output directory specified"))?;

    let overwrite = options.get_flag("overwrite");

    if overwrite {
        info!("Output directory will be replaced");
    }

    Ok(CmdOptions {
        input: PathBuf::from(input),
        output: PathBuf::from(output),
        overwrite,
        options: get_decoder_options(options)
    })
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if simple_logger::init_with_level(log_level).is_err() {
        eprintln!("Logger already initialized");
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
