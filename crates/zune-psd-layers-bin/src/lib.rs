/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::{error, info};

use crate::workflow::export_layers;

mod cmd_args;
mod cmd_parsers;
mod errors;
mod file_io;
mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::global_options::setup_logger(&options);

    let parsed_opts = match cmd_parsers::global_options::parse_options(&options) {
        Ok(opts) => opts,
        Err(reason) => {
            error!("Could not parse options, reason {}", reason);
            exit(-1);
        }
    };

    match export_layers(&parsed_opts) {
        Ok(count) => info!("Exported {} layers to {:?}", count, parsed_opts.output),
        Err(reason) => {
            println!();
            error!(" Could not export layers, reason {:?}", reason);
            println!();
            exit(-1);
        }
    }
}
