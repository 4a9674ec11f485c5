/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("psd-layers")
        .about("Export the RGBA layers of a photoshop document as png files")
        .arg(Arg::new("in")
            .short('i')
            .help("Photoshop document to read layers from")
            .long("input")
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Directory to write layer images to")
            .required(true))
        .arg(Arg::new("overwrite")
            .long("overwrite")
            .short('y')
            .action(ArgAction::SetTrue)
            .help("Remove the output directory first if it exists"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the exported layers"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Maximum width of the document and of any layer")
            .value_parser(value_parser!(usize))
            .default_value("300000"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Maximum height of the document and of any layer")
            .value_parser(value_parser!(usize))
            .default_value("300000"))
}
