/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use zune_core::bytestream::ZByteIoError;
use zune_psd_layers::PsdDecodeErrors;

/// Errors that stop an export
pub enum ExportErrors {
    Decode(PsdDecodeErrors),
    Io(std::io::Error),
    /// Errors from the png encoder
    Encode(ZByteIoError),
    GenericString(String)
}

impl Debug for ExportErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportErrors::Decode(err) => writeln!(f, "Could not decode document: {err:?}"),
            ExportErrors::Io(err) => writeln!(f, "I/O error: {err}"),
            ExportErrors::Encode(err) => writeln!(f, "Could not encode png: {err:?}"),
            ExportErrors::GenericString(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for ExportErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for ExportErrors {}

impl From<PsdDecodeErrors> for ExportErrors {
    fn from(value: PsdDecodeErrors) -> Self {
        ExportErrors::Decode(value)
    }
}

impl From<std::io::Error> for ExportErrors {
    fn from(value: std::io::Error) -> Self {
        ExportErrors::Io(value)
    }
}

impl From<ZByteIoError> for ExportErrors {
    fn from(value: ZByteIoError) -> Self {
        ExportErrors::Encode(value)
    }
}

impl From<String> for ExportErrors {
    fn from(value: String) -> Self {
        ExportErrors::GenericString(value)
    }
}
