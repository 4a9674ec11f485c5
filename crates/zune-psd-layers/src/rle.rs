/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! PackBits run length decoding
use core::cmp::Ordering;

use crate::errors::PsdDecodeErrors;

/// Decode a PackBits stream until `output` is completely filled.
///
/// Loop until you get the number of unpacked bytes you are expecting:
///  - Read the next source byte into n.
///  - If n is between 0 and 127 inclusive, copy the next n+1 bytes literally.
///  - Else if n is between -127 and -1 inclusive, copy the next byte -n+1 times.
///  - Else if n is -128, noop.
///
/// Scan lines are not treated separately, the whole plane is one stream.
/// Bytes left in `input` after `output` is full are ignored.
///
/// # Errors
/// [`PsdDecodeErrors::BadRle`] if input runs out before `output` is full
/// or if a run would write past the end of `output`
pub fn decode_rle(input: &[u8], output: &mut [u8]) -> Result<(), PsdDecodeErrors> {
    let mut in_pos = 0;
    let mut out_pos = 0;

    while out_pos < output.len() {
        let control = *input.get(in_pos).ok_or(PsdDecodeErrors::BadRle)?;
        in_pos += 1;

        match control.cmp(&128) {
            Ordering::Less => {
                // copy next len+1 bytes literally
                let len = usize::from(control) + 1;

                let src = input
                    .get(in_pos..in_pos + len)
                    .ok_or(PsdDecodeErrors::BadRle)?;
                let dst = output
                    .get_mut(out_pos..out_pos + len)
                    .ok_or(PsdDecodeErrors::BadRle)?;

                dst.copy_from_slice(src);

                in_pos += len;
                out_pos += len;
            }
            Ordering::Equal => (),
            Ordering::Greater => {
                // Next -len+1 bytes in the dest are replicated from next source byte.
                // (Interpret len as a negative 8-bit int.)
                let len = 257 - usize::from(control);

                let value = *input.get(in_pos).ok_or(PsdDecodeErrors::BadRle)?;
                in_pos += 1;

                output
                    .get_mut(out_pos..out_pos + len)
                    .ok_or(PsdDecodeErrors::BadRle)?
                    .fill(value);

                out_pos += len;
            }
        }
    }
    Ok(())
}
