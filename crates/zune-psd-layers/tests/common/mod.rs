/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Helpers to write small photoshop documents byte by byte
#![allow(dead_code)]

/// PackBits encoder
///
/// Runs of 3 or more identical bytes become repeat runs,
/// everything else is emitted as literal runs of at most 128 bytes.
pub fn packbits_encode(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let mut run_len = 1;
        while i + run_len < input.len() && input[i + run_len] == input[i] && run_len < 128 {
            run_len += 1;
        }

        if run_len >= 3 {
            output.push((1_i16 - run_len as i16) as u8);
            output.push(input[i]);
            i += run_len;
        } else {
            let start = i;

            while i < input.len() && i - start < 128 {
                if i > start
                    && i + 2 < input.len()
                    && input[i] == input[i + 1]
                    && input[i] == input[i + 2]
                {
                    break;
                }
                i += 1;
            }
            output.push((i - start - 1) as u8);
            output.extend_from_slice(&input[start..i]);
        }
    }
    output
}

/// Channel pixel block: RLE tag, per row byte counts, then packed rows
pub fn rle_channel(version: u16, plane: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut counts = Vec::new();
    let mut packed = Vec::new();

    for row in 0..height {
        let encoded = packbits_encode(&plane[row * width..(row + 1) * width]);

        if version == 1 {
            counts.extend_from_slice(&(encoded.len() as u16).to_be_bytes());
        } else {
            counts.extend_from_slice(&(encoded.len() as u32).to_be_bytes());
        }
        packed.extend(encoded);
    }
    let mut out = vec![0, 1];
    out.extend(counts);
    out.extend(packed);
    out
}

/// Channel pixel block stored with compression `tag`, data copied verbatim
pub fn tagged_channel(tag: u16, data: &[u8]) -> Vec<u8> {
    let mut out = tag.to_be_bytes().to_vec();
    out.extend_from_slice(data);
    out
}

pub struct TestLayer {
    pub top:        i32,
    pub left:       i32,
    pub bottom:     i32,
    pub right:      i32,
    /// channel id and the full pixel block for it
    pub channels:   Vec<(i16, Vec<u8>)>,
    pub signature:  [u8; 4],
    pub blend_mode: [u8; 4],
    pub opacity:    u8,
    pub clipping:   bool,
    pub flags:      u8,
    pub mask:       Vec<u8>,
    pub ranges:     Vec<u8>,
    pub name:       String,
    /// additional layer information, skipped by the reader
    pub extra:      Vec<u8>,
    /// channel index and a length written instead of the real one
    pub lengths:    Vec<(usize, u64)>
}

impl TestLayer {
    pub fn new(name: &str, left: i32, top: i32, width: i32, height: i32) -> TestLayer {
        TestLayer {
            top,
            left,
            bottom: top + height,
            right: left + width,
            channels: Vec::new(),
            signature: *b"8BIM",
            blend_mode: *b"norm",
            opacity: 255,
            clipping: false,
            flags: 1,
            mask: Vec::new(),
            ranges: Vec::new(),
            name: name.to_string(),
            extra: Vec::new(),
            lengths: Vec::new()
        }
    }

    /// Add red, green, blue and alpha channels, RLE compressed
    pub fn with_rgba(mut self, version: u16, planes: [&[u8]; 4]) -> TestLayer {
        let width = (self.right - self.left) as usize;
        let height = (self.bottom - self.top) as usize;

        for (id, plane) in [0, 1, 2, -1].into_iter().zip(planes) {
            self.channels
                .push((id, rle_channel(version, plane, width, height)));
        }
        self
    }

    pub fn with_channel(mut self, id: i16, data: Vec<u8>) -> TestLayer {
        self.channels.push((id, data));
        self
    }

    /// Declare `length` for the channel at `index`, the data written stays the same
    pub fn with_declared_length(mut self, index: usize, length: u64) -> TestLayer {
        self.lengths.push((index, length));
        self
    }

    fn write_record(&self, version: u16, out: &mut Vec<u8>) {
        for v in [self.top, self.left, self.bottom, self.right] {
            out.extend_from_slice(&v.to_be_bytes());
        }
        out.extend_from_slice(&(self.channels.len() as u16).to_be_bytes());

        for (index, (id, data)) in self.channels.iter().enumerate() {
            let length = self
                .lengths
                .iter()
                .find(|(i, _)| *i == index)
                .map_or(data.len() as u64, |(_, length)| *length);

            out.extend_from_slice(&id.to_be_bytes());
            write_length(version, length, out);
        }
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.blend_mode);
        out.push(self.opacity);
        out.push(u8::from(self.clipping));
        out.push(self.flags);
        // filler
        out.push(0);

        let mut extra = Vec::new();
        extra.extend_from_slice(&(self.mask.len() as u32).to_be_bytes());
        extra.extend_from_slice(&self.mask);
        extra.extend_from_slice(&(self.ranges.len() as u32).to_be_bytes());
        extra.extend_from_slice(&self.ranges);
        extra.extend(pascal_string(&self.name, 4));
        extra.extend_from_slice(&self.extra);

        out.extend_from_slice(&(extra.len() as u32).to_be_bytes());
        out.extend(extra);
    }
}

pub fn pascal_string(name: &str, padding: usize) -> Vec<u8> {
    let mut out = vec![name.len() as u8];
    out.extend_from_slice(name.as_bytes());
    while out.len() % padding != 0 {
        out.push(0);
    }
    out
}

fn write_length(version: u16, length: u64, out: &mut Vec<u8>) {
    if version == 1 {
        out.extend_from_slice(&(length as u32).to_be_bytes());
    } else {
        out.extend_from_slice(&length.to_be_bytes());
    }
}

/// Fields of the fixed header
pub struct Header {
    pub signature:  [u8; 4],
    pub version:    u16,
    pub reserved:   [u8; 6],
    pub channels:   u16,
    pub height:     u32,
    pub width:      u32,
    pub depth:      u16,
    pub color_mode: u16
}

impl Header {
    pub fn new(version: u16) -> Header {
        Header {
            signature: *b"8BPS",
            version,
            reserved: [0; 6],
            channels: 4,
            height: 16,
            width: 16,
            depth: 8,
            color_mode: 3
        }
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.version.to_be_bytes());
        out.extend_from_slice(&self.reserved);
        out.extend_from_slice(&self.channels.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.width.to_be_bytes());
        out.extend_from_slice(&self.depth.to_be_bytes());
        out.extend_from_slice(&self.color_mode.to_be_bytes());
    }
}

/// Build a complete document
pub struct PsdBuilder {
    pub header:          Header,
    pub color_mode_data: Vec<u8>,
    pub resources:       Vec<u8>,
    pub layers:          Vec<TestLayer>,
    /// write the layer count negated
    pub negative_count:  bool,
    /// write a layer info length of zero even though layers exist
    pub zero_layer_info: bool,
    /// bytes after layer info inside the layer and mask block
    pub global_mask:     Vec<u8>
}

impl PsdBuilder {
    pub fn new(version: u16) -> PsdBuilder {
        PsdBuilder {
            header:          Header::new(version),
            color_mode_data: Vec::new(),
            resources:       Vec::new(),
            layers:          Vec::new(),
            negative_count:  false,
            zero_layer_info: false,
            global_mask:     vec![0, 0, 0, 0]
        }
    }

    pub fn layer(mut self, layer: TestLayer) -> PsdBuilder {
        self.layers.push(layer);
        self
    }

    /// Layer info contents, without the length field
    pub fn layer_info(&self) -> Vec<u8> {
        let version = self.header.version;
        let mut info = Vec::new();

        let count = self.layers.len() as i16;
        let count = if self.negative_count { -count } else { count };
        info.extend_from_slice(&count.to_be_bytes());

        for layer in &self.layers {
            layer.write_record(version, &mut info);
        }
        for layer in &self.layers {
            for (_, data) in &layer.channels {
                info.extend_from_slice(data);
            }
        }
        info
    }

    pub fn build(&self) -> Vec<u8> {
        let version = self.header.version;
        let mut out = Vec::new();

        self.header.write(&mut out);

        out.extend_from_slice(&(self.color_mode_data.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.color_mode_data);
        out.extend_from_slice(&(self.resources.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.resources);

        let mut info = self.layer_info();
        let mut info_length = info.len() as u64;

        if info_length % 2 == 1 {
            // odd length is stored as is, the reader rounds it up
            info.push(0);
        }
        if self.zero_layer_info {
            info.clear();
            info_length = 0;
        }

        let mut block = Vec::new();
        write_length(version, info_length, &mut block);
        block.extend(info);
        block.extend_from_slice(&self.global_mask);

        write_length(version, block.len() as u64, &mut out);
        out.extend(block);

        out
    }
}

/// Bytes of a deterministic plane used across tests
pub fn gradient(size: usize, seed: u8) -> Vec<u8> {
    (0..size)
        .map(|i| (i as u8).wrapping_mul(7).wrapping_add(seed))
        .collect()
}
