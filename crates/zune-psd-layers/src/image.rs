/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use crate::channel::{ChannelRole, PsdChannel};

/// Output bytes per input byte of the longest PackBits run, two bytes expand to 128
const MAX_RLE_EXPANSION: u64 = 64;

/// Pixels of a single layer, stored planar
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ImagePlanes {
    /// Exactly one red, green, blue and alpha channel,
    /// each plane is `width*height` bytes
    Rgba {
        width:  usize,
        height: usize,
        red:    Vec<u8>,
        green:  Vec<u8>,
        blue:   Vec<u8>,
        alpha:  Vec<u8>
    },
    /// Any other channel layout, or pixel data we could not decode
    Unsupported
}

impl ImagePlanes {
    /// Classify a layer from its channels, allocating zeroed planes
    /// for RGBA layers.
    ///
    /// RGBA requires exactly one channel of each of red, green, blue and alpha,
    /// any duplicate, missing or extra channel makes the layer unsupported.
    ///
    /// A channel whose data is too short to fill a plane even at the best
    /// RLE ratio also makes the layer unsupported, no planes are allocated for it.
    pub fn for_channels(width: usize, height: usize, channels: &[PsdChannel]) -> ImagePlanes {
        if !is_rgba_layout(channels.iter().map(PsdChannel::role)) {
            return ImagePlanes::Unsupported;
        }
        let Some(size) = width.checked_mul(height) else {
            return ImagePlanes::Unsupported;
        };
        let fits = |channel: &PsdChannel| {
            channel.encoded_length().saturating_mul(MAX_RLE_EXPANSION) >= size as u64
        };
        if !channels.iter().all(fits) {
            return ImagePlanes::Unsupported;
        }

        ImagePlanes::Rgba {
            width,
            height,
            red: vec![0; size],
            green: vec![0; size],
            blue: vec![0; size],
            alpha: vec![0; size]
        }
    }

    pub const fn is_rgba(&self) -> bool {
        matches!(self, ImagePlanes::Rgba { .. })
    }

    /// Width and height of the planes
    ///
    /// Unsupported images carry no planes and report `(0, 0)`,
    /// the layer size is still available from
    /// [`PsdLayer::width`](crate::PsdLayer::width) and
    /// [`PsdLayer::height`](crate::PsdLayer::height)
    pub const fn dimensions(&self) -> (usize, usize) {
        match self {
            ImagePlanes::Rgba { width, height, .. } => (*width, *height),
            ImagePlanes::Unsupported => (0, 0)
        }
    }

    /// Plane storing `role`, `None` for unsupported images
    /// and roles outside RGBA
    pub fn plane(&self, role: ChannelRole) -> Option<&[u8]> {
        match self {
            ImagePlanes::Rgba {
                red,
                green,
                blue,
                alpha,
                ..
            } => match role {
                ChannelRole::Red => Some(red),
                ChannelRole::Green => Some(green),
                ChannelRole::Blue => Some(blue),
                ChannelRole::Alpha => Some(alpha),
                ChannelRole::Other(_) => None
            },
            ImagePlanes::Unsupported => None
        }
    }

    /// Interleave planes into `RGBA` order, 4 bytes per pixel
    ///
    /// Returns `None` for unsupported images
    pub fn to_rgba_interleaved(&self) -> Option<Vec<u8>> {
        match self {
            ImagePlanes::Rgba {
                red,
                green,
                blue,
                alpha,
                ..
            } => {
                let mut out = vec![0; red.len() * 4];

                for (((pixel, r), g), (b, a)) in out
                    .chunks_exact_mut(4)
                    .zip(red)
                    .zip(green)
                    .zip(blue.iter().zip(alpha))
                {
                    pixel[0] = *r;
                    pixel[1] = *g;
                    pixel[2] = *b;
                    pixel[3] = *a;
                }
                Some(out)
            }
            ImagePlanes::Unsupported => None
        }
    }
}

fn is_rgba_layout(roles: impl Iterator<Item = ChannelRole>) -> bool {
    // alpha, red, green, blue
    let mut counts = [0_usize; 4];

    for role in roles {
        let index = match role {
            ChannelRole::Alpha => 0,
            ChannelRole::Red => 1,
            ChannelRole::Green => 2,
            ChannelRole::Blue => 3,
            ChannelRole::Other(_) => return false
        };
        counts[index] += 1;
    }
    counts == [1; 4]
}

#[cfg(test)]
mod tests {
    use crate::channel::ChannelRole::{self, Alpha, Blue, Green, Other, Red};
    use zune_core::bytestream::ZCursor;

    use crate::channel::PsdChannel;
    use crate::cursor::ByteCursor;
    use crate::image::{is_rgba_layout, ImagePlanes};
    use crate::version::FormatVersion;

    fn classify(roles: &[ChannelRole]) -> bool {
        is_rgba_layout(roles.iter().copied())
    }

    #[test]
    fn test_rgba_layout() {
        assert!(classify(&[Alpha, Red, Green, Blue]));
        assert!(classify(&[Red, Green, Blue, Alpha]));
    }

    #[test]
    fn test_unsupported_layouts() {
        // duplicate red
        assert!(!classify(&[Red, Red, Green, Blue, Alpha]));
        // missing alpha
        assert!(!classify(&[Red, Green, Blue]));
        // layer mask alongside rgba
        assert!(!classify(&[Alpha, Red, Green, Blue, Other(-2)]));
        assert!(!classify(&[]));
    }

    #[test]
    fn test_unsupported_has_no_planes() {
        let image = ImagePlanes::for_channels(4, 4, &[]);

        assert!(!image.is_rgba());
        assert_eq!(image.dimensions(), (0, 0));
        assert_eq!(image.plane(Red), None);
        assert_eq!(image.to_rgba_interleaved(), None);
    }

    /// Red, green, blue and alpha channels each declaring `length` bytes
    fn rgba_channels(length: u32) -> Vec<PsdChannel> {
        let mut bytes = Vec::new();
        for id in [0_i16, 1, 2, -1] {
            bytes.extend_from_slice(&id.to_be_bytes());
            bytes.extend_from_slice(&length.to_be_bytes());
        }
        let mut cursor = ByteCursor::new(ZCursor::new(bytes));

        (0..4)
            .map(|_| PsdChannel::read(FormatVersion::V1, &mut cursor).unwrap())
            .collect()
    }

    #[test]
    fn test_channels_too_short_for_plane() {
        // two bytes of rle expand to at most 128
        let channels = rgba_channels(2);

        assert!(ImagePlanes::for_channels(8, 16, &channels).is_rgba());
        assert!(!ImagePlanes::for_channels(16, 16, &channels).is_rgba());
        assert!(!ImagePlanes::for_channels(300_000, 300_000, &channels).is_rgba());
        assert!(!ImagePlanes::for_channels(usize::MAX, 2, &channels).is_rgba());
    }

    #[test]
    fn test_interleave() {
        let image = ImagePlanes::Rgba {
            width:  2,
            height: 1,
            red:    vec![1, 5],
            green:  vec![2, 6],
            blue:   vec![3, 7],
            alpha:  vec![4, 8]
        };
        assert_eq!(image.plane(Green), Some(&[2_u8, 6][..]));
        assert_eq!(
            image.to_rgba_interleaved().unwrap(),
            vec![1, 2, 3, 4, 5, 6, 7, 8]
        );
    }
}
