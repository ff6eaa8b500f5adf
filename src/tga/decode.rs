//! TGA decoder: header, image ID, color map, raw or RLE pixel data.

use alloc::vec::Vec;
use enough::Stop;
use rgb::RGBA8;

use super::colormap::ColorMap;
use super::header::{Origin, TgaHeader};
use super::rle::decode_rle;
use super::unpack::{Bgr24, Bgr555, Bgra32, Gray8, GrayAlpha8, Indexed8, Indexed16, Unpack};
use crate::error::{FormatError, TgaError};
use crate::limits::Limits;
use crate::pixel::PixelFormat;

/// Everything the decoder learned about an image, plus its pixels
/// in top-left order.
pub(crate) struct DecodedTga {
    pub header: TgaHeader,
    pub format: PixelFormat,
    pub pixels: Vec<RGBA8>,
}

/// Parse and validate everything up to the pixel data.
pub(crate) fn parse_header(data: &[u8]) -> Result<(TgaHeader, PixelFormat), FormatError> {
    let header = TgaHeader::parse(data)?;
    let format = header.pixel_format()?;
    let cmap_offset = header.color_map_offset();
    if data.len() < cmap_offset {
        return Err(FormatError::TruncatedImageId {
            declared: usize::from(header.id_length),
            available: data.len() - TgaHeader::SIZE,
        });
    }
    Ok((header, format))
}

pub(crate) fn decode_tga(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodedTga, TgaError> {
    let (header, format) = parse_header(data)?;
    let kind = header.kind()?;
    log::debug!(
        "tga: type {} ({:?}, rle={}), {}x{}, depth {}, descriptor {:#04x}, {:?}",
        header.image_type,
        kind.kind,
        kind.rle,
        header.width,
        header.height,
        header.pixel_depth,
        header.descriptor,
        format,
    );

    let color_map = if matches!(format, PixelFormat::Indexed { .. }) {
        Some(ColorMap::parse(
            &data[header.color_map_offset()..],
            &header.color_map,
        )?)
    } else {
        None
    };

    let width = usize::from(header.width);
    let height = usize::from(header.height);
    if let Some(limits) = limits {
        limits.check(u32::from(header.width), u32::from(header.height))?;
    }
    let count = width * height;
    let out_bytes = count
        .checked_mul(core::mem::size_of::<RGBA8>())
        .ok_or_else(|| TgaError::LimitExceeded("pixel buffer size overflows usize".into()))?;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes)?;
    }
    stop.check()?;

    let offset = header.pixel_data_offset()?;
    let run = PixelRun {
        data,
        offset,
        width,
        count,
        rle: kind.rle,
        stop,
    };
    let mut pixels = match format {
        PixelFormat::Indexed { index_bits, .. } => {
            let map = color_map.as_ref().ok_or(FormatError::MissingColorMap)?;
            if index_bits == 8 {
                run.decode(&Indexed8(map))?
            } else {
                run.decode(&Indexed16(map))?
            }
        }
        PixelFormat::Grayscale { alpha: false } => run.decode(&Gray8)?,
        PixelFormat::Grayscale { alpha: true } => run.decode(&GrayAlpha8)?,
        PixelFormat::TrueColor16 { alpha } => run.decode(&Bgr555 { alpha })?,
        PixelFormat::TrueColor24 => run.decode(&Bgr24)?,
        PixelFormat::TrueColor32 => run.decode(&Bgra32)?,
    };
    orient(&mut pixels, width, header.origin());

    Ok(DecodedTga {
        header,
        format,
        pixels,
    })
}

/// Location and shape of the pixel stream.
struct PixelRun<'a> {
    data: &'a [u8],
    offset: usize,
    width: usize,
    count: usize,
    rle: bool,
    stop: &'a dyn Stop,
}

impl PixelRun<'_> {
    fn decode<U: Unpack>(&self, unpack: &U) -> Result<Vec<RGBA8>, TgaError> {
        if self.rle {
            decode_rle(
                unpack,
                self.data,
                self.offset,
                self.width,
                self.count,
                self.stop,
            )
        } else {
            self.decode_raw(unpack)
        }
    }

    fn decode_raw<U: Unpack>(&self, unpack: &U) -> Result<Vec<RGBA8>, TgaError> {
        let needed = self.count * U::BYTES;
        let available = self.data.len().saturating_sub(self.offset);
        let src = self
            .data
            .get(self.offset..)
            .and_then(|rest| rest.get(..needed))
            .ok_or(FormatError::TruncatedPixelData {
                offset: self.data.len(),
                decoded: available / U::BYTES,
                expected: self.count,
            })?;

        let mut out = Vec::with_capacity(self.count);
        for (row_idx, row) in src.chunks_exact(self.width * U::BYTES).enumerate() {
            if row_idx % 16 == 0 {
                self.stop.check()?;
            }
            for px in row.chunks_exact(U::BYTES) {
                out.push(unpack.unpack(px)?);
            }
        }
        Ok(out)
    }
}

/// Reorder stored pixels to top-to-bottom, left-to-right.
fn orient(pixels: &mut [RGBA8], width: usize, origin: Origin) {
    if origin.is_right() {
        for row in pixels.chunks_exact_mut(width) {
            row.reverse();
        }
    }
    if origin.is_bottom() {
        let height = pixels.len() / width;
        for y in 0..height / 2 {
            let (top, bottom) = pixels.split_at_mut((height - 1 - y) * width);
            top[y * width..(y + 1) * width].swap_with_slice(&mut bottom[..width]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    fn gray_tga(image_type: u8, descriptor: u8, w: u16, h: u16, body: &[u8]) -> Vec<u8> {
        let header = TgaHeader {
            image_type,
            width: w,
            height: h,
            pixel_depth: 8,
            descriptor,
            ..Default::default()
        };
        let mut out = vec![];
        header.write_to(&mut out);
        out.extend_from_slice(body);
        out
    }

    fn lumas(decoded: &DecodedTga) -> Vec<u8> {
        decoded.pixels.iter().map(|p| p.r).collect()
    }

    #[test]
    fn orient_all_corners() {
        let body = [1, 2, 3, 4, 5, 6];
        let cases = [
            (0x20, [1, 2, 3, 4, 5, 6]),
            (0x30, [3, 2, 1, 6, 5, 4]),
            (0x00, [4, 5, 6, 1, 2, 3]),
            (0x10, [6, 5, 4, 3, 2, 1]),
        ];
        for (descriptor, expected) in cases {
            let data = gray_tga(3, descriptor, 3, 2, &body);
            let decoded = decode_tga(&data, None, &Unstoppable).unwrap();
            assert_eq!(lumas(&decoded), expected, "descriptor {descriptor:#x}");
        }
    }

    #[test]
    fn odd_height_bottom_origin() {
        let data = gray_tga(3, 0x00, 1, 3, &[1, 2, 3]);
        let decoded = decode_tga(&data, None, &Unstoppable).unwrap();
        assert_eq!(lumas(&decoded), [3, 2, 1]);
    }

    #[test]
    fn image_id_is_skipped() {
        let mut data = gray_tga(3, 0x20, 2, 1, &[]);
        data[0] = 3;
        data.extend_from_slice(b"abc");
        data.extend_from_slice(&[9, 8]);
        let decoded = decode_tga(&data, None, &Unstoppable).unwrap();
        assert_eq!(lumas(&decoded), [9, 8]);
    }

    #[test]
    fn truncated_image_id() {
        let mut data = gray_tga(3, 0x20, 2, 1, &[1]);
        data[0] = 5;
        assert!(matches!(
            parse_header(&data),
            Err(FormatError::TruncatedImageId {
                declared: 5,
                available: 1
            })
        ));
    }

    #[test]
    fn truncated_raw_pixels() {
        let data = gray_tga(3, 0x20, 2, 2, &[1, 2, 3]);
        match decode_tga(&data, None, &Unstoppable) {
            Err(TgaError::Format(FormatError::TruncatedPixelData {
                offset,
                decoded,
                expected,
            })) => {
                assert_eq!(offset, 21);
                assert_eq!(decoded, 3);
                assert_eq!(expected, 4);
            }
            Err(other) => panic!("expected TruncatedPixelData, got {other:?}"),
            Ok(_) => panic!("expected TruncatedPixelData"),
        }
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut data = gray_tga(3, 0x20, 1, 1, &[42]);
        data.extend_from_slice(b"TRUEVISION-XFILE.\0");
        let decoded = decode_tga(&data, None, &Unstoppable).unwrap();
        assert_eq!(lumas(&decoded), [42]);
    }

    #[test]
    fn memory_limit_checked_before_decode() {
        let data = gray_tga(3, 0x20, 4, 4, &[0; 16]);
        let limits = Limits {
            max_memory_bytes: Some(63),
            ..Default::default()
        };
        assert!(matches!(
            decode_tga(&data, Some(&limits), &Unstoppable),
            Err(TgaError::LimitExceeded(_))
        ));
    }
}
