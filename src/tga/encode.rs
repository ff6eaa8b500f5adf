//! TGA encoder: uncompressed 24-bit truecolor, top-left origin.

use alloc::vec::Vec;
use enough::Stop;
use imgref::ImgRef;
use rgb::RGB8;

use super::header::TgaHeader;
use crate::error::{FormatError, TgaError};

/// Descriptor for the output: top-to-bottom rows, no alpha bits.
pub(crate) const TOP_LEFT: u8 = 0x20;

/// Encode RGB pixels to an uncompressed 24-bit TGA.
pub(crate) fn encode_rgb24(image: ImgRef<'_, RGB8>, stop: &dyn Stop) -> Result<Vec<u8>, TgaError> {
    let w = image.width();
    let h = image.height();
    if w == 0 || h == 0 {
        return Err(FormatError::InvalidDimensions {
            width: w,
            height: h,
        }
        .into());
    }
    let (Ok(width), Ok(height)) = (u16::try_from(w), u16::try_from(h)) else {
        return Err(FormatError::DimensionOverflow {
            width: w,
            height: h,
        }
        .into());
    };

    let header = TgaHeader {
        image_type: 2,
        width,
        height,
        pixel_depth: 24,
        descriptor: TOP_LEFT,
        ..Default::default()
    };
    let mut out = Vec::with_capacity(TgaHeader::SIZE + w * h * 3);
    header.write_to(&mut out);

    stop.check()?;

    for (row_idx, row) in image.rows().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    #[test]
    fn header_and_bgr_rows() {
        let pixels = vec![
            RGB8::new(1, 2, 3),
            RGB8::new(4, 5, 6),
            RGB8::new(7, 8, 9),
            RGB8::new(10, 11, 12),
        ];
        let img = ImgRef::new(&pixels[..], 2, 2);
        let out = encode_rgb24(img, &Unstoppable).unwrap();
        assert_eq!(
            &out[..18],
            &[0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 2, 0, 24, 0x20]
        );
        assert_eq!(&out[18..], &[3, 2, 1, 6, 5, 4, 9, 8, 7, 12, 11, 10]);
    }

    #[test]
    fn strided_source_rows() {
        // 2x1 view into a buffer with stride 3
        let pixels = vec![RGB8::new(1, 1, 1), RGB8::new(2, 2, 2), RGB8::new(9, 9, 9)];
        let img = ImgRef::new_stride(&pixels[..], 2, 1, 3);
        let out = encode_rgb24(img, &Unstoppable).unwrap();
        assert_eq!(&out[18..], &[1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn width_overflow() {
        let pixels = vec![RGB8::new(0, 0, 0); 65536];
        let img = ImgRef::new(&pixels[..], 65536, 1);
        assert!(matches!(
            encode_rgb24(img, &Unstoppable),
            Err(TgaError::Format(FormatError::DimensionOverflow {
                width: 65536,
                height: 1
            }))
        ));
    }

    #[test]
    fn max_width_fits() {
        let pixels = vec![RGB8::new(0, 0, 0); 65535];
        let img = ImgRef::new(&pixels[..], 65535, 1);
        let out = encode_rgb24(img, &Unstoppable).unwrap();
        assert_eq!(&out[12..14], &[0xff, 0xff]);
    }
}
