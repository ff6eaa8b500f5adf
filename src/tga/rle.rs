//! TGA run-length packet decoding.
//!
//! Each packet starts with one byte. High bit set: the next pixel repeats
//! `(byte & 0x7f) + 1` times. High bit clear: `(byte & 0x7f) + 1` literal
//! pixels follow. Packets may cross scanline boundaries.

use alloc::vec::Vec;
use enough::Stop;
use rgb::RGBA8;

use super::unpack::Unpack;
use crate::error::{FormatError, TgaError};

/// Decode `count` pixels of RLE packets starting at `offset`.
///
/// Pixels a final packet produces past `count` are discarded.
pub(crate) fn decode_rle<U: Unpack>(
    unpack: &U,
    data: &[u8],
    offset: usize,
    width: usize,
    count: usize,
    stop: &dyn Stop,
) -> Result<Vec<RGBA8>, TgaError> {
    let truncated = |pos: usize, decoded: usize| FormatError::TruncatedPixelData {
        offset: pos,
        decoded,
        expected: count,
    };

    // A two-byte packet expands to at most 128 pixels.
    let max_pixels = data.len().saturating_sub(offset).saturating_mul(64);
    let mut out = Vec::with_capacity(count.min(max_pixels));
    let mut pos = offset;
    let mut next_check = 0usize;
    while out.len() < count {
        if out.len() >= next_check {
            stop.check()?;
            next_check = out.len() + width * 16;
        }

        let packet = *data.get(pos).ok_or_else(|| truncated(pos, out.len()))?;
        pos += 1;
        let run = usize::from(packet & 0x7f) + 1;
        let take = run.min(count - out.len());

        if packet & 0x80 != 0 {
            let src = data
                .get(pos..pos + U::BYTES)
                .ok_or_else(|| truncated(pos, out.len()))?;
            let px = unpack.unpack(src)?;
            out.extend(core::iter::repeat_n(px, take));
            pos += U::BYTES;
        } else {
            let src = data
                .get(pos..pos + take * U::BYTES)
                .ok_or_else(|| truncated(pos, out.len()))?;
            for px in src.chunks_exact(U::BYTES) {
                out.push(unpack.unpack(px)?);
            }
            pos += run * U::BYTES;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tga::unpack::{Bgr24, Gray8};
    use enough::Unstoppable;

    #[test]
    fn run_and_raw_packets() {
        // run of 3 × gray 10, then raw 2: 20, 30
        let data = [0x82, 10, 0x01, 20, 30];
        let px = decode_rle(&Gray8, &data, 0, 5, 5, &Unstoppable).unwrap();
        let lumas: Vec<u8> = px.iter().map(|p| p.r).collect();
        assert_eq!(lumas, [10, 10, 10, 20, 30]);
    }

    #[test]
    fn packet_spanning_rows() {
        // 2x2 image, one run packet of 4 pixels
        let data = [0x83, 1, 2, 3];
        let px = decode_rle(&Bgr24, &data, 0, 2, 4, &Unstoppable).unwrap();
        assert_eq!(px, [RGBA8::new(3, 2, 1, 255); 4]);
    }

    #[test]
    fn overlong_final_packet_is_clamped() {
        let data = [0xff, 7];
        let px = decode_rle(&Gray8, &data, 0, 3, 3, &Unstoppable).unwrap();
        assert_eq!(px.len(), 3);
    }

    #[test]
    fn truncated_stream() {
        let data = [0x00, 5, 0x81];
        let err = decode_rle(&Gray8, &data, 0, 4, 4, &Unstoppable).unwrap_err();
        match err {
            TgaError::Format(FormatError::TruncatedPixelData {
                offset,
                decoded,
                expected,
            }) => {
                assert_eq!(offset, 3);
                assert_eq!(decoded, 1);
                assert_eq!(expected, 4);
            }
            other => panic!("expected TruncatedPixelData, got {other:?}"),
        }
    }
}
