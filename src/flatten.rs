//! Alpha flattening: composite RGBA8 over an opaque background.

use alloc::vec::Vec;
use imgref::{ImgRef, ImgVec};
use rgb::{RGB8, RGBA8};

/// Opaque white, the default flattening background.
pub const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

/// Composite every pixel over `background` and drop alpha.
///
/// Each channel becomes `round((c·a + bg·(255−a)) / 255)`. Fully opaque
/// pixels pass through unchanged and fully transparent ones become the
/// background exactly. The result is a new buffer of the same size.
pub fn flatten(image: ImgRef<'_, RGBA8>, background: RGB8) -> ImgVec<RGB8> {
    let mut out = Vec::with_capacity(image.width() * image.height());
    out.extend(image.pixels().map(|px| composite(px, background)));
    ImgVec::new(out, image.width(), image.height())
}

#[inline]
fn composite(px: RGBA8, bg: RGB8) -> RGB8 {
    let a = u32::from(px.a);
    let blend = |c: u8, b: u8| ((u32::from(c) * a + u32::from(b) * (255 - a) + 127) / 255) as u8;
    RGB8::new(blend(px.r, bg.r), blend(px.g, bg.g), blend(px.b, bg.b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn half_alpha_over_white() {
        assert_eq!(
            composite(RGBA8::new(10, 20, 30, 128), WHITE),
            RGB8::new(132, 137, 142)
        );
    }

    #[test]
    fn alpha_extremes_are_exact() {
        assert_eq!(composite(RGBA8::new(10, 20, 30, 0), WHITE), WHITE);
        assert_eq!(
            composite(RGBA8::new(10, 20, 30, 255), WHITE),
            RGB8::new(10, 20, 30)
        );
        let bg = RGB8::new(1, 2, 3);
        assert_eq!(composite(RGBA8::new(200, 200, 200, 0), bg), bg);
    }

    #[test]
    fn opaque_is_identity_for_every_value() {
        for c in 0..=255u8 {
            let out = composite(RGBA8::new(c, 255 - c, c / 2, 255), RGB8::new(7, 7, 7));
            assert_eq!(out, RGB8::new(c, 255 - c, c / 2));
        }
    }

    #[test]
    fn keeps_dimensions_and_ignores_stride() {
        let pixels = vec![
            RGBA8::new(1, 2, 3, 255),
            RGBA8::new(4, 5, 6, 255),
            RGBA8::new(0, 0, 0, 0),
        ];
        let img = ImgRef::new_stride(&pixels[..], 1, 2, 2);
        let out = flatten(img, WHITE);
        assert_eq!(out.width(), 1);
        assert_eq!(out.height(), 2);
        assert_eq!(out.buf(), &[RGB8::new(1, 2, 3), WHITE]);
    }
}
