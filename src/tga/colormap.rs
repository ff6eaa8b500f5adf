//! Color map (palette) parsing and lookup.

use alloc::vec::Vec;
use rgb::RGBA8;

use super::header::ColorMapSpec;
use crate::error::FormatError;
use crate::pixel::unpack_bgr555;

/// Palette entries converted to RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ColorMap {
    first_entry: u16,
    entries: Vec<RGBA8>,
}

impl ColorMap {
    /// Parse `spec.length` entries from the start of `data`.
    pub(crate) fn parse(data: &[u8], spec: &ColorMapSpec) -> Result<Self, FormatError> {
        let needed = spec.byte_len();
        let bytes = data.get(..needed).ok_or(FormatError::TruncatedColorMap {
            needed,
            available: data.len(),
        })?;
        let entry_bytes = usize::from(spec.entry_size).div_ceil(8);
        let entries = match spec.entry_size {
            15 | 16 => bytes
                .chunks_exact(entry_bytes)
                .map(|c| {
                    let (r, g, b) = unpack_bgr555(u16::from_le_bytes([c[0], c[1]]));
                    RGBA8::new(r, g, b, 255)
                })
                .collect(),
            24 => bytes
                .chunks_exact(entry_bytes)
                .map(|c| RGBA8::new(c[2], c[1], c[0], 255))
                .collect(),
            32 => bytes
                .chunks_exact(entry_bytes)
                .map(|c| RGBA8::new(c[2], c[1], c[0], c[3]))
                .collect(),
            other => return Err(FormatError::UnsupportedColorMapDepth(other)),
        };
        Ok(Self {
            first_entry: spec.first_entry,
            entries,
        })
    }

    /// Look up a stored pixel index.
    #[inline]
    pub(crate) fn get(&self, index: u16) -> Result<RGBA8, FormatError> {
        index
            .checked_sub(self.first_entry)
            .and_then(|i| self.entries.get(usize::from(i)))
            .copied()
            .ok_or(FormatError::ColorMapIndexOutOfRange {
                index,
                first_entry: self.first_entry,
                length: self.entries.len() as u16,
            })
    }
}
