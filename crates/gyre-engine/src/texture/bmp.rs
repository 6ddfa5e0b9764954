use std::fmt;

/// Decoded bitmap: dimensions plus raw BGR pixel rows, bottom-up as
/// stored in the file. The layout matches what `GL_BGR` upload expects.
#[derive(Debug, Clone, PartialEq)]
pub struct BmpImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// A BMP decode failure.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BmpError {
    /// Shorter than the 54-byte header.
    TooShort,
    /// Missing the `BM` signature.
    BadMagic,
    /// Only uncompressed 24-bpp files are supported.
    Unsupported { bits_per_pixel: u16, compression: u32 },
    /// Header promises more pixel data than the file holds.
    TruncatedPixelData { expected: usize, available: usize },
}

impl fmt::Display for BmpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmpError::TooShort => f.write_str("file is shorter than a BMP header"),
            BmpError::BadMagic => f.write_str("missing BM signature; not a BMP file"),
            BmpError::Unsupported { bits_per_pixel, compression } => write!(
                f,
                "unsupported BMP variant ({bits_per_pixel} bpp, compression {compression}); \
                 only uncompressed 24 bpp is handled",
            ),
            BmpError::TruncatedPixelData { expected, available } => write!(
                f,
                "pixel data truncated: header promises {expected} bytes, file has {available}",
            ),
        }
    }
}

impl std::error::Error for BmpError {}

const HEADER_LEN: usize = 54;

/// Decodes an uncompressed 24-bpp BMP.
///
/// Header fields read at their fixed offsets: pixel-data position (0x0A),
/// width (0x12), height (0x16), bits per pixel (0x1C), compression (0x1E),
/// image size (0x22). A zero pixel-data position defaults to 54 and a zero
/// image size to `width * height * 3`, as writers commonly leave both
/// unset.
pub fn decode(bytes: &[u8]) -> Result<BmpImage, BmpError> {
    if bytes.len() < HEADER_LEN {
        return Err(BmpError::TooShort);
    }
    if bytes[0] != b'B' || bytes[1] != b'M' {
        return Err(BmpError::BadMagic);
    }

    let bits_per_pixel = read_u16_le(bytes, 0x1C);
    let compression = read_u32_le(bytes, 0x1E);
    if bits_per_pixel != 24 || compression != 0 {
        return Err(BmpError::Unsupported { bits_per_pixel, compression });
    }

    let width = read_u32_le(bytes, 0x12);
    let height = read_u32_le(bytes, 0x16);

    let mut data_pos = read_u32_le(bytes, 0x0A) as usize;
    if data_pos == 0 {
        data_pos = HEADER_LEN;
    }
    let mut image_size = read_u32_le(bytes, 0x22) as usize;
    if image_size == 0 {
        image_size = width as usize * height as usize * 3;
    }

    let end = data_pos.saturating_add(image_size);
    if end > bytes.len() {
        return Err(BmpError::TruncatedPixelData {
            expected: image_size,
            available: bytes.len().saturating_sub(data_pos.min(bytes.len())),
        });
    }

    Ok(BmpImage {
        width,
        height,
        pixels: bytes[data_pos..end].to_vec(),
    })
}

fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a minimal 24-bpp BMP with the given bottom-up BGR rows.
    fn make_bmp(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_LEN];
        out[0] = b'B';
        out[1] = b'M';
        out[0x0A..0x0E].copy_from_slice(&(HEADER_LEN as u32).to_le_bytes());
        out[0x12..0x16].copy_from_slice(&width.to_le_bytes());
        out[0x16..0x1A].copy_from_slice(&height.to_le_bytes());
        out[0x1C..0x1E].copy_from_slice(&24u16.to_le_bytes());
        out[0x22..0x26].copy_from_slice(&(pixels.len() as u32).to_le_bytes());
        out.extend_from_slice(pixels);
        out
    }

    #[test]
    fn decodes_2x2() {
        // Bottom row first, BGR per pixel.
        let pixels: Vec<u8> = vec![
            255, 0, 0, /* blue */ 0, 255, 0, /* green */
            0, 0, 255, /* red */ 255, 255, 255, /* white */
        ];
        let img = decode(&make_bmp(2, 2, &pixels)).unwrap();
        assert_eq!(img.width, 2);
        assert_eq!(img.height, 2);
        assert_eq!(img.pixels, pixels);
    }

    #[test]
    fn zero_size_fields_use_defaults() {
        let pixels = vec![1u8; 2 * 2 * 3];
        let mut bytes = make_bmp(2, 2, &pixels);
        // Blank out data position and image size; both have defined defaults.
        bytes[0x0A..0x0E].fill(0);
        bytes[0x22..0x26].fill(0);
        let img = decode(&bytes).unwrap();
        assert_eq!(img.pixels.len(), 12);
    }

    #[test]
    fn rejects_short_input() {
        assert_eq!(decode(&[0u8; 10]), Err(BmpError::TooShort));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = make_bmp(1, 1, &[0, 0, 0]);
        bytes[0] = b'P';
        assert_eq!(decode(&bytes), Err(BmpError::BadMagic));
    }

    #[test]
    fn rejects_32bpp() {
        let mut bytes = make_bmp(1, 1, &[0, 0, 0]);
        bytes[0x1C..0x1E].copy_from_slice(&32u16.to_le_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(BmpError::Unsupported { bits_per_pixel: 32, .. })
        ));
    }

    #[test]
    fn rejects_truncated_pixel_data() {
        let mut bytes = make_bmp(4, 4, &[0u8; 4 * 4 * 3]);
        bytes.truncate(HEADER_LEN + 5);
        assert!(matches!(decode(&bytes), Err(BmpError::TruncatedPixelData { .. })));
    }
}
