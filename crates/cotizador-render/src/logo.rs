//! # Logo Loading
//!
//! Reads the company logo into a form a PDF image XObject can carry
//! directly. The logo is decoration: a missing file is silently skipped and
//! an unreadable one is skipped with a warning.
//!
//! ## Supported Inputs
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ Input                    │ Embedded as                                  │
//! ├──────────────────────────┼──────────────────────────────────────────────┤
//! │ JPEG (SOF0 / SOF2)       │ file bytes, /DCTDecode                       │
//! │ PNG gray / RGB           │ IDAT bytes, /FlateDecode + PNG predictor     │
//! │ PNG palette              │ IDAT bytes, /Indexed color space             │
//! │ PNG gray+alpha / RGBA    │ re-encoded without alpha, /FlateDecode       │
//! │ anything else            │ skipped (warning)                            │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```
//! Only 8-bit, non-interlaced PNGs are accepted.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use thiserror::Error;
use tracing::{debug, warn};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Largest accepted logo side, in pixels.
const MAX_DIMENSION: u32 = 8192;

/// Why a logo file could not be used.
#[derive(Debug, Error)]
pub enum LogoError {
    #[error("unsupported image: {0}")]
    Unsupported(String),

    #[error("corrupt image: {0}")]
    Corrupt(String),
}

/// Color space of the embedded samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpace {
    Gray,
    Rgb,
    Cmyk,
    /// Palette of packed RGB triplets.
    Indexed(Vec<u8>),
}

impl ColorSpace {
    /// Components per sample in the stream as stored.
    pub fn components(&self) -> u8 {
        match self {
            ColorSpace::Gray | ColorSpace::Indexed(_) => 1,
            ColorSpace::Rgb => 3,
            ColorSpace::Cmyk => 4,
        }
    }
}

/// Stream filter of the embedded samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    /// JPEG data, passed through.
    Dct,
    /// Zlib data; `png_predictor` means rows still carry PNG filter bytes.
    Flate { png_predictor: bool },
}

/// A decoded logo, ready to embed.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub filter: ImageFilter,
    pub data: Vec<u8>,
}

impl LogoImage {
    /// Height over width.
    pub fn aspect(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }
}

/// Loads the logo at `path`.
///
/// Returns `None` when the file does not exist or cannot be used; the
/// latter is logged.
pub fn load_logo(path: &Path) -> Option<LogoImage> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No logo file, rendering without it");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read logo, rendering without it");
            return None;
        }
    };

    match decode_logo(&bytes) {
        Ok(logo) => {
            debug!(
                path = %path.display(),
                width = logo.width,
                height = logo.height,
                "Logo loaded"
            );
            Some(logo)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Logo skipped");
            None
        }
    }
}

/// Decodes PNG or JPEG bytes, detected by signature.
pub fn decode_logo(bytes: &[u8]) -> Result<LogoImage, LogoError> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        decode_png(bytes)
    } else if bytes.starts_with(&[0xFF, 0xD8]) {
        decode_jpeg(bytes)
    } else {
        Err(LogoError::Unsupported("not a PNG or JPEG file".into()))
    }
}

// =============================================================================
// JPEG
// =============================================================================

fn decode_jpeg(bytes: &[u8]) -> Result<LogoImage, LogoError> {
    let mut pos = 2;

    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return Err(LogoError::Corrupt(format!("expected marker at byte {pos}")));
        }
        let marker = bytes[pos + 1];
        if marker == 0xFF {
            // fill byte
            pos += 1;
            continue;
        }
        if (0xD0..=0xD7).contains(&marker) || marker == 0x01 {
            pos += 2;
            continue;
        }

        let length = usize::from(u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]));
        let segment = bytes
            .get(pos + 4..pos + 2 + length)
            .ok_or_else(|| LogoError::Corrupt("truncated JPEG segment".into()))?;

        match marker {
            0xC0 | 0xC2 => return jpeg_frame(segment, bytes),
            0xC1 | 0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF => {
                return Err(LogoError::Unsupported(format!(
                    "JPEG frame type 0x{marker:02X}"
                )));
            }
            0xDA | 0xD9 => break,
            _ => pos += 2 + length,
        }
    }

    Err(LogoError::Corrupt("JPEG has no frame header".into()))
}

fn jpeg_frame(segment: &[u8], bytes: &[u8]) -> Result<LogoImage, LogoError> {
    if segment.len() < 6 {
        return Err(LogoError::Corrupt("short JPEG frame header".into()));
    }
    if segment[0] != 8 {
        return Err(LogoError::Unsupported(format!(
            "{}-bit JPEG",
            segment[0]
        )));
    }

    let height = u32::from(u16::from_be_bytes([segment[1], segment[2]]));
    let width = u32::from(u16::from_be_bytes([segment[3], segment[4]]));
    let color_space = match segment[5] {
        1 => ColorSpace::Gray,
        3 => ColorSpace::Rgb,
        4 => ColorSpace::Cmyk,
        n => return Err(LogoError::Unsupported(format!("JPEG with {n} components"))),
    };
    check_dimensions(width, height)?;

    Ok(LogoImage {
        width,
        height,
        color_space,
        filter: ImageFilter::Dct,
        data: bytes.to_vec(),
    })
}

// =============================================================================
// PNG
// =============================================================================

struct PngHeader {
    width: u32,
    height: u32,
    color_type: u8,
}

fn decode_png(bytes: &[u8]) -> Result<LogoImage, LogoError> {
    let mut header = None;
    let mut palette = Vec::new();
    let mut idat = Vec::new();
    let mut pos = PNG_SIGNATURE.len();

    while pos + 8 <= bytes.len() {
        let length =
            u32::from_be_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
                as usize;
        let kind = &bytes[pos + 4..pos + 8];
        let data = (pos + 8)
            .checked_add(length)
            .and_then(|end| bytes.get(pos + 8..end))
            .ok_or_else(|| LogoError::Corrupt("truncated PNG chunk".into()))?;

        match kind {
            b"IHDR" => header = Some(png_header(data)?),
            b"PLTE" => palette = data.to_vec(),
            b"IDAT" => idat.extend_from_slice(data),
            b"IEND" => break,
            _ => {}
        }
        // length + type + data + crc
        pos += 12 + length;
    }

    let header = header.ok_or_else(|| LogoError::Corrupt("PNG has no IHDR".into()))?;
    if idat.is_empty() {
        return Err(LogoError::Corrupt("PNG has no image data".into()));
    }

    let (width, height) = (header.width, header.height);
    let passthrough = |color_space: ColorSpace| -> Result<LogoImage, LogoError> {
        Ok(LogoImage {
            width,
            height,
            color_space,
            filter: ImageFilter::Flate { png_predictor: true },
            data: idat.clone(),
        })
    };

    match header.color_type {
        0 => passthrough(ColorSpace::Gray),
        2 => passthrough(ColorSpace::Rgb),
        3 if palette.is_empty() => Err(LogoError::Corrupt("palette PNG without PLTE".into())),
        3 => passthrough(ColorSpace::Indexed(palette.clone())),
        4 => strip_alpha(&header, &idat, 2, ColorSpace::Gray),
        6 => strip_alpha(&header, &idat, 4, ColorSpace::Rgb),
        other => Err(LogoError::Corrupt(format!("PNG color type {other}"))),
    }
}

fn png_header(data: &[u8]) -> Result<PngHeader, LogoError> {
    if data.len() != 13 {
        return Err(LogoError::Corrupt("bad IHDR length".into()));
    }
    let width = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    let height = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
    let (bit_depth, color_type, interlace) = (data[8], data[9], data[12]);

    if bit_depth != 8 {
        return Err(LogoError::Unsupported(format!("{bit_depth}-bit PNG")));
    }
    if interlace != 0 {
        return Err(LogoError::Unsupported("interlaced PNG".into()));
    }
    check_dimensions(width, height)?;

    Ok(PngHeader {
        width,
        height,
        color_type,
    })
}

/// Inflates, unfilters, drops the alpha channel and deflates again.
fn strip_alpha(
    header: &PngHeader,
    idat: &[u8],
    channels: usize,
    color_space: ColorSpace,
) -> Result<LogoImage, LogoError> {
    let mut raw = Vec::new();
    ZlibDecoder::new(idat)
        .read_to_end(&mut raw)
        .map_err(|e| LogoError::Corrupt(format!("PNG inflate: {e}")))?;

    let pixels = unfilter(&raw, header.width as usize, header.height as usize, channels)?;
    let color: Vec<u8> = pixels
        .chunks_exact(channels)
        .flat_map(|px| px[..channels - 1].iter().copied())
        .collect();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&color)
        .and_then(|()| encoder.finish())
        .map(|data| LogoImage {
            width: header.width,
            height: header.height,
            color_space,
            filter: ImageFilter::Flate { png_predictor: false },
            data,
        })
        .map_err(|e| LogoError::Corrupt(format!("re-deflate: {e}")))
}

/// Reverses PNG row filters (None, Sub, Up, Average, Paeth) for 8-bit samples.
fn unfilter(raw: &[u8], width: usize, height: usize, bpp: usize) -> Result<Vec<u8>, LogoError> {
    let too_large = || LogoError::Corrupt(format!("PNG of {width}x{height} overflows memory"));
    let stride = width.checked_mul(bpp).ok_or_else(too_large)?;
    let span = stride.checked_add(1).ok_or_else(too_large)?;
    let expected = height.checked_mul(span).ok_or_else(too_large)?;
    let size = height.checked_mul(stride).ok_or_else(too_large)?;
    if raw.len() < expected {
        return Err(LogoError::Corrupt("PNG data shorter than image".into()));
    }

    let mut out = vec![0u8; size];
    for row in 0..height {
        let filter = raw[row * span];
        let src = &raw[row * span + 1..(row + 1) * span];
        let (done, rest) = out.split_at_mut(row * stride);
        let prev = if row == 0 {
            None
        } else {
            Some(&done[(row - 1) * stride..])
        };
        let cur = &mut rest[..stride];

        for i in 0..stride {
            let a = if i >= bpp { cur[i - bpp] } else { 0 };
            let b = prev.map_or(0, |p| p[i]);
            let c = if i >= bpp { prev.map_or(0, |p| p[i - bpp]) } else { 0 };

            let predicted = match filter {
                0 => 0,
                1 => a,
                2 => b,
                3 => ((u16::from(a) + u16::from(b)) / 2) as u8,
                4 => paeth(a, b, c),
                other => {
                    return Err(LogoError::Corrupt(format!("PNG row filter {other}")));
                }
            };
            cur[i] = src[i].wrapping_add(predicted);
        }
    }
    Ok(out)
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = i16::from(a) + i16::from(b) - i16::from(c);
    let pa = (p - i16::from(a)).abs();
    let pb = (p - i16::from(b)).abs();
    let pc = (p - i16::from(c)).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), LogoError> {
    if width == 0 || height == 0 {
        return Err(LogoError::Corrupt(format!("image is {width}x{height}")));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(LogoError::Unsupported(format!(
            "image is {width}x{height}, limit is {MAX_DIMENSION} per side"
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut out = (data.len() as u32).to_be_bytes().to_vec();
        out.extend_from_slice(kind);
        out.extend_from_slice(data);
        // CRC is not checked by the decoder
        out.extend_from_slice(&[0, 0, 0, 0]);
        out
    }

    /// Builds a PNG with filter-0 rows from raw samples.
    pub(crate) fn png(width: u32, height: u32, color_type: u8, samples: &[u8]) -> Vec<u8> {
        let channels = match color_type {
            0 => 1,
            2 => 3,
            4 => 2,
            6 => 4,
            _ => 1,
        };
        let stride = width as usize * channels;
        let mut raw = Vec::new();
        for row in samples.chunks(stride) {
            raw.push(0);
            raw.extend_from_slice(row);
        }
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw).unwrap();
        let idat = encoder.finish().unwrap();

        let mut ihdr = width.to_be_bytes().to_vec();
        ihdr.extend_from_slice(&height.to_be_bytes());
        ihdr.extend_from_slice(&[8, color_type, 0, 0, 0]);

        let mut out = PNG_SIGNATURE.to_vec();
        out.extend(chunk(b"IHDR", &ihdr));
        out.extend(chunk(b"IDAT", &idat));
        out.extend(chunk(b"IEND", &[]));
        out
    }

    fn jpeg(width: u16, height: u16, components: u8) -> Vec<u8> {
        let mut out = vec![0xFF, 0xD8];
        // APP0 with a 2-byte payload
        out.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00]);
        out.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x0B, 8]);
        out.extend_from_slice(&height.to_be_bytes());
        out.extend_from_slice(&width.to_be_bytes());
        out.extend_from_slice(&[components, 1, 0x11, 0]);
        out.extend_from_slice(&[0xFF, 0xD9]);
        out
    }

    #[test]
    fn test_rgb_png_passthrough() {
        let bytes = png(2, 1, 2, &[255, 0, 0, 0, 255, 0]);
        let logo = decode_logo(&bytes).unwrap();

        assert_eq!((logo.width, logo.height), (2, 1));
        assert_eq!(logo.color_space, ColorSpace::Rgb);
        assert_eq!(logo.filter, ImageFilter::Flate { png_predictor: true });
    }

    #[test]
    fn test_rgba_png_drops_alpha() {
        let bytes = png(2, 1, 6, &[10, 20, 30, 255, 40, 50, 60, 0]);
        let logo = decode_logo(&bytes).unwrap();
        assert_eq!(logo.color_space, ColorSpace::Rgb);
        assert_eq!(logo.filter, ImageFilter::Flate { png_predictor: false });

        let mut pixels = Vec::new();
        ZlibDecoder::new(logo.data.as_slice())
            .read_to_end(&mut pixels)
            .unwrap();
        assert_eq!(pixels, [10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_unfilter_sub_up_paeth() {
        // 2x2 gray: row 0 Sub, row 1 Up
        let raw = [1, 10, 5, 2, 1, 1];
        assert_eq!(unfilter(&raw, 2, 2, 1).unwrap(), [10, 15, 11, 16]);

        assert_eq!(paeth(10, 20, 10), 20);
        assert_eq!(paeth(10, 20, 20), 10);
        assert!(unfilter(&[7, 0], 1, 1, 1).is_err());
        assert!(unfilter(&[0], 1, 1, 1).is_err());
    }

    #[test]
    fn test_oversized_header_is_rejected() {
        let mut bytes = png(1, 1, 6, &[1, 2, 3, 255]);
        // width and height follow the IHDR length and type
        bytes[16..24].copy_from_slice(&[0xFF; 8]);
        assert!(matches!(
            decode_logo(&bytes),
            Err(LogoError::Unsupported(_))
        ));

        assert!(matches!(
            unfilter(&[0; 8], usize::MAX, 2, 4),
            Err(LogoError::Corrupt(_))
        ));
        assert!(matches!(
            unfilter(&[0; 8], usize::MAX / 4, usize::MAX, 4),
            Err(LogoError::Corrupt(_))
        ));
        assert!(check_dimensions(MAX_DIMENSION, MAX_DIMENSION).is_ok());
        assert!(check_dimensions(MAX_DIMENSION + 1, 1).is_err());
    }

    #[test]
    fn test_jpeg_dimensions() {
        let logo = decode_logo(&jpeg(320, 100, 3)).unwrap();
        assert_eq!((logo.width, logo.height), (320, 100));
        assert_eq!(logo.color_space, ColorSpace::Rgb);
        assert_eq!(logo.filter, ImageFilter::Dct);
        assert!((logo.aspect() - 0.3125).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_unsupported() {
        assert!(matches!(
            decode_logo(b"GIF89a...."),
            Err(LogoError::Unsupported(_))
        ));

        let mut sixteen_bit = png(1, 1, 0, &[0, 0]);
        // bit depth lives right after width/height in IHDR
        sixteen_bit[8 + 8 + 8] = 16;
        assert!(matches!(
            decode_logo(&sixteen_bit),
            Err(LogoError::Unsupported(_))
        ));

        let truncated = &png(1, 1, 0, &[0])[..20];
        assert!(decode_logo(truncated).is_err());
    }

    #[test]
    fn test_load_missing_or_bad_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(load_logo(&dir.path().join("logo_mcsi.png")).is_none());

        let bad = dir.path().join("logo.png");
        fs::write(&bad, b"not an image").unwrap();
        assert!(load_logo(&bad).is_none());

        let good = dir.path().join("logo_ok.png");
        fs::write(&good, png(1, 1, 0, &[128])).unwrap();
        assert!(load_logo(&good).is_some());
    }
}
