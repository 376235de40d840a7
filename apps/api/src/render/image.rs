//! Single-image PDF export: an uploaded résumé snapshot printed onto one page of its own size.

use base64::Engine;

use crate::render::engine::PageFormat;

/// PDF points per inch. One image pixel is printed as one point.
const POINTS_PER_INCH: f64 = 72.0;

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    pub fn mime(self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub kind: ImageKind,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// A page exactly the size of the image.
    pub fn page_format(&self) -> PageFormat {
        PageFormat::Exact {
            width: f64::from(self.width) / POINTS_PER_INCH,
            height: f64::from(self.height) / POINTS_PER_INCH,
        }
    }
}

/// Reads format and dimensions from a PNG or JPEG header. Anything else is `None`.
pub fn sniff_image(data: &[u8]) -> Option<ImageInfo> {
    let (kind, width, height) = if data.starts_with(&PNG_SIGNATURE) {
        // IHDR is always the first chunk
        if data.len() < 24 || &data[12..16] != b"IHDR" {
            return None;
        }
        let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
        let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
        (ImageKind::Png, width, height)
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        let (width, height) = jpeg_dimensions(data)?;
        (ImageKind::Jpeg, width, height)
    } else {
        return None;
    };

    if width == 0 || height == 0 {
        return None;
    }
    Some(ImageInfo {
        kind,
        width,
        height,
    })
}

/// Walks the marker segments up to the first start-of-frame.
fn jpeg_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let mut pos = 2;
    while pos + 3 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        let marker = data[pos + 1];
        match marker {
            // Fill byte
            0xFF => pos += 1,
            // End of image / start of scan: no frame header before the pixel data
            0xD9 | 0xDA => return None,
            // SOF0..SOF15, minus DHT, JPG and DAC
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                if pos + 8 >= data.len() {
                    return None;
                }
                let height = u16::from_be_bytes([data[pos + 5], data[pos + 6]]);
                let width = u16::from_be_bytes([data[pos + 7], data[pos + 8]]);
                return Some((u32::from(width), u32::from(height)));
            }
            _ => {
                let len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
                pos += 2 + len;
            }
        }
    }
    None
}

/// HTML page that shows the image edge to edge on a page of the same size.
pub fn image_document(data: &[u8], info: &ImageInfo) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    let (width, height) = (info.width, info.height);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
@page {{ size: {width}pt {height}pt; margin: 0; }}
html, body {{ margin: 0; padding: 0; overflow: hidden; }}
img {{ display: block; width: {width}pt; height: {height}pt; }}
</style>
</head>
<body><img src="data:{mime};base64,{encoded}" alt=""></body>
</html>
"#,
        mime = info.kind.mime(),
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Header-only PNG: signature plus IHDR with the given size.
    pub(crate) fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        data
    }

    /// SOI, an APP0 segment, then a baseline SOF0 frame header.
    fn jpeg_header(width: u16, height: u16) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        data.extend_from_slice(b"JFIF\0");
        data.extend_from_slice(&[1, 1, 0, 0, 1, 0, 1, 0, 0]);
        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&[3, 1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]);
        data
    }

    #[test]
    fn test_sniff_png() {
        let info = sniff_image(&png_header(1240, 1754)).unwrap();
        assert_eq!(info.kind, ImageKind::Png);
        assert_eq!((info.width, info.height), (1240, 1754));
    }

    #[test]
    fn test_sniff_jpeg_skips_leading_segments() {
        let info = sniff_image(&jpeg_header(800, 1131)).unwrap();
        assert_eq!(info.kind, ImageKind::Jpeg);
        assert_eq!((info.width, info.height), (800, 1131));
    }

    #[test]
    fn test_sniff_rejects_other_data() {
        assert_eq!(sniff_image(b""), None);
        assert_eq!(sniff_image(b"GIF89a\x01\x00\x01\x00"), None);
        assert_eq!(sniff_image(b"%PDF-1.7 not an image at all"), None);
        assert_eq!(sniff_image(&png_header(0, 10)), None);
        // Truncated before the frame header
        assert_eq!(sniff_image(&jpeg_header(800, 600)[..12]), None);
    }

    #[test]
    fn test_page_matches_image_in_points() {
        let info = sniff_image(&png_header(144, 72)).unwrap();
        assert_eq!(
            info.page_format(),
            PageFormat::Exact {
                width: 2.0,
                height: 1.0
            }
        );
    }

    #[test]
    fn test_image_document_embeds_data_uri() {
        let data = png_header(10, 20);
        let info = sniff_image(&data).unwrap();
        let html = image_document(&data, &info);
        assert!(html.contains("@page { size: 10pt 20pt; margin: 0; }"));
        assert!(html.contains("src=\"data:image/png;base64,iVBORw0KGgo"));
    }
}
