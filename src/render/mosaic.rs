//! Member photos as grayscale character mosaics.

use crate::errors::{Error, Result};
use image::{DynamicImage, imageops::FilterType};
use std::path::Path;

/// Glyphs from darkest to lightest.
pub const GLYPH_RAMP: [char; 8] = ['@', '%', '#', '*', '+', '=', ':', ' '];

// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 0.55;

/// Glyph for an 8-bit luminance sample.
#[must_use]
pub fn glyph_for(luma: u8) -> char {
    GLYPH_RAMP[usize::from(luma) * GLYPH_RAMP.len() / 256]
}

/// Converts an already decoded image into `width` columns of glyphs.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn image_to_mosaic(image: &DynamicImage, width: u32) -> String {
    let width = width.max(1);
    let (src_w, src_h) = (image.width().max(1), image.height());
    let height = (f64::from(src_h) / f64::from(src_w) * f64::from(width) * CELL_ASPECT) as u32;
    let height = height.max(1);

    let gray = image
        .resize_exact(width, height, FilterType::Triangle)
        .to_luma8();
    gray.rows()
        .map(|row| row.map(|pixel| glyph_for(pixel.0[0])).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Opens `path` and renders it as a mosaic.
pub fn try_render_mosaic<P: AsRef<Path>>(path: P, width: u32) -> Result<String> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| Error::Image {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(image_to_mosaic(&image, width))
}

/// Like [`try_render_mosaic`], but a decode failure becomes the returned text.
#[must_use]
pub fn render_mosaic<P: AsRef<Path>>(path: P, width: u32) -> String {
    try_render_mosaic(path, width).unwrap_or_else(|e| {
        tracing::warn!("{}", e);
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_glyph_buckets() {
        assert_eq!(glyph_for(0), '@');
        assert_eq!(glyph_for(31), '@');
        assert_eq!(glyph_for(32), '%');
        assert_eq!(glyph_for(128), '+');
        assert_eq!(glyph_for(255), ' ');
    }

    #[test]
    fn test_mosaic_dimensions() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 100, Luma([0])));
        let mosaic = image_to_mosaic(&img, 20);
        let rows: Vec<&str> = mosaic.split('\n').collect();

        // 100x100 at 20 columns -> 20 * 0.55 = 11 rows
        assert_eq!(rows.len(), 11);
        assert!(rows.iter().all(|row| row.chars().count() == 20));
        assert!(rows.iter().all(|row| row.chars().all(|c| c == '@')));
    }

    #[test]
    fn test_wide_image_still_has_one_row() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(200, 1, Luma([255])));
        let mosaic = image_to_mosaic(&img, 10);
        assert_eq!(mosaic, " ".repeat(10));
    }

    #[test]
    fn test_render_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        GrayImage::from_fn(40, 40, |x, _| if x < 20 { Luma([0]) } else { Luma([255]) })
            .save(&path)
            .unwrap();

        let mosaic = render_mosaic(&path, 4);
        let first_row = mosaic.lines().next().unwrap();
        assert!(first_row.starts_with('@'));
        assert_eq!(first_row.chars().count(), 4);
    }

    #[test]
    fn test_missing_image_yields_error_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.jpg");

        assert!(matches!(
            try_render_mosaic(&path, 80),
            Err(Error::Image { .. })
        ));
        let text = render_mosaic(&path, 80);
        assert!(text.starts_with("Unable to load image"));
    }
}
