//! Bitmap output

use std::path::Path;

use image::{ImageFormat, RgbImage};
use imgsynth_core::{Error, PixelBuffer, Result};

/// Write a pixel buffer as an uncompressed 24-bit BMP
///
/// The format is always BMP, whatever extension `path` carries.
pub fn write_bmp(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let expected = buffer.width as usize * buffer.height as usize * 3;
    if buffer.data.len() != expected {
        return Err(Error::InvalidData(format!(
            "pixel buffer holds {} bytes, expected {} for {}x{}",
            buffer.data.len(),
            expected,
            buffer.width,
            buffer.height
        )));
    }

    let image = RgbImage::from_raw(buffer.width, buffer.height, buffer.data.clone())
        .ok_or_else(|| Error::InvalidData("pixel buffer does not match its dimensions".to_string()))?;

    image
        .save_with_format(path, ImageFormat::Bmp)
        .map_err(|e| Error::ImageEncode(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_bmp_is_bitmap_regardless_of_extension() {
        let path = std::env::temp_dir().join(format!("imgsynth_bitmap_{}.png", std::process::id()));
        let mut buffer = PixelBuffer::filled(5, 4, [10, 20, 30]);
        buffer.set(2, 1, [255, 0, 0]);

        write_bmp(&buffer, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"BM");

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Bmp)
            .unwrap()
            .to_rgb8();
        assert_eq!(decoded.dimensions(), (5, 4));
        assert_eq!(decoded.get_pixel(2, 1).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 20, 30]);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_write_bmp_rejects_short_buffer() {
        let buffer = PixelBuffer {
            width: 2,
            height: 2,
            data: vec![0; 5],
        };
        let path = std::env::temp_dir().join("imgsynth_bitmap_short.bmp");
        assert!(matches!(write_bmp(&buffer, &path), Err(Error::InvalidData(_))));
    }
}
