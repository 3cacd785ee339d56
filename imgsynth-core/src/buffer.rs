//! Pixel buffers produced by a renderer

use serde::{Deserialize, Serialize};

/// A tightly packed RGB8 image produced by a single rendered frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer filled with a single colour
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let len = width as usize * height as usize;
        let mut data = Vec::with_capacity(len * 3);
        for _ in 0..len {
            data.extend_from_slice(&color);
        }
        Self { width, height, data }
    }

    /// Read the colour at `(x, y)`, row 0 being the top of the image
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Write the colour at `(x, y)`; out-of-range writes are ignored
    pub fn set(&mut self, x: u32, y: u32, color: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        self.data[i..i + 3].copy_from_slice(&color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_and_set() {
        let mut buf = PixelBuffer::filled(4, 3, [1, 2, 3]);
        assert_eq!(buf.data.len(), 36);
        assert_eq!(buf.get(3, 2), Some([1, 2, 3]));

        buf.set(1, 1, [9, 9, 9]);
        assert_eq!(buf.get(1, 1), Some([9, 9, 9]));
        assert_eq!(buf.get(4, 0), None);

        buf.set(10, 10, [0, 0, 0]);
        assert_eq!(buf.data.len(), 36);
    }
}
