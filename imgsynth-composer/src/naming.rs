//! Output file naming

use std::path::{Path, PathBuf};

/// Extension of every output file; the writer always emits bitmaps
pub const OUTPUT_EXTENSION: &str = "bmp";

/// Which variant of an image a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Mono,
    Left,
    Right,
    Depth,
}

impl OutputKind {
    /// File name suffix placed after the index
    pub fn suffix(&self) -> &'static str {
        match self {
            OutputKind::Mono => "",
            OutputKind::Left => "_left",
            OutputKind::Right => "_right",
            OutputKind::Depth => "_depth",
        }
    }
}

/// Digits of zero padding for `image_count` images: `ceil(log10(image_count))`
///
/// Computed exactly as the smallest `d` with `10^d >= image_count`, so exact
/// powers of ten get `log10` digits (100 images are `00`..`99`).
pub fn pad_width(image_count: usize) -> usize {
    let mut digits = 0;
    let mut bound: usize = 1;
    while bound < image_count {
        digits += 1;
        bound = match bound.checked_mul(10) {
            Some(b) => b,
            None => break,
        };
    }
    digits
}

/// Builds output paths for one run
#[derive(Debug, Clone)]
pub struct OutputNamer {
    dir: PathBuf,
    width: usize,
}

impl OutputNamer {
    pub fn new(dir: impl Into<PathBuf>, image_count: usize) -> Self {
        Self {
            dir: dir.into(),
            width: pad_width(image_count),
        }
    }

    pub fn pad_width(&self) -> usize {
        self.width
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `out_<index><suffix>.bmp`
    pub fn file_name(&self, index: usize, kind: OutputKind) -> String {
        format!(
            "out_{:0width$}{}.{}",
            index,
            kind.suffix(),
            OUTPUT_EXTENSION,
            width = self.width
        )
    }

    pub fn path(&self, index: usize, kind: OutputKind) -> PathBuf {
        self.dir.join(self.file_name(index, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_width_boundaries() {
        assert_eq!(pad_width(1), 0);
        assert_eq!(pad_width(2), 1);
        assert_eq!(pad_width(10), 1);
        assert_eq!(pad_width(11), 2);
        assert_eq!(pad_width(100), 2);
        assert_eq!(pad_width(101), 3);
        assert_eq!(pad_width(1000), 3);
        assert_eq!(pad_width(usize::MAX), 20);
    }

    #[test]
    fn test_pad_width_matches_log10() {
        for n in 1..=2000usize {
            let expected = ((n as f64).log10() - 1e-12).ceil() as usize;
            assert_eq!(pad_width(n), expected, "image_count = {}", n);
        }
    }

    #[test]
    fn test_file_names() {
        let namer = OutputNamer::new("img_gen_out", 100);
        assert_eq!(namer.pad_width(), 2);
        assert_eq!(namer.dir(), Path::new("img_gen_out"));
        assert_eq!(namer.file_name(0, OutputKind::Mono), "out_00.bmp");
        assert_eq!(namer.file_name(99, OutputKind::Left), "out_99_left.bmp");
        assert_eq!(namer.file_name(7, OutputKind::Right), "out_07_right.bmp");
        assert_eq!(namer.file_name(42, OutputKind::Depth), "out_42_depth.bmp");
        assert_eq!(
            namer.path(3, OutputKind::Mono),
            PathBuf::from("img_gen_out").join("out_03.bmp")
        );
    }

    #[test]
    fn test_single_image_is_unpadded() {
        let namer = OutputNamer::new("out", 1);
        assert_eq!(namer.file_name(0, OutputKind::Mono), "out_0.bmp");
    }

    #[test]
    fn test_wide_index_is_not_truncated() {
        let namer = OutputNamer::new("out", 10);
        assert_eq!(namer.file_name(123, OutputKind::Mono), "out_123.bmp");
    }
}
