use image::{DynamicImage, GenericImageView, GrayImage, ImageBuffer, ImageReader, Luma};
use imageproc::contrast::otsu_level;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not open or find the image {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not decode the image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum CropError {
    #[error("Invalid crop region '{0}' (expected X,Y,WIDTH,HEIGHT)")]
    Parse(String),
    #[error("Crop region {region} does not fit inside a {width}x{height} image")]
    OutOfBounds { region: CropRegion, width: u32, height: u32 },
}

/// Rectangle of the source image to keep before thresholding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// Cut the region out of `img`. The region must be non-empty and lie
    /// entirely inside the image.
    pub fn apply(&self, img: &DynamicImage) -> Result<DynamicImage, CropError> {
        let (w, h) = img.dimensions();
        let fits = self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|r| r <= w)
            && self.y.checked_add(self.height).is_some_and(|b| b <= h);
        if !fits {
            return Err(CropError::OutOfBounds { region: *self, width: w, height: h });
        }
        Ok(img.crop_imm(self.x, self.y, self.width, self.height))
    }
}

impl std::fmt::Display for CropRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

impl std::str::FromStr for CropRegion {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| CropError::Parse(s.to_string()))?;
        match parts[..] {
            [x, y, width, height] => Ok(CropRegion { x, y, width, height }),
            _ => Err(CropError::Parse(s.to_string())),
        }
    }
}

/// A single-channel image where every pixel is either 0 or 255.
#[derive(Debug, Clone)]
pub struct ThresholdedImage {
    image: GrayImage,
    /// Otsu level the image was split at; pixels above it became white.
    level: u8,
}

impl ThresholdedImage {
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Encode as PNG, the form OCR engines accept from memory.
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buf = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
        Ok(buf)
    }
}

/// Decode an image file from disk. The format is sniffed from the file's
/// contents, so the extension doesn't matter.
pub fn load_image(path: &Path) -> Result<DynamicImage, LoadError> {
    let open_err = |source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)
        .map_err(open_err)?
        .with_guessed_format()
        .map_err(open_err)?
        .decode()
        .map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    let (w, h) = img.dimensions();
    tracing::debug!("Loaded {} ({w}x{h})", path.display());
    Ok(img)
}

/// Grayscale + Otsu binarization.
pub fn binarize(img: &DynamicImage) -> ThresholdedImage {
    let gray: GrayImage = img.to_luma8();
    let level = otsu_level(&gray);

    let binary: GrayImage = ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] > level {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });

    tracing::debug!("Otsu threshold level {level}");
    ThresholdedImage { image: binary, level }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn two_tone(width: u32, height: u32, dark: u8, light: u8) -> GrayImage {
        // Left half dark "ink", right half light "paper".
        ImageBuffer::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Luma([dark])
            } else {
                Luma([light])
            }
        })
    }

    #[test]
    fn load_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("nope.png")).unwrap_err();
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn load_garbage_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(load_image(&path).is_err());
    }

    #[test]
    fn load_ignores_misleading_extension() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("label.png");
        let img: RgbImage = ImageBuffer::from_fn(12, 7, |x, _| Rgb([x as u8 * 20, 0, 0]));
        img.save(&original).unwrap();

        for name in ["capture.jpg", "barcode", "scan.img"] {
            let renamed = dir.path().join(name);
            std::fs::copy(&original, &renamed).unwrap();
            let loaded = load_image(&renamed).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(loaded.dimensions(), (12, 7));
        }
    }

    #[test]
    fn load_missing_and_garbage_are_distinct_variants() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_image(&dir.path().join("nope.png")),
            Err(LoadError::Open { .. })
        ));
        let garbage = dir.path().join("garbage");
        std::fs::write(&garbage, b"definitely not an image").unwrap();
        assert!(matches!(load_image(&garbage), Err(LoadError::Decode { .. })));
    }

    #[test]
    fn crop_region_parses() {
        let r: CropRegion = "10, 20,30,40".parse().unwrap();
        assert_eq!(r, CropRegion { x: 10, y: 20, width: 30, height: 40 });
        assert_eq!(r.to_string(), "10,20,30,40");
        for bad in ["", "1,2,3", "1,2,3,4,5", "a,b,c,d", "-1,0,2,2"] {
            assert!(matches!(bad.parse::<CropRegion>(), Err(CropError::Parse(_))), "{bad}");
        }
    }

    #[test]
    fn crop_keeps_the_region() {
        let img = DynamicImage::ImageLuma8(two_tone(20, 4, 30, 220));
        let right = CropRegion { x: 10, y: 1, width: 10, height: 3 }.apply(&img).unwrap();
        assert_eq!(right.dimensions(), (10, 3));
        assert!(right.to_luma8().pixels().all(|p| p[0] == 220));
    }

    #[test]
    fn crop_outside_the_image_is_rejected() {
        let img = DynamicImage::ImageLuma8(two_tone(20, 4, 30, 220));
        for region in [
            CropRegion { x: 15, y: 0, width: 10, height: 2 },
            CropRegion { x: 0, y: 4, width: 1, height: 1 },
            CropRegion { x: 0, y: 0, width: 0, height: 4 },
            CropRegion { x: u32::MAX, y: 0, width: 2, height: 2 },
        ] {
            assert!(matches!(region.apply(&img), Err(CropError::OutOfBounds { .. })), "{region}");
        }
    }

    #[test]
    fn load_preserves_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.png");
        let img: RgbImage = ImageBuffer::from_fn(37, 11, |x, y| Rgb([x as u8, y as u8, 0]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (37, 11));
    }

    #[test]
    fn binarize_output_is_strictly_binary() {
        let img: RgbImage = ImageBuffer::from_fn(64, 8, |x, _| {
            let v = (x * 4) as u8;
            Rgb([v, v / 2, 255 - v])
        });
        let out = binarize(&DynamicImage::ImageRgb8(img));
        assert_eq!(out.dimensions(), (64, 8));
        assert!(out.image().pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn binarize_separates_two_tones() {
        let img = DynamicImage::ImageLuma8(two_tone(20, 4, 30, 220));
        let out = binarize(&img);
        assert!(out.level() >= 30 && out.level() < 220);
        assert_eq!(out.image().get_pixel(0, 0)[0], 0);
        assert_eq!(out.image().get_pixel(19, 3)[0], 255);
    }

    #[test]
    fn threshold_follows_the_histogram() {
        // Same layout, different intensities: a fixed threshold couldn't
        // split both, the computed one does.
        let dim = binarize(&DynamicImage::ImageLuma8(two_tone(20, 4, 5, 60)));
        let bright = binarize(&DynamicImage::ImageLuma8(two_tone(20, 4, 180, 250)));
        assert_ne!(dim.level(), bright.level());
        for out in [dim, bright] {
            assert_eq!(out.image().get_pixel(0, 0)[0], 0);
            assert_eq!(out.image().get_pixel(19, 0)[0], 255);
        }
    }

    #[test]
    fn uniform_image_does_not_panic() {
        let img = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(10, 10, Luma([128u8])));
        let out = binarize(&img);
        assert_eq!(out.dimensions(), (10, 10));
    }

    #[test]
    fn to_png_produces_png_header() {
        let out = binarize(&DynamicImage::ImageLuma8(two_tone(4, 4, 0, 255)));
        let png = out.to_png().unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }
}
