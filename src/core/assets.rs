//! Image sources for the page: discovery on disk and decoding.
//!
//! Decoding is blocking and meant to run on a background thread.  No UI or
//! Ratatui types are used here.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba, RgbaImage};
use thiserror::Error;
use walkdir::WalkDir;

/// Largest edge (in pixels) an image is kept at after decoding.  Terminal
/// rendering never needs more.
pub const MAX_IMAGE_EDGE: u32 = 320;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image directory {0} does not exist")]
    MissingDir(PathBuf),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    File(PathBuf),
    /// A generated gradient, used when no image directory is given.
    Generated { seed: u32 },
}

impl ImageSource {
    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path
                .file_name()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .unwrap_or_else(|| path.display().to_string()),
            Self::Generated { seed } => format!("generated #{seed}"),
        }
    }
}

/// List the image files directly inside `dir`, sorted by name.  Files are
/// kept only when their sniffed MIME type is `image/*`.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    if !dir.is_dir() {
        return Err(AssetError::MissingDir(dir.to_path_buf()));
    }

    let images: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_image(p))
        .collect();

    tracing::info!(dir = %dir.display(), count = images.len(), "discovered images");
    Ok(images)
}

fn is_image(path: &Path) -> bool {
    tree_magic_mini::from_filepath(path).is_some_and(|mime| mime.starts_with("image/"))
}

/// Decode `source` and shrink it so neither edge exceeds [`MAX_IMAGE_EDGE`].
pub fn decode(source: &ImageSource) -> Result<RgbaImage, AssetError> {
    let rgba = match source {
        ImageSource::File(path) => image::open(path)
            .map_err(|source| AssetError::Decode {
                path: path.clone(),
                source,
            })?
            .to_rgba8(),
        ImageSource::Generated { seed } => generate(*seed, 160, 96),
    };
    Ok(shrink(rgba))
}

fn shrink(img: RgbaImage) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w <= MAX_IMAGE_EDGE && h <= MAX_IMAGE_EDGE {
        return img;
    }
    let scale = f64::from(MAX_IMAGE_EDGE) / f64::from(w.max(h));
    let nw = ((f64::from(w) * scale).round() as u32).max(1);
    let nh = ((f64::from(h) * scale).round() as u32).max(1);
    image::imageops::resize(&img, nw, nh, image::imageops::FilterType::Triangle)
}

/// A diagonal two-colour gradient picked from a small palette by `seed`.
fn generate(seed: u32, width: u32, height: u32) -> RgbaImage {
    const PALETTE: &[[u8; 3]] = &[
        [0x5e, 0xc5, 0x76],
        [0x39, 0xb3, 0x85],
        [0xff, 0xcb, 0x03],
        [0xff, 0x58, 0x5f],
        [0x9b, 0xe1, 0x5d],
        [0x44, 0x44, 0x44],
    ];
    let a = PALETTE[seed as usize % PALETTE.len()];
    let b = PALETTE[(seed as usize + 2) % PALETTE.len()];
    let span = (width + height).max(1) as f32;

    ImageBuffer::from_fn(width, height, |x, y| {
        let t = (x + y) as f32 / span;
        let mix = |i: usize| (f32::from(a[i]) * (1.0 - t) + f32::from(b[i]) * t) as u8;
        Rgba([mix(0), mix(1), mix(2), 0xff])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_sources_decode() {
        let img = decode(&ImageSource::Generated { seed: 3 }).unwrap();
        assert_eq!(img.dimensions(), (160, 96));
    }

    #[test]
    fn large_images_are_shrunk() {
        let big = RgbaImage::new(1280, 640);
        let small = shrink(big);
        assert_eq!(small.dimensions(), (MAX_IMAGE_EDGE, 160));
    }

    #[test]
    fn missing_dir_is_an_error() {
        let err = discover_images(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, AssetError::MissingDir(_)));
    }

    #[test]
    fn discovery_keeps_only_images() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("b.png");
        RgbaImage::new(4, 4).save(&png).unwrap();
        let png2 = dir.path().join("a.png");
        RgbaImage::new(4, 4).save(&png2).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let found = discover_images(dir.path()).unwrap();
        assert_eq!(found, vec![png2, png]);
    }

    #[test]
    fn broken_files_fail_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"nope").unwrap();
        let err = decode(&ImageSource::File(bad)).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn labels() {
        assert_eq!(ImageSource::File("/x/y/card.jpg".into()).label(), "card.jpg");
        assert_eq!(ImageSource::Generated { seed: 2 }.label(), "generated #2");
    }
}
