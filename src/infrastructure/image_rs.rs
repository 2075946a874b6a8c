// SPDX-License-Identifier: MPL-2.0
//! Adapters over the `image` crate.
//!
//! - [`ImageRsMetadataProvider`] reads dimensions from the file header only.
//! - [`ImageRsTransformer`] decodes the untouched source, rotates, flips,
//!   crops and writes the result to a new JPEG file.

use crate::application::port::{
    ImageMetadataProvider, ImageRef, ImageTransformer, MetadataError, ProcessingError,
    TransformRequest,
};
use crate::config::DEFAULT_JPEG_QUALITY;
use crate::domain::crop_region::{CropSpec, ImageMetadata};
use crate::domain::geometry::rotated_bounds;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, GenericImageView, ImageError, ImageReader, Rgba, RgbaImage};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::PathBuf;

/// Largest rotation canvas we are willing to allocate, in bytes.
const MAX_CANVAS_BYTES: u64 = 1 << 30;

const OUTPUT_PREFIX: &str = "crop-";
const OUTPUT_SUFFIX: &str = ".jpg";

// ==========================================================================
// Metadata
// ==========================================================================

/// Probes image headers with [`image_rs::image_dimensions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRsMetadataProvider;

impl ImageMetadataProvider for ImageRsMetadataProvider {
    fn dimensions(&self, image: &ImageRef) -> Result<ImageMetadata, MetadataError> {
        let path = image.path();
        if !path.exists() {
            return Err(MetadataError::NotFound(image.to_string()));
        }
        let (width, height) = image_rs::image_dimensions(path).map_err(|err| match err {
            ImageError::Unsupported(e) => MetadataError::UnsupportedFormat(e.to_string()),
            ImageError::IoError(e) if e.kind() == ErrorKind::NotFound => {
                MetadataError::NotFound(image.to_string())
            }
            other => MetadataError::Io(other.to_string()),
        })?;
        if width == 0 || height == 0 {
            return Err(MetadataError::InvalidDimensions { width, height });
        }
        Ok(ImageMetadata {
            native_width: width,
            native_height: height,
        })
    }
}

// ==========================================================================
// Transformer
// ==========================================================================

fn processing_error(err: ImageError) -> ProcessingError {
    match err {
        ImageError::Decoding(e) => ProcessingError::Decode(e.to_string()),
        ImageError::Unsupported(e) => ProcessingError::UnsupportedFormat(e.to_string()),
        ImageError::Limits(e) => ProcessingError::OutOfMemory(e.to_string()),
        ImageError::Encoding(e) => ProcessingError::Encode(e.to_string()),
        ImageError::IoError(e) => ProcessingError::Io(e.to_string()),
        ImageError::Parameter(e) => ProcessingError::Decode(e.to_string()),
    }
}

fn io_error(err: std::io::Error) -> ProcessingError {
    ProcessingError::Io(err.to_string())
}

/// Runs rotate → flip → crop → JPEG encode, writing a new file in `output_dir`.
#[derive(Debug, Clone)]
pub struct ImageRsTransformer {
    output_dir: PathBuf,
    jpeg_quality: u8,
}

impl ImageRsTransformer {
    pub fn new(output_dir: impl Into<PathBuf>, jpeg_quality: u8) -> Self {
        Self {
            output_dir: output_dir.into(),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }

    #[must_use]
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    fn decode(source: &ImageRef) -> Result<DynamicImage, ProcessingError> {
        let reader = ImageReader::open(source.path())
            .map_err(io_error)?
            .with_guessed_format()
            .map_err(io_error)?;
        reader.decode().map_err(processing_error)
    }

    fn write_jpeg(&self, image: &DynamicImage) -> Result<ImageRef, ProcessingError> {
        fs::create_dir_all(&self.output_dir).map_err(io_error)?;
        let mut file = tempfile::Builder::new()
            .prefix(OUTPUT_PREFIX)
            .suffix(OUTPUT_SUFFIX)
            .tempfile_in(&self.output_dir)
            .map_err(io_error)?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            let encoder = JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality);
            DynamicImage::ImageRgb8(image.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(processing_error)?;
            writer.flush().map_err(io_error)?;
        }
        let (_, path) = file.keep().map_err(|e| io_error(e.error))?;
        Ok(ImageRef::new(path))
    }
}

impl Default for ImageRsTransformer {
    fn default() -> Self {
        Self::new(std::env::temp_dir(), DEFAULT_JPEG_QUALITY)
    }
}

impl ImageTransformer for ImageRsTransformer {
    fn process(&self, request: &TransformRequest) -> Result<ImageRef, ProcessingError> {
        let mut image = Self::decode(&request.source)?;
        if let Some(degrees) = request.rotate_degrees {
            image = rotate(&image, degrees)?;
        }
        if request.flip_horizontal {
            image = image.fliph();
        }
        let cropped = crop(&image, request.crop);
        self.write_jpeg(&cropped)
    }
}

// ==========================================================================
// Pixel Operations
// ==========================================================================

/// Rotates clockwise (screen space) by whole degrees onto an expanded canvas.
///
/// Right angles are exact; anything else is resampled bilinearly and the
/// uncovered corners are transparent.
pub fn rotate(image: &DynamicImage, degrees: u32) -> Result<DynamicImage, ProcessingError> {
    match degrees % 360 {
        0 => Ok(image.clone()),
        90 => Ok(image.rotate90()),
        180 => Ok(image.rotate180()),
        270 => Ok(image.rotate270()),
        other => rotate_bilinear(&image.to_rgba8(), f64::from(other)).map(DynamicImage::ImageRgba8),
    }
}

fn rotate_bilinear(source: &RgbaImage, degrees: f64) -> Result<RgbaImage, ProcessingError> {
    let (src_w, src_h) = (f64::from(source.width()), f64::from(source.height()));
    let (bound_w, bound_h) = rotated_bounds(src_w, src_h, degrees);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (dst_w, dst_h) = (
        (bound_w - 1e-9).ceil().max(1.0) as u32,
        (bound_h - 1e-9).ceil().max(1.0) as u32,
    );
    let bytes = u64::from(dst_w) * u64::from(dst_h) * 4;
    if bytes > MAX_CANVAS_BYTES {
        return Err(ProcessingError::OutOfMemory(format!(
            "rotated canvas {dst_w}x{dst_h} too large"
        )));
    }

    let radians = degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    let (src_cx, src_cy) = (src_w / 2.0, src_h / 2.0);
    let (dst_cx, dst_cy) = (f64::from(dst_w) / 2.0, f64::from(dst_h) / 2.0);

    Ok(RgbaImage::from_fn(dst_w, dst_h, |x, y| {
        // Inverse of a clockwise rotation with y pointing down.
        let dx = f64::from(x) + 0.5 - dst_cx;
        let dy = f64::from(y) + 0.5 - dst_cy;
        let src_x = dx * cos + dy * sin + src_cx - 0.5;
        let src_y = -dx * sin + dy * cos + src_cy - 0.5;
        sample_bilinear(source, src_x, src_y)
    }))
}

fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (w, h) = (i64::from(image.width()), i64::from(image.height()));
    if x <= -1.0 || y <= -1.0 || x >= w as f64 || y >= h as f64 {
        return Rgba([0, 0, 0, 0]);
    }

    #[allow(clippy::cast_possible_truncation)]
    let (x0, y0) = (x.floor() as i64, y.floor() as i64);
    let (fx, fy) = (x - x0 as f64, y - y0 as f64);

    let texel = |px: i64, py: i64| -> [f64; 4] {
        if px < 0 || py < 0 || px >= w || py >= h {
            return [0.0; 4];
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let p = image.get_pixel(px as u32, py as u32).0;
        [
            f64::from(p[0]),
            f64::from(p[1]),
            f64::from(p[2]),
            f64::from(p[3]),
        ]
    };

    let corners = [
        (texel(x0, y0), (1.0 - fx) * (1.0 - fy)),
        (texel(x0 + 1, y0), fx * (1.0 - fy)),
        (texel(x0, y0 + 1), (1.0 - fx) * fy),
        (texel(x0 + 1, y0 + 1), fx * fy),
    ];

    let mut out = [0u8; 4];
    for (channel, slot) in out.iter_mut().enumerate() {
        let value: f64 = corners.iter().map(|(px, weight)| px[channel] * weight).sum();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel_value = value.round().clamp(0.0, 255.0) as u8;
        *slot = channel_value;
    }
    Rgba(out)
}

/// Crops to `spec`, clamped to the image bounds; never empty.
pub fn crop(image: &DynamicImage, spec: CropSpec) -> DynamicImage {
    let (img_width, img_height) = image.dimensions();

    let x = spec.origin_x.min(img_width.saturating_sub(1));
    let y = spec.origin_y.min(img_height.saturating_sub(1));

    let width = spec.width.min(img_width.saturating_sub(x)).max(1);
    let height = spec.height.min(img_height.saturating_sub(y)).max(1);

    image.crop_imm(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 10 % 256) as u8, (y * 10 % 256) as u8, 128, 255])
        }))
    }

    fn save_png(dir: &std::path::Path, name: &str, image: &DynamicImage) -> ImageRef {
        let path = dir.join(name);
        image.save(&path).expect("write test image");
        ImageRef::new(path)
    }

    #[test]
    fn metadata_reads_header_dimensions() {
        let dir = tempdir().unwrap();
        let source = save_png(dir.path(), "src.png", &gradient(40, 24));

        let metadata = ImageRsMetadataProvider.dimensions(&source).unwrap();
        assert_eq!(
            metadata,
            ImageMetadata {
                native_width: 40,
                native_height: 24,
            }
        );
    }

    #[test]
    fn metadata_reports_missing_file() {
        let dir = tempdir().unwrap();
        let err = ImageRsMetadataProvider
            .dimensions(&ImageRef::new(dir.path().join("missing.png")))
            .unwrap_err();
        assert!(matches!(err, MetadataError::NotFound(_)));
    }

    #[test]
    fn metadata_rejects_non_images() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "plain text").unwrap();
        let err = ImageRsMetadataProvider
            .dimensions(&ImageRef::new(path))
            .unwrap_err();
        assert!(!matches!(err, MetadataError::NotFound(_)));
    }

    #[test]
    fn right_angle_rotation_swaps_dimensions() {
        let rotated = rotate(&gradient(40, 20), 90).unwrap();
        assert_eq!(rotated.dimensions(), (20, 40));
        let rotated = rotate(&gradient(40, 20), 180).unwrap();
        assert_eq!(rotated.dimensions(), (40, 20));
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        let mut image = RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 255]));
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let rotated = rotate(&DynamicImage::ImageRgba8(image), 90).unwrap().to_rgba8();
        // Top-left moves to top-right.
        assert_eq!(rotated.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn arbitrary_rotation_expands_canvas() {
        let rotated = rotate(&gradient(100, 50), 45).unwrap();
        let (w, h) = rotated.dimensions();
        assert_eq!(w, 107);
        assert_eq!(h, 107);
        let corner = rotated.to_rgba8().get_pixel(0, 0).0;
        assert_eq!(corner[3], 0);
        let center = rotated.to_rgba8().get_pixel(w / 2, h / 2).0;
        assert_eq!(center[3], 255);
    }

    #[test]
    fn crop_is_clamped_to_bounds() {
        let cropped = crop(
            &gradient(30, 30),
            CropSpec {
                origin_x: 20,
                origin_y: 25,
                width: 50,
                height: 50,
            },
        );
        assert_eq!(cropped.dimensions(), (10, 5));
    }

    #[test]
    fn process_writes_new_jpeg_and_keeps_source() {
        let dir = tempdir().unwrap();
        let source = save_png(dir.path(), "src.png", &gradient(60, 40));
        let before = fs::read(source.path()).unwrap();
        let out_dir = dir.path().join("out");
        let transformer = ImageRsTransformer::new(&out_dir, 85);

        let output = transformer
            .process(&TransformRequest {
                source: source.clone(),
                rotate_degrees: Some(90),
                flip_horizontal: true,
                crop: CropSpec {
                    origin_x: 5,
                    origin_y: 10,
                    width: 20,
                    height: 30,
                },
            })
            .expect("processing succeeds");

        assert_ne!(output, source);
        assert!(output.path().starts_with(&out_dir));
        assert_eq!(
            output.path().extension().and_then(|e| e.to_str()),
            Some("jpg")
        );
        assert_eq!(image_rs::image_dimensions(output.path()).unwrap(), (20, 30));
        assert_eq!(fs::read(source.path()).unwrap(), before);
    }

    #[test]
    fn process_reports_decode_failures() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"\x89PNG\r\n\x1a\nnot really").unwrap();
        let transformer = ImageRsTransformer::new(dir.path(), 80);

        let err = transformer
            .process(&TransformRequest {
                source: ImageRef::new(&path),
                rotate_degrees: None,
                flip_horizontal: false,
                crop: CropSpec {
                    origin_x: 0,
                    origin_y: 0,
                    width: 1,
                    height: 1,
                },
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::Decode(_) | ProcessingError::Io(_)
        ));
    }
}
