// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the crop engine.
//!
//! Measures the performance of:
//! - Gesture replay (a pinch-rotate sequence through a session)
//! - Crop region computation
//! - Arbitrary-angle rotation of a source image

use criterion::{criterion_group, criterion_main, Criterion};
use photo_cropper::application::port::ImageRef;
use photo_cropper::application::CropSession;
use photo_cropper::config::CropConfig;
use photo_cropper::domain::crop_region::{CropRegionCalculator, ImageMetadata};
use photo_cropper::domain::touch::{TouchEvent, TouchFrame, TouchPoint};
use photo_cropper::domain::transform::TransformState;
use photo_cropper::infrastructure::image_rs::rotate;
use std::hint::black_box;

const METADATA: ImageMetadata = ImageMetadata {
    native_width: 4032,
    native_height: 3024,
};

/// A 60-frame pinch that spreads and turns the fingers.
fn pinch_rotate_events() -> Vec<TouchEvent> {
    let mut events = vec![TouchEvent::Grant(TouchFrame::new(vec![
        TouchPoint::new(1, 100.0, 200.0),
        TouchPoint::new(2, 200.0, 200.0),
    ]))];
    for step in 0..60 {
        let t = f64::from(step) / 60.0;
        let radius = 50.0 + 40.0 * t;
        let (sin, cos) = (t * 0.6).sin_cos();
        events.push(TouchEvent::Move(TouchFrame::new(vec![
            TouchPoint::new(1, 150.0 - radius * cos, 200.0 - radius * sin),
            TouchPoint::new(2, 150.0 + radius * cos, 200.0 + radius * sin),
        ])));
    }
    events.push(TouchEvent::Release(TouchFrame::empty()));
    events
}

fn bench_gesture_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_engine");
    let events = pinch_rotate_events();
    let config = CropConfig::default();

    group.bench_function("pinch_rotate_replay", |b| {
        b.iter(|| {
            let mut session =
                CropSession::with_metadata(ImageRef::new("bench.jpg"), METADATA, &config).unwrap();
            for event in &events {
                session.handle_touch(event);
            }
            black_box(session.transform());
        });
    });

    group.finish();
}

fn bench_crop_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_engine");
    let calculator = CropRegionCalculator::new(352.0, 352.0);
    let state = TransformState {
        translate_x: 40.0,
        translate_y: -25.0,
        scale: 2.5,
        rotation_degrees: 17.0,
        flip_horizontal: true,
    };

    group.bench_function("compute_crop_region", |b| {
        b.iter(|| black_box(calculator.compute(black_box(&state), METADATA)));
    });

    group.finish();
}

fn bench_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_engine");
    group.sample_size(20);
    let image = image_rs::DynamicImage::ImageRgba8(image_rs::RgbaImage::from_fn(
        512,
        384,
        |x, y| image_rs::Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255]),
    ));

    group.bench_function("rotate_17_degrees", |b| {
        b.iter(|| black_box(rotate(&image, 17).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_gesture_replay,
    bench_crop_region,
    bench_rotation
);
criterion_main!(benches);
