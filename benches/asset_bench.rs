use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, Rgb, RgbImage};
use img_assets::encode::{encode_jpeg, JpegSettings};
use img_assets::processing::{flatten_to_rgb, thumbnail};
use img_assets::{fit_to_max_dimension, BlinkVariant};

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    }))
}

fn bench_fit_to_max_dimension(c: &mut Criterion) {
    c.bench_function("fit_to_max_dimension", |b| {
        b.iter(|| {
            for side in (100..4000).step_by(37) {
                black_box(fit_to_max_dimension(black_box(side), black_box(4000 - side), 400));
            }
        })
    });
}

fn bench_jpeg_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("jpeg_encoding");
    let image = gradient(800, 600);

    for progressive in [false, true] {
        group.bench_with_input(
            BenchmarkId::new("progressive", progressive),
            &progressive,
            |b, &progressive| {
                b.iter(|| {
                    encode_jpeg(
                        black_box(&image),
                        JpegSettings {
                            quality: 85,
                            progressive,
                        },
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_thumbnail_and_flatten(c: &mut Criterion) {
    let image = DynamicImage::ImageRgba8(gradient(1600, 1200).to_rgba8());
    c.bench_function("thumbnail_800_and_flatten", |b| {
        b.iter(|| {
            let small = thumbnail(black_box(&image), 800, 800);
            black_box(flatten_to_rgb(&small))
        })
    });
}

fn bench_blink_gif(c: &mut Criterion) {
    let open = gradient(200, 150);
    let closed = gradient(200, 150).fliph();
    let animation = BlinkVariant::ClickFeedbackFirst.animation();

    let mut group = c.benchmark_group("blink_gif");
    group.sample_size(20);
    for interlaced in [false, true] {
        group.bench_with_input(
            BenchmarkId::new("interlaced", interlaced),
            &interlaced,
            |b, &interlaced| {
                b.iter(|| {
                    animation
                        .encode_gif(black_box(&open), black_box(&closed), interlaced)
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_fit_to_max_dimension,
    bench_jpeg_encoding,
    bench_thumbnail_and_flatten,
    bench_blink_gif
);
criterion_main!(benches);
