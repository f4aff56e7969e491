use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gl_parity_compare::{CompareOptions, DiffOptions, ImageComparator, PixelComparator};
use gl_parity_core::HighlightColor;
use image::{Rgba, RgbaImage};

/// Create a gradient raster for benchmarking
fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

/// Same gradient with a small block changed in the middle
fn gradient_with_patch(width: u32, height: u32) -> RgbaImage {
    let mut image = gradient(width, height);
    for y in height / 2..(height / 2 + 8).min(height) {
        for x in width / 2..(width / 2 + 8).min(width) {
            image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    image
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    let comparator = PixelComparator::new();

    for size in [(64, 64), (256, 256), (640, 480)].iter() {
        let (width, height) = *size;
        let reference = gradient(width, height);
        let current = reference.clone();

        group.bench_with_input(
            BenchmarkId::new("strict_equal", format!("{}x{}", width, height)),
            &(reference.clone(), current.clone()),
            |b, (reference, current)| {
                b.iter(|| {
                    comparator.compare(
                        black_box(reference),
                        black_box(current),
                        &CompareOptions::strict(),
                    )
                })
            },
        );

        let near = gradient_with_patch(width, height);
        group.bench_with_input(
            BenchmarkId::new("tolerant_patch", format!("{}x{}", width, height)),
            &(reference, near),
            |b, (reference, current)| {
                b.iter(|| {
                    comparator.compare(
                        black_box(reference),
                        black_box(current),
                        &CompareOptions::tolerant(2.3),
                    )
                })
            },
        );
    }

    group.finish();
}

fn bench_render_diff(c: &mut Criterion) {
    let comparator = PixelComparator::new();
    let reference = gradient(256, 256);
    let current = gradient_with_patch(256, 256);
    let options = DiffOptions {
        compare: CompareOptions::strict(),
        highlight_color: HighlightColor::MAGENTA,
    };

    c.bench_function("render_diff_256", |b| {
        b.iter(|| comparator.render_diff(black_box(&reference), black_box(&current), &options))
    });
}

criterion_group!(benches, bench_compare, bench_render_diff);
criterion_main!(benches);
