use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{ImageBuffer, Rgb};
use picbraille::{Converter, Palette, Strategy};

fn mock_image(width: u32, height: u32) -> ImageBuffer<Rgb<u16>, Vec<u16>> {
    ImageBuffer::from_fn(width, height, |x, y| {
        let value = (((x ^ y) * 257) % 65536) as u16;
        Rgb([value, value.wrapping_mul(3), value / 2])
    })
}

fn benchmark_scales(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_by_scale");
    let image = mock_image(1024, 768);

    for scale in [1, 4, 16, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(scale), &image, |b, image| {
            let converter = Converter::new(scale).unwrap();
            b.iter(|| converter.convert(black_box(image)));
        });
    }

    group.finish();
}

fn benchmark_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_by_strategy");
    let image = mock_image(512, 512);

    let strategies = vec![
        (Strategy::Balanced, "balanced"),
        (Strategy::Threshold, "threshold"),
        (Strategy::Palette(Palette::default()), "palette"),
        (Strategy::Normalized(Palette::default()), "normalized"),
    ];

    for (strategy, label) in strategies {
        group.bench_with_input(BenchmarkId::from_parameter(label), &image, |b, image| {
            let converter = Converter::new(2).unwrap().with_strategy(strategy.clone());
            b.iter(|| converter.convert(black_box(image)));
        });
    }

    group.finish();
}

fn benchmark_sequential(c: &mut Criterion) {
    let image = mock_image(1024, 768);
    let converter = Converter::new(1).unwrap().with_parallel(false);
    c.bench_function("convert_sequential", |b| b.iter(|| converter.convert(black_box(&image))));
}

criterion_group!(benches, benchmark_scales, benchmark_strategies, benchmark_sequential);
criterion_main!(benches);
