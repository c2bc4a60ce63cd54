use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use alpaca_imaging_rs::image_pipeline::adjust::{render, AdjustmentParams, ColorMap};
use alpaca_imaging_rs::image_pipeline::histogram::{compute_histogram, DETAILED_BINS};
use alpaca_imaging_rs::image_pipeline::{
    CaptureInfo, FrameDecoder, FrameViewPipeline, ImageBytesBuilder, ImageBytesDecoder,
    NormalizeOptions, Normalizer, ViewerConfig,
};

fn generate_mock_frame(width: usize, height: usize) -> Vec<u8> {
    let mut samples = Vec::with_capacity(width * height);
    for x in 0..width {
        for y in 0..height {
            samples.push(((x * 37 + y * 11) % 4096) as u16 + 500);
        }
    }
    ImageBytesBuilder::new(width, height).samples(&samples).build()
}

fn benchmark_ingest_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_by_size");

    let sizes = vec![
        (320, 240, "320x240"),
        (1024, 768, "1024x768"),
        (2048, 1536, "2048x1536"),
    ];

    for (width, height, label) in sizes {
        let frame = generate_mock_frame(width, height);

        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, data| {
            let mut pipeline = FrameViewPipeline::new(ViewerConfig::default()).unwrap();

            b.iter(|| {
                let _ = pipeline.ingest_frame(black_box(data), CaptureInfo::default());
            });
        });
    }

    group.finish();
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let frame = ImageBytesDecoder.decode(&generate_mock_frame(1024, 768));

    for (auto_stretch, label) in [(false, "min_max"), (true, "auto_stretch")] {
        let normalizer = Normalizer::new(NormalizeOptions {
            auto_stretch,
            ..NormalizeOptions::default()
        });
        group.bench_function(label, |b| {
            b.iter(|| normalizer.process(black_box(&frame)));
        });
    }

    group.finish();
}

fn benchmark_render_stride(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_stride");
    let frame = ImageBytesDecoder.decode(&generate_mock_frame(2048, 1536));
    let cache = Normalizer::default().process(&frame);
    let params = AdjustmentParams {
        gamma: 2.2,
        contrast: 1.3,
        color_map: ColorMap::Viridis,
        ..AdjustmentParams::default()
    };

    for stride in [1usize, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(stride), &stride, |b, &stride| {
            b.iter(|| render(black_box(&cache), &params, stride));
        });
    }

    group.finish();
}

fn benchmark_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");
    let frame = ImageBytesDecoder.decode(&generate_mock_frame(2048, 1536));
    let cache = Normalizer::default().process(&frame);

    group.bench_function("full", |b| {
        b.iter(|| compute_histogram(black_box(&cache), None, DETAILED_BINS, 1));
    });

    group.bench_function("strided", |b| {
        b.iter(|| compute_histogram(black_box(&cache), None, DETAILED_BINS, 4));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_ingest_sizes,
    benchmark_normalize,
    benchmark_render_stride,
    benchmark_histogram
);
criterion_main!(benches);
