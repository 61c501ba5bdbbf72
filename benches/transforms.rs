use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixel_lab::acquisition::{capture_frame, CaptureConfig, MockCamera};
use pixel_lab::transform::{
    draw_line, extract, mask, sharpen, ChannelSelector, LineSpec, Point, ThresholdValue,
};

fn bench_transforms(c: &mut Criterion) {
    let mut config = CaptureConfig::with_dimensions(640, 480);
    config.warmup_frames = 0;
    let image = capture_frame(&mut MockCamera::new(), &config).expect("mock capture");
    let line = LineSpec::new(Point::new(-10, 20), Point::new(700, 400), 5).expect("valid line");

    c.bench_function("extract_red_640x480", |b| {
        b.iter(|| extract(black_box(&image), ChannelSelector::Red))
    });
    c.bench_function("mask_red_640x480", |b| {
        b.iter(|| mask(black_box(&image), ChannelSelector::Red, ThresholdValue::from(128)))
    });
    c.bench_function("sharpen_640x480", |b| b.iter(|| sharpen(black_box(&image))));
    c.bench_function("draw_line_640x480", |b| {
        b.iter(|| draw_line(black_box(&image), &line))
    });
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
