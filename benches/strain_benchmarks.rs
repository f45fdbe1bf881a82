//! Strain benchmarks using Criterion.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fiducial_strain::{
    analyze_components, compute_strain_tensor, fit_trend, process_sequence, Abscissa, Frame, PointSet,
    StrainType,
};

const SQUARE: [[f64; 2]; 5] = [[0.0, 10.0], [10.0, 10.0], [10.0, 0.0], [0.0, 0.0], [5.0, 5.0]];

fn deformed(step: usize) -> PointSet {
    let stretch = 1.0 + 1e-4 * step as f64;
    let shear = 5e-5 * step as f64;
    let pairs: Vec<[f64; 2]> = SQUARE
        .iter()
        .map(|&[x, y]| [stretch * x + shear * y, y])
        .collect();
    PointSet::new(&pairs).expect("valid markers")
}

/// Create a sequence of `n` frames of slowly growing deformation.
fn create_test_frames(n: usize) -> Vec<Frame> {
    (0..n).map(|i| Frame::new(i, deformed(i))).collect()
}

fn benchmark_single_tensor(c: &mut Criterion) {
    let reference = PointSet::new(&SQUARE).expect("valid markers");
    let frame = deformed(100);

    c.bench_function("strain_tensor_small", |b| {
        b.iter(|| compute_strain_tensor(black_box(&reference), black_box(&frame), StrainType::Small, 4))
    });

    c.bench_function("strain_tensor_green_lagrangian", |b| {
        b.iter(|| {
            compute_strain_tensor(
                black_box(&reference),
                black_box(&frame),
                StrainType::GreenLagrangian,
                4,
            )
        })
    });
}

fn benchmark_sequence_1000_frames(c: &mut Criterion) {
    let reference = PointSet::new(&SQUARE).expect("valid markers");
    let frames = create_test_frames(1000);

    c.bench_function("process_sequence_1000_frames", |b| {
        b.iter(|| process_sequence(black_box(&reference), black_box(&frames), StrainType::Small))
    });
}

fn benchmark_trend_fit(c: &mut Criterion) {
    let series: Vec<(f64, f64)> = (0..1000)
        .map(|i| {
            let x = i as f64;
            (x, 1e-4 * x + 1e-6 * (x * 0.7).sin())
        })
        .collect();

    c.bench_function("fit_trend_1000_points", |b| b.iter(|| fit_trend(black_box(&series))));

    let reference = PointSet::new(&SQUARE).expect("valid markers");
    let sequence = process_sequence(&reference, &create_test_frames(1000), StrainType::Small).expect("valid sequence");

    c.bench_function("analyze_components_1000_frames", |b| {
        b.iter(|| analyze_components(black_box(&sequence), Abscissa::FrameIndex))
    });
}

criterion_group!(
    benches,
    benchmark_single_tensor,
    benchmark_sequence_1000_frames,
    benchmark_trend_fit,
);
criterion_main!(benches);
