use dvr_lib::{cutting_plane::PlaneUniform, histogram::HistogramBins};

use crate::common::*;

pub fn histogram_full(c: &mut Criterion) {
    let volume = get_volume();
    c.bench_function("histogram full volume", |b| {
        b.iter(|| HistogramBins::from_volume(black_box(&volume), None));
    });
}

pub fn histogram_plane(c: &mut Criterion) {
    let volume = get_volume();
    let plane = PlaneUniform::new(point![0.0, 0.0, 0.0], vector![0.0, 0.6, 0.8]);
    c.bench_function("histogram cut by plane", |b| {
        b.iter(|| HistogramBins::from_volume(black_box(&volume), Some(&plane)));
    });
}
