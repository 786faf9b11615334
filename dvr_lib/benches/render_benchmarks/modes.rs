use crate::common::*;

fn bench_mode(c: &mut Criterion, name: &str, mode: RenderModeKind, ert: bool) {
    let renderer = get_renderer(mode, ert);
    let camera = get_camera(&renderer);
    let mut buffer = vec![0; renderer.render_options().buffer_len()];

    c.bench_function(name, |b| {
        b.iter(|| {
            renderer
                .render_to_buffer(black_box(&camera), &mut buffer)
                .unwrap();
        });
    });
}

pub fn render_mip(c: &mut Criterion) {
    bench_mode(c, "render mip", RenderModeKind::MaximumIntensity, false);
}

pub fn render_accumulative(c: &mut Criterion) {
    bench_mode(c, "render accumulative", RenderModeKind::Accumulative, false);
}

pub fn render_accumulative_ert(c: &mut Criterion) {
    bench_mode(c, "render accumulative ert", RenderModeKind::Accumulative, true);
}

pub fn render_first_hit(c: &mut Criterion) {
    bench_mode(
        c,
        "render first hit",
        RenderModeKind::FirstHitSolidColor,
        false,
    );
}

pub fn render_phong(c: &mut Criterion) {
    bench_mode(c, "render phong", RenderModeKind::PhongShaded, false);
}
