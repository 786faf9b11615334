use std::time::Duration;

use dvr_lib::{
    color,
    render::{RenderModeKind, RenderOptions, SettingsUpdate},
    test_helpers,
    transfer_function::IsoFalloff,
    volumetric::{dat_parser, RawFormat},
    Session,
};
use nalgebra::{point, vector};

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 48;

const RED: [u8; 3] = [255, 0, 0];
const BACKGROUND: [u8; 3] = [0, 0, 0];
const TIMEOUT: Duration = Duration::from_secs(10);

fn session() -> Session {
    let render_options = RenderOptions::builder()
        .resolution((WIDTH, HEIGHT))
        .early_ray_termination(true)
        .build()
        .unwrap();
    Session::new(render_options).unwrap()
}

/// Leave a single fully opaque red point at `density`
fn single_red_point(session: &mut Session, density: f32) {
    assert!(session.remove_control_point("iso1"));
    assert!(session.remove_control_point("iso2"));
    assert!(session.move_control_point("iso3", density, 1.0));
    assert!(session.set_control_point_color("iso3", color::new(1.0, 0.0, 0.0)));
}

fn pixel(buffer: &[u8], x: usize, y: usize) -> [u8; 3] {
    let i = 3 * (y * WIDTH + x);
    [buffer[i], buffer[i + 1], buffer[i + 2]]
}

#[test]
fn first_hit_solid_color_end_to_end() {
    let mut session = session();
    single_red_point(&mut session, 0.5);
    session.set_iso_range(0.1);
    session.update_settings(SettingsUpdate {
        render_mode: Some(RenderModeKind::FirstHitSolidColor),
        ..Default::default()
    });

    // 4x4x4 volume, every sample is 0.5
    let bytes = test_helpers::le_bytes(&[100; 64]);
    let format = RawFormat {
        sample_max: 200,
        ..Default::default()
    };
    session.load_volume(4, 4, 4, &bytes, format).unwrap();
    assert!(session.is_ready());

    assert!(session.frame().unwrap());
    // nothing changed, no new image
    assert!(!session.frame().unwrap());

    let framebuffer = session.framebuffer();
    let buffer = framebuffer.lock();
    assert_eq!(buffer.len(), 3 * WIDTH * HEIGHT);

    let mut red = 0;
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let p = pixel(&buffer, x, y);
            assert!(p == RED || p == BACKGROUND, "pixel ({x}, {y}) is {p:?}");
            if p == RED {
                red += 1;
            }
        }
    }

    assert_eq!(pixel(&buffer, WIDTH / 2, HEIGHT / 2), RED);
    assert_eq!(pixel(&buffer, 0, 0), BACKGROUND);
    assert_eq!(pixel(&buffer, WIDTH - 1, HEIGHT - 1), BACKGROUND);
    assert!(red > 0 && red < WIDTH * HEIGHT);
}

#[test]
fn binary_falloff_misses_outside_range() {
    let mut session = session();
    single_red_point(&mut session, 0.8);
    session.set_iso_range(0.1);
    session.update_settings(SettingsUpdate {
        render_mode: Some(RenderModeKind::FirstHitSolidColor),
        iso_falloff_mode: Some(IsoFalloff::Binary),
        ..Default::default()
    });
    session.install_volume(test_helpers::uniform_volume(4, 0.5));

    assert!(session.frame().unwrap());
    let framebuffer = session.framebuffer();
    let buffer = framebuffer.lock();
    assert!(buffer.iter().all(|&b| b == 0));
}

#[test]
fn histogram_of_spread_volume() {
    let mut session = session();
    session.install_volume(test_helpers::spread_volume(vector![10, 10, 10]));

    assert!(session.wait_histogram(TIMEOUT));
    let bins = session.histogram().unwrap();
    assert_eq!(bins.counts().len(), 100);
    assert_eq!(bins.total(), 1000);
    assert!(bins.counts().iter().all(|&c| c == 10));
}

#[test]
fn histogram_respects_cutting_plane() {
    let mut session = session();
    session.install_volume(test_helpers::spread_volume(vector![10, 10, 10]));
    assert!(session.wait_histogram(TIMEOUT));

    // keep z > 0, half of the slices
    session.update_settings(SettingsUpdate {
        cutting_plane_enabled: Some(true),
        cutting_plane_position: Some(point![0.0, 0.0, 0.0]),
        cutting_plane_rotation: Some(vector![0.0, 0.0, 0.0]),
        ..Default::default()
    });
    assert!(session.wait_histogram(TIMEOUT));
    assert_eq!(session.histogram().unwrap().total(), 500);

    session.update_settings(SettingsUpdate {
        cutting_plane_enabled: Some(false),
        ..Default::default()
    });
    assert!(session.wait_histogram(TIMEOUT));
    assert_eq!(session.histogram().unwrap().total(), 1000);
}

#[test]
fn settings_before_volume_are_kept() {
    let mut session = session();
    let changed = session.update_settings(SettingsUpdate {
        render_mode: Some(RenderModeKind::MaximumIntensity),
        step_size: Some(0.5),
        ..Default::default()
    });
    assert!(changed);
    assert!(!session.is_ready());
    assert!(!session.frame().unwrap());

    session.install_volume(test_helpers::uniform_volume(4, 1.0));
    assert_eq!(session.settings().mode, RenderModeKind::MaximumIntensity);
    assert_eq!(session.settings().step_size(), 0.5);

    assert!(session.frame().unwrap());
    let framebuffer = session.framebuffer();
    let buffer = framebuffer.lock();
    // foreground is white, full density
    assert_eq!(pixel(&buffer, WIDTH / 2, HEIGHT / 2), [255, 255, 255]);
}

#[test]
fn load_dat_file() {
    let path = std::env::temp_dir().join(format!("dvr_lib_test_{}.dat", std::process::id()));

    let mut samples = vec![2, 2, 2];
    samples.extend([4095; 8]);
    std::fs::write(&path, test_helpers::le_bytes(&samples)).unwrap();

    let mut session = session();
    let res = session.load_file(&path, dat_parser);
    std::fs::remove_file(&path).unwrap();
    res.unwrap();

    let volume = session.volume().unwrap();
    assert!(volume.voxels().iter().all(|&v| v == 1.0));
}

#[test]
fn failed_load_keeps_previous_volume() {
    let mut session = session();
    session.install_volume(test_helpers::uniform_volume(2, 0.25));

    let bytes = test_helpers::le_bytes(&[1, 2, 3]);
    assert!(session
        .load_volume(2, 2, 2, &bytes, RawFormat::default())
        .is_err());
    assert_eq!(session.volume().unwrap().voxels(), &[0.25; 8]);
}
