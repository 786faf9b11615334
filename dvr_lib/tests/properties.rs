use dvr_lib::{
    color,
    cutting_plane::CuttingPlane,
    transfer_function::{
        IsoBand, IsoControlPoint, IsoFalloff, TransferFunction, TransferFunctionState,
    },
    OrbitCamera,
};
use nalgebra::{point, vector};
use proptest::prelude::*;

fn control_point(i: usize, density: f32, opacity: f32) -> IsoControlPoint {
    IsoControlPoint::new(format!("p{i}"), density, opacity, color::white())
}

#[derive(Debug, Clone)]
enum Edit {
    Add,
    Remove(usize),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![Just(Edit::Add), (0..8_usize).prop_map(Edit::Remove)]
}

proptest! {
    #[test]
    fn slots_sorted_and_padded(densities in prop::collection::vec(0.0_f32..=1.0, 1..=5)) {
        let points: Vec<_> = densities
            .iter()
            .enumerate()
            .map(|(i, &d)| control_point(i, d, 0.5))
            .collect();
        let state = TransferFunctionState::from_points(&points);

        let active = densities.len().min(4);
        prop_assert_eq!(state.n_of_active(), active);

        let slots = state.densities();
        for w in slots[..active].windows(2) {
            prop_assert!(w[0] <= w[1]);
        }
        for &d in &slots[active..] {
            prop_assert!(d < 0.0);
        }

        // the serialized points are the lowest densities
        let mut sorted = densities.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        prop_assert_eq!(&slots[..active], &sorted[..active]);
    }

    #[test]
    fn point_count_stays_in_bounds(edits in prop::collection::vec(edit(), 0..40)) {
        let mut tf = TransferFunction::default();
        for e in edits {
            match e {
                Edit::Add => {
                    let before = tf.len();
                    let res = tf.add_point();
                    prop_assert_eq!(res.is_ok(), before < 5);
                }
                Edit::Remove(i) => {
                    let ids: Vec<String> = tf.points().iter().map(|p| p.id.clone()).collect();
                    let id = &ids[i % ids.len()];
                    let before = tf.len();
                    let res = tf.remove_point(id);
                    prop_assert_eq!(res.is_ok(), before > 1);
                }
            }
            prop_assert!((1..=5).contains(&tf.len()));
            prop_assert_eq!(tf.state().n_of_active(), tf.len().min(4));
        }
    }

    #[test]
    fn binary_hit_iff_within_range(
        sample in 0.0_f32..=1.0,
        density in 0.0_f32..=1.0,
        range in 0.001_f32..=1.0,
    ) {
        let state = TransferFunctionState::from_points(&[control_point(0, density, 1.0)]);
        let band = IsoBand::new(range, IsoFalloff::Binary);

        let hit = state.iso_match(sample, band);
        prop_assert_eq!(hit.is_some(), (sample - density).abs() <= range);
        if let Some(hit) = hit {
            prop_assert_eq!(hit.weight, 1.0);
        }
    }

    #[test]
    fn linear_lookup_opacity_in_unit_range(
        sample in 0.0_f32..=1.0,
        densities in prop::collection::vec(0.0_f32..=1.0, 1..=4),
        range in 0.001_f32..=1.0,
    ) {
        let points: Vec<_> = densities
            .iter()
            .enumerate()
            .map(|(i, &d)| control_point(i, d, 1.0))
            .collect();
        let state = TransferFunctionState::from_points(&points);
        let rgba = state.lookup(sample, IsoBand::new(range, IsoFalloff::Linear));
        prop_assert!((0.0..=1.0).contains(&rgba.w));
    }

    #[test]
    fn double_flip_restores_partition(
        pos in prop::array::uniform3(-10.0_f32..10.0),
        angles in prop::array::uniform3(-3.2_f32..3.2),
        p in prop::array::uniform3(-20.0_f32..20.0),
    ) {
        let mut plane = CuttingPlane::new();
        plane.set_enabled(true);
        plane.set_transform(
            point![pos[0], pos[1], pos[2]],
            vector![angles[0], angles[1], angles[2]],
        );
        let p = point![p[0], p[1], p[2]];

        let before = plane.uniform().unwrap();
        plane.flipped = true;
        let flipped = plane.uniform().unwrap();
        plane.flipped = false;
        let after = plane.uniform().unwrap();

        prop_assert_eq!(before, after);
        prop_assert_eq!(before.includes(&p), after.includes(&p));
        // off-plane points switch sides
        if before.signed_distance(&p).abs() > 1e-3 {
            prop_assert_ne!(before.includes(&p), flipped.includes(&p));
        }
    }

    #[test]
    fn orbit_radius_clamped(wheel in prop::collection::vec(-500.0_f32..500.0, 0..50)) {
        let mut camera = OrbitCamera::for_extent(vector![64.0, 64.0, 32.0]);
        let (min, max) = camera.radius_limits();
        for delta in wheel {
            camera.wheel(delta);
            prop_assert!(camera.radius() >= min && camera.radius() <= max);
        }
    }

    #[test]
    fn orbit_elevation_stays_below_poles(
        drags in prop::collection::vec((-300.0_f32..300.0, -300.0_f32..300.0), 0..30)
    ) {
        let mut camera = OrbitCamera::new(10.0);
        camera.pointer_down(0.0, 0.0);
        let mut at = (0.0, 0.0);
        for (dx, dy) in drags {
            at = (at.0 + dx, at.1 + dy);
            camera.pointer_move(at.0, at.1);
            let (_, theta) = camera.angles();
            prop_assert!(theta.abs() <= std::f32::consts::FRAC_PI_2);
        }
    }
}
