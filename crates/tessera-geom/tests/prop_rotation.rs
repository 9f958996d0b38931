use proptest::prelude::*;
use tessera_geom::{Axis, Mat3, Vec3};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn arb_axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Rotations preserve length
    #[test]
    fn rotation_preserves_length(axis in arb_axis(), deg in -360.0f32..360.0, v in arb_vec3()) {
        let m = Mat3::from_axis_degrees(axis, deg);
        let r = m.mul_vec(v);
        prop_assert!(approx(r.length(), v.length(), 1e-2));
    }

    // Rotating by a then -a returns the input
    #[test]
    fn rotation_inverse_roundtrip(axis in arb_axis(), deg in -360.0f32..360.0, v in arb_vec3()) {
        let fwd = Mat3::from_axis_degrees(axis, deg);
        let back = Mat3::from_axis_degrees(axis, -deg);
        let r = back.mul_vec(fwd.mul_vec(v));
        prop_assert!(approx(r.x, v.x, 1e-2) && approx(r.y, v.y, 1e-2) && approx(r.z, v.z, 1e-2));
    }

    // Quarter turns map grid directions onto grid directions
    #[test]
    fn quarter_turns_keep_directions_on_grid(axis in arb_axis(), steps in 0i32..8) {
        let m = Mat3::from_axis_degrees(axis, steps as f32 * 90.0);
        for d in [[1, 0, 0], [0, 1, 0], [0, 0, 1], [-1, 0, 0], [0, -1, 0], [0, 0, -1]] {
            let r = m.mul_dir(d);
            let manhattan: i32 = r.iter().map(|c| c.abs()).sum();
            prop_assert_eq!(manhattan, 1);
        }
    }
}
