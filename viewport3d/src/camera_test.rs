use super::*;

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-3
}

#[test]
fn front_mode_looks_along_negative_z() {
    let mut cam = OrbitCamera { target: Vec3::new(0.0, 5.0, 0.0), distance: 50.0, ..OrbitCamera::default() };
    cam.set_mode(CameraMode::Front);
    assert!(close(cam.eye(), Vec3::new(0.0, 5.0, 50.0)));
}

#[test]
fn top_mode_is_above_target() {
    let mut cam = OrbitCamera { distance: 50.0, ..OrbitCamera::default() };
    cam.set_mode(CameraMode::Top);
    let eye = cam.eye();
    assert!(eye.y > 49.0);
    assert!(eye.x.abs() < 1.0 && eye.z.abs() < 1.0);
}

#[test]
fn orbit_clamps_pitch_and_is_ignored_in_presets() {
    let mut cam = OrbitCamera::default();
    cam.orbit(0.0, 10.0);
    assert!((cam.pitch - 89.0_f32.to_radians()).abs() < 1e-6);

    cam.set_mode(CameraMode::Front);
    cam.orbit(1.0, 1.0);
    assert!(cam.yaw.abs() < 1e-6 && cam.pitch.abs() < 1e-6);
}

#[test]
fn fit_centers_and_backs_off() {
    let mut cam = OrbitCamera::default();
    cam.fit_to_bounds(Vec3::new(-20.0, 0.0, -10.0), Vec3::new(20.0, 30.0, 10.0));
    assert!(close(cam.target, Vec3::new(0.0, 15.0, 0.0)));
    let expected = 40.0 * 1.2 / (45.0_f32.to_radians() / 2.0).tan();
    assert!((cam.distance - expected).abs() < 1e-3);
}

#[test]
fn zoom_ignores_bad_factors() {
    let mut cam = OrbitCamera::default();
    cam.zoom(2.0);
    assert!((cam.distance - 50.0).abs() < 1e-4);
    cam.zoom(0.0);
    cam.zoom(f32::NAN);
    assert!((cam.distance - 50.0).abs() < 1e-4);
}

#[test]
fn view_matrix_maps_target_in_front_of_eye() {
    let cam = OrbitCamera::default();
    let p = cam.view_matrix().transform_point3(cam.target);
    assert!(p.z < 0.0);
    assert!(p.x.abs() < 1e-3 && p.y.abs() < 1e-3);
}
