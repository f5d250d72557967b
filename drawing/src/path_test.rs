use super::*;

fn points(d: &str) -> Vec<Point> {
    parse_path_data(d).unwrap().points
}

#[test]
fn absolute_lines() {
    assert_eq!(
        points("M 0 0 L 10 0 L 10 5"),
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 5.0)]
    );
}

#[test]
fn relative_and_axis_commands() {
    assert_eq!(
        points("m1,1 h4 v2 H0 V0"),
        vec![
            Point::new(1.0, 1.0),
            Point::new(5.0, 1.0),
            Point::new(5.0, 3.0),
            Point::new(0.0, 3.0),
            Point::new(0.0, 0.0),
        ]
    );
}

#[test]
fn implicit_lineto_after_move() {
    assert_eq!(points("M0 0 3 4"), vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
}

#[test]
fn close_sets_flag() {
    let outline = parse_path_data("M0 0 L4 0 L4 4 Z").unwrap();
    assert!(outline.closed);
    assert_eq!(outline.points.len(), 3);
}

#[test]
fn curves_keep_only_end_points() {
    assert_eq!(
        points("M0 0 C 1 1 2 2 3 0 Q 4 4 6 0 A 1 1 0 0 1 8 0"),
        vec![Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(6.0, 0.0), Point::new(8.0, 0.0)]
    );
}

#[test]
fn relative_after_close_starts_from_subpath_origin() {
    assert_eq!(
        points("M2 2 l2 0 z l0 3"),
        vec![Point::new(2.0, 2.0), Point::new(4.0, 2.0), Point::new(2.0, 5.0)]
    );
}

#[test]
fn compact_number_forms() {
    assert_eq!(points("M.5.5L-1-2"), vec![Point::new(0.5, 0.5), Point::new(-1.0, -2.0)]);
    assert_eq!(points("M1e1 0L2E-1 0"), vec![Point::new(10.0, 0.0), Point::new(0.2, 0.0)]);
}

#[test]
fn single_point_is_too_few() {
    assert_eq!(
        parse_path_data("M 3 3"),
        Err(SkipReason::TooFewPoints { found: 1, needed: 2 })
    );
}

#[test]
fn malformed_data_is_path_error() {
    assert!(parse_path_data("0 0 L 1 1").is_err());
    assert!(matches!(parse_path_data("M 0 L 1 1"), Err(SkipReason::PathData { .. })));
    assert!(matches!(parse_path_data("M 0 0 X 1 1"), Err(SkipReason::PathData { .. })));
    assert!(matches!(parse_path_data("M 0 0 L # 1"), Err(SkipReason::PathData { .. })));
}

#[test]
fn smooth_and_relative_curves_track_current_point() {
    assert_eq!(
        points("M1 1 c 1 1 2 2 3 0 s 1 1 2 0 t 4 0"),
        vec![Point::new(1.0, 1.0), Point::new(4.0, 1.0), Point::new(6.0, 1.0), Point::new(10.0, 1.0)]
    );
}
