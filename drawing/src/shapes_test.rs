#![allow(clippy::float_cmp)]

use super::*;

/// Run `read` against the single element in `markup`.
fn with_node<R>(markup: &str, read: impl FnOnce(roxmltree::Node<'_, '_>) -> R) -> R {
    let document = roxmltree::Document::parse(markup).unwrap();
    read(document.root_element())
}

fn geometry(markup: &str) -> Result<Geometry, SkipReason> {
    with_node(markup, |node| read_geometry(node).unwrap())
}

#[test]
fn rect_corners_clockwise_from_origin() {
    let g = geometry("<rect width='10' height='5'/>").unwrap();
    assert_eq!(
        g.points,
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 5.0), Point::new(0.0, 5.0)]
    );
    assert!(g.closed);
    assert_eq!(g.extra, ShapeExtra::Rect { width: 10.0, height: 5.0 });
}

#[test]
fn rect_without_area_is_skipped() {
    let t = "<rect x='1' y='1' width='0' height='5'/>";
    assert_eq!(geometry(t), Err(SkipReason::ZeroArea));
}

#[test]
fn rect_missing_height_is_skipped() {
    let t = "<rect width='3'/>";
    assert_eq!(geometry(t), Err(SkipReason::MissingAttribute { attr: "height".to_owned() }));
}

#[test]
fn px_suffix_tolerated_garbage_rejected() {
    let ok = geometry("<line x1='0px' y1='0' x2='4px' y2='0'/>").unwrap();
    assert_eq!(ok.points[1], Point::new(4.0, 0.0));

    let bad = geometry("<line x1='zero' x2='4'/>");
    assert_eq!(bad, Err(SkipReason::InvalidNumber { attr: "x1".to_owned() }));

    let inf = geometry("<line x1='inf' x2='4'/>");
    assert_eq!(inf, Err(SkipReason::InvalidNumber { attr: "x1".to_owned() }));
}

#[test]
fn degenerate_line_is_skipped() {
    let t = "<line x1='2' y1='2' x2='2' y2='2'/>";
    assert_eq!(geometry(t), Err(SkipReason::ZeroLength));
}

#[test]
fn circle_keeps_center_and_radius() {
    let g = geometry("<circle cx='3' cy='4' r='0.35'/>").unwrap();
    assert_eq!(g.points, vec![Point::new(3.0, 4.0)]);
    assert_eq!(g.extra, ShapeExtra::Circle { radius: 0.35 });
    assert_eq!(geometry("<circle r='-1'/>"), Err(SkipReason::NonPositiveRadius));
}

#[test]
fn point_lists() {
    let g = geometry("<polyline points='0,0 5,0 5,5'/>").unwrap();
    assert_eq!(g.points.len(), 3);
    assert!(!g.closed);

    let poly = geometry("<polygon points='0 0, 4 0, 4 3'/>").unwrap();
    assert!(poly.closed);

    assert_eq!(geometry("<polyline points='0,0 5'/>"), Err(SkipReason::OddCoordinates));
    assert_eq!(
        geometry("<polygon points='0,0 5,5'/>"),
        Err(SkipReason::TooFewPoints { found: 2, needed: 3 })
    );
}

#[test]
fn path_goes_through_path_reader() {
    let g = geometry("<path d='M0 0 L 3 0 L 3 3 Z'/>").unwrap();
    assert_eq!(g.points.len(), 3);
    assert!(g.closed);
    assert_eq!(geometry("<path/>"), Err(SkipReason::MissingAttribute { attr: "d".to_owned() }));
}

#[test]
fn non_shape_tags_have_no_geometry() {
    assert!(with_node("<g/>", read_geometry).is_none());
    assert!(with_node("<text/>", read_geometry).is_none());
}

#[test]
fn inline_style_overrides_attributes() {
    let t = "<line stroke='#000' style='fill: none; stroke:#8A5A3C ;stroke-width:0.5px' stroke-width='2'/>";
    let style = with_node(t, read_style);
    assert_eq!(style.stroke.as_deref(), Some("#8a5a3c"));
    assert_eq!(style.fill.as_deref(), Some("none"));
    assert_eq!(style.stroke_width, Some(0.5));
}

#[test]
fn text_anchor_uses_first_list_entry() {
    let t = "<text x='4 5 6' y='2' font-size='1.2'/>";
    let (anchor, size) = with_node(t, read_text_anchor).unwrap();
    assert_eq!(anchor, Point::new(4.0, 2.0));
    assert_eq!(size, Some(1.2));
}
