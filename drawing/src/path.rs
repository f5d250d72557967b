//! Path-data (`d` attribute) reader.
//!
//! Segments come from `svgtypes::PathParser`. Straight-segment commands
//! (`M L H V Z`, absolute and relative) produce points. Curve commands
//! (`C S Q T A`) keep only their end point, so a curved outline degrades to a
//! polyline through its segment ends.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use plan_geom::Point;
use svgtypes::{PathParser, PathSegment};

use crate::error::SkipReason;

/// Points and closure flag read from a path's `d` attribute.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PathOutline {
    pub points: Vec<Point>,
    pub closed: bool,
}

pub(crate) fn parse_path_data(d: &str) -> Result<PathOutline, SkipReason> {
    let mut points: Vec<Point> = Vec::new();
    let mut closed = false;
    let mut current = Point::default();
    let mut subpath_start = Point::default();

    for segment in PathParser::from(d) {
        let segment = segment.map_err(|e| SkipReason::PathData { detail: e.to_string() })?;
        let (abs, end) = match segment {
            PathSegment::ClosePath { .. } => {
                closed = true;
                current = subpath_start;
                continue;
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { current.x + x };
                (true, Point::new(x, current.y))
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { current.y + y };
                (true, Point::new(current.x, y))
            }
            PathSegment::MoveTo { abs, x, y }
            | PathSegment::LineTo { abs, x, y }
            | PathSegment::CurveTo { abs, x, y, .. }
            | PathSegment::SmoothCurveTo { abs, x, y, .. }
            | PathSegment::Quadratic { abs, x, y, .. }
            | PathSegment::SmoothQuadratic { abs, x, y }
            | PathSegment::EllipticalArc { abs, x, y, .. } => (abs, Point::new(x, y)),
        };
        let next = if abs { end } else { current + end };
        if !(next.x.is_finite() && next.y.is_finite()) {
            return Err(SkipReason::PathData { detail: "coordinate is not finite".to_owned() });
        }
        if matches!(segment, PathSegment::MoveTo { .. }) {
            subpath_start = next;
        }
        current = next;
        points.push(next);
    }

    if points.len() < 2 {
        return Err(SkipReason::TooFewPoints { found: points.len(), needed: 2 });
    }
    Ok(PathOutline { points, closed })
}
