//! Per-tag geometry readers.
//!
//! Each reader validates its own numeric attributes and reports a
//! [`SkipReason`] instead of failing the document. Numbers and point lists
//! are read with `svgtypes`, so exponents, compact separators and a `px`
//! unit are accepted the way an SVG renderer accepts them.

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;

use plan_geom::Point;
use roxmltree::Node;
use svgtypes::{Length, LengthUnit, NumberListParser};

use crate::error::SkipReason;
use crate::model::Style;
use crate::palette::normalize_color;
use crate::path::parse_path_data;

/// Geometry read from one shape tag.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Geometry {
    pub points: Vec<Point>,
    pub closed: bool,
    pub extra: ShapeExtra,
}

/// Tag-specific measurements the element detail is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ShapeExtra {
    None,
    Rect { width: f64, height: f64 },
    Circle { radius: f64 },
}

/// Read the geometry of a shape tag, or `None` for tags that carry none.
/// `text` is handled by the caller because its content follows the open tag.
pub(crate) fn read_geometry(tag: Node<'_, '_>) -> Option<Result<Geometry, SkipReason>> {
    let geometry = match tag.tag_name().name() {
        "line" => read_line(tag),
        "rect" => read_rect(tag),
        "polyline" => read_point_list(tag, 2, false),
        "polygon" => read_point_list(tag, 3, true),
        "circle" => read_circle(tag),
        "path" => read_path(tag),
        _ => return None,
    };
    Some(geometry)
}

fn read_path(tag: Node<'_, '_>) -> Result<Geometry, SkipReason> {
    let outline = parse_path_data(required_attr(tag, "d")?)?;
    Ok(Geometry { points: outline.points, closed: outline.closed, extra: ShapeExtra::None })
}

fn read_line(tag: Node<'_, '_>) -> Result<Geometry, SkipReason> {
    let a = Point::new(number_or(tag, "x1", 0.0)?, number_or(tag, "y1", 0.0)?);
    let b = Point::new(number_or(tag, "x2", 0.0)?, number_or(tag, "y2", 0.0)?);
    if a == b {
        return Err(SkipReason::ZeroLength);
    }
    Ok(Geometry { points: vec![a, b], closed: false, extra: ShapeExtra::None })
}

fn read_rect(tag: Node<'_, '_>) -> Result<Geometry, SkipReason> {
    let x = number_or(tag, "x", 0.0)?;
    let y = number_or(tag, "y", 0.0)?;
    let width = required_number(tag, "width")?;
    let height = required_number(tag, "height")?;
    if width <= 0.0 || height <= 0.0 {
        return Err(SkipReason::ZeroArea);
    }
    let points = vec![
        Point::new(x, y),
        Point::new(x + width, y),
        Point::new(x + width, y + height),
        Point::new(x, y + height),
    ];
    Ok(Geometry { points, closed: true, extra: ShapeExtra::Rect { width, height } })
}

fn read_circle(tag: Node<'_, '_>) -> Result<Geometry, SkipReason> {
    let center = Point::new(number_or(tag, "cx", 0.0)?, number_or(tag, "cy", 0.0)?);
    let radius = required_number(tag, "r")?;
    if radius <= 0.0 {
        return Err(SkipReason::NonPositiveRadius);
    }
    Ok(Geometry { points: vec![center], closed: false, extra: ShapeExtra::Circle { radius } })
}

fn read_point_list(tag: Node<'_, '_>, needed: usize, closed: bool) -> Result<Geometry, SkipReason> {
    let raw = required_attr(tag, "points")?;
    let mut values = Vec::new();
    for value in NumberListParser::from(raw) {
        match value {
            Ok(v) if v.is_finite() => values.push(v),
            _ => return Err(SkipReason::InvalidNumber { attr: "points".to_owned() }),
        }
    }
    if values.len() % 2 != 0 {
        return Err(SkipReason::OddCoordinates);
    }
    let points: Vec<Point> = values.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect();
    if points.len() < needed {
        return Err(SkipReason::TooFewPoints { found: points.len(), needed });
    }
    Ok(Geometry { points, closed, extra: ShapeExtra::None })
}

/// Anchor and font size of a `<text>` element.
pub(crate) fn read_text_anchor(tag: Node<'_, '_>) -> Result<(Point, Option<f64>), SkipReason> {
    let anchor = Point::new(first_number_or(tag, "x")?, first_number_or(tag, "y")?);
    let font_size = match style_value(tag, "font-size") {
        Some(raw) => Some(parse_number(&raw, "font-size")?),
        None => None,
    };
    Ok((anchor, font_size))
}

/// Stroke, fill and stroke width. Inline `style` declarations override
/// presentation attributes.
pub(crate) fn read_style(tag: Node<'_, '_>) -> Style {
    let stroke = style_value(tag, "stroke").map(|c| normalize_color(&c));
    let fill = style_value(tag, "fill").map(|c| normalize_color(&c));
    let stroke_width = match style_value(tag, "stroke-width").map(|raw| parse_number(&raw, "stroke-width")) {
        Some(Ok(width)) => Some(width),
        _ => None,
    };
    Style { stroke, fill, stroke_width }
}

/// Property from the inline `style` attribute, falling back to the
/// presentation attribute of the same name.
pub(crate) fn style_value(tag: Node<'_, '_>, property: &str) -> Option<String> {
    let inline = tag.attribute("style").and_then(|style| {
        style.split(';').find_map(|decl| {
            let (key, value) = decl.split_once(':')?;
            (key.trim().eq_ignore_ascii_case(property)).then(|| value.trim().to_owned())
        })
    });
    inline
        .or_else(|| tag.attribute(property).map(|v| v.trim().to_owned()))
        .filter(|v| !v.is_empty())
}

fn required_attr<'a>(tag: Node<'a, '_>, attr: &str) -> Result<&'a str, SkipReason> {
    tag.attribute(attr)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SkipReason::MissingAttribute { attr: attr.to_owned() })
}

fn required_number(tag: Node<'_, '_>, attr: &str) -> Result<f64, SkipReason> {
    parse_number(required_attr(tag, attr)?, attr)
}

fn number_or(tag: Node<'_, '_>, attr: &str, default: f64) -> Result<f64, SkipReason> {
    match tag.attribute(attr).filter(|v| !v.trim().is_empty()) {
        Some(raw) => parse_number(raw, attr),
        None => Ok(default),
    }
}

/// Text `x`/`y` may be a list; the first entry positions the anchor.
fn first_number_or(tag: Node<'_, '_>, attr: &str) -> Result<f64, SkipReason> {
    let Some(raw) = tag.attribute(attr).filter(|v| !v.trim().is_empty()) else {
        return Ok(0.0);
    };
    match NumberListParser::from(raw).next() {
        Some(Ok(v)) if v.is_finite() => Ok(v),
        _ => Err(SkipReason::InvalidNumber { attr: attr.to_owned() }),
    }
}

/// Parse a finite unitless or `px` length.
pub(crate) fn parse_number(raw: &str, attr: &str) -> Result<f64, SkipReason> {
    match raw.trim().parse::<Length>() {
        Ok(Length { number, unit: LengthUnit::None | LengthUnit::Px, .. }) if number.is_finite() => Ok(number),
        _ => Err(SkipReason::InvalidNumber { attr: attr.to_owned() }),
    }
}
