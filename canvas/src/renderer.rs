//! Renderer adapters that consume a [`Scene`].
//!
//! The engine only produces scenes; an adapter decides how they reach the
//! screen. [`SvgMarkupRenderer`] regenerates the annotation-layer markup that
//! sits above the base drawing. Because that layer shares the base drawing's
//! view box, coordinates stay in drawing space and stroke widths use
//! `vector-effect="non-scaling-stroke"` to remain in screen pixels.

#[cfg(test)]
#[path = "renderer_test.rs"]
mod renderer_test;

use std::fmt::Write;

use crate::camera::Camera;
use crate::render::{Primitive, PrimitiveShape, Scene};

/// A rendering backend for annotation scenes.
pub trait SceneRenderer {
    type Error;

    /// Draw `scene` as seen through `camera`, replacing the previous frame.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if drawing fails.
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error>;
}

/// Produces the `<g class="layer-user">` markup for the annotation layer.
#[derive(Debug, Default)]
pub struct SvgMarkupRenderer {
    markup: String,
    renders: u64,
}

impl SvgMarkupRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the last rendered frame.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// How many frames have been rendered.
    #[must_use]
    pub fn renders(&self) -> u64 {
        self.renders
    }
}

impl SceneRenderer for SvgMarkupRenderer {
    type Error = std::fmt::Error;

    fn render(&mut self, scene: &Scene, _camera: &Camera) -> Result<(), Self::Error> {
        let mut out = String::with_capacity(64 + scene.len() * 96);
        out.push_str(r#"<g class="layer-user">"#);
        for primitive in &scene.primitives {
            write_primitive(&mut out, primitive)?;
        }
        out.push_str("</g>");
        self.markup = out;
        self.renders += 1;
        Ok(())
    }
}

fn write_primitive(out: &mut String, p: &Primitive) -> std::fmt::Result {
    let id = match p.element {
        Some(id) => format!(r#" data-id="{id}""#),
        None => r#" class="preview""#.to_owned(),
    };
    let dash = if p.style.dashed { r#" stroke-dasharray="6 4""# } else { "" };
    let stroke = format!(
        r#" stroke="{}" stroke-width="{}"{dash} vector-effect="non-scaling-stroke""#,
        p.style.color,
        num(p.style.width_px)
    );
    match &p.shape {
        PrimitiveShape::Line { a, b } => write!(
            out,
            r#"<line{id} x1="{}" y1="{}" x2="{}" y2="{}"{stroke}/>"#,
            num(a.x),
            num(a.y),
            num(b.x),
            num(b.y)
        ),
        PrimitiveShape::Arc { center, radius, start_deg, sweep_deg } => {
            let (sx, sy) = polar(center.x, center.y, *radius, *start_deg);
            let (ex, ey) = polar(center.x, center.y, *radius, start_deg + sweep_deg);
            let large = u8::from(sweep_deg.abs() > 180.0);
            let sweep = u8::from(*sweep_deg > 0.0);
            write!(
                out,
                r#"<path{id} d="M {} {} A {r} {r} 0 {large} {sweep} {} {}" fill="none"{stroke}/>"#,
                num(sx),
                num(sy),
                num(ex),
                num(ey),
                r = num(*radius)
            )
        }
        PrimitiveShape::Text { position, text, size } => write!(
            out,
            r#"<text{id} x="{}" y="{}" font-size="{}" fill="{}">{}</text>"#,
            num(position.x),
            num(position.y),
            num(*size),
            p.style.color,
            escape(text)
        ),
    }
}

fn polar(cx: f64, cy: f64, r: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (cx + r * rad.cos(), cy + r * rad.sin())
}

/// Compact number formatting: at most three decimals, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
