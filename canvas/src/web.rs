//! Browser adapter: draws scenes to a 2D canvas context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only scene and camera and produces pixels; it does not
//! mutate any engine state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`Engine::render`]) hands the result to the host.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::Camera;
use crate::engine::EngineCore;
use crate::render::{Primitive, PrimitiveShape, Scene};
use crate::renderer::SceneRenderer;

/// Dash segment length in screen pixels for previews.
const PREVIEW_DASH_PX: f64 = 6.0;

/// Draws scenes into a canvas 2D context.
pub struct Canvas2dRenderer {
    ctx: CanvasRenderingContext2d,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
}

impl Canvas2dRenderer {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx, viewport_w: 0.0, viewport_h: 0.0, dpr: 1.0 }
    }

    /// Viewport size in CSS pixels and the device pixel ratio.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) {
        self.viewport_w = width;
        self.viewport_h = height;
        self.dpr = dpr;
    }
}

impl SceneRenderer for Canvas2dRenderer {
    type Error = JsValue;

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        ctx.clear_rect(0.0, 0.0, self.viewport_w, self.viewport_h);

        let m = camera.transform();
        ctx.set_transform(
            self.dpr * m.a,
            self.dpr * m.b,
            self.dpr * m.c,
            self.dpr * m.d,
            self.dpr * m.e,
            self.dpr * m.f,
        )?;

        for primitive in &scene.primitives {
            draw_primitive(ctx, primitive, camera.zoom)?;
        }
        Ok(())
    }
}

fn draw_primitive(ctx: &CanvasRenderingContext2d, p: &Primitive, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(p.style.color);
    ctx.set_line_width(p.style.width_px / zoom);
    if p.style.dashed {
        let dash = js_sys::Array::new();
        dash.push(&(PREVIEW_DASH_PX / zoom).into());
        dash.push(&(PREVIEW_DASH_PX / zoom).into());
        ctx.set_line_dash(&dash)?;
    }

    match &p.shape {
        PrimitiveShape::Line { a, b } => {
            ctx.begin_path();
            ctx.move_to(a.x, a.y);
            ctx.line_to(b.x, b.y);
            ctx.stroke();
        }
        PrimitiveShape::Arc { center, radius, start_deg, sweep_deg } => {
            let start = start_deg.to_radians();
            let end = (start_deg + sweep_deg).to_radians();
            ctx.begin_path();
            ctx.arc_with_anticlockwise(center.x, center.y, *radius, start, end, *sweep_deg < 0.0)?;
            ctx.stroke();
        }
        PrimitiveShape::Text { position, text, size } => {
            ctx.set_fill_style_str(p.style.color);
            ctx.set_font(&format!("{size}px sans-serif"));
            ctx.fill_text(text, position.x, position.y)?;
        }
    }

    ctx.restore();
    Ok(())
}

/// The browser engine. Wraps `EngineCore` and owns the canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    renderer: Canvas2dRenderer,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self { canvas, renderer: Canvas2dRenderer::new(ctx), core: EngineCore::default() })
    }

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
            self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
        }
        self.renderer.set_viewport(width_css, height_css, dpr);
        self.core.set_viewport(width_css, height_css);
    }

    /// Animation-frame callback: draw if the engine has anything new.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        match self.core.on_frame() {
            Some(scene) => self.renderer.render(&scene, &self.core.camera),
            None => Ok(()),
        }
    }
}
