//! Canvas 2D backend for the browser build

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::DrawCommand;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the element's layout size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Replay a frame's draw list in order
    pub fn render(&self, commands: &[DrawCommand]) -> Result<(), JsValue> {
        for command in commands {
            match command {
                DrawCommand::Clear {
                    width,
                    height,
                    color,
                } => {
                    self.ctx.set_fill_style_str(&color.css());
                    self.ctx.fill_rect(0.0, 0.0, *width, *height);
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    self.ctx.set_fill_style_str(color.css());
                    self.ctx.begin_path();
                    self.ctx.arc(center.x, center.y, *radius, 0.0, TAU)?;
                    self.ctx.fill();
                }
            }
        }
        Ok(())
    }
}
