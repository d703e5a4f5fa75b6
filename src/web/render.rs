//! Canvas drawing. Reads game state, never mutates it.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::game::GameState;
use crate::target::Target;

const BANNER_FONT: &str = "800 34px system-ui, -apple-system, Segoe UI, Roboto, Arial";
const SUBTITLE_FONT: &str = "500 16px system-ui, -apple-system, Segoe UI, Roboto, Arial";

pub fn draw_frame(ctx: &CanvasRenderingContext2d, game: &GameState) -> Result<(), JsValue> {
    let (w, h) = game.canvas_size();
    draw_background(ctx, w, h)?;
    for t in game.targets() {
        draw_target(ctx, t)?;
    }
    if game.is_complete() {
        draw_banner(ctx, w, h)?;
    }
    Ok(())
}

fn draw_background(ctx: &CanvasRenderingContext2d, w: f64, h: f64) -> Result<(), JsValue> {
    ctx.clear_rect(0.0, 0.0, w, h);

    let grd = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    grd.add_color_stop(0.0, "rgba(124,58,237,0.05)")?;
    grd.add_color_stop(0.5, "rgba(34,211,238,0.04)")?;
    grd.add_color_stop(1.0, "rgba(255,61,127,0.04)")?;
    ctx.set_fill_style(&grd);
    ctx.fill_rect(0.0, 0.0, w, h);

    // Fixed star field; positions wrap with the canvas size.
    ctx.save();
    ctx.set_global_alpha(0.35);
    ctx.set_fill_style(&JsValue::from_str("rgba(255,255,255,0.06)"));
    let (wi, hi) = (w.max(1.0) as u32, h.max(1.0) as u32);
    for i in 0..36u32 {
        let x = (i * 73) % wi;
        let y = (i * 41) % hi;
        ctx.fill_rect(x as f64, y as f64, 2.0, 2.0);
    }
    ctx.restore();
    Ok(())
}

fn draw_target(ctx: &CanvasRenderingContext2d, t: &Target) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(t.alpha.clamp(0.0, 1.0));

    // glow
    ctx.begin_path();
    ctx.arc(t.x, t.y, t.r + 7.0, 0.0, TAU)?;
    let glow = if t.hovered { "rgba(255,255,255,0.10)" } else { t.colors.glow };
    ctx.set_fill_style(&JsValue::from_str(glow));
    ctx.fill();

    // body + ring
    ctx.begin_path();
    ctx.arc(t.x, t.y, t.r, 0.0, TAU)?;
    let body = if t.hovered { t.colors.hover } else { t.colors.base };
    ctx.set_fill_style(&JsValue::from_str(body));
    ctx.fill();
    ctx.set_line_width(2.0);
    let ring = if t.hovered { "rgba(255,255,255,0.26)" } else { "rgba(255,255,255,0.16)" };
    ctx.set_stroke_style(&JsValue::from_str(ring));
    ctx.stroke();

    // highlight
    ctx.begin_path();
    ctx.arc(t.x - t.r * 0.25, t.y - t.r * 0.25, (t.r * 0.18).max(2.0), 0.0, TAU)?;
    ctx.set_fill_style(&JsValue::from_str("rgba(255,255,255,0.25)"));
    ctx.fill();

    ctx.restore();
    Ok(())
}

fn draw_banner(ctx: &CanvasRenderingContext2d, w: f64, h: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_text_align("center");
    ctx.set_fill_style(&JsValue::from_str("rgba(255,255,255,0.85)"));
    ctx.set_font(BANNER_FONT);
    ctx.fill_text("COMPLETE!", w / 2.0, h / 2.0 - 10.0)?;

    ctx.set_fill_style(&JsValue::from_str("rgba(255,255,255,0.65)"));
    ctx.set_font(SUBTITLE_FONT);
    ctx.fill_text("Restart to play again.", w / 2.0, h / 2.0 + 22.0)?;
    ctx.restore();
    Ok(())
}
