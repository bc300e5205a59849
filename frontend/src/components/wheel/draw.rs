use std::f64::consts::PI;

use shared::border_styles::{
    metallic_stops, neon_glow_layers, rainbow_stops, BorderStyleConfig, BorderStyleKind,
    FALLBACK_RING_IMAGE,
};
use shared::constants::REFERENCE_WHEEL_SIZE;
use shared::segment::{segment_arc_deg, Segment};
use shared::theme::Theme;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlImageElement};

use super::image_cache::{ImageCache, Resolved};

const BULB_COUNT: usize = 16;

const CENTER_IMAGE_FALLBACK: &str = "/assets/wheel/center.png";
const POINTER_IMAGE_FALLBACK: &str = "/assets/wheel/pointer.png";

/// Everything the renderer needs for one frame. Rebuilt per frame from
/// the animator, the pointer physics and the resolved configuration.
pub struct RenderFrame<'a> {
    pub segments: &'a [Segment],
    pub theme: &'a Theme,
    pub style: &'a BorderStyleConfig,
    pub border_color: Option<&'a str>,
    pub border_width: Option<f64>,
    pub rotation: f64,
    pub pointer_angle: f64,
    pub is_spinning: bool,
    pub show_bulbs: bool,
    pub size: f64,
    pub now_ms: f64,
}

struct Geometry {
    cx: f64,
    cy: f64,
    radius: f64,
    scale: f64,
}

/// Repaints the whole wheel. Called once per animation frame whether or
/// not the wheel is moving, so time-based border styles keep animating
/// at rest.
pub fn draw_wheel(ctx: &CanvasRenderingContext2d, cache: &mut ImageCache, frame: &RenderFrame<'_>) {
    let size = frame.size;
    let scale = size / REFERENCE_WHEEL_SIZE;
    let geometry = Geometry {
        cx: size / 2.0,
        cy: size / 2.0,
        radius: size / 2.0 - 24.0 * scale,
        scale,
    };

    ctx.clear_rect(0.0, 0.0, size, size);
    draw_background(ctx, frame, &geometry);
    if !frame.segments.is_empty() {
        draw_segments(ctx, cache, frame, &geometry);
    }
    draw_border(ctx, cache, frame, &geometry);
    if frame.show_bulbs {
        draw_bulbs(ctx, frame, &geometry);
    }
    draw_inner_shadow(ctx, &geometry);
    draw_center(ctx, cache, frame, &geometry);
    draw_pointer(ctx, cache, frame, &geometry);
}

/// Canvas angle for a wheel angle measured clockwise from 12 o'clock.
fn wheel_rad(deg: f64) -> f64 {
    (deg - 90.0).to_radians()
}

fn draw_background(ctx: &CanvasRenderingContext2d, frame: &RenderFrame<'_>, g: &Geometry) {
    // Soft halo behind the wheel, stronger while spinning.
    let glow_alpha = if frame.is_spinning { 0.25 } else { 0.15 };
    if frame.theme.effects.glow || frame.is_spinning {
        ctx.begin_path();
        ctx.set_fill_style_str(&hex_with_alpha(&frame.theme.accent, glow_alpha));
        let _ = ctx.arc(g.cx, g.cy, g.radius + 14.0 * g.scale, 0.0, 2.0 * PI);
        ctx.fill();
    }

    ctx.begin_path();
    ctx.set_fill_style_str(&frame.theme.background);
    let _ = ctx.arc(g.cx, g.cy, g.radius + 6.0 * g.scale, 0.0, 2.0 * PI);
    ctx.fill();
}

fn draw_segments(
    ctx: &CanvasRenderingContext2d,
    cache: &mut ImageCache,
    frame: &RenderFrame<'_>,
    g: &Geometry,
) {
    let arc = segment_arc_deg(frame.segments.len());

    ctx.save();
    let _ = ctx.translate(g.cx, g.cy);
    let _ = ctx.rotate(frame.rotation.to_radians());
    let _ = ctx.translate(-g.cx, -g.cy);

    // Wedge fills.
    for (index, segment) in frame.segments.iter().enumerate() {
        let start = wheel_rad(index as f64 * arc);
        let end = wheel_rad((index as f64 + 1.0) * arc);
        ctx.begin_path();
        ctx.set_fill_style_str(segment.fill_color(frame.theme, index));
        ctx.move_to(g.cx, g.cy);
        let _ = ctx.arc(g.cx, g.cy, g.radius, start, end);
        ctx.fill();
    }

    // Shimmer sweep while spinning.
    if frame.is_spinning {
        let shimmer = (frame.now_ms / 400.0).sin() * 0.08 + 0.1;
        ctx.begin_path();
        ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {shimmer:.3})"));
        let _ = ctx.arc(g.cx, g.cy, g.radius, 0.0, 2.0 * PI);
        ctx.fill();
    }

    // Separators.
    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.85)");
    ctx.set_line_width((1.6 * g.scale).max(1.0));
    for index in 0..frame.segments.len() {
        let angle = wheel_rad(index as f64 * arc);
        ctx.begin_path();
        ctx.move_to(g.cx, g.cy);
        ctx.line_to(g.cx + g.radius * angle.cos(), g.cy + g.radius * angle.sin());
        ctx.stroke();
    }

    // Labels or clipped images at the wedge midpoints. A pending image
    // shows a neutral placeholder (never the label, to avoid flicker); a
    // failed one falls back to the label for good.
    let font = format!(
        "bold {}px 'Segoe UI', Roboto, system-ui, sans-serif",
        ((7.0 * g.scale).round() as i32).max(10)
    );
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for (index, segment) in frame.segments.iter().enumerate() {
        let mid = wheel_rad((index as f64 + 0.5) * arc);
        let mut draw_label = true;
        if let Some(source) = segment.image_source() {
            let x = g.cx + g.radius * 0.62 * mid.cos();
            let y = g.cy + g.radius * 0.62 * mid.sin();
            let icon_radius = g.radius * 0.16;
            match cache.resolve(source, None) {
                Resolved::Ready(image) => {
                    let image = image.clone();
                    clip_circle_image(ctx, &image, x, y, icon_radius);
                    draw_label = false;
                }
                Resolved::Pending => {
                    draw_loading_placeholder(ctx, x, y, icon_radius);
                    draw_label = false;
                }
                Resolved::Exhausted => {}
            }
        }
        if draw_label {
            let fill = segment.fill_color(frame.theme, index);
            ctx.save();
            let _ = ctx.translate(g.cx, g.cy);
            let _ = ctx.rotate(mid + PI / 2.0);
            let _ = ctx.translate(0.0, -g.radius * 0.72);
            ctx.set_font(&font);
            ctx.set_fill_style_str(segment.label_color(fill));
            ctx.set_shadow_color("rgba(0, 0, 0, 0.45)");
            ctx.set_shadow_blur(2.0 * g.scale);
            let _ = ctx.fill_text(&segment.label, 0.0, 0.0);
            ctx.restore();
        }
    }
    ctx.set_shadow_color("rgba(0, 0, 0, 0)");
    ctx.set_shadow_blur(0.0);

    ctx.restore();
}

fn draw_loading_placeholder(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64) {
    ctx.begin_path();
    ctx.set_fill_style_str("rgba(229, 231, 235, 0.85)");
    let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
    ctx.fill();
    ctx.set_stroke_style_str("rgba(156, 163, 175, 0.9)");
    ctx.set_line_width(1.5);
    ctx.begin_path();
    let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
    ctx.stroke();
}

fn clip_circle_image(
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    x: f64,
    y: f64,
    radius: f64,
) {
    ctx.save();
    ctx.begin_path();
    let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
    ctx.clip();
    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
        image,
        x - radius,
        y - radius,
        radius * 2.0,
        radius * 2.0,
    );
    ctx.restore();
}

fn draw_border(
    ctx: &CanvasRenderingContext2d,
    cache: &mut ImageCache,
    frame: &RenderFrame<'_>,
    g: &Geometry,
) {
    let style = frame.style;
    let width = frame.border_width.unwrap_or(style.width) * g.scale;

    match style.kind {
        BorderStyleKind::Solid => {
            let color = frame
                .border_color
                .unwrap_or_else(|| style.colors.first().copied().unwrap_or("#e69500"));
            if style.effects.shadow {
                ctx.set_shadow_color("rgba(0, 0, 0, 0.35)");
                ctx.set_shadow_blur(4.0 * g.scale);
            }
            stroke_ring(ctx, g, g.radius, width, color);
            clear_shadow(ctx);
        }
        BorderStyleKind::Metallic => {
            draw_metallic_ring(ctx, g, width, style.colors);
        }
        BorderStyleKind::Neon => {
            let color = frame
                .border_color
                .unwrap_or_else(|| style.colors.first().copied().unwrap_or("#22d3ee"));
            for (width_factor, blur) in neon_glow_layers() {
                ctx.set_shadow_color(color);
                ctx.set_shadow_blur(blur * g.scale);
                stroke_ring(ctx, g, g.radius, width * width_factor, color);
            }
            clear_shadow(ctx);
            // Bright core.
            stroke_ring(ctx, g, g.radius, (width * 0.4).max(1.0), "rgba(255, 255, 255, 0.9)");
        }
        BorderStyleKind::Gradient => {
            let gradient = ctx.create_linear_gradient(
                g.cx - g.radius,
                g.cy - g.radius,
                g.cx + g.radius,
                g.cy + g.radius,
            );
            apply_stops(&gradient, &rainbow_stops(frame.now_ms, 7));
            if style.effects.glow {
                ctx.set_shadow_color("rgba(255, 255, 255, 0.5)");
                ctx.set_shadow_blur(6.0 * g.scale);
            }
            ctx.set_stroke_style_canvas_gradient(&gradient);
            ctx.set_line_width(width);
            ctx.begin_path();
            let _ = ctx.arc(g.cx, g.cy, g.radius, 0.0, 2.0 * PI);
            ctx.stroke();
            clear_shadow(ctx);
        }
        BorderStyleKind::Pattern => {
            let source = style.image_src.unwrap_or(FALLBACK_RING_IMAGE);
            match cache.resolve(source, Some(FALLBACK_RING_IMAGE)) {
                Resolved::Ready(image) => {
                    let image = image.clone();
                    let ring_radius = g.radius + width;
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        &image,
                        g.cx - ring_radius,
                        g.cy - ring_radius,
                        ring_radius * 2.0,
                        ring_radius * 2.0,
                    );
                }
                // Metallic stand-in until the ring image is usable.
                Resolved::Pending | Resolved::Exhausted => {
                    draw_metallic_ring(ctx, g, width, style.colors);
                }
            }
        }
        BorderStyleKind::Luxury => {
            if style.effects.glow {
                ctx.set_shadow_color(&hex_with_alpha(
                    style.colors.first().copied().unwrap_or("#d4af37"),
                    0.6,
                ));
                ctx.set_shadow_blur(8.0 * g.scale);
            }
            draw_metallic_ring(ctx, g, width, style.colors);
            clear_shadow(ctx);
            let trim = style.colors.first().copied().unwrap_or("#d4af37");
            stroke_ring(ctx, g, g.radius + width * 0.65, (width * 0.18).max(1.0), trim);
            stroke_ring(ctx, g, g.radius - width * 0.65, (width * 0.18).max(1.0), trim);
        }
    }
}

fn draw_metallic_ring(
    ctx: &CanvasRenderingContext2d,
    g: &Geometry,
    width: f64,
    colors: &[&str],
) {
    let gradient =
        ctx.create_linear_gradient(g.cx - g.radius, g.cy - g.radius, g.cx + g.radius, g.cy + g.radius);
    apply_stops(&gradient, &metallic_stops(colors));
    ctx.set_shadow_color("rgba(0, 0, 0, 0.3)");
    ctx.set_shadow_blur(3.0 * g.scale);
    ctx.set_stroke_style_canvas_gradient(&gradient);
    ctx.set_line_width(width);
    ctx.begin_path();
    let _ = ctx.arc(g.cx, g.cy, g.radius, 0.0, 2.0 * PI);
    ctx.stroke();
    clear_shadow(ctx);
    // Curved-metal highlight just inside the ring.
    stroke_ring(
        ctx,
        g,
        g.radius - width * 0.3,
        (width * 0.22).max(1.0),
        "rgba(255, 255, 255, 0.55)",
    );
}

fn draw_bulbs(ctx: &CanvasRenderingContext2d, frame: &RenderFrame<'_>, g: &Geometry) {
    let step = 360.0 / BULB_COUNT as f64;
    let bulb_radius = 2.6 * g.scale;
    for index in 0..BULB_COUNT {
        let angle = wheel_rad(frame.rotation + index as f64 * step);
        let x = g.cx + g.radius * angle.cos();
        let y = g.cy + g.radius * angle.sin();
        let lit = if frame.is_spinning {
            // Chasing-light effect while spinning.
            ((frame.now_ms / 120.0) as usize + index) % 2 == 0
        } else {
            index % 2 == 0
        };
        ctx.begin_path();
        if lit {
            ctx.set_shadow_color("rgba(253, 230, 138, 0.9)");
            ctx.set_shadow_blur(5.0 * g.scale);
            ctx.set_fill_style_str("#fde68a");
        } else {
            ctx.set_fill_style_str("#fef9ec");
        }
        let _ = ctx.arc(x, y, bulb_radius, 0.0, 2.0 * PI);
        ctx.fill();
        clear_shadow(ctx);
    }
}

fn draw_inner_shadow(ctx: &CanvasRenderingContext2d, g: &Geometry) {
    if let Ok(gradient) =
        ctx.create_radial_gradient(g.cx, g.cy, g.radius * 0.8, g.cx, g.cy, g.radius)
    {
        let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
        let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0.25)");
        ctx.begin_path();
        ctx.set_fill_style_canvas_gradient(&gradient);
        let _ = ctx.arc(g.cx, g.cy, g.radius, 0.0, 2.0 * PI);
        ctx.fill();
    }
}

fn draw_center(
    ctx: &CanvasRenderingContext2d,
    cache: &mut ImageCache,
    frame: &RenderFrame<'_>,
    g: &Geometry,
) {
    let inner_radius = g.radius * 0.22;
    let styled = format!("/assets/wheel/center-{}.png", frame.style.name);
    if let Resolved::Ready(image) = cache.resolve(&styled, Some(CENTER_IMAGE_FALLBACK)) {
        let image = image.clone();
        clip_circle_image(ctx, &image, g.cx, g.cy, inner_radius);
        return;
    }

    // Procedural medallion.
    ctx.begin_path();
    if let Ok(gradient) =
        ctx.create_radial_gradient(g.cx - inner_radius * 0.3, g.cy - inner_radius * 0.3, inner_radius * 0.1, g.cx, g.cy, inner_radius)
    {
        let _ = gradient.add_color_stop(0.0, "#ffffff");
        let _ = gradient.add_color_stop(0.35, &frame.theme.accent);
        let _ = gradient.add_color_stop(1.0, &frame.theme.border);
        ctx.set_fill_style_canvas_gradient(&gradient);
    } else {
        ctx.set_fill_style_str(&frame.theme.accent);
    }
    let _ = ctx.arc(g.cx, g.cy, inner_radius, 0.0, 2.0 * PI);
    ctx.fill();

    ctx.begin_path();
    ctx.set_stroke_style_str("rgba(0, 0, 0, 0.3)");
    ctx.set_line_width((1.5 * g.scale).max(1.0));
    let _ = ctx.arc(g.cx, g.cy, inner_radius, 0.0, 2.0 * PI);
    ctx.stroke();

    ctx.begin_path();
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
    let _ = ctx.arc(g.cx, g.cy, inner_radius * 0.18, 0.0, 2.0 * PI);
    ctx.fill();
}

fn draw_pointer(
    ctx: &CanvasRenderingContext2d,
    cache: &mut ImageCache,
    frame: &RenderFrame<'_>,
    g: &Geometry,
) {
    let pivot_y = g.cy - g.radius - 6.0 * g.scale;
    let half_width = 7.0 * g.scale;
    let height = 20.0 * g.scale;

    ctx.save();
    let _ = ctx.translate(g.cx, pivot_y);
    let _ = ctx.rotate(frame.pointer_angle.to_radians());

    let styled = format!("/assets/wheel/pointer-{}.png", frame.style.name);
    if let Resolved::Ready(image) = cache.resolve(&styled, Some(POINTER_IMAGE_FALLBACK)) {
        let image = image.clone();
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &image,
            -half_width * 1.6,
            -height * 0.5,
            half_width * 3.2,
            height * 1.4,
        );
        ctx.restore();
        return;
    }

    // Procedural glyph: rounded triangle pointing into the wheel.
    if frame.is_spinning {
        ctx.set_shadow_color("rgba(255, 215, 130, 0.8)");
        ctx.set_shadow_blur(8.0 * g.scale);
    } else {
        ctx.set_shadow_color("rgba(0, 0, 0, 0.35)");
        ctx.set_shadow_blur(3.0 * g.scale);
    }

    let corner = 2.5 * g.scale;
    ctx.begin_path();
    ctx.move_to(0.0, height * 0.55);
    ctx.line_to(-half_width + corner * 0.4, -height * 0.45 + corner);
    ctx.quadratic_curve_to(-half_width, -height * 0.45, -half_width + corner, -height * 0.45 - corner * 0.2);
    ctx.line_to(half_width - corner, -height * 0.45 - corner * 0.2);
    ctx.quadratic_curve_to(half_width, -height * 0.45, half_width - corner * 0.4, -height * 0.45 + corner);
    ctx.close_path();

    let gradient = ctx.create_linear_gradient(0.0, -height * 0.45, 0.0, height * 0.55);
    let _ = gradient.add_color_stop(0.0, &frame.theme.accent);
    let _ = gradient.add_color_stop(1.0, &frame.theme.border);
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill();
    clear_shadow(ctx);

    ctx.set_stroke_style_str("rgba(0, 0, 0, 0.25)");
    ctx.set_line_width((1.2 * g.scale).max(1.0));
    ctx.stroke();

    // Specular highlight near the base.
    ctx.begin_path();
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
    let _ = ctx.arc(0.0, -height * 0.2, (1.8 * g.scale).max(1.0), 0.0, 2.0 * PI);
    ctx.fill();

    ctx.restore();
}

fn stroke_ring(ctx: &CanvasRenderingContext2d, g: &Geometry, radius: f64, width: f64, color: &str) {
    ctx.begin_path();
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    let _ = ctx.arc(g.cx, g.cy, radius, 0.0, 2.0 * PI);
    ctx.stroke();
}

fn apply_stops(gradient: &CanvasGradient, stops: &[(f64, String)]) {
    for (offset, color) in stops {
        let _ = gradient.add_color_stop(*offset as f32, color);
    }
}

fn clear_shadow(ctx: &CanvasRenderingContext2d) {
    ctx.set_shadow_color("rgba(0, 0, 0, 0)");
    ctx.set_shadow_blur(0.0);
}

/// `rgba()` from a `#rrggbb` color; non-hex inputs are passed through
/// unchanged.
fn hex_with_alpha(color: &str, alpha: f64) -> String {
    let hex = color.trim_start_matches('#');
    if hex.len() == 6 && hex.is_ascii() {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return format!("rgba({r}, {g}, {b}, {alpha:.3})");
        }
    }
    color.to_string()
}
