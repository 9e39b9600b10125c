use yew::prelude::*;
use web_sys::{window, HtmlCanvasElement, CanvasRenderingContext2d};
use wasm_bindgen::JsCast;
use std::f64::consts::PI;
use shared::shared_roulette::{slice_bounds, RewardOption, POINTER_ANGLE_DEGREES};
use super::wheel_utils::truncate_label;

// Modern magical color palette, cycled over the slices
const SEGMENT_COLORS: [&str; 6] = [
    "#f97316", // Orange
    "#06b6d4", // Cyan
    "#8b5cf6", // Violet
    "#ec4899", // Pink
    "#22c55e", // Green
    "#eab308", // Amber
];

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub options: Vec<RewardOption>,
    pub rotation: f64,
    pub is_spinning: bool,
    #[prop_or_default]
    pub highlight: Option<usize>,
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

fn is_dark_mode() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false)
}

fn segment_color(index: usize, count: usize) -> &'static str {
    let mut color = index % SEGMENT_COLORS.len();
    // Keep the last slice from matching the first one it touches
    if count > 1 && index == count - 1 && color == 0 {
        color = 1;
    }
    SEGMENT_COLORS[color]
}

fn draw_wheel(canvas: &HtmlCanvasElement, props: &WheelCanvasProps) -> Option<()> {
    let context = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;

    let count = props.options.len();
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 2.0 - 40.0;
    let is_dark_mode = is_dark_mode();

    // Clear canvas
    context.clear_rect(0.0, 0.0, width, height);

    // Outer glow
    let glow_intensity = if props.is_spinning { 0.25 } else { 0.15 };
    context.begin_path();
    if is_dark_mode {
        context.set_fill_style_str(&format!("rgba(130, 100, 255, {})", glow_intensity));
    } else {
        context.set_fill_style_str(&format!("rgba(100, 130, 255, {})", glow_intensity));
    }
    let _ = context.arc(center_x, center_y, radius + 15.0, 0.0, 2.0 * PI);
    context.fill();

    // Wheel background
    context.begin_path();
    context.set_fill_style_str(if is_dark_mode { "#1a1c2e" } else { "#f0f2ff" });
    let _ = context.arc(center_x, center_y, radius, 0.0, 2.0 * PI);
    context.fill();

    // Slices are laid out in wheel-local degrees and turned by the current rotation.
    // Canvas angles grow clockwise from 3 o'clock, matching the winner computation.
    context.save();
    let _ = context.translate(center_x, center_y);
    let _ = context.rotate(to_radians(props.rotation));

    for index in 0..count {
        let (start, end) = slice_bounds(index, count)?;
        context.begin_path();
        context.set_fill_style_str(segment_color(index, count));
        context.move_to(0.0, 0.0);
        let _ = context.arc(0.0, 0.0, radius, to_radians(start), to_radians(end));
        context.close_path();
        context.fill();

        if props.highlight == Some(index) && !props.is_spinning {
            context.begin_path();
            context.set_fill_style_str("rgba(255, 255, 255, 0.35)");
            context.move_to(0.0, 0.0);
            let _ = context.arc(0.0, 0.0, radius, to_radians(start), to_radians(end));
            context.close_path();
            context.fill();
        }
    }

    // Dividers
    if count > 1 {
        context.set_stroke_style_str(if is_dark_mode {
            "rgba(255, 255, 255, 0.7)"
        } else {
            "rgba(255, 255, 255, 0.9)"
        });
        context.set_line_width(2.5);
        for index in 0..count {
            let (start, _) = slice_bounds(index, count)?;
            let angle = to_radians(start);
            context.begin_path();
            context.move_to(0.0, 0.0);
            context.line_to(radius * angle.cos(), radius * angle.sin());
            context.stroke();
        }
    }

    // Labels at the middle of each slice
    let font_size = if count > 8 { 14 } else { 18 };
    context.set_font(&format!("bold {}px 'Segoe UI', Roboto, system-ui, sans-serif", font_size));
    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_fill_style_str("#ffffff");
    context.set_shadow_color(if is_dark_mode { "rgba(0, 0, 0, 0.7)" } else { "rgba(0, 0, 0, 0.5)" });
    context.set_shadow_blur(3.0);
    context.set_shadow_offset_x(1.0);
    context.set_shadow_offset_y(1.0);
    for (index, option) in props.options.iter().enumerate() {
        let (start, end) = slice_bounds(index, count)?;
        context.save();
        let _ = context.rotate(to_radians((start + end) / 2.0));
        let _ = context.translate(radius * 0.6, 0.0);
        let _ = context.fill_text(&truncate_label(&option.name), 0.0, 0.0);
        context.restore();
    }
    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);
    context.set_shadow_offset_x(0.0);
    context.set_shadow_offset_y(0.0);

    context.restore();

    // Inner hub
    let inner_radius = radius * 0.18;
    context.begin_path();
    context.set_fill_style_str(if is_dark_mode { "#2d3142" } else { "#8b5cf6" });
    let _ = context.arc(center_x, center_y, inner_radius, 0.0, 2.0 * PI);
    context.fill();

    context.begin_path();
    context.set_stroke_style_str(if is_dark_mode { "rgba(0, 0, 0, 0.5)" } else { "rgba(0, 0, 0, 0.2)" });
    context.set_line_width(2.0);
    let _ = context.arc(center_x, center_y, inner_radius, 0.0, 2.0 * PI);
    context.stroke();

    // Outer ring
    context.begin_path();
    if props.is_spinning {
        let pulse = (js_sys::Date::now() / 400.0).sin() * 0.2 + 0.5;
        let stroke_color = if is_dark_mode {
            format!("rgba(180, 130, 255, {})", pulse)
        } else {
            format!("rgba(130, 100, 255, {})", pulse)
        };
        context.set_stroke_style_str(&stroke_color);
        context.set_line_width(5.0);
    } else {
        context.set_stroke_style_str(if is_dark_mode {
            "rgba(180, 130, 255, 0.5)"
        } else {
            "rgba(130, 100, 255, 0.5)"
        });
        context.set_line_width(4.0);
    }
    let _ = context.arc(center_x, center_y, radius - 2.0, 0.0, 2.0 * PI);
    context.stroke();

    // Pointer, tip on the rim at the pointer angle (12 o'clock)
    let pointer_angle = to_radians(POINTER_ANGLE_DEGREES);
    let tip_x = center_x + (radius - 5.0) * pointer_angle.cos();
    let tip_y = center_y + (radius - 5.0) * pointer_angle.sin();
    let pointer_width = 20.0;
    let pointer_height = 30.0;
    let pointer_radius = 5.0;
    let base_y = tip_y - pointer_height - 5.0;

    context.set_shadow_color(if props.is_spinning {
        "rgba(255, 215, 130, 0.8)"
    } else {
        "rgba(255, 215, 0, 0.6)"
    });
    context.set_shadow_blur(if props.is_spinning { 10.0 } else { 4.0 });

    context.begin_path();
    context.move_to(tip_x, tip_y);
    context.line_to(tip_x - pointer_width + pointer_radius, base_y + pointer_radius);
    context.quadratic_curve_to(
        tip_x - pointer_width, base_y + pointer_radius,
        tip_x - pointer_width, base_y
    );
    context.line_to(tip_x + pointer_width - pointer_radius, base_y);
    context.quadratic_curve_to(
        tip_x + pointer_width, base_y,
        tip_x + pointer_width, base_y + pointer_radius
    );
    context.close_path();
    context.set_fill_style_str(if props.is_spinning { "#ffd700" } else { "#f59e0b" });
    context.fill();
    context.set_stroke_style_str("#e69500");
    context.set_line_width(1.5);
    context.stroke();

    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);

    Some(())
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (props.options.clone(), props.rotation, props.is_spinning, props.highlight),
            move |(options, rotation, is_spinning, highlight)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    let props = WheelCanvasProps {
                        options: options.clone(),
                        rotation: *rotation,
                        is_spinning: *is_spinning,
                        highlight: *highlight,
                    };
                    if draw_wheel(&canvas, &props).is_none() {
                        log::warn!("Could not draw the roulette wheel");
                    }
                }
                || ()
            },
        );
    }

    html! {
        <div class="relative">
            <canvas
                ref={canvas_ref}
                width="450"
                height="450"
                class="w-full max-w-[450px] h-auto rounded-full shadow-lg transition-all duration-300"
                style={if props.is_spinning {
                    "filter: drop-shadow(0px 5px 20px rgba(130, 100, 255, 0.4));"
                } else {
                    "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.2));"
                }}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_colors_do_not_repeat_at_the_seam() {
        // 7 slices would otherwise wrap the palette onto the first color
        assert_ne!(segment_color(6, 7), segment_color(0, 7));
        assert_eq!(segment_color(0, 1), SEGMENT_COLORS[0]);
        assert_eq!(segment_color(3, 4), SEGMENT_COLORS[3]);
    }
}
