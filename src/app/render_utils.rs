use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::rdf::NodeKind;
use crate::viewer::ViewTransform;

pub(super) const PICKED_COLOR: Color32 = Color32::from_rgb(245, 206, 93);
pub(super) const HOVER_COLOR: Color32 = Color32::from_rgb(255, 164, 101);

pub(super) fn kind_color(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Resource => Color32::from_rgb(0xD3, 0xEA, 0xF2),
        NodeKind::Blank => Color32::from_rgb(0xC8, 0xBF, 0xE7),
        NodeKind::Literal => Color32::from_rgb(0x70, 0x92, 0xBE),
    }
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| (f32::from(from) + (f32::from(to) - f32::from(from)) * amount) as u8;
    let [r, g, b, a] = base.to_srgba_unmultiplied();
    let [or, og, ob, oa] = overlay.to_srgba_unmultiplied();
    Color32::from_rgba_unmultiplied(mix(r, or), mix(g, og), mix(b, ob), mix(a, oa))
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, transform: &ViewTransform) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (50.0 * transform.scale).max(12.0);
    let origin = rect.min + transform.offset;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

/// Line from `start` to `end` with an arrow head touching a circle of
/// `end_radius` around `end`.
pub(super) fn draw_directed_edge(
    painter: &Painter,
    start: Pos2,
    end: Pos2,
    end_radius: f32,
    stroke: Stroke,
) {
    let direction = end - start;
    let length = direction.length();
    if length <= end_radius {
        painter.line_segment([start, end], stroke);
        return;
    }

    let unit = direction / length;
    let tip = end - unit * end_radius;
    painter.line_segment([start, tip], stroke);

    let head = (stroke.width * 4.0).clamp(5.0, 12.0);
    let normal = Vec2::new(-unit.y, unit.x);
    let back = tip - unit * head;
    painter.line_segment([tip, back + normal * head * 0.5], stroke);
    painter.line_segment([tip, back - normal * head * 0.5], stroke);
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    rect.expand(radius).contains(position)
}

/// Whether the segment touches `rect` grown by `padding` (Liang-Barsky clip).
pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let bounds = rect.expand(padding);
    let delta = end - start;
    let sides = [
        (-delta.x, start.x - bounds.left()),
        (delta.x, bounds.right() - start.x),
        (-delta.y, start.y - bounds.top()),
        (delta.y, bounds.bottom() - start.y),
    ];

    let (mut enter, mut leave) = (0.0_f32, 1.0_f32);
    for (p, q) in sides {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            enter = enter.max(t);
        } else {
            leave = leave.min(t);
        }
        if enter > leave {
            return false;
        }
    }
    true
}
