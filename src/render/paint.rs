use egui::epaint::TextShape;
use egui::{emath::Rot2, FontId, Mesh, Pos2, Rect, Shape, Vec2};

use crate::render::canvas::{DisplayList, Primitive, VerticalGradient};

/// Replay a recorded chart frame onto `painter`, with the canvas origin at
/// `rect.min`.
pub fn paint_display_list(painter: &egui::Painter, rect: Rect, list: &DisplayList) {
    let offset = rect.min.to_vec2();

    for primitive in list.primitives() {
        match primitive {
            Primitive::Line { from, to, stroke, dash } => {
                let path = [*from + offset, *to + offset];
                match dash {
                    Some((dash, gap)) => {
                        painter.extend(Shape::dashed_line(&path, *stroke, *dash, *gap));
                    }
                    None => {
                        painter.line_segment(path, *stroke);
                    }
                }
            }
            Primitive::FillUnder { outline, baseline, gradient } => {
                painter.add(Shape::mesh(area_mesh(outline, *baseline, gradient, offset)));
            }
            Primitive::Polyline { points, stroke } => {
                let points: Vec<Pos2> = points.iter().map(|p| *p + offset).collect();
                painter.add(Shape::line(points, *stroke));
            }
            Primitive::Circle { center, radius, fill, stroke } => {
                painter.circle(*center + offset, *radius, *fill, *stroke);
            }
            Primitive::Text {
                pos,
                anchor,
                text,
                size,
                color,
                angle,
            } => {
                let galley =
                    painter.layout_no_wrap(text.clone(), FontId::proportional(*size), *color);
                // Offset from the galley's top-left corner to its anchor point.
                let anchor_offset = -anchor.anchor_size(Pos2::ZERO, galley.size()).min.to_vec2();
                let top_left = *pos + offset - Rot2::from_angle(*angle) * anchor_offset;
                painter.add(TextShape::new(top_left, galley, *color).with_angle(*angle));
            }
        }
    }
}

/// Triangulate the area under a polyline as one trapezoid per segment, with
/// per-vertex colors sampled from the gradient.
fn area_mesh(outline: &[Pos2], baseline: f32, gradient: &VerticalGradient, offset: Vec2) -> Mesh {
    let mut mesh = Mesh::default();
    let bottom_color = gradient.color_at(baseline);

    for pair in outline.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let base = mesh.vertices.len() as u32;
        mesh.colored_vertex(a + offset, gradient.color_at(a.y));
        mesh.colored_vertex(b + offset, gradient.color_at(b.y));
        mesh.colored_vertex(Pos2::new(b.x, baseline) + offset, bottom_color);
        mesh.colored_vertex(Pos2::new(a.x, baseline) + offset, bottom_color);
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }

    mesh
}
