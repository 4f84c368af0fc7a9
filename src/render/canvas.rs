use egui::{Align2, Color32, Pos2, Stroke};

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Vertical color ramp between two screen-space rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalGradient {
    pub top_y: f32,
    pub bottom_y: f32,
    pub top: Color32,
    pub bottom: Color32,
}

impl VerticalGradient {
    /// Color at screen row `y`, clamped to the ramp ends.
    pub fn color_at(&self, y: f32) -> Color32 {
        let span = self.bottom_y - self.top_y;
        let t = if span.abs() < f32::EPSILON {
            0.0
        } else {
            ((y - self.top_y) / span).clamp(0.0, 1.0)
        };
        lerp_color(self.top, self.bottom, t)
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }
    let a = a.to_srgba_unmultiplied();
    let b = b.to_srgba_unmultiplied();
    let mix = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t).round() as u8;
    Color32::from_rgba_unmultiplied(mix(0), mix(1), mix(2), mix(3))
}

/// A 2D drawing surface in surface-local pixel coordinates (origin top-left).
///
/// The extent may change between frames, so renderers query it on every call.
pub trait Canvas2d {
    fn extent(&self) -> Extent;

    fn clear(&mut self);

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    fn dashed_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke, dash: f32, gap: f32);

    /// Fill the region between the `outline` polyline and the row `baseline`.
    fn fill_under(&mut self, outline: &[Pos2], baseline: f32, gradient: VerticalGradient);

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke);

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke);

    /// Draw `text` anchored at `pos`, rotated by `angle` radians about the anchor.
    fn text(
        &mut self,
        pos: Pos2,
        anchor: Align2,
        text: &str,
        size: f32,
        color: Color32,
        angle: f32,
    );
}

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
        dash: Option<(f32, f32)>,
    },
    FillUnder {
        outline: Vec<Pos2>,
        baseline: f32,
        gradient: VerticalGradient,
    },
    Polyline {
        points: Vec<Pos2>,
        stroke: Stroke,
    },
    Circle {
        center: Pos2,
        radius: f32,
        fill: Color32,
        stroke: Stroke,
    },
    Text {
        pos: Pos2,
        anchor: Align2,
        text: String,
        size: f32,
        color: Color32,
        angle: f32,
    },
}

/// Canvas that records primitives so a frame can be replayed onto an
/// `egui::Painter` any number of times, or inspected in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    extent: Extent,
    primitives: Vec<Primitive>,
}

impl DisplayList {
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            primitives: Vec::new(),
        }
    }

    /// Change the surface size. Returns true if it actually changed, in which
    /// case the caller should redraw.
    pub fn resize(&mut self, extent: Extent) -> bool {
        if self.extent == extent {
            return false;
        }
        self.extent = extent;
        true
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_blank(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Canvas2d for DisplayList {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn clear(&mut self) {
        self.primitives.clear();
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.primitives.push(Primitive::Line {
            from,
            to,
            stroke,
            dash: None,
        });
    }

    fn dashed_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke, dash: f32, gap: f32) {
        self.primitives.push(Primitive::Line {
            from,
            to,
            stroke,
            dash: Some((dash, gap)),
        });
    }

    fn fill_under(&mut self, outline: &[Pos2], baseline: f32, gradient: VerticalGradient) {
        self.primitives.push(Primitive::FillUnder {
            outline: outline.to_vec(),
            baseline,
            gradient,
        });
    }

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke) {
        self.primitives.push(Primitive::Polyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke) {
        self.primitives.push(Primitive::Circle {
            center,
            radius,
            fill,
            stroke,
        });
    }

    fn text(
        &mut self,
        pos: Pos2,
        anchor: Align2,
        text: &str,
        size: f32,
        color: Color32,
        angle: f32,
    ) {
        self.primitives.push(Primitive::Text {
            pos,
            anchor,
            text: text.to_owned(),
            size,
            color,
            angle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints_and_clamp() {
        let g = VerticalGradient {
            top_y: 40.0,
            bottom_y: 140.0,
            top: Color32::from_rgba_unmultiplied(100, 0, 0, 200),
            bottom: Color32::from_rgba_unmultiplied(0, 0, 100, 0),
        };
        assert_eq!(g.color_at(40.0), g.top);
        assert_eq!(g.color_at(140.0), g.bottom);
        assert_eq!(g.color_at(0.0), g.top);
        assert_eq!(g.color_at(500.0), g.bottom);
    }

    #[test]
    fn resize_reports_changes_only() {
        let mut list = DisplayList::new(Extent::new(100.0, 50.0));
        assert!(!list.resize(Extent::new(100.0, 50.0)));
        assert!(list.resize(Extent::new(120.0, 50.0)));
        assert_eq!(list.extent(), Extent::new(120.0, 50.0));
    }
}
