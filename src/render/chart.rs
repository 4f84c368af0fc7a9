use std::f32::consts::FRAC_PI_2;

use egui::{Align2, Color32, Pos2, Stroke};

use crate::render::canvas::{Canvas2d, Extent, VerticalGradient};

/// Margin reserved on every side of the plot area for axis labels.
pub const PADDING: f32 = 40.0;
/// Lowest upper bound of the value axis, so a slow printer doesn't make the
/// chart jump around.
pub const AXIS_FLOOR: f64 = 100.0;
/// Number of bands between horizontal gridlines.
pub const GRID_INTERVALS: usize = 4;

const AXIS_COLOR: Color32 = Color32::from_rgb(0xd1, 0xd5, 0xdb);
const GRID_COLOR: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb);
const LABEL_COLOR: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
const SERIES_COLOR: Color32 = Color32::from_rgb(0x66, 0x7e, 0xea);
const LABEL_SIZE: f32 = 12.0;
const MARKER_RADIUS: f32 = 4.0;

/// Maps window values onto the plot area of a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub extent: Extent,
    pub count: usize,
    pub min_value: f64,
    pub max_value: f64,
}

impl ChartLayout {
    /// `None` when there are fewer than two points to join.
    pub fn new(values: &[f64], extent: Extent) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }
        let max_value = values.iter().copied().fold(AXIS_FLOOR, f64::max);
        Some(Self {
            extent,
            count: values.len(),
            min_value: 0.0,
            max_value,
        })
    }

    pub fn plot_width(&self) -> f32 {
        (self.extent.width - 2.0 * PADDING).max(0.0)
    }

    pub fn plot_height(&self) -> f32 {
        (self.extent.height - 2.0 * PADDING).max(0.0)
    }

    pub fn bottom(&self) -> f32 {
        self.extent.height - PADDING
    }

    pub fn right(&self) -> f32 {
        self.extent.width - PADDING
    }

    /// Pixel position of the `index`-th value.
    pub fn point(&self, index: usize, value: f64) -> Pos2 {
        let x = PADDING + self.plot_width() * index as f32 / (self.count - 1) as f32;
        let range = self.max_value - self.min_value;
        // A zero-height range draws a flat line on the axis.
        let t = if range > 0.0 {
            ((value - self.min_value) / range) as f32
        } else {
            0.0
        };
        Pos2::new(x, self.bottom() - t * self.plot_height())
    }

    /// Row and label of the `i`-th gridline, top to bottom.
    pub fn gridline(&self, i: usize) -> (f32, f64) {
        let y = PADDING + self.plot_height() / GRID_INTERVALS as f32 * i as f32;
        let value = self.max_value - self.max_value / GRID_INTERVALS as f64 * i as f64;
        (y, value)
    }
}

/// Draw the feedrate window as a filled line chart.
///
/// The output depends only on `values` and the canvas extent; fewer than two
/// points leaves the canvas blank.
pub fn render(values: &[f64], canvas: &mut dyn Canvas2d) {
    let extent = canvas.extent();
    canvas.clear();

    let Some(layout) = ChartLayout::new(values, extent) else {
        return;
    };

    draw_axes(canvas, &layout);
    draw_gridlines(canvas, &layout);

    let points: Vec<Pos2> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| layout.point(i, v))
        .collect();

    let gradient = VerticalGradient {
        top_y: PADDING,
        bottom_y: layout.bottom(),
        top: Color32::from_rgba_unmultiplied(0x66, 0x7e, 0xea, 77),
        bottom: Color32::from_rgba_unmultiplied(0x66, 0x7e, 0xea, 13),
    };
    canvas.fill_under(&points, layout.bottom(), gradient);
    canvas.polyline(&points, Stroke::new(3.0, SERIES_COLOR));

    for &p in &points {
        canvas.circle(p, MARKER_RADIUS, SERIES_COLOR, Stroke::new(2.0, Color32::WHITE));
    }

    draw_axis_titles(canvas, extent);
}

fn draw_axes(canvas: &mut dyn Canvas2d, layout: &ChartLayout) {
    let stroke = Stroke::new(2.0, AXIS_COLOR);
    let origin = Pos2::new(PADDING, layout.bottom());
    canvas.line(Pos2::new(PADDING, PADDING), origin, stroke);
    canvas.line(origin, Pos2::new(layout.right(), layout.bottom()), stroke);
}

fn draw_gridlines(canvas: &mut dyn Canvas2d, layout: &ChartLayout) {
    let stroke = Stroke::new(1.0, GRID_COLOR);
    for i in 0..=GRID_INTERVALS {
        let (y, value) = layout.gridline(i);
        canvas.dashed_line(
            Pos2::new(PADDING, y),
            Pos2::new(layout.right(), y),
            stroke,
            5.0,
            5.0,
        );
        canvas.text(
            Pos2::new(PADDING - 10.0, y),
            Align2::RIGHT_CENTER,
            &format!("{value:.0}"),
            LABEL_SIZE,
            LABEL_COLOR,
            0.0,
        );
    }
}

fn draw_axis_titles(canvas: &mut dyn Canvas2d, extent: Extent) {
    canvas.text(
        Pos2::new(extent.width / 2.0, extent.height - 10.0),
        Align2::CENTER_BOTTOM,
        "Time",
        LABEL_SIZE,
        LABEL_COLOR,
        0.0,
    );
    canvas.text(
        Pos2::new(15.0, extent.height / 2.0),
        Align2::CENTER_CENTER,
        "Feedrate (mm/s)",
        LABEL_SIZE,
        LABEL_COLOR,
        -FRAC_PI_2,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::{DisplayList, Primitive};

    fn canvas() -> DisplayList {
        DisplayList::new(Extent::new(480.0, 280.0))
    }

    fn circles(list: &DisplayList) -> Vec<Pos2> {
        list.primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fewer_than_two_points_is_blank() {
        let mut list = canvas();
        render(&[10.0, 20.0], &mut list);
        assert!(!list.is_blank());

        render(&[42.0], &mut list);
        assert!(list.is_blank());
        render(&[], &mut list);
        assert!(list.is_blank());
    }

    #[test]
    fn rendering_is_idempotent() {
        let values = [150.0, 160.0, 155.0, 0.0, 240.5];
        let mut first = canvas();
        let mut second = canvas();
        render(&values, &mut first);
        render(&values, &mut second);
        assert_eq!(first, second);

        render(&values, &mut first);
        assert_eq!(first, second);
    }

    #[test]
    fn axis_floor_keeps_low_values_in_the_lower_band() {
        let layout = ChartLayout::new(&[10.0, 20.0], Extent::new(480.0, 280.0)).unwrap();
        assert_eq!(layout.max_value, 100.0);
        assert_eq!(layout.min_value, 0.0);
    }

    #[test]
    fn points_span_the_plot_area() {
        let mut list = canvas();
        render(&[0.0, 50.0, 200.0], &mut list);
        let pts = circles(&list);
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0], Pos2::new(PADDING, 280.0 - PADDING));
        assert_eq!(pts[1].x, 240.0);
        assert_eq!(pts[2], Pos2::new(480.0 - PADDING, PADDING));
    }

    #[test]
    fn gridlines_are_labeled_from_max_to_zero() {
        let mut list = canvas();
        render(&[40.0, 200.0], &mut list);
        let labels: Vec<&str> = list
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, angle, .. } if *angle == 0.0 && text != "Time" => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["200", "150", "100", "50", "0"]);
    }

    #[test]
    fn flat_range_renders_on_the_axis() {
        let layout = ChartLayout {
            extent: Extent::new(480.0, 280.0),
            count: 2,
            min_value: 0.0,
            max_value: 0.0,
        };
        assert_eq!(layout.point(1, 0.0).y, layout.bottom());
    }

    #[test]
    fn draw_order_is_fill_line_markers() {
        let mut list = canvas();
        render(&[120.0, 130.0], &mut list);
        let kinds: Vec<u8> = list
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::FillUnder { .. } => Some(0),
                Primitive::Polyline { .. } => Some(1),
                Primitive::Circle { .. } => Some(2),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![0, 1, 2, 2]);
    }
}
