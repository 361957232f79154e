//! Plotters-powered lip chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::Lip;

/// Chart-space series for one frame (y already negated).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub outer: [(Lip, Vec<(f64, f64)>); 2],
    pub medial: [(Lip, Vec<(f64, f64)>); 2],
    pub control_points: Vec<(f64, f64)>,
    /// Medial corner anchors.
    pub anchor_points: Vec<(f64, f64)>,
    /// Medial points that move with the amplitude.
    pub amplitude_points: Vec<(f64, f64)>,
    pub labels: Vec<(&'static str, (f64, f64))>,
    pub guides: Vec<[(f64, f64); 2]>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call, which keeps
/// `render()` focused on drawing.
pub struct LipPlottersChart<'a> {
    pub series: &'a ChartSeries,
    /// Axis labels (kept simple for terminal rendering).
    pub x_label: &'a str,
    pub y_label: String,
    /// Formatting of tick labels.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

fn lip_color(lip: Lip, bright: bool) -> RGBColor {
    match (lip, bright) {
        (Lip::Upper, true) => RGBColor(255, 60, 60),
        (Lip::Upper, false) => RGBColor(170, 40, 40),
        (Lip::Lower, true) => RGBColor(0, 255, 0),
        (Lip::Lower, false) => RGBColor(0, 160, 0),
    }
}

impl<'a> Widget for LipPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let s = self.series;
        let [x0, x1] = s.x_bounds;
        let [y0, y1] = s.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(&self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let guide_color = RGBColor(110, 110, 110);
            let control_color = RGBColor(205, 133, 63);
            let amplitude_color = RGBColor(80, 160, 255);

            // 1) Amplitude guides, underneath everything else.
            chart.draw_series(
                s.guides
                    .iter()
                    .map(|segment| PathElement::new(segment.to_vec(), &guide_color)),
            )?;

            // 2) Outer (vermilion) curves, then the medial curves.
            for (lip, curve) in &s.outer {
                chart.draw_series(LineSeries::new(curve.iter().copied(), &lip_color(*lip, true)))?;
            }
            for (lip, curve) in &s.medial {
                chart.draw_series(LineSeries::new(curve.iter().copied(), &lip_color(*lip, false)))?;
            }

            // 3) Points. `Circle` radii are mis-scaled by the terminal backend, so
            // single pixels are used as markers.
            chart.draw_series(
                s.control_points
                    .iter()
                    .chain(s.anchor_points.iter())
                    .map(|&(x, y)| Pixel::new((x, y), control_color)),
            )?;
            chart.draw_series(
                s.amplitude_points
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), amplitude_color)),
            )?;

            // 4) Control point names.
            let label_style = ("sans-serif", 8).into_font().color(&WHITE);
            chart.draw_series(
                s.labels
                    .iter()
                    .map(|&(name, coord)| Text::new(name, coord, label_style.clone())),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
