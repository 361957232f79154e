//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements, later ones drawn over earlier ones:
//! - amplitude guides: `:`
//! - outer curves: `-`, medial curves: `.`
//! - control points: `+`, amplitude points: `o`
//!
//! Screen convention: y grows downward, so the upper lip is at the top.

use crate::domain::{Frame, Point};

/// Render a frame onto a `width x height` character grid.
pub fn render_ascii_frame(frame: &Frame, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let bounds = Bounds::of(frame);

    let mut grid = vec![vec![' '; width]; height];

    for g in &frame.guides {
        let x = bounds.map_x(g.x, width);
        let y0 = bounds.map_y(g.y_min, height);
        let y1 = bounds.map_y(g.y_max, height);
        draw_line(&mut grid, x, y0, x, y1, ':');
    }

    draw_polyline(&mut grid, &frame.upper_outer, &bounds, '-');
    draw_polyline(&mut grid, &frame.lower_outer, &bounds, '-');
    draw_polyline(&mut grid, &frame.upper_medial_curve, &bounds, '.');
    draw_polyline(&mut grid, &frame.lower_medial_curve, &bounds, '.');

    for (_, p) in frame.control_points.iter() {
        plot_point(&mut grid, p, &bounds, '+');
    }
    for set in [&frame.upper_medial, &frame.lower_medial] {
        for &p in &set.points {
            let ch = if frame.is_amplitude_point(p) { 'o' } else { '+' };
            plot_point(&mut grid, p, &bounds, ch);
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{}, {}] px | y=[{}, {}] px\n",
        bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Pixel extent of everything drawn in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    x_min: i64,
    x_max: i64,
    y_min: i64,
    y_max: i64,
}

impl Bounds {
    fn of(frame: &Frame) -> Self {
        let mut b = Bounds {
            x_min: i64::MAX,
            x_max: i64::MIN,
            y_min: i64::MAX,
            y_max: i64::MIN,
        };
        let mut add = |p: Point| {
            b.x_min = b.x_min.min(p.x);
            b.x_max = b.x_max.max(p.x);
            b.y_min = b.y_min.min(p.y);
            b.y_max = b.y_max.max(p.y);
        };

        for (_, curve) in frame.curves() {
            curve.iter().copied().for_each(&mut add);
        }
        frame.control_points.iter().for_each(|(_, p)| add(p));
        frame.upper_medial.points.iter().chain(&frame.lower_medial.points).copied().for_each(&mut add);
        for g in &frame.guides {
            add(Point::new(g.x, g.y_min));
            add(Point::new(g.x, g.y_max));
        }

        if b.x_min > b.x_max {
            b = Bounds { x_min: 0, x_max: 1, y_min: 0, y_max: 1 };
        }
        if b.x_max == b.x_min {
            b.x_max = b.x_max.saturating_add(1);
        }
        if b.y_max == b.y_min {
            b.y_max = b.y_max.saturating_add(1);
        }
        b
    }

    fn map_x(&self, x: i64, width: usize) -> usize {
        map_axis(x, self.x_min, self.x_max, width)
    }

    fn map_y(&self, y: i64, height: usize) -> usize {
        map_axis(y, self.y_min, self.y_max, height)
    }
}

/// Differences are taken in `f64` so bounds near the `i64` limits cannot overflow.
fn map_axis(v: i64, min: i64, max: i64, cells: usize) -> usize {
    let cells = cells.max(2);
    let span = max as f64 - min as f64;
    let u = if span > 0.0 {
        ((v as f64 - min as f64) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (u * (cells as f64 - 1.0)).round() as usize
}

fn plot_point(grid: &mut [Vec<char>], p: Point, bounds: &Bounds, ch: char) {
    let height = grid.len();
    let width = grid[0].len();
    grid[bounds.map_y(p.y, height)][bounds.map_x(p.x, width)] = ch;
}

fn draw_polyline(grid: &mut [Vec<char>], curve: &[Point], bounds: &Bounds, ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &p in curve {
        let x = bounds.map_x(p.x, width);
        let y = bounds.map_y(p.y, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, ch);
        } else if grid[y][x] == ' ' {
            grid[y][x] = ch;
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::compute_frame;
    use crate::domain::{FrameConfig, LipParams};

    fn default_frame() -> Frame {
        compute_frame(&LipParams::default(), &FrameConfig::default()).unwrap()
    }

    #[test]
    fn plot_has_header_and_fixed_grid() {
        let txt = render_ascii_frame(&default_frame(), 40, 12);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "Plot: x=[200, 400] px | y=[99, 250] px");
        assert!(lines[1..].iter().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn corner_anchors_land_on_the_grid_edges() {
        let frame = default_frame();
        let txt = render_ascii_frame(&frame, 40, 12);
        let rows: Vec<Vec<char>> = txt.lines().skip(1).map(|l| l.chars().collect()).collect();

        // Bounds are x 200..400, y 99..250; the corners are at y = 200.
        let row = map_axis(200, 99, 250, 12);
        assert_eq!(rows[row][0], '+');
        assert_eq!(rows[row][39], '+');
    }

    #[test]
    fn tiny_sizes_are_clamped() {
        let txt = render_ascii_frame(&default_frame(), 1, 1);
        assert_eq!(txt.lines().count(), 6);
        assert!(txt.lines().skip(1).all(|l| l.chars().count() == 10));
    }

    #[test]
    fn draw_line_does_not_overwrite() {
        let mut grid = vec![vec![' '; 5]; 3];
        grid[1][2] = 'x';
        draw_line(&mut grid, 0, 1, 4, 1, '-');
        assert_eq!(grid[1].iter().collect::<String>(), "--x--");
    }

    #[test]
    fn huge_widths_plot_within_the_grid() {
        let params = LipParams {
            lip_width: 1e30,
            ..LipParams::default()
        };
        let frame = compute_frame(&params, &FrameConfig::default()).unwrap();
        let txt = render_ascii_frame(&frame, 40, 12);
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with(&format!("Plot: x=[{}, {}] px", i64::MIN, i64::MAX)));
        assert!(lines[1..].iter().all(|l| l.chars().count() == 40));

        let rows: Vec<Vec<char>> = lines[1..].iter().map(|l| l.chars().collect()).collect();
        assert!(rows.iter().any(|r| r[0] == '+'));
        assert!(rows.iter().any(|r| r[39] == '+'));
    }

    #[test]
    fn map_axis_handles_extreme_and_empty_spans() {
        assert_eq!(map_axis(i64::MIN, i64::MIN, i64::MAX, 40), 0);
        assert_eq!(map_axis(i64::MAX, i64::MIN, i64::MAX, 40), 39);
        assert_eq!(map_axis(5, 5, 5, 40), 0);
    }
}
