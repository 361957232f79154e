//! Ratatui-based terminal UI.
//!
//! The TUI provides a slider panel with one gauge per shape parameter and
//! renders the resulting lip curves, control points, labels and amplitude
//! guides next to it. Sliders respond to the keyboard and to left-click/drag.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Terminal,
};

use crate::app::pipeline::compute_frame;
use crate::domain::{Frame, FrameConfig, Lip, LipParams, PARAM_SPECS, ParamSpec};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::{ChartSeries, LipPlottersChart};

/// Width of the slider panel, borders included.
const SLIDER_PANEL_WIDTH: u16 = 48;

/// Width of the slider name column.
const SLIDER_LABEL_WIDTH: u16 = 22;

/// Raw slider step for Shift+arrow.
const COARSE_STEP: i64 = 10;

/// Start the TUI.
pub fn run(params: LipParams, config: FrameConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(params, config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen, mouse) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

/// One slider: a parameter range and its integer position.
#[derive(Debug, Clone, Copy)]
struct Slider {
    spec: &'static ParamSpec,
    raw: u32,
}

impl Slider {
    fn value(&self) -> f64 {
        self.spec.value_of(self.raw)
    }

    fn ratio(&self) -> f64 {
        if self.spec.max_raw == 0 {
            0.0
        } else {
            (self.raw as f64 / self.spec.max_raw as f64).clamp(0.0, 1.0)
        }
    }

    /// Move by `delta` raw units; returns whether the position changed.
    fn step(&mut self, delta: i64) -> bool {
        let next = (self.raw as i64 + delta).clamp(0, self.spec.max_raw as i64) as u32;
        self.set_raw(next)
    }

    fn set_raw(&mut self, raw: u32) -> bool {
        let raw = raw.min(self.spec.max_raw);
        let changed = raw != self.raw;
        self.raw = raw;
        changed
    }
}

/// All UI state. The core only ever sees `params()` and `config`.
struct App {
    sliders: Vec<Slider>,
    config: FrameConfig,
    selected: usize,
    show_labels: bool,
    show_guides: bool,
    /// False until every slider exists; recomputation is skipped before that.
    initialized: bool,
    status: String,
    frame: Option<Frame>,
    /// Gauge rectangles from the last draw, in slider order (mouse hit-testing).
    gauge_areas: Vec<Rect>,
}

impl App {
    fn new(params: LipParams, config: FrameConfig) -> Self {
        let mut app = Self {
            sliders: Vec::with_capacity(PARAM_SPECS.len()),
            config,
            selected: 0,
            show_labels: true,
            show_guides: true,
            initialized: false,
            status: String::new(),
            frame: None,
            gauge_areas: Vec::new(),
        };

        let mut quantized = Vec::new();
        for spec in PARAM_SPECS.iter() {
            let value = params.get(spec.id);
            let raw = spec.raw_of(value);
            if spec.value_of(raw) != value {
                quantized.push(spec.name);
            }
            app.sliders.push(Slider { spec, raw });
        }

        app.initialized = true;
        app.recompute();

        app.status = if quantized.is_empty() {
            "Ready.".to_string()
        } else {
            format!("Snapped to slider range: {}", quantized.join(", "))
        };
        app
    }

    /// Current parameters as read from the sliders.
    fn params(&self) -> LipParams {
        let mut params = LipParams::default();
        for slider in &self.sliders {
            params.set(slider.spec.id, slider.value());
        }
        params
    }

    /// Full synchronous recompute of the frame.
    fn recompute(&mut self) {
        if !self.initialized {
            return;
        }
        match compute_frame(&self.params(), &self.config) {
            Ok(frame) => self.frame = Some(frame),
            Err(err) => {
                log::error!("frame computation failed: {err}");
                self.frame = None;
                self.status = format!("Frame failed: {err}");
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    needs_redraw = self.handle_mouse(mouse);
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            COARSE_STEP
        } else {
            1
        };

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < self.sliders.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Left => self.adjust_selected(-step),
            KeyCode::Right => self.adjust_selected(step),
            KeyCode::Char('p') => {
                self.config.profile = self.config.profile.next();
                self.status = format!("profile: {}", self.config.profile.display_name());
                self.recompute();
            }
            KeyCode::Char('l') => {
                self.show_labels = !self.show_labels;
                self.status = format!("labels: {}", on_off(self.show_labels));
            }
            KeyCode::Char('g') => {
                self.show_guides = !self.show_guides;
                self.status = format!("guides: {}", on_off(self.show_guides));
            }
            KeyCode::Char('r') => {
                for slider in &mut self.sliders {
                    slider.raw = slider.spec.default_raw;
                }
                self.status = "Reset to defaults.".to_string();
                self.recompute();
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }

        false
    }

    /// Returns `true` when a redraw is needed.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let pressed = matches!(
            mouse.kind,
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
        );
        if !pressed {
            return false;
        }

        let Some((index, raw)) = slider_hit(&self.gauge_areas, &self.sliders, mouse.column, mouse.row) else {
            return false;
        };

        self.selected = index;
        if self.sliders[index].set_raw(raw) {
            self.status = self.slider_status(index);
            self.recompute();
        }
        true
    }

    fn adjust_selected(&mut self, delta: i64) {
        let index = self.selected;
        let changed = self.sliders[index].step(delta);
        self.status = self.slider_status(index);
        if changed {
            self.recompute();
        }
    }

    fn slider_status(&self, index: usize) -> String {
        let slider = &self.sliders[index];
        format!("{}: {}", slider.spec.name, fmt_slider_value(slider))
    }

    fn export(&mut self) {
        let Some(frame) = &self.frame else {
            self.status = "No frame to export.".to_string();
            return;
        };
        let path = crate::io::default_export_path();
        match crate::io::write_frame_json(&path, &self.params(), &self.config, frame) {
            Ok(()) => {
                log::info!("exported frame to {}", path.display());
                self.status = format!("Wrote frame JSON: {}", path.display());
            }
            Err(err) => {
                self.status = format!("Export failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let params = self.params();
        let line = Line::from(vec![
            Span::styled("lips", Style::default().fg(Color::Cyan)),
            Span::raw(" | parametric lip model"),
            Span::styled(
                format!(
                    " | profile: {} | samples: {} | centre: ({}, {}) | labels: {} | guides: {}",
                    self.config.profile.display_name(),
                    self.config.samples,
                    params.px0,
                    params.py0,
                    on_off(self.show_labels),
                    on_off(self.show_guides),
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);

        let p = Paragraph::new(Text::from(line)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SLIDER_PANEL_WIDTH), Constraint::Min(0)])
            .split(area);

        self.draw_sliders(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_sliders(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Parameters").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(1); self.sliders.len()];
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        self.gauge_areas.clear();
        for (i, slider) in self.sliders.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SLIDER_LABEL_WIDTH), Constraint::Min(0)])
                .split(rows[i]);

            let selected = i == self.selected;
            let (marker, label_style, bar_color) = if selected {
                ("» ", Style::default().fg(Color::Black).bg(Color::White), Color::Yellow)
            } else {
                ("  ", Style::default(), Color::DarkGray)
            };

            frame.render_widget(
                Paragraph::new(format!("{marker}{}", slider.spec.name)).style(label_style),
                cols[0],
            );

            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(bar_color).bg(Color::Black))
                .ratio(slider.ratio())
                .label(fmt_slider_value(slider))
                .use_unicode(true);
            frame.render_widget(gauge, cols[1]);
            self.gauge_areas.push(cols[1]);
        }
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Lips").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(lips) = &self.frame else {
            let msg = Paragraph::new("No frame (see status line).")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let series = chart_series(lips, self.show_labels, self.show_guides);
        let widget = LipPlottersChart {
            series: &series,
            x_label: "x (px)",
            y_label: "y (px)".to_string(),
            fmt_x: fmt_axis_px,
            fmt_y: fmt_axis_px_flipped,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust (Shift ×10)  click/drag gauge  p profile  l labels  g guides  r reset  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Map a click at (`column`, `row`) onto a slider position.
///
/// The leftmost gauge cell is 0 and the rightmost is the slider maximum.
fn slider_hit(areas: &[Rect], sliders: &[Slider], column: u16, row: u16) -> Option<(usize, u32)> {
    areas.iter().zip(sliders).enumerate().find_map(|(i, (area, slider))| {
        let inside = row == area.y && column >= area.x && column < area.x + area.width;
        if !inside || area.width == 0 {
            return None;
        }
        let offset = (column - area.x) as u64;
        let span = area.width.saturating_sub(1).max(1) as u64;
        let raw = (offset * slider.spec.max_raw as u64 / span) as u32;
        Some((i, raw.min(slider.spec.max_raw)))
    })
}

/// Build chart series for Plotters.
///
/// Screen y grows downward while chart y grows upward, so y is negated here
/// and the tick formatter negates it back.
fn chart_series(frame: &Frame, show_labels: bool, show_guides: bool) -> ChartSeries {
    let flip = |p: crate::domain::Point| {
        let (x, y) = p.as_f64();
        (x, -y)
    };

    let outer: [(Lip, Vec<(f64, f64)>); 2] = [
        (Lip::Upper, frame.upper_outer.iter().copied().map(flip).collect()),
        (Lip::Lower, frame.lower_outer.iter().copied().map(flip).collect()),
    ];
    let medial: [(Lip, Vec<(f64, f64)>); 2] = [
        (Lip::Upper, frame.upper_medial_curve.iter().copied().map(flip).collect()),
        (Lip::Lower, frame.lower_medial_curve.iter().copied().map(flip).collect()),
    ];

    let control_points: Vec<(f64, f64)> = frame.control_points.iter().map(|(_, p)| flip(p)).collect();

    let mut anchor_points = Vec::new();
    let mut amplitude_points = Vec::new();
    for set in [&frame.upper_medial, &frame.lower_medial] {
        for &p in &set.points {
            if frame.is_amplitude_point(p) {
                amplitude_points.push(flip(p));
            } else {
                anchor_points.push(flip(p));
            }
        }
    }

    let labels = if show_labels {
        frame
            .control_points
            .iter()
            .map(|(name, p)| (name.as_str(), flip(p)))
            .collect()
    } else {
        Vec::new()
    };

    let guides: Vec<[(f64, f64); 2]> = if show_guides {
        frame
            .guides
            .iter()
            .map(|g| [(g.x as f64, -(g.y_min as f64)), (g.x as f64, -(g.y_max as f64))])
            .collect()
    } else {
        Vec::new()
    };

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let all = outer
        .iter()
        .chain(medial.iter())
        .flat_map(|(_, pts): &(Lip, Vec<(f64, f64)>)| pts.iter())
        .chain(control_points.iter())
        .chain(anchor_points.iter())
        .chain(amplitude_points.iter())
        .chain(guides.iter().flatten());
    for &(x, y) in all {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    ChartSeries {
        outer,
        medial,
        control_points,
        anchor_points,
        amplitude_points,
        labels,
        guides,
        x_bounds: padded(x_min, x_max),
        y_bounds: padded(y_min, y_max),
    }
}

fn padded(min: f64, max: f64) -> [f64; 2] {
    if !min.is_finite() || !max.is_finite() || max <= min {
        let c = if min.is_finite() { min } else { 0.0 };
        return [c - 1.0, c + 1.0];
    }
    let pad = ((max - min).abs() * 0.05).max(1.0);
    [min - pad, max + pad]
}

fn fmt_slider_value(slider: &Slider) -> String {
    if slider.spec.scale == 1.0 {
        format!("{}", slider.raw)
    } else {
        let decimals = slider.spec.scale.log10().ceil() as usize;
        format!("{:.*}", decimals, slider.value())
    }
}

fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}

fn fmt_axis_px(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_px_flipped(v: f64) -> String {
    format!("{:.0}", -v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParamId, param_spec};

    fn app() -> App {
        App::new(LipParams::default(), FrameConfig::default())
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
        app.handle_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn new_app_is_initialized_with_a_frame() {
        let app = app();
        assert!(app.initialized);
        assert!(app.frame.is_some());
        assert_eq!(app.sliders.len(), PARAM_SPECS.len());
        assert_eq!(app.params(), LipParams::default());
        assert_eq!(app.status, "Ready.");
    }

    #[test]
    fn recompute_is_skipped_until_initialized() {
        let mut app = app();
        app.initialized = false;
        app.frame = None;
        app.recompute();
        assert!(app.frame.is_none());
    }

    #[test]
    fn arrows_step_the_selected_slider() {
        let mut app = app();
        assert_eq!(app.sliders[0].spec.id, ParamId::LipWidth);

        press(&mut app, KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.params().lip_width, 101.0);
        press(&mut app, KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(app.params().lip_width, 91.0);
        assert_eq!(app.status, "lipWidth: 91");

        let frame = app.frame.as_ref().unwrap();
        assert_eq!(frame.upper_medial.points[0].x, 300 - 91);
    }

    #[test]
    fn slider_steps_saturate_at_range_ends() {
        let mut app = app();
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.sliders[app.selected].spec.id, ParamId::LipAmplitude);
        for _ in 0..20 {
            press(&mut app, KeyCode::Left, KeyModifiers::SHIFT);
        }
        assert_eq!(app.params().lip_amplitude, 0.0);
        for _ in 0..20 {
            press(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
        }
        assert_eq!(app.params().lip_amplitude, 10.0);
    }

    #[test]
    fn quit_keys_and_toggles() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(press(&mut app, KeyCode::Esc, KeyModifiers::NONE));

        assert!(!press(&mut app, KeyCode::Char('l'), KeyModifiers::NONE));
        assert!(!app.show_labels);
        press(&mut app, KeyCode::Char('g'), KeyModifiers::NONE);
        assert!(!app.show_guides);
        press(&mut app, KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(app.config.profile, crate::domain::YProfile::Soft);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut app = app();
        press(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
        press(&mut app, KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(app.params(), LipParams::default());
    }

    #[test]
    fn out_of_range_start_values_are_snapped() {
        let params = LipParams {
            lip_width: 500.0,
            ..LipParams::default()
        };
        let app = App::new(params, FrameConfig::default());
        assert_eq!(app.params().lip_width, 200.0);
        assert!(app.status.contains("lipWidth"));
    }

    #[test]
    fn click_maps_column_to_slider_value() {
        let mut app = app();
        app.gauge_areas = (0..app.sliders.len() as u16)
            .map(|i| Rect { x: 10, y: 2 + i, width: 21, height: 1 })
            .collect();

        // Row 2 is lipWidth (max 200): the last cell is the maximum.
        assert_eq!(slider_hit(&app.gauge_areas, &app.sliders, 30, 2), Some((0, 200)));
        assert_eq!(slider_hit(&app.gauge_areas, &app.sliders, 10, 2), Some((0, 0)));
        assert_eq!(slider_hit(&app.gauge_areas, &app.sliders, 20, 2), Some((0, 100)));
        assert_eq!(slider_hit(&app.gauge_areas, &app.sliders, 9, 2), None);
        assert_eq!(slider_hit(&app.gauge_areas, &app.sliders, 31, 2), None);

        let drag = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 20,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };
        assert!(app.handle_mouse(drag));
        assert_eq!(app.selected, 1);
        assert_eq!(app.params().lip_amplitude, 5.0);

        let moved = MouseEvent { kind: MouseEventKind::Moved, ..drag };
        assert!(!app.handle_mouse(moved));
    }

    #[test]
    fn chart_series_flips_y_and_honours_toggles() {
        let app = app();
        let frame = app.frame.as_ref().unwrap();

        let series = chart_series(frame, true, true);
        assert_eq!(series.control_points.len(), 16);
        assert_eq!(series.control_points[0], (200.0, -200.0));
        assert_eq!(series.labels.len(), 16);
        assert_eq!(series.guides.len(), 12);
        assert_eq!(series.amplitude_points.len(), 12);
        assert_eq!(series.anchor_points.len(), 4);
        assert!(series.y_bounds[0] < -250.0 && series.y_bounds[1] > -99.0);

        let bare = chart_series(frame, false, false);
        assert!(bare.labels.is_empty());
        assert!(bare.guides.is_empty());
    }

    #[test]
    fn slider_values_format_with_scale_precision() {
        let amp = Slider { spec: param_spec(ParamId::LipAmplitude), raw: 25 };
        let spread = Slider { spec: param_spec(ParamId::UpperCornerSpread), raw: 33 };
        let width = Slider { spec: param_spec(ParamId::LipWidth), raw: 120 };
        assert_eq!(fmt_slider_value(&amp), "2.5");
        assert_eq!(fmt_slider_value(&spread), "0.33");
        assert_eq!(fmt_slider_value(&width), "120");
    }
}
