/// Bar chart rendering
///
/// `ChartCanvas` is the egui-side `ChartSurface`: the controller clears and draws
/// series into it, and `render_chart` paints whatever a target currently holds
/// with egui::Painter (gridlines, bars, category labels, hover read-out).

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use std::collections::HashMap;

use super::ChartSurface;
use crate::series::{ChartConfig, ChartSeries, ChartTarget};

const CHART_HEIGHT: f32 = 260.0;
const AXIS_GUTTER: f32 = 56.0;
const LABEL_GUTTER: f32 = 34.0;
const MAX_LABEL_CHARS: usize = 12;

/// Bar color per target, so the two per-layer views are easy to tell apart
fn bar_color(target: ChartTarget) -> Color32 {
    match target {
        ChartTarget::PrimaryPerLayer => Color32::from_rgb(136, 192, 208),
        ChartTarget::SecondaryPerLayer => Color32::from_rgb(235, 160, 90),
        ChartTarget::LayerSummary => Color32::from_rgb(163, 190, 140),
        ChartTarget::BackendComparison => Color32::from_rgb(180, 142, 173),
    }
}

/// Retained chart contents, keyed by draw target
#[derive(Default)]
pub struct ChartCanvas {
    charts: HashMap<ChartTarget, (ChartSeries, ChartConfig)>,
}

impl ChartCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: ChartTarget) -> Option<&(ChartSeries, ChartConfig)> {
        self.charts.get(&target)
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

impl ChartSurface for ChartCanvas {
    fn clear(&mut self, target: ChartTarget) {
        self.charts.remove(&target);
    }

    fn draw(&mut self, target: ChartTarget, series: &ChartSeries, config: &ChartConfig) {
        self.charts.insert(target, (series.clone(), config.clone()));
    }
}

/// Round `max` up to 1, 2 or 5 times a power of ten, for a tidy y-axis
pub fn nice_ceiling(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(max.log10().floor());
    let fraction = max / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Label every n-th bar so category labels don't overlap
pub fn label_stride(bars: usize, width: f32, min_label_width: f32) -> usize {
    if bars == 0 || width <= 0.0 {
        return 1;
    }
    let fits = (width / min_label_width).floor().max(1.0) as usize;
    ((bars + fits - 1) / fits).max(1)
}

/// Shorten a category label to `max` characters, marking the cut with '…'
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let kept: String = label.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Horizontal center of the hover read-out: follows the bar, kept clear of the
/// plot edges, centered when the plot is too narrow for that.
fn readout_x(bar_x: f32, plot: Rect) -> f32 {
    const HALF_READOUT: f32 = 60.0;
    if plot.width() < 2.0 * HALF_READOUT {
        return plot.center().x;
    }
    bar_x.clamp(plot.left() + HALF_READOUT, plot.right() - HALF_READOUT)
}

fn format_tick(value: f64) -> String {
    if value >= 100.0 || value == 0.0 {
        format!("{:.0}", value)
    } else if value >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}

/// Render the chart held for `target`; nothing is drawn for an empty target
pub fn render_chart(ui: &mut egui::Ui, canvas: &ChartCanvas, target: ChartTarget) {
    let Some((series, config)) = canvas.get(target) else {
        return;
    };

    ui.push_id(target.id(), |ui| {
        ui.horizontal(|ui| {
            ui.strong(config.title);
            if let Some(ref name) = series.name {
                ui.label(egui::RichText::new(name).color(bar_color(target)).small());
            }
        });
        bar_chart(ui, series, config, bar_color(target));
    });
}

/// Draws a vertical bar chart
///
/// Layout: y-axis ticks in a left gutter, category labels below the plot area,
/// axis captions at the bottom and along the gutter.
pub fn bar_chart(ui: &mut egui::Ui, series: &ChartSeries, config: &ChartConfig, color: Color32) {
    if series.is_empty() {
        ui.label("(no samples)");
        return;
    }

    let (response, painter) = ui.allocate_painter(
        Vec2::new(ui.available_width(), CHART_HEIGHT),
        egui::Sense::hover(),
    );
    let rect = response.rect;
    let plot = Rect::from_min_max(
        Pos2::new(rect.left() + AXIS_GUTTER, rect.top() + 8.0),
        Pos2::new(rect.right() - 8.0, rect.bottom() - LABEL_GUTTER - 14.0),
    );

    let y_max = nice_ceiling(series.max_value().unwrap_or(0.0));
    let value_to_y = |v: f64| -> f32 { plot.bottom() - (v.max(0.0) / y_max) as f32 * plot.height() };

    painter.rect_filled(rect, 2.0, Color32::from_rgb(46, 52, 64));

    // Gridlines with tick values
    let grid_color = Color32::from_gray(70);
    for tick in 0..=4 {
        let value = y_max * tick as f64 / 4.0;
        let y = value_to_y(value);
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(0.5, grid_color),
        );
        painter.text(
            Pos2::new(plot.left() - 4.0, y),
            egui::Align2::RIGHT_CENTER,
            format_tick(value),
            egui::FontId::new(10.0, egui::FontFamily::Monospace),
            Color32::LIGHT_GRAY,
        );
    }

    let slot = plot.width() / series.len() as f32;
    let bar_width = (slot * 0.8).max(1.0);
    let stride = label_stride(series.len(), plot.width(), 60.0);
    let hover = response.hover_pos().filter(|pos| plot.contains(*pos));
    let mut hovered = None;

    for (i, point) in series.points.iter().enumerate() {
        let center_x = plot.left() + slot * (i as f32 + 0.5);
        let bar = Rect::from_min_max(
            Pos2::new(center_x - bar_width / 2.0, value_to_y(point.value)),
            Pos2::new(center_x + bar_width / 2.0, plot.bottom()),
        );
        let is_hovered = hover.map_or(false, |pos| (pos.x - center_x).abs() <= slot / 2.0);
        let fill = if is_hovered { Color32::WHITE } else { color };
        painter.rect_filled(bar, 0.0, fill);
        if is_hovered {
            hovered = Some((center_x, point));
        }

        if i % stride == 0 {
            painter.text(
                Pos2::new(center_x, plot.bottom() + 4.0),
                egui::Align2::CENTER_TOP,
                truncate_label(&point.label, MAX_LABEL_CHARS),
                egui::FontId::new(9.0, egui::FontFamily::Proportional),
                Color32::LIGHT_GRAY,
            );
        }
    }

    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        Stroke::new(1.0, Color32::from_gray(120)),
    );

    // Axis captions
    painter.text(
        Pos2::new(plot.center().x, rect.bottom() - 4.0),
        egui::Align2::CENTER_BOTTOM,
        config.x_axis,
        egui::FontId::new(11.0, egui::FontFamily::Proportional),
        Color32::GRAY,
    );
    painter.text(
        Pos2::new(rect.left() + 4.0, rect.top() + 4.0),
        egui::Align2::LEFT_TOP,
        config.y_axis,
        egui::FontId::new(10.0, egui::FontFamily::Proportional),
        Color32::GRAY,
    );

    if let Some((x, point)) = hovered {
        painter.text(
            Pos2::new(readout_x(x, plot), plot.top() + 2.0),
            egui::Align2::CENTER_TOP,
            format!("{}: {} ms", point.label, point.value),
            egui::FontId::new(12.0, egui::FontFamily::Monospace),
            Color32::WHITE,
        );
    }

    painter.rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::from_gray(90)));
}
