use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Polygon};

use crate::chart::{ChartKind, ChartSpec};
use crate::color::MonthColors;

/// Segments used to approximate a full circle.
const CIRCLE_SEGMENTS: usize = 96;

// ---------------------------------------------------------------------------
// Chart slot
// ---------------------------------------------------------------------------

/// Render one output slot: title plus the chart the spec describes.
pub fn chart_slot(ui: &mut Ui, spec: &ChartSpec, colors: &MonthColors) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&spec.title).strong().size(15.0));
    });
    ui.add_space(4.0);

    if spec.points.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No observations for this region and year.");
        });
        return;
    }

    match spec.kind {
        ChartKind::Pie => pie_chart(ui, spec, colors),
        ChartKind::Bar => bar_chart(ui, spec, colors),
    }
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// Outline of a wedge of the unit circle from `start` sweeping clockwise by
/// `sweep` radians.  Wedges wider than a quarter turn are split so every
/// polygon stays convex.
fn wedge_polygons(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let piece = sweep / pieces as f64;
    (0..pieces)
        .map(|p| {
            let a0 = start - p as f64 * piece;
            let steps = ((piece / TAU) * CIRCLE_SEGMENTS as f64).ceil().max(1.0) as usize;
            let mut pts = Vec::with_capacity(steps + 2);
            pts.push([0.0, 0.0]);
            for s in 0..=steps {
                let a = a0 - piece * s as f64 / steps as f64;
                pts.push([a.cos(), a.sin()]);
            }
            pts
        })
        .collect()
}

fn pie_chart(ui: &mut Ui, spec: &ChartSpec, colors: &MonthColors) {
    // NaN means and zero areas get no slice
    let total: f64 = spec
        .points
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite() && *v > 0.0)
        .sum();

    Plot::new("pie_chart")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            if total <= 0.0 {
                return;
            }
            // first slice starts at twelve o'clock
            let mut angle = FRAC_PI_2;
            for point in &spec.points {
                if !(point.value.is_finite() && point.value > 0.0) {
                    continue;
                }
                let share = point.value / total;
                let sweep = share * TAU;
                let name = format!("{} ({:.1}%)", point.label, share * 100.0);
                let color = colors.color_for(&point.label);
                for outline in wedge_polygons(angle, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(outline))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }
                angle -= sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Bar
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, spec: &ChartSpec, colors: &MonthColors) {
    let x_labels: Vec<String> = spec.points.iter().map(|p| p.label.clone()).collect();

    let bars: Vec<Bar> = spec
        .points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.value.is_finite())
        .map(|(i, p)| {
            Bar::new(i as f64, p.value)
                .name(&p.label)
                .fill(colors.color_for(&p.label))
                .width(0.7)
        })
        .collect();

    Plot::new("bar_chart")
        .x_axis_label(spec.category_label.as_str())
        .y_axis_label(spec.value_label.as_str())
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if (v - v.round()).abs() > 1e-6 || v < 0.0 {
                return String::new();
            }
            x_labels.get(v.round() as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(spec.value_label.as_str()));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radius(p: &[f64; 2]) -> f64 {
        (p[0] * p[0] + p[1] * p[1]).sqrt()
    }

    #[test]
    fn small_wedge_is_one_polygon_on_the_unit_circle() {
        let polys = wedge_polygons(FRAC_PI_2, 0.5);
        assert_eq!(polys.len(), 1);
        let poly = &polys[0];
        assert_eq!(poly[0], [0.0, 0.0]);
        for p in &poly[1..] {
            assert!((radius(p) - 1.0).abs() < 1e-9);
        }
        // starts at twelve o'clock
        assert!((poly[1][0]).abs() < 1e-9 && (poly[1][1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn full_circle_is_split_into_convex_pieces() {
        let polys = wedge_polygons(FRAC_PI_2, TAU);
        assert_eq!(polys.len(), 4);
        // last point of the last piece closes back at the start
        let last = polys[3].last().unwrap();
        assert!((last[0]).abs() < 1e-9 && (last[1] - 1.0).abs() < 1e-9);
    }
}
