use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

const CHART_HEIGHT: f32 = 280.0;

/// One named, coloured series of `[x, y]` points.
pub struct Series {
    pub name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

impl Series {
    pub fn new(name: impl Into<String>, color: Color32) -> Self {
        Self {
            name: name.into(),
            color,
            points: Vec::new(),
        }
    }

    /// Append a point, skipping absent values.
    pub fn push(&mut self, x: f64, y: Option<f64>) {
        if let Some(y) = y {
            self.points.push([x, y]);
        }
    }
}

/// Find or create the series for `name`, keeping first-seen order.
pub fn series_entry<'a>(series: &'a mut Vec<Series>, name: &str, color: Color32) -> &'a mut Series {
    let idx = match series.iter().position(|s| s.name == name) {
        Some(idx) => idx,
        None => {
            series.push(Series::new(name, color));
            series.len() - 1
        }
    };
    &mut series[idx]
}

/// How the x axis is labelled.
#[derive(Clone)]
pub enum XAxis {
    Years,
    /// Integer positions mapped to category names.
    Categories(Vec<String>),
}

fn base_plot(id: &str, x_axis: &XAxis, y_label: &str) -> Plot<'static> {
    let plot = Plot::new(id)
        .legend(Legend::default())
        .y_axis_label(y_label.to_string())
        .height(CHART_HEIGHT)
        .allow_scroll(false);
    match x_axis.clone() {
        XAxis::Years => plot
            .x_axis_label("Year")
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value)),
        XAxis::Categories(names) => plot.x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        }),
    }
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

pub fn line_chart(ui: &mut Ui, id: &str, y_label: &str, series: &[Series]) {
    base_plot(id, &XAxis::Years, y_label).show(ui, |plot_ui| {
        for s in series {
            let points: PlotPoints = s.points.iter().copied().collect();
            plot_ui.line(Line::new(points).name(&s.name).color(s.color).width(2.0));
            plot_ui.points(
                Points::new(s.points.clone())
                    .name(&s.name)
                    .color(s.color)
                    .radius(3.0),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Grouped bars side by side, or stacked bars when `stacked` is set.
/// Stacking pairs bars by position, so every stacked series gets a bar at
/// every x, zero where it has no point.
pub fn bar_chart(ui: &mut Ui, id: &str, x_axis: XAxis, y_label: &str, series: &[Series], stacked: bool) {
    let n = series.len().max(1) as f64;
    let width = if stacked { 0.7 } else { 0.8 / n };

    let mut xs: Vec<f64> = series.iter().flat_map(|s| s.points.iter().map(|p| p[0])).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();

    base_plot(id, &x_axis, y_label).show(ui, |plot_ui| {
        let mut charts: Vec<BarChart> = Vec::with_capacity(series.len());
        for (i, s) in series.iter().enumerate() {
            let offset = if stacked {
                0.0
            } else {
                (i as f64 - (n - 1.0) / 2.0) * width
            };
            let bars: Vec<Bar> = if stacked {
                xs.iter()
                    .map(|&x| {
                        let h = s.points.iter().find(|p| p[0] == x).map_or(0.0, |p| p[1]);
                        Bar::new(x, h).width(width)
                    })
                    .collect()
            } else {
                s.points
                    .iter()
                    .map(|&[x, h]| Bar::new(x + offset, h).width(width))
                    .collect()
            };
            let mut chart = BarChart::new(bars).name(&s.name).color(s.color);
            if stacked {
                let below: Vec<&BarChart> = charts.iter().collect();
                chart = chart.stack_on(&below);
            }
            charts.push(chart);
        }
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}
