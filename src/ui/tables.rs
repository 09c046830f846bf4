use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use ncat_dashboard::data::Measure;

// ---------------------------------------------------------------------------
// Cell formatting
// ---------------------------------------------------------------------------

/// Count with thousands separators; absent counts read "n/a".
pub fn fmt_count(v: Option<u64>) -> String {
    match v {
        Some(v) => with_commas(v),
        None => "n/a".to_string(),
    }
}

pub fn fmt_opt(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(v) if decimals == 0 && v.abs() < u64::MAX as f64 => {
            let rounded = with_commas(v.abs().round() as u64);
            if v < -0.5 {
                format!("-{rounded}")
            } else {
                rounded
            }
        }
        Some(v) => format!("{v:.decimals$}"),
        None => "n/a".to_string(),
    }
}

pub fn fmt_measure(m: Measure, decimals: usize) -> String {
    format!("{m:.decimals$}")
}

pub fn fmt_pct(m: Measure) -> String {
    match m {
        Measure::Value(v) => format!("{v:.1}%"),
        other => other.to_string(),
    }
}

fn with_commas(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Table widget
// ---------------------------------------------------------------------------

/// A striped, non-scrolling table of pre-formatted cells.
pub fn data_table(ui: &mut Ui, id: &str, headers: &[&str], rows: &[Vec<String>]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().at_least(70.0), headers.len())
            .header(20.0, |mut header| {
                for h in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|mut body| {
                for row in rows {
                    body.row(18.0, |mut cells| {
                        for cell in row {
                            cells.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}
