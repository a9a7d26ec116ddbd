use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Results table (bottom panel)
// ---------------------------------------------------------------------------

pub fn results_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Results");

    for err in &state.report.errors {
        ui.label(RichText::new(format!("Error in {err}")).color(Color32::RED));
    }
    if state.report.analyses.is_empty() {
        ui.label("No files analyzed yet.");
        return;
    }

    let titles = [
        "File".to_string(),
        state.config.mode.voltage_label(),
        "Jsc (mA/cm²)".to_string(),
        "FF (%)".to_string(),
        "Eta (%)".to_string(),
    ];

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(180.0))
        .columns(Column::auto().at_least(110.0), titles.len() - 1)
        .header(20.0, |mut header| {
            for title in &titles {
                header.col(|ui: &mut Ui| {
                    ui.strong(title.as_str());
                });
            }
        })
        .body(|mut body| {
            for (i, analysis) in state.report.analyses.iter().enumerate() {
                let m = analysis.metrics.rounded();
                let color = state.colors.color_for(i);
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(&m.source_name).color(color));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_metric(Some(m.voc_or_turn_on), 4));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_metric(m.jsc_ma_cm2, 4));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_metric(m.fill_factor_pct, 2));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_metric(m.efficiency_pct, 2));
                    });
                });
            }
        });
}

/// Fixed-decimal cell text, `N/A` for metrics that do not apply.
pub fn format_metric(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_present_and_absent_metrics() {
        assert_eq!(format_metric(Some(0.41), 4), "0.4100");
        assert_eq!(format_metric(Some(74.126), 2), "74.13");
        assert_eq!(format_metric(None, 2), "N/A");
    }
}
