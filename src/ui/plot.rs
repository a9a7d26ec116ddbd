use eframe::egui::{Color32, Ui};
use egui_plot::{HLine, Line, LineStyle, Plot, PlotBounds, PlotPoints, VLine};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// J-V plot (central panel)
// ---------------------------------------------------------------------------

/// Render every analyzed curve with the mode's reference lines.
pub fn iv_plot(ui: &mut Ui, state: &mut AppState) {
    if state.report.analyses.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open measurement files to plot I-V curves  (File → Open files…)");
        });
        return;
    }

    let mode = state.config.mode;
    let bounds = state.config.plot;
    let reset = std::mem::take(&mut state.reset_plot_view);
    let analyses = &state.report.analyses;
    let colors = &state.colors;

    Plot::new("iv_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Voltage (V)")
        .y_axis_label(mode.current_axis_label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if reset {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [bounds.x_min, bounds.y_min],
                    [bounds.x_max, bounds.y_max],
                ));
            }

            for (i, analysis) in analyses.iter().enumerate() {
                let m = &analysis.measurement;
                let points: PlotPoints = m
                    .voltage
                    .iter()
                    .zip(&m.current_ma_cm2)
                    .map(|(&v, &j)| [v, j])
                    .collect();

                plot_ui.line(
                    Line::new(points)
                        .name(&m.name)
                        .color(colors.color_for(i))
                        .width(1.5),
                );
            }

            let reference = HLine::new(mode.reference_current());
            plot_ui.hline(if mode.is_dark() {
                reference
                    .name("Threshold")
                    .color(Color32::RED)
                    .style(LineStyle::dotted_dense())
            } else {
                reference.color(Color32::GRAY).width(1.0)
            });
            plot_ui.vline(VLine::new(0.0).color(Color32::GRAY).width(1.0));
        });
}
