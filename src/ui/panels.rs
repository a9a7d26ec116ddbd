use std::path::PathBuf;

use anyhow::Result;
use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::loader::SourceFile;
use crate::export::{table, xlsx};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – parameter form and file list
// ---------------------------------------------------------------------------

/// Render the parameter form. Edits are applied to the state at the end of the
/// frame, which re-runs the analysis if anything changed.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let mut cfg = state.config;
    let mut dark = cfg.mode.is_dark();
    let mut threshold = state.dark_threshold;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("1. Measurement");
            ui.checkbox(&mut dark, "Dark measurement");
            if dark {
                ui.label("Turn-on current (mA/cm²)")
                    .on_hover_text("The turn-on voltage is interpolated where the current crosses this value.");
                ui.add(DragValue::new(&mut threshold).speed(0.01).fixed_decimals(3));
            }
            ui.separator();

            ui.heading("2. Physical parameters");
            egui::Grid::new("physical_params")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Area (cm²)");
                    ui.add(DragValue::new(&mut cfg.params.area_cm2).speed(0.001).fixed_decimals(3));
                    ui.end_row();

                    ui.label("Power (W/cm²)");
                    ui.add(
                        DragValue::new(&mut cfg.params.incident_power_w_cm2)
                            .speed(0.01)
                            .fixed_decimals(3),
                    );
                    ui.end_row();
                });
            ui.separator();

            ui.heading("3. Plot limits");
            egui::Grid::new("plot_limits")
                .num_columns(4)
                .show(ui, |ui: &mut Ui| {
                    ui.label("X min");
                    ui.add(DragValue::new(&mut cfg.plot.x_min).speed(0.05));
                    ui.label("X max");
                    ui.add(DragValue::new(&mut cfg.plot.x_max).speed(0.05));
                    ui.end_row();

                    ui.label("Y min");
                    ui.add(DragValue::new(&mut cfg.plot.y_min).speed(0.5));
                    ui.label("Y max");
                    ui.add(DragValue::new(&mut cfg.plot.y_max).speed(0.5));
                    ui.end_row();
                });
            if ui.small_button("Reset view").clicked() {
                state.reset_plot_view = true;
            }

            if let Some(err) = &state.config_error {
                ui.label(RichText::new(err).color(Color32::RED));
            }
            ui.separator();

            file_list(ui, state);
        });

    state.apply_config(cfg.with_dark(dark, threshold));
}

fn file_list(ui: &mut Ui, state: &AppState) {
    ui.heading(format!("Files ({})", state.sources.len()));
    if state.sources.is_empty() {
        ui.label("No files loaded.");
        return;
    }

    for (i, analysis) in state.report.analyses.iter().enumerate() {
        ui.label(RichText::new(&analysis.measurement.name).color(state.colors.color_for(i)));
    }
    for err in &state.report.errors {
        ui.label(RichText::new(&err.name).color(Color32::RED).strikethrough())
            .on_hover_text(err.source.to_string());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open files…").clicked() {
                open_files_dialog(state);
                ui.close_menu();
            }

            let has_results = !state.report.analyses.is_empty();
            ui.separator();
            if ui
                .add_enabled(has_results, egui::Button::new("Export Excel…"))
                .clicked()
            {
                export_dialog(state, ExportKind::Excel);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_results, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_dialog(state, ExportKind::Csv);
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.report.is_empty(), egui::Button::new("Export JSON…"))
                .clicked()
            {
                export_dialog(state, ExportKind::Json);
                ui.close_menu();
            }

            ui.separator();
            if ui.button("Clear").clicked() {
                state.clear();
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.sources.is_empty() {
            ui.label(format!(
                "{} file(s) loaded, {} analyzed",
                state.sources.len(),
                state.report.analyses.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_files_dialog(state: &mut AppState) {
    let Some(paths) = rfd::FileDialog::new()
        .set_title("Open I-V measurements")
        .add_filter("Measurement text", &["txt"])
        .pick_files()
    else {
        return;
    };

    let mut loaded = Vec::with_capacity(paths.len());
    let mut failed = Vec::new();
    for path in &paths {
        match SourceFile::read(path) {
            Ok(file) => loaded.push(file),
            Err(e) => {
                log::error!("Failed to read {}: {e}", path.display());
                failed.push(format!("{}: {e}", path.display()));
            }
        }
    }

    log::info!("Loaded {} file(s)", loaded.len());
    state.status_message = if failed.is_empty() {
        None
    } else {
        Some(format!("Error: {}", failed.join("; ")))
    };
    state.add_sources(loaded);
}

#[derive(Debug, Clone, Copy)]
enum ExportKind {
    Excel,
    Csv,
    Json,
}

impl ExportKind {
    fn extension(self) -> &'static str {
        match self {
            ExportKind::Excel => "xlsx",
            ExportKind::Csv => "csv",
            ExportKind::Json => "json",
        }
    }

    fn default_file_name(self) -> String {
        match self {
            ExportKind::Excel => xlsx::DEFAULT_FILE_NAME.to_string(),
            other => format!("solar_results.{}", other.extension()),
        }
    }
}

fn export_dialog(state: &mut AppState, kind: ExportKind) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export results")
        .set_file_name(kind.default_file_name())
        .add_filter(kind.extension(), &[kind.extension()])
        .save_file()
    else {
        return;
    };

    match export(state, kind, path) {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn export(state: &AppState, kind: ExportKind, path: PathBuf) -> Result<()> {
    let analyses = &state.report.analyses;
    match kind {
        ExportKind::Excel => xlsx::save_report(&path, analyses, &state.config.mode),
        ExportKind::Csv => table::save(&path, &table::results_csv(analyses)?),
        ExportKind::Json => table::save(&path, &table::results_json(&state.report, &state.config)?),
    }
}
