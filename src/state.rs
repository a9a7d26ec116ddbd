use crate::analysis::batch::{analyze_batch, BatchReport};
use crate::analysis::metrics::MeasurementMode;
use crate::color::SeriesColors;
use crate::config::{AnalysisConfig, DEFAULT_DARK_THRESHOLD};
use crate::data::loader::SourceFile;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Parameters currently applied to the batch.
    pub config: AnalysisConfig,

    /// Last dark threshold entered, kept while light mode is selected.
    pub dark_threshold: f64,

    /// Loaded files in the order they were added.
    pub sources: Vec<SourceFile>,

    /// Analysis of `sources` under `config` (cached).
    pub report: BatchReport,

    /// One colour per successfully analyzed file.
    pub colors: SeriesColors,

    /// Why the current parameters were rejected, if they were.
    pub config_error: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Snap the plot back to `config.plot` on the next frame.
    pub reset_plot_view: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
            dark_threshold: DEFAULT_DARK_THRESHOLD,
            sources: Vec::new(),
            report: BatchReport::default(),
            colors: SeriesColors::default(),
            config_error: None,
            status_message: None,
            reset_plot_view: true,
        }
    }
}

impl AppState {
    /// Add files to the batch. A file with the same name as an already loaded
    /// one replaces it in place.
    pub fn add_sources(&mut self, files: Vec<SourceFile>) {
        for file in files {
            match self.sources.iter_mut().find(|s| s.name == file.name) {
                Some(existing) => *existing = file,
                None => self.sources.push(file),
            }
        }
        self.reanalyze();
    }

    /// Drop every loaded file.
    pub fn clear(&mut self) {
        self.sources.clear();
        self.report = BatchReport::default();
        self.colors = SeriesColors::default();
        self.status_message = None;
    }

    /// Apply parameters coming from the form. Re-runs the batch only when
    /// something actually changed.
    pub fn apply_config(&mut self, config: AnalysisConfig) {
        if config == self.config {
            return;
        }
        if config.plot != self.config.plot {
            self.reset_plot_view = true;
        }
        if let MeasurementMode::Dark { threshold_ma_cm2 } = config.mode {
            self.dark_threshold = threshold_ma_cm2;
        }
        self.config = config;
        self.reanalyze();
    }

    /// Analyze all loaded files from scratch under the current config.
    pub fn reanalyze(&mut self) {
        if let Err(e) = self.config.validate() {
            log::warn!("Invalid parameters: {e}");
            self.config_error = Some(e.to_string());
            self.report = BatchReport::default();
            self.colors = SeriesColors::default();
            return;
        }
        self.config_error = None;
        self.report = analyze_batch(&self.sources, &self.config);
        self.colors = SeriesColors::new(self.report.analyses.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> SourceFile {
        SourceFile::new(name, "I V\n0.00001 0.3\n0.00003 0.5\n")
    }

    #[test]
    fn adding_files_analyzes_them_in_order() {
        let mut state = AppState::default();
        state.add_sources(vec![file("b.txt"), file("a.txt")]);
        let names: Vec<&str> = state
            .report
            .analyses
            .iter()
            .map(|a| a.measurement.name.as_str())
            .collect();
        assert_eq!(names, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn re_adding_a_file_replaces_it() {
        let mut state = AppState::default();
        state.add_sources(vec![file("a.txt"), file("b.txt")]);
        state.add_sources(vec![SourceFile::new("a.txt", "")]);
        assert_eq!(state.sources.len(), 2);
        assert_eq!(state.report.analyses.len(), 1);
        assert_eq!(state.report.errors[0].name, "a.txt");
    }

    #[test]
    fn invalid_config_clears_results() {
        let mut state = AppState::default();
        state.add_sources(vec![file("a.txt")]);

        let mut cfg = state.config;
        cfg.params.area_cm2 = 0.0;
        state.apply_config(cfg);

        assert!(state.config_error.is_some());
        assert!(state.report.is_empty());
    }

    #[test]
    fn mode_change_reruns_and_remembers_threshold() {
        let mut state = AppState::default();
        state.add_sources(vec![file("a.txt")]);
        state.apply_config(state.config.with_dark(true, 0.2));
        assert_eq!(state.dark_threshold, 0.2);

        state.apply_config(state.config.with_dark(false, state.dark_threshold));
        assert_eq!(state.report.analyses[0].metrics.mode, MeasurementMode::Light);
        assert_eq!(state.dark_threshold, 0.2);
    }

    #[test]
    fn plot_bounds_change_requests_view_reset() {
        let mut state = AppState::default();
        state.reset_plot_view = false;
        let mut cfg = state.config;
        cfg.plot.y_max = 40.0;
        state.apply_config(cfg);
        assert!(state.reset_plot_view);
    }
}
