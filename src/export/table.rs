use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::batch::{BatchReport, FileAnalysis};
use crate::config::AnalysisConfig;

// ---------------------------------------------------------------------------
// Flat results rows (CSV / JSON)
// ---------------------------------------------------------------------------

/// One rounded results row. Metrics that do not apply serialize as an empty
/// CSV cell or JSON `null`.
#[derive(Debug, Serialize, PartialEq)]
pub struct ResultRow {
    pub file: String,
    pub voltage_v: f64,
    pub jsc_ma_cm2: Option<f64>,
    pub fill_factor_pct: Option<f64>,
    pub efficiency_pct: Option<f64>,
}

impl From<&FileAnalysis> for ResultRow {
    fn from(analysis: &FileAnalysis) -> Self {
        let m = analysis.metrics.rounded();
        ResultRow {
            file: m.source_name,
            voltage_v: m.voc_or_turn_on,
            jsc_ma_cm2: m.jsc_ma_cm2,
            fill_factor_pct: m.fill_factor_pct,
            efficiency_pct: m.efficiency_pct,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorRow {
    file: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    config: &'a AnalysisConfig,
    results: Vec<ResultRow>,
    errors: Vec<ErrorRow>,
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

pub fn results_csv(analyses: &[FileAnalysis]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for analysis in analyses {
        writer
            .serialize(ResultRow::from(analysis))
            .with_context(|| format!("writing CSV row for {}", analysis.metrics.source_name))?;
    }
    writer.into_inner().context("flushing CSV")
}

/// Results, per-file errors and the configuration that produced them.
pub fn results_json(report: &BatchReport, config: &AnalysisConfig) -> Result<Vec<u8>> {
    let doc = JsonReport {
        config,
        results: report.analyses.iter().map(ResultRow::from).collect(),
        errors: report
            .errors
            .iter()
            .map(|e| ErrorRow {
                file: e.name.clone(),
                message: e.source.to_string(),
            })
            .collect(),
    };
    serde_json::to_vec_pretty(&doc).context("serializing JSON report")
}

pub fn save(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::batch::analyze_batch;
    use crate::data::loader::SourceFile;

    fn dark_report() -> (BatchReport, AnalysisConfig) {
        let mut cfg = AnalysisConfig::default().with_dark(true, 0.06);
        cfg.params.area_cm2 = 2.0;
        let sources = vec![
            SourceFile::new("a.txt", "I V\n0.00004 0.38\n0.00020 0.42\n"),
            SourceFile::new("bad.txt", "I V\n"),
        ];
        (analyze_batch(&sources, &cfg), cfg)
    }

    #[test]
    fn csv_has_header_and_empty_cells_for_dark_metrics() {
        let (report, _) = dark_report();
        let text = String::from_utf8(results_csv(&report.analyses).unwrap()).unwrap();
        assert_eq!(
            text,
            "file,voltage_v,jsc_ma_cm2,fill_factor_pct,efficiency_pct\na.txt,0.4,,,\n"
        );
    }

    #[test]
    fn json_carries_config_results_and_errors() {
        let (report, cfg) = dark_report();
        let bytes = results_json(&report, &cfg).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(doc["config"]["mode"]["kind"], "dark");
        assert_eq!(doc["results"][0]["file"], "a.txt");
        assert!(doc["results"][0]["jsc_ma_cm2"].is_null());
        assert_eq!(doc["errors"][0]["file"], "bad.txt");
    }
}
