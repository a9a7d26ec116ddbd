use thiserror::Error;

use super::metrics::{compute_metrics, MetricResult};
use crate::config::AnalysisConfig;
use crate::data::loader::{LoadError, SourceFile};
use crate::data::model::{CurveError, Measurement};

// ---------------------------------------------------------------------------
// Batch results
// ---------------------------------------------------------------------------

/// A successfully analyzed file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileAnalysis {
    pub measurement: Measurement,
    pub metrics: MetricResult,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// A file that could not be analyzed, and why.
#[derive(Debug, Error)]
#[error("{name}: {source}")]
pub struct FileError {
    pub name: String,
    #[source]
    pub source: AnalysisError,
}

/// Outcome of one pass over all loaded files. Both lists keep input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub analyses: Vec<FileAnalysis>,
    pub errors: Vec<FileError>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty() && self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

/// Analyze every source in order. A failing file is recorded and skipped; it
/// never stops the rest of the batch.
pub fn analyze_batch(sources: &[SourceFile], config: &AnalysisConfig) -> BatchReport {
    let mut report = BatchReport::default();

    for source in sources {
        match analyze_file(source, config) {
            Ok(analysis) => report.analyses.push(analysis),
            Err(e) => {
                log::warn!("Skipping {}: {e}", source.name);
                report.errors.push(FileError {
                    name: source.name.clone(),
                    source: e,
                });
            }
        }
    }

    log::info!(
        "Analyzed {} file(s), {} failed",
        report.analyses.len(),
        report.errors.len()
    );
    report
}

/// Parse, normalize and compute metrics for a single file.
pub fn analyze_file(
    source: &SourceFile,
    config: &AnalysisConfig,
) -> Result<FileAnalysis, AnalysisError> {
    let raw = source.parse()?;
    let measurement = Measurement::from_raw(&raw, &config.mode, &config.params);
    let metrics = compute_metrics(&measurement, &config.mode, &config.params)?;
    Ok(FileAnalysis {
        measurement,
        metrics,
    })
}
