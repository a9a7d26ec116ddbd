use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{
    Chart, ChartFormat, ChartLine, ChartType, Format, Workbook, Worksheet, XlsxError,
};

use crate::analysis::batch::FileAnalysis;
use crate::analysis::metrics::MeasurementMode;

pub const RESULTS_SHEET: &str = "Results";
pub const RAW_DATA_SHEET: &str = "Raw Data";
pub const DEFAULT_FILE_NAME: &str = "solar_report.xlsx";

const NOT_APPLICABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Render the report into an in-memory `.xlsx` file.
pub fn write_report(analyses: &[FileAnalysis], mode: &MeasurementMode) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(analyses, mode).context("building workbook")?;
    workbook.save_to_buffer().context("serializing workbook")
}

/// Render the report and write it to `path`.
pub fn save_report(path: &Path, analyses: &[FileAnalysis], mode: &MeasurementMode) -> Result<()> {
    let bytes = write_report(analyses, mode)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote report for {} file(s) to {}", analyses.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Workbook layout
// ---------------------------------------------------------------------------

/// Two sheets:
/// * `Results`   – one row per file plus a scatter chart of every curve at G2
/// * `Raw Data`  – column pair (V, J) per file, in load order
fn build_workbook(analyses: &[FileAnalysis], mode: &MeasurementMode) -> Result<Workbook, XlsxError> {
    let mut results = results_sheet(analyses, mode)?;
    let raw = raw_data_sheet(analyses)?;

    if !analyses.is_empty() {
        let chart = iv_chart(analyses, mode);
        results.insert_chart(1, 6, &chart)?;
    }

    let mut workbook = Workbook::new();
    workbook.push_worksheet(results);
    workbook.push_worksheet(raw);
    Ok(workbook)
}

fn results_sheet(analyses: &[FileAnalysis], mode: &MeasurementMode) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(RESULTS_SHEET)?;

    let bold = Format::new().set_bold();
    let voltage_label = mode.voltage_label();
    let headers = [
        "File",
        voltage_label.as_str(),
        "Jsc (mA/cm²)",
        "FF (%)",
        "Eta (%)",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
        sheet.set_column_width(col as u16, 15)?;
    }

    for (i, analysis) in analyses.iter().enumerate() {
        let row = i as u32 + 1;
        let m = analysis.metrics.rounded();
        sheet.write_string(row, 0, &m.source_name)?;
        sheet.write_number(row, 1, m.voc_or_turn_on)?;
        for (col, value) in [(2, m.jsc_ma_cm2), (3, m.fill_factor_pct), (4, m.efficiency_pct)] {
            match value {
                Some(v) => sheet.write_number(row, col, v)?,
                None => sheet.write_string(row, col, NOT_APPLICABLE)?,
            };
        }
    }

    Ok(sheet)
}

fn raw_data_sheet(analyses: &[FileAnalysis]) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(RAW_DATA_SHEET)?;

    for (i, analysis) in analyses.iter().enumerate() {
        let (col_v, col_i) = series_columns(i);
        let m = &analysis.measurement;

        sheet.write_string(0, col_v, format!("V_{}", m.name))?;
        sheet.write_string(0, col_i, format!("I_{}", m.name))?;
        for (row, (v, j)) in m.voltage.iter().zip(&m.current_ma_cm2).enumerate() {
            sheet.write_number(row as u32 + 1, col_v, *v)?;
            sheet.write_number(row as u32 + 1, col_i, *j)?;
        }
    }

    Ok(sheet)
}

fn iv_chart(analyses: &[FileAnalysis], mode: &MeasurementMode) -> Chart {
    let mut chart = Chart::new(ChartType::ScatterSmooth);

    for (i, analysis) in analyses.iter().enumerate() {
        let (col_v, col_i) = series_columns(i);
        let last_row = analysis.measurement.len() as u32;
        chart
            .add_series()
            .set_name(analysis.measurement.name.as_str())
            .set_categories((RAW_DATA_SHEET, 1, col_v, last_row, col_v))
            .set_values((RAW_DATA_SHEET, 1, col_i, last_row, col_i))
            .set_format(ChartFormat::new().set_line(ChartLine::new().set_width(1.5)));
    }

    chart.title().set_name("I-V Curves");
    chart
        .x_axis()
        .set_name("Voltage (V)")
        .set_major_gridlines(true);
    chart
        .y_axis()
        .set_name(mode.current_axis_label())
        .set_major_gridlines(true);

    // Twice the default 480 x 288 size.
    chart.set_width(960).set_height(576);
    chart
}

/// Voltage / current column pair of the i-th file on the raw data sheet.
fn series_columns(index: usize) -> (u16, u16) {
    let col_v = (index * 2) as u16;
    (col_v, col_v + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metrics::MetricResult;
    use crate::data::model::Measurement;

    fn analysis(name: &str) -> FileAnalysis {
        FileAnalysis {
            measurement: Measurement {
                name: name.into(),
                voltage: vec![0.0, 0.3, 0.6],
                current_a_cm2: vec![0.02, 0.01, 0.0],
                current_ma_cm2: vec![20.0, 10.0, 0.0],
            },
            metrics: MetricResult {
                source_name: name.into(),
                mode: MeasurementMode::Light,
                voc_or_turn_on: 0.6,
                jsc_ma_cm2: Some(20.0),
                fill_factor_pct: Some(25.0),
                efficiency_pct: Some(3.0),
            },
        }
    }

    #[test]
    fn series_columns_are_paired_by_file_index() {
        assert_eq!(series_columns(0), (0, 1));
        assert_eq!(series_columns(3), (6, 7));
    }

    #[test]
    fn report_is_a_zip_container() {
        let bytes = write_report(
            &[analysis("a.txt"), analysis("b.txt")],
            &MeasurementMode::Light,
        )
        .unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_report_still_serializes() {
        let mode = MeasurementMode::Dark {
            threshold_ma_cm2: 0.1,
        };
        let bytes = write_report(&[], &mode).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
