use std::path::Path;

use thiserror::Error;

use super::model::RawMeasurement;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("no numeric (current, voltage) rows after the header")]
    NoData,
}

// ---------------------------------------------------------------------------
// Source buffers
// ---------------------------------------------------------------------------

/// A measurement file already read into memory.
///
/// Kept around by the app so the whole batch can be re-analyzed whenever a
/// parameter changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// File name without directory, used as the series label.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk.
    pub fn read(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    pub fn parse(&self) -> Result<RawMeasurement, LoadError> {
        parse_measurement(&self.name, &String::from_utf8_lossy(&self.bytes))
    }
}

// ---------------------------------------------------------------------------
// Text parser
// ---------------------------------------------------------------------------

/// Parse an instrument export.
///
/// Layout: one header line, then whitespace-separated rows of
/// `current voltage`. Either `,` or `.` may be the decimal separator. Rows
/// that do not hold exactly two finite numbers are dropped.
pub fn parse_measurement(name: &str, text: &str) -> Result<RawMeasurement, LoadError> {
    let mut current = Vec::new();
    let mut voltage = Vec::new();
    let mut dropped = 0usize;

    for line in text.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        match parse_pair(&fields) {
            Some((i, v)) => {
                current.push(i);
                voltage.push(v);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!("{name}: dropped {dropped} malformed row(s)");
    }
    if current.is_empty() {
        return Err(LoadError::NoData);
    }

    Ok(RawMeasurement {
        name: name.to_string(),
        current,
        voltage,
    })
}

fn parse_pair(fields: &[&str]) -> Option<(f64, f64)> {
    match fields {
        [a, b] => Some((parse_number(a)?, parse_number(b)?)),
        _ => None,
    }
}

/// Parse a decimal number written with either `.` or `,`.
fn parse_number(token: &str) -> Option<f64> {
    token
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_after_header() {
        let text = "I(A)\tV(V)\n-1.5E-3\t0.00\n-1.2E-3\t0.10\n";
        let m = parse_measurement("a.txt", text).unwrap();
        assert_eq!(m.name, "a.txt");
        assert_eq!(m.current, vec![-1.5e-3, -1.2e-3]);
        assert_eq!(m.voltage, vec![0.0, 0.1]);
    }

    #[test]
    fn accepts_comma_decimals() {
        let text = "header\n-0,5   0,25\n";
        let m = parse_measurement("b.txt", text).unwrap();
        assert_eq!(m.current, vec![-0.5]);
        assert_eq!(m.voltage, vec![0.25]);
    }

    #[test]
    fn drops_malformed_rows() {
        let text = "\
Current Voltage
1.0 0.1

2.0
3.0 0.3 9.9
abc 0.4
nan 0.5
5.0 0.6
";
        let m = parse_measurement("c.txt", text).unwrap();
        assert_eq!(m.current, vec![1.0, 5.0]);
        assert_eq!(m.voltage, vec![0.1, 0.6]);
    }

    #[test]
    fn first_line_is_always_skipped() {
        let m = parse_measurement("d.txt", "1.0 2.0\n3.0 4.0\n").unwrap();
        assert_eq!(m.current, vec![3.0]);
    }

    #[test]
    fn header_only_file_has_no_data() {
        assert!(matches!(
            parse_measurement("e.txt", "I V\n"),
            Err(LoadError::NoData)
        ));
        assert!(matches!(parse_measurement("f.txt", ""), Err(LoadError::NoData)));
    }

    #[test]
    fn source_file_decodes_lossily() {
        let mut bytes = b"Corriente (\xb5A) V\n".to_vec();
        bytes.extend_from_slice(b"1.0 0.5\n");
        let m = SourceFile::new("g.txt", bytes).parse().unwrap();
        assert_eq!(m.voltage, vec![0.5]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SourceFile::read(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
