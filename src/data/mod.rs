/// Data layer: source buffers, parsing, and normalized measurements.
///
/// Architecture:
/// ```text
///  .txt  (header + "current voltage" rows)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  SourceFile → RawMeasurement (file order)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  Measurement  │  polarity · I / area, mA/cm², sorted by V
///   └──────────────┘
///        │
///        ▼
///      Curve        sorted (x, y) view handed to the analysis layer
/// ```

pub mod loader;
pub mod model;
