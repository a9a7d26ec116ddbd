/// Analysis layer: crossing solver, photovoltaic figures of merit, and the
/// per-file batch loop.
///
/// ```text
///   SourceFile ─▶ loader ─▶ Measurement ─▶ metrics ─▶ MetricResult
///                                           │
///                                           ▼
///                                       crossing   (Voc, Jsc, turn-on)
/// ```
///
/// Everything here is pure: no UI state, no I/O beyond the in-memory buffers.

pub mod batch;
pub mod crossing;
pub mod metrics;
