use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thousands::Separable;

use crate::error::ReportError;
use crate::perf::Measurements;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryRow {
    pub thread_count: u32,
    pub parallel_time_ns: u64,
    pub acceleration: f64,
    pub speedup: f64,
}

pub fn rows(measurements: &Measurements, speedup: &[f64]) -> Vec<SummaryRow> {
    measurements
        .iter()
        .zip(speedup)
        .map(|(record, &speedup)| SummaryRow {
            thread_count: record.thread_count,
            parallel_time_ns: record.parallel_time,
            acceleration: record.acceleration,
            speedup,
        })
        .collect()
}

/// Prints an aligned table of the rows.
pub fn write_table<W: Write>(out: &mut W, rows: &[SummaryRow]) -> std::io::Result<()> {
    writeln!(out, "{:>7} {:>18} {:>12} {:>9}", "threads", "time (ns)", "measured", "speed-up")?;
    for row in rows {
        writeln!(
            out,
            "{:>7} {:>18} {:>12.3} {:>9.3}",
            row.thread_count,
            row.parallel_time_ns.separate_with_commas(),
            row.acceleration,
            row.speedup
        )?;
    }
    Ok(())
}

pub fn write_csv(path: &Path, rows: &[SummaryRow]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| ReportError::io(path, e))?;

    tracing::info!(path = %path.display(), rows = rows.len(), "csv written");
    Ok(())
}
