use crate::error::ReportError;

/// One row of the results file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkRecord {
    pub thread_count: u32,
    /// Average parallel run time in nanoseconds.
    pub parallel_time: u64,
    /// Acceleration as measured by the benchmark itself. Not plotted.
    pub acceleration: f64,
}

/// Benchmark results as three index-aligned series, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurements {
    pub thread_counts: Vec<u32>,
    pub parallel_times: Vec<u64>,
    pub accelerations: Vec<f64>,
}

impl Measurements {
    pub fn push(&mut self, record: BenchmarkRecord) {
        self.thread_counts.push(record.thread_count);
        self.parallel_times.push(record.parallel_time);
        self.accelerations.push(record.acceleration);
    }

    pub fn len(&self) -> usize {
        self.thread_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thread_counts.is_empty()
    }

    pub fn record(&self, i: usize) -> Option<BenchmarkRecord> {
        Some(BenchmarkRecord {
            thread_count: *self.thread_counts.get(i)?,
            parallel_time: *self.parallel_times.get(i)?,
            acceleration: *self.accelerations.get(i)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = BenchmarkRecord> + '_ {
        (0..self.len()).filter_map(move |i| self.record(i))
    }

    /// Speed-up of every row relative to the first one, which is taken as the
    /// serial baseline: `parallel_time[0] / parallel_time[i]`.
    pub fn speedup(&self) -> Result<Vec<f64>, ReportError> {
        let serial_time = *self.parallel_times.first().ok_or(ReportError::NoRecords)?;

        self.parallel_times
            .iter()
            .enumerate()
            .map(|(index, &t)| {
                if t == 0 {
                    return Err(ReportError::ZeroTime { index });
                }
                Ok(serial_time as f64 / t as f64)
            })
            .collect()
    }
}

impl FromIterator<BenchmarkRecord> for Measurements {
    fn from_iter<I: IntoIterator<Item = BenchmarkRecord>>(iter: I) -> Self {
        let mut measurements = Measurements::default();
        for record in iter {
            measurements.push(record);
        }
        measurements
    }
}
