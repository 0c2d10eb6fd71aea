use std::path::Path;
use std::str::FromStr;

use crate::error::ReportError;
use crate::perf::{BenchmarkRecord, Measurements};

/// Reads a benchmark results file in full and parses it.
pub fn load(path: &Path) -> Result<Measurements, ReportError> {
    let text = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "read results file");
    parse(&text)
}

/// Parses `<threads> <time ns> <acceleration>` rows.
///
/// The first line is always treated as a header and dropped. Blank lines and
/// lines starting with `#` are skipped. Extra columns after the third are
/// ignored.
pub fn parse(text: &str) -> Result<Measurements, ReportError> {
    let mut measurements = Measurements::default();

    for (i, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let record = parse_record(i + 1, line)?;
        tracing::debug!(?record, "parsed");
        measurements.push(record);
    }

    if measurements.is_empty() {
        return Err(ReportError::NoRecords);
    }

    Ok(measurements)
}

fn parse_record(line_no: usize, line: &str) -> Result<BenchmarkRecord, ReportError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ReportError::Parse {
            line: line_no,
            content: line.to_string(),
            reason: format!("expected 3 columns, found {}", parts.len()),
        });
    }

    Ok(BenchmarkRecord {
        thread_count: column(line_no, line, "thread count", parts[0])?,
        parallel_time: column(line_no, line, "parallel time", parts[1])?,
        acceleration: column(line_no, line, "acceleration", parts[2])?,
    })
}

fn column<T>(line_no: usize, line: &str, name: &str, token: &str) -> Result<T, ReportError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    token.parse().map_err(|e| ReportError::Parse {
        line: line_no,
        content: line.to_string(),
        reason: format!("invalid {} {:?}: {}", name, token, e),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = "# ncpu temps acceleration\n1 1000 1.0\n2 520 1.9\n4 300 3.1\n";

    #[test]
    fn test_parse_basic() {
        let m = parse(SAMPLE).unwrap();

        assert_eq!(m.thread_counts, vec![1, 2, 4]);
        assert_eq!(m.parallel_times, vec![1000, 520, 300]);
        assert_eq!(m.accelerations, vec![1.0, 1.9, 3.1]);
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = "header\n\n1 1000 1.0\n# a comment\n   \n2 520 1.9\n#4 1 1\n\n4 300 3.1\n";
        let m = parse(text).unwrap();

        assert_eq!(m.len(), 3);
        assert_eq!(m.thread_counts, vec![1, 2, 4]);
    }

    #[test]
    fn test_parse_header_is_always_dropped() {
        // the first line goes even when it looks like data
        let m = parse("1 2000 1.0\n2 1000 2.0\n").unwrap();

        assert_eq!(m.thread_counts, vec![2]);
        assert_eq!(m.parallel_times, vec![1000]);
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let m = parse("h\n1 1000 1.0 extra\n").unwrap();
        assert_eq!(m.parallel_times, vec![1000]);
    }

    #[test]
    fn test_parse_crlf() {
        let m = parse("h\r\n1 1000 1.0\r\n2 500 2.0\r\n").unwrap();
        assert_eq!(m.accelerations, vec![1.0, 2.0]);
    }

    #[test]
    fn test_parse_header_only() {
        assert!(matches!(parse("# ncpu temps acceleration\n"), Err(ReportError::NoRecords)));
        assert!(matches!(parse(""), Err(ReportError::NoRecords)));
        assert!(matches!(parse("h\n\n# nothing\n"), Err(ReportError::NoRecords)));
    }

    #[test]
    fn test_parse_short_row() {
        match parse("h\n1 1000 1.0\n2 520\n") {
            Err(ReportError::Parse { line, content, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "2 520");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_numeric() {
        assert!(matches!(
            parse("h\nfour 1000 1.0\n"),
            Err(ReportError::Parse { line: 2, .. })
        ));
        // time is an integer column
        assert!(matches!(
            parse("h\n1 10.5 1.0\n"),
            Err(ReportError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse("h\n1 1000 fast\n"),
            Err(ReportError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let m = load(file.path()).unwrap();
        assert_eq!(m.thread_counts, vec![1, 2, 4]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench-random.dat");

        assert!(matches!(load(&path), Err(ReportError::Io { .. })));
    }
}
