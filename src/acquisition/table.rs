//! `Sent,Recv` table parsing and writing

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::{RECV_COLUMN, SENT_COLUMN};
use crate::types::{SampleSeries, SeriesError};

// ============================================================================
// Column Mapping
// ============================================================================

/// Positions of the two required columns in the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    sent: usize,
    recv: usize,
    width: usize,
}

impl ColumnMap {
    /// Locate `Sent` and `Recv` by name. Matching is case-insensitive and
    /// tolerates surrounding whitespace or quotes; extra columns are ignored.
    /// A leading UTF-8 byte-order mark (spreadsheet exports) is dropped.
    fn from_header(header: &str) -> Result<Self, SeriesError> {
        let columns: Vec<String> = header
            .trim_start_matches('\u{feff}')
            .split(',')
            .map(|c| c.trim().trim_matches('"').to_lowercase())
            .collect();

        let find = |name: &'static str| {
            let wanted = name.to_lowercase();
            columns
                .iter()
                .position(|c| *c == wanted)
                .ok_or(SeriesError::MissingColumn(name))
        };

        let sent = find(SENT_COLUMN)?;
        let recv = find(RECV_COLUMN)?;
        Ok(Self {
            sent,
            recv,
            width: columns.len(),
        })
    }

    fn parse_row(&self, line: &str, line_num: usize) -> Result<(i64, i64), SeriesError> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < self.width {
            return Err(SeriesError::Parse {
                line: line_num,
                message: format!(
                    "expected {} fields, got {}",
                    self.width,
                    fields.len()
                ),
            });
        }
        let sent = parse_sample(fields[self.sent], SENT_COLUMN, line_num)?;
        let recv = parse_sample(fields[self.recv], RECV_COLUMN, line_num)?;
        Ok((sent, recv))
    }
}

fn parse_sample(field: &str, column: &str, line_num: usize) -> Result<i64, SeriesError> {
    let trimmed = field.trim().trim_matches('"');
    trimmed.parse::<i64>().map_err(|e| SeriesError::Parse {
        line: line_num,
        message: format!("invalid {} value '{}': {}", column, trimmed, e),
    })
}

// ============================================================================
// Reading
// ============================================================================

/// Read a `Sent,Recv` table from any buffered reader.
///
/// The header row is required. Blank lines are skipped; any other malformed
/// row rejects the whole table, since a silently shortened capture would skew
/// every feature derived from it.
pub fn read_table<R: BufRead>(
    reader: R,
    origin: &str,
    min_samples: usize,
) -> Result<SampleSeries, SeriesError> {
    let mut lines = reader.lines();

    let header = lines.next().ok_or(SeriesError::EmptyTable)??;
    let columns = ColumnMap::from_header(&header)?;

    let mut pairs = Vec::new();
    let mut line_num = 1usize;
    for line_result in lines {
        line_num += 1;
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }
        pairs.push(columns.parse_row(&line, line_num)?);
    }

    if pairs.len() < min_samples {
        return Err(SeriesError::InsufficientSamples {
            needed: min_samples,
            available: pairs.len(),
        });
    }

    let series = SampleSeries::from_pairs(pairs)?;
    tracing::debug!(origin = %origin, samples = series.len(), "Loaded sample table");
    Ok(series)
}

/// Open and read a `Sent,Recv` table from disk.
pub fn load_table(path: impl AsRef<Path>, min_samples: usize) -> Result<SampleSeries, SeriesError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SeriesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let series = read_table(BufReader::new(file), &path.display().to_string(), min_samples)?;
    tracing::info!(path = %path.display(), samples = series.len(), "Loaded capture table");
    Ok(series)
}

// ============================================================================
// Writing
// ============================================================================

/// Write a series as a `Sent,Recv` table with header.
pub fn write_table<W: Write>(writer: W, series: &SampleSeries) -> std::io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{},{}", SENT_COLUMN, RECV_COLUMN)?;
    for (sent, recv) in series.pairs() {
        writeln!(writer, "{},{}", sent, recv)?;
    }
    writer.flush()
}

/// Persist a series to disk, replacing any existing file.
pub fn save_table(path: impl AsRef<Path>, series: &SampleSeries) -> Result<(), SeriesError> {
    let path = path.as_ref();
    let to_io = |source| SeriesError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_io)?;
    write_table(file, series).map_err(to_io)?;
    tracing::info!(path = %path.display(), samples = series.len(), "Saved capture table");
    Ok(())
}

// ============================================================================
// Firmware Response Lines
// ============================================================================

/// Parse one `sent,recv` response line from the relay firmware.
///
/// Returns `None` for lines that are not a sample pair (boot banners,
/// partial reads, non-numeric noise). Callers drop those and keep reading.
pub fn parse_capture_line(line: &str) -> Option<(i64, i64)> {
    let (sent, recv) = line.trim().split_once(',')?;
    let sent = sent.trim().parse().ok()?;
    let recv = recv.trim().parse().ok()?;
    Some((sent, recv))
}

/// Collect sample pairs from a raw firmware log (no header required).
///
/// Lines that are not a `sent,recv` pair are skipped and counted; a stream
/// that yields fewer than `min_samples` pairs is refused.
pub fn read_capture_stream<R: BufRead>(
    reader: R,
    min_samples: usize,
) -> Result<SampleSeries, SeriesError> {
    let mut pairs = Vec::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        match parse_capture_line(&line?) {
            Some(pair) => pairs.push(pair),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Ignored non-sample lines in capture stream");
    }
    if pairs.len() < min_samples {
        return Err(SeriesError::InsufficientSamples {
            needed: min_samples,
            available: pairs.len(),
        });
    }
    SampleSeries::from_pairs(pairs)
}
