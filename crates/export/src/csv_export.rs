//! CSV encoding, file naming, and read-back.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use gyrolog_common::error::{GyrologError, GyrologResult};
use gyrolog_sensor_model::sample::MotionSample;

/// Column names, in order.
pub const CSV_HEADER: [&str; 7] = [
    "Timestamp_ms",
    "Gyro_Alpha",
    "Gyro_Beta",
    "Gyro_Gamma",
    "Accel_X",
    "Accel_Y",
    "Accel_Z",
];

/// Prefix of every export file name.
pub const FILE_PREFIX: &str = "gyro_data_";

/// A finished CSV export ready to be handed to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    /// `gyro_data_<token>.csv`
    pub file_name: String,

    /// UTF-8 CSV content without a trailing newline.
    pub bytes: Vec<u8>,

    /// Number of data rows (excluding the header).
    pub rows: usize,
}

/// Build the export for a stopped recording.
///
/// Returns `Ok(None)` for an empty recording: no artifact is produced.
/// `token` is the recording-start Unix time in milliseconds.
pub fn export_csv(samples: &[MotionSample], token: i64) -> GyrologResult<Option<CsvExport>> {
    let Some(bytes) = encode_csv(samples)? else {
        tracing::debug!("Export skipped: recording is empty");
        return Ok(None);
    };
    Ok(Some(CsvExport {
        file_name: file_name_for(token),
        bytes,
        rows: samples.len(),
    }))
}

/// Encode samples as CSV. Returns `Ok(None)` when `samples` is empty.
pub fn encode_csv(samples: &[MotionSample]) -> GyrologResult<Option<Vec<u8>>> {
    if samples.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::with_capacity(64 * (samples.len() + 1)));

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| GyrologError::export(format!("Failed to write CSV header: {e}")))?;

    for sample in samples {
        let mut row = Vec::with_capacity(CSV_HEADER.len());
        row.push(sample.timestamp_ms.to_string());
        row.extend(sample.channels().into_iter().map(format_channel));
        writer
            .write_record(&row)
            .map_err(|e| GyrologError::export(format!("Failed to write CSV row: {e}")))?;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|e| GyrologError::export(format!("Failed to finish CSV: {e}")))?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(Some(bytes))
}

/// Format a channel value with exactly four decimals.
pub fn format_channel(value: f64) -> String {
    // -0.0 would otherwise print as "-0.0000"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.4}")
}

/// Export file name for a recording-start token.
pub fn file_name_for(token: i64) -> String {
    format!("{FILE_PREFIX}{token}.csv")
}

impl CsvExport {
    /// CSV content as text.
    pub fn as_str(&self) -> &str {
        // encode_csv only ever writes ASCII
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    /// Write the export into `dir`, never overwriting an existing file.
    ///
    /// If `file_name` is taken, `_1`, `_2`, … is appended before `.csv`.
    /// Returns the path actually written.
    pub fn save_to(&self, dir: &Path) -> GyrologResult<PathBuf> {
        std::fs::create_dir_all(dir)?;

        let stem = self
            .file_name
            .strip_suffix(".csv")
            .unwrap_or(&self.file_name);

        let mut counter = 0u32;
        loop {
            let name = if counter == 0 {
                format!("{stem}.csv")
            } else {
                format!("{stem}_{counter}.csv")
            };
            let path = dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(&self.bytes)?;
                    file.flush()?;
                    tracing::info!(path = %path.display(), rows = self.rows, "CSV export written");
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    counter += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Parse a CSV export back into samples.
///
/// The header must match [`CSV_HEADER`] exactly.
pub fn read_csv(reader: impl Read) -> GyrologResult<Vec<MotionSample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| GyrologError::export(format!("Failed to read CSV header: {e}")))?;
    if headers.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(GyrologError::export(format!(
            "Unexpected CSV header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut samples = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let record =
            record.map_err(|e| GyrologError::export(format!("Line {line}: {e}")))?;
        samples.push(parse_row(&record, line)?);
    }
    Ok(samples)
}

/// Parse an export file from disk.
pub fn read_csv_file(path: &Path) -> GyrologResult<Vec<MotionSample>> {
    let file = std::fs::File::open(path)?;
    read_csv(std::io::BufReader::new(file))
}

fn parse_row(record: &csv::StringRecord, line: usize) -> GyrologResult<MotionSample> {
    if record.len() != CSV_HEADER.len() {
        return Err(GyrologError::export(format!(
            "Line {line}: expected {} fields, found {}",
            CSV_HEADER.len(),
            record.len()
        )));
    }

    let timestamp_ms = record[0].trim().parse::<u64>().map_err(|e| {
        GyrologError::export(format!("Line {line}: invalid timestamp {:?}: {e}", &record[0]))
    })?;

    let mut channels = [0.0f64; 6];
    for (slot, field) in channels.iter_mut().zip(record.iter().skip(1)) {
        *slot = field.trim().parse::<f64>().map_err(|e| {
            GyrologError::export(format!("Line {line}: invalid value {field:?}: {e}"))
        })?;
    }

    Ok(MotionSample {
        timestamp_ms,
        gyro_alpha: channels[0],
        gyro_beta: channels[1],
        gyro_gamma: channels[2],
        accel_x: channels[3],
        accel_y: channels[4],
        accel_z: channels[5],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp_ms: u64, gyro_alpha: f64) -> MotionSample {
        MotionSample {
            timestamp_ms,
            gyro_alpha,
            gyro_beta: 0.0,
            gyro_gamma: -1.5,
            accel_x: 0.1,
            accel_y: 0.2,
            accel_z: 9.81,
        }
    }

    #[test]
    fn test_empty_buffer_produces_nothing() {
        assert_eq!(encode_csv(&[]).unwrap(), None);
        assert_eq!(export_csv(&[], 1_700_000_000_000).unwrap(), None);
    }

    #[test]
    fn test_single_sample_rounds_to_four_decimals() {
        let bytes = encode_csv(&[sample(0, 1.23456)]).unwrap().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Timestamp_ms,Gyro_Alpha,Gyro_Beta,Gyro_Gamma,Accel_X,Accel_Y,Accel_Z"
        );
        assert_eq!(lines[1], "0,1.2346,0.0000,-1.5000,0.1000,0.2000,9.8100");
    }

    #[test]
    fn test_rows_keep_insertion_order_without_trailing_newline() {
        let samples = [sample(0, 1.0), sample(16, 2.0), sample(33, 3.0)];
        let export = export_csv(&samples, 42).unwrap().unwrap();
        assert_eq!(export.rows, 3);
        assert!(!export.as_str().ends_with('\n'));

        let stamps: Vec<&str> = export
            .as_str()
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(stamps, vec!["0", "16", "33"]);
    }

    #[test]
    fn test_negative_zero_written_as_zero() {
        assert_eq!(format_channel(-0.0), "0.0000");
        assert_eq!(format_channel(-2.5), "-2.5000");
    }

    #[test]
    fn test_file_name_pattern() {
        assert_eq!(file_name_for(1_700_000_123_456), "gyro_data_1700000123456.csv");
        let export = export_csv(&[sample(0, 0.0)], 7).unwrap().unwrap();
        assert_eq!(export.file_name, "gyro_data_7.csv");
    }

    #[test]
    fn test_read_back_export() {
        let samples = [sample(0, 1.23456), sample(20, -4.0)];
        let export = export_csv(&samples, 1).unwrap().unwrap();
        let parsed = read_csv(export.bytes.as_slice()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].timestamp_ms, 0);
        assert!((parsed[0].gyro_alpha - 1.2346).abs() < 1e-12);
        assert_eq!(parsed[1].timestamp_ms, 20);
        assert!((parsed[1].accel_z - 9.81).abs() < 1e-12);
    }

    #[test]
    fn test_read_rejects_foreign_header() {
        let err = read_csv("a,b,c\n1,2,3".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Unexpected CSV header"));
    }

    #[test]
    fn test_read_rejects_bad_value() {
        let raw = "Timestamp_ms,Gyro_Alpha,Gyro_Beta,Gyro_Gamma,Accel_X,Accel_Y,Accel_Z\n0,x,0,0,0,0,0";
        let err = read_csv(raw.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 2"));
    }
}
