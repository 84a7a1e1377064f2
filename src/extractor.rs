// Windowed single-column extraction from append-only statistics CSV files.
//
// Files can be large and are written to while we read them, so this is a single
// forward pass over the bytes: no line buffering, no whole-file reads, and the scan
// stops at the first row later than the window end (rows are appended in time order).

use chrono::NaiveDateTime;
use std::io::{self, BufRead};
use tracing::debug;

use crate::models::{TimeSeries, TimeWindow};

/// `dd/MM/yyyy HH:mm:ss`, the format statistics rows are written with.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const SEPARATOR: u8 = b',';
const CARRIAGE_RETURN: u8 = b'\r';
const NEW_LINE: u8 = b'\n';

#[derive(Debug, Clone)]
pub struct SeriesExtractor {
    timestamp_format: String,
}

impl Default for SeriesExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_FORMAT)
    }
}

/// What the scan should do after a field has been consumed.
enum FieldOutcome {
    Continue,
    SkipRow,
    Stop,
}

/// Cursor over the row currently being scanned.
struct RowCursor {
    field: Vec<u8>,
    column: usize,
    skip: bool,
    timestamp: Option<NaiveDateTime>,
}

impl RowCursor {
    fn new() -> Self {
        Self {
            field: Vec::with_capacity(32),
            column: 0,
            skip: false,
            timestamp: None,
        }
    }

    fn reset(&mut self) {
        self.field.clear();
        self.column = 0;
        self.skip = false;
        self.timestamp = None;
    }
}

impl SeriesExtractor {
    pub fn new(timestamp_format: impl Into<String>) -> Self {
        Self {
            timestamp_format: timestamp_format.into(),
        }
    }

    /// Collect the values of `column` for rows whose timestamp falls inside `window`.
    ///
    /// Column 0 holds the row timestamp; metric columns start at 1. Malformed rows are
    /// skipped, never reported. Only I/O failures of `source` itself are returned.
    pub fn extract<R: BufRead>(
        &self,
        mut source: R,
        window: &TimeWindow,
        column: usize,
    ) -> io::Result<TimeSeries> {
        let mut series = TimeSeries::new();
        let mut row = RowCursor::new();

        loop {
            let buf = match source.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                // A trailing row without terminator may still be mid-write; ignore it.
                return Ok(series);
            }

            let len = buf.len();
            for &byte in buf {
                match byte {
                    // A field ended by the row terminator is never evaluated.
                    CARRIAGE_RETURN | NEW_LINE => row.reset(),
                    _ if row.skip => {}
                    SEPARATOR => {
                        match self.end_field(&mut row, window, column, &mut series) {
                            FieldOutcome::Stop => return Ok(series),
                            FieldOutcome::SkipRow => row.skip = true,
                            FieldOutcome::Continue => {}
                        }
                        row.field.clear();
                        row.column += 1;
                    }
                    _ => row.field.push(byte),
                }
            }
            source.consume(len);
        }
    }

    fn end_field(
        &self,
        row: &mut RowCursor,
        window: &TimeWindow,
        column: usize,
        series: &mut TimeSeries,
    ) -> FieldOutcome {
        if row.column == 0 {
            let Some(timestamp) = self.parse_timestamp(&row.field) else {
                debug!(
                    field = %String::from_utf8_lossy(&row.field),
                    "skipping row with unparseable timestamp"
                );
                return FieldOutcome::SkipRow;
            };
            if timestamp < window.start() {
                return FieldOutcome::SkipRow;
            }
            if timestamp > window.end() {
                return FieldOutcome::Stop;
            }
            row.timestamp = Some(timestamp);
            FieldOutcome::Continue
        } else if row.column == column {
            let Some(timestamp) = row.timestamp else {
                return FieldOutcome::SkipRow;
            };
            match parse_value(&row.field) {
                Some(value) => {
                    series.push(timestamp, value);
                    FieldOutcome::SkipRow
                }
                None => {
                    debug!(
                        column,
                        %timestamp,
                        field = %String::from_utf8_lossy(&row.field),
                        "skipping corrupt value"
                    );
                    FieldOutcome::Continue
                }
            }
        } else {
            FieldOutcome::Continue
        }
    }

    fn parse_timestamp(&self, field: &[u8]) -> Option<NaiveDateTime> {
        let text = std::str::from_utf8(field).ok()?;
        NaiveDateTime::parse_from_str(text.trim(), &self.timestamp_format).ok()
    }
}

fn parse_value(field: &[u8]) -> Option<f64> {
    std::str::from_utf8(field).ok()?.trim().parse::<f64>().ok()
}
