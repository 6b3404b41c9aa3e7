//! CSV/TSV and spreadsheet parser with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xls, Xlsx};
use chrono::{NaiveDateTime, NaiveTime};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{DataTable, SourceMetadata};
use crate::error::{DatalensError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Container format of an input, decided from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text (CSV, TSV, ...).
    Delimited,
    /// Office Open XML workbook.
    Xlsx,
    /// Legacy binary workbook.
    Xls,
}

impl SourceFormat {
    /// Decide the format from a file name. Names without an extension are
    /// treated as delimited text.
    pub fn from_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        match extension.as_deref() {
            None | Some("csv" | "tsv" | "tab" | "txt" | "psv") => Ok(SourceFormat::Delimited),
            Some("xlsx" | "xlsm") => Ok(SourceFormat::Xlsx),
            Some("xls") => Ok(SourceFormat::Xls),
            Some(other) => Err(DatalensError::UnsupportedFormat(format!(
                "'.{}' files are not supported; use csv, tsv, xlsx or xls",
                other
            ))),
        }
    }
}

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Force a delimiter instead of auto-detecting.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Limit the number of data rows read.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| DatalensError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| DatalensError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (table, mut metadata) = self.parse_named_bytes(&name, &contents)?;
        metadata.path = Some(path.to_path_buf());
        Ok((table, metadata))
    }

    /// Parse in-memory contents, using `name` to pick the format.
    pub fn parse_named_bytes(
        &self,
        name: &str,
        contents: &[u8],
    ) -> Result<(DataTable, SourceMetadata)> {
        let format = SourceFormat::from_name(name)?;

        let mut hasher = Sha256::new();
        hasher.update(contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (table, format_label) = match format {
            SourceFormat::Delimited => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(contents)?,
                };
                let table = self.parse_bytes(contents, delimiter)?;
                let label = match delimiter {
                    b'\t' => "tsv",
                    b',' => "csv",
                    b';' => "csv-semicolon",
                    b'|' => "psv",
                    _ => "delimited",
                };
                (table, label)
            }
            SourceFormat::Xlsx => {
                let workbook: Xlsx<Cursor<Vec<u8>>> = open_workbook_from_rs::<Xlsx<_>, _>(Cursor::new(contents.to_vec()))
                    .map_err(|e| DatalensError::Spreadsheet(e.to_string()))?;
                (self.parse_range(first_sheet(workbook)?)?, "xlsx")
            }
            SourceFormat::Xls => {
                let workbook: Xls<Cursor<Vec<u8>>> = open_workbook_from_rs::<Xls<_>, _>(Cursor::new(contents.to_vec()))
                    .map_err(|e| DatalensError::Spreadsheet(e.to_string()))?;
                (self.parse_range(first_sheet(workbook)?)?, "xls")
            }
        };

        debug!(
            source = name,
            format = format_label,
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed tabular source"
        );

        let metadata = SourceMetadata::new(
            name,
            None,
            hash,
            contents.len() as u64,
            format_label.to_string(),
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse delimited bytes directly.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        if delimiter == self.config.quote {
            return Err(DatalensError::InvalidDelimiter(format!(
                "delimiter '{}' collides with the quote character",
                delimiter as char
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut headers: Vec<String> = if self.config.has_header {
            reader
                .headers()?
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            if !self.config.has_header && headers.is_empty() {
                headers = (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect();
            }
            if record.len() > headers.len() {
                let line = record.position().map_or(row_idx + 2, |p| p.line() as usize);
                return Err(DatalensError::Schema(format!(
                    "expected {} fields in line {}, saw {}",
                    headers.len(),
                    line,
                    record.len()
                )));
            }
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if headers.is_empty() {
            return Err(DatalensError::EmptyData("No columns found".to_string()));
        }

        let width = headers.len();
        Ok(DataTable::new(headers, pad_rows(rows, width)))
    }

    /// Turn a worksheet range into a table, using the first row as header.
    fn parse_range(&self, range: Range<Data>) -> Result<DataTable> {
        let mut sheet_rows = range.rows();

        let headers: Vec<String> = match sheet_rows.next() {
            Some(first) => first.iter().map(cell_to_string).collect(),
            None => return Err(DatalensError::EmptyData("Worksheet is empty".to_string())),
        };

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let rows: Vec<Vec<String>> = sheet_rows
            .take(limit)
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        // Ranges are rectangular, so rows are never wider than the header
        let width = headers.len();
        Ok(DataTable::new(headers, pad_rows(rows, width)))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pad short rows with empty cells up to the header width.
fn pad_rows(mut rows: Vec<Vec<String>>, width: usize) -> Vec<Vec<String>> {
    for row in &mut rows {
        if row.len() < width {
            row.resize(width, String::new());
        }
    }
    rows
}

/// Open the first worksheet of a workbook.
fn first_sheet<RS, R>(mut workbook: R) -> Result<Range<Data>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DatalensError::EmptyData("Workbook has no worksheets".to_string()))?
        .map_err(|e| DatalensError::Spreadsheet(e.to_string()))
}

/// Render a worksheet cell the way it would appear in a CSV export.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // Excel stores whole numbers as floats
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) if dt.is_duration() => dt.as_f64().to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(format_datetime)
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// ISO text for a worksheet date, dropping a midnight time component.
fn format_datetime(value: NaiveDateTime) -> String {
    if Some(value.time()) == NaiveTime::from_hms_opt(0, 0, 0) {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(DatalensError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab gets a small bonus
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_commas() {
        let data = b"name;note\n\"Smith, J\";ok\n\"Doe, A\";late";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,25,LA";
        let table = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][0], "Alice");
        assert_eq!(table.rows[1][1], "25");
    }

    #[test]
    fn test_parse_header_only() {
        let parser = Parser::new();
        let (table, metadata) = parser.parse_named_bytes("empty.csv", b"a,b,c\n").unwrap();

        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 0);
        assert_eq!(metadata.row_count, 0);
        assert_eq!(metadata.format, "csv");
    }

    #[test]
    fn test_parse_empty_input_fails() {
        let parser = Parser::new();
        let err = parser.parse_named_bytes("blank.csv", b"").unwrap_err();
        assert!(matches!(err, DatalensError::EmptyData(_)));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"a,b\n1\n2,3", b',').unwrap();

        assert_eq!(table.rows[0], vec!["1", ""]);
        assert_eq!(table.rows[1], vec!["2", "3"]);
    }

    #[test]
    fn test_row_wider_than_header_fails() {
        let parser = Parser::new();
        let err = parser
            .parse_named_bytes("x.csv", b"a,b\n1,2\n3,4,999\n")
            .unwrap_err();

        match err {
            DatalensError::Schema(msg) => {
                assert_eq!(msg, "expected 2 fields in line 3, saw 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig::default().with_max_rows(1));
        let table = parser.parse_bytes(b"a\n1\n2\n3", b',').unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_no_header_generates_names() {
        let config = ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        };
        let parser = Parser::with_config(config);
        let table = parser.parse_bytes(b"1,2\n3,4", b',').unwrap();

        assert_eq!(table.headers, vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_delimiter_colliding_with_quote() {
        let parser = Parser::with_config(ParserConfig::default().with_delimiter(b'"'));
        let err = parser.parse_named_bytes("x.csv", b"a\"b\n1\"2").unwrap_err();
        assert!(matches!(err, DatalensError::InvalidDelimiter(_)));
    }

    #[test]
    fn test_source_format_from_name() {
        assert_eq!(SourceFormat::from_name("data.CSV").unwrap(), SourceFormat::Delimited);
        assert_eq!(SourceFormat::from_name("data").unwrap(), SourceFormat::Delimited);
        assert_eq!(SourceFormat::from_name("book.xlsx").unwrap(), SourceFormat::Xlsx);
        assert_eq!(SourceFormat::from_name("old.xls").unwrap(), SourceFormat::Xls);
        assert!(matches!(
            SourceFormat::from_name("report.pdf"),
            Err(DatalensError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Float(3.0)), "3");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("x".into())), "x");
        assert_eq!(
            cell_to_string(&Data::DateTimeIso("2024-01-15T08:30:00".into())),
            "2024-01-15T08:30:00"
        );
    }

    #[test]
    fn test_format_datetime() {
        let parse = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();

        let midnight = parse("2024-01-01 00:00:00");
        assert_eq!(format_datetime(midnight), "2024-01-01");

        let morning = parse("2024-01-01 09:15:00");
        assert_eq!(format_datetime(morning), "2024-01-01 09:15:00");
    }
}
