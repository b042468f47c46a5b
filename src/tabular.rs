// src/tabular.rs
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{Error, Result};
use crate::record::{Field, Record};

/// Delimiters tried by auto-detection, in tie-break order.
pub const CANDIDATE_DELIMS: [u8; 4] = [b',', b';', b'\t', b'|'];

/* ---------------- Raw rows ---------------- */

/// One data row as `header → value`, in source column order.
/// Columns past the end of a short row are simply absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, header: &str, value: &str) -> Self {
        self.cells.push((header.to_string(), value.to_string()));
        self
    }

    /// Exact header lookup (first match wins).
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.iter().find(|(h, _)| h == header).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
}

impl<H: Into<String>, V: Into<String>> FromIterator<(H, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (H, V)>>(iter: I) -> Self {
        Self { cells: iter.into_iter().map(|(h, v)| (h.into(), v.into())).collect() }
    }
}

/* ---------------- Parsing ---------------- */

/// Pick the delimiter that occurs most often in the header line.
/// Ties (including "none found") go to the earlier candidate, so `,` wins.
pub fn detect_delimiter(header_line: &str) -> u8 {
    let mut best = CANDIDATE_DELIMS[0];
    let mut best_n = 0usize;
    for &d in &CANDIDATE_DELIMS {
        let n = header_line.bytes().filter(|&b| b == d).count();
        if n > best_n { best = d; best_n = n; }
    }
    best
}

/// Parse header-first tabular text into raw rows.
///
/// - a leading BOM is ignored
/// - blank lines (and rows whose cells are all blank) are skipped
/// - `delimiter: None` means auto-detect from the header line
///
/// Text without a header row is `Error::EmptyInput`; broken quoting is `Error::Csv`.
/// Nothing is returned on failure.
pub fn read_rows(text: &str, delimiter: Option<u8>) -> Result<Vec<RawRow>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    // Whitespace-only lines above the header would otherwise become the header.
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() { break; }
        offset += line.len();
    }
    let body = &text[offset..];
    let header_line = body.lines().next().ok_or(Error::EmptyInput)?;
    let sep = delimiter.unwrap_or_else(|| detect_delimiter(header_line));

    let mut rdr = ReaderBuilder::new()
        .delimiter(sep)
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: StringRecord = rdr.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::EmptyInput);
    }

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.iter().all(|c| c.trim().is_empty()) { continue; }
        rows.push(headers.iter().zip(rec.iter()).collect::<RawRow>());
    }

    logd!("csv: {} data rows, delimiter {:?}", rows.len(), sep as char);
    Ok(rows)
}

/* ---------------- Writing ---------------- */

/// Export column order; matches what `normalize` reads back.
pub const EXPORT_COLUMNS: [Field; 9] = [
    Field::Name,
    Field::Affiliation,
    Field::Credibility,
    Field::TotalStatements,
    Field::Unverifiable,
    Field::False,
    Field::Truncated,
    Field::PartiallyTrue,
    Field::True,
];

fn export_cell(r: &Record, f: Field) -> String {
    match f {
        Field::Name => r.name.clone(),
        Field::Affiliation => r.affiliation.clone(),
        // shortest text that parses back to the same f64
        Field::Credibility => format!("{}%", r.credibility_percent),
        Field::TotalStatements => r.total_statements.to_string(),
        Field::True => r.true_count.to_string(),
        Field::PartiallyTrue => r.partially_true_count.to_string(),
        Field::Truncated => r.truncated_count.to_string(),
        Field::False => r.false_count.to_string(),
        Field::Unverifiable => r.unverifiable_count.to_string(),
    }
}

/// Render records (header line included) as CSV/TSV text.
pub fn write_records(records: &[Record], sep: u8) -> Result<String> {
    let mut w = WriterBuilder::new().delimiter(sep).from_writer(Vec::new());

    w.write_record(EXPORT_COLUMNS.iter().map(|f| f.header()))?;
    for r in records {
        w.write_record(EXPORT_COLUMNS.iter().map(|&f| export_cell(r, f)))?;
    }

    let buf = w.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    match String::from_utf8(buf) {
        Ok(s) => Ok(s),
        Err(e) => Ok(String::from_utf8_lossy(&e.into_bytes()).into_owned()),
    }
}
