// src/normalize.rs
//! Raw header-keyed rows → canonical `Record`s.
//!
//! Tolerant by construction:
//! - headers are matched through `HEADER_ALIASES` after `header_key`
//!   normalization, so diacritics, spacing, stray punctuation and the
//!   ASCII-stripped spellings all land on the same field;
//! - unparseable or negative numbers become 0 (counted in the report);
//! - rows without a name or with zero statements are dropped silently.
//!
//! Input order is preserved. Nothing here fails: load failures happen one
//! layer down, in `tabular::read_rows`.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::sanitize::{header_key, leading_int, parse_percent};
use crate::tabular::RawRow;
use crate::record::{Field, Record};

/// Logical field → accepted header spellings. Add new aliases here.
pub const HEADER_ALIASES: &[(Field, &[&str])] = &[
    (Field::Name, &["Nume", "Name"]),
    (Field::Affiliation, &["Afiliere", "Partid"]),
    (Field::Credibility, &["Credibilitate"]),
    (Field::TotalStatements, &["Număr declarații", "Numr declaraii"]),
    (Field::True, &["Adevărate", "Adevrate"]),
    (Field::PartiallyTrue, &["Parțial adevărate", "Parial adevrate"]),
    (Field::Truncated, &["Trunchiate"]),
    (Field::False, &["False"]),
    (Field::Unverifiable, &["Imposibil de verificat"]),
];

/// What happened during one normalization pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeReport {
    pub rows_read: usize,
    pub accepted: usize,
    pub dropped_blank_name: usize,
    pub dropped_no_statements: usize,
    /// Non-blank numeric cells of accepted rows that could not be read, or were negative.
    pub coerced_fields: usize,
    /// Accepted rows whose credibility falls outside 0..=100 (kept as-is).
    pub credibility_out_of_range: usize,
    /// Source headers that matched no field, in first-seen order.
    pub unmatched_headers: Vec<String>,
}

impl NormalizeReport {
    pub fn dropped(&self) -> usize {
        self.dropped_blank_name + self.dropped_no_statements
    }
}

#[derive(Clone, Debug, Default)]
pub struct Normalized {
    pub records: Vec<Record>,
    pub report: NormalizeReport,
}

/// Resolves source headers to fields, caching by raw header text.
pub struct HeaderResolver {
    aliases: HashMap<String, Field>,
    seen: HashMap<String, Option<Field>>,
}

impl Default for HeaderResolver {
    fn default() -> Self { Self::new() }
}

impl HeaderResolver {
    pub fn new() -> Self {
        let mut aliases = HashMap::new();
        for (field, spellings) in HEADER_ALIASES {
            for s in spellings.iter() {
                aliases.entry(header_key(s)).or_insert(*field);
            }
        }
        Self { aliases, seen: HashMap::new() }
    }

    /// Field for a raw header, or `None` if nothing matches.
    pub fn resolve(&mut self, raw: &str) -> Option<Field> {
        if let Some(hit) = self.seen.get(raw) {
            return *hit;
        }
        let field = self.aliases.get(&header_key(raw)).copied();
        self.seen.insert(raw.to_string(), field);
        field
    }
}

/// Per-row cell lookup by field; first matching column wins.
struct FieldCells<'a> {
    cells: [Option<&'a str>; 9],
}

impl<'a> FieldCells<'a> {
    fn collect(row: &'a RawRow, resolver: &mut HeaderResolver, unmatched: &mut Vec<String>) -> Self {
        let mut cells = [None; 9];
        for (h, v) in row.iter() {
            match resolver.resolve(h) {
                Some(f) => {
                    let slot = &mut cells[slot_of(f)];
                    if slot.is_none() { *slot = Some(v); }
                }
                None => {
                    if !h.trim().is_empty() && !unmatched.iter().any(|u| u == h) {
                        unmatched.push(h.to_string());
                    }
                }
            }
        }
        Self { cells }
    }

    fn get(&self, f: Field) -> Option<&'a str> {
        self.cells[slot_of(f)]
    }
}

fn slot_of(f: Field) -> usize {
    Field::ALL.iter().position(|&x| x == f).unwrap_or(0)
}

/// Count cell: blank/absent → 0; unreadable or negative → 0 and `coerced += 1`.
fn parse_count(cell: Option<&str>, coerced: &mut usize) -> u32 {
    let Some(s) = cell.map(str::trim).filter(|s| !s.is_empty()) else { return 0 };
    match leading_int(s) {
        Some(n) if n >= 0 => u32::try_from(n).unwrap_or_else(|_| { *coerced += 1; 0 }),
        _ => { *coerced += 1; 0 }
    }
}

fn parse_credibility(cell: Option<&str>, coerced: &mut usize) -> f64 {
    let Some(s) = cell.map(str::trim).filter(|s| !s.is_empty()) else { return 0.0 };
    parse_percent(s).unwrap_or_else(|| { *coerced += 1; 0.0 })
}

/// Normalize a whole load. Output keeps the relative order of accepted rows.
pub fn normalize_rows(rows: &[RawRow]) -> Normalized {
    let mut resolver = HeaderResolver::new();
    let mut report = NormalizeReport { rows_read: rows.len(), ..Default::default() };
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let cells = FieldCells::collect(row, &mut resolver, &mut report.unmatched_headers);
        let mut coerced = 0usize;

        let candidate = Record {
            name: cells.get(Field::Name).map(str::trim).unwrap_or_default().to_string(),
            affiliation: cells.get(Field::Affiliation).map(str::trim).unwrap_or_default().to_string(),
            credibility_percent: parse_credibility(cells.get(Field::Credibility), &mut coerced),
            total_statements: parse_count(cells.get(Field::TotalStatements), &mut coerced),
            true_count: parse_count(cells.get(Field::True), &mut coerced),
            partially_true_count: parse_count(cells.get(Field::PartiallyTrue), &mut coerced),
            truncated_count: parse_count(cells.get(Field::Truncated), &mut coerced),
            false_count: parse_count(cells.get(Field::False), &mut coerced),
            unverifiable_count: parse_count(cells.get(Field::Unverifiable), &mut coerced),
        };

        let blank_name = candidate.name.is_empty();
        match candidate.accept() {
            Some(rec) => {
                report.coerced_fields += coerced;
                if !(0.0..=100.0).contains(&rec.credibility_percent) {
                    report.credibility_out_of_range += 1;
                }
                records.push(rec);
            }
            None if blank_name => report.dropped_blank_name += 1,
            None => report.dropped_no_statements += 1,
        }
    }
    report.accepted = records.len();

    logd!(
        "normalize: read={} accepted={} dropped(name={}, statements={}) coerced={}",
        report.rows_read, report.accepted, report.dropped_blank_name,
        report.dropped_no_statements, report.coerced_fields
    );
    if report.rows_read > 0 && report.accepted == 0 {
        tracing::warn!(
            unmatched = ?report.unmatched_headers,
            "normalize: no usable rows in {} read", report.rows_read
        );
    }

    Normalized { records, report }
}
