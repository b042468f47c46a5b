// src/config/options.rs
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::{Error, Result};
use crate::filter::FilterCriteria;
use crate::paginate::PageSize;
use crate::record::Field;
use crate::sort::SortDirection;
use crate::stats::StatementWeights;

/// Everything a front end may tune. All fields optional in the TOML file.
///
/// ```toml
/// table_page_size = 25          # or "all"
/// sort_key = "credibility"
/// sort_direction = "desc"
/// delimiter = ";"
///
/// [weights]
/// truncated_weight = 25.0
///
/// [filters]
/// min_statements = 5
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardOptions {
    pub table_page_size: PageSize,
    pub top_page_size: PageSize,
    pub page_window: usize,
    pub sort_key: Field,
    pub sort_direction: SortDirection,
    /// `None` = detect from the header line.
    pub delimiter: Option<char>,
    pub weights: StatementWeights,
    /// Applied right after load.
    pub filters: FilterCriteria,
}

fn page(n: usize) -> PageSize {
    NonZeroUsize::new(n).map_or(PageSize::All, PageSize::Fixed)
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            table_page_size: page(DEFAULT_PAGE_SIZE),
            top_page_size: page(DEFAULT_TOP_PAGE_SIZE),
            page_window: PAGE_WINDOW_WIDTH,
            sort_key: Field::Credibility,
            sort_direction: SortDirection::Descending,
            delimiter: None,
            weights: StatementWeights::default(),
            filters: FilterCriteria::default(),
        }
    }
}

impl DashboardOptions {
    /// Read options from TOML. A missing file is not an error: defaults apply.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            logd!("config: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let opts = Self::from_toml(&text)?;
        logf!("config: loaded {}", path.display());
        Ok(opts)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let opts: Self = toml::from_str(text)?;
        opts.delimiter_byte()?;
        opts.filters.validate()?;
        Ok(opts)
    }

    /// The configured delimiter as a byte; only single-byte (ASCII) delimiters work.
    pub fn delimiter_byte(&self) -> Result<Option<u8>> {
        match self.delimiter {
            None => Ok(None),
            Some(c) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => Ok(Some(c as u8)),
            Some(c) => Err(Error::Config(format!("unsupported delimiter {c:?}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}
