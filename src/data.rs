// src/data.rs
//
// Canonical and filtered record sets, and the manager that owns them.
//
// - canonical: built once per load, never touched afterwards.
// - filtered:  derived from canonical by `apply_filters`; replaced wholesale
//              on every filter change, never edited in place.
//
// Everything else (stats, sorting, paging) is computed on demand from one of
// the two sets and handed back as plain owned data.

use std::ops::Deref;

use crate::config::DashboardOptions;
use crate::tabular::{self, RawRow};
use crate::error::Result;
use crate::filter::{self, FilterCriteria};
use crate::normalize::{self, NormalizeReport};
use crate::paginate::{self, Page, PageWindow};
use crate::record::{Field, Record};
use crate::sort::{self, SortDirection, SortKey};
use crate::stats::{self, PartyAggregate, PartyBreakdown, SummaryStatistics};

/// Ordered, read-only sequence of records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self { Self { records } }
    pub fn records(&self) -> &[Record] { &self.records }
    pub fn into_vec(self) -> Vec<Record> { self.records }
}

impl Deref for RecordSet {
    type Target = [Record];
    fn deref(&self) -> &[Record] { &self.records }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self { Self::new(records) }
}

/// Which set an operation reads from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scope {
    All,
    #[default]
    Filtered,
}

/// Owner of one loaded dataset and its current filtered view.
#[derive(Clone, Debug)]
pub struct DataManager {
    canonical: RecordSet,
    filtered: RecordSet,
    criteria: FilterCriteria,
    report: NormalizeReport,
    options: DashboardOptions,
}

impl DataManager {
    /// Parse, normalize and publish a dataset. On error nothing is built.
    /// `options.filters` is applied to produce the initial filtered view.
    pub fn load_str(text: &str, options: DashboardOptions) -> Result<Self> {
        let rows = tabular::read_rows(text, options.delimiter_byte()?)?;
        let mgr = Self::from_rows(&rows, options);
        logf!(
            "load: {} records ({} rows read, {} dropped)",
            mgr.canonical.len(), mgr.report.rows_read, mgr.report.dropped()
        );
        Ok(mgr)
    }

    pub fn from_rows(rows: &[RawRow], options: DashboardOptions) -> Self {
        let normalized = normalize::normalize_rows(rows);
        let mut mgr = Self::from_records(normalized.records, options);
        mgr.report = normalized.report;
        mgr
    }

    /// Wrap already-normalized records (no report).
    pub fn from_records(records: Vec<Record>, options: DashboardOptions) -> Self {
        let canonical = RecordSet::new(records);
        let criteria = options.filters.clone();
        let filtered = RecordSet::new(filter::apply_filters(&canonical, &criteria));
        Self { canonical, filtered, criteria, report: NormalizeReport::default(), options }
    }

    /// Replace the dataset from new text. On error `self` is left as it was.
    pub fn reload_str(&mut self, text: &str) -> Result<()> {
        let fresh = Self::load_str(text, self.options.clone())?;
        *self = fresh;
        Ok(())
    }

    /* ---------------- Accessors ---------------- */

    pub fn canonical(&self) -> &RecordSet { &self.canonical }
    pub fn filtered(&self) -> &RecordSet { &self.filtered }
    pub fn criteria(&self) -> &FilterCriteria { &self.criteria }
    pub fn report(&self) -> &NormalizeReport { &self.report }
    pub fn options(&self) -> &DashboardOptions { &self.options }

    pub fn set(&self, scope: Scope) -> &[Record] {
        match scope {
            Scope::All => self.canonical.records(),
            Scope::Filtered => self.filtered.records(),
        }
    }

    /* ---------------- Filtering ---------------- */

    /// Recompute the filtered view from the canonical set.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> &RecordSet {
        self.filtered = RecordSet::new(filter::apply_filters(&self.canonical, &criteria));
        logd!("filter: {} of {} records kept", self.filtered.len(), self.canonical.len());
        self.criteria = criteria;
        &self.filtered
    }

    pub fn clear_filters(&mut self) -> &RecordSet {
        self.apply_filters(FilterCriteria::default())
    }

    /* ---------------- Aggregates ---------------- */

    pub fn statistics(&self, scope: Scope) -> SummaryStatistics {
        stats::summary_statistics_weighted(self.set(scope), &self.options.weights)
    }

    pub fn party_statistics(&self, scope: Scope) -> Vec<PartyAggregate> {
        stats::party_statistics(self.set(scope))
    }

    pub fn party_breakdown(&self, scope: Scope) -> Vec<PartyBreakdown> {
        stats::party_breakdown(self.set(scope), &self.options.weights)
    }

    /// Filter choices always come from the full dataset.
    pub fn parties(&self) -> Vec<String> {
        stats::parties(&self.canonical)
    }

    /* ---------------- Ordering & paging ---------------- */

    pub fn sorted(&self, scope: Scope, key: SortKey, dir: SortDirection) -> Vec<Record> {
        sort::sort_by(self.set(scope), key, dir)
    }

    /// One page of the main table, with the configured page size.
    pub fn table_page(&self, scope: Scope, key: SortKey, dir: SortDirection, page_index: usize) -> Page<Record> {
        paginate::paginate(&self.sorted(scope, key, dir), page_index, self.options.table_page_size)
    }

    /// One page of the credibility ranking over the filtered view.
    pub fn top_page(&self, page_index: usize) -> Page<Record> {
        let ranked = self.sorted(Scope::Filtered, Field::Credibility, SortDirection::Descending);
        paginate::paginate(&ranked, page_index, self.options.top_page_size)
    }

    /// Pager buttons for a page returned by `table_page`/`top_page`.
    pub fn window_for<T>(&self, page: &Page<T>) -> Option<PageWindow> {
        paginate::page_window(page.page_index, page.total_pages, self.options.page_window)
    }
}
