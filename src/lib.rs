// src/lib.rs

#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod file;
pub mod filter;
pub mod normalize;
pub mod paginate;
pub mod record;
pub mod sort;
pub mod stats;
pub mod tabular;

pub use data::{DataManager, RecordSet, Scope};
pub use error::{Error, Result};
pub use filter::{apply_filters, FilterCriteria};
pub use normalize::{normalize_rows, NormalizeReport};
pub use paginate::{paginate, Page, PageSize};
pub use record::{Field, Record};
pub use sort::{sort_by, SortDirection, SortKey};
pub use stats::{party_statistics, summary_statistics, PartyAggregate, SummaryStatistics};
