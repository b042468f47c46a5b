// src/filter.rs
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::Record;

/// Independent, optional constraints; all that are set must hold.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FilterCriteria {
    /// Exact affiliation. Blank means no constraint.
    pub affiliation: Option<String>,
    /// Inclusive lower bound on credibility. Unset means no bound, negatives included.
    pub min_credibility: Option<f64>,
    /// Case-insensitive substring of the name. Blank means no constraint.
    pub name_contains: Option<String>,
    /// Inclusive lower bound on total statements.
    pub min_statements: Option<u32>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.affiliation().is_none()
            && self.min_credibility.is_none()
            && self.name_needle().is_none()
            && self.min_statements.is_none()
    }

    /// The credibility bound, when set, must be finite.
    pub fn validate(&self) -> Result<()> {
        match self.min_credibility {
            Some(v) if !v.is_finite() => {
                Err(Error::Config(format!("min_credibility must be a finite number, got {v}")))
            }
            _ => Ok(()),
        }
    }

    /// Field-wise merge; `other` wins wherever it is set.
    pub fn merge(&self, other: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            affiliation: other.affiliation.clone().or_else(|| self.affiliation.clone()),
            min_credibility: other.min_credibility.or(self.min_credibility),
            name_contains: other.name_contains.clone().or_else(|| self.name_contains.clone()),
            min_statements: other.min_statements.or(self.min_statements),
        }
    }

    fn affiliation(&self) -> Option<&str> {
        self.affiliation.as_deref().filter(|a| !a.trim().is_empty())
    }

    fn name_needle(&self) -> Option<String> {
        self.name_contains
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map(str::to_lowercase)
    }
}

/// Compiled form of `FilterCriteria`, lower-casing the needle once.
struct Predicate<'c> {
    affiliation: Option<&'c str>,
    min_credibility: Option<f64>,
    needle: Option<String>,
    min_statements: u32,
}

impl<'c> Predicate<'c> {
    fn new(c: &'c FilterCriteria) -> Self {
        Self {
            affiliation: c.affiliation(),
            min_credibility: c.min_credibility,
            needle: c.name_needle(),
            min_statements: c.min_statements.unwrap_or(0),
        }
    }

    fn matches(&self, r: &Record) -> bool {
        if let Some(a) = self.affiliation {
            if r.affiliation != a { return false; }
        }
        if let Some(min) = self.min_credibility {
            if r.credibility_percent < min { return false; }
        }
        if let Some(n) = &self.needle {
            if !r.name.to_lowercase().contains(n.as_str()) { return false; }
        }
        r.total_statements >= self.min_statements
    }
}

/// Fresh copy of the records that pass `criteria`, in input order.
pub fn apply_filters(set: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    let pred = Predicate::new(criteria);
    set.iter().filter(|r| pred.matches(r)).cloned().collect()
}
