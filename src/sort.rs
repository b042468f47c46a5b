// src/sort.rs
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::record::{Field, FieldValue, Record};

pub type SortKey = Field;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        })
    }
}

impl FromStr for SortDirection {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for SortDirection {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<SortDirection> for String {
    fn from(d: SortDirection) -> Self { d.to_string() }
}

/// Ascending comparison of one field. Text compares lower-cased, numbers by
/// `total_cmp`, so every pair of records has a definite answer.
pub fn compare_field(a: &Record, b: &Record, key: SortKey) -> Ordering {
    match (a.value(key), b.value(key)) {
        (FieldValue::Text(x), FieldValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(&y),
        (FieldValue::Count(x), FieldValue::Count(y)) => x.cmp(&y),
        // same key on both sides: variants always agree
        _ => Ordering::Equal,
    }
}

/// Sorted copy of `set`. Stable in both directions: records that compare
/// equal keep their input order.
pub fn sort_by(set: &[Record], key: SortKey, dir: SortDirection) -> Vec<Record> {
    let mut out = set.to_vec();
    match dir {
        SortDirection::Ascending => out.sort_by(|a, b| compare_field(a, b, key)),
        SortDirection::Descending => out.sort_by(|a, b| compare_field(b, a, key)),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, cred: f64) -> Record {
        Record {
            name: name.into(),
            affiliation: String::new(),
            credibility_percent: cred,
            total_statements: 1,
            true_count: 0,
            partially_true_count: 0,
            truncated_count: 0,
            false_count: 0,
            unverifiable_count: 0,
        }
    }

    #[test]
    fn text_sort_ignores_case() {
        let set = vec![named("bogdan", 0.0), named("Ana", 0.0), named("ștefan", 0.0), named("Cezar", 0.0)];
        let out = sort_by(&set, Field::Name, SortDirection::Ascending);
        let names: Vec<&str> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "bogdan", "Cezar", "ștefan"]);
    }

    #[test]
    fn ties_keep_input_order_both_ways() {
        let set = vec![named("a", 50.0), named("b", 70.0), named("c", 50.0), named("d", 70.0)];
        let asc = sort_by(&set, Field::Credibility, SortDirection::Ascending);
        let asc: Vec<&str> = asc.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(asc, vec!["a", "c", "b", "d"]);

        let desc = sort_by(&set, Field::Credibility, SortDirection::Descending);
        let desc: Vec<&str> = desc.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(desc, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn direction_parsing() {
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("descending".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert!(matches!("up".parse::<SortDirection>(), Err(Error::InvalidDirection(_))));
        assert_eq!(SortDirection::Ascending.flip(), SortDirection::Descending);
    }
}
