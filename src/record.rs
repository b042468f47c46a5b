// src/record.rs
//! One tracked individual and the logical columns that describe it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A normalized row: who, which group, and how their statements checked out.
///
/// Only `normalize` builds these, and only when `name` is non-blank and
/// `total_statements > 0`. Outcome counts are independent of the total.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: String,
    pub affiliation: String,
    pub credibility_percent: f64,
    pub total_statements: u32,
    pub true_count: u32,
    pub partially_true_count: u32,
    pub truncated_count: u32,
    pub false_count: u32,
    pub unverifiable_count: u32,
}

impl Record {
    /// Enforces the record invariants; `None` means the row gets dropped.
    pub(crate) fn accept(self) -> Option<Self> {
        if self.name.trim().is_empty() || self.total_statements == 0 {
            None
        } else {
            Some(self)
        }
    }

    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.name),
            Field::Affiliation => FieldValue::Text(&self.affiliation),
            Field::Credibility => FieldValue::Number(self.credibility_percent),
            Field::TotalStatements => FieldValue::Count(self.total_statements),
            Field::True => FieldValue::Count(self.true_count),
            Field::PartiallyTrue => FieldValue::Count(self.partially_true_count),
            Field::Truncated => FieldValue::Count(self.truncated_count),
            Field::False => FieldValue::Count(self.false_count),
            Field::Unverifiable => FieldValue::Count(self.unverifiable_count),
        }
    }
}

/// Borrowed view of one cell, typed by how it compares.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Count(u32),
}

/// Logical columns of a `Record`. Doubles as the sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Field {
    Name,
    Affiliation,
    Credibility,
    TotalStatements,
    True,
    PartiallyTrue,
    Truncated,
    False,
    Unverifiable,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Affiliation,
        Field::Credibility,
        Field::TotalStatements,
        Field::True,
        Field::PartiallyTrue,
        Field::Truncated,
        Field::False,
        Field::Unverifiable,
    ];

    /// Stable identifier used in config files, CLI flags and JSON.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Affiliation => "affiliation",
            Field::Credibility => "credibility",
            Field::TotalStatements => "totalStatements",
            Field::True => "true",
            Field::PartiallyTrue => "partiallyTrue",
            Field::Truncated => "truncated",
            Field::False => "false",
            Field::Unverifiable => "unverifiable",
        }
    }

    /// Column header written on export (and the primary alias on import).
    pub fn header(self) -> &'static str {
        match self {
            Field::Name => "Nume",
            Field::Affiliation => "Afiliere",
            Field::Credibility => "Credibilitate",
            Field::TotalStatements => "Număr declarații",
            Field::True => "Adevărate",
            Field::PartiallyTrue => "Parțial adevărate",
            Field::Truncated => "Trunchiate",
            Field::False => "False",
            Field::Unverifiable => "Imposibil de verificat",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = Error;

    /// Accepts the camelCase key, its snake_case form, and the dashboard's
    /// Romanian column ids (`nume`, `numarDeclaratii`, ...). Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let k: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        let field = match k.as_str() {
            "name" | "nume" => Field::Name,
            "affiliation" | "afiliere" | "party" | "partid" => Field::Affiliation,
            "credibility" | "credibilitate" => Field::Credibility,
            "totalstatements" | "statements" | "numardeclaratii" => Field::TotalStatements,
            "true" | "adevarate" => Field::True,
            "partiallytrue" | "partialadevarate" => Field::PartiallyTrue,
            "truncated" | "trunchiate" => Field::Truncated,
            "false" => Field::False,
            "unverifiable" | "imposibildeverificat" => Field::Unverifiable,
            _ => return Err(Error::UnknownSortKey(s.to_string())),
        };
        Ok(field)
    }
}

impl TryFrom<String> for Field {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<Field> for String {
    fn from(f: Field) -> Self { f.key().to_string() }
}
