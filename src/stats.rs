// src/stats.rs
//! Summary numbers and per-party rollups over any slice of records.
//! Everything here is a pure function of its input.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Credit (0–100) given to each verdict when scoring statements.
///
/// The default gives truncated statements no credit. The dashboard stat card
/// once used 25 for truncated; set `truncated_weight = 25.0` to get that.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StatementWeights {
    pub true_weight: f64,
    pub partially_true_weight: f64,
    pub truncated_weight: f64,
    pub false_weight: f64,
}

impl Default for StatementWeights {
    fn default() -> Self {
        Self {
            true_weight: 100.0,
            partially_true_weight: 50.0,
            truncated_weight: 0.0,
            false_weight: 0.0,
        }
    }
}

impl StatementWeights {
    /// Weighted score over `total` statements; 0 when `total` is 0.
    pub fn score(&self, t: &OutcomeTotals, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let sum = self.true_weight * t.true_count as f64
            + self.partially_true_weight * t.partially_true_count as f64
            + self.truncated_weight * t.truncated_count as f64
            + self.false_weight * t.false_count as f64;
        sum / total as f64
    }
}

/// Sums of the five verdict counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeTotals {
    pub true_count: u64,
    pub partially_true_count: u64,
    pub truncated_count: u64,
    pub false_count: u64,
    pub unverifiable_count: u64,
}

impl OutcomeTotals {
    fn add(&mut self, r: &Record) {
        self.true_count += u64::from(r.true_count);
        self.partially_true_count += u64::from(r.partially_true_count);
        self.truncated_count += u64::from(r.truncated_count);
        self.false_count += u64::from(r.false_count);
        self.unverifiable_count += u64::from(r.unverifiable_count);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    pub total_count: usize,
    pub avg_credibility: f64,
    pub avg_statement_credibility: f64,
    pub total_statements: u64,
    pub total_true: u64,
    pub total_false: u64,
    pub total_partially_true: u64,
    pub total_truncated: u64,
    pub total_unverifiable: u64,
}

fn mean_credibility<'a>(records: impl IntoIterator<Item = &'a Record>) -> f64 {
    let (sum, n) = records
        .into_iter()
        .fold((0.0f64, 0usize), |(s, n), r| (s + r.credibility_percent, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Summary with the default statement weights.
pub fn summary_statistics(set: &[Record]) -> SummaryStatistics {
    summary_statistics_weighted(set, &StatementWeights::default())
}

pub fn summary_statistics_weighted(set: &[Record], weights: &StatementWeights) -> SummaryStatistics {
    let mut totals = OutcomeTotals::default();
    let mut total_statements = 0u64;
    for r in set {
        totals.add(r);
        total_statements += u64::from(r.total_statements);
    }

    SummaryStatistics {
        total_count: set.len(),
        avg_credibility: mean_credibility(set),
        avg_statement_credibility: weights.score(&totals, total_statements),
        total_statements,
        total_true: totals.true_count,
        total_false: totals.false_count,
        total_partially_true: totals.partially_true_count,
        total_truncated: totals.truncated_count,
        total_unverifiable: totals.unverifiable_count,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyAggregate {
    pub affiliation: String,
    pub count: usize,
    pub average_credibility: f64,
}

/// Full rollup for one party: counts, sums and both credibility flavours.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyBreakdown {
    pub affiliation: String,
    pub count: usize,
    pub average_credibility: f64,
    pub statement_credibility: f64,
    pub total_statements: u64,
    pub outcomes: OutcomeTotals,
}

/// Records grouped by non-blank affiliation.
/// Groups come out by descending size, ties in first-seen order.
fn group_by_party(set: &[Record]) -> Vec<(&str, Vec<&Record>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Record>)> = Vec::new();

    for r in set {
        let party = r.affiliation.as_str();
        if party.trim().is_empty() { continue; }
        match index.get(party) {
            Some(&i) => groups[i].1.push(r),
            None => {
                index.insert(party, groups.len());
                groups.push((party, vec![r]));
            }
        }
    }

    // stable: equal sizes keep first-seen order
    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    groups
}

pub fn party_statistics(set: &[Record]) -> Vec<PartyAggregate> {
    group_by_party(set)
        .into_iter()
        .map(|(party, members)| PartyAggregate {
            affiliation: party.to_string(),
            count: members.len(),
            average_credibility: mean_credibility(members.iter().copied()),
        })
        .collect()
}

pub fn party_breakdown(set: &[Record], weights: &StatementWeights) -> Vec<PartyBreakdown> {
    group_by_party(set)
        .into_iter()
        .map(|(party, members)| {
            let mut outcomes = OutcomeTotals::default();
            let mut total_statements = 0u64;
            for r in &members {
                outcomes.add(r);
                total_statements += u64::from(r.total_statements);
            }
            PartyBreakdown {
                affiliation: party.to_string(),
                count: members.len(),
                average_credibility: mean_credibility(members.iter().copied()),
                statement_credibility: weights.score(&outcomes, total_statements),
                total_statements,
                outcomes,
            }
        })
        .collect()
}

/// Distinct non-blank affiliations, sorted. Feeds the party filter choices.
pub fn parties(set: &[Record]) -> Vec<String> {
    set.iter()
        .map(|r| r.affiliation.as_str())
        .filter(|p| !p.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, party: &str, cred: f64, total: u32, t: u32, p: u32, tr: u32, f: u32) -> Record {
        Record {
            name: name.into(),
            affiliation: party.into(),
            credibility_percent: cred,
            total_statements: total,
            true_count: t,
            partially_true_count: p,
            truncated_count: tr,
            false_count: f,
            unverifiable_count: 0,
        }
    }

    #[test]
    fn empty_set_is_all_zero() {
        let s = summary_statistics(&[]);
        assert_eq!(s.total_count, 0);
        assert_eq!(s.avg_credibility, 0.0);
        assert_eq!(s.avg_statement_credibility, 0.0);
        assert_eq!(s.total_statements, 0);
    }

    #[test]
    fn statement_credibility_uses_weights() {
        let set = vec![rec("A", "X", 0.0, 10, 4, 2, 4, 0)];
        // (100*4 + 50*2) / 10
        assert_eq!(summary_statistics(&set).avg_statement_credibility, 50.0);

        let w = StatementWeights { truncated_weight: 25.0, ..Default::default() };
        // (400 + 100 + 100) / 10
        assert_eq!(summary_statistics_weighted(&set, &w).avg_statement_credibility, 60.0);
    }

    #[test]
    fn parties_grouped_by_size_then_first_seen() {
        let set = vec![
            rec("a", "Beta", 10.0, 1, 0, 0, 0, 0),
            rec("b", "Alpha", 20.0, 1, 0, 0, 0, 0),
            rec("c", "Alpha", 40.0, 1, 0, 0, 0, 0),
            rec("d", "", 99.0, 1, 0, 0, 0, 0),
            rec("e", "Gamma", 50.0, 1, 0, 0, 0, 0),
        ];
        let ps = party_statistics(&set);
        let names: Vec<&str> = ps.iter().map(|p| p.affiliation.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(ps[0].count, 2);
        assert_eq!(ps[0].average_credibility, 30.0);

        assert_eq!(parties(&set), vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn breakdown_sums_per_party() {
        let set = vec![
            rec("a", "X", 80.0, 10, 8, 0, 0, 2),
            rec("b", "X", 40.0, 10, 2, 4, 0, 4),
            rec("c", "Y", 0.0, 5, 0, 0, 0, 5),
        ];
        let bd = party_breakdown(&set, &StatementWeights::default());
        assert_eq!(bd[0].affiliation, "X");
        assert_eq!(bd[0].total_statements, 20);
        assert_eq!(bd[0].outcomes.true_count, 10);
        // (100*10 + 50*4) / 20
        assert_eq!(bd[0].statement_credibility, 60.0);
        assert_eq!(bd[0].average_credibility, 60.0);
        assert_eq!(bd[1].statement_credibility, 0.0);
    }
}
