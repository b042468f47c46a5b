// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

use crate::config::consts::{DEFAULT_CONFIG_FILE, DEFAULT_INPUT_FILE};
use crate::config::{DashboardOptions, ExportFormat};
use crate::data::{DataManager, Scope};
use crate::filter::FilterCriteria;
use crate::normalize::NormalizeReport;
use crate::paginate::{Page, PageSize, PageWindow};
use crate::record::{Field, Record};
use crate::sort::SortDirection;
use crate::stats::{PartyAggregate, PartyBreakdown, SummaryStatistics};

#[derive(Parser, Debug)]
#[command(name = "credstats", version, about = "Statement-credibility statistics from a CSV/TSV export")]
pub struct Cli {
    /// Tabular source (header row + one person per row)
    #[arg(short, long, default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    /// TOML options file; missing file means defaults
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Column delimiter (default: detect from the header line)
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Totals and averages
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Per-party counts and credibility
    Parties {
        #[command(flatten)]
        filters: FilterArgs,
        /// Include summed verdicts and statement credibility
        #[arg(long)]
        breakdown: bool,
        #[arg(long)]
        json: bool,
    },
    /// Sorted, paginated table
    Table {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        order: OrderArgs,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Rows per page, or "all"
        #[arg(long)]
        per_page: Option<PageSize>,
        #[arg(long)]
        json: bool,
    },
    /// Credibility ranking, one page at a time
    Top {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        json: bool,
    },
    /// Write the (filtered, sorted) records back out
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        order: OrderArgs,
        /// Output file or directory
        #[arg(short, long, default_value = "")]
        out: String,
        #[arg(long)]
        tsv: bool,
    },
    /// What the loader kept, dropped and coerced
    Report {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Exact party/affiliation
    #[arg(long)]
    pub party: Option<String>,
    /// Minimum credibility (inclusive)
    #[arg(long, value_parser = finite_bound)]
    pub min_credibility: Option<f64>,
    /// Name contains (case-insensitive)
    #[arg(long)]
    pub name: Option<String>,
    /// Minimum number of statements (inclusive)
    #[arg(long)]
    pub min_statements: Option<u32>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            affiliation: self.party.clone(),
            min_credibility: self.min_credibility,
            name_contains: self.name.clone(),
            min_statements: self.min_statements,
        }
    }
}

fn finite_bound(s: &str) -> std::result::Result<f64, String> {
    let v: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() { Ok(v) } else { Err(format!("expected a finite number, got {s}")) }
}

#[derive(Args, Debug, Default)]
pub struct OrderArgs {
    /// Sort field (name, affiliation, credibility, totalStatements, true, ...)
    #[arg(long)]
    pub sort: Option<Field>,
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,
    #[arg(long)]
    pub desc: bool,
}

impl OrderArgs {
    fn resolve(&self, opts: &DashboardOptions) -> (Field, SortDirection) {
        let dir = if self.asc {
            SortDirection::Ascending
        } else if self.desc {
            SortDirection::Descending
        } else {
            opts.sort_direction
        };
        (self.sort.unwrap_or(opts.sort_key), dir)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let mut options = DashboardOptions::load(&cli.config)
        .wrap_err_with(|| format!("reading {}", cli.config.display()))?;
    if cli.delimiter.is_some() {
        options.delimiter = cli.delimiter;
    }

    let text = crate::file::read_input(&cli.input)
        .wrap_err_with(|| format!("reading {}", cli.input.display()))?;
    let mut mgr = DataManager::load_str(&text, options)
        .wrap_err_with(|| format!("loading {}", cli.input.display()))?;

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Summary { filters, json } => {
            narrow(&mut mgr, &filters);
            let s = mgr.statistics(Scope::Filtered);
            if json { emit_json(&mut out, &s)? } else { print_summary(&mut out, &s)? }
        }
        Command::Parties { filters, breakdown, json } => {
            narrow(&mut mgr, &filters);
            if breakdown {
                let bd = mgr.party_breakdown(Scope::Filtered);
                if json { emit_json(&mut out, &bd)? } else { print_breakdown(&mut out, &bd)? }
            } else {
                let ps = mgr.party_statistics(Scope::Filtered);
                if json { emit_json(&mut out, &ps)? } else { print_parties(&mut out, &ps)? }
            }
        }
        Command::Table { filters, order, page, per_page, json } => {
            narrow(&mut mgr, &filters);
            let (key, dir) = order.resolve(mgr.options());
            let size = per_page.unwrap_or(mgr.options().table_page_size);
            let sorted = mgr.sorted(Scope::Filtered, key, dir);
            let pg = crate::paginate::paginate(&sorted, page, size);
            let window = mgr.window_for(&pg);
            if json { emit_json(&mut out, &pg)? } else { print_page(&mut out, &pg, window.as_ref())? }
        }
        Command::Top { filters, page, json } => {
            narrow(&mut mgr, &filters);
            let pg = mgr.top_page(page);
            let window = mgr.window_for(&pg);
            if json { emit_json(&mut out, &pg)? } else { print_page(&mut out, &pg, window.as_ref())? }
        }
        Command::Export { filters, order, out: dest, tsv } => {
            narrow(&mut mgr, &filters);
            let (key, dir) = order.resolve(mgr.options());
            let sorted = mgr.sorted(Scope::Filtered, key, dir);
            let format = if tsv { ExportFormat::Tsv } else { ExportFormat::Csv };
            let path = crate::file::write_export(&dest, &sorted, format)?;
            writeln!(out, "Wrote {} records to {}", sorted.len(), path.display())?;
        }
        Command::Report { json } => {
            let r = mgr.report().clone();
            if json { emit_json(&mut out, &r)? } else { print_report(&mut out, &r)? }
        }
    }
    out.flush()?;
    Ok(())
}

/// Command-line filters layered over the configured ones.
fn narrow(mgr: &mut DataManager, args: &FilterArgs) {
    let merged = mgr.options().filters.merge(&args.criteria());
    mgr.apply_filters(merged);
}

fn emit_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}

/* ---------------- Plain-text output ---------------- */

fn print_summary<W: Write>(w: &mut W, s: &SummaryStatistics) -> io::Result<()> {
    writeln!(w, "People:                     {}", s.total_count)?;
    writeln!(w, "Average credibility:        {:.1}%", s.avg_credibility)?;
    writeln!(w, "Statement credibility:      {:.1}%", s.avg_statement_credibility)?;
    writeln!(w, "Statements:                 {}", s.total_statements)?;
    writeln!(w, "  true:                     {}", s.total_true)?;
    writeln!(w, "  partially true:           {}", s.total_partially_true)?;
    writeln!(w, "  truncated:                {}", s.total_truncated)?;
    writeln!(w, "  false:                    {}", s.total_false)?;
    writeln!(w, "  unverifiable:             {}", s.total_unverifiable)
}

fn print_parties<W: Write>(w: &mut W, ps: &[PartyAggregate]) -> io::Result<()> {
    writeln!(w, "{:<28} {:>6} {:>8}", "Party", "People", "Cred%")?;
    for p in ps {
        writeln!(w, "{:<28} {:>6} {:>8.1}", p.affiliation, p.count, p.average_credibility)?;
    }
    Ok(())
}

fn print_breakdown<W: Write>(w: &mut W, bd: &[PartyBreakdown]) -> io::Result<()> {
    writeln!(
        w, "{:<28} {:>6} {:>8} {:>8} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "Party", "People", "Cred%", "Stmt%", "Total", "True", "Part", "Trunc", "False", "Unver"
    )?;
    for p in bd {
        let o = &p.outcomes;
        writeln!(
            w, "{:<28} {:>6} {:>8.1} {:>8.1} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
            p.affiliation, p.count, p.average_credibility, p.statement_credibility, p.total_statements,
            o.true_count, o.partially_true_count, o.truncated_count, o.false_count, o.unverifiable_count
        )?;
    }
    Ok(())
}

fn print_page<W: Write>(w: &mut W, pg: &Page<Record>, window: Option<&PageWindow>) -> io::Result<()> {
    writeln!(
        w, "{:<30} {:<16} {:>7} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "Name", "Party", "Cred%", "Total", "True", "Part", "Trunc", "False", "Unver"
    )?;
    for r in &pg.items {
        writeln!(
            w, "{:<30} {:<16} {:>7.1} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
            r.name, r.affiliation, r.credibility_percent, r.total_statements, r.true_count,
            r.partially_true_count, r.truncated_count, r.false_count, r.unverifiable_count
        )?;
    }
    writeln!(w, "-- page {}/{} ({} records)", pg.page_index, pg.total_pages, pg.total_items)?;
    if let Some(win) = window {
        writeln!(w, "{}", pager_line(win, pg.total_pages))?;
    }
    Ok(())
}

/// `‹ 1 … 4 5 [6] 7 8 … 10 ›`
fn pager_line(win: &PageWindow, total_pages: usize) -> String {
    let mut parts: Vec<String> = Vec::new();
    if win.prev.is_some() { parts.push("‹".into()); }
    if win.first { parts.push("1".into()); }
    if win.leading_gap { parts.push("…".into()); }
    for i in win.start..=win.end {
        if i == win.current { parts.push(format!("[{i}]")) } else { parts.push(i.to_string()) }
    }
    if win.trailing_gap { parts.push("…".into()); }
    if win.last { parts.push(total_pages.to_string()); }
    if win.next.is_some() { parts.push("›".into()); }
    parts.join(" ")
}

fn print_report<W: Write>(w: &mut W, r: &NormalizeReport) -> io::Result<()> {
    writeln!(w, "Rows read:                  {}", r.rows_read)?;
    writeln!(w, "Accepted:                   {}", r.accepted)?;
    writeln!(w, "Dropped, blank name:        {}", r.dropped_blank_name)?;
    writeln!(w, "Dropped, no statements:     {}", r.dropped_no_statements)?;
    writeln!(w, "Coerced numeric cells:      {}", r.coerced_fields)?;
    writeln!(w, "Credibility outside 0-100:  {}", r.credibility_out_of_range)?;
    if !r.unmatched_headers.is_empty() {
        writeln!(w, "Ignored columns:            {}", r.unmatched_headers.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_flags_parse() {
        let cli = Cli::try_parse_from([
            "credstats", "-i", "data.tsv", "-vv", "table",
            "--party", "PNL", "--sort", "numarDeclaratii", "--asc", "--page", "3", "--per-page", "all",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.input, PathBuf::from("data.tsv"));
        let Command::Table { filters, order, page, per_page, json } = cli.command else {
            panic!("expected table");
        };
        assert_eq!(filters.criteria().affiliation.as_deref(), Some("PNL"));
        let (key, dir) = order.resolve(&DashboardOptions::default());
        assert_eq!((key, dir), (Field::TotalStatements, SortDirection::Ascending));
        assert_eq!((page, per_page, json), (3, Some(PageSize::All), false));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Cli::try_parse_from(["credstats", "table", "--sort", "height"]).is_err());
        assert!(Cli::try_parse_from(["credstats", "table", "--per-page", "0"]).is_err());
        assert!(Cli::try_parse_from(["credstats", "table", "--asc", "--desc"]).is_err());
        assert!(Cli::try_parse_from(["credstats", "summary", "--min-credibility", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["credstats", "summary", "--min-credibility", "inf"]).is_err());
        assert!(Cli::try_parse_from(["credstats", "summary", "--min-credibility", "-12.5"]).is_ok());
    }

    #[test]
    fn order_falls_back_to_options() {
        let opts = DashboardOptions::default();
        assert_eq!(OrderArgs::default().resolve(&opts), (opts.sort_key, opts.sort_direction));
    }

    #[test]
    fn pager_line_marks_current_page() {
        let win = crate::paginate::page_window(6, 10, 5).unwrap();
        assert_eq!(pager_line(&win, 10), "‹ 1 … 4 5 [6] 7 8 … 10 ›");
        let win = crate::paginate::page_window(1, 3, 5).unwrap();
        assert_eq!(pager_line(&win, 3), "[1] 2 3 ›");
    }
}
