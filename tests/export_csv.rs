// tests/export_csv.rs
use std::fs;

use credstats::config::{DashboardOptions, ExportFormat};
use credstats::file::{read_input, resolve_out_path, write_export};
use credstats::{DataManager, Field, Scope, SortDirection};

const SOURCE: &str = "\u{feff}Nume;Afiliere;Credibilitate;Număr declarații;Imposibil de verificat;False;Trunchiate;Parțial adevărate;Adevărate\n\
\n\
\"Popescu, Ion\";PSD;\"72,5%\";8;1;1;0;1;5\n\
Ionescu Ana;PNL;40%;5;0;3;0;0;2\n";

fn manager() -> DataManager {
    DataManager::load_str(SOURCE, DashboardOptions::default()).unwrap()
}

#[test]
fn csv_export_reads_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = manager();
    let out = dir.path().join("stats.csv");

    let written = write_export(out.to_str().unwrap(), mgr.canonical(), ExportFormat::Csv).unwrap();
    assert_eq!(written, out);

    let text = read_input(&written).unwrap();
    assert!(text.starts_with("Nume,Afiliere,Credibilitate,Număr declarații"));
    assert!(text.contains("\"Popescu, Ion\",PSD,72.5%,8"));

    let again = DataManager::load_str(&text, DashboardOptions::default()).unwrap();
    assert_eq!(again.canonical(), mgr.canonical());
}

#[test]
fn tsv_export_into_directory_uses_default_name() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = manager();
    let hint = format!("{}/nested/", dir.path().display());

    let sorted = mgr.sorted(Scope::All, Field::Name, SortDirection::Ascending);
    let written = write_export(&hint, &sorted, ExportFormat::Tsv).unwrap();
    assert!(written.ends_with("nested/politician_stats.tsv"));

    let text = fs::read_to_string(&written).unwrap();
    let second = text.lines().nth(1).unwrap();
    assert!(second.starts_with("Ionescu Ana\tPNL\t40%"));

    let again = DataManager::load_str(&text, DashboardOptions::default()).unwrap();
    assert_eq!(again.canonical().records(), sorted.as_slice());
}

#[test]
fn out_path_rules() {
    assert_eq!(resolve_out_path("", ExportFormat::Csv).unwrap().to_str(), Some("politician_stats.csv"));
    assert_eq!(resolve_out_path("  ", ExportFormat::Tsv).unwrap().to_str(), Some("politician_stats.tsv"));

    let dir = tempfile::tempdir().unwrap();
    let existing = resolve_out_path(dir.path().to_str().unwrap(), ExportFormat::Csv).unwrap();
    assert_eq!(existing, dir.path().join("politician_stats.csv"));

    // explicit file names keep their extension whatever the format
    let named = dir.path().join("keep.txt");
    let p = resolve_out_path(named.to_str().unwrap(), ExportFormat::Tsv).unwrap();
    assert_eq!(p, named);
}

#[test]
fn file_in_the_way_of_a_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "x").unwrap();
    let hint = format!("{}/", blocker.display());
    assert!(resolve_out_path(&hint, ExportFormat::Csv).is_err());
    assert!(matches!(
        credstats::file::ensure_directory(&blocker),
        Err(credstats::Error::Config(_))
    ));
}

#[test]
fn non_utf8_input_is_decoded_lossily() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin.csv");
    let mut bytes = b"Nume,Afiliere,Credibilitate,Numr declaraii\nM".to_vec();
    bytes.push(0xE9); // latin-1 é
    bytes.extend_from_slice(b"lan,X,10%,2\n");
    fs::write(&path, bytes).unwrap();

    let text = read_input(&path).unwrap();
    let mgr = DataManager::load_str(&text, DashboardOptions::default()).unwrap();
    assert_eq!(mgr.canonical().len(), 1);
    assert_eq!(mgr.canonical()[0].name, "M\u{fffd}lan");

    assert!(read_input(&dir.path().join("missing.csv")).is_err());
}

#[test]
fn export_keeps_full_credibility_precision() {
    let text = "Nume,Afiliere,Credibilitate,Număr declarații\n\
                A,X,33.3333%,3\n\
                B,Y,\"66,66666666666667\",3\n\
                C,Z,0.1,1\n";
    let mgr = DataManager::load_str(text, DashboardOptions::default()).unwrap();
    assert_eq!(mgr.canonical()[0].credibility_percent, 33.3333);

    let out = credstats::tabular::write_records(mgr.canonical(), b',').unwrap();
    assert!(out.contains("A,X,33.3333%,3"));
    assert!(out.contains("C,Z,0.1%,1"));

    let again = DataManager::load_str(&out, DashboardOptions::default()).unwrap();
    assert_eq!(again.canonical(), mgr.canonical());
}
