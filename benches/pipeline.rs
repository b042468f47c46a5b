// benches/pipeline.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use credstats::config::DashboardOptions;
use credstats::{
    apply_filters, normalize_rows, paginate, sort_by, summary_statistics, tabular, Field,
    FilterCriteria, PageSize, SortDirection,
};

const PARTIES: &[&str] = &["PSD", "PNL", "USR", "AUR", "UDMR", ""];

/// Synthetic export in the dashboard's native column layout.
fn sample(rows: usize) -> String {
    let mut s = String::from(
        "Nume,Afiliere,Credibilitate,Număr declarații,Imposibil de verificat,False,Trunchiate,Parțial adevărate,Adevărate\n",
    );
    for i in 0..rows {
        let total = (i % 40) as u32;
        let t = total / 2;
        let p = total / 4;
        let f = total - t - p;
        s.push_str(&format!(
            "Person {i},{},\"{},{}%\",{total},0,{f},0,{p},{t}\n",
            PARTIES[i % PARTIES.len()],
            (i * 7) % 101,
            i % 10,
        ));
    }
    s
}

fn bench_pipeline(c: &mut Criterion) {
    let text = sample(5_000);
    let rows = tabular::read_rows(&text, None).expect("sample parses");
    let records = normalize_rows(&rows).records;
    let criteria = FilterCriteria { min_statements: Some(5), ..Default::default() };

    c.bench_function("read_rows", |b| {
        b.iter(|| tabular::read_rows(black_box(&text), None).map(|r| r.len()))
    });

    c.bench_function("normalize_rows", |b| {
        b.iter(|| normalize_rows(black_box(&rows)).records.len())
    });

    c.bench_function("summary_statistics", |b| {
        b.iter(|| summary_statistics(black_box(&records)).total_statements)
    });

    c.bench_function("filter_sort_page", |b| {
        b.iter(|| {
            let filtered = apply_filters(black_box(&records), &criteria);
            let sorted = sort_by(&filtered, Field::Credibility, SortDirection::Descending);
            paginate(&sorted, 3, PageSize::fixed(50).expect("non-zero")).items.len()
        })
    });

    c.bench_function("load_str", |b| {
        b.iter(|| {
            credstats::DataManager::load_str(black_box(&text), DashboardOptions::default())
                .map(|m| m.canonical().len())
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
