use kpi_core::core::priority::{SortDirection, SortField};
use kpi_core::dataset;
use kpi_core::KpiEngine;
use serde_json::json;
use std::io::{self, Write};
use std::path::Path;

// One-shot reporting tool for pipelines and cron jobs.
// Usage: kpi_report [records.json] [weights.json]
// The full report goes to stdout as JSON; logs go to stderr.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut engine = match args.get(1) {
        Some(path) => match dataset::load_records(Path::new(path)) {
            Ok(records) => KpiEngine::with_records(records),
            Err(e) => {
                eprintln!("could not read records from '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => KpiEngine::with_records(dataset::sample_records()),
    };

    if let Some(path) = args.get(2) {
        if let Err(e) = engine.load_weights_from(path) {
            eprintln!("could not read weights from '{}': {}", path, e);
            std::process::exit(1);
        }
    }

    let report = json!({
        "teams": engine.teams(),
        "glossary": engine.glossary(),
        "priority": engine.priority_sorted(SortField::PriorityIndex, SortDirection::Descending),
        "analysis": engine.analyze(),
        "scenarios": engine.scenarios(),
    });

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = serde_json::to_writer_pretty(&mut handle, &report) {
        eprintln!("could not write report: {}", e);
        std::process::exit(1);
    }
    let _ = writeln!(handle);
}
