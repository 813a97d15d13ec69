use crossterm::style::Stylize;
use kpi_core::core::types::KpiRecord;
use kpi_core::dataset;
use kpi_core::KpiEngine;
use std::io::{stdin, stdout, Write};
use std::path::Path;

const RECORDS_PATH: &str = "team_kpis.json";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut engine = KpiEngine::from_file_or_new(RECORDS_PATH);
    if engine.records().is_empty() {
        // No saved data yet, start from the bundled sample set.
        engine.set_records(dataset::sample_records());
    }

    println!("KPI Alignment Console. Type 'help' for commands, 'exit' to save and quit.");
    println!("-------------------------------------------------------------------------");
    println!(
        "{} records across teams: {}",
        engine.records().len(),
        engine.teams().join(", ")
    );

    loop {
        print!("\n> ");
        stdout().flush().unwrap();

        let mut input = String::new();
        if stdin().read_line(&mut input).unwrap() == 0 {
            break;
        }
        let line = input.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "exit" => break,
            "" => {}
            "help" => print_help(),
            "list" => print_records(&engine),
            "teams" => println!("{}", engine.teams().join(", ")),
            "add" => add_record(&mut engine),
            "glossary" => print_glossary(&engine, rest),
            "priority" => print_priority(&engine, rest),
            "conflicts" => print_analysis(&engine),
            "scenarios" => print_scenarios(&engine),
            "translate" => run_translate(&engine),
            "weights" => print_weights(&engine),
            "weight" => set_weight(&mut engine, rest),
            "reset-weights" => {
                engine.reset_weights();
                println!("Weights reset to defaults.");
            }
            "save" => save_records(&engine, pick_path(rest, RECORDS_PATH)),
            "load" => load_records(&mut engine, rest),
            "export" => export_glossary(&engine, pick_path(rest, "kpi_glossary.csv")),
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    println!("\nSaving records...");
    if let Err(e) = dataset::save_records(engine.records(), Path::new(RECORDS_PATH)) {
        eprintln!("[ERROR] Could not save records: {}", e);
    } else {
        println!("Records saved to '{}'", RECORDS_PATH);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list                  show all records");
    println!("  add                   add a record (guided)");
    println!("  teams                 list teams");
    println!("  glossary [query]      unified glossary, optionally filtered");
    println!("  priority [query]      priority index clusters, optionally filtered");
    println!("  conflicts             conflict analysis and recommendations");
    println!("  scenarios             cross-team scenario cards");
    println!("  translate             translate a message between team contexts");
    println!("  weights               show team weights");
    println!("  weight <team> <n>     set a team weight (0.1 to 3.0)");
    println!("  reset-weights         restore default weights");
    println!("  save [path]           save records as JSON");
    println!("  load <path>           load records from JSON");
    println!("  export [path]         export the glossary as CSV");
    println!("  exit                  save and quit");
}

fn print_records(engine: &KpiEngine) {
    for (i, record) in engine.records().iter().enumerate() {
        println!(
            "  {:>2}. [{}] {}: {}",
            i + 1,
            record.team,
            record.metric_name.as_str().bold(),
            record.definition
        );
    }
}

fn add_record(engine: &mut KpiEngine) {
    let team = prompt("Team: ");
    let metric_name = prompt("KPI name: ");
    let definition = prompt("Definition: ");

    if team.is_empty() || metric_name.is_empty() || definition.is_empty() {
        println!("Please fill in the required fields: Team, KPI Name, and Definition");
        return;
    }

    engine.add_record(KpiRecord::new(&team, &metric_name, &definition));
    println!("Added. {} records total.", engine.records().len());
}

fn print_glossary(engine: &KpiEngine, query: &str) {
    let entries = engine.glossary();
    let shown: Vec<_> = entries.iter().filter(|e| e.matches(query)).collect();
    println!("{} standardized metrics, {} shown", entries.len(), shown.len());

    for entry in shown {
        println!("\n  {}", entry.standard_name.as_str().bold());
        println!("    Teams: {}", entry.teams.join(", "));
        println!("    Known as: {}", entry.original_metric_names.join(", "));
        println!("    Standard definition: {}", entry.standard_definition);
    }
}

fn print_priority(engine: &KpiEngine, query: &str) {
    for (_, members) in engine.priority_clusters() {
        let lead = &members[0];
        if !query.is_empty() && !members.iter().any(|m| m.matches(query)) {
            continue;
        }

        print!(
            "\n  {}  index {:.1}  total weight {:.1}  {} definition(s)",
            lead.record.metric_name.as_str().bold(),
            lead.priority_index,
            lead.total_team_weight,
            lead.definition_variant_count
        );
        if lead.definition_variant_count > 1 {
            print!("  {}", "[misaligned]".yellow());
        } else if members.len() > 1 {
            print!("  {}", "[aligned]".green());
        }
        println!();

        for member in &members {
            println!(
                "    [{}] weight {:.1}: {}",
                member.record.team, member.team_weight, member.record.definition
            );
        }
    }
}

fn print_analysis(engine: &KpiEngine) {
    let analysis = engine.analyze();

    if analysis.conflicts.is_empty() {
        println!("{}", "No conflicting definitions detected.".green());
        return;
    }

    for conflict in &analysis.conflicts {
        println!("\n{} {}", "[conflict]".red(), conflict.description);
        for detail in &conflict.details {
            println!("    [{}] {}", detail.team, detail.definition);
        }
        println!("  Impact: {}", conflict.impact);
    }

    println!("\n{}", "Recommendations".bold());
    for rec in &analysis.recommendations {
        println!(
            "\n  {} (definition from {})",
            rec.metric_name.as_str().bold(),
            rec.source_team
        );
        println!("    Recommended: {}", rec.recommended_definition);
        if !rec.alternative_names.is_empty() {
            println!("    Also known as: {}", rec.alternative_names.join(", "));
        }
        for (i, step) in rec.implementation_steps.iter().enumerate() {
            println!("    {}. {}", i + 1, step);
        }
    }
}

fn print_scenarios(engine: &KpiEngine) {
    let scenarios = engine.scenarios();
    if scenarios.is_empty() {
        println!("Not enough related metrics to build scenarios.");
        return;
    }

    for scenario in scenarios {
        println!("\n{}", scenario.title.as_str().bold());
        println!("  Scenario: {}", scenario.real_world_example);
        for detail in &scenario.conflict_details {
            println!(
                "  {} {}",
                format!("[{}]", detail.teams.join(" / ")).cyan(),
                detail.conflict
            );
        }
        println!("  Related KPIs: {}", scenario.metrics.len());
    }
}

fn run_translate(engine: &KpiEngine) {
    println!("Teams: {}", engine.teams().join(", "));
    let from = prompt("From team: ");
    let to = prompt("To team: ");
    let message = prompt("Message: ");

    match engine.translate(&message, &from, &to) {
        Ok(result) => {
            println!("\n  {}", result.translated_message.as_str().bold());
            for term in &result.matched_terms {
                println!(
                    "\n  {} ({}) -> {} ({})",
                    term.original_term, term.from_context, term.to_term, term.to_context
                );
                println!("    {}", term.from_definition);
                println!("    {}", term.to_definition);
            }
        }
        Err(e) => println!("{}", e),
    }
}

fn print_weights(engine: &KpiEngine) {
    for team in engine.teams() {
        println!("  {:<20} {:.1}", team, engine.weights().weight_for(&team));
    }
}

fn set_weight(engine: &mut KpiEngine, rest: &str) {
    let (team, value) = match rest.rsplit_once(' ') {
        Some(pair) => pair,
        None => {
            println!("Usage: weight <team> <value>");
            return;
        }
    };
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => {
            let clamped = parsed.clamp(0.1, 3.0);
            engine.set_weight(team.trim(), clamped);
            println!("{} weight set to {:.1}", team.trim(), clamped);
        }
        _ => println!("'{}' is not a usable weight.", value),
    }
}

fn save_records(engine: &KpiEngine, path: &str) {
    match dataset::save_records(engine.records(), Path::new(path)) {
        Ok(()) => println!("Saved {} records to '{}'", engine.records().len(), path),
        Err(e) => println!("Could not save: {}", e),
    }
}

fn load_records(engine: &mut KpiEngine, path: &str) {
    if path.is_empty() {
        println!("Usage: load <path>");
        return;
    }
    match dataset::load_records(Path::new(path)) {
        Ok(records) => {
            println!("Loaded {} records from '{}'", records.len(), path);
            engine.set_records(records);
        }
        Err(e) => println!("Could not load: {}", e),
    }
}

fn export_glossary(engine: &KpiEngine, path: &str) {
    match dataset::export_glossary_csv(&engine.glossary(), Path::new(path)) {
        Ok(()) => println!("Glossary exported to '{}'", path),
        Err(e) => println!("Could not export: {}", e),
    }
}

fn pick_path<'a>(rest: &'a str, default: &'a str) -> &'a str {
    if rest.is_empty() {
        default
    } else {
        rest
    }
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    stdout().flush().unwrap();
    let mut input = String::new();
    stdin().read_line(&mut input).unwrap();
    input.trim().to_string()
}
