use std::fs;
use std::path::Path;
use std::process;

#[macro_use]
mod log;

use cli::{Commands, parse_args};
use models::Summaries;

fn main() {
    if let Err(e) = run() {
        error!("{e}");
        process::exit(1);
    }
}

fn run() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = parse_args();

    match args.command {
        Commands::Analyze { input } => {
            let records = analytics::load_csv_path(Path::new(&input))?;
            let summaries = analytics::aggregate(&records);
            print_summary(&summaries, records.len());
        }

        Commands::View { input } => {
            let records = analytics::load_csv_path(Path::new(&input))?;
            let summaries = analytics::aggregate(&records);
            let findings = analytics::valid_findings(&records);
            if findings.is_empty() {
                info!("No valid findings in {} (showing an empty dashboard)", input);
            }
            tui::run_with_data(summaries, findings)?;
        }

        Commands::Export { input, output, format } => {
            let records = analytics::load_csv_path(Path::new(&input))?;
            let summaries = analytics::aggregate(&records);

            let payload = match format.as_str() {
                "json" => analytics::summaries_to_json(&summaries)?,
                "csv" => analytics::distributions_to_csv(&summaries),
                "findings" => analytics::findings_to_csv(&analytics::valid_findings(&records)),
                other => {
                    error!("Unknown export format: {} (expected json, csv, or findings)", other);
                    process::exit(1);
                }
            };
            fs::write(&output, payload)?;
            success!("Exported {} summaries to {}", format, output);
        }

        Commands::Report { input, template, output } => {
            let records = analytics::load_csv_path(Path::new(&input))?;
            let summaries = analytics::aggregate(&records);

            if summaries.metrics.total_issues == 0 {
                error!("No valid findings in {}", input);
                process::exit(1);
            }

            info!("Generating report for {} finding(s)…", summaries.metrics.total_issues);
            analytics::generate_report(
                &summaries,
                template.as_deref().map(Path::new),
                Path::new(&output),
            )?;
            success!("Report written to {}", output);
        }
    }

    Ok(())
}

/// Print the key metrics and every distribution to the console.
fn print_summary(summaries: &Summaries, raw_rows: usize) {
    let metrics = &summaries.metrics;

    success!("{} valid finding(s) from {} row(s)", metrics.total_issues, raw_rows);
    info!(
        "critical: {}  high: {}  hosts: {}  protocols: {}  CVEs: {}",
        metrics.critical_issues,
        metrics.high_issues,
        metrics.unique_ips,
        metrics.unique_protocols,
        metrics.unique_cves
    );

    let sections = [
        ("Severity", summaries.severity.entries()),
        ("Risk factor", summaries.risk_factor.entries()),
        ("Protocol", summaries.protocol.entries()),
        ("Top hosts", summaries.ip_top.as_slice()),
        ("Top CVEs", summaries.cve_top.as_slice()),
    ];

    for (heading, entries) in sections {
        if entries.is_empty() {
            continue;
        }
        println!();
        info!("{heading}");
        for entry in entries {
            println!("    {:>6}  {}", entry.count, entry.label);
        }
    }
}
