use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scanlens")]
#[command(version)]
#[command(about = "Aggregate security-scan exports into chart-ready summaries")]
pub struct Cli {
    /// the command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print key metrics and distributions for a scan export
    Analyze {
        /// Path to the scan export (.csv)
        #[arg(short, long)]
        input: String,
    },

    /// Explore the summaries in an interactive dashboard
    View {
        /// Path to the scan export (.csv)
        #[arg(short, long)]
        input: String,
    },

    /// Export summaries (or the normalized findings) to a file
    Export {
        /// Path to the scan export (.csv)
        #[arg(short, long)]
        input: String,

        /// Path to the output file
        #[arg(short, long, default_value = "summaries.json")]
        output: String,

        /// Output format: json, csv, or findings
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Generate a report from the summaries
    Report {
        /// Path to the scan export (.csv)
        #[arg(short, long)]
        input: String,

        /// Report template file (.tmpl); built-in template when omitted
        #[arg(short, long)]
        template: Option<String>,

        /// Path to the output file
        #[arg(short, long, default_value = "report.md")]
        output: String,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
