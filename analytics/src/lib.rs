mod error;
mod loader;
mod aggregate;
mod export;
mod report;

pub use error::{AnalyticsError, Result};
pub use loader::{load_csv_path, load_csv_reader};
pub use aggregate::{aggregate, normalize, valid_findings};
pub use export::{distributions_to_csv, findings_to_csv, summaries_to_json};
pub use report::{generate_report, render_report};
