use chrono::NaiveDate;
use serde::Serialize;

use crate::Severity;

/// A validated, normalized scan finding.
///
/// Produced from a [`RawRecord`](crate::RawRecord) by the aggregation
/// pipeline: the three required fields are non-empty and trimmed,
/// categorical fields default to `"Unknown"`, and the CVSS score and
/// publication date are resolved once, up front.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Finding {
    pub ip_address: String,
    /// Raw severity label. An open set; see [`Severity`] for the
    /// well-known levels.
    pub severity: String,
    pub plugin_name: String,
    pub risk_factor: String,
    pub protocol: String,
    /// Raw CVE cell, possibly a comma-separated list. `None` when the
    /// export had no CVE for this row.
    pub cve: Option<String>,
    /// CVSS V3 score when present, else V2, else 0.
    pub cvss_score: f64,
    /// `None` when the export's date was missing or unparseable.
    pub publication_date: Option<NaiveDate>,
    pub dns_name: Option<String>,
    pub mac_address: Option<String>,
}

impl Finding {
    /// Exploded CVE identifiers: the raw cell split on `,`, each token
    /// trimmed, empty tokens discarded. Repeated identifiers are kept.
    pub fn cve_ids(&self) -> Vec<String> {
        self.cve
            .as_deref()
            .map(|cell| {
                cell.split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The well-known severity level, when the label matches one.
    pub fn severity_level(&self) -> Option<Severity> {
        Severity::from_label(&self.severity)
    }
}
