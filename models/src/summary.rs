use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

/// A labelled count: one row of a ranked table or one chart category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyCount {
    pub label: String,
    pub count: u64,
}

impl KeyCount {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self { label: label.into(), count }
    }
}

/// An ordered label → count mapping.
///
/// Keys keep first-insertion order, so chart categories appear in the
/// order the data introduced them and sort ties resolve to first-seen.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Distribution {
    entries: Vec<KeyCount>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn record(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(KeyCount::new(label, 1));
            }
        }
    }

    pub fn get(&self, label: &str) -> u64 {
        self.index.get(label).map_or(0, |&i| self.entries[i].count)
    }

    /// Number of distinct labels seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order.
    pub fn entries(&self) -> &[KeyCount] {
        &self.entries
    }

    /// The `n` highest counts, descending. The sort is stable: ties
    /// keep first-insertion order.
    pub fn top(&self, n: usize) -> Vec<KeyCount> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}

/// One exploded CVE occurrence together with its owning finding's
/// severity, host, and resolved CVSS score.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CveDetail {
    pub cve: String,
    pub severity: String,
    pub ip_address: String,
    pub cvss_score: f64,
}

/// One dated point of the publication timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub severity: String,
    pub plugin_name: String,
}

/// Headline numbers shown on the dashboard's metric cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KeyMetrics {
    /// Count of valid findings.
    pub total_issues: usize,
    pub critical_issues: usize,
    pub high_issues: usize,
    pub unique_ips: usize,
    pub unique_protocols: usize,
    pub unique_cves: usize,
}

/// The full set of derived summaries for one scan export.
///
/// Recomputed in full from the raw input on every aggregation run;
/// there is no incremental state.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Summaries {
    /// Severity label → count, first-seen order.
    pub severity: Distribution,
    /// Risk factor → count.
    pub risk_factor: Distribution,
    /// Protocol → count.
    pub protocol: Distribution,
    /// Ten highest-count IP addresses, descending.
    pub ip_top: Vec<KeyCount>,
    /// Ten highest-occurrence CVE identifiers, descending.
    pub cve_top: Vec<KeyCount>,
    /// Every exploded CVE occurrence, in input order.
    pub cve_details: Vec<CveDetail>,
    /// Findings with a parseable publication date, ascending by date.
    pub timeline: Vec<TimelinePoint>,
    pub metrics: KeyMetrics,
}
