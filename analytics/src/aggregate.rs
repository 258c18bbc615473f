use chrono::NaiveDate;
use models::{CveDetail, Distribution, Finding, KeyMetrics, RawRecord, Summaries, TimelinePoint};

/// Ranked tables are truncated to the ten highest counts.
const TOP_N: usize = 10;

/// `Plugin Publication Date` formats accepted by normalization.
const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y"];

fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Treat an absent field and an empty/whitespace field identically.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve the CVSS score for a record: the V3 cell is preferred when
/// present, else V2, else 0. Preference is by presence of the cell; a
/// present-but-unparseable value yields 0 rather than falling through
/// to the other version.
fn cvss_score(record: &RawRecord) -> f64 {
    non_empty(&record.cvss_v3_score)
        .or_else(|| non_empty(&record.cvss_v2_score))
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Normalize one raw row.
///
/// Returns `None` when the row fails the validity invariant: IP
/// address, severity, and plugin name must all be non-empty after
/// trimming. Invalid rows are excluded from every downstream summary.
pub fn normalize(record: &RawRecord) -> Option<Finding> {
    let ip_address = non_empty(&record.ip_address)?.to_string();
    let severity = non_empty(&record.severity)?.to_string();
    let plugin_name = non_empty(&record.plugin_name)?.to_string();

    Some(Finding {
        ip_address,
        severity,
        plugin_name,
        risk_factor: non_empty(&record.risk_factor).unwrap_or("Unknown").to_string(),
        protocol: non_empty(&record.protocol).unwrap_or("Unknown").to_string(),
        cve: non_empty(&record.cve).map(str::to_string),
        cvss_score: cvss_score(record),
        publication_date: non_empty(&record.plugin_publication_date)
            .and_then(parse_publication_date),
        dns_name: non_empty(&record.dns_name).map(str::to_string),
        mac_address: non_empty(&record.mac_address).map(str::to_string),
    })
}

/// The canonical valid-findings collection: every row that passes the
/// validity invariant, normalized, in input order.
pub fn valid_findings(records: &[RawRecord]) -> Vec<Finding> {
    records.iter().filter_map(normalize).collect()
}

/// Reduce a scan export into the full set of derived summaries.
///
/// Pure and deterministic: one pass over the valid findings plus
/// bounded post-processing, the input is never mutated, and the whole
/// result is recomputed on every call. Row-level defects (bad score,
/// bad date, empty CVE token) degrade only the derived value they
/// touch and never abort the aggregation.
pub fn aggregate(records: &[RawRecord]) -> Summaries {
    let findings = valid_findings(records);

    let mut severity = Distribution::new();
    let mut risk_factor = Distribution::new();
    let mut protocol = Distribution::new();
    let mut ip_counts = Distribution::new();
    let mut cve_counts = Distribution::new();
    let mut cve_details = Vec::new();
    let mut timeline = Vec::new();

    for finding in &findings {
        severity.record(&finding.severity);
        risk_factor.record(&finding.risk_factor);
        protocol.record(&finding.protocol);
        ip_counts.record(&finding.ip_address);

        for cve in finding.cve_ids() {
            cve_counts.record(&cve);
            cve_details.push(CveDetail {
                cve,
                severity: finding.severity.clone(),
                ip_address: finding.ip_address.clone(),
                cvss_score: finding.cvss_score,
            });
        }

        if let Some(date) = finding.publication_date {
            timeline.push(TimelinePoint {
                date,
                severity: finding.severity.clone(),
                plugin_name: finding.plugin_name.clone(),
            });
        }
    }

    // Stable: points sharing a date keep input order.
    timeline.sort_by_key(|p| p.date);

    let metrics = KeyMetrics {
        total_issues: findings.len(),
        critical_issues: severity.get("Critical") as usize,
        high_issues: severity.get("High") as usize,
        unique_ips: ip_counts.len(),
        unique_protocols: protocol.len(),
        unique_cves: cve_counts.len(),
    };

    Summaries {
        ip_top: ip_counts.top(TOP_N),
        cve_top: cve_counts.top(TOP_N),
        severity,
        risk_factor,
        protocol,
        cve_details,
        timeline,
        metrics,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<RawRecord> {
        vec![
            RawRecord::new("10.0.0.1", "Critical", "A").with_cve("CVE-1,CVE-2"),
            RawRecord::new("10.0.0.1", "High", "B").with_cve("CVE-1"),
            RawRecord::new("", "Low", "C"),
        ]
    }

    #[test]
    fn test_end_to_end_scenario() {
        let summaries = aggregate(&sample_records());

        assert_eq!(summaries.metrics.total_issues, 2);
        assert_eq!(summaries.metrics.unique_ips, 1);
        assert_eq!(summaries.severity.get("Critical"), 1);
        assert_eq!(summaries.severity.get("High"), 1);
        assert_eq!(summaries.severity.len(), 2); // third record excluded
        assert_eq!(
            summaries.cve_top,
            vec![
                models::KeyCount::new("CVE-1", 2),
                models::KeyCount::new("CVE-2", 1),
            ]
        );
    }

    #[test]
    fn test_idempotence() {
        let records = sample_records();
        let first = aggregate(&records);
        let second = aggregate(&records);

        assert_eq!(first.severity.entries(), second.severity.entries());
        assert_eq!(first.ip_top, second.ip_top);
        assert_eq!(first.cve_top, second.cve_top);
        assert_eq!(first.cve_details, second.cve_details);
        assert_eq!(first.timeline, second.timeline);
        assert_eq!(first.metrics, second.metrics);
    }

    #[test]
    fn test_validity_requires_all_three_fields() {
        let records = vec![
            RawRecord { ip_address: None, ..RawRecord::new("x", "High", "P") },
            RawRecord { severity: Some("   ".into()), ..RawRecord::new("10.0.0.2", "x", "P") },
            RawRecord { plugin_name: Some(String::new()), ..RawRecord::new("10.0.0.3", "Low", "x") },
            RawRecord::new("10.0.0.4", "Low", "P"),
        ];

        let summaries = aggregate(&records);
        assert_eq!(summaries.metrics.total_issues, 1);
        assert_eq!(summaries.ip_top, vec![models::KeyCount::new("10.0.0.4", 1)]);
    }

    #[test]
    fn test_normalize_trims_and_defaults() {
        let record = RawRecord::new("  10.0.0.1 ", " Critical ", " X ");
        let finding = normalize(&record).unwrap();

        assert_eq!(finding.ip_address, "10.0.0.1");
        assert_eq!(finding.severity, "Critical");
        assert_eq!(finding.plugin_name, "X");
        assert_eq!(finding.risk_factor, "Unknown");
        assert_eq!(finding.protocol, "Unknown");
        assert_eq!(finding.cve, None);
        assert_eq!(finding.cvss_score, 0.0);
        assert_eq!(finding.publication_date, None);
    }

    #[test]
    fn test_default_protocol_counts_as_unknown() {
        let summaries = aggregate(&[RawRecord::new("10.0.0.1", "Critical", "X")]);
        assert_eq!(summaries.protocol.get("Unknown"), 1);
        assert_eq!(summaries.metrics.unique_protocols, 1);
    }

    #[test]
    fn test_cve_explosion_counts_repeats() {
        let records =
            vec![RawRecord::new("10.0.0.1", "High", "X").with_cve("CVE-2021-1,CVE-2021-2, CVE-2021-1")];
        let summaries = aggregate(&records);

        assert_eq!(summaries.cve_top[0], models::KeyCount::new("CVE-2021-1", 2));
        assert_eq!(summaries.cve_top[1], models::KeyCount::new("CVE-2021-2", 1));
        // Identifiers count once each regardless of repetition.
        assert_eq!(summaries.metrics.unique_cves, 2);
        assert_eq!(summaries.cve_details.len(), 3);
    }

    #[test]
    fn test_cve_explosion_discards_empty_tokens() {
        let records = vec![RawRecord::new("10.0.0.1", "High", "X").with_cve("CVE-1,, , CVE-2,")];
        let summaries = aggregate(&records);

        assert_eq!(summaries.metrics.unique_cves, 2);
        assert_eq!(summaries.cve_details.len(), 2);
    }

    #[test]
    fn test_cvss_prefers_v3_over_v2() {
        let record = RawRecord::new("10.0.0.1", "High", "X")
            .with_cvss_v2("5.0")
            .with_cvss_v3("9.8");
        assert_eq!(normalize(&record).unwrap().cvss_score, 9.8);

        let record = RawRecord::new("10.0.0.1", "High", "X").with_cvss_v2("5.0");
        assert_eq!(normalize(&record).unwrap().cvss_score, 5.0);
    }

    #[test]
    fn test_cvss_unparseable_is_zero() {
        // A present V3 cell wins the preference even when it does not
        // parse; it does not fall through to V2.
        let record = RawRecord::new("10.0.0.1", "High", "X")
            .with_cvss_v2("5.0")
            .with_cvss_v3("n/a");
        assert_eq!(normalize(&record).unwrap().cvss_score, 0.0);
    }

    #[test]
    fn test_unparseable_date_is_dropped_from_timeline_only() {
        let records = vec![
            RawRecord::new("10.0.0.1", "Critical", "X").with_publication_date("not-a-date"),
            RawRecord::new("10.0.0.2", "High", "Y").with_publication_date("2021/03/15"),
        ];
        let summaries = aggregate(&records);

        assert_eq!(summaries.metrics.total_issues, 2);
        assert_eq!(summaries.severity.get("Critical"), 1);
        assert_eq!(summaries.timeline.len(), 1);
        assert_eq!(summaries.timeline[0].plugin_name, "Y");
    }

    #[test]
    fn test_date_formats() {
        for raw in ["2021/03/15", "2021-03-15", "03/15/2021", "Mar 15, 2021"] {
            assert_eq!(
                parse_publication_date(raw),
                NaiveDate::from_ymd_opt(2021, 3, 15),
                "format not accepted: {raw}"
            );
        }
        assert_eq!(parse_publication_date("15th of March"), None);
    }

    #[test]
    fn test_timeline_sorted_ascending() {
        let records = vec![
            RawRecord::new("10.0.0.1", "High", "C").with_publication_date("2022/01/01"),
            RawRecord::new("10.0.0.1", "High", "A").with_publication_date("2020/01/01"),
            RawRecord::new("10.0.0.1", "High", "B").with_publication_date("2021/01/01"),
        ];
        let summaries = aggregate(&records);

        let plugins: Vec<&str> = summaries.timeline.iter().map(|p| p.plugin_name.as_str()).collect();
        assert_eq!(plugins, vec!["A", "B", "C"]);
        assert!(summaries.timeline.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_top_n_bound_and_order() {
        // 12 distinct IPs; IP k appears k times.
        let mut records = Vec::new();
        for k in 1..=12u32 {
            for _ in 0..k {
                records.push(RawRecord::new(format!("10.0.0.{k}"), "Low", "X"));
            }
        }
        let summaries = aggregate(&records);

        assert_eq!(summaries.ip_top.len(), 10);
        assert_eq!(summaries.ip_top[0], models::KeyCount::new("10.0.0.12", 12));
        assert!(summaries.ip_top.windows(2).all(|w| w[0].count >= w[1].count));
        // The two rarest IPs fell off the table.
        assert!(!summaries.ip_top.iter().any(|e| e.label == "10.0.0.1"));
        assert!(!summaries.ip_top.iter().any(|e| e.label == "10.0.0.2"));
        assert_eq!(summaries.metrics.unique_ips, 12);
    }

    #[test]
    fn test_top_n_ties_keep_first_seen_order() {
        let records = vec![
            RawRecord::new("10.0.0.9", "Low", "X"),
            RawRecord::new("10.0.0.1", "Low", "X"),
            RawRecord::new("10.0.0.5", "Low", "X"),
        ];
        let summaries = aggregate(&records);

        let labels: Vec<&str> = summaries.ip_top.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["10.0.0.9", "10.0.0.1", "10.0.0.5"]);
    }

    #[test]
    fn test_distributions_keep_first_seen_order() {
        let records = vec![
            RawRecord::new("10.0.0.1", "Medium", "X"),
            RawRecord::new("10.0.0.2", "Critical", "X"),
            RawRecord::new("10.0.0.3", "Medium", "X"),
        ];
        let summaries = aggregate(&records);

        let labels: Vec<&str> = summaries.severity.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Medium", "Critical"]);
    }

    #[test]
    fn test_risk_factor_defaults_and_counts() {
        let records = vec![
            RawRecord::new("10.0.0.1", "High", "X").with_risk_factor("High"),
            RawRecord::new("10.0.0.2", "Low", "Y"),
        ];
        let summaries = aggregate(&records);

        assert_eq!(summaries.risk_factor.get("High"), 1);
        assert_eq!(summaries.risk_factor.get("Unknown"), 1);
    }

    #[test]
    fn test_open_severity_set_is_preserved() {
        let summaries = aggregate(&[RawRecord::new("10.0.0.1", "Catastrophic", "X")]);
        assert_eq!(summaries.severity.get("Catastrophic"), 1);
        assert_eq!(summaries.metrics.critical_issues, 0);
    }

    #[test]
    fn test_empty_input() {
        let summaries = aggregate(&[]);
        assert_eq!(summaries.metrics, KeyMetrics::default());
        assert!(summaries.severity.is_empty());
        assert!(summaries.ip_top.is_empty());
        assert!(summaries.timeline.is_empty());
    }
}
