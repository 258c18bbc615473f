use models::{Finding, Summaries};

use crate::error::Result;

/// Serialize the full summaries structure as pretty-printed JSON, the
/// same shape display layers consume.
pub fn summaries_to_json(summaries: &Summaries) -> Result<String> {
    Ok(serde_json::to_string_pretty(summaries)?)
}

/// Escape a field that may contain commas, quotes or newlines.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Re-export the normalized valid findings as CSV, one row per
/// finding, in input order.
pub fn findings_to_csv(findings: &[Finding]) -> String {
    let mut out = String::from(
        "IP Address,Severity,Plugin Name,Risk Factor,Protocol,CVE,CVSS Score,Publication Date,DNS Name,MAC Address\n",
    );

    for f in findings {
        let date = f
            .publication_date
            .map(|d| d.format("%Y/%m/%d").to_string())
            .unwrap_or_default();
        let row = [
            csv_field(&f.ip_address),
            csv_field(&f.severity),
            csv_field(&f.plugin_name),
            csv_field(&f.risk_factor),
            csv_field(&f.protocol),
            csv_field(f.cve.as_deref().unwrap_or("")),
            f.cvss_score.to_string(),
            date,
            csv_field(f.dns_name.as_deref().unwrap_or("")),
            csv_field(f.mac_address.as_deref().unwrap_or("")),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Export every chart feed as one flat `chart,label,count` table for
/// spreadsheet use.
pub fn distributions_to_csv(summaries: &Summaries) -> String {
    let mut out = String::from("chart,label,count\n");

    let mut push = |chart: &str, label: &str, count: u64| {
        out.push_str(&csv_field(chart));
        out.push(',');
        out.push_str(&csv_field(label));
        out.push(',');
        out.push_str(&count.to_string());
        out.push('\n');
    };

    for e in summaries.severity.entries() {
        push("severity", &e.label, e.count);
    }
    for e in summaries.risk_factor.entries() {
        push("risk_factor", &e.label, e.count);
    }
    for e in summaries.protocol.entries() {
        push("protocol", &e.label, e.count);
    }
    for e in &summaries.ip_top {
        push("ip_top", &e.label, e.count);
    }
    for e in &summaries.cve_top {
        push("cve_top", &e.label, e.count);
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, valid_findings};
    use models::RawRecord;

    fn sample_records() -> Vec<RawRecord> {
        vec![
            RawRecord::new("10.0.0.1", "Critical", "Apache RCE")
                .with_protocol("tcp")
                .with_cve("CVE-2021-41773,CVE-2021-42013")
                .with_cvss_v3("9.8")
                .with_publication_date("2021/10/05"),
            RawRecord::new("10.0.0.2", "High", "Plugin, with comma"),
        ]
    }

    #[test]
    fn test_json_shape() {
        let summaries = aggregate(&sample_records());
        let json = summaries_to_json(&summaries).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metrics"]["total_issues"], 2);
        assert_eq!(value["severity"][0]["label"], "Critical");
        assert_eq!(value["severity"][0]["count"], 1);
        assert_eq!(value["cve_top"][0]["label"], "CVE-2021-41773");
        assert_eq!(value["timeline"][0]["date"], "2021-10-05");
    }

    #[test]
    fn test_findings_csv_escapes_fields() {
        let findings = valid_findings(&sample_records());
        let csv = findings_to_csv(&findings);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3); // header + 2 findings
        assert!(lines[1].contains("\"CVE-2021-41773,CVE-2021-42013\""));
        assert!(lines[2].contains("\"Plugin, with comma\""));
    }

    #[test]
    fn test_findings_csv_round_trips_through_loader() {
        let findings = valid_findings(&sample_records());
        let csv = findings_to_csv(&findings);

        // The re-exported CSV is itself a loadable scan export.
        let records = crate::loader::load_csv_reader(csv.as_bytes()).unwrap();
        let reloaded = valid_findings(&records);
        assert_eq!(reloaded.len(), findings.len());
        assert_eq!(reloaded[0].ip_address, "10.0.0.1");
        assert_eq!(reloaded[0].cve, findings[0].cve);
    }

    #[test]
    fn test_distributions_csv() {
        let summaries = aggregate(&sample_records());
        let csv = distributions_to_csv(&summaries);

        assert!(csv.starts_with("chart,label,count\n"));
        assert!(csv.contains("severity,Critical,1\n"));
        assert!(csv.contains("protocol,Unknown,1\n"));
        assert!(csv.contains("ip_top,10.0.0.1,1\n"));
        assert!(csv.contains("cve_top,CVE-2021-42013,1\n"));
    }
}
