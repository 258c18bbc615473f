use std::fs;
use std::path::Path;

use minijinja::{Environment, Value, context};
use models::Summaries;

use crate::error::{AnalyticsError, Result};

/// Template used when the caller does not supply one. Plain markdown,
/// one section per chart feed.
const DEFAULT_TEMPLATE: &str = "\
# Security Scan Summary

Generated: {{ date }}

Total findings: {{ total }} (critical: {{ critical }}, high: {{ high }})
Unique hosts: {{ unique_ips }} | protocols: {{ unique_protocols }} | CVEs: {{ unique_cves }}
{%- if timeline_start %}
Publication window: {{ timeline_start }} to {{ timeline_end }}
{%- endif %}

## Severity distribution

| Severity | Findings |
|---|---|
{%- for entry in severity %}
| {{ entry.label }} | {{ entry.count }} |
{%- endfor %}

## Risk factor distribution

| Risk factor | Findings |
|---|---|
{%- for entry in risk_factor %}
| {{ entry.label }} | {{ entry.count }} |
{%- endfor %}

## Protocol distribution

| Protocol | Findings |
|---|---|
{%- for entry in protocol %}
| {{ entry.label }} | {{ entry.count }} |
{%- endfor %}

## Top affected hosts

| IP address | Findings |
|---|---|
{%- for entry in ip_top %}
| {{ entry.label }} | {{ entry.count }} |
{%- endfor %}

## Top CVEs

| CVE | Occurrences |
|---|---|
{%- for entry in cve_top %}
| {{ entry.label }} | {{ entry.count }} |
{%- endfor %}
";

fn current_date() -> String {
    chrono::Local::now().format("%Y/%m/%d").to_string()
}

/// Render `template` against the summaries.
///
/// The template sees: `date`, the key-metric counters (`total`,
/// `critical`, `high`, `unique_ips`, `unique_protocols`,
/// `unique_cves`), each distribution and ranked table as a list of
/// `{label, count}` entries, and `timeline_start`/`timeline_end`.
pub fn render_report(summaries: &Summaries, template: &str) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("report", template)
        .map_err(|e| AnalyticsError::Template(e.to_string()))?;
    let tmpl = env
        .get_template("report")
        .map_err(|e| AnalyticsError::Template(e.to_string()))?;

    let fmt_date = |p: &models::TimelinePoint| p.date.format("%Y/%m/%d").to_string();
    let ctx = context! {
        date => current_date(),
        total => summaries.metrics.total_issues,
        critical => summaries.metrics.critical_issues,
        high => summaries.metrics.high_issues,
        unique_ips => summaries.metrics.unique_ips,
        unique_protocols => summaries.metrics.unique_protocols,
        unique_cves => summaries.metrics.unique_cves,
        severity => Value::from_serialize(&summaries.severity),
        risk_factor => Value::from_serialize(&summaries.risk_factor),
        protocol => Value::from_serialize(&summaries.protocol),
        ip_top => Value::from_serialize(&summaries.ip_top),
        cve_top => Value::from_serialize(&summaries.cve_top),
        timeline_start => summaries.timeline.first().map(fmt_date),
        timeline_end => summaries.timeline.last().map(fmt_date),
    };

    tmpl.render(&ctx).map_err(|e| AnalyticsError::Template(e.to_string()))
}

/// Generate a report file from a template (the built-in one when
/// `template_path` is `None`) and write it to `output_path`.
pub fn generate_report(
    summaries: &Summaries,
    template_path: Option<&Path>,
    output_path: &Path,
) -> Result<()> {
    let raw = match template_path {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    let rendered = render_report(summaries, &raw)?;
    fs::write(output_path, rendered)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use models::RawRecord;

    fn sample_summaries() -> Summaries {
        aggregate(&[
            RawRecord::new("10.0.0.1", "Critical", "Apache RCE")
                .with_protocol("tcp")
                .with_cve("CVE-2021-41773")
                .with_publication_date("2021/10/05"),
            RawRecord::new("10.0.0.2", "High", "OpenSSH User Enumeration")
                .with_protocol("tcp")
                .with_publication_date("2018/08/21"),
        ])
    }

    #[test]
    fn test_default_template_renders_counts() {
        let rendered = render_report(&sample_summaries(), DEFAULT_TEMPLATE).unwrap();

        assert!(rendered.contains("Total findings: 2 (critical: 1, high: 1)"));
        assert!(rendered.contains("| Critical | 1 |"));
        assert!(rendered.contains("| tcp | 2 |"));
        assert!(rendered.contains("| CVE-2021-41773 | 1 |"));
        assert!(rendered.contains("Publication window: 2018/08/21 to 2021/10/05"));
    }

    #[test]
    fn test_empty_summaries_render() {
        let rendered = render_report(&Summaries::default(), DEFAULT_TEMPLATE).unwrap();
        assert!(rendered.contains("Total findings: 0"));
        assert!(!rendered.contains("Publication window"));
    }

    #[test]
    fn test_custom_template_written_to_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let template_path = tmp.path().join("summary.tmpl");
        let output_path = tmp.path().join("report.md");
        std::fs::write(&template_path, "hosts={{ unique_ips }} cves={{ unique_cves }}").unwrap();

        generate_report(&sample_summaries(), Some(&template_path), &output_path).unwrap();

        let written = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(written, "hosts=2 cves=1");
    }

    #[test]
    fn test_bad_template_errors() {
        let res = render_report(&sample_summaries(), "{% for x in %}");
        assert!(matches!(res, Err(AnalyticsError::Template(_))));
    }
}
