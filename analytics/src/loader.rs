use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use models::RawRecord;

use crate::error::{AnalyticsError, Result};

/// Map one cell onto the record field its column name selects.
///
/// Unrecognized columns are ignored; empty cells are treated the same
/// as absent ones.
fn assign_field(record: &mut RawRecord, column: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    let slot = match column.trim() {
        "IP Address" => &mut record.ip_address,
        "Severity" => &mut record.severity,
        "Plugin Name" => &mut record.plugin_name,
        "Risk Factor" => &mut record.risk_factor,
        "Protocol" => &mut record.protocol,
        "CVE" => &mut record.cve,
        "CVSS V2 Base Score" => &mut record.cvss_v2_score,
        "CVSS V3 Base Score" => &mut record.cvss_v3_score,
        "Plugin Publication Date" => &mut record.plugin_publication_date,
        "DNS Name" => &mut record.dns_name,
        "MAC Address" => &mut record.mac_address,
        _ => return,
    };
    *slot = Some(value.to_string());
}

fn record_from_row(headers: &StringRecord, row: &StringRecord) -> RawRecord {
    let mut record = RawRecord::default();
    for (column, value) in headers.iter().zip(row.iter()) {
        assign_field(&mut record, column, value);
    }
    record
}

/// Read scan records from a CSV byte stream.
///
/// The header row supplies the field names; each subsequent row
/// becomes one record, in input order. Short rows are tolerated (the
/// missing cells count as absent). A stream that cannot be read as
/// CSV records at all is a hard failure: no partial result is
/// returned.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| AnalyticsError::InvalidInput(format!("unreadable header row: {e}")))?
        .clone();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        // Header is line 1.
        let line = records.len() + 2;
        let row = row.map_err(|e| AnalyticsError::InvalidInput(format!("line {line}: {e}")))?;
        records.push(record_from_row(&headers, &row));
    }
    Ok(records)
}

/// Load scan records from a `.csv` file on disk.
///
/// Other spreadsheet formats are rejected up front rather than fed to
/// the CSV parser.
pub fn load_csv_path(path: &Path) -> Result<Vec<RawRecord>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => {}
        _ => {
            return Err(AnalyticsError::UnsupportedFormat(path.display().to_string()));
        }
    }
    let file = File::open(path)?;
    load_csv_reader(file)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "\
IP Address,Severity,Plugin Name,Risk Factor,Protocol,CVE,CVSS V2 Base Score,CVSS V3 Base Score,Plugin Publication Date,DNS Name,MAC Address
10.0.0.1,Critical,Apache RCE,Critical,tcp,\"CVE-2021-41773,CVE-2021-42013\",7.5,9.8,2021/10/05,web01.corp,00:11:22:33:44:55
10.0.0.2,High,OpenSSH User Enumeration,High,tcp,CVE-2018-15473,5.0,,2018/08/21,,
";

    #[test]
    fn test_header_mapping() {
        let records = load_csv_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(first.severity.as_deref(), Some("Critical"));
        assert_eq!(first.plugin_name.as_deref(), Some("Apache RCE"));
        assert_eq!(first.cve.as_deref(), Some("CVE-2021-41773,CVE-2021-42013"));
        assert_eq!(first.cvss_v3_score.as_deref(), Some("9.8"));
        assert_eq!(first.dns_name.as_deref(), Some("web01.corp"));

        // Empty cells come through as absent, not as empty strings.
        let second = &records[1];
        assert_eq!(second.cvss_v3_score, None);
        assert_eq!(second.dns_name, None);
        assert_eq!(second.mac_address, None);
    }

    #[test]
    fn test_row_order_preserved() {
        let csv = "IP Address,Severity,Plugin Name\n10.0.0.3,Low,C\n10.0.0.1,Low,A\n10.0.0.2,Low,B\n";
        let records = load_csv_reader(csv.as_bytes()).unwrap();
        let plugins: Vec<_> = records.iter().map(|r| r.plugin_name.as_deref().unwrap()).collect();
        assert_eq!(plugins, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_unrecognized_columns_ignored() {
        let csv = "IP Address,Severity,Plugin Name,Host Score\n10.0.0.1,High,X,42\n";
        let records = load_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(records[0].ip_address.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_short_rows_tolerated() {
        let csv = "IP Address,Severity,Plugin Name,Protocol\n10.0.0.1,High,X\n";
        let records = load_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].plugin_name.as_deref(), Some("X"));
        assert_eq!(records[0].protocol, None);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scan.csv");
        fs::write(&path, SAMPLE_CSV).unwrap();

        let records = load_csv_path(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_non_csv_extension_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scan.xlsx");
        fs::write(&path, b"PK\x03\x04").unwrap();

        let err = load_csv_path(&path).unwrap_err();
        assert!(matches!(err, AnalyticsError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let res = load_csv_path(&tmp.path().join("absent.csv"));
        assert!(matches!(res, Err(AnalyticsError::Io(_))));
    }

    #[test]
    fn test_undecodable_row_fails_atomically() {
        let mut bytes = b"IP Address,Severity,Plugin Name\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, 0xfd]);
        bytes.extend_from_slice(b",High,Y\n");

        let res = load_csv_reader(bytes.as_slice());
        assert!(matches!(res, Err(AnalyticsError::InvalidInput(_))));
    }
}
