/// One row of a scan export, exactly as the tabular parser produced it.
///
/// Every field is optional: scan exports are noisy, and an absent
/// column and an empty cell mean the same thing ("missing"). No
/// trimming or defaulting happens here; normalization is a single
/// explicit step at the top of aggregation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRecord {
    pub ip_address: Option<String>,
    pub severity: Option<String>,
    pub plugin_name: Option<String>,
    pub risk_factor: Option<String>,
    pub protocol: Option<String>,
    /// May hold a comma-separated list of CVE identifiers.
    pub cve: Option<String>,
    pub cvss_v2_score: Option<String>,
    pub cvss_v3_score: Option<String>,
    pub plugin_publication_date: Option<String>,
    pub dns_name: Option<String>,
    pub mac_address: Option<String>,
}

impl RawRecord {
    /// A record with the three fields the validity invariant requires.
    pub fn new(
        ip_address: impl Into<String>,
        severity: impl Into<String>,
        plugin_name: impl Into<String>,
    ) -> Self {
        Self {
            ip_address: Some(ip_address.into()),
            severity: Some(severity.into()),
            plugin_name: Some(plugin_name.into()),
            ..Self::default()
        }
    }

    pub fn with_risk_factor(mut self, risk_factor: impl Into<String>) -> Self {
        self.risk_factor = Some(risk_factor.into());
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_cve(mut self, cve: impl Into<String>) -> Self {
        self.cve = Some(cve.into());
        self
    }

    pub fn with_cvss_v2(mut self, score: impl Into<String>) -> Self {
        self.cvss_v2_score = Some(score.into());
        self
    }

    pub fn with_cvss_v3(mut self, score: impl Into<String>) -> Self {
        self.cvss_v3_score = Some(score.into());
        self
    }

    pub fn with_publication_date(mut self, date: impl Into<String>) -> Self {
        self.plugin_publication_date = Some(date.into());
        self
    }
}
