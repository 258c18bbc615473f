use ratatui::style::Color;

/// One of the well-known severity levels of a scan finding.
///
/// Scan exports treat severity as an open set of labels, so
/// [`Finding`](crate::Finding) carries the raw string; this enum binds
/// the five labels every scanner emits for coloring, ordering, and
/// per-severity metrics.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// All severity variants in descending order.
    pub const ALL: &[Severity] = &[
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Severity::Critical => Color::Red,
            Severity::High => Color::LightRed,
            Severity::Medium => Color::Yellow,
            Severity::Low => Color::Green,
            Severity::Info => Color::Blue,
        }
    }

    /// Match a raw severity label against the well-known levels.
    pub fn from_label(label: &str) -> Option<Severity> {
        label.trim().parse().ok()
    }

    /// Color for an arbitrary severity label. Labels outside the
    /// well-known set render gray.
    pub fn color_for_label(label: &str) -> Color {
        Severity::from_label(label).map_or(Color::Gray, |s| s.color())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            "info" | "informational" => Ok(Severity::Info),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}
