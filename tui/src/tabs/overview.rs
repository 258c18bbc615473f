use models::{ChartData, KeyMetrics, Summaries};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
};

use super::Tab;
use crate::widgets;

/// Headline metrics plus the severity and risk-factor charts.
pub struct OverviewTab {
    metrics: KeyMetrics,
    severity_chart: ChartData,
    risk_chart: ChartData,
}

impl OverviewTab {
    pub fn new(summaries: &Summaries) -> Self {
        Self {
            metrics: summaries.metrics,
            severity_chart: ChartData::severity_chart("Severity Distribution", &summaries.severity),
            risk_chart: ChartData::category_chart("Risk Factor Distribution", &summaries.risk_factor),
        }
    }

    fn render_metric_cards(&self, f: &mut Frame, area: Rect) {
        let cards: [(&str, usize, Color); 6] = [
            ("Total Issues", self.metrics.total_issues, Color::White),
            ("Critical", self.metrics.critical_issues, Color::Red),
            ("High", self.metrics.high_issues, Color::LightRed),
            ("Unique Hosts", self.metrics.unique_ips, Color::Cyan),
            ("Protocols", self.metrics.unique_protocols, Color::Magenta),
            ("Unique CVEs", self.metrics.unique_cves, Color::Yellow),
        ];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 6); 6])
            .split(area);

        for (i, (label, value, color)) in cards.into_iter().enumerate() {
            widgets::render_metric_card(f, columns[i], label, value, color);
        }
    }
}

impl Tab for OverviewTab {
    fn title(&self) -> &'static str { "Overview" }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        self.render_metric_cards(f, rows[0]);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        widgets::render_bar_chart(f, charts[0], &self.severity_chart);
        widgets::render_bar_chart(f, charts[1], &self.risk_chart);
    }
}
