use models::{ChartData, Summaries};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
};

use super::Tab;
use crate::widgets;

/// Top affected hosts next to the protocol distribution.
pub struct HostsTab {
    ip_chart: ChartData,
    protocol_chart: ChartData,
}

impl HostsTab {
    pub fn new(summaries: &Summaries) -> Self {
        let ip_title = format!(
            "Top Hosts ({} of {})",
            summaries.ip_top.len(),
            summaries.metrics.unique_ips
        );
        Self {
            ip_chart: ChartData::ranked_chart(ip_title, &summaries.ip_top, Color::Cyan),
            protocol_chart: ChartData::category_chart("Protocol Distribution", &summaries.protocol),
        }
    }
}

impl Tab for HostsTab {
    fn title(&self) -> &'static str { "Hosts" }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        widgets::render_bar_chart(f, columns[0], &self.ip_chart);
        widgets::render_bar_chart(f, columns[1], &self.protocol_chart);
    }
}
