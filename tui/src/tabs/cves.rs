use models::{CveDetail, KeyCount, Severity, Summaries};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::Tab;
use crate::widgets;

/// Ranked top-CVE list with a detail pane for the selected identifier.
pub struct CvesTab {
    ranked: Vec<KeyCount>,
    details: Vec<CveDetail>,
    list_state: ListState,
    list_area: Option<Rect>,
}

impl CvesTab {
    pub fn new(summaries: &Summaries) -> Self {
        let mut list_state = ListState::default();
        if !summaries.cve_top.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            ranked: summaries.cve_top.clone(),
            details: summaries.cve_details.clone(),
            list_state,
            list_area: None,
        }
    }

    fn selected(&self) -> Option<&KeyCount> {
        self.list_state.selected().and_then(|i| self.ranked.get(i))
    }

    /// Occurrences of the selected identifier, in input order.
    fn selected_details(&self) -> Vec<&CveDetail> {
        match self.selected() {
            Some(entry) => self.details.iter().filter(|d| d.cve == entry.label).collect(),
            None => Vec::new(),
        }
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        self.list_area = Some(area);

        let items: Vec<ListItem> = self
            .ranked
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>2}. ", i + 1),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw(&entry.label),
                    Span::styled(
                        format!("  ({})", entry.count),
                        Style::default().fg(Color::Yellow),
                    ),
                ]))
            })
            .collect();

        let title = format!(" Top CVEs ({}) ", self.ranked.len());
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_details(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" CVE Details ");

        let occurrences = self.selected_details();
        let Some(entry) = self.selected() else {
            let empty = Paragraph::new("No CVE selected")
                .block(block)
                .alignment(ratatui::layout::Alignment::Center);
            f.render_widget(empty, area);
            return;
        };

        let max_score = occurrences
            .iter()
            .map(|d| d.cvss_score)
            .fold(0.0_f64, f64::max);

        let mut hosts: Vec<&str> = occurrences.iter().map(|d| d.ip_address.as_str()).collect();
        hosts.sort_unstable();
        hosts.dedup();

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Identifier: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(entry.label.as_str(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![
                Span::styled("Occurrences: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(entry.count.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Max CVSS: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("{max_score:.1}")),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!("Affected hosts ({}):", hosts.len()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        for host in &hosts {
            lines.push(Line::from(format!("  {host}")));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Findings:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for d in &occurrences {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", d.severity),
                    Style::default().fg(Severity::color_for_label(&d.severity)),
                ),
                Span::raw(format!(" {} (CVSS {:.1})", d.ip_address, d.cvss_score)),
            ]));
        }

        let details = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        f.render_widget(details, area);
    }
}

impl Tab for CvesTab {
    fn title(&self) -> &'static str { "CVEs" }

    fn handle_key(&mut self, key: crossterm::event::KeyCode) -> bool {
        use crossterm::event::KeyCode;
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                widgets::list_next(&mut self.list_state, self.ranked.len());
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                widgets::list_previous(&mut self.list_state, self.ranked.len());
                true
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, col: u16, row: u16) {
        if let Some(area) = self.list_area
            && widgets::in_area(col, row, area)
        {
            let list_start_y = area.y + 1;
            if row >= list_start_y {
                let clicked = (row - list_start_y) as usize;
                if clicked < self.ranked.len() {
                    self.list_state.select(Some(clicked));
                }
            }
        }
    }

    fn handle_scroll_down(&mut self) {
        widgets::list_next(&mut self.list_state, self.ranked.len());
    }

    fn handle_scroll_up(&mut self) {
        widgets::list_previous(&mut self.list_state, self.ranked.len());
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        self.render_list(f, columns[0]);
        self.render_details(f, columns[1]);
    }
}
