use crossterm::event::KeyCode;
use models::{Finding, Severity};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::Tab;
use crate::widgets::{self, Dropdown, DropdownOption, SearchBox};

// ---------------------------------------------------------------------------
// Severity filter
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq)]
enum SeverityFilter {
    All,
    Level(Severity),
}

impl SeverityFilter {
    fn all_options() -> Vec<SeverityFilter> {
        let mut options = vec![SeverityFilter::All];
        options.extend(Severity::ALL.iter().map(|&level| SeverityFilter::Level(level)));
        options
    }

    fn as_str(&self) -> &'static str {
        match self {
            SeverityFilter::All => "All",
            SeverityFilter::Level(level) => level.as_str(),
        }
    }

    /// Matching is against the raw open-set label; findings with a
    /// label outside the well-known levels only show under `All`.
    fn matches(&self, finding: &Finding) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Level(level) => finding.severity_level() == Some(*level),
        }
    }

    fn color(&self) -> Color {
        match self {
            SeverityFilter::All => Color::White,
            SeverityFilter::Level(level) => level.color(),
        }
    }
}

// ---------------------------------------------------------------------------
// Findings tab
// ---------------------------------------------------------------------------

/// Searchable, severity-filterable list of the valid findings with a
/// detail pane for the selection.
pub struct FindingsTab {
    search: SearchBox,
    dropdown: Dropdown,
    severity_filter: SeverityFilter,
    items: Vec<Finding>,
    filtered_items: Vec<Finding>,
    list_state: ListState,
    list_area: Option<Rect>,
}

impl FindingsTab {
    pub fn new(items: Vec<Finding>) -> Self {
        let filtered_items = items.clone();
        let mut list_state = ListState::default();
        if !filtered_items.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            search: SearchBox::new(),
            dropdown: Dropdown::new(),
            severity_filter: SeverityFilter::All,
            items,
            filtered_items,
            list_state,
            list_area: None,
        }
    }

    fn filter_items(&mut self) {
        let query = self.search.query();
        self.filtered_items = self
            .items
            .iter()
            .filter(|finding| {
                let matches_search = query.is_empty()
                    || finding.plugin_name.to_lowercase().contains(&query)
                    || finding.ip_address.to_lowercase().contains(&query)
                    || finding
                        .cve
                        .as_deref()
                        .is_some_and(|cve| cve.to_lowercase().contains(&query));
                matches_search && self.severity_filter.matches(finding)
            })
            .cloned()
            .collect();

        if self.filtered_items.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    fn apply_dropdown_selection(&mut self) {
        if let Some(&filter) = SeverityFilter::all_options().get(self.dropdown.selected) {
            self.severity_filter = filter;
        }
        self.dropdown.close();
        self.filter_items();
    }

    fn get_selected(&self) -> Option<&Finding> {
        self.list_state.selected().and_then(|i| self.filtered_items.get(i))
    }
}

// ---------------------------------------------------------------------------
// Tab trait implementation
// ---------------------------------------------------------------------------

impl Tab for FindingsTab {
    fn title(&self) -> &'static str { "Findings" }

    fn on_blur(&mut self) {
        self.search.focused = false;
        self.dropdown.close();
    }

    fn handle_key(&mut self, key: KeyCode) -> bool {
        // --- dropdown open ---
        if self.dropdown.open {
            let option_count = SeverityFilter::all_options().len();
            return match key {
                KeyCode::Esc => { self.dropdown.close(); true }
                KeyCode::Enter => { self.apply_dropdown_selection(); true }
                KeyCode::Down => { self.dropdown.next(option_count); true }
                KeyCode::Up => { self.dropdown.previous(option_count); true }
                _ => false,
            };
        }

        // --- search focused ---
        if self.search.focused {
            return match key {
                KeyCode::Esc | KeyCode::Enter => { self.search.focused = false; true }
                KeyCode::Char(c) => { self.search.input.push(c); self.filter_items(); true }
                KeyCode::Backspace => { self.search.input.pop(); self.filter_items(); true }
                KeyCode::Down => { widgets::list_next(&mut self.list_state, self.filtered_items.len()); true }
                KeyCode::Up => { widgets::list_previous(&mut self.list_state, self.filtered_items.len()); true }
                _ => false,
            };
        }

        // --- normal mode ---
        match key {
            KeyCode::Char('s') => {
                self.search.focused = true;
                self.dropdown.close();
                true
            }
            KeyCode::Char('f') => {
                let current = SeverityFilter::all_options()
                    .iter()
                    .position(|f| *f == self.severity_filter)
                    .unwrap_or(0);
                self.dropdown.toggle(current);
                self.search.focused = false;
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                widgets::list_next(&mut self.list_state, self.filtered_items.len());
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                widgets::list_previous(&mut self.list_state, self.filtered_items.len());
                true
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, col: u16, row: u16) {
        // Click inside open dropdown
        if self.dropdown.open {
            if let Some(idx) = self.dropdown.click_menu(col, row, SeverityFilter::all_options().len()) {
                self.dropdown.selected = idx;
                self.apply_dropdown_selection();
                return;
            }
            self.dropdown.close();
        }

        // Click on filter button
        if let Some(area) = self.dropdown.button_area
            && widgets::in_area(col, row, area)
        {
            let current = SeverityFilter::all_options()
                .iter()
                .position(|f| *f == self.severity_filter)
                .unwrap_or(0);
            self.dropdown.toggle(current);
            self.search.focused = false;
            return;
        }

        // Click on search box
        if let Some(area) = self.search.area
            && widgets::in_area(col, row, area)
        {
            self.search.focused = true;
            self.dropdown.close();
            return;
        }

        // Click on list
        if let Some(area) = self.list_area
            && widgets::in_area(col, row, area)
        {
            let list_start_y = area.y + 1;
            if row >= list_start_y {
                let clicked = (row - list_start_y) as usize;
                if clicked < self.filtered_items.len() {
                    self.list_state.select(Some(clicked));
                }
            }
            return;
        }

        self.search.focused = false;
    }

    fn handle_scroll_down(&mut self) {
        widgets::list_next(&mut self.list_state, self.filtered_items.len());
    }

    fn handle_scroll_up(&mut self) {
        widgets::list_previous(&mut self.list_state, self.filtered_items.len());
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        self.render_left_panel(f, columns[0]);
        self.render_details(f, columns[1]);

        if self.dropdown.open {
            let options: Vec<DropdownOption> = SeverityFilter::all_options()
                .iter()
                .map(|filter| DropdownOption {
                    label: filter.as_str().to_string(),
                    color: filter.color(),
                })
                .collect();
            self.dropdown.render_menu(f, &options);
        }
    }
}

// ---------------------------------------------------------------------------
// Private rendering helpers
// ---------------------------------------------------------------------------

impl FindingsTab {
    fn render_left_panel(&mut self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // search
                Constraint::Length(3), // severity filter
                Constraint::Min(0),    // list
            ])
            .split(area);

        self.search.render(f, rows[0]);
        self.dropdown.render_button(
            f,
            rows[1],
            " Severity Filter (f or click) ",
            self.severity_filter.as_str(),
            self.severity_filter.color(),
        );
        self.render_list(f, rows[2]);
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        self.list_area = Some(area);

        let items: Vec<ListItem> = self
            .filtered_items
            .iter()
            .map(|finding| {
                ListItem::new(Line::from(vec![
                    Span::raw(&finding.plugin_name),
                    Span::raw(" "),
                    Span::styled(
                        format!("[{}]", finding.severity),
                        Style::default().fg(Severity::color_for_label(&finding.severity)),
                    ),
                ]))
            })
            .collect();

        let title = format!(" Findings ({}) ", self.filtered_items.len());
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_details(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Finding Details ");

        let Some(finding) = self.get_selected() else {
            let empty = Paragraph::new("No finding selected")
                .block(block)
                .alignment(ratatui::layout::Alignment::Center);
            f.render_widget(empty, area);
            return;
        };

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Plugin: ", bold),
                Span::styled(finding.plugin_name.as_str(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![
                Span::styled("Severity: ", bold),
                Span::styled(
                    finding.severity.as_str(),
                    Style::default().fg(Severity::color_for_label(&finding.severity)),
                ),
            ]),
            Line::from(vec![
                Span::styled("Host: ", bold),
                Span::raw(finding.ip_address.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Protocol: ", bold),
                Span::raw(finding.protocol.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Risk factor: ", bold),
                Span::raw(finding.risk_factor.as_str()),
            ]),
            Line::from(vec![
                Span::styled("CVSS: ", bold),
                Span::raw(format!("{:.1}", finding.cvss_score)),
            ]),
        ];

        if let Some(date) = finding.publication_date {
            lines.push(Line::from(vec![
                Span::styled("Published: ", bold),
                Span::raw(date.format("%Y/%m/%d").to_string()),
            ]));
        }
        if let Some(dns) = &finding.dns_name {
            lines.push(Line::from(vec![
                Span::styled("DNS: ", bold),
                Span::raw(dns.as_str()),
            ]));
        }
        if let Some(mac) = &finding.mac_address {
            lines.push(Line::from(vec![
                Span::styled("MAC: ", bold),
                Span::raw(mac.as_str()),
            ]));
        }

        let cve_ids = finding.cve_ids();
        if !cve_ids.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("CVEs ({}):", cve_ids.len()),
                bold,
            )));
            for cve in &cve_ids {
                lines.push(Line::from(format!("  {cve}")));
            }
        }

        let details = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        f.render_widget(details, area);
    }
}
