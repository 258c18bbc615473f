use models::{Severity, Summaries, TimelinePoint};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use super::Tab;
use crate::widgets;

/// Publication timeline: one row per dated finding, oldest first.
pub struct TimelineTab {
    points: Vec<TimelinePoint>,
    list_state: ListState,
    list_area: Option<Rect>,
}

impl TimelineTab {
    pub fn new(summaries: &Summaries) -> Self {
        let mut list_state = ListState::default();
        if !summaries.timeline.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            points: summaries.timeline.clone(),
            list_state,
            list_area: None,
        }
    }
}

impl Tab for TimelineTab {
    fn title(&self) -> &'static str { "Timeline" }

    fn handle_key(&mut self, key: crossterm::event::KeyCode) -> bool {
        use crossterm::event::KeyCode;
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                widgets::list_next(&mut self.list_state, self.points.len());
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                widgets::list_previous(&mut self.list_state, self.points.len());
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
                if clicked < self.points.len() {
                    self.list_state.select(Some(clicked));
                }
            }
        }
    }

    fn handle_scroll_down(&mut self) {
        widgets::list_next(&mut self.list_state, self.points.len());
    }

    fn handle_scroll_up(&mut self) {
        widgets::list_previous(&mut self.list_state, self.points.len());
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        self.list_area = Some(area);

        let items: Vec<ListItem> = self
            .points
            .iter()
            .map(|p| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        p.date.format("%Y/%m/%d").to_string(),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("[{}]", p.severity),
                        Style::default().fg(Severity::color_for_label(&p.severity)),
                    ),
                    Span::raw(" "),
                    Span::raw(&p.plugin_name),
                ]))
            })
            .collect();

        let title = format!(" Publication Timeline ({} dated findings) ", self.points.len());
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
