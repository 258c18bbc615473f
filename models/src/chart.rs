use ratatui::style::Color;

use crate::{Distribution, KeyCount, Severity};

/// Colors cycled through for categorical charts whose labels carry no
/// inherent color (protocols, risk factors).
const CATEGORY_COLORS: &[Color] = &[
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::LightBlue,
];

/// A single bar in a distribution chart.
#[derive(Clone, Debug)]
pub struct ChartBar {
    pub label: String,
    pub value: u64,
    pub color: Color,
}

impl ChartBar {
    pub fn new(label: impl Into<String>, value: u64, color: Color) -> Self {
        Self { label: label.into(), value, color }
    }
}

/// Data backing a horizontal bar chart.
#[derive(Clone, Debug)]
pub struct ChartData {
    pub title: String,
    pub bars: Vec<ChartBar>,
}

impl ChartData {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), bars: Vec::new() }
    }

    pub fn with_bar(mut self, bar: ChartBar) -> Self {
        self.bars.push(bar);
        self
    }

    /// A chart of a severity distribution, bars colored per level.
    pub fn severity_chart(title: impl Into<String>, dist: &Distribution) -> Self {
        let bars = dist
            .entries()
            .iter()
            .map(|e| ChartBar::new(e.label.as_str(), e.count, Severity::color_for_label(&e.label)))
            .collect();
        Self { title: title.into(), bars }
    }

    /// A chart of an arbitrary categorical distribution, bars colored
    /// from a fixed cycling palette.
    pub fn category_chart(title: impl Into<String>, dist: &Distribution) -> Self {
        let bars = dist
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| {
                ChartBar::new(e.label.as_str(), e.count, CATEGORY_COLORS[i % CATEGORY_COLORS.len()])
            })
            .collect();
        Self { title: title.into(), bars }
    }

    /// A chart of a ranked top-N table, all bars one color.
    pub fn ranked_chart(title: impl Into<String>, entries: &[KeyCount], color: Color) -> Self {
        let bars = entries
            .iter()
            .map(|e| ChartBar::new(e.label.as_str(), e.count, color))
            .collect();
        Self { title: title.into(), bars }
    }
}
