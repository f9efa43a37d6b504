use crate::config::Theme;

use super::{ChartSeries, RenderedList, SummaryView, TransactionRow, View};

/// In-memory [`View`] that records what it was asked to show. Used by tests
/// and by embedders that only need the derived state.
#[derive(Debug, Default)]
pub struct HeadlessView {
    pub list: RenderedList,
    pub summary: Option<SummaryView>,
    pub chart: Option<ChartSeries>,
    pub alerts: Vec<String>,
    pub prompts: Vec<String>,
    pub theme: Theme,
    pub full_renders: usize,
    pub row_renders: usize,
    pub chart_updates: usize,
    confirm_answer: bool,
}

impl HeadlessView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every confirmation prompt with `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            confirm_answer: answer,
            ..Self::default()
        }
    }

    pub fn visible_titles(&self) -> Vec<String> {
        self.list.visible().map(|row| row.title.clone()).collect()
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}

impl View for HeadlessView {
    fn render_list(&mut self, rows: Vec<TransactionRow>) {
        self.full_renders += 1;
        self.list.replace(rows);
    }

    fn render_row(&mut self, row: TransactionRow) {
        self.row_renders += 1;
        self.list.prepend(row);
    }

    fn render_summary(&mut self, summary: &SummaryView) {
        self.summary = Some(summary.clone());
    }

    fn render_chart(&mut self, series: &ChartSeries) {
        self.chart_updates += 1;
        self.chart = Some(series.clone());
    }

    fn apply_filter(&mut self, query: &str) -> usize {
        self.list.apply_filter(query)
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
