//! Terminal implementation of [`View`].

use colored::Colorize;

use crate::{
    cli::{
        core::CliMode,
        io,
        output::{self, current_preferences},
        ui::{
            chart::render_bars,
            table_renderer::{Table, TableColumn},
        },
    },
    config::Theme,
    currency::CurrencyFormatter,
    domain::TransactionKind,
    view::{ChartSeries, RenderedList, SummaryView, TransactionRow, View},
};

const TITLE_WIDTH: usize = 32;

/// Keeps the latest rendered state and prints it on demand.
pub struct TerminalView {
    mode: CliMode,
    list: RenderedList,
    summary: Option<SummaryView>,
    chart: Option<ChartSeries>,
    preconfirmed: Option<bool>,
}

impl TerminalView {
    pub fn new(mode: CliMode) -> Self {
        Self {
            mode,
            list: RenderedList::default(),
            summary: None,
            chart: None,
            preconfirmed: None,
        }
    }

    /// Answers the next confirmation prompt without asking.
    pub fn preconfirm(&mut self, answer: bool) {
        self.preconfirmed = Some(answer);
    }

    pub fn list(&self) -> &RenderedList {
        &self.list
    }

    pub fn print_list(&self) {
        if self.list.is_empty() {
            io::print_info("No transactions yet.");
            return;
        }
        let mut table = Table::new(vec![
            TableColumn::left(""),
            TableColumn::right("ID"),
            TableColumn::left("Title").max_width(TITLE_WIDTH),
            TableColumn::left("Details"),
            TableColumn::right("Amount"),
        ]);
        for row in self.list.visible() {
            table.push(vec![
                row.icon.to_string(),
                row.id.to_string(),
                row.title.clone(),
                row.caption.clone(),
                colorize_amount(row),
            ]);
        }
        output::info(table.render());
    }

    pub fn print_summary(&self) {
        let Some(summary) = &self.summary else {
            return;
        };
        output::info(format!(
            "Balance: {}  |  Income: {}  |  Expenses: {}",
            summary.balance, summary.income, summary.expense
        ));
    }

    pub fn print_chart(&self, formatter: &CurrencyFormatter) {
        let Some(series) = &self.chart else {
            return;
        };
        if series.total() <= 0.0 {
            io::print_info("Nothing to chart yet.");
            return;
        }
        output::info(render_bars(series, formatter, current_preferences().plain_mode));
    }
}

fn colorize_amount(row: &TransactionRow) -> String {
    let prefs = current_preferences();
    if prefs.plain_mode {
        return row.amount.clone();
    }
    match (row.kind, prefs.theme) {
        (TransactionKind::Income, Theme::Light) => row.amount.green().to_string(),
        (TransactionKind::Income, Theme::Dark) => row.amount.bright_green().to_string(),
        (TransactionKind::Expense, Theme::Light) => row.amount.red().to_string(),
        (TransactionKind::Expense, Theme::Dark) => row.amount.bright_red().to_string(),
    }
}

impl View for TerminalView {
    fn render_list(&mut self, rows: Vec<TransactionRow>) {
        self.list.replace(rows);
    }

    fn render_row(&mut self, row: TransactionRow) {
        io::print_success(format!(
            "Added #{} {} ({}) {}",
            row.id,
            row.title,
            row.caption,
            colorize_amount(&row)
        ));
        self.list.prepend(row);
    }

    fn render_summary(&mut self, summary: &SummaryView) {
        self.summary = Some(summary.clone());
    }

    fn render_chart(&mut self, series: &ChartSeries) {
        self.chart = Some(series.clone());
    }

    fn apply_filter(&mut self, query: &str) -> usize {
        self.list.apply_filter(query)
    }

    fn alert(&mut self, message: &str) {
        io::print_error(message);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if let Some(answer) = self.preconfirmed.take() {
            return answer;
        }
        match self.mode {
            CliMode::Interactive => io::confirm_action(prompt, false).unwrap_or(false),
            CliMode::Script => {
                io::print_warning(format!("{prompt} Confirmation required; rerun with `--yes`."));
                false
            }
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        output::set_theme(theme);
    }
}
