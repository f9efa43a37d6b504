use colored::Colorize;

use crate::currency::CurrencyFormatter;
use crate::view::ChartSeries;

const BAR_WIDTH: usize = 30;

/// Renders the income/expense series as two horizontal bars.
pub fn render_bars(series: &ChartSeries, formatter: &CurrencyFormatter, plain: bool) -> String {
    let shares = series.shares();
    let label_width = series.labels.iter().map(|l| l.len()).max().unwrap_or(0);

    (0..2)
        .map(|idx| {
            let filled = (shares[idx] * BAR_WIDTH as f64).round() as usize;
            let (full, empty) = if plain { ('#', '.') } else { ('█', '░') };
            let mut bar = full.to_string().repeat(filled.min(BAR_WIDTH));
            if !plain {
                let (r, g, b) = hex_to_rgb(series.colors[idx]);
                bar = bar.truecolor(r, g, b).to_string();
            }
            bar.push_str(&empty.to_string().repeat(BAR_WIDTH - filled.min(BAR_WIDTH)));
            format!(
                "{:<width$} {} {:>5.1}%  {}",
                series.labels[idx],
                bar,
                shares[idx] * 100.0,
                formatter.format(series.data[idx]),
                width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
            .unwrap_or(0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}
