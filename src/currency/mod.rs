//! Locale-aware money and date formatting.
//!
//! Formatting is configuration: a [`LocalePreset`] bundles the currency, the
//! separators, the digit grouping and the date layout of one recognized
//! locale.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const FRACTION_DIGITS: usize = 2;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Locales the formatter recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LocalePreset {
    #[default]
    #[serde(rename = "en-IN")]
    EnIn,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl LocalePreset {
    pub const ALL: [LocalePreset; 4] = [
        LocalePreset::EnIn,
        LocalePreset::EnUs,
        LocalePreset::EnGb,
        LocalePreset::DeDe,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            LocalePreset::EnIn => "en-IN",
            LocalePreset::EnUs => "en-US",
            LocalePreset::EnGb => "en-GB",
            LocalePreset::DeDe => "de-DE",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.tag().eq_ignore_ascii_case(tag.trim()))
    }

    pub fn currency(self) -> CurrencyCode {
        CurrencyCode::new(match self {
            LocalePreset::EnIn => "INR",
            LocalePreset::EnUs => "USD",
            LocalePreset::EnGb => "GBP",
            LocalePreset::DeDe => "EUR",
        })
    }

    pub fn locale(self) -> LocaleConfig {
        match self {
            LocalePreset::EnIn => LocaleConfig {
                language_tag: self.tag().into(),
                decimal_separator: '.',
                grouping_separator: ',',
                grouping: GroupingStyle::Indian,
                symbol_position: SymbolPosition::Prefix,
                date_format: DateFormatStyle::DayMonthYear,
            },
            LocalePreset::EnUs => LocaleConfig {
                language_tag: self.tag().into(),
                decimal_separator: '.',
                grouping_separator: ',',
                grouping: GroupingStyle::Thousands,
                symbol_position: SymbolPosition::Prefix,
                date_format: DateFormatStyle::MonthDayYear,
            },
            LocalePreset::EnGb => LocaleConfig {
                language_tag: self.tag().into(),
                decimal_separator: '.',
                grouping_separator: ',',
                grouping: GroupingStyle::Thousands,
                symbol_position: SymbolPosition::Prefix,
                date_format: DateFormatStyle::DayMonthYear,
            },
            LocalePreset::DeDe => LocaleConfig {
                language_tag: self.tag().into(),
                decimal_separator: ',',
                grouping_separator: '.',
                grouping: GroupingStyle::Thousands,
                symbol_position: SymbolPosition::Suffix,
                date_format: DateFormatStyle::DayDotMonthYear,
            },
        }
    }
}

impl fmt::Display for LocalePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Separators and layout rules for a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub grouping: GroupingStyle,
    pub symbol_position: SymbolPosition,
    pub date_format: DateFormatStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingStyle {
    /// 1,234,567
    Thousands,
    /// 12,34,567
    Indian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormatStyle {
    /// 1 Jan 2024
    DayMonthYear,
    /// Jan 1, 2024
    MonthDayYear,
    /// 1. Jan. 2024
    DayDotMonthYear,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "INR" => "₹".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        _ => code.into(),
    }
}

/// Formats amounts and dates for one locale preset.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    preset: LocalePreset,
    code: CurrencyCode,
    locale: LocaleConfig,
}

impl CurrencyFormatter {
    pub fn new(preset: LocalePreset) -> Self {
        Self {
            preset,
            code: preset.currency(),
            locale: preset.locale(),
        }
    }

    pub fn preset(&self) -> LocalePreset {
        self.preset
    }

    pub fn code(&self) -> &CurrencyCode {
        &self.code
    }

    /// `-₹1,00,000.00`, `$5,000.00`, `1.234,50 €`.
    pub fn format(&self, amount: f64) -> String {
        let body = format_number(&self.locale, amount.abs());
        let symbol = symbol_for(self.code.as_str());
        let unsigned = match self.locale.symbol_position {
            SymbolPosition::Prefix => format!("{symbol}{body}"),
            SymbolPosition::Suffix => format!("{body}\u{a0}{symbol}"),
        };
        if amount < 0.0 && !is_zero_at_precision(amount) {
            format!("-{unsigned}")
        } else {
            unsigned
        }
    }

    /// Magnitude prefixed with an explicit sign, as shown in list rows.
    pub fn format_signed(&self, sign: char, magnitude: f64) -> String {
        format!("{sign}{}", self.format(magnitude.abs()))
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        format_date(&self.locale, date)
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(LocalePreset::default())
    }
}

fn is_zero_at_precision(amount: f64) -> bool {
    format!("{:.*}", FRACTION_DIGITS, amount.abs())
        .chars()
        .all(|c| c == '0' || c == '.')
}

pub fn format_number(locale: &LocaleConfig, value: f64) -> String {
    let fixed = format!("{:.*}", FRACTION_DIGITS, value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let grouped = group_digits(digits, locale.grouping_separator, locale.grouping);
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{}{frac_part}", locale.decimal_separator)
    }
}

fn group_digits(digits: &str, separator: char, style: GroupingStyle) -> String {
    let mut grouped = String::new();
    let mut next_break = 3;
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count == next_break {
            grouped.insert(0, separator);
            next_break += match style {
                GroupingStyle::Thousands => 3,
                GroupingStyle::Indian => 2,
            };
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::DayMonthYear => {
            format!("{} {} {}", date.day(), month_label(date.month()), date.year())
        }
        DateFormatStyle::MonthDayYear => {
            format!("{} {}, {}", month_label(date.month()), date.day(), date.year())
        }
        DateFormatStyle::DayDotMonthYear => format!(
            "{}. {} {}",
            date.day(),
            german_month_label(date.month()),
            date.year()
        ),
    }
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

fn german_month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan.",
        2 => "Feb.",
        3 => "März",
        4 => "Apr.",
        5 => "Mai",
        6 => "Juni",
        7 => "Juli",
        8 => "Aug.",
        9 => "Sept.",
        10 => "Okt.",
        11 => "Nov.",
        12 => "Dez.",
        _ => "",
    }
}
