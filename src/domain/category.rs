use std::fmt;

use serde::{Deserialize, Serialize};

/// Spending or earning bucket shown next to a transaction.
///
/// Values outside the icon table are preserved verbatim in `Custom` and render
/// with the default icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Salary,
    Freelance,
    Investment,
    Food,
    Shopping,
    Transport,
    Entertainment,
    Utilities,
    Health,
    Other,
    Custom(String),
}

pub const DEFAULT_ICON: &str = "❓";

impl Category {
    /// Every category with a dedicated icon, in form order.
    pub const KNOWN: [Category; 10] = [
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Food,
        Category::Shopping,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Health,
        Category::Other,
    ];

    /// Exact match on the lowercase names; anything else, including a
    /// differently cased name, becomes `Custom`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "salary" => Category::Salary,
            "freelance" => Category::Freelance,
            "investment" => Category::Investment,
            "food" => Category::Food,
            "shopping" => Category::Shopping,
            "transport" => Category::Transport,
            "entertainment" => Category::Entertainment,
            "utilities" => Category::Utilities,
            "health" => Category::Health,
            "other" => Category::Other,
            _ => Category::Custom(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Food => "food",
            Category::Shopping => "shopping",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Health => "health",
            Category::Other => "other",
            Category::Custom(raw) => raw,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Salary => "💵",
            Category::Freelance => "💻",
            Category::Investment => "📈",
            Category::Food => "🍴",
            Category::Shopping => "🛍",
            Category::Transport => "🚗",
            Category::Entertainment => "🎬",
            Category::Utilities => "⚡",
            Category::Health => "💓",
            Category::Other | Category::Custom(_) => DEFAULT_ICON,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Custom(_))
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Custom(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
