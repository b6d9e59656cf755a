//! Category filter narrowing a search to one policy category.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The active category selection. `All` admits every document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` (any case) and blank input select every category.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(s.to_string())
        }
    }

    /// Exact comparison against a document's category label.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(c) => c,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
