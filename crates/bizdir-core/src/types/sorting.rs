//! Sorting types for list queries.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Asc
    }
}

impl SortDirection {
    /// Parse a caller-supplied direction, case-insensitively.
    ///
    /// Anything that is not exactly `asc`/`desc` falls back to ascending.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "desc" => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("Asc"), SortDirection::Asc);
    }

    #[test]
    fn test_parse_invalid_falls_back_to_asc() {
        assert_eq!(SortDirection::parse(""), SortDirection::Asc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc; DROP TABLE"), SortDirection::Asc);
    }

    #[test]
    fn test_as_sql() {
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }
}
