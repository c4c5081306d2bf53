//! Sort keys and directions for the catalog view.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field the catalog view is ordered by.
///
/// `Default` keeps catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    #[serde(alias = "none")]
    Default,
    Price,
    Rating,
    #[serde(rename = "sales", alias = "salesCount")]
    SalesCount,
    CreatedAt,
}

/// Error returned when a sort key or direction string is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort option: {0}")]
pub struct SortKeyParseError(pub String);

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Price => write!(f, "price"),
            Self::Rating => write!(f, "rating"),
            Self::SalesCount => write!(f, "sales"),
            Self::CreatedAt => write!(f, "createdAt"),
        }
    }
}

impl FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "none" => Ok(Self::Default),
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            "sales" | "salescount" => Ok(Self::SalesCount),
            "createdat" | "created" | "newest" => Ok(Self::CreatedAt),
            _ => Err(SortKeyParseError(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Orient an ascending comparison result.
    ///
    /// `Equal` stays `Equal` in both directions, so a stable sort keeps ties
    /// in their incoming order regardless of direction.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(SortKeyParseError(s.to_string())),
        }
    }
}
