//! Sort codes and their resolution into ordered tie-break keys.

use crate::error::{CatalogError, Result};

/// The enumerated sort codes the search endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCode {
    NameAscending,
    NameDescending,
    CreationAscending,
    CreationDescending,
}

impl SortCode {
    /// Map a numeric code to a sort. Codes outside the table mean "no
    /// explicit order" and resolve to `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::NameAscending),
            2 => Some(Self::NameDescending),
            3 => Some(Self::CreationAscending),
            4 => Some(Self::CreationDescending),
            _ => None,
        }
    }

    /// Parse the raw `sort` parameter if present. A non-numeric value is a
    /// validation error.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Option<Self>> {
        let Some(value) = pairs
            .iter()
            .find(|(name, value)| name == "sort" && !value.is_empty())
            .map(|(_, value)| value)
        else {
            return Ok(None);
        };
        let code = value.parse::<i32>().map_err(|_| {
            CatalogError::Validation(format!(
                "sort must be an integer, got \"{value}\""
            ))
        })?;
        Ok(Self::from_code(code))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    CreationEarliest,
    CreationLatest,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "o.name",
            Self::CreationEarliest => "o.creation_earliest",
            Self::CreationLatest => "o.creation_latest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Resolve a sort code into its ordered (field, direction) tie-break keys.
/// No code resolves to an empty list: the datastore's stable order applies.
pub fn sort_keys(code: Option<SortCode>) -> Vec<(SortField, SortOrder)> {
    match code {
        None => Vec::new(),
        Some(SortCode::NameAscending) => {
            vec![(SortField::Name, SortOrder::Ascending)]
        }
        Some(SortCode::NameDescending) => {
            vec![(SortField::Name, SortOrder::Descending)]
        }
        Some(SortCode::CreationAscending) => vec![
            (SortField::CreationEarliest, SortOrder::Ascending),
            (SortField::CreationLatest, SortOrder::Ascending),
        ],
        Some(SortCode::CreationDescending) => vec![
            (SortField::CreationEarliest, SortOrder::Descending),
            (SortField::CreationLatest, SortOrder::Descending),
        ],
    }
}
