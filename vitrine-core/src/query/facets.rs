//! Typed facet options and the parsing of raw transport parameters.
//!
//! Facets arrive as repeatable `name=value` pairs. A facet supplied once is
//! still normalized into a one-element set where the facet is logically
//! multi-valued. Malformed values are rejected; unrecognized parameter names
//! are ignored (absence of a facet never constrains the result set, and the
//! transport layer owns its own extra parameters).

use crate::error::{CatalogError, Result};

/// Default page size when `page[size]` is absent.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// The two recognized flags of the `image` facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFlag {
    /// "1": the item has at least one non-thumbnail image.
    Has,
    /// "0": the item has no non-thumbnail image.
    Lacks,
}

/// All recognized facet inputs, normalized. Every field is optional and
/// independent; an empty vec or `None` contributes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFacets {
    pub keyword: Option<String>,
    pub image: Vec<ImageFlag>,
    pub categories: Vec<i16>,
    pub makers: Vec<String>,
    pub places: Vec<String>,
    /// Facility ids; `None` is the "not on display" sentinel ("0" in
    /// transport).
    pub facilities: Vec<Option<String>>,
    pub creation_earliest: Option<i16>,
    pub creation_latest: Option<i16>,
}

impl SearchFacets {
    /// Normalize raw query pairs into typed facets.
    ///
    /// Empty values are treated as absent. Non-numeric values for numeric
    /// facets are a validation error, never silently dropped.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let mut facets = Self::default();

        for (name, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match name.as_str() {
                "query" => facets.keyword = Some(value.clone()),
                "image" => facets.image.push(parse_image_flag(value)?),
                "category" => {
                    facets.categories.push(parse_i16(value, "category")?);
                }
                "maker" => facets.makers.push(value.clone()),
                "place" => facets.places.push(value.clone()),
                "facility" => {
                    // "0" selects items not on display anywhere.
                    if value == "0" {
                        facets.facilities.push(None);
                    } else {
                        facets.facilities.push(Some(value.clone()));
                    }
                }
                "creationEarliest" => {
                    facets.creation_earliest =
                        Some(parse_i16(value, "creationEarliest")?);
                }
                "creationLatest" => {
                    facets.creation_latest =
                        Some(parse_i16(value, "creationLatest")?);
                }
                _ => {}
            }
        }

        Ok(facets)
    }

    /// True when no facet contributes any constraint.
    pub fn is_empty(&self) -> bool {
        self.keyword.is_none()
            && self.image.is_empty()
            && self.categories.is_empty()
            && self.makers.is_empty()
            && self.places.is_empty()
            && self.facilities.is_empty()
            && self.creation_earliest.is_none()
            && self.creation_latest.is_none()
    }
}

/// Pagination window. Offset is `number * size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    pub fn offset(&self) -> i64 {
        self.number * self.size
    }

    /// Parse `page[number]` / `page[size]` pairs, applying defaults.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let mut page = Self::default();

        for (name, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match name.as_str() {
                "page[number]" => {
                    page.number = parse_non_negative(value, "page[number]")?;
                }
                "page[size]" => {
                    page.size = parse_non_negative(value, "page[size]")?;
                }
                _ => {}
            }
        }

        Ok(page)
    }
}

fn parse_image_flag(value: &str) -> Result<ImageFlag> {
    match value {
        "1" => Ok(ImageFlag::Has),
        "0" => Ok(ImageFlag::Lacks),
        other => Err(CatalogError::Validation(format!(
            "image facet accepts \"0\" or \"1\", got \"{other}\""
        ))),
    }
}

fn parse_i16(value: &str, facet: &str) -> Result<i16> {
    value.parse::<i16>().map_err(|_| {
        CatalogError::Validation(format!(
            "{facet} facet must be an integer, got \"{value}\""
        ))
    })
}

fn parse_non_negative(value: &str, param: &str) -> Result<i64> {
    let parsed = value.parse::<i64>().map_err(|_| {
        CatalogError::Validation(format!(
            "{param} must be an integer, got \"{value}\""
        ))
    })?;
    if parsed < 0 {
        return Err(CatalogError::Validation(format!(
            "{param} must not be negative"
        )));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn absent_facets_parse_to_empty() {
        let facets = SearchFacets::from_pairs(&[]).unwrap();
        assert!(facets.is_empty());
    }

    #[test]
    fn scalar_facet_normalizes_to_one_element_set() {
        let facets =
            SearchFacets::from_pairs(&pairs(&[("category", "3")])).unwrap();
        assert_eq!(facets.categories, vec![3]);
    }

    #[test]
    fn repeated_keys_accumulate() {
        let facets = SearchFacets::from_pairs(&pairs(&[
            ("category", "3"),
            ("category", "5"),
            ("maker", "M1"),
            ("maker", "M2"),
        ]))
        .unwrap();
        assert_eq!(facets.categories, vec![3, 5]);
        assert_eq!(facets.makers, vec!["M1", "M2"]);
    }

    #[test]
    fn facility_zero_is_the_null_sentinel() {
        let facets = SearchFacets::from_pairs(&pairs(&[
            ("facility", "0"),
            ("facility", "F9"),
        ]))
        .unwrap();
        assert_eq!(facets.facilities, vec![None, Some("F9".to_string())]);
    }

    #[test]
    fn empty_values_are_treated_as_absent() {
        let facets = SearchFacets::from_pairs(&pairs(&[
            ("query", ""),
            ("category", ""),
        ]))
        .unwrap();
        assert!(facets.is_empty());
    }

    #[test]
    fn malformed_category_is_rejected() {
        let err = SearchFacets::from_pairs(&pairs(&[("category", "pots")]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn malformed_image_flag_is_rejected() {
        let err =
            SearchFacets::from_pairs(&pairs(&[("image", "yes")])).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn creation_bounds_parse_as_years() {
        let facets = SearchFacets::from_pairs(&pairs(&[
            ("creationEarliest", "1850"),
            ("creationLatest", "1900"),
        ]))
        .unwrap();
        assert_eq!(facets.creation_earliest, Some(1850));
        assert_eq!(facets.creation_latest, Some(1900));
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let facets = SearchFacets::from_pairs(&pairs(&[
            ("sort", "1"),
            ("page[size]", "2"),
            ("utm_source", "newsletter"),
        ]))
        .unwrap();
        assert!(facets.is_empty());
    }

    #[test]
    fn page_defaults_apply() {
        let page = Page::from_pairs(&[]).unwrap();
        assert_eq!(page.number, 0);
        assert_eq!(page.size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn page_offset_is_number_times_size() {
        let page = Page::from_pairs(&pairs(&[
            ("page[number]", "3"),
            ("page[size]", "25"),
        ]))
        .unwrap();
        assert_eq!(page.offset(), 75);
    }

    #[test]
    fn negative_page_number_is_rejected() {
        let err =
            Page::from_pairs(&pairs(&[("page[number]", "-1")])).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}
