//! Pure mapping from typed facets to an immutable filter expression tree.
//!
//! The tree is a conjunction of facet groups; each group is a disjunction of
//! the conditions one facet contributed. Facets that need a matching relation
//! row also record the join the executor must add. The image facet is the one
//! relation check that must NOT be expressed as a row-eliminating join:
//! "has no image" is a valid match, so it renders as an existence check.

use super::facets::{ImageFlag, SearchFacets};

/// One atomic condition inside a facet group.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetCondition {
    /// Case-insensitive substring match on name or description.
    KeywordMatch(String),
    /// The item has at least one non-thumbnail image.
    HasImages,
    /// The item has no non-thumbnail image.
    LacksImages,
    CategoryIs(i16),
    MakerIs(String),
    PlaceIs(String),
    /// `None` matches items not on display anywhere.
    DisplayedAt(Option<String>),
    CreatedNoEarlierThan(i16),
    CreatedNoLaterThan(i16),
}

/// Disjunction of the conditions contributed by a single facet.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetGroup {
    pub any_of: Vec<FacetCondition>,
}

/// Relation joins the executor must add so group conditions can see the
/// link-table columns. These restrict to items having a matching row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationJoin {
    Makers,
    Places,
}

/// Conjunction of facet groups plus the joins they require.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub groups: Vec<FacetGroup>,
    pub joins: Vec<RelationJoin>,
}

impl Predicate {
    /// Build the expression tree. Absent facets contribute nothing; each
    /// present facet contributes exactly one group.
    pub fn build(facets: &SearchFacets) -> Self {
        let mut predicate = Self::default();

        if let Some(keyword) = &facets.keyword {
            predicate.push_group(vec![FacetCondition::KeywordMatch(
                keyword.clone(),
            )]);
        }

        // Both flags together match every item, so the facet degenerates to
        // no constraint at all.
        let has = facets.image.contains(&ImageFlag::Has);
        let lacks = facets.image.contains(&ImageFlag::Lacks);
        match (has, lacks) {
            (true, true) | (false, false) => {}
            (true, false) => {
                predicate.push_group(vec![FacetCondition::HasImages]);
            }
            (false, true) => {
                predicate.push_group(vec![FacetCondition::LacksImages]);
            }
        }

        if !facets.categories.is_empty() {
            predicate.push_group(
                facets
                    .categories
                    .iter()
                    .map(|id| FacetCondition::CategoryIs(*id))
                    .collect(),
            );
        }

        if !facets.makers.is_empty() {
            predicate.joins.push(RelationJoin::Makers);
            predicate.push_group(
                facets
                    .makers
                    .iter()
                    .map(|id| FacetCondition::MakerIs(id.clone()))
                    .collect(),
            );
        }

        if !facets.places.is_empty() {
            predicate.joins.push(RelationJoin::Places);
            predicate.push_group(
                facets
                    .places
                    .iter()
                    .map(|id| FacetCondition::PlaceIs(id.clone()))
                    .collect(),
            );
        }

        if !facets.facilities.is_empty() {
            predicate.push_group(
                facets
                    .facilities
                    .iter()
                    .map(|id| FacetCondition::DisplayedAt(id.clone()))
                    .collect(),
            );
        }

        if let Some(year) = facets.creation_earliest {
            predicate
                .push_group(vec![FacetCondition::CreatedNoEarlierThan(year)]);
        }

        if let Some(year) = facets.creation_latest {
            predicate
                .push_group(vec![FacetCondition::CreatedNoLaterThan(year)]);
        }

        predicate
    }

    pub fn is_unfiltered(&self) -> bool {
        self.groups.is_empty()
    }

    fn push_group(&mut self, any_of: Vec<FacetCondition>) {
        self.groups.push(FacetGroup { any_of });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::facets::{ImageFlag, SearchFacets};

    #[test]
    fn empty_facets_build_an_unfiltered_predicate() {
        let predicate = Predicate::build(&SearchFacets::default());
        assert!(predicate.is_unfiltered());
        assert!(predicate.joins.is_empty());
    }

    #[test]
    fn each_present_facet_contributes_one_group() {
        let facets = SearchFacets {
            keyword: Some("teapot".into()),
            categories: vec![3, 5],
            creation_earliest: Some(1800),
            ..Default::default()
        };
        let predicate = Predicate::build(&facets);
        assert_eq!(predicate.groups.len(), 3);
        assert_eq!(
            predicate.groups[1].any_of,
            vec![
                FacetCondition::CategoryIs(3),
                FacetCondition::CategoryIs(5)
            ]
        );
    }

    #[test]
    fn maker_and_place_facets_require_joins() {
        let facets = SearchFacets {
            makers: vec!["M1".into()],
            places: vec!["P1".into(), "P2".into()],
            ..Default::default()
        };
        let predicate = Predicate::build(&facets);
        assert_eq!(
            predicate.joins,
            vec![RelationJoin::Makers, RelationJoin::Places]
        );
        assert_eq!(predicate.groups.len(), 2);
    }

    #[test]
    fn image_facet_with_both_flags_is_a_no_op() {
        let facets = SearchFacets {
            image: vec![ImageFlag::Has, ImageFlag::Lacks],
            ..Default::default()
        };
        let predicate = Predicate::build(&facets);
        assert!(predicate.is_unfiltered());
    }

    #[test]
    fn single_image_flag_constrains() {
        let facets = SearchFacets {
            image: vec![ImageFlag::Lacks],
            ..Default::default()
        };
        let predicate = Predicate::build(&facets);
        assert_eq!(
            predicate.groups,
            vec![FacetGroup {
                any_of: vec![FacetCondition::LacksImages]
            }]
        );
    }

    #[test]
    fn facility_sentinel_becomes_a_null_check() {
        let facets = SearchFacets {
            facilities: vec![None, Some("F2".into())],
            ..Default::default()
        };
        let predicate = Predicate::build(&facets);
        assert_eq!(
            predicate.groups[0].any_of,
            vec![
                FacetCondition::DisplayedAt(None),
                FacetCondition::DisplayedAt(Some("F2".into()))
            ]
        );
    }
}
