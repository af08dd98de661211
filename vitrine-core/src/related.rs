//! Attribute-overlap planning and merging for related items.
//!
//! The plan is a list of independent overlap queries derived from the anchor;
//! the executor fans them out concurrently and the merge is a pure function
//! over the completed result lists: concatenate in plan order, keep the first
//! occurrence of each item, cap the result. That rule keeps the output
//! deterministic even when one item satisfies several overlap queries.

use std::collections::HashSet;

use crate::catalog::{ItemDetail, ItemSummary};

/// Maximum related items returned, and the row cap of each overlap query.
pub const RELATED_LIMIT: usize = 4;

/// One attribute-overlap query against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlapQuery {
    /// Items sharing this maker.
    SharedMaker(String),
    /// Items sharing this associated person.
    SharedAssociate(String),
    /// Items sharing this place.
    SharedPlace(String),
    /// Items sharing this category.
    SharedCategory(i16),
}

/// Plan the overlap queries for an item anchor: one per maker in anchor row
/// order, then one per associated person, then one per place, then exactly
/// one category query. An anchor with no relations still gets the category
/// fallback.
pub fn item_overlap_plan(anchor: &ItemDetail) -> Vec<OverlapQuery> {
    let mut plan = Vec::with_capacity(
        anchor.makers.len()
            + anchor.associated_people.len()
            + anchor.places.len()
            + 1,
    );
    plan.extend(
        anchor
            .makers
            .iter()
            .map(|person| OverlapQuery::SharedMaker(person.id.clone())),
    );
    plan.extend(
        anchor
            .associated_people
            .iter()
            .map(|person| OverlapQuery::SharedAssociate(person.id.clone())),
    );
    plan.extend(
        anchor
            .places
            .iter()
            .map(|place| OverlapQuery::SharedPlace(place.id.clone())),
    );
    plan.push(OverlapQuery::SharedCategory(anchor.item.category_id));
    plan
}

/// Plan the overlap queries for a person anchor: items they made, then items
/// they are associated with.
pub fn person_overlap_plan(person_id: &str) -> Vec<OverlapQuery> {
    vec![
        OverlapQuery::SharedMaker(person_id.to_owned()),
        OverlapQuery::SharedAssociate(person_id.to_owned()),
    ]
}

/// Merge completed overlap results: concatenate in plan order, stable-dedup
/// by item id, truncate to [`RELATED_LIMIT`].
pub fn merge_related(batches: Vec<Vec<ItemSummary>>) -> Vec<ItemSummary> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(RELATED_LIMIT);

    for summary in batches.into_iter().flatten() {
        if seen.insert(summary.item.id.clone()) {
            merged.push(summary);
            if merged.len() == RELATED_LIMIT {
                break;
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Item, Person, Place};

    fn item(id: &str, category_id: i16) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {id}"),
            description: String::new(),
            category_id,
            creation_earliest: None,
            creation_latest: None,
            on_display_at: None,
            accession: None,
            collections_url: None,
        }
    }

    fn summary(id: &str) -> ItemSummary {
        ItemSummary {
            item: item(id, 1),
            category: Category {
                id: 1,
                name: "Ceramics".into(),
            },
            thumbnail: None,
        }
    }

    fn person(id: &str) -> Person {
        Person {
            id: id.to_string(),
            name: Some(format!("Person {id}")),
            birth_date: None,
            death_date: None,
            occupation: None,
            nationality: None,
            note: None,
            description: None,
            collections_url: None,
        }
    }

    fn detail(
        makers: &[&str],
        associates: &[&str],
        places: &[&str],
    ) -> ItemDetail {
        ItemDetail {
            item: item("I1", 7),
            category: Category {
                id: 7,
                name: "Ceramics".into(),
            },
            facility: None,
            images: Vec::new(),
            makers: makers.iter().map(|id| person(id)).collect(),
            associated_people: associates.iter().map(|id| person(id)).collect(),
            places: places
                .iter()
                .map(|id| Place {
                    id: id.to_string(),
                    name: format!("Place {id}"),
                })
                .collect(),
        }
    }

    #[test]
    fn plan_orders_makers_people_places_then_category() {
        let plan = item_overlap_plan(&detail(&["M1", "M2"], &["A1"], &["P1"]));
        assert_eq!(
            plan,
            vec![
                OverlapQuery::SharedMaker("M1".into()),
                OverlapQuery::SharedMaker("M2".into()),
                OverlapQuery::SharedAssociate("A1".into()),
                OverlapQuery::SharedPlace("P1".into()),
                OverlapQuery::SharedCategory(7),
            ]
        );
    }

    #[test]
    fn bare_anchor_plans_only_the_category_fallback() {
        let plan = item_overlap_plan(&detail(&[], &[], &[]));
        assert_eq!(plan, vec![OverlapQuery::SharedCategory(7)]);
    }

    #[test]
    fn person_plan_is_maker_then_associate() {
        assert_eq!(
            person_overlap_plan("C1"),
            vec![
                OverlapQuery::SharedMaker("C1".into()),
                OverlapQuery::SharedAssociate("C1".into()),
            ]
        );
    }

    #[test]
    fn merge_keeps_first_occurrence_and_caps_at_four() {
        // First 4 by M1 overlap win even though the category query would
        // also match I7/I8.
        let maker_matches = vec![
            summary("I2"),
            summary("I3"),
            summary("I4"),
            summary("I5"),
        ];
        let category_matches = vec![summary("I7"), summary("I8")];
        let merged = merge_related(vec![maker_matches, category_matches]);
        let ids: Vec<&str> =
            merged.iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, vec!["I2", "I3", "I4", "I5"]);
    }

    #[test]
    fn merge_dedups_across_batches_stably() {
        let merged = merge_related(vec![
            vec![summary("I2"), summary("I3")],
            vec![summary("I3"), summary("I4"), summary("I2")],
        ]);
        let ids: Vec<&str> =
            merged.iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, vec!["I2", "I3", "I4"]);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        assert!(merge_related(Vec::new()).is_empty());
        assert!(merge_related(vec![Vec::new(), Vec::new()]).is_empty());
    }

    #[test]
    fn short_batches_fall_through_to_later_queries() {
        let merged = merge_related(vec![
            vec![summary("I2")],
            vec![summary("I7"), summary("I8")],
        ]);
        let ids: Vec<&str> =
            merged.iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, vec!["I2", "I7", "I8"]);
    }
}
