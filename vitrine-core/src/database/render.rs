//! Rendering of the typed query model into SQL.
//!
//! All dynamic statements are assembled with `QueryBuilder` push/push_bind so
//! every value travels as a bind parameter. Table aliases: `o` item, `c`
//! category, `t` thumbnail image, `m` maker link, `ap` associated-person
//! link, `pl` place link, `i` the image-existence subquery.

use sqlx::{Postgres, QueryBuilder};

use crate::query::{
    FacetCondition, Predicate, RelationJoin, SortField, SortOrder,
};
use crate::related::OverlapQuery;

/// Columns every item-summary row carries: the item itself, its category
/// name, and its thumbnail path when one exists.
const ITEM_SUMMARY_COLUMNS: &str = "o.id, o.name, o.description, \
     o.category_id, o.creation_earliest, o.creation_latest, \
     o.on_display_at, o.accession, o.collections_url, \
     c.name AS category_name, t.image_public_path AS thumbnail_path";

const ITEM_SUMMARY_FROM: &str = " FROM collections_item o \
     INNER JOIN collections_item_category c ON c.id = o.category_id \
     LEFT JOIN collections_item_image t \
       ON t.item_id = o.id AND t.is_thumb";

/// Render the paginated search row query. DISTINCT absorbs the row fan-out
/// of the maker/place relation joins; the thumbnail and category joins are
/// one-row-per-item so they never multiply.
pub fn select_items(
    predicate: &Predicate,
    sort: &[(SortField, SortOrder)],
    limit: i64,
    offset: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT DISTINCT ");
    builder.push(ITEM_SUMMARY_COLUMNS);
    builder.push(ITEM_SUMMARY_FROM);
    push_relation_joins(&mut builder, &predicate.joins);
    builder.push(" WHERE 1=1");
    push_groups(&mut builder, predicate);
    push_order_by(&mut builder, sort);
    builder.push(" LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);
    builder
}

/// Render the matching total count for the same predicate, ignoring the
/// pagination window. DISTINCT keeps relation-join fan-out out of the count.
pub fn count_items(predicate: &Predicate) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(
        "SELECT COUNT(DISTINCT o.id) FROM collections_item o",
    );
    push_relation_joins(&mut builder, &predicate.joins);
    builder.push(" WHERE 1=1");
    push_groups(&mut builder, predicate);
    builder
}

/// Render one attribute-overlap query, capped at `limit` rows, optionally
/// excluding the anchor item.
pub fn select_overlap(
    query: &OverlapQuery,
    exclude_item: Option<&str>,
    limit: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
    builder.push(ITEM_SUMMARY_COLUMNS);
    builder.push(ITEM_SUMMARY_FROM);

    match query {
        OverlapQuery::SharedMaker(person_id) => {
            builder.push(
                " INNER JOIN collections_item_maker m ON m.item_id = o.id \
                 WHERE m.person_id = ",
            );
            builder.push_bind(person_id.clone());
        }
        OverlapQuery::SharedAssociate(person_id) => {
            builder.push(
                " INNER JOIN collections_item_person ap \
                   ON ap.item_id = o.id \
                 WHERE ap.person_id = ",
            );
            builder.push_bind(person_id.clone());
        }
        OverlapQuery::SharedPlace(place_id) => {
            builder.push(
                " INNER JOIN collections_item_place pl ON pl.item_id = o.id \
                 WHERE pl.place_id = ",
            );
            builder.push_bind(place_id.clone());
        }
        OverlapQuery::SharedCategory(category_id) => {
            builder.push(" WHERE o.category_id = ");
            builder.push_bind(*category_id);
        }
    }

    if let Some(anchor_id) = exclude_item {
        builder.push(" AND o.id <> ");
        builder.push_bind(anchor_id.to_owned());
    }

    builder.push(" LIMIT ");
    builder.push_bind(limit);
    builder
}

fn push_order_by(
    builder: &mut QueryBuilder<'static, Postgres>,
    sort: &[(SortField, SortOrder)],
) {
    if sort.is_empty() {
        return;
    }
    builder.push(" ORDER BY ");
    for (position, (field, order)) in sort.iter().enumerate() {
        if position > 0 {
            builder.push(", ");
        }
        builder.push(field.column());
        builder.push(" ");
        builder.push(order.sql());
    }
}

fn push_relation_joins(
    builder: &mut QueryBuilder<'static, Postgres>,
    joins: &[RelationJoin],
) {
    for join in joins {
        match join {
            RelationJoin::Makers => {
                builder.push(
                    " INNER JOIN collections_item_maker m \
                       ON m.item_id = o.id",
                );
            }
            RelationJoin::Places => {
                builder.push(
                    " INNER JOIN collections_item_place pl \
                       ON pl.item_id = o.id",
                );
            }
        }
    }
}

fn push_groups(
    builder: &mut QueryBuilder<'static, Postgres>,
    predicate: &Predicate,
) {
    for group in &predicate.groups {
        builder.push(" AND (");
        for (position, condition) in group.any_of.iter().enumerate() {
            if position > 0 {
                builder.push(" OR ");
            }
            push_condition(builder, condition);
        }
        builder.push(")");
    }
}

fn push_condition(
    builder: &mut QueryBuilder<'static, Postgres>,
    condition: &FacetCondition,
) {
    match condition {
        FacetCondition::KeywordMatch(keyword) => {
            let pattern = format!("%{}%", escape_like_literal(keyword));
            builder.push("(o.name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" ESCAPE E'\\\\'");
            builder.push(" OR o.description ILIKE ");
            builder.push_bind(pattern);
            builder.push(" ESCAPE E'\\\\'");
            builder.push(")");
        }
        FacetCondition::HasImages => {
            builder.push(
                "EXISTS (SELECT 1 FROM collections_item_image i \
                  WHERE i.item_id = o.id AND NOT i.is_thumb)",
            );
        }
        FacetCondition::LacksImages => {
            builder.push(
                "NOT EXISTS (SELECT 1 FROM collections_item_image i \
                  WHERE i.item_id = o.id AND NOT i.is_thumb)",
            );
        }
        FacetCondition::CategoryIs(id) => {
            builder.push("o.category_id = ");
            builder.push_bind(*id);
        }
        FacetCondition::MakerIs(person_id) => {
            builder.push("m.person_id = ");
            builder.push_bind(person_id.clone());
        }
        FacetCondition::PlaceIs(place_id) => {
            builder.push("pl.place_id = ");
            builder.push_bind(place_id.clone());
        }
        FacetCondition::DisplayedAt(Some(facility_id)) => {
            builder.push("o.on_display_at = ");
            builder.push_bind(facility_id.clone());
        }
        FacetCondition::DisplayedAt(None) => {
            builder.push("o.on_display_at IS NULL");
        }
        FacetCondition::CreatedNoEarlierThan(year) => {
            builder.push("o.creation_earliest >= ");
            builder.push_bind(*year);
        }
        FacetCondition::CreatedNoLaterThan(year) => {
            builder.push("o.creation_latest <= ");
            builder.push_bind(*year);
        }
    }
}

fn escape_like_literal(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '%' => out.push_str("\\%"),
            '_' => out.push_str("\\_"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{SearchFacets, SortCode, sort_keys};

    fn predicate_for(facets: SearchFacets) -> Predicate {
        Predicate::build(&facets)
    }

    #[test]
    fn unfiltered_search_renders_no_conditions() {
        let builder =
            select_items(&Predicate::default(), &[], 10, 0);
        let sql = builder.sql();
        assert!(sql.contains("WHERE 1=1 LIMIT "));
        assert!(!sql.contains(" AND ("));
        assert!(!sql.contains("INNER JOIN collections_item_maker"));
    }

    #[test]
    fn keyword_renders_name_or_description_ilike() {
        let predicate = predicate_for(SearchFacets {
            keyword: Some("vase".into()),
            ..Default::default()
        });
        let builder = select_items(&predicate, &[], 10, 0);
        let sql = builder.sql();
        assert!(sql.contains("o.name ILIKE "));
        assert!(sql.contains(" OR o.description ILIKE "));
    }

    #[test]
    fn maker_facet_adds_the_join_and_the_or_group() {
        let predicate = predicate_for(SearchFacets {
            makers: vec!["M1".into(), "M2".into()],
            ..Default::default()
        });
        let builder = select_items(&predicate, &[], 10, 0);
        let sql = builder.sql();
        assert!(sql.contains("INNER JOIN collections_item_maker m"));
        assert!(sql.contains("(m.person_id = $1 OR m.person_id = $2)"));
    }

    #[test]
    fn image_facet_renders_an_existence_check_not_a_join() {
        let predicate = predicate_for(SearchFacets {
            image: vec![crate::query::ImageFlag::Lacks],
            ..Default::default()
        });
        let builder = select_items(&predicate, &[], 10, 0);
        let sql = builder.sql();
        assert!(sql.contains("NOT EXISTS (SELECT 1 FROM collections_item_image"));
        assert!(!sql.contains("INNER JOIN collections_item_image"));
    }

    #[test]
    fn facility_sentinel_renders_is_null() {
        let predicate = predicate_for(SearchFacets {
            facilities: vec![None, Some("F1".into())],
            ..Default::default()
        });
        let builder = select_items(&predicate, &[], 10, 0);
        let sql = builder.sql();
        assert!(sql.contains("o.on_display_at IS NULL"));
        assert!(sql.contains("o.on_display_at = "));
    }

    #[test]
    fn sort_keys_render_in_order() {
        let keys = sort_keys(Some(SortCode::CreationDescending));
        let builder = select_items(&Predicate::default(), &keys, 10, 0);
        let sql = builder.sql();
        assert!(sql.contains(
            "ORDER BY o.creation_earliest DESC, o.creation_latest DESC"
        ));
    }

    #[test]
    fn count_ignores_pagination_and_counts_distinct_items() {
        let predicate = predicate_for(SearchFacets {
            makers: vec!["M1".into()],
            ..Default::default()
        });
        let builder = count_items(&predicate);
        let sql = builder.sql();
        assert!(sql.starts_with("SELECT COUNT(DISTINCT o.id)"));
        assert!(sql.contains("INNER JOIN collections_item_maker m"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("ORDER BY"));
    }

    #[test]
    fn overlap_queries_exclude_the_anchor_and_cap_rows() {
        let builder = select_overlap(
            &OverlapQuery::SharedMaker("M1".into()),
            Some("I1"),
            4,
        );
        let sql = builder.sql();
        assert!(sql.contains("WHERE m.person_id = $1"));
        assert!(sql.contains("o.id <> $2"));
        assert!(sql.contains("LIMIT $3"));
    }

    #[test]
    fn category_overlap_needs_no_relation_join() {
        let builder =
            select_overlap(&OverlapQuery::SharedCategory(7), Some("I1"), 4);
        let sql = builder.sql();
        assert!(sql.contains("WHERE o.category_id = $1"));
        assert!(!sql.contains("INNER JOIN collections_item_maker"));
    }

    #[test]
    fn person_anchor_overlap_has_no_exclusion() {
        let builder = select_overlap(
            &OverlapQuery::SharedAssociate("C1".into()),
            None,
            4,
        );
        let sql = builder.sql();
        assert!(sql.contains("ap.person_id = $1"));
        assert!(!sql.contains("o.id <>"));
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like_literal("50%_\\"), "50\\%\\_\\\\");
    }
}
