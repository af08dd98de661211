//! Item search, detail lookup, and the related-items fan-out.

use futures::future::try_join_all;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::catalog::{
    Category, Facility, ImageRecord, Item, ItemDetail, ItemSummary, Person,
    Place, SearchResults,
};
use crate::database::render;
use crate::error::Result;
use crate::query::{Page, Predicate, SearchFacets, SortCode, sort_keys};
use crate::related::{
    OverlapQuery, RELATED_LIMIT, item_overlap_plan, merge_related,
    person_overlap_plan,
};

#[derive(Clone, Debug)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct ItemSummaryRow {
    id: String,
    name: String,
    description: String,
    category_id: i16,
    creation_earliest: Option<i16>,
    creation_latest: Option<i16>,
    on_display_at: Option<String>,
    accession: Option<String>,
    collections_url: Option<String>,
    category_name: String,
    thumbnail_path: Option<String>,
}

impl From<ItemSummaryRow> for ItemSummary {
    fn from(row: ItemSummaryRow) -> Self {
        let thumbnail = row.thumbnail_path.map(|path| ImageRecord {
            item_id: row.id.clone(),
            image_public_path: path,
            is_thumb: true,
        });
        Self {
            category: Category {
                id: row.category_id,
                name: row.category_name,
            },
            thumbnail,
            item: Item {
                id: row.id,
                name: row.name,
                description: row.description,
                category_id: row.category_id,
                creation_earliest: row.creation_earliest,
                creation_latest: row.creation_latest,
                on_display_at: row.on_display_at,
                accession: row.accession,
                collections_url: row.collections_url,
            },
        }
    }
}

#[derive(Debug, FromRow)]
struct ItemDetailRow {
    id: String,
    name: String,
    description: String,
    category_id: i16,
    creation_earliest: Option<i16>,
    creation_latest: Option<i16>,
    on_display_at: Option<String>,
    accession: Option<String>,
    collections_url: Option<String>,
    category_name: String,
    facility_name: Option<String>,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run one faceted search: the paginated row query plus the total match
    /// count for the same predicate.
    pub async fn search(
        &self,
        facets: &SearchFacets,
        sort: Option<SortCode>,
        page: Page,
    ) -> Result<SearchResults> {
        let predicate = Predicate::build(facets);
        let keys = sort_keys(sort);

        let rows: Vec<ItemSummaryRow> =
            render::select_items(&predicate, &keys, page.size, page.offset())
                .build_query_as()
                .fetch_all(&self.pool)
                .await?;

        let total: i64 = render::count_items(&predicate)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        debug!(
            returned = rows.len(),
            total, "faceted search executed"
        );

        Ok(SearchResults {
            items: rows.into_iter().map(ItemSummary::from).collect(),
            total,
        })
    }

    /// Load one item with every relation the detail response needs. The
    /// relation loads are independent and run concurrently.
    pub async fn item_detail(
        &self,
        item_id: &str,
    ) -> Result<Option<ItemDetail>> {
        let row: Option<ItemDetailRow> = sqlx::query_as(
            "SELECT o.id, o.name, o.description, o.category_id, \
                    o.creation_earliest, o.creation_latest, \
                    o.on_display_at, o.accession, o.collections_url, \
                    c.name AS category_name, f.name AS facility_name \
             FROM collections_item o \
             INNER JOIN collections_item_category c ON c.id = o.category_id \
             LEFT JOIN collections_facility f ON f.id = o.on_display_at \
             WHERE o.id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let (images, makers, associated_people, places) = futures::try_join!(
            self.item_images(item_id),
            self.item_makers(item_id),
            self.item_associated_people(item_id),
            self.item_places(item_id),
        )?;

        let facility = match (&row.on_display_at, row.facility_name) {
            (Some(id), Some(name)) => Some(Facility {
                id: id.clone(),
                name,
            }),
            _ => None,
        };

        Ok(Some(ItemDetail {
            category: Category {
                id: row.category_id,
                name: row.category_name,
            },
            facility,
            images,
            makers,
            associated_people,
            places,
            item: Item {
                id: row.id,
                name: row.name,
                description: row.description,
                category_id: row.category_id,
                creation_earliest: row.creation_earliest,
                creation_latest: row.creation_latest,
                on_display_at: row.on_display_at,
                accession: row.accession,
                collections_url: row.collections_url,
            },
        }))
    }

    /// Compute the related items for an item anchor: fan out one overlap
    /// query per planned attribute, wait for all of them, then merge.
    pub async fn related_to_item(
        &self,
        anchor: &ItemDetail,
    ) -> Result<Vec<ItemSummary>> {
        let plan = item_overlap_plan(anchor);
        debug!(anchor = %anchor.item.id, queries = plan.len(), "related-item fan-out");

        let batches = try_join_all(
            plan.iter()
                .map(|query| self.fetch_overlap(query, Some(&anchor.item.id))),
        )
        .await?;

        Ok(merge_related(batches))
    }

    /// Related items for a person anchor: items they made, items they are
    /// associated with.
    pub async fn related_to_person(
        &self,
        person_id: &str,
    ) -> Result<Vec<ItemSummary>> {
        let plan = person_overlap_plan(person_id);

        let batches = try_join_all(
            plan.iter().map(|query| self.fetch_overlap(query, None)),
        )
        .await?;

        Ok(merge_related(batches))
    }

    async fn fetch_overlap(
        &self,
        query: &OverlapQuery,
        exclude_item: Option<&str>,
    ) -> Result<Vec<ItemSummary>> {
        let rows: Vec<ItemSummaryRow> =
            render::select_overlap(query, exclude_item, RELATED_LIMIT as i64)
                .build_query_as()
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(ItemSummary::from).collect())
    }

    async fn item_images(&self, item_id: &str) -> Result<Vec<ImageRecord>> {
        let images = sqlx::query_as(
            "SELECT item_id, image_public_path, is_thumb \
             FROM collections_item_image \
             WHERE item_id = $1 AND NOT is_thumb \
             ORDER BY image_public_path",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(images)
    }

    async fn item_makers(&self, item_id: &str) -> Result<Vec<Person>> {
        let people = sqlx::query_as(
            "SELECT p.id, p.name, p.birth_date, p.death_date, p.occupation, \
                    p.nationality, p.note, p.description, p.collections_url \
             FROM collections_person p \
             INNER JOIN collections_item_maker m ON m.person_id = p.id \
             WHERE m.item_id = $1 \
             ORDER BY p.id",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(people)
    }

    async fn item_associated_people(
        &self,
        item_id: &str,
    ) -> Result<Vec<Person>> {
        let people = sqlx::query_as(
            "SELECT p.id, p.name, p.birth_date, p.death_date, p.occupation, \
                    p.nationality, p.note, p.description, p.collections_url \
             FROM collections_person p \
             INNER JOIN collections_item_person ap ON ap.person_id = p.id \
             WHERE ap.item_id = $1 \
             ORDER BY p.id",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(people)
    }

    async fn item_places(&self, item_id: &str) -> Result<Vec<Place>> {
        let places = sqlx::query_as(
            "SELECT pl.id, pl.name \
             FROM collections_place pl \
             INNER JOIN collections_item_place l ON l.place_id = pl.id \
             WHERE l.item_id = $1 \
             ORDER BY pl.id",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(places)
    }
}
