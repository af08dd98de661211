//! Domain records for the museum catalog.
//!
//! Everything here is read-only from the engine's perspective except the
//! favourite link rows, which have an explicit create/delete lifecycle.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A catalogued museum item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category_id: i16,
    pub creation_earliest: Option<i16>,
    pub creation_latest: Option<i16>,
    pub on_display_at: Option<String>,
    pub accession: Option<String>,
    pub collections_url: Option<String>,
}

/// A person linked to items as maker or associated subject.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Person {
    pub id: String,
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub occupation: Option<String>,
    pub nationality: Option<String>,
    pub note: Option<String>,
    pub description: Option<String>,
    pub collections_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Place {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Category {
    pub id: i16,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
}

/// One stored image of an item. Identity is (item_id, image_public_path);
/// each item has at most one thumbnail.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ImageRecord {
    pub item_id: String,
    pub image_public_path: String,
    pub is_thumb: bool,
}

/// A search or related-items result row: the item plus the annotations every
/// list response carries (category and optional thumbnail).
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSummary {
    pub item: Item,
    pub category: Category,
    pub thumbnail: Option<ImageRecord>,
}

/// A fully loaded item, with every relation the detail response needs.
///
/// `images` holds the non-thumbnail images in their stable retrieval order;
/// the position of an image in this sequence is its public index.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    pub item: Item,
    pub category: Category,
    pub facility: Option<Facility>,
    pub images: Vec<ImageRecord>,
    pub makers: Vec<Person>,
    pub associated_people: Vec<Person>,
    pub places: Vec<Place>,
}

/// One page of search results plus the total match count.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub items: Vec<ItemSummary>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ItemFavourite {
    pub user_id: Uuid,
    pub item_id: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PersonFavourite {
    pub user_id: Uuid,
    pub person_id: String,
}

/// A registered user of the favourites feature.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub administrator: bool,
}
