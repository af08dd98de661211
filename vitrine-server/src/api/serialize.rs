//! Mapping from domain records to response documents.
//!
//! Image relationship identifiers are scoped to the owning item: the Nth
//! non-thumbnail image of item `I` is addressed as `"I/N"` (0-based, in the
//! stable retrieval order the detail load established). List rows reference
//! their thumbnail as `"I/thumb"`, mirroring the relay endpoint's paths.

use serde_json::{Value, json};
use vitrine_core::catalog::{
    ItemDetail, ItemFavourite, ItemSummary, Person, PersonFavourite,
    SearchResults, User,
};

use super::envelope::{Document, Resource, ResourceIdentifier};

fn image_ref(item_id: &str, index: usize) -> String {
    format!("{item_id}/{index}")
}

fn thumbnail_resource(summary: &ItemSummary) -> Option<Resource> {
    summary.thumbnail.as_ref().map(|image| {
        Resource::new("image", format!("{}/thumb", summary.item.id))
            .attribute("imagePublicPath", &image.image_public_path)
            .attribute("isThumb", true)
    })
}

/// One search/related result row: the item with its category inline and its
/// thumbnail as an image relationship.
pub fn item_summary_resource(
    summary: &ItemSummary,
) -> (Resource, Vec<Resource>) {
    let thumbnail = thumbnail_resource(summary);
    let identifiers = thumbnail
        .iter()
        .map(Resource::identifier)
        .collect::<Vec<_>>();

    let resource = Resource::new("item", &summary.item.id)
        .attribute("name", &summary.item.name)
        .attribute("creationEarliest", summary.item.creation_earliest)
        .attribute("creationLatest", summary.item.creation_latest)
        .attribute("onDisplayAt", &summary.item.on_display_at)
        .attribute("category", &summary.category)
        .to_many("images", identifiers);

    (resource, thumbnail.into_iter().collect())
}

pub fn item_list_document(summaries: &[ItemSummary]) -> Document {
    let mut resources = Vec::with_capacity(summaries.len());
    let mut included = Vec::new();
    for summary in summaries {
        let (resource, mut images) = item_summary_resource(summary);
        resources.push(resource);
        included.append(&mut images);
    }
    Document::many(resources).with_included(included)
}

/// The search response: one page of rows plus the total match count.
pub fn search_document(results: &SearchResults) -> Document {
    item_list_document(&results.items)
        .with_meta(json!({ "count": results.total }))
}

fn related_objects_meta(related: &[ItemSummary]) -> Value {
    serde_json::to_value(item_list_document(related)).unwrap_or(Value::Null)
}

pub fn person_resource(person: &Person) -> Resource {
    Resource::new("person", &person.id)
        .attribute("name", &person.name)
        .attribute("birthDate", person.birth_date)
        .attribute("deathDate", person.death_date)
        .attribute("occupation", &person.occupation)
        .attribute("nationality", &person.nationality)
        .attribute("note", &person.note)
        .attribute("description", &person.description)
        .attribute("collectionsUrl", &person.collections_url)
}

/// The item detail document: full attributes, every relation, and the
/// related items in the `meta` side-channel.
pub fn item_detail_document(
    detail: &ItemDetail,
    related: &[ItemSummary],
) -> Document {
    let item_id = &detail.item.id;

    let image_resources: Vec<Resource> = detail
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            Resource::new("image", image_ref(item_id, index))
                .attribute("imagePublicPath", &image.image_public_path)
        })
        .collect();

    let maker_ids: Vec<ResourceIdentifier> = detail
        .makers
        .iter()
        .map(|person| ResourceIdentifier {
            kind: "person",
            id: person.id.clone(),
        })
        .collect();
    let associate_ids: Vec<ResourceIdentifier> = detail
        .associated_people
        .iter()
        .map(|person| ResourceIdentifier {
            kind: "person",
            id: person.id.clone(),
        })
        .collect();
    let place_resources: Vec<Resource> = detail
        .places
        .iter()
        .map(|place| {
            Resource::new("place", &place.id).attribute("name", &place.name)
        })
        .collect();

    let resource = Resource::new("item", item_id)
        .attribute("name", &detail.item.name)
        .attribute("description", &detail.item.description)
        .attribute("accession", &detail.item.accession)
        .attribute("creationEarliest", detail.item.creation_earliest)
        .attribute("creationLatest", detail.item.creation_latest)
        .attribute("collectionsUrl", &detail.item.collections_url)
        .attribute("category", &detail.category)
        .attribute("facility", &detail.facility)
        .to_many(
            "images",
            image_resources.iter().map(Resource::identifier).collect(),
        )
        .to_many("makers", maker_ids)
        .to_many("associatedPeople", associate_ids)
        .to_many(
            "places",
            place_resources.iter().map(Resource::identifier).collect(),
        );

    let mut included = image_resources;
    // A person can be both maker and associated subject; include them once.
    let mut seen_people = std::collections::HashSet::new();
    for person in detail.makers.iter().chain(&detail.associated_people) {
        if seen_people.insert(person.id.clone()) {
            included.push(person_resource(person));
        }
    }
    included.extend(place_resources);

    Document::one(resource)
        .with_included(included)
        .with_meta(json!({ "relatedObjects": related_objects_meta(related) }))
}

/// The person detail document with its related items side-channel.
pub fn person_detail_document(
    person: &Person,
    related: &[ItemSummary],
) -> Document {
    Document::one(person_resource(person))
        .with_meta(json!({ "relatedObjects": related_objects_meta(related) }))
}

pub fn user_resource(user: &User) -> Resource {
    Resource::new("user", user.id.to_string())
        .attribute("firstName", &user.first_name)
        .attribute("lastName", &user.last_name)
        .attribute("email", &user.email)
        .attribute("administrator", user.administrator)
}

/// The auth response: the user document, with the freshly issued bearer
/// token in `meta` when one was created.
pub fn user_document(user: &User, token: Option<String>) -> Document {
    let document = Document::one(user_resource(user));
    match token {
        Some(token) => document.with_meta(json!({ "token": token })),
        None => document,
    }
}

pub fn item_favourite_resource(favourite: &ItemFavourite) -> Resource {
    Resource::new("favouriteItem", &favourite.item_id)
        .attribute("userId", favourite.user_id)
        .attribute("itemId", &favourite.item_id)
}

pub fn person_favourite_resource(favourite: &PersonFavourite) -> Resource {
    Resource::new("favouritePerson", &favourite.person_id)
        .attribute("userId", favourite.user_id)
        .attribute("personId", &favourite.person_id)
}

pub fn item_favourite_list_document(
    favourites: &[ItemFavourite],
) -> Document {
    Document::many(favourites.iter().map(item_favourite_resource).collect())
}

pub fn person_favourite_list_document(
    favourites: &[PersonFavourite],
) -> Document {
    Document::many(
        favourites.iter().map(person_favourite_resource).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use vitrine_core::catalog::{
        Category, Facility, ImageRecord, Item, Place,
    };

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {id}"),
            description: "A catalogued object".into(),
            category_id: 3,
            creation_earliest: Some(1850),
            creation_latest: Some(1870),
            on_display_at: Some("F1".into()),
            accession: Some("1911-117".into()),
            collections_url: None,
        }
    }

    fn image(item_id: &str, path: &str, is_thumb: bool) -> ImageRecord {
        ImageRecord {
            item_id: item_id.to_string(),
            image_public_path: path.to_string(),
            is_thumb,
        }
    }

    fn summary(id: &str, thumb: bool) -> ItemSummary {
        ItemSummary {
            item: item(id),
            category: Category {
                id: 3,
                name: "Ceramics".into(),
            },
            thumbnail: thumb.then(|| image(id, "/thumbs/a.jpg", true)),
        }
    }

    fn detail(id: &str, image_paths: &[&str]) -> ItemDetail {
        ItemDetail {
            item: item(id),
            category: Category {
                id: 3,
                name: "Ceramics".into(),
            },
            facility: Some(Facility {
                id: "F1".into(),
                name: "Main Gallery".into(),
            }),
            images: image_paths
                .iter()
                .map(|path| image(id, path, false))
                .collect(),
            makers: Vec::new(),
            associated_people: Vec::new(),
            places: vec![Place {
                id: "P1".into(),
                name: "Kyoto".into(),
            }],
        }
    }

    #[test]
    fn detail_image_refs_are_zero_indexed_in_sequence_order() {
        let doc = item_detail_document(
            &detail("I1", &["/img/a.jpg", "/img/b.jpg", "/img/c.jpg"]),
            &[],
        );
        let value = serde_json::to_value(&doc).unwrap();
        let refs: Vec<&str> = value["data"]["relationships"]["images"]
            ["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|identifier| identifier["id"].as_str().unwrap())
            .collect();
        assert_eq!(refs, vec!["I1/0", "I1/1", "I1/2"]);
    }

    #[test]
    fn detail_embeds_related_objects_as_meta() {
        let doc = item_detail_document(
            &detail("I1", &[]),
            &[summary("I2", true), summary("I3", false)],
        );
        let value = serde_json::to_value(&doc).unwrap();
        let related = &value["meta"]["relatedObjects"]["data"];
        assert_eq!(related.as_array().unwrap().len(), 2);
        assert_eq!(related[0]["type"], "item");
        assert_eq!(related[0]["id"], "I2");
    }

    #[test]
    fn search_document_carries_the_total_count() {
        let results = SearchResults {
            items: vec![summary("I1", true)],
            total: 37,
        };
        let value = serde_json::to_value(&search_document(&results)).unwrap();
        assert_eq!(value["meta"]["count"], 37);
        assert_eq!(value["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn list_rows_reference_their_thumbnail() {
        let value =
            serde_json::to_value(&item_list_document(&[summary("I1", true)]))
                .unwrap();
        assert_eq!(
            value["data"][0]["relationships"]["images"]["data"][0]["id"],
            "I1/thumb"
        );
        assert_eq!(value["included"][0]["attributes"]["isThumb"], true);
    }

    #[test]
    fn list_rows_without_a_thumbnail_have_an_empty_relation() {
        let value =
            serde_json::to_value(&item_list_document(&[summary(
                "I1", false,
            )]))
            .unwrap();
        assert_eq!(
            value["data"][0]["relationships"]["images"]["data"]
                .as_array()
                .unwrap()
                .len(),
            0
        );
    }

    #[test]
    fn person_document_uses_camel_case_attributes() {
        let person = Person {
            id: "C1".into(),
            name: Some("A. Potter".into()),
            birth_date: None,
            death_date: None,
            occupation: Some("potter".into()),
            nationality: None,
            note: None,
            description: None,
            collections_url: Some("https://example.org/C1".into()),
        };
        let value =
            serde_json::to_value(&person_detail_document(&person, &[]))
                .unwrap();
        let attributes = &value["data"]["attributes"];
        assert_eq!(attributes["collectionsUrl"], "https://example.org/C1");
        assert!(attributes.get("birthDate").is_some());
        assert_eq!(value["data"]["type"], "person");
    }

    #[test]
    fn user_document_carries_the_token_in_meta() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.org".into(),
            password_hash: "hash".into(),
            administrator: false,
        };
        let value =
            serde_json::to_value(&user_document(&user, Some("tok".into())))
                .unwrap();
        assert_eq!(value["meta"]["token"], "tok");
        assert!(
            value["data"]["attributes"].get("password_hash").is_none(),
            "credentials never leave the server"
        );
    }
}
