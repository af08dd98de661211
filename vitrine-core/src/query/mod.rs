//! Faceted-search query model: typed facets, predicate tree, sort keys.

pub mod facets;
pub mod predicate;
pub mod sort;

pub use facets::{ImageFlag, Page, SearchFacets};
pub use predicate::{FacetCondition, FacetGroup, Predicate, RelationJoin};
pub use sort::{SortCode, SortField, SortOrder, sort_keys};
