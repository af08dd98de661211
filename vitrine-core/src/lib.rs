//! # Vitrine Core
//!
//! Core library for the Vitrine catalog service, providing the domain model,
//! the query-construction engine, and the Postgres repositories.
//!
//! ## Overview
//!
//! `vitrine-core` is the foundation of the Vitrine service, offering:
//!
//! - **Catalog Model**: Items, people, places, categories, facilities, and
//!   the images and link rows that tie them together
//! - **Query System**: Typed facet parsing, predicate construction, and sort
//!   resolution for faceted search
//! - **Related Items**: Attribute-overlap planning and deterministic merging
//!   for the "related items" feature
//! - **Repositories**: Postgres-backed data access built on `sqlx`
//!
//! ## Architecture
//!
//! The crate is organized into a few key modules:
//!
//! - [`catalog`]: Domain records shared across the service
//! - [`query`]: Facet parsing, predicate building, and sort resolution
//! - [`related`]: Overlap-query planning and result merging
//! - [`database`]: Connection helpers, SQL rendering, and repositories

pub mod catalog;
pub mod database;
pub mod error;
pub mod query;
pub mod related;

pub use error::{CatalogError, Result};
