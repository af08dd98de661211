//! Concrete Postgres repositories. Each owns a pool handle and is
//! constructed once at startup, then injected where it is needed.

mod catalog;
mod favourites;
mod images;
mod people;
mod users;

pub use catalog::PostgresCatalogRepository;
pub use favourites::PostgresFavouriteRepository;
pub use images::PostgresImageRepository;
pub use people::PostgresPersonRepository;
pub use users::PostgresUserRepository;
