//! Response envelope: typed JSON:API documents and the mapping from domain
//! records into them.

pub mod envelope;
pub mod serialize;
