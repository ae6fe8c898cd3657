//! Neo4j client and models for the tune-in graph

pub mod client;
mod impl_relationship_store;
pub mod models;
pub mod traits;

pub use client::Neo4jClient;
pub use models::*;
pub use traits::RelationshipStore;

#[cfg(test)]
pub(crate) mod mock;
