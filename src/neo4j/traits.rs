//! RelationshipStore trait definition
//!
//! Defines the abstract interface for the tune-in graph storage.
//! This trait mirrors the public async methods of `Neo4jClient`,
//! enabling testing with the in-memory implementation and backend swaps.

use crate::neo4j::models::*;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Abstract interface for identity projections and tune-in edges.
///
/// The store owns every edge. Callers must not keep copies of edges
/// between calls.
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    // ========================================================================
    // Identity projections
    // ========================================================================

    /// Create or refresh an identity projection
    async fn upsert_identity(&self, identity: &IdentityNode) -> Result<()>;

    /// Get an identity projection by ID
    async fn get_identity(&self, id: &str) -> Result<Option<IdentityNode>>;

    // ========================================================================
    // Tune-in edges
    // ========================================================================

    /// Atomically create the edge unless it already exists.
    ///
    /// Returns the stored edge (with its original `created_at` when it already
    /// existed), or `None` when either identity is unknown.
    async fn create_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<TuneInEdgeDetails>>;

    /// Delete the edge. Returns false when there was nothing to delete.
    async fn remove_edge(&self, follower_id: &str, followee_id: &str) -> Result<bool>;

    /// Check whether the edge exists
    async fn edge_exists(&self, follower_id: &str, followee_id: &str) -> Result<bool>;

    /// Count crew and following for a subject from a single snapshot
    async fn count_edges(&self, subject_id: &str) -> Result<TuneInCounts>;

    /// Edges pointing at the subject, newest first
    async fn list_followers(&self, subject_id: &str, page: &PageRequest)
        -> Result<Vec<Connection>>;

    /// Edges leaving the subject, newest first
    async fn list_following(&self, subject_id: &str, page: &PageRequest)
        -> Result<Vec<Connection>>;

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Check connectivity to the backend
    async fn health_check(&self) -> Result<bool>;
}
