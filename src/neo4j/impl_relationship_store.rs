//! `RelationshipStore` implementation for `Neo4jClient`.
//!
//! Every method simply delegates to the corresponding inherent method on `Neo4jClient`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::client::Neo4jClient;
use super::models::*;
use super::traits::RelationshipStore;

#[async_trait]
impl RelationshipStore for Neo4jClient {
    // ========================================================================
    // Identity projections
    // ========================================================================

    async fn upsert_identity(&self, identity: &IdentityNode) -> anyhow::Result<()> {
        self.upsert_identity(identity).await
    }

    async fn get_identity(&self, id: &str) -> anyhow::Result<Option<IdentityNode>> {
        self.get_identity(id).await
    }

    // ========================================================================
    // Tune-in edges
    // ========================================================================

    async fn create_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<TuneInEdgeDetails>> {
        self.create_edge(follower_id, followee_id, now).await
    }

    async fn remove_edge(&self, follower_id: &str, followee_id: &str) -> anyhow::Result<bool> {
        self.remove_edge(follower_id, followee_id).await
    }

    async fn edge_exists(&self, follower_id: &str, followee_id: &str) -> anyhow::Result<bool> {
        self.edge_exists(follower_id, followee_id).await
    }

    async fn count_edges(&self, subject_id: &str) -> anyhow::Result<TuneInCounts> {
        self.count_edges(subject_id).await
    }

    async fn list_followers(
        &self,
        subject_id: &str,
        page: &PageRequest,
    ) -> anyhow::Result<Vec<Connection>> {
        self.list_followers(subject_id, page).await
    }

    async fn list_following(
        &self,
        subject_id: &str,
        page: &PageRequest,
    ) -> anyhow::Result<Vec<Connection>> {
        self.list_following(subject_id, page).await
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    async fn health_check(&self) -> anyhow::Result<bool> {
        self.health_check().await
    }
}
