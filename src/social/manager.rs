//! Tune-In Manager - relationship lifecycle and aggregate counts
//!
//! Creating an edge is forgiving (repeating it succeeds), removing one is
//! strict (a missing edge is reported). Nothing is cached: every call reads
//! the store.

use super::error::{TuneInError, TuneInResult};
use crate::neo4j::models::*;
use crate::neo4j::RelationshipStore;
use chrono::Utc;
use std::sync::Arc;

/// Manager for tune-in relationships
pub struct TuneInManager {
    store: Arc<dyn RelationshipStore>,
}

impl TuneInManager {
    /// Create a new TuneInManager
    pub fn new(store: Arc<dyn RelationshipStore>) -> Self {
        Self { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &Arc<dyn RelationshipStore> {
        &self.store
    }

    fn validate_pair(follower_id: &str, followee_id: &str) -> TuneInResult<()> {
        if follower_id.is_empty() || followee_id.is_empty() {
            return Err(TuneInError::InvalidRequest(
                "follower and followee ids must not be empty".to_string(),
            ));
        }
        if follower_id == followee_id {
            return Err(TuneInError::InvalidRequest(
                "cannot tune in to yourself".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Tune `follower_id` in to `followee_id`.
    ///
    /// Succeeds without writing when the edge already exists and returns the
    /// stored edge with its original creation time.
    pub async fn create_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> TuneInResult<TuneInEdgeDetails> {
        if let Err(e) = Self::validate_pair(follower_id, followee_id) {
            tracing::warn!(
                "Rejected tune-in {} -> {}: {}",
                follower_id,
                followee_id,
                e
            );
            return Err(e);
        }

        let now = Utc::now();
        match self.store.create_edge(follower_id, followee_id, now).await? {
            Some(details) => {
                if details.edge.created_at == now {
                    tracing::info!("Tune-in created: {} -> {}", follower_id, followee_id);
                } else {
                    tracing::debug!(
                        "Tune-in {} -> {} already present since {}",
                        follower_id,
                        followee_id,
                        details.edge.created_at
                    );
                }
                Ok(details)
            }
            None => Err(self.missing_identity(follower_id, followee_id).await?),
        }
    }

    /// Work out which endpoint made the upsert match nothing
    async fn missing_identity(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> TuneInResult<TuneInError> {
        let missing = if self.store.get_identity(follower_id).await?.is_none() {
            follower_id
        } else {
            followee_id
        };
        tracing::warn!(
            "Tune-in {} -> {}: unknown identity {}",
            follower_id,
            followee_id,
            missing
        );
        Ok(TuneInError::UnknownIdentity(missing.to_string()))
    }

    /// Remove the edge `follower_id -> followee_id`.
    ///
    /// Fails with `NotFound` when there is no such edge.
    pub async fn remove_edge(&self, follower_id: &str, followee_id: &str) -> TuneInResult<()> {
        if self.store.remove_edge(follower_id, followee_id).await? {
            tracing::info!("Tune-in removed: {} -> {}", follower_id, followee_id);
            Ok(())
        } else {
            Err(TuneInError::NotFound(format!(
                "{} is not tuned in to {}",
                follower_id, followee_id
            )))
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Crew and following counts, read from one snapshot
    pub async fn counts(&self, subject_id: &str) -> TuneInResult<TuneInCounts> {
        Ok(self.store.count_edges(subject_id).await?)
    }

    /// Who tuned in to the subject, newest first
    pub async fn list_followers(
        &self,
        subject_id: &str,
        page: PageRequest,
    ) -> TuneInResult<Vec<Connection>> {
        Ok(self.store.list_followers(subject_id, &page).await?)
    }

    /// Who the subject tuned in to, newest first
    pub async fn list_following(
        &self,
        subject_id: &str,
        page: PageRequest,
    ) -> TuneInResult<Vec<Connection>> {
        Ok(self.store.list_following(subject_id, &page).await?)
    }

    /// Existence check. Never reports `NotFound`.
    pub async fn is_following(&self, follower_id: &str, followee_id: &str) -> TuneInResult<bool> {
        Ok(self.store.edge_exists(follower_id, followee_id).await?)
    }
}
