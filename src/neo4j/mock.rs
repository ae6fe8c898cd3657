//! In-memory mock implementation of RelationshipStore for testing.
//!
//! Uses `tokio::sync::RwLock<HashMap<K, V>>` collections.
//! Conditionally compiled with `#[cfg(test)]`.

use crate::neo4j::models::*;
use crate::neo4j::traits::RelationshipStore;
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Stored edge payload, keyed by (follower_id, followee_id)
#[derive(Debug, Clone)]
pub struct MockEdge {
    pub created_at: DateTime<Utc>,
    /// Insertion order, breaks created_at ties
    pub seq: u64,
}

/// In-memory mock implementation of RelationshipStore for testing.
pub struct MockRelationshipStore {
    pub identities: RwLock<HashMap<String, IdentityNode>>,
    pub edges: RwLock<HashMap<(String, String), MockEdge>>,
    sequence: AtomicU64,
    /// When set, every call fails like an unreachable database
    unavailable: AtomicBool,
}

impl Default for MockRelationshipStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRelationshipStore {
    /// Create a new empty MockRelationshipStore.
    pub fn new() -> Self {
        Self {
            identities: RwLock::new(HashMap::new()),
            edges: RwLock::new(HashMap::new()),
            sequence: AtomicU64::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Toggle simulated outage
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("connection refused: mock store unavailable");
        }
        Ok(())
    }

    /// Number of stored edges
    pub async fn edge_count(&self) -> usize {
        self.edges.read().await.len()
    }

    async fn connections<F>(&self, page: &PageRequest, select: F) -> Result<Vec<Connection>>
    where
        F: Fn(&str, &str) -> Option<String>,
    {
        let edges = self.edges.read().await;
        let identities = self.identities.read().await;

        let mut matched: Vec<(&(String, String), &MockEdge)> = edges
            .iter()
            .filter(|((from, to), _)| select(from.as_str(), to.as_str()).is_some())
            .collect();
        matched.sort_by_key(|(_, e)| (Reverse(e.created_at), Reverse(e.seq)));

        let rows = matched.into_iter().filter_map(|((from, to), e)| {
            let counterpart = select(from.as_str(), to.as_str())?;
            let user = identities.get(&counterpart)?.clone();
            Some(Connection {
                follower_id: from.clone(),
                followee_id: to.clone(),
                created_at: e.created_at,
                user,
            })
        });

        Ok(page.apply(rows))
    }
}

#[async_trait]
impl RelationshipStore for MockRelationshipStore {
    // ========================================================================
    // Identity projections
    // ========================================================================

    async fn upsert_identity(&self, identity: &IdentityNode) -> Result<()> {
        self.check_available()?;
        self.identities
            .write()
            .await
            .insert(identity.id.clone(), identity.clone());
        Ok(())
    }

    async fn get_identity(&self, id: &str) -> Result<Option<IdentityNode>> {
        self.check_available()?;
        Ok(self.identities.read().await.get(id).cloned())
    }

    // ========================================================================
    // Tune-in edges
    // ========================================================================

    async fn create_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<TuneInEdgeDetails>> {
        self.check_available()?;
        let identities = self.identities.read().await;
        let (follower, followee) = match (identities.get(follower_id), identities.get(followee_id))
        {
            (Some(a), Some(b)) => (a.clone(), b.clone()),
            _ => return Ok(None),
        };

        let mut edges = self.edges.write().await;
        let stored = edges
            .entry((follower_id.to_string(), followee_id.to_string()))
            .or_insert_with(|| MockEdge {
                created_at: now,
                seq: self.sequence.fetch_add(1, Ordering::SeqCst),
            });

        Ok(Some(TuneInEdgeDetails {
            edge: TuneInEdge {
                follower_id: follower_id.to_string(),
                followee_id: followee_id.to_string(),
                created_at: stored.created_at,
            },
            follower,
            followee,
        }))
    }

    async fn remove_edge(&self, follower_id: &str, followee_id: &str) -> Result<bool> {
        self.check_available()?;
        Ok(self
            .edges
            .write()
            .await
            .remove(&(follower_id.to_string(), followee_id.to_string()))
            .is_some())
    }

    async fn edge_exists(&self, follower_id: &str, followee_id: &str) -> Result<bool> {
        self.check_available()?;
        Ok(self
            .edges
            .read()
            .await
            .contains_key(&(follower_id.to_string(), followee_id.to_string())))
    }

    async fn count_edges(&self, subject_id: &str) -> Result<TuneInCounts> {
        self.check_available()?;
        // One read guard for both counts
        let edges = self.edges.read().await;
        let mut counts = TuneInCounts::default();
        for (from, to) in edges.keys() {
            if to == subject_id {
                counts.crew += 1;
            }
            if from == subject_id {
                counts.following += 1;
            }
        }
        Ok(counts)
    }

    async fn list_followers(
        &self,
        subject_id: &str,
        page: &PageRequest,
    ) -> Result<Vec<Connection>> {
        self.check_available()?;
        self.connections(page, |from, to| {
            (to == subject_id).then(|| from.to_string())
        })
        .await
    }

    async fn list_following(
        &self,
        subject_id: &str,
        page: &PageRequest,
    ) -> Result<Vec<Connection>> {
        self.check_available()?;
        self.connections(page, |from, to| {
            (from == subject_id).then(|| to.to_string())
        })
        .await
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.unavailable.load(Ordering::SeqCst))
    }
}
