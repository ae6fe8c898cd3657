//! Neo4j graph models for identities and tune-in relationships

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Identity projection
// ============================================================================

/// Minimal projection of an identity owned by the Identity Store.
///
/// The graph only keeps what is needed to render a connection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityNode {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl IdentityNode {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url: None,
        }
    }
}

// ============================================================================
// Tune-in edges
// ============================================================================

/// A directed tune-in relationship, unique per (follower, followee) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneInEdge {
    pub follower_id: String,
    pub followee_id: String,
    /// Set once when the edge is first created
    pub created_at: DateTime<Utc>,
}

/// An edge together with both endpoint projections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneInEdgeDetails {
    #[serde(flatten)]
    pub edge: TuneInEdge,
    pub follower: IdentityNode,
    pub followee: IdentityNode,
}

/// One entry of a followers/following listing.
///
/// `user` is the counterpart: the follower when listing followers,
/// the followee when listing following.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub follower_id: String,
    pub followee_id: String,
    pub created_at: DateTime<Utc>,
    pub user: IdentityNode,
}

/// Aggregate counts for a subject, computed on demand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneInCounts {
    /// Edges where the subject is the followee
    pub crew: u64,
    /// Edges where the subject is the follower
    pub following: u64,
}

// ============================================================================
// Pagination
// ============================================================================

/// Window over an ordered listing. `limit: None` returns everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: Option<usize>,
    pub offset: usize,
}

impl PageRequest {
    /// Unbounded listing
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(limit: Option<usize>, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Apply the window to an already ordered sequence
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let iter = items.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        }
    }
}
