//! Neo4j client for the tune-in graph

use super::models::*;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use neo4rs::{query, Graph, Query};
use std::sync::Arc;

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

/// Fixed-width RFC 3339 so that string ordering matches time ordering
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid created_at timestamp: {}", raw))?
        .with_timezone(&Utc))
}

/// Append SKIP/LIMIT for a page. Values are bound as parameters.
fn paginate(cypher: &str, page: &PageRequest) -> String {
    match page.limit {
        Some(_) => format!("{}\nSKIP $offset LIMIT $limit", cypher),
        None => format!("{}\nSKIP $offset", cypher),
    }
}

fn bind_page(q: Query, page: &PageRequest) -> Query {
    let q = q.param("offset", page.offset as i64);
    match page.limit {
        Some(limit) => q.param("limit", limit as i64),
        None => q,
    }
}

impl Neo4jClient {
    /// Create a new Neo4j client
    pub async fn new(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .context("Failed to connect to Neo4j")?;

        let client = Self {
            graph: Arc::new(graph),
        };

        // Initialize schema
        client.init_schema().await?;

        Ok(client)
    }

    /// Initialize the graph schema with constraints and indexes
    async fn init_schema(&self) -> Result<()> {
        let constraints =
            vec!["CREATE CONSTRAINT user_id IF NOT EXISTS FOR (u:User) REQUIRE u.id IS UNIQUE"];

        let indexes = vec![
            "CREATE INDEX tuned_in_created_at IF NOT EXISTS FOR ()-[r:TUNED_IN]-() ON (r.created_at)",
        ];

        for constraint in constraints {
            if let Err(e) = self.graph.run(query(constraint)).await {
                tracing::warn!("Constraint may already exist: {}", e);
            }
        }

        for index in indexes {
            if let Err(e) = self.graph.run(query(index)).await {
                tracing::warn!("Index may already exist: {}", e);
            }
        }

        Ok(())
    }

    // ========================================================================
    // Identity projections
    // ========================================================================

    /// Create or refresh an identity projection
    pub async fn upsert_identity(&self, identity: &IdentityNode) -> Result<()> {
        let q = query(
            r#"
            MERGE (u:User {id: $id})
            SET u.display_name = $display_name,
                u.avatar_url = $avatar_url
            "#,
        )
        .param("id", identity.id.clone())
        .param("display_name", identity.display_name.clone())
        .param(
            "avatar_url",
            identity.avatar_url.clone().unwrap_or_default(),
        );

        self.graph.run(q).await?;
        Ok(())
    }

    /// Get an identity projection by ID
    pub async fn get_identity(&self, id: &str) -> Result<Option<IdentityNode>> {
        let q = query(
            r#"
            MATCH (u:User {id: $id})
            RETURN u
            "#,
        )
        .param("id", id);

        let mut result = self.graph.execute(q).await?;
        if let Some(row) = result.next().await? {
            let node: neo4rs::Node = row.get("u")?;
            Ok(Some(self.node_to_identity(&node)?))
        } else {
            Ok(None)
        }
    }

    /// Helper to convert a Neo4j node to IdentityNode
    fn node_to_identity(&self, node: &neo4rs::Node) -> Result<IdentityNode> {
        Ok(IdentityNode {
            id: node.get("id")?,
            display_name: node.get("display_name").unwrap_or_default(),
            avatar_url: node
                .get::<String>("avatar_url")
                .ok()
                .filter(|s| !s.is_empty()),
        })
    }

    // ========================================================================
    // Tune-in edges
    // ========================================================================

    /// Create the TUNED_IN relationship unless it exists.
    ///
    /// MERGE between two bound nodes locks both endpoints, so concurrent
    /// calls for the same pair converge to a single relationship.
    pub async fn create_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<TuneInEdgeDetails>> {
        let q = query(
            r#"
            MATCH (a:User {id: $follower_id})
            MATCH (b:User {id: $followee_id})
            MERGE (a)-[r:TUNED_IN]->(b)
            ON CREATE SET r.created_at = $created_at
            RETURN a, b, r.created_at AS created_at
            "#,
        )
        .param("follower_id", follower_id)
        .param("followee_id", followee_id)
        .param("created_at", format_timestamp(&now));

        let mut result = self
            .graph
            .execute(q)
            .await
            .context("Failed to upsert TUNED_IN relationship")?;

        match result.next().await? {
            Some(row) => {
                let follower: neo4rs::Node = row.get("a")?;
                let followee: neo4rs::Node = row.get("b")?;
                let created_at: String = row.get("created_at")?;
                Ok(Some(TuneInEdgeDetails {
                    edge: TuneInEdge {
                        follower_id: follower_id.to_string(),
                        followee_id: followee_id.to_string(),
                        created_at: parse_timestamp(&created_at)?,
                    },
                    follower: self.node_to_identity(&follower)?,
                    followee: self.node_to_identity(&followee)?,
                }))
            }
            // One of the MATCH clauses found nothing
            None => Ok(None),
        }
    }

    /// Delete the TUNED_IN relationship
    pub async fn remove_edge(&self, follower_id: &str, followee_id: &str) -> Result<bool> {
        let q = query(
            r#"
            MATCH (:User {id: $follower_id})-[r:TUNED_IN]->(:User {id: $followee_id})
            DELETE r
            RETURN count(*) AS removed
            "#,
        )
        .param("follower_id", follower_id)
        .param("followee_id", followee_id);

        let mut result = self
            .graph
            .execute(q)
            .await
            .context("Failed to delete TUNED_IN relationship")?;

        let removed = match result.next().await? {
            Some(row) => row.get::<i64>("removed")?,
            None => 0,
        };
        Ok(removed > 0)
    }

    /// Check whether a TUNED_IN relationship exists
    pub async fn edge_exists(&self, follower_id: &str, followee_id: &str) -> Result<bool> {
        let q = query(
            r#"
            OPTIONAL MATCH (:User {id: $follower_id})-[r:TUNED_IN]->(:User {id: $followee_id})
            RETURN r IS NOT NULL AS found
            "#,
        )
        .param("follower_id", follower_id)
        .param("followee_id", followee_id);

        let mut result = self.graph.execute(q).await?;
        match result.next().await? {
            Some(row) => Ok(row.get::<bool>("found")?),
            None => Ok(false),
        }
    }

    /// Count crew and following in one statement.
    ///
    /// Both subqueries run inside the same auto-commit transaction and
    /// therefore see the same snapshot.
    pub async fn count_edges(&self, subject_id: &str) -> Result<TuneInCounts> {
        let q = query(
            r#"
            CALL {
                MATCH (:User)-[r:TUNED_IN]->(:User {id: $id})
                RETURN count(r) AS crew
            }
            CALL {
                MATCH (:User {id: $id})-[r:TUNED_IN]->(:User)
                RETURN count(r) AS following
            }
            RETURN crew, following
            "#,
        )
        .param("id", subject_id);

        let mut result = self.graph.execute(q).await?;
        match result.next().await? {
            Some(row) => Ok(TuneInCounts {
                crew: row.get::<i64>("crew")?.max(0) as u64,
                following: row.get::<i64>("following")?.max(0) as u64,
            }),
            None => Ok(TuneInCounts::default()),
        }
    }

    /// List the followers of a subject, newest edge first
    pub async fn list_followers(
        &self,
        subject_id: &str,
        page: &PageRequest,
    ) -> Result<Vec<Connection>> {
        let cypher = paginate(
            r#"
            MATCH (u:User)-[r:TUNED_IN]->(:User {id: $id})
            RETURN u, u.id AS follower_id, $id AS followee_id, r.created_at AS created_at
            ORDER BY r.created_at DESC, u.id ASC"#,
            page,
        );
        let q = bind_page(query(&cypher).param("id", subject_id), page);
        self.collect_connections(q).await
    }

    /// List who a subject follows, newest edge first
    pub async fn list_following(
        &self,
        subject_id: &str,
        page: &PageRequest,
    ) -> Result<Vec<Connection>> {
        let cypher = paginate(
            r#"
            MATCH (:User {id: $id})-[r:TUNED_IN]->(u:User)
            RETURN u, $id AS follower_id, u.id AS followee_id, r.created_at AS created_at
            ORDER BY r.created_at DESC, u.id ASC"#,
            page,
        );
        let q = bind_page(query(&cypher).param("id", subject_id), page);
        self.collect_connections(q).await
    }

    async fn collect_connections(&self, q: Query) -> Result<Vec<Connection>> {
        let mut result = self.graph.execute(q).await?;
        let mut connections = Vec::new();

        while let Some(row) = result.next().await? {
            let node: neo4rs::Node = row.get("u")?;
            let created_at: String = row.get("created_at")?;
            connections.push(Connection {
                follower_id: row.get("follower_id")?,
                followee_id: row.get("followee_id")?,
                created_at: parse_timestamp(&created_at)?,
                user: self.node_to_identity(&node)?,
            });
        }

        Ok(connections)
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Check connectivity with a trivial query
    pub async fn health_check(&self) -> Result<bool> {
        let mut result = self.graph.execute(query("RETURN 1 AS ok")).await?;
        Ok(result.next().await?.is_some())
    }
}
