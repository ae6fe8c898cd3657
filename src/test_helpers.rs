//! Test helper factories and mock state builders
#![allow(dead_code)]

use crate::api::handlers::{ApiState, ServerState};
use crate::neo4j::mock::MockRelationshipStore;
use crate::neo4j::models::IdentityNode;
use crate::neo4j::RelationshipStore;
use crate::{AppState, Config};
use std::sync::Arc;

/// Config pointing at nothing; only used with mock stores
pub fn test_config() -> Config {
    Config {
        neo4j_uri: "bolt://mock:7687".to_string(),
        neo4j_user: "neo4j".to_string(),
        neo4j_password: "mock".to_string(),
        server_port: 0,
        max_page_size: 100,
    }
}

/// Identity with a display name derived from the id
pub fn test_identity(id: &str) -> IdentityNode {
    IdentityNode {
        id: id.to_string(),
        display_name: format!("User {}", id),
        avatar_url: Some(format!("https://cdn.example.com/avatars/{}.webp", id)),
    }
}

/// Mock store with the given identities already present
pub async fn seeded_store(ids: &[&str]) -> Arc<MockRelationshipStore> {
    let store = Arc::new(MockRelationshipStore::new());
    for id in ids {
        store.upsert_identity(&test_identity(id)).await.unwrap();
    }
    store
}

/// Create a mock AppState over the given store
pub fn mock_app_state_with(store: Arc<MockRelationshipStore>) -> AppState {
    AppState {
        store,
        config: Arc::new(test_config()),
    }
}

/// Create a mock AppState with an empty in-memory store
pub fn mock_app_state() -> AppState {
    mock_app_state_with(Arc::new(MockRelationshipStore::new()))
}

/// Server state for router tests
pub fn mock_server_state(store: Arc<MockRelationshipStore>) -> ApiState {
    ServerState::from_app_state(mock_app_state_with(store))
}
