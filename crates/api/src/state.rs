use std::sync::Arc;

use rifugio_db::models::document::DocumentKind;
use rifugio_storage::StorageAdapter;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rifugio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Document storage backend.
    pub storage: Arc<dyn StorageAdapter>,
    /// Document kinds, loaded once at startup.
    pub document_kinds: Arc<DocumentKindTable>,
}

/// Lookup table over the seeded `document_kinds` rows.
///
/// Constructed explicitly at startup and owned by [`AppState`]; handlers
/// resolve kind codes against it instead of querying per request.
#[derive(Debug)]
pub struct DocumentKindTable {
    kinds: Vec<DocumentKind>,
}

impl DocumentKindTable {
    /// Load all document kinds from the database.
    pub async fn load(pool: &rifugio_db::DbPool) -> Result<Self, sqlx::Error> {
        let kinds = rifugio_db::repositories::DocumentRepo::list_kinds(pool).await?;
        tracing::info!(count = kinds.len(), "Document kinds loaded");
        Ok(Self { kinds })
    }

    pub fn by_code(&self, code: &str) -> Option<&DocumentKind> {
        self.kinds.iter().find(|k| k.code == code)
    }

    pub fn all(&self) -> &[DocumentKind] {
        &self.kinds
    }
}
