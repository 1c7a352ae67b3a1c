use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::storage::{LocalProofStore, ProofStore};

/// Services shared by every request handler
///
/// Cloning is cheap; everything behind it is reference counted.
///
/// | Field | Holds |
/// |-------|-------|
/// | config | immutable settings |
/// | db | SQLite pool |
/// | proofs | payment proof bucket |
/// | jwt_service | admin token signer/validator |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub proofs: Arc<dyn ProofStore>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Open the database file and the proof bucket under `work_dir`
    pub async fn initialize(config: &Config) -> Result<Self> {
        tokio::fs::create_dir_all(&config.work_dir).await?;
        let db = DbService::new(&config.database_path).await?;
        Self::with_db(config.clone(), db).await
    }

    /// State backed by an in-memory database; proofs still go to `work_dir`
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory().await?;
        Self::with_db(config, db).await
    }

    async fn with_db(config: Config, db: DbService) -> Result<Self> {
        let proofs = LocalProofStore::open(config.proofs_dir(), &config.public_base_url).await?;
        tracing::info!(dir = %proofs.dir().display(), "Proof bucket ready");

        let jwt_service = JwtService::with_config(config.jwt.clone());
        Ok(Self {
            config: Arc::new(config),
            db,
            proofs: Arc::new(proofs),
            jwt_service: Arc::new(jwt_service),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
