use std::sync::Arc;

use anyhow::Context;

use acre_config::AcreConfig;
use acre_db::service::AcreService;

use crate::cli::GlobalFlags;

/// Shared state for command handlers.
pub struct AppContext {
    pub service: Arc<AcreService>,
    pub config: AcreConfig,
    /// Username from `--user` or `general.default_user`.
    pub username: Option<String>,
}

impl AppContext {
    /// Open the configured database, honouring `--db`, and create its
    /// directory if needed.
    pub async fn init(config: AcreConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let mut database = config.database.clone();
        if let Some(path) = &flags.db {
            database.path.clone_from(path);
        }
        if let Some(dir) = database.parent_dir() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create database directory {}", dir.display()))?;
        }

        tracing::debug!(path = %database.path, "opening database");
        let service = AcreService::new_local(&database.path, config.general.page_size)
            .await
            .with_context(|| format!("failed to open database at {}", database.path))?;

        let username = flags
            .user
            .clone()
            .or_else(|| config.general.default_user().map(ToString::to_string));

        Ok(Self {
            service: Arc::new(service),
            config,
            username,
        })
    }

    /// Resolve the acting user for writes. `None` when no username is set.
    pub async fn acting_user(&self) -> anyhow::Result<Option<i64>> {
        match &self.username {
            Some(username) => Ok(Some(self.service.resolve_acting_user(username).await?)),
            None => Ok(None),
        }
    }
}
