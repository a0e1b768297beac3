//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    database::{self, DatabaseOptions, Db},
    domain::carts::{CartsService, PgCartsRepository, RepositoryCartsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire services over an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        let repository = PgCartsRepository::new(Db::new(pool));

        Self {
            carts: Arc::new(RepositoryCartsService::new(Arc::new(repository))),
        }
    }

    /// Build application context from database options.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails, or when
    /// `run_migrations` is set and migrating fails.
    pub async fn from_database_options(
        options: &DatabaseOptions,
        run_migrations: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(options)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_pool(pool))
    }
}
