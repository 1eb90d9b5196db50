//! Read-through query execution.

use std::sync::Arc;

use tracing::debug;

use crate::config::AppConfig;
use crate::core::cache::QueryCache;
use crate::db::backend::StoreBackend;
use crate::db::postgres::PgBackend;
use crate::db::statement::Statement;
use crate::db::table::ResultTable;
use crate::error::Result;

/// Executes statements against the store, memoizing results.
///
/// `run` returns the cached table when the statement was seen before;
/// otherwise it opens a session, executes, releases the session, and settles
/// the result. Concurrent first calls for the same statement collapse onto
/// one execution. Failed executions are surfaced, never cached and never
/// retried here.
pub struct QueryExecutor {
    backend: Arc<dyn StoreBackend>,
    cache: QueryCache,
}

impl QueryExecutor {
    pub fn new(backend: Arc<dyn StoreBackend>, max_cache_entries: usize) -> Self {
        Self {
            backend,
            cache: QueryCache::new(max_cache_entries),
        }
    }

    /// Build an executor over PostgreSQL from resolved configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let backend = Arc::new(PgBackend::new(
            config.database.clone(),
            config.session.clone(),
        ));
        Self::new(backend, config.cache.max_entries)
    }

    /// Execute a statement, or return its memoized result.
    pub async fn run(&self, statement: &Statement) -> Result<Arc<ResultTable>> {
        let key = statement.key();

        if let Some(table) = self.cache.get(&key) {
            debug!(target: "cache", sql = statement.sql(), "cache hit");
            return Ok(table);
        }

        let slot = self.cache.flight_slot(&key);
        let result = slot
            .get_or_try_init(|| self.execute(statement))
            .await
            .cloned();

        match result {
            Ok(table) => {
                // Settle before retiring the slot so a racing caller sees
                // either the entry or the initialized slot, never a gap.
                self.cache.insert(key.clone(), table.clone());
                self.cache.clear_flight_slot(&key, &slot);
                Ok(table)
            }
            Err(err) => {
                self.cache.clear_flight_slot(&key, &slot);
                Err(err)
            }
        }
    }

    /// (cache entries used, cache capacity)
    pub fn cache_stats(&self) -> (usize, usize) {
        self.cache.stats()
    }

    async fn execute(&self, statement: &Statement) -> Result<Arc<ResultTable>> {
        debug!(target: "cache", sql = statement.sql(), "cache miss, executing");

        let mut session = self.backend.connect().await?;
        let outcome = session.query(statement).await;
        // The session is finished on both paths; a query error wins over a
        // finalize error when both occur.
        let finished = session.finish().await;
        let table = outcome?;
        finished?;

        debug!(
            target: "cache",
            rows = table.len(),
            columns = table.columns().len(),
            "settled result"
        );
        Ok(Arc::new(table))
    }
}
