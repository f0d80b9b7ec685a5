use crate::{
  cache::HomeFeedCache,
  db::{build_db_pool, DbConn, DbPool},
  error::QuillResult,
  settings::Settings,
};
use std::time::Duration;

/// Shared handles every operation needs: the connection pool and the
/// home feed cache. Created once at process start and passed in
/// explicitly, never read from global state.
#[derive(Clone)]
pub struct QuillContext {
  pool: DbPool,
  cache: HomeFeedCache,
}

impl QuillContext {
  pub fn create(pool: DbPool, cache: HomeFeedCache) -> Self {
    QuillContext { pool, cache }
  }

  pub fn build(settings: &Settings) -> QuillResult<Self> {
    let pool = build_db_pool(settings)?;
    let cache = HomeFeedCache::new(Duration::from_secs(settings.cache_ttl_secs));
    Ok(QuillContext::create(pool, cache))
  }

  pub fn pool(&self) -> &DbPool {
    &self.pool
  }

  pub fn conn(&self) -> QuillResult<DbConn> {
    Ok(self.pool.get()?)
  }

  pub fn cache(&self) -> &HomeFeedCache {
    &self.cache
  }
}
