use crate::api::feed::HomeFeedResponse;
use moka::sync::Cache;
use std::time::Duration;

/// Memoizes the composed home feed under a single fixed key. Post
/// writes never invalidate it; staleness is bounded only by the ttl or
/// an explicit [`HomeFeedCache::clear`].
#[derive(Clone)]
pub struct HomeFeedCache {
  inner: Cache<(), HomeFeedResponse>,
}

impl HomeFeedCache {
  pub fn new(ttl: Duration) -> Self {
    HomeFeedCache {
      inner: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
    }
  }

  pub fn get(&self) -> Option<HomeFeedResponse> {
    self.inner.get(&())
  }

  pub fn set(&self, response: HomeFeedResponse) {
    self.inner.insert((), response);
  }

  pub fn clear(&self) {
    self.inner.invalidate_all();
  }
}
