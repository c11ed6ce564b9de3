//! Per-id cache of full recipe details.

use std::sync::Arc;

use tracing::debug;

use super::favorites::FavoriteOverlay;
use super::traits::RecipeSource;
use crate::api::types::RecipeDetails;
use crate::db::store::DetailsStore;
use crate::error::Result;

/// Cache of recipe details, keyed by id.
///
/// Reads prefer the local store and fall back to the remote source. The
/// favorite flag always comes from the shared overlay, never from the
/// stored row or the remote response.
pub struct RecipeDetailsCache {
  source: Arc<dyn RecipeSource>,
  store: DetailsStore,
  overlay: Arc<FavoriteOverlay>,
}

impl RecipeDetailsCache {
  pub fn new(
    source: Arc<dyn RecipeSource>,
    store: DetailsStore,
    overlay: Arc<FavoriteOverlay>,
  ) -> Self {
    Self {
      source,
      store,
      overlay,
    }
  }

  /// Details for a recipe: from the store when present, otherwise fetched
  /// remotely and persisted.
  pub async fn get(&self, id: i64) -> Result<RecipeDetails> {
    if let Some(mut details) = self.store.get(id)? {
      debug!(id, "details served from store");
      details.is_favorite = self.overlay.get(id);
      return Ok(details);
    }
    self.refresh(id).await
  }

  /// Fetch details from the remote source, persist, and return them.
  pub async fn refresh(&self, id: i64) -> Result<RecipeDetails> {
    let mut details = self.source.fetch_details(id).await?;
    self.store.upsert(&details)?;
    details.is_favorite = self.overlay.get(id);
    Ok(details)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};

  use async_trait::async_trait;

  use crate::api::types::{PageRequest, RemotePage};
  use crate::db::Database;
  use crate::error::Error;

  fn details(id: i64, title: &str) -> RecipeDetails {
    RecipeDetails {
      id,
      title: title.to_string(),
      is_favorite: false,
      ready_in_minutes: 10,
      servings: 1,
      summary: String::new(),
      instructions: String::new(),
      vegetarian: false,
      vegan: false,
      gluten_free: false,
      dairy_free: false,
      image: None,
      health_score: None,
      diets: Vec::new(),
      score: 0.0,
      source_url: None,
      ingredients: Vec::new(),
    }
  }

  /// Source that always serves the same details record.
  struct FixedSource {
    details: RecipeDetails,
    calls: AtomicUsize,
  }

  impl FixedSource {
    fn new(details: RecipeDetails) -> Arc<Self> {
      Arc::new(Self {
        details,
        calls: AtomicUsize::new(0),
      })
    }
  }

  #[async_trait]
  impl RecipeSource for FixedSource {
    async fn fetch_page(&self, _request: &PageRequest) -> Result<RemotePage> {
      Err(Error::RequestFailed("not a list source".to_string()))
    }

    async fn fetch_details(&self, id: i64) -> Result<RecipeDetails> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      if id == self.details.id {
        Ok(self.details.clone())
      } else {
        Err(Error::NotFound)
      }
    }
  }

  fn cache(source: Arc<FixedSource>) -> RecipeDetailsCache {
    let db = Database::open_in_memory().unwrap();
    RecipeDetailsCache::new(source, DetailsStore::new(db), Arc::new(FavoriteOverlay::default()))
  }

  #[tokio::test]
  async fn test_get_fetches_once_then_serves_from_store() {
    let source = FixedSource::new(details(7, "Stew"));
    let cache = cache(source.clone());

    let first = cache.get(7).await.unwrap();
    let second = cache.get(7).await.unwrap();

    assert_eq!(first.title, "Stew");
    assert_eq!(first, second);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_refresh_always_hits_the_remote() {
    let source = FixedSource::new(details(7, "Stew"));
    let cache = cache(source.clone());

    cache.get(7).await.unwrap();
    cache.refresh(7).await.unwrap();

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn test_favorite_flag_is_overlaid_on_both_paths() {
    let source = FixedSource::new(details(7, "Stew"));
    let db = Database::open_in_memory().unwrap();
    let overlay = Arc::new(FavoriteOverlay::default());
    let cache = RecipeDetailsCache::new(source, DetailsStore::new(db), overlay.clone());

    overlay.set(7, true);

    // Remote path
    assert!(cache.get(7).await.unwrap().is_favorite);
    // Store path
    assert!(cache.get(7).await.unwrap().is_favorite);

    overlay.set(7, false);
    assert!(!cache.get(7).await.unwrap().is_favorite);
  }

  #[tokio::test]
  async fn test_unknown_id_propagates_not_found() {
    let source = FixedSource::new(details(7, "Stew"));
    let cache = cache(source);

    let err = cache.get(99).await.unwrap_err();
    assert!(matches!(err, Error::NotFound));
  }
}
