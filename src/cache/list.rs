//! The paginated recipe list cache.
//!
//! Incrementally fetches the remote offset-paginated collection into a
//! locally persisted sparse list, merges the favorite overlay into every
//! materialized recipe, clamps all offset arithmetic to the server's
//! ceiling, and serializes concurrent fetch decisions behind one gate.

use std::cmp::min;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use super::favorites::FavoriteOverlay;
use super::page::RecipePage;
use super::traits::RecipeSource;
use crate::api::types::{
  ingredient_list, PageRequest, Recipe, SearchCriteria, SortCriteria, SortOrder,
};
use crate::config::PagingConfig;
use crate::db::store::{FavoriteStore, RecipeStore};
use crate::error::{Error, Result};

/// Offset-paginated list cache over a remote recipe source.
///
/// The fetch cursor counts leading list positions already covered by a
/// fetch. It lives inside an async mutex, so the "already fetched" guard and
/// the cursor advance are atomic relative to concurrent callers, and the
/// lock is held across the remote call: no two fetches are ever in flight
/// for overlapping ranges.
pub struct RecipeListCache {
  source: Arc<dyn RecipeSource>,
  store: RecipeStore,
  favorite_store: FavoriteStore,
  overlay: Arc<FavoriteOverlay>,
  paging: PagingConfig,
  /// Fetch gate; holds the cursor. Reset to 0 only by refresh.
  cursor: Mutex<usize>,
  /// Favorite writes are commutative but must not interleave; this keeps
  /// the store write, the overlay write, and the republish as one unit.
  favorite_gate: parking_lot::Mutex<()>,
  page_tx: watch::Sender<RecipePage>,
}

impl RecipeListCache {
  /// Create the cache and hydrate it from the local stores.
  pub async fn open(
    source: Arc<dyn RecipeSource>,
    store: RecipeStore,
    favorite_store: FavoriteStore,
    overlay: Arc<FavoriteOverlay>,
    paging: PagingConfig,
  ) -> Self {
    let (page_tx, _) = watch::channel(RecipePage::default());
    let cache = Self {
      source,
      store,
      favorite_store,
      overlay,
      paging,
      cursor: Mutex::new(0),
      favorite_gate: parking_lot::Mutex::new(()),
      page_tx,
    };
    cache.hydrate().await;
    cache
  }

  /// Observe the current sparse list snapshot and all future updates.
  pub fn observe(&self) -> watch::Receiver<RecipePage> {
    self.page_tx.subscribe()
  }

  /// Current snapshot.
  pub fn snapshot(&self) -> RecipePage {
    self.page_tx.borrow().clone()
  }

  /// Rebuild the in-memory state from the local stores.
  ///
  /// Any read failure or inconsistency degrades to the empty cold-start
  /// state instead of surfacing an error; the next refresh repopulates.
  async fn hydrate(&self) {
    let mut cursor = self.cursor.lock().await;
    match self.read_persisted() {
      Ok((page, count)) => {
        *cursor = count;
        self.page_tx.send_replace(page);
      }
      Err(e) => {
        warn!("hydration failed, starting empty: {}", e);
        *cursor = 0;
        self.overlay.clear();
        self.page_tx.send_replace(RecipePage::default());
      }
    }
  }

  fn read_persisted(&self) -> Result<(RecipePage, usize)> {
    let recipes = self.store.get_all()?;
    let favorites = self.favorite_store.get_all()?;
    let total_results = self.store.total_results()?;

    // More rows than the persisted total means the stores disagree; treat
    // as corrupt and start cold.
    if recipes.len() > total_results {
      return Err(Error::LocalStore(format!(
        "{} stored recipes exceed persisted total {}",
        recipes.len(),
        total_results
      )));
    }

    self.overlay.replace_all(favorites);

    let count = recipes.len();
    let mut page = RecipePage::unloaded(total_results);
    for (index, recipe) in recipes.into_iter().enumerate() {
      page.list[index] = Some(self.overlay.apply(recipe));
    }

    debug!(loaded = count, total = total_results, "hydrated recipe list");
    Ok((page, count))
  }

  /// Force a re-fetch of page one. Resets the cursor so the index-0 fetch
  /// passes the guard; on success the persisted table is replaced because a
  /// changed sort order invalidates stored positions.
  pub async fn refresh(&self, sort: SortCriteria, order: SortOrder) -> Result<()> {
    {
      let mut cursor = self.cursor.lock().await;
      *cursor = 0;
    }
    self.fetch_page(0, sort, order).await
  }

  /// Fetch the page starting at `element_index` unless a prior fetch
  /// already covers that position.
  ///
  /// A failed remote call or persistence write propagates to the caller;
  /// the gate is released on every exit path, and a remote failure leaves
  /// cursor, list, and persisted state untouched.
  pub async fn fetch_page(
    &self,
    element_index: usize,
    sort: SortCriteria,
    order: SortOrder,
  ) -> Result<()> {
    let mut cursor = self.cursor.lock().await;

    // Scroll-triggered prefetches for already-covered positions land here.
    if element_index < *cursor {
      debug!(element_index, cursor = *cursor, "position already covered");
      return Ok(());
    }

    let request = PageRequest {
      offset: element_index,
      limit: self.paging.page_size,
      query: None,
      include_ingredients: None,
      sort,
      order,
    };
    let response = self.source.fetch_page(&request).await?;

    // The server refuses offsets beyond max_offset, so no reported total
    // may require addressing past max_offset + page_size.
    let effective_total = min(
      self.paging.max_offset + self.paging.page_size,
      response.total_results,
    );
    // How many response items are usable; items past the ceiling are dropped.
    let remainder = min(
      effective_total.saturating_sub(element_index),
      response.results.len(),
    );
    *cursor += remainder;

    if response.results.is_empty() {
      return Ok(());
    }

    let mut page = if element_index == 0 {
      // Forced refresh: positions from the previous fetch sequence are
      // meaningless, so drop the whole persisted table.
      self.store.delete_all()?;
      RecipePage::unloaded(effective_total)
    } else {
      let mut page = self.snapshot();
      page.resize_to(effective_total);
      page
    };

    let recipes: Vec<Recipe> = response
      .results
      .into_iter()
      .take(remainder)
      .map(|recipe| self.overlay.apply(recipe))
      .collect();

    for (index, recipe) in recipes.iter().enumerate() {
      page.list[element_index + index] = Some(recipe.clone());
    }

    self.store.set_total_results(effective_total)?;
    self.store.upsert_many(&recipes)?;

    info!(
      offset = element_index,
      merged = recipes.len(),
      total = effective_total,
      "merged recipe page"
    );
    self.page_tx.send_replace(page);
    Ok(())
  }

  /// Persist a favorite flag and apply it to the materialized list.
  ///
  /// The overlay write stands even when the id is not materialized yet; the
  /// flag is applied when that recipe next enters the list. Store failures
  /// propagate so callers know the toggle did not persist.
  pub fn set_favorite(&self, id: i64, favorite: bool) -> Result<()> {
    let _guard = self.favorite_gate.lock();

    self.favorite_store.upsert(id, favorite)?;
    self.overlay.set(id, favorite);

    self.page_tx.send_if_modified(|page| match page.position_of(id) {
      Some(position) => {
        if let Some(recipe) = page.list[position].as_mut() {
          recipe.is_favorite = favorite;
        }
        true
      }
      None => false,
    });
    Ok(())
  }

  /// One-shot remote search. Results are overlaid with favorites and
  /// returned directly; they never enter the sparse list or the stores.
  pub async fn search(
    &self,
    query: &str,
    criteria: SearchCriteria,
    sort: SortCriteria,
    order: SortOrder,
  ) -> Result<Vec<Recipe>> {
    // Runs under the fetch gate so a search and a page fetch cannot
    // interleave their reads of the overlay and cursor.
    let _cursor = self.cursor.lock().await;

    let (name_query, ingredients) = match criteria {
      SearchCriteria::Name => (Some(query.to_string()), None),
      SearchCriteria::Ingredients => (None, Some(ingredient_list(query))),
    };
    let request = PageRequest {
      offset: 0,
      limit: self.paging.search_limit,
      query: name_query,
      include_ingredients: ingredients,
      sort,
      order,
    };
    let response = self.source.fetch_page(&request).await?;

    Ok(
      response
        .results
        .into_iter()
        .map(|recipe| self.overlay.apply(recipe))
        .collect(),
    )
  }
}
