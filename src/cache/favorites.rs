//! Favorite overlay: the authoritative source of the `is_favorite` flag.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::api::types::Recipe;

/// In-memory id -> favorite mapping, seeded from the favorite store at
/// startup and written through on every toggle.
///
/// The flag on any record exposed to consumers comes from here, never from
/// the remote response or a stored row.
#[derive(Default)]
pub struct FavoriteOverlay {
  map: Mutex<HashMap<i64, bool>>,
}

impl FavoriteOverlay {
  /// Favorite flag for an id; unknown ids are not favorites.
  pub fn get(&self, id: i64) -> bool {
    self.map.lock().get(&id).copied().unwrap_or(false)
  }

  pub fn set(&self, id: i64, favorite: bool) {
    self.map.lock().insert(id, favorite);
  }

  /// Replace the whole mapping. Used at hydration.
  pub fn replace_all(&self, map: HashMap<i64, bool>) {
    *self.map.lock() = map;
  }

  pub fn clear(&self) {
    self.map.lock().clear();
  }

  /// Stamp a recipe with its overlaid flag.
  pub fn apply(&self, mut recipe: Recipe) -> Recipe {
    recipe.is_favorite = self.get(recipe.id);
    recipe
  }
}
