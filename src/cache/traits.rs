//! The seam between the caches and the remote recipe API.

use async_trait::async_trait;

use crate::api::types::{PageRequest, RecipeDetails, RemotePage};
use crate::error::Result;

/// Remote source of paginated recipes and per-id details.
///
/// The caches depend on this trait rather than on the concrete HTTP client
/// so tests can substitute a scripted source.
#[async_trait]
pub trait RecipeSource: Send + Sync {
  /// Fetch one offset/limit page.
  async fn fetch_page(&self, request: &PageRequest) -> Result<RemotePage>;

  /// Fetch the full details for one recipe.
  async fn fetch_details(&self, id: i64) -> Result<RecipeDetails>;
}
