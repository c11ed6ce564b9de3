//! The sparse recipe list published to observers.

use crate::api::types::Recipe;

/// A fixed-length list addressed by position, where `None` marks a slot
/// whose recipe has not been fetched yet.
///
/// Published snapshots always keep `list.len() == total_results`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePage {
  pub list: Vec<Option<Recipe>>,
  pub total_results: usize,
}

impl RecipePage {
  /// A page of `total_results` unloaded slots.
  pub fn unloaded(total_results: usize) -> Self {
    Self {
      list: vec![None; total_results],
      total_results,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.total_results == 0
  }

  /// Number of loaded slots.
  pub fn loaded_count(&self) -> usize {
    self.list.iter().filter(|slot| slot.is_some()).count()
  }

  /// Resize in both directions so the length matches a new total.
  pub fn resize_to(&mut self, total_results: usize) {
    self.list.resize(total_results, None);
    self.total_results = total_results;
  }

  /// Position of a recipe by id, if materialized.
  pub fn position_of(&self, id: i64) -> Option<usize> {
    self
      .list
      .iter()
      .position(|slot| slot.as_ref().is_some_and(|r| r.id == id))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn recipe(id: i64) -> Recipe {
    Recipe {
      id,
      title: format!("Recipe {}", id),
      image: None,
      summary: String::new(),
      is_favorite: false,
    }
  }

  #[test]
  fn test_unloaded_allocates_empty_slots() {
    let page = RecipePage::unloaded(4);
    assert_eq!(page.list.len(), 4);
    assert_eq!(page.total_results, 4);
    assert_eq!(page.loaded_count(), 0);
    assert!(!page.is_empty());
    assert!(RecipePage::default().is_empty());
  }

  #[test]
  fn test_resize_grows_and_shrinks() {
    let mut page = RecipePage::unloaded(2);
    page.list[0] = Some(recipe(10));

    page.resize_to(5);
    assert_eq!(page.list.len(), 5);
    assert_eq!(page.total_results, 5);
    assert_eq!(page.loaded_count(), 1);

    page.resize_to(1);
    assert_eq!(page.list.len(), 1);
    assert_eq!(page.loaded_count(), 1);
  }

  #[test]
  fn test_position_of_finds_materialized_ids_only() {
    let mut page = RecipePage::unloaded(3);
    page.list[1] = Some(recipe(42));

    assert_eq!(page.position_of(42), Some(1));
    assert_eq!(page.position_of(7), None);
  }
}
