/// A recipe as exposed to consumers.
///
/// `is_favorite` is overlaid locally and never trusted from the remote
/// response or a stored row.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
  pub id: i64,
  pub title: String,
  pub image: Option<url::Url>,
  pub summary: String,
  pub is_favorite: bool,
}

/// Full details for a single recipe. Same favorite-overlay rule as `Recipe`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetails {
  pub id: i64,
  pub title: String,
  pub is_favorite: bool,
  pub ready_in_minutes: u32,
  pub servings: u32,
  pub summary: String,
  pub instructions: String,
  pub vegetarian: bool,
  pub vegan: bool,
  pub gluten_free: bool,
  pub dairy_free: bool,
  pub image: Option<url::Url>,
  pub health_score: Option<u32>,
  pub diets: Vec<String>,
  pub score: f64,
  pub source_url: Option<url::Url>,
  pub ingredients: Vec<String>,
}

/// One page of results as returned by the remote source.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePage {
  pub results: Vec<Recipe>,
  pub total_results: usize,
}

/// Parameters for one remote page fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRequest {
  pub offset: usize,
  pub limit: usize,
  /// Free-form name query
  pub query: Option<String>,
  /// Comma-joined ingredient list
  pub include_ingredients: Option<String>,
  pub sort: SortCriteria,
  pub order: SortOrder,
}

/// Sort key for list and search requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortCriteria {
  /// Server-side relevance ranking (the API default)
  #[default]
  Relevance,
  Popularity,
  /// Preparation time
  Time,
  Calories,
}

impl SortCriteria {
  /// Wire value for the `sort` query parameter. Relevance is the API
  /// default and sends no parameter.
  pub fn as_query(self) -> Option<&'static str> {
    match self {
      SortCriteria::Relevance => None,
      SortCriteria::Popularity => Some("popularity"),
      SortCriteria::Time => Some("time"),
      SortCriteria::Calories => Some("calories"),
    }
  }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
  Ascending,
  #[default]
  Descending,
}

impl SortOrder {
  pub fn as_query(self) -> &'static str {
    match self {
      SortOrder::Ascending => "asc",
      SortOrder::Descending => "desc",
    }
  }
}

/// What a search query matches against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchCriteria {
  #[default]
  Name,
  Ingredients,
}

/// Split a free-form ingredient query on whitespace and commas and re-join
/// with commas, the separator the API expects.
pub fn ingredient_list(query: &str) -> String {
  query
    .split(|c: char| c.is_whitespace() || c == ',')
    .filter(|token| !token.is_empty())
    .collect::<Vec<_>>()
    .join(",")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ingredient_list_splits_on_whitespace_and_commas() {
    assert_eq!(ingredient_list("tomato basil"), "tomato,basil");
    assert_eq!(ingredient_list("tomato, basil,garlic"), "tomato,basil,garlic");
    assert_eq!(ingredient_list("  tomato  "), "tomato");
    assert_eq!(ingredient_list(""), "");
  }

  #[test]
  fn test_sort_criteria_wire_values() {
    assert_eq!(SortCriteria::Relevance.as_query(), None);
    assert_eq!(SortCriteria::Popularity.as_query(), Some("popularity"));
    assert_eq!(SortCriteria::Time.as_query(), Some("time"));
    assert_eq!(SortCriteria::Calories.as_query(), Some("calories"));
    assert_eq!(SortOrder::Ascending.as_query(), "asc");
    assert_eq!(SortOrder::Descending.as_query(), "desc");
  }
}
