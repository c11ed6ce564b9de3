//! Serde-deserializable types matching the recipe API responses.
//!
//! Kept separate from the domain types so deserialization stays tolerant of
//! missing fields while domain types stay focused on application needs.

use serde::Deserialize;
use url::Url;

use super::types::{Recipe, RecipeDetails, RemotePage};

/// Parse a URL, mapping malformed values to `None`.
fn parse_url(value: Option<String>) -> Option<Url> {
  value.and_then(|s| Url::parse(&s).ok())
}

// ============================================================================
// Page search endpoint response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiRecipePage {
  #[serde(default)]
  pub results: Vec<ApiRecipe>,
  #[serde(rename = "totalResults", default)]
  pub total_results: usize,
}

impl ApiRecipePage {
  pub fn into_page(self) -> RemotePage {
    RemotePage {
      results: self.results.into_iter().map(ApiRecipe::into_recipe).collect(),
      total_results: self.total_results,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct ApiRecipe {
  pub id: i64,
  pub title: String,
  pub image: Option<String>,
  #[serde(default)]
  pub summary: String,
}

impl ApiRecipe {
  pub fn into_recipe(self) -> Recipe {
    Recipe {
      id: self.id,
      title: self.title,
      image: parse_url(self.image),
      summary: self.summary,
      is_favorite: false,
    }
  }
}

// ============================================================================
// Details endpoint response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiIngredient {
  #[serde(default)]
  pub original: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecipeDetails {
  pub id: i64,
  pub title: String,
  #[serde(default)]
  pub ready_in_minutes: u32,
  #[serde(default)]
  pub servings: u32,
  #[serde(default)]
  pub summary: String,
  #[serde(default)]
  pub instructions: String,
  #[serde(default)]
  pub vegetarian: bool,
  #[serde(default)]
  pub vegan: bool,
  #[serde(default)]
  pub gluten_free: bool,
  #[serde(default)]
  pub dairy_free: bool,
  pub image: Option<String>,
  pub health_score: Option<u32>,
  #[serde(default)]
  pub diets: Vec<String>,
  #[serde(rename = "spoonacularScore", default)]
  pub score: f64,
  #[serde(rename = "spoonacularSourceUrl")]
  pub source_url: Option<String>,
  #[serde(rename = "extendedIngredients", default)]
  pub ingredients: Vec<ApiIngredient>,
}

impl ApiRecipeDetails {
  pub fn into_details(self) -> RecipeDetails {
    RecipeDetails {
      id: self.id,
      title: self.title,
      is_favorite: false,
      ready_in_minutes: self.ready_in_minutes,
      servings: self.servings,
      summary: self.summary,
      instructions: self.instructions,
      vegetarian: self.vegetarian,
      vegan: self.vegan,
      gluten_free: self.gluten_free,
      dairy_free: self.dairy_free,
      image: parse_url(self.image),
      health_score: self.health_score,
      diets: self.diets,
      score: self.score,
      source_url: parse_url(self.source_url),
      ingredients: self.ingredients.into_iter().map(|i| i.original).collect(),
    }
  }
}
