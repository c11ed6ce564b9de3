//! Stores over the shared SQLite database.
//!
//! The caches treat these as externally-synchronized collaborators: each
//! call locks the shared connection for its duration and nothing here spans
//! a transaction across multiple logical writes.

use std::collections::HashMap;

use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use url::Url;

use crate::api::types::{Recipe, RecipeDetails};
use crate::db::Database;
use crate::error::{Error, Result};

const TOTAL_RESULTS_KEY: &str = "recipe_list_total_results";

fn parse_url_column(value: Option<String>) -> Option<Url> {
  value.and_then(|s| Url::parse(&s).ok())
}

fn json_column<T: serde::de::DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
  let raw: String = row.get(idx)?;
  serde_json::from_str(&raw)
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Flat, fetch-ordered table of previously seen recipes, plus the persisted
/// total-results counter.
#[derive(Clone)]
pub struct RecipeStore {
  db: Database,
}

impl RecipeStore {
  pub fn new(db: Database) -> Self {
    Self { db }
  }

  /// All stored recipes in fetch order. The favorite flag is not stored
  /// here; rows come back with `is_favorite = false`.
  pub fn get_all(&self) -> Result<Vec<Recipe>> {
    let conn = self.db.lock()?;
    let mut stmt = conn.prepare("SELECT id, title, image, summary FROM recipe ORDER BY position")?;
    let rows = stmt
      .query_map([], |row| {
        Ok(Recipe {
          id: row.get(0)?,
          title: row.get(1)?,
          image: parse_url_column(row.get(2)?),
          summary: row.get(3)?,
          is_favorite: false,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  /// Insert or update recipes. A re-fetched id keeps its original position
  /// so the hydration order stays stable.
  pub fn upsert_many(&self, recipes: &[Recipe]) -> Result<()> {
    let conn = self.db.lock()?;
    let mut stmt = conn.prepare(
      "INSERT INTO recipe (id, title, image, summary) VALUES (?, ?, ?, ?)
       ON CONFLICT(id) DO UPDATE SET
         title = excluded.title, image = excluded.image, summary = excluded.summary",
    )?;
    for recipe in recipes {
      stmt.execute(params![
        recipe.id,
        recipe.title,
        recipe.image.as_ref().map(Url::as_str),
        recipe.summary,
      ])?;
    }
    Ok(())
  }

  pub fn delete_all(&self) -> Result<()> {
    let conn = self.db.lock()?;
    conn.execute("DELETE FROM recipe", [])?;
    Ok(())
  }

  /// Last persisted total result count, 0 when never written.
  pub fn total_results(&self) -> Result<usize> {
    let conn = self.db.lock()?;
    let value: Option<String> = conn
      .query_row(
        "SELECT value FROM preference WHERE key = ?",
        params![TOTAL_RESULTS_KEY],
        |row| row.get(0),
      )
      .optional()?;
    Ok(value.and_then(|v| v.parse().ok()).unwrap_or(0))
  }

  pub fn set_total_results(&self, total: usize) -> Result<()> {
    let conn = self.db.lock()?;
    conn.execute(
      "INSERT INTO preference (key, value) VALUES (?, ?)
       ON CONFLICT(key) DO UPDATE SET value = excluded.value",
      params![TOTAL_RESULTS_KEY, total.to_string()],
    )?;
    Ok(())
  }
}

/// Favorite flags keyed by recipe id
#[derive(Clone)]
pub struct FavoriteStore {
  db: Database,
}

impl FavoriteStore {
  pub fn new(db: Database) -> Self {
    Self { db }
  }

  pub fn get_all(&self) -> Result<HashMap<i64, bool>> {
    let conn = self.db.lock()?;
    let mut stmt = conn.prepare("SELECT id, favorite FROM favorite_recipe")?;
    let rows = stmt
      .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, bool>(1)?)))?
      .collect::<rusqlite::Result<HashMap<_, _>>>()?;
    Ok(rows)
  }

  pub fn upsert(&self, id: i64, favorite: bool) -> Result<()> {
    let conn = self.db.lock()?;
    conn.execute(
      "INSERT INTO favorite_recipe (id, favorite) VALUES (?, ?)
       ON CONFLICT(id) DO UPDATE SET favorite = excluded.favorite",
      params![id, favorite],
    )?;
    Ok(())
  }
}

/// Per-id cache rows of full recipe details
#[derive(Clone)]
pub struct DetailsStore {
  db: Database,
}

impl DetailsStore {
  pub fn new(db: Database) -> Self {
    Self { db }
  }

  pub fn get(&self, id: i64) -> Result<Option<RecipeDetails>> {
    let conn = self.db.lock()?;
    let details = conn
      .query_row(
        "SELECT id, title, ready_in_minutes, servings, summary, instructions,
                vegetarian, vegan, gluten_free, dairy_free, image, health_score,
                diets, score, source_url, ingredients
         FROM recipe_details WHERE id = ?",
        params![id],
        |row| {
          Ok(RecipeDetails {
            id: row.get(0)?,
            title: row.get(1)?,
            is_favorite: false,
            ready_in_minutes: row.get(2)?,
            servings: row.get(3)?,
            summary: row.get(4)?,
            instructions: row.get(5)?,
            vegetarian: row.get(6)?,
            vegan: row.get(7)?,
            gluten_free: row.get(8)?,
            dairy_free: row.get(9)?,
            image: parse_url_column(row.get(10)?),
            health_score: row.get(11)?,
            diets: json_column(row, 12)?,
            score: row.get(13)?,
            source_url: parse_url_column(row.get(14)?),
            ingredients: json_column(row, 15)?,
          })
        },
      )
      .optional()?;
    Ok(details)
  }

  pub fn upsert(&self, details: &RecipeDetails) -> Result<()> {
    let diets = serde_json::to_string(&details.diets)
      .map_err(|e| Error::LocalStore(format!("failed to serialize diets: {}", e)))?;
    let ingredients = serde_json::to_string(&details.ingredients)
      .map_err(|e| Error::LocalStore(format!("failed to serialize ingredients: {}", e)))?;

    let conn = self.db.lock()?;
    conn.execute(
      "INSERT OR REPLACE INTO recipe_details
         (id, title, ready_in_minutes, servings, summary, instructions,
          vegetarian, vegan, gluten_free, dairy_free, image, health_score,
          diets, score, source_url, ingredients, fetched_at)
       VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
      params![
        details.id,
        details.title,
        details.ready_in_minutes,
        details.servings,
        details.summary,
        details.instructions,
        details.vegetarian,
        details.vegan,
        details.gluten_free,
        details.dairy_free,
        details.image.as_ref().map(Url::as_str),
        details.health_score,
        diets,
        details.score,
        details.source_url.as_ref().map(Url::as_str),
        ingredients,
        Utc::now().to_rfc3339(),
      ],
    )?;
    Ok(())
  }
}
