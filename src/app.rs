//! Command implementations: the CLI consumer driving the caches.

use std::sync::Arc;

use color_eyre::Result;

use crate::api::client::RecipeClient;
use crate::api::types::{Recipe, RecipeDetails, SearchCriteria, SortCriteria, SortOrder};
use crate::cache::{FavoriteOverlay, RecipeDetailsCache, RecipeListCache};
use crate::config::Config;
use crate::db::store::{DetailsStore, FavoriteStore, RecipeStore};
use crate::db::Database;
use crate::error::Error;

pub struct App {
  list: RecipeListCache,
  details: RecipeDetailsCache,
}

impl App {
  /// Wire the client, database, stores, and caches together.
  pub async fn new(config: &Config) -> Result<Self> {
    let api_key = Config::get_api_key()?;
    let source = Arc::new(RecipeClient::new(config, api_key));
    let db = Database::open()?;
    let overlay = Arc::new(FavoriteOverlay::default());

    let list = RecipeListCache::open(
      source.clone(),
      RecipeStore::new(db.clone()),
      FavoriteStore::new(db.clone()),
      overlay.clone(),
      config.paging,
    )
    .await;
    let details = RecipeDetailsCache::new(source, DetailsStore::new(db), overlay);

    Ok(Self { list, details })
  }

  /// Print the first `count` list positions, fetching pages the way a
  /// scrolling UI would.
  pub async fn list(&self, count: usize, sort: SortCriteria, order: SortOrder) -> Result<()> {
    if self.list.snapshot().is_empty() {
      self.list.refresh(sort, order).await?;
    }

    loop {
      let page = self.list.snapshot();
      let target = count.min(page.total_results);
      let loaded = page.loaded_count();
      if loaded >= target {
        break;
      }
      self.list.fetch_page(loaded, sort, order).await?;
      if self.list.snapshot().loaded_count() == loaded {
        // The remote returned nothing new; stop instead of spinning
        break;
      }
    }

    let page = self.list.snapshot();
    println!("{} of {} recipes loaded", page.loaded_count(), page.total_results);
    for (position, slot) in page.list.iter().take(count).enumerate() {
      match slot {
        Some(recipe) => print_row(position, recipe),
        None => println!("{:>4}   {:>8}  (not loaded)", position, ""),
      }
    }
    Ok(())
  }

  pub async fn refresh(&self, sort: SortCriteria, order: SortOrder) -> Result<()> {
    self.list.refresh(sort, order).await?;
    let page = self.list.snapshot();
    println!(
      "refreshed: {} recipes available, {} loaded",
      page.total_results,
      page.loaded_count()
    );
    Ok(())
  }

  pub async fn search(
    &self,
    query: &str,
    criteria: SearchCriteria,
    sort: SortCriteria,
    order: SortOrder,
  ) -> Result<()> {
    let results = match self.list.search(query, criteria, sort, order).await {
      Ok(results) => results,
      // Zero matches are a valid empty result, not an error
      Err(Error::NotFound) => Vec::new(),
      Err(e) => return Err(e.into()),
    };

    if results.is_empty() {
      println!("no recipes matched '{}'", query);
      return Ok(());
    }
    for (position, recipe) in results.iter().enumerate() {
      print_row(position, recipe);
    }
    Ok(())
  }

  pub async fn show(&self, id: i64, force_refresh: bool) -> Result<()> {
    let details = if force_refresh {
      self.details.refresh(id).await?
    } else {
      self.details.get(id).await?
    };
    print_details(&details);
    Ok(())
  }

  pub fn favorite(&self, id: i64, favorite: bool) -> Result<()> {
    self.list.set_favorite(id, favorite)?;
    if favorite {
      println!("recipe {} marked as favorite", id);
    } else {
      println!("recipe {} is no longer a favorite", id);
    }
    Ok(())
  }
}

fn print_row(position: usize, recipe: &Recipe) {
  let marker = if recipe.is_favorite { "*" } else { " " };
  println!("{:>4} {} {:>8}  {}", position, marker, recipe.id, recipe.title);
}

fn print_details(details: &RecipeDetails) {
  let marker = if details.is_favorite { " *" } else { "" };
  println!("{} (#{}){}", details.title, details.id, marker);
  println!(
    "ready in {} min, serves {}, score {:.1}",
    details.ready_in_minutes, details.servings, details.score
  );
  if let Some(health) = details.health_score {
    println!("health score {}", health);
  }

  let mut dietary: Vec<&str> = Vec::new();
  if details.vegetarian {
    dietary.push("vegetarian");
  }
  if details.vegan {
    dietary.push("vegan");
  }
  if details.gluten_free {
    dietary.push("gluten-free");
  }
  if details.dairy_free {
    dietary.push("dairy-free");
  }
  if !dietary.is_empty() {
    println!("dietary: {}", dietary.join(", "));
  }
  if !details.diets.is_empty() {
    println!("diets: {}", details.diets.join(", "));
  }

  if !details.ingredients.is_empty() {
    println!("\ningredients:");
    for ingredient in &details.ingredients {
      println!("  - {}", ingredient);
    }
  }
  if !details.instructions.is_empty() {
    println!("\n{}", details.instructions);
  }
  if let Some(source) = &details.source_url {
    println!("\nsource: {}", source);
  }
}
