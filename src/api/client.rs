use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::api::api_types::{ApiRecipeDetails, ApiRecipePage};
use crate::api::types::{PageRequest, RecipeDetails, RemotePage};
use crate::cache::RecipeSource;
use crate::config::Config;
use crate::error::{Error, Result};

/// Recipe API client wrapper
#[derive(Clone)]
pub struct RecipeClient {
  http: reqwest::Client,
  base_url: String,
  api_key: String,
}

impl RecipeClient {
  pub fn new(config: &Config, api_key: String) -> Self {
    Self {
      http: reqwest::Client::new(),
      base_url: config.api.url.trim_end_matches('/').to_string(),
      api_key,
    }
  }

  /// Map a transport error to the crate taxonomy. Connectivity failures are
  /// surfaced distinctly so callers can offer an offline retry.
  fn map_transport(e: reqwest::Error) -> Error {
    if e.is_connect() || e.is_timeout() {
      Error::NoConnectivity
    } else {
      Error::RequestFailed(e.to_string())
    }
  }

  fn check_status(status: StatusCode) -> Result<()> {
    if status.is_success() {
      Ok(())
    } else if status == StatusCode::NOT_FOUND {
      Err(Error::NotFound)
    } else {
      Err(Error::RequestFailed(format!("unexpected status {}", status)))
    }
  }
}

#[async_trait]
impl RecipeSource for RecipeClient {
  async fn fetch_page(&self, request: &PageRequest) -> Result<RemotePage> {
    let url = format!("{}/recipes/complexSearch", self.base_url);

    let mut query: Vec<(&str, String)> = vec![
      ("offset", request.offset.to_string()),
      ("number", request.limit.to_string()),
      ("addRecipeInformation", "true".to_string()),
      ("sortDirection", request.order.as_query().to_string()),
    ];
    if let Some(name) = &request.query {
      query.push(("query", name.clone()));
    }
    if let Some(ingredients) = &request.include_ingredients {
      query.push(("includeIngredients", ingredients.clone()));
    }
    if let Some(sort) = request.sort.as_query() {
      query.push(("sort", sort.to_string()));
    }

    debug!(
      offset = request.offset,
      limit = request.limit,
      "fetching recipe page"
    );

    let response = self
      .http
      .get(&url)
      .header("x-api-key", &self.api_key)
      .query(&query)
      .send()
      .await
      .map_err(Self::map_transport)?;

    Self::check_status(response.status())?;

    let page: ApiRecipePage = response
      .json()
      .await
      .map_err(|e| Error::RequestFailed(format!("malformed page response: {}", e)))?;

    Ok(page.into_page())
  }

  async fn fetch_details(&self, id: i64) -> Result<RecipeDetails> {
    let url = format!("{}/recipes/{}/information", self.base_url, id);

    debug!(id, "fetching recipe details");

    let response = self
      .http
      .get(&url)
      .header("x-api-key", &self.api_key)
      .query(&[("includeNutrition", "false")])
      .send()
      .await
      .map_err(Self::map_transport)?;

    Self::check_status(response.status())?;

    let details: ApiRecipeDetails = response
      .json()
      .await
      .map_err(|e| Error::RequestFailed(format!("malformed details response: {}", e)))?;

    Ok(details.into_details())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_mapping() {
    assert!(RecipeClient::check_status(StatusCode::OK).is_ok());
    assert!(matches!(
      RecipeClient::check_status(StatusCode::NOT_FOUND),
      Err(Error::NotFound)
    ));
    assert!(matches!(
      RecipeClient::check_status(StatusCode::PAYMENT_REQUIRED),
      Err(Error::RequestFailed(_))
    ));
  }
}
