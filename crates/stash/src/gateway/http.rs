//! HTTP/JSON implementation of the gateway contract.
//!
//! Endpoints, relative to the configured base URL:
//!
//! | operation        | request                                   |
//! |------------------|-------------------------------------------|
//! | `list_content`   | `GET /api/content/?user_phone={user}&…`    |
//! | `get_stats`      | `GET /api/content/stats/{user}`           |
//! | `delete_content` | `DELETE /api/content/{id}`                |
//! | `get_content`    | `GET /api/content/{id}`                   |
//!
//! A `404` maps to [`StashError::NotFound`], any other non-success status to
//! [`StashError::Api`] carrying the backend's `detail` message.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::*;
use crate::config::Config;

/// Gateway that talks to the backend over HTTP.
///
/// # Examples
///
/// ```no_run
/// use stash::{
///   gateway::{HttpGateway, ListQuery},
///   prelude::*,
/// };
///
/// # async fn example() -> Result<(), StashError> {
/// let gateway = HttpGateway::new("http://localhost:8000")?;
/// let list = gateway.list_content("+15550100", &ListQuery::default()).await?;
/// for item in &list.contents {
///   println!("{} {}", item.id, item.headline());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpGateway {
  /// Shared connection pool
  client: Client,
  /// Backend root, e.g. `http://localhost:8000/`
  base:   Url,
}

/// Body of a delete response.
#[derive(Debug, Deserialize)]
struct Acknowledgement {
  #[serde(default = "acknowledged")]
  success: bool,
  #[serde(default)]
  message: String,
}

fn acknowledged() -> bool { true }

impl HttpGateway {
  /// Creates a gateway with a default HTTP client.
  pub fn new(base_url: &str) -> Result<Self> { Self::with_client(base_url, Client::new()) }

  /// Creates a gateway from configuration, applying the request timeout.
  pub fn from_config(config: &Config) -> Result<Self> {
    let client = Client::builder().timeout(config.request_timeout()).build()?;
    Self::with_client(&config.api_url, client)
  }

  /// Creates a gateway around an existing client.
  pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
    let base = Url::parse(base_url)?;
    if base.cannot_be_a_base() {
      return Err(StashError::Config(format!("\"{base_url}\" cannot be used as a base URL")));
    }
    Ok(Self { client, base })
  }

  /// The backend root this gateway talks to.
  pub fn base_url(&self) -> &Url { &self.base }

  /// Joins path segments onto the base URL, percent-encoding each one.
  fn endpoint(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|_| StashError::Config(format!("\"{}\" cannot be used as a base URL", self.base)))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  /// URL of the list endpoint for `user_id` and `query`.
  fn list_url(&self, user_id: &str, query: &ListQuery) -> Result<Url> {
    // The trailing empty segment keeps the slash the backend routes on.
    let mut url = self.endpoint(&["api", "content", ""])?;
    {
      let mut pairs = url.query_pairs_mut();
      pairs.append_pair("user_phone", user_id);
      if let Some(category) = query.category {
        pairs.append_pair("category", category.id());
      }
      if let Some(search) = query.search.as_deref().filter(|term| !term.is_empty()) {
        pairs.append_pair("search", search);
      }
      if let Some(skip) = query.skip {
        pairs.append_pair("skip", &skip.to_string());
      }
      if let Some(limit) = query.limit {
        pairs.append_pair("limit", &limit.to_string());
      }
    }
    Ok(url)
  }

  /// URL of the stats endpoint for `user_id`.
  fn stats_url(&self, user_id: &str) -> Result<Url> {
    self.endpoint(&["api", "content", "stats", user_id])
  }

  /// URL of the single-item endpoint for `id`.
  fn item_url(&self, id: ContentId) -> Result<Url> {
    self.endpoint(&["api", "content", &id.to_string()])
  }
}

#[async_trait]
impl Gateway for HttpGateway {
  async fn list_content(&self, user_id: &str, query: &ListQuery) -> Result<ContentList> {
    let url = self.list_url(user_id, query)?;
    debug!("GET {}", url);
    let list: ContentList = decode(self.client.get(url).send().await?).await?;
    trace!("Listed {} items", list.contents.len());
    Ok(list)
  }

  async fn get_stats(&self, user_id: &str) -> Result<Stats> {
    let url = self.stats_url(user_id)?;
    debug!("GET {}", url);
    decode(self.client.get(url).send().await?).await
  }

  async fn delete_content(&self, id: ContentId) -> Result<()> {
    let url = self.item_url(id)?;
    debug!("DELETE {}", url);
    let response = self.client.delete(url).send().await?;
    let status = response.status();
    let ack: Acknowledgement = decode(response).await?;
    if ack.success {
      Ok(())
    } else {
      Err(StashError::Api { status: status.as_u16(), message: ack.message })
    }
  }

  async fn get_content(&self, id: ContentId) -> Result<ContentItem> {
    let url = self.item_url(id)?;
    debug!("GET {}", url);
    decode(self.client.get(url).send().await?).await
  }
}

/// Checks the status and decodes a JSON body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
  let status = response.status();
  let body = response.bytes().await?;
  if status == StatusCode::NOT_FOUND {
    return Err(StashError::NotFound);
  }
  if !status.is_success() {
    let message = error_detail(&body);
    warn!("Backend answered {}: {}", status, message);
    return Err(StashError::Api { status: status.as_u16(), message });
  }
  Ok(serde_json::from_slice(&body)?)
}

/// The `detail` field of an error body, or the body itself.
fn error_detail(body: &[u8]) -> String {
  serde_json::from_slice::<Value>(body)
    .ok()
    .and_then(|value| value.get("detail").and_then(Value::as_str).map(str::to_string))
    .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_list_url() {
    let gateway = HttpGateway::new("http://localhost:8000").unwrap();
    let url = gateway.list_url("+15550100", &ListQuery::default()).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/api/content/?user_phone=%2B15550100");

    let query = ListQuery::default().category(Category::Food).search("pasta").page(50, 25);
    let url = gateway.list_url("alice", &query).unwrap();
    assert_eq!(
      url.as_str(),
      "http://localhost:8000/api/content/?user_phone=alice&category=food&search=pasta&skip=50&\
       limit=25"
    );
  }

  #[test]
  fn test_endpoints_respect_base_path() {
    let gateway = HttpGateway::new("https://example.com/backend/").unwrap();
    assert_eq!(gateway.item_url(42).unwrap().as_str(), "https://example.com/backend/api/content/42");
    assert_eq!(
      gateway.stats_url("bob smith").unwrap().as_str(),
      "https://example.com/backend/api/content/stats/bob%20smith"
    );

    let gateway = HttpGateway::new("https://example.com/backend").unwrap();
    assert_eq!(gateway.item_url(7).unwrap().as_str(), "https://example.com/backend/api/content/7");
  }

  #[test]
  fn test_rejects_unusable_base() {
    assert!(matches!(HttpGateway::new("not a url"), Err(StashError::Url(_))));
    assert!(matches!(HttpGateway::new("mailto:someone@example.com"), Err(StashError::Config(_))));
  }

  #[test]
  fn test_error_detail() {
    assert_eq!(error_detail(br#"{"detail": "Content not found"}"#), "Content not found");
    assert_eq!(error_detail(b"  Internal Server Error \n"), "Internal Server Error");
  }

  #[test]
  fn test_acknowledgement_defaults() {
    let ack: Acknowledgement = serde_json::from_str("{}").unwrap();
    assert!(ack.success);
    let ack: Acknowledgement =
      serde_json::from_str(r#"{"success": false, "message": "locked"}"#).unwrap();
    assert!(!ack.success);
    assert_eq!(ack.message, "locked");
  }

  #[ignore = "Can't run this in general -- relies on a running backend."]
  #[tokio::test]
  async fn test_live_backend() {
    let gateway = HttpGateway::new("http://localhost:8000").unwrap();
    let stats = gateway.get_stats("+15550100").await.unwrap();
    let list = gateway.list_content("+15550100", &ListQuery::default()).await.unwrap();
    dbg!(&stats);
    assert!(list.contents.len() as u64 <= stats.total_contents);
  }
}
