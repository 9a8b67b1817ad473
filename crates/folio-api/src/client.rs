use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::{Article, Category, Comment, Envelope};
use folio_list::fetch::{FetchCategories, FetchFuture, FetchList};
use folio_list::{QueryParams, Session};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP client for the article API.
///
/// Cheap to clone; clones share one connection pool. Implements
/// [`FetchList`] for articles and [`FetchCategories`], so it plugs straight
/// into a [`folio_list::Browser`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base = Url::parse(&config.base_url)
            .map_err(|err| ApiError::InvalidBaseUrl(format!("{}: {err}", config.base_url)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(config.base_url));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, base })
    }

    /// Build a client from [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET /api/articles/{slug}`.
    pub async fn article(&self, session: &Session, slug: &str) -> Result<Article, ApiError> {
        let request = self.get(&["api", "articles", slug], session)?;
        let envelope: Envelope<Article> = send(request).await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// `GET /api/articles?search=..&category_id=..`.
    pub async fn articles(
        &self,
        session: &Session,
        query: &QueryParams,
    ) -> Result<Vec<Article>, ApiError> {
        let request = self.get(&["api", "articles"], session)?.query(query);
        let envelope: Envelope<Vec<Article>> = send(request).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// `GET /api/categories`.
    pub async fn categories(&self, session: &Session) -> Result<Vec<Category>, ApiError> {
        let request = self.get(&["api", "categories"], session)?;
        let envelope: Envelope<Vec<Category>> = send(request).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// `GET /api/articles/{slug}/comments`.
    pub async fn comments(&self, session: &Session, slug: &str) -> Result<Vec<Comment>, ApiError> {
        let request = self.get(&["api", "articles", slug, "comments"], session)?;
        let body: Value = send(request).await?;
        comments_from(body)
    }

    /// A [`FetchList`] over one article's comments.
    pub fn comment_feed(&self, slug: impl Into<String>) -> CommentFeed {
        CommentFeed {
            client: self.clone(),
            slug: slug.into(),
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, segments: &[&str], session: &Session) -> Result<RequestBuilder, ApiError> {
        let url = self.url(segments)?;
        tracing::debug!(%url, authenticated = session.is_authenticated(), "GET");
        let request = self.http.get(url);
        Ok(match session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        // Error bodies use the same envelope; fall back to the reason phrase.
        let message = response
            .json::<Envelope<Value>>()
            .await
            .ok()
            .and_then(|envelope| envelope.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json().await?)
}

/// Comments arrive as `{data: [...]}`, a bare array, or `{comments: [...]}`.
/// A present `data` key wins even when null; any other shape is empty.
fn comments_from(body: Value) -> Result<Vec<Comment>, ApiError> {
    let list = match body {
        Value::Array(_) => body,
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("comments")) {
            Some(Value::Null) | None => return Ok(Vec::new()),
            Some(list) => list,
        },
        other => {
            tracing::warn!(body = %other, "unexpected comments payload");
            return Ok(Vec::new());
        }
    };
    Ok(serde_json::from_value(list)?)
}

impl FetchList for ApiClient {
    type Item = Article;
    type Error = ApiError;

    fn fetch_list(&self, session: &Session, query: QueryParams) -> FetchFuture<Article, ApiError> {
        let client = self.clone();
        let session = session.clone();
        Box::pin(async move { client.articles(&session, &query).await })
    }
}

impl FetchCategories for ApiClient {
    type Category = Category;
    type Error = ApiError;

    fn fetch_categories(&self, session: &Session) -> FetchFuture<Category, ApiError> {
        let client = self.clone();
        let session = session.clone();
        Box::pin(async move { client.categories(&session).await })
    }
}

/// Comments of one article as a list source.
///
/// The comments endpoint takes no filters, so the query is not sent; a list
/// view over a feed still paginates locally.
#[derive(Debug, Clone)]
pub struct CommentFeed {
    client: ApiClient,
    slug: String,
}

impl CommentFeed {
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl FetchList for CommentFeed {
    type Item = Comment;
    type Error = ApiError;

    fn fetch_list(&self, session: &Session, _query: QueryParams) -> FetchFuture<Comment, ApiError> {
        let feed = self.clone();
        let session = session.clone();
        Box::pin(async move { feed.client.comments(&session, &feed.slug).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comment(id: u64) -> Value {
        json!({ "id": id, "content": "hi", "created_at": "2024-01-01T00:00:00Z" })
    }

    #[test]
    fn comments_accept_every_known_shape() {
        let wrapped = comments_from(json!({ "data": [comment(1)] })).unwrap();
        let bare = comments_from(json!([comment(2)])).unwrap();
        let keyed = comments_from(json!({ "comments": [comment(3)] })).unwrap();
        assert_eq!(wrapped[0].id, 1);
        assert_eq!(bare[0].id, 2);
        assert_eq!(keyed[0].id, 3);
    }

    #[test]
    fn null_data_wins_over_comments_key() {
        let comments = comments_from(json!({ "data": null, "comments": [comment(1)] })).unwrap();
        assert!(comments.is_empty());
    }

    #[test]
    fn unknown_shapes_are_empty() {
        assert!(comments_from(json!({ "success": true })).unwrap().is_empty());
        assert!(comments_from(json!("nope")).unwrap().is_empty());
    }

    #[test]
    fn malformed_comment_is_a_decode_error() {
        let err = comments_from(json!([{ "id": "x" }])).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn urls_keep_base_prefix_and_encode_segments() {
        let client = ApiClient::new(ClientConfig {
            base_url: "http://localhost:9000/cms/".into(),
            ..ClientConfig::default()
        })
        .unwrap();
        let url = client.url(&["api", "articles", "two words", "comments"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/cms/api/articles/two%20words/comments"
        );
    }

    #[test]
    fn rejects_non_http_base() {
        let err = ApiClient::new(ClientConfig {
            base_url: "ftp://example.com".into(),
            ..ClientConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
        assert!(ApiClient::new(ClientConfig {
            base_url: "not a url".into(),
            ..ClientConfig::default()
        })
        .is_err());
    }
}
