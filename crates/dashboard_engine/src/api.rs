use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::decode::{decode_article_list, decode_select_ack};
use crate::{ApiError, ArticleRecord, EngineEvent, FailureKind, SelectAck};

/// Backend address used when none is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// The three backend calls the dashboard makes.
#[async_trait::async_trait]
pub trait ArticleApi: Send + Sync {
    /// `GET {base}/articles/`
    async fn list_articles(&self) -> Result<Vec<ArticleRecord>, ApiError>;

    /// `POST {base}/articles/select/{id}`
    async fn select_for_rewrite(&self, article_id: &str) -> Result<SelectAck, ApiError>;

    /// `PUT {base}/articles/{id}` with `{"content": ...}`
    async fn update_content(&self, article_id: &str, content: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestArticleApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestArticleApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let base = &self.settings.base_url;
        let mut url = Url::parse(base)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::new(FailureKind::InvalidUrl, format!("{base} cannot be a base URL"))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl ArticleApi for ReqwestArticleApi {
    async fn list_articles(&self) -> Result<Vec<ArticleRecord>, ApiError> {
        let url = self.endpoint(&["articles", ""])?;
        let body = self.send(self.client.get(url)).await?;
        decode_article_list(&body)
    }

    async fn select_for_rewrite(&self, article_id: &str) -> Result<SelectAck, ApiError> {
        let url = self.endpoint(&["articles", "select", article_id])?;
        let body = self.send(self.client.post(url)).await?;
        decode_select_ack(&body)
    }

    async fn update_content(&self, article_id: &str, content: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["articles", article_id])?;
        let payload = serde_json::json!({ "content": content }).to_string();
        let request = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        self.send(request).await.map(|_| ())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_with_base(base_url: &str) -> ReqwestArticleApi {
        ReqwestArticleApi::new(ApiSettings {
            base_url: base_url.to_string(),
            ..ApiSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_and_prefix() {
        let api = api_with_base("http://localhost:8000/");
        assert_eq!(
            api.endpoint(&["articles", ""]).unwrap().as_str(),
            "http://localhost:8000/articles/"
        );

        let api = api_with_base("http://localhost:8000/api");
        assert_eq!(
            api.endpoint(&["articles", "select", "3"]).unwrap().as_str(),
            "http://localhost:8000/api/articles/select/3"
        );
    }

    #[test]
    fn ids_are_encoded_as_a_single_segment() {
        let api = api_with_base("http://localhost:8000");
        let url = api.endpoint(&["articles", "select", "a/b?c#d"]).unwrap();
        assert_eq!(url.path(), "/articles/select/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);

        let url = api.endpoint(&["articles", "x/../../y"]).unwrap();
        assert_eq!(url.path(), "/articles/x%2F..%2F..%2Fy");
    }

    #[test]
    fn invalid_base_is_reported_per_request() {
        let api = api_with_base("not a url");
        let err = api.endpoint(&["articles", ""]).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);

        let api = api_with_base("mailto:news@example.com");
        let err = api.endpoint(&["articles", ""]).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ApiSettings::default().base_url, DEFAULT_API_URL);
    }
}
