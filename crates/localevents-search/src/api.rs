//! Access to the upstream list endpoints

use std::sync::Arc;

use async_trait::async_trait;
use localevents_config::ApiConfig;
use localevents_http::{HttpClient, HttpClientTrait};
use tracing::debug;
use url::Url;

use crate::error::{Result, SearchError};
use crate::planner::ListQuery;
use crate::record::{Page, Record};

/// The list-query contract every collection implements.
///
/// Mockable seam between the aggregator and the REST API.
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// Fetch one page of a collection
    async fn list(&self, query: &ListQuery) -> Result<Page<Record>>;
}

/// [`CollectionApi`] over HTTP: `GET {base_url}/{collection}?…`
pub struct RestCollectionApi {
    http: Arc<dyn HttpClientTrait>,
    base_url: Url,
}

impl RestCollectionApi {
    pub fn new(http: Arc<dyn HttpClientTrait>, base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| SearchError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidBaseUrl(base_url.to_string()));
        }
        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    /// Build the HTTP client and API from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let http = HttpClient::new(config.http_config())?;
        Self::new(Arc::new(http), &config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full request URL for a list query
    pub fn url_for(&self, query: &ListQuery) -> Result<Url> {
        let mut url = self
            .base_url
            .join(query.collection)
            .map_err(|e| SearchError::InvalidBaseUrl(e.to_string()))?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        Ok(url)
    }
}

#[async_trait]
impl CollectionApi for RestCollectionApi {
    async fn list(&self, query: &ListQuery) -> Result<Page<Record>> {
        let url = self.url_for(query)?;
        debug!(collection = query.collection, page = query.page, %url, "List query");

        let response = self.http.get(url.as_str()).await?;
        response
            .json::<Page<Record>>()
            .await
            .map_err(|e| SearchError::Decode {
                collection: query.collection.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::Facet;
    use crate::planner::plan;
    use crate::query::SearchQuery;
    use localevents_http::HttpConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(base: &str) -> RestCollectionApi {
        let http = HttpClient::new(HttpConfig::default()).unwrap();
        RestCollectionApi::new(Arc::new(http), base).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let api = api("https://agenda.example.org/api");
        assert_eq!(api.base_url().as_str(), "https://agenda.example.org/api/");

        let query = SearchQuery::from_input("jazz", false);
        let list = &plan(Facet::Tags, &query, 1, 10)[0];
        let url = api.url_for(list).unwrap();
        assert_eq!(url.path(), "/api/tags");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("filters[name]".to_string(), "jazz".to_string())));
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let http = HttpClient::new(HttpConfig::default()).unwrap();
        assert!(matches!(
            RestCollectionApi::new(Arc::new(http), "no scheme here"),
            Err(SearchError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_from_config_applies_proxy() {
        let mut config = ApiConfig::default();
        config.proxy = Some("http://proxy.internal:3128".to_string());
        assert!(RestCollectionApi::from_config(&config).is_ok());

        config.proxy = Some("invalid-proxy".to_string());
        assert!(matches!(
            RestCollectionApi::from_config(&config),
            Err(SearchError::Http(localevents_http::HttpError::InvalidProxy(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_decodes_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .and(query_param("filters[tag]", "techno"))
            .and(query_param("filters[created_at][start]", "2024-01-01"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "id": 7, "name": "Warehouse Rave", "primary_photo": "/p/7.jpg" }],
                "total": 1,
                "last_page": 1
            })))
            .mount(&server)
            .await;

        let query = SearchQuery::from_input("techno CreatedAfter:2024-01-01", false);
        let tag_query = plan(Facet::Events, &query, 1, 10)
            .into_iter()
            .find(|q| q.filter("tag").is_some())
            .unwrap();

        let page = api(&server.uri()).list(&tag_query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, 7);
        assert!(page.data[0].has_image());
    }

    #[tokio::test]
    async fn test_server_error_surfaces_as_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/series"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let query = SearchQuery::from_input("zine", false);
        let list = &plan(Facet::Series, &query, 1, 10)[0];
        let result = api(&server.uri()).list(list).await;
        assert!(matches!(result, Err(SearchError::Http(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/locations"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let query = SearchQuery::from_input("harbour", false);
        let list = &plan(Facet::Locations, &query, 1, 10)[0];
        let result = api(&server.uri()).list(list).await;
        assert!(matches!(result, Err(SearchError::Decode { .. })));
    }
}
