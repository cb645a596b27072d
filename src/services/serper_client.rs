use std::{sync::Arc, time::Duration};

use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::{
    domain::{PlacesResponse, Review, ReviewsResponse, SearchRequest, SearchResponse},
    error::SerpError,
};

use super::ResponseCache;

const API_KEY_HEADER: &str = "X-API-KEY";

pub struct SerperClient {
    client: Client,
    base_url: String,
    cache: Arc<ResponseCache>,
}

#[derive(Serialize)]
struct MapsPayload<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    gl: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hl: Option<&'a str>,
}

#[derive(Serialize)]
struct ReviewsPayload<'a> {
    cid: &'a str,
    gl: &'a str,
    hl: &'a str,
}

impl SerperClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        cache: Arc<ResponseCache>,
    ) -> Result<Self, SerpError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(SerperClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub async fn search(
        &self,
        api_key: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, SerpError> {
        let response = self
            .post_json("search", api_key, &request.payload(), SearchResponse::from_raw)
            .await?;

        if response.is_empty() {
            log::info!("No organic results for query: {}", request.query_text());
        }

        Ok(response)
    }

    pub async fn maps(
        &self,
        api_key: &str,
        query: &str,
        gl: Option<&str>,
        hl: Option<&str>,
    ) -> Result<PlacesResponse, SerpError> {
        let payload = MapsPayload { q: query, gl, hl };

        self.post_json("maps", api_key, &payload, serde_json::from_value)
            .await
    }

    pub async fn reviews(
        &self,
        api_key: &str,
        cid: &str,
        gl: &str,
        hl: &str,
        limit: usize,
    ) -> Result<Vec<Review>, SerpError> {
        let payload = ReviewsPayload { cid, gl, hl };
        let mut response: ReviewsResponse = self
            .post_json("reviews", api_key, &payload, serde_json::from_value)
            .await?;

        response.reviews.truncate(limit);
        Ok(response.reviews)
    }

    // Only bodies that decode are cached, a malformed 200 is retried next time
    async fn post_json<P, T, F>(
        &self,
        endpoint: &str,
        api_key: &str,
        payload: &P,
        decode: F,
    ) -> Result<T, SerpError>
    where
        P: Serialize,
        F: Fn(serde_json::Value) -> Result<T, serde_json::Error>,
    {
        let cache_key = ResponseCache::key(endpoint, api_key, payload)?;
        if let Some(cached) = self.cache.get(&cache_key) {
            log::info!("Serving /{} from cache", endpoint);
            return Ok(decode(cached)?);
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        let res = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("No response from provider on /{}, error: {:?}", endpoint, e);
                e
            })?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::error!("Provider rejected the API key on /{}", endpoint);
            return Err(SerpError::Auth);
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            log::error!("Provider returned {} on /{}: {}", status, endpoint, body);
            return Err(SerpError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = res.json().await?;
        let decoded = decode(value.clone()).map_err(|e| {
            log::error!("Unexpected payload from /{}: {}", endpoint, e);
            e
        })?;
        self.cache.insert(cache_key, value);

        Ok(decoded)
    }
}
