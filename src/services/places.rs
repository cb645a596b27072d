use std::time::Duration;

use serde::Serialize;

use crate::{
    configuration::PlacesSettings,
    domain::{Place, PlaceWithReviews, ReviewRecord},
    error::SerpError,
};

use super::{LookupFailure, SerperClient};

#[derive(Debug, Clone)]
pub struct ReviewPolicy {
    pub per_place: usize,
    pub pause: Duration,
}

impl From<&PlacesSettings> for ReviewPolicy {
    fn from(settings: &PlacesSettings) -> Self {
        ReviewPolicy {
            per_place: settings.reviews_per_place,
            pause: settings.pause(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacesResult {
    pub center: Option<String>,
    pub places: Vec<Place>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewBatch {
    pub records: Vec<ReviewRecord>,
    pub failures: Vec<LookupFailure>,
}

pub async fn search_places(
    client: &SerperClient,
    api_key: &str,
    query: &str,
    gl: Option<&str>,
    hl: Option<&str>,
) -> Result<PlacesResult, SerpError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SerpError::invalid_input("Please enter a search query."));
    }

    let gl = gl.map(str::trim).filter(|s| !s.is_empty());
    let hl = hl.map(str::trim).filter(|s| !s.is_empty());
    let response = client.maps(api_key, query, gl, hl).await?;
    log::info!("{} places for {:?}", response.places.len(), query);

    Ok(PlacesResult {
        center: response.ll,
        places: response.places,
    })
}

pub async fn bulk_reviews(
    client: &SerperClient,
    api_key: &str,
    cids: &[String],
    gl: &str,
    hl: &str,
    policy: &ReviewPolicy,
) -> Result<ReviewBatch, SerpError> {
    let cids: Vec<&str> = cids
        .iter()
        .map(|cid| cid.trim())
        .filter(|cid| !cid.is_empty())
        .collect();
    if cids.is_empty() {
        return Err(SerpError::invalid_input("Please enter at least one CID."));
    }

    let mut batch = ReviewBatch::default();

    for cid in cids {
        match client.reviews(api_key, cid, gl, hl, policy.per_place).await {
            Ok(reviews) => {
                log::info!("{} reviews for CID {}", reviews.len(), cid);
                batch
                    .records
                    .extend(reviews.into_iter().map(|review| ReviewRecord {
                        cid: cid.to_string(),
                        review,
                    }));
            }
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                log::error!("Failed to get reviews for CID {}: {}", cid, e);
                batch.failures.push(LookupFailure {
                    key: cid.to_string(),
                    error: e.to_string(),
                });
            }
        }

        pause(policy.pause).await;
    }

    Ok(batch)
}

pub async fn maps_with_reviews(
    client: &SerperClient,
    api_key: &str,
    query: &str,
    gl: &str,
    hl: &str,
    policy: &ReviewPolicy,
) -> Result<Vec<PlaceWithReviews>, SerpError> {
    let places = search_places(client, api_key, query, Some(gl), Some(hl))
        .await?
        .places;

    let mut rows = Vec::with_capacity(places.len());
    for (i, place) in places.into_iter().enumerate() {
        if i > 0 {
            pause(policy.pause).await;
        }

        let reviews = match place.cid.is_empty() {
            true => None,
            false => match client
                .reviews(api_key, &place.cid, gl, hl, policy.per_place)
                .await
            {
                Ok(reviews) => Some(reviews),
                Err(e) if e.is_auth() => return Err(e),
                Err(e) => {
                    log::warn!("No reviews for CID {}: {}", place.cid, e);
                    None
                }
            },
        };

        rows.push(PlaceWithReviews::new(place, reviews.as_deref()));
    }

    Ok(rows)
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::{domain::NO_REVIEWS, services::ResponseCache};

    fn client(server: &MockServer) -> SerperClient {
        SerperClient::new(
            server.uri(),
            Duration::from_secs(5),
            Arc::new(ResponseCache::disabled()),
        )
        .unwrap()
    }

    fn policy() -> ReviewPolicy {
        ReviewPolicy {
            per_place: 5,
            pause: Duration::ZERO,
        }
    }

    fn reviews(count: usize) -> serde_json::Value {
        let reviews: Vec<_> = (1..=count)
            .map(|i| json!({"rating": 4, "snippet": format!("review {}", i), "user": {"name": "Budi"}}))
            .collect();
        json!({ "reviews": reviews })
    }

    async fn mount_reviews(server: &MockServer, cid: &str, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/reviews"))
            .and(body_partial_json(json!({ "cid": cid })))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn bulk_reviews_keeps_five_per_cid_and_skips_failures() {
        let server = MockServer::start().await;
        mount_reviews(&server, "111", ResponseTemplate::new(200).set_body_json(reviews(7))).await;
        mount_reviews(&server, "222", ResponseTemplate::new(500).set_body_string("oops")).await;
        mount_reviews(&server, "333", ResponseTemplate::new(200).set_body_json(reviews(2))).await;

        let cids = vec!["111".to_string(), " 222 ".to_string(), "".to_string(), "333".to_string()];
        let batch = bulk_reviews(&client(&server), "key", &cids, "id", "id", &policy())
            .await
            .unwrap();

        assert_eq!(batch.records.len(), 7);
        assert!(batch.records[..5].iter().all(|r| r.cid == "111"));
        assert!(batch.records[5..].iter().all(|r| r.cid == "333"));
        assert_eq!(
            batch.failures,
            vec![LookupFailure {
                key: "222".to_string(),
                error: "provider returned 500: oops".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn bulk_reviews_aborts_on_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let cids = vec!["111".to_string(), "222".to_string()];
        let result = bulk_reviews(&client(&server), "key", &cids, "id", "id", &policy()).await;

        assert!(matches!(result, Err(SerpError::Auth)));
    }

    #[tokio::test]
    async fn bulk_reviews_without_cids_is_rejected() {
        let server = MockServer::start().await;
        let cids = vec![" ".to_string()];
        let result = bulk_reviews(&client(&server), "key", &cids, "id", "id", &policy()).await;

        assert!(matches!(result, Err(SerpError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn maps_with_reviews_falls_back_per_place() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/maps"))
            .and(body_partial_json(json!({"q": "cafe", "gl": "id", "hl": "en"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "places": [
                    {"title": "Kopi Satu", "cid": "1"},
                    {"title": "Kopi Dua", "cid": "2"},
                    {"title": "No CID"}
                ]
            })))
            .mount(&server)
            .await;
        mount_reviews(&server, "1", ResponseTemplate::new(200).set_body_json(reviews(2))).await;
        mount_reviews(&server, "2", ResponseTemplate::new(502)).await;

        let rows = maps_with_reviews(&client(&server), "key", "cafe", "id", "en", &policy())
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].reviews, "⭐ 4 - review 1\n\n⭐ 4 - review 2");
        assert_eq!(rows[1].reviews, NO_REVIEWS);
        assert_eq!(rows[2].reviews, NO_REVIEWS);
    }

    #[tokio::test]
    async fn maps_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/maps"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = maps_with_reviews(&client(&server), "key", "cafe", "id", "en", &policy()).await;

        assert!(matches!(result, Err(SerpError::Provider { status: 500, .. })));
    }

    #[tokio::test]
    async fn empty_places_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/maps"))
            .and(body_partial_json(json!({"q": "nowhere"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let result = search_places(&client(&server), "key", " nowhere ", Some(""), None)
            .await
            .unwrap();

        assert!(result.places.is_empty());
        assert_eq!(result.center, None);
    }
}
