use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    configuration::SearchSettings,
    domain::{LanguageCode, OrganicResult, PageSize, RankRecord, SearchRequest},
    error::SerpError,
};

use super::{rank_locator, SerperClient};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankStrategy {
    #[default]
    Single,
    Escalating,
}

#[derive(Debug, Clone)]
pub struct RankPolicy {
    pub sizes: Vec<PageSize>,
    pub pause: Duration,
    pub top_results: usize,
}

impl RankPolicy {
    pub fn from_settings(
        settings: &SearchSettings,
        strategy: RankStrategy,
    ) -> Result<Self, SerpError> {
        let max = PageSize::new(settings.max_page_size)?;
        let sizes = match strategy {
            RankStrategy::Single => vec![max],
            RankStrategy::Escalating => PageSize::ladder(settings.page_step, max)?,
        };

        Ok(RankPolicy {
            sizes,
            pause: settings.pause(),
            top_results: settings.top_results,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RankPolicies {
    single: RankPolicy,
    escalating: RankPolicy,
}

impl RankPolicies {
    pub fn from_settings(settings: &SearchSettings) -> Result<Self, SerpError> {
        Ok(RankPolicies {
            single: RankPolicy::from_settings(settings, RankStrategy::Single)?,
            escalating: RankPolicy::from_settings(settings, RankStrategy::Escalating)?,
        })
    }

    pub fn get(&self, strategy: RankStrategy) -> &RankPolicy {
        match strategy {
            RankStrategy::Single => &self.single,
            RankStrategy::Escalating => &self.escalating,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Trying(PageSize),
    Found(OrganicResult),
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct RankOutcome {
    pub record: RankRecord,
    pub top_results: Vec<OrganicResult>,
    pub attempts: usize,
}

pub async fn escalating_search(
    client: &SerperClient,
    api_key: &str,
    request: &SearchRequest,
    domain: &str,
    policy: &RankPolicy,
) -> Result<RankOutcome, SerpError> {
    let domain = rank_locator::target_domain(domain)?;

    let mut sizes = policy.sizes.iter().copied();
    let mut state = match sizes.next() {
        Some(size) => SearchState::Trying(size),
        None => SearchState::Exhausted,
    };
    let mut top_results = vec![];
    let mut attempts = 0;

    loop {
        state = match state {
            SearchState::Trying(size) => {
                if attempts > 0 && !policy.pause.is_zero() {
                    tokio::time::sleep(policy.pause).await;
                }
                attempts += 1;

                let response = client.search(api_key, &request.with_num(size)).await?;
                top_results = response.top(policy.top_results);

                match rank_locator::locate(&response.organic, domain)? {
                    Some(result) => SearchState::Found(result.clone()),
                    None => match sizes.next() {
                        Some(next_size) => {
                            log::info!(
                                "{} not in top {} for {:?}, trying {}",
                                domain,
                                size.get(),
                                request.keyword,
                                next_size.get()
                            );
                            SearchState::Trying(next_size)
                        }
                        None => SearchState::Exhausted,
                    },
                }
            }
            SearchState::Found(result) => {
                log::info!(
                    "{} ranks {} for {:?}",
                    domain,
                    result.position,
                    request.keyword
                );
                return Ok(RankOutcome {
                    record: RankRecord::found(&request.keyword, result.position, result.link),
                    top_results,
                    attempts,
                });
            }
            SearchState::Exhausted => {
                log::info!("{} not found for {:?}", domain, request.keyword);
                return Ok(RankOutcome {
                    record: RankRecord::not_found(&request.keyword),
                    top_results,
                    attempts,
                });
            }
        };
    }
}

#[derive(Debug, Clone)]
pub struct RankQuery {
    pub keywords: Vec<String>,
    pub location: String,
    pub language: LanguageCode,
    pub site: Option<String>,
    pub domain: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordResults {
    pub keyword: String,
    pub results: Vec<OrganicResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupFailure {
    pub key: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RankBatch {
    pub records: Vec<RankRecord>,
    pub top_results: Vec<KeywordResults>,
    pub failures: Vec<LookupFailure>,
}

/// Ranks every keyword in order.
///
/// A rejected API key stops the whole batch. Other failures are recorded
/// against their keyword and the batch moves on.
pub async fn check_rankings(
    client: &SerperClient,
    api_key: &str,
    query: &RankQuery,
    policy: &RankPolicy,
) -> Result<RankBatch, SerpError> {
    rank_locator::target_domain(&query.domain)?;
    if query.keywords.is_empty() {
        return Err(SerpError::invalid_input("Please enter at least one keyword."));
    }

    log::info!(
        "Fetching SERP rankings for {} keywords",
        query.keywords.len()
    );

    let mut batch = RankBatch::default();
    let first_size = policy.sizes.first().copied().unwrap_or(PageSize::MAX);

    for keyword in query.keywords.iter() {
        let request = SearchRequest::new(
            keyword.as_str(),
            query.location.as_str(),
            query.language.clone(),
            first_size,
        )?
        .with_site(query.site.clone());

        match escalating_search(client, api_key, &request, &query.domain, policy).await {
            Ok(outcome) => {
                batch.top_results.push(KeywordResults {
                    keyword: outcome.record.keyword.clone(),
                    results: outcome.top_results,
                });
                batch.records.push(outcome.record);
            }
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                log::error!("Rank lookup failed for {:?}: {}", keyword, e);
                batch.failures.push(LookupFailure {
                    key: keyword.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(batch)
}
