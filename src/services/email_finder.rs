use crate::{
    domain::{dedup_by_email, EmailRecord, EmailSearch, LanguageCode, PageSize, SearchRequest},
    error::SerpError,
};

use super::{EmailExtractor, SerperClient};

pub const DEFAULT_NUM_RESULTS: usize = 20;

#[derive(Debug, Clone)]
pub struct EmailQuery {
    pub search: EmailSearch,
    pub location: String,
    pub language: LanguageCode,
    pub num_results: PageSize,
}

pub async fn find_emails(
    client: &SerperClient,
    extractor: &EmailExtractor,
    api_key: &str,
    query: &EmailQuery,
) -> Result<Vec<EmailRecord>, SerpError> {
    if query.search.is_blank() {
        let message = match query.search {
            EmailSearch::Domain(_) => "Please enter a target domain!",
            EmailSearch::Service(_) => "Please enter a service name!",
            EmailSearch::Dork(_) => "Please enter a dork query!",
        };
        return Err(SerpError::invalid_input(message));
    }

    let request = SearchRequest::new(
        query.search.query(),
        query.location.as_str(),
        query.language.clone(),
        query.num_results,
    )?;
    let urls = client.search(api_key, &request).await?.links();

    if urls.is_empty() {
        log::info!("No websites found for query: {}", request.keyword);
        return Ok(vec![]);
    }
    log::info!("Scraping {} pages for emails", urls.len());

    let target_domain = query.search.target_domain();
    let mut records = vec![];

    for url in urls.iter() {
        let emails = extractor
            .extract_from_url(url, target_domain.as_deref())
            .await;
        log::info!("Found {} emails on {}", emails.len(), url);

        records.extend(emails.into_iter().map(|email| EmailRecord::new(email, url)));
    }

    Ok(dedup_by_email(records))
}
