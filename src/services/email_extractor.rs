use std::{sync::LazyLock, time::Duration};

use regex::Regex;
use reqwest::Client;
use scraper::Html;

use crate::error::SerpError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}\b")
        .expect("email pattern is valid")
});

pub struct EmailExtractor {
    client: Client,
}

impl EmailExtractor {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, SerpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(EmailExtractor { client })
    }

    pub async fn extract_from_url(&self, url: &str, target_domain: Option<&str>) -> Vec<String> {
        match self.fetch_page(url).await {
            Some(html) => extract_emails(&visible_text(&html), target_domain),
            None => vec![],
        }
    }

    async fn fetch_page(&self, url: &str) -> Option<String> {
        let res = match self.client.get(url).send().await {
            Ok(res) => res,
            Err(e) => {
                log::warn!("Error fetching {}: {:?}", url, e);
                return None;
            }
        };

        if !res.status().is_success() {
            log::warn!("Fetching {} returned {}", url, res.status());
            return None;
        }

        match res.text().await {
            Ok(html) => Some(html),
            Err(e) => {
                log::warn!("Failed to read body of {}: {:?}", url, e);
                None
            }
        }
    }
}

pub fn visible_text(html: &str) -> String {
    Html::parse_document(html).root_element().text().collect()
}

/// Email-like tokens in `text`.
///
/// With a target domain, anything after `@domain` is cut off and only
/// addresses that are then exactly `local@domain` survive. Without one every
/// token is returned as found.
pub fn extract_emails(text: &str, target_domain: Option<&str>) -> Vec<String> {
    let tokens = EMAIL_PATTERN.find_iter(text).map(|m| m.as_str());

    let Some(domain) = target_domain.map(str::trim).filter(|d| !d.is_empty()) else {
        return tokens.map(str::to_string).collect();
    };

    let suffix = format!("@{}", domain);
    let Ok(exact) = Regex::new(&format!(r"^[a-zA-Z0-9._%+-]+@{}$", regex::escape(domain))) else {
        return vec![];
    };

    tokens
        .filter_map(|token| {
            let cleaned = match token.find(&suffix) {
                Some(at) => &token[..at + suffix.len()],
                None => token,
            };
            exact.is_match(cleaned).then(|| cleaned.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    #[test]
    fn target_domain_keeps_only_matching_addresses() {
        let text = "contact: a.b@x.com, spam";
        assert_eq!(extract_emails(text, Some("x.com")), vec!["a.b@x.com"]);
    }

    #[test]
    fn no_target_returns_every_token() {
        let text = "contact: a.b@x.com, spam, sales@y.co.id or noreply@z.org.";
        assert_eq!(
            extract_emails(text, None),
            vec!["a.b@x.com", "sales@y.co.id", "noreply@z.org"]
        );
    }

    #[test]
    fn trailing_artifacts_after_domain_are_cut() {
        // Text nodes glued together by the page layout
        let text = "mail hr@cermati.com.Careers and ops@cermati.com.sg";
        assert_eq!(
            extract_emails(text, Some("cermati.com")),
            vec!["hr@cermati.com", "ops@cermati.com"]
        );
    }

    #[test]
    fn other_domains_are_dropped() {
        let text = "a@x.com b@notx.com c@x.co";
        assert_eq!(extract_emails(text, Some("x.com")), vec!["a@x.com"]);
    }

    #[test]
    fn visible_text_joins_nodes() {
        let html = "<html><body><p>Email: <b>info@shop.id</b></p></body></html>";
        assert_eq!(
            extract_emails(&visible_text(html), Some("shop.id")),
            vec!["info@shop.id"]
        );
    }

    #[tokio::test]
    async fn extracts_from_fetched_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<div>Write to sales@acme.com or jobs@acme.com</div>"),
            )
            .mount(&server)
            .await;

        let extractor = EmailExtractor::new(Duration::from_secs(5), "test").unwrap();
        let emails = extractor
            .extract_from_url(&format!("{}/contact", server.uri()), Some("acme.com"))
            .await;

        assert_eq!(emails, vec!["sales@acme.com", "jobs@acme.com"]);
    }

    #[tokio::test]
    async fn failed_fetch_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let extractor = EmailExtractor::new(Duration::from_secs(5), "test").unwrap();
        assert!(extractor
            .extract_from_url(&format!("{}/missing", server.uri()), None)
            .await
            .is_empty());
        assert!(extractor
            .extract_from_url("http://127.0.0.1:1/unreachable", None)
            .await
            .is_empty());
    }
}
