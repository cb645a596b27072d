use itertools::Itertools;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "URL")]
    pub source_url: String,
    #[serde(rename = "Domain")]
    pub source_domain: String,
}

impl EmailRecord {
    pub fn new(email: impl Into<String>, source_url: &str) -> Self {
        EmailRecord {
            email: email.into(),
            source_url: source_url.to_string(),
            source_domain: host_of(source_url).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailSearchMode {
    Domain,
    Service,
    Dork,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailSearch {
    Domain(String),
    /// Contact pages of a named service, e.g. "Jasa SEO Jogja".
    Service(String),
    Dork(String),
}

impl EmailSearch {
    pub fn new(mode: EmailSearchMode, value: String) -> Self {
        match mode {
            EmailSearchMode::Domain => EmailSearch::Domain(value),
            EmailSearchMode::Service => EmailSearch::Service(value),
            EmailSearchMode::Dork => EmailSearch::Dork(value),
        }
    }

    pub fn query(&self) -> String {
        match self {
            EmailSearch::Domain(domain) => {
                let domain = sanitize_domain(domain);
                format!(r#""@{}" -site:{}"#, domain, domain)
            }
            EmailSearch::Service(service) => format!(r#""{}" "contact" "email""#, service.trim()),
            EmailSearch::Dork(dork) => dork.trim().to_string(),
        }
    }

    pub fn target_domain(&self) -> Option<String> {
        match self {
            EmailSearch::Domain(domain) => Some(sanitize_domain(domain)),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            EmailSearch::Domain(domain) => sanitize_domain(domain).is_empty(),
            EmailSearch::Service(v) | EmailSearch::Dork(v) => v.trim().is_empty(),
        }
    }
}

pub fn dedup_by_email(records: Vec<EmailRecord>) -> Vec<EmailRecord> {
    records
        .into_iter()
        .unique_by(|record| record.email.clone())
        .collect()
}

/// Strips the scheme and trailing slashes users paste along with a domain.
pub fn sanitize_domain(domain: &str) -> String {
    let domain = domain.trim();
    let domain = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain);

    domain.trim_end_matches('/').to_string()
}

pub fn host_of(url: &str) -> Option<String> {
    let parsed_url = Url::parse(url).ok()?;
    let host = parsed_url.host_str()?;

    match parsed_url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_source() {
        let records = vec![
            EmailRecord::new("a@x.com", "https://one.com/contact"),
            EmailRecord::new("a@x.com", "https://two.com/about"),
            EmailRecord::new("b@x.com", "https://two.com/about"),
        ];

        let records = dedup_by_email(records);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_url, "https://one.com/contact");
        assert_eq!(records[1].email, "b@x.com");
    }

    #[test]
    fn record_domain_is_netloc() {
        let record = EmailRecord::new("a@x.com", "https://www.example.com:8443/contact?x=1");
        assert_eq!(record.source_domain, "www.example.com:8443");

        let record = EmailRecord::new("a@x.com", "not a url");
        assert_eq!(record.source_domain, "");
    }

    #[test]
    fn sanitize_domain_strips_scheme_and_slash() {
        assert_eq!(sanitize_domain("https://cermati.com/"), "cermati.com");
        assert_eq!(sanitize_domain("http://cermati.com"), "cermati.com");
        assert_eq!(sanitize_domain(" cermati.com "), "cermati.com");
    }

    #[test]
    fn search_queries() {
        assert_eq!(
            EmailSearch::Domain("https://cermati.com/".to_string()).query(),
            r#""@cermati.com" -site:cermati.com"#
        );
        assert_eq!(
            EmailSearch::Service("Jasa SEO Jogja".to_string()).query(),
            r#""Jasa SEO Jogja" "contact" "email""#
        );
        assert_eq!(
            EmailSearch::Dork(r#""@x.com" inurl:contact"#.to_string()).query(),
            r#""@x.com" inurl:contact"#
        );
        assert_eq!(
            EmailSearch::Domain("x.com".to_string()).target_domain(),
            Some("x.com".to_string())
        );
        assert_eq!(EmailSearch::Service("x".to_string()).target_domain(), None);
    }

    #[test]
    fn search_mode_deserializes_from_snake_case() {
        let mode: EmailSearchMode = serde_json::from_value(serde_json::json!("domain")).unwrap();
        assert_eq!(
            EmailSearch::new(mode, "x.com".to_string()),
            EmailSearch::Domain("x.com".to_string())
        );
        assert!(EmailSearch::Dork("  ".to_string()).is_blank());
    }

    #[test]
    fn scheme_only_domain_is_blank() {
        assert!(EmailSearch::Domain("https://".to_string()).is_blank());
        assert!(EmailSearch::Domain(" / ".to_string()).is_blank());
        assert!(!EmailSearch::Domain("https://x.com/".to_string()).is_blank());
    }
}
