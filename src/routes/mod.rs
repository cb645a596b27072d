use actix_web::{HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::{configuration::ProviderSettings, domain::parse_keyword_lines, error::SerpError};

pub mod email_route;
pub mod health_check_route;
pub mod maps_route;
pub mod rank_route;
pub mod reviews_route;

const API_KEY_HEADER: &str = "X-API-KEY";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

/// Either a JSON list or newline separated text, as pasted into a textarea.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LineList {
    List(Vec<String>),
    Text(String),
}

impl LineList {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            LineList::List(items) => items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            LineList::Text(text) => parse_keyword_lines(&text),
        }
    }
}

pub fn api_key(req: &HttpRequest, provider: &ProviderSettings) -> Result<String, SerpError> {
    let from_header = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty());

    from_header
        .or(provider.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty()))
        .map(str::to_string)
        .ok_or_else(|| SerpError::invalid_input("Please enter your Serper API key."))
}

pub fn csv_response(filename: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename={}", filename),
        ))
        .body(body)
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn provider(api_key: Option<&str>) -> ProviderSettings {
        ProviderSettings {
            base_url: "https://google.serper.dev".to_string(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 30,
        }
    }

    #[test]
    fn header_key_wins_over_configured_key() {
        let req = TestRequest::default()
            .insert_header(("X-API-KEY", "from-header"))
            .to_http_request();
        assert_eq!(api_key(&req, &provider(Some("configured"))).unwrap(), "from-header");
    }

    #[test]
    fn configured_key_is_the_fallback() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(api_key(&req, &provider(Some("configured"))).unwrap(), "configured");

        let req = TestRequest::default()
            .insert_header(("X-API-KEY", " "))
            .to_http_request();
        assert_eq!(api_key(&req, &provider(Some("configured"))).unwrap(), "configured");
    }

    #[test]
    fn missing_key_is_invalid_input() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            api_key(&req, &provider(None)),
            Err(SerpError::InvalidInput(_))
        ));
    }

    #[test]
    fn line_list_accepts_list_or_text() {
        let list: LineList = serde_json::from_str(r#"["a", " ", " b "]"#).unwrap();
        assert_eq!(list.into_lines(), vec!["a", "b"]);

        let text: LineList = serde_json::from_str(r#""one\n\n two \n""#).unwrap();
        assert_eq!(text.into_lines(), vec!["one", "two"]);
    }
}
