use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const NOT_FOUND: &str = "Not Found";
pub const NO_URL: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankPosition {
    Found(u32),
    NotFound,
}

impl fmt::Display for RankPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankPosition::Found(position) => write!(f, "{}", position),
            RankPosition::NotFound => f.write_str(NOT_FOUND),
        }
    }
}

impl Serialize for RankPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RankPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim() {
            NOT_FOUND => Ok(RankPosition::NotFound),
            other => other
                .parse::<u32>()
                .map(RankPosition::Found)
                .map_err(|_| serde::de::Error::custom(format!("invalid position {:?}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRecord {
    #[serde(rename = "Keyword")]
    pub keyword: String,
    #[serde(rename = "Position")]
    pub position: RankPosition,
    #[serde(rename = "URL", with = "url_or_na")]
    pub url: Option<String>,
}

impl RankRecord {
    pub fn found(keyword: impl Into<String>, position: u32, url: impl Into<String>) -> Self {
        RankRecord {
            keyword: keyword.into(),
            position: RankPosition::Found(position),
            url: Some(url.into()),
        }
    }

    pub fn not_found(keyword: impl Into<String>) -> Self {
        RankRecord {
            keyword: keyword.into(),
            position: RankPosition::NotFound,
            url: None,
        }
    }

    pub fn url_or_na(&self) -> &str {
        self.url.as_deref().unwrap_or(NO_URL)
    }
}

mod url_or_na {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::NO_URL;

    pub fn serialize<S: Serializer>(url: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(url.as_deref().unwrap_or(NO_URL))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            NO_URL => Ok(None),
            _ => Ok(Some(raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_render_verbatim() {
        let record = RankRecord::not_found("seo jogja");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Keyword": "seo jogja", "Position": "Not Found", "URL": "N/A"})
        );
    }

    #[test]
    fn found_position_reads_back_from_text() {
        let record: RankRecord = serde_json::from_value(serde_json::json!({
            "Keyword": "cafe",
            "Position": "7",
            "URL": "https://example.com/menu"
        }))
        .unwrap();
        assert_eq!(record, RankRecord::found("cafe", 7, "https://example.com/menu"));
    }

    #[test]
    fn garbage_position_is_rejected() {
        let result: Result<RankRecord, _> = serde_json::from_value(serde_json::json!({
            "Keyword": "cafe",
            "Position": "seventh",
            "URL": "N/A"
        }));
        assert!(result.is_err());
    }
}
