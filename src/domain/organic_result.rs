use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub organic: Vec<OrganicResult>,
    pub raw: serde_json::Value,
}

#[derive(Deserialize)]
struct OrganicEnvelope {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

impl SearchResponse {
    pub fn from_raw(raw: serde_json::Value) -> Result<Self, serde_json::Error> {
        let envelope = OrganicEnvelope::deserialize(&raw)?;

        // Position is implied by order when the provider leaves it out
        let organic = envelope
            .organic
            .into_iter()
            .enumerate()
            .map(|(i, mut result)| {
                if result.position == 0 {
                    result.position = i as u32 + 1;
                }
                result
            })
            .collect();

        Ok(SearchResponse { organic, raw })
    }

    pub fn is_empty(&self) -> bool {
        self.organic.is_empty()
    }

    pub fn links(&self) -> Vec<String> {
        self.organic
            .iter()
            .map(|result| result.link.clone())
            .filter(|link| !link.is_empty())
            .collect()
    }

    pub fn top(&self, n: usize) -> Vec<OrganicResult> {
        self.organic.iter().take(n).cloned().collect()
    }
}
