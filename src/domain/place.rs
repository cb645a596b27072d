use serde::{Deserialize, Serialize};

pub const NO_REVIEWS: &str = "No reviews found.";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub position: Option<u32>,
    pub title: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    pub price_level: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub opening_hours: Option<serde_json::Value>,
    pub thumbnail_url: Option<String>,
    // CIDs are sometimes sent as numbers, often above i64::MAX
    #[serde(default, deserialize_with = "id_string::deserialize")]
    pub cid: String,
    #[serde(default, deserialize_with = "id_string::deserialize")]
    pub fid: String,
    pub place_id: Option<String>,
}

impl Place {
    pub fn opening_hours_json(&self) -> String {
        self.opening_hours
            .as_ref()
            .filter(|hours| !hours.is_null())
            .map(|hours| hours.to_string())
            .unwrap_or_else(|| "{}".to_string())
    }

    pub fn all_types(&self) -> String {
        self.types.join(", ")
    }
}

mod id_string {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Option::<RawId>::deserialize(deserializer)? {
            Some(RawId::Text(id)) => Ok(id),
            Some(RawId::Number(id)) => Ok(id.to_string()),
            None => Ok(String::new()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesResponse {
    #[serde(default)]
    pub places: Vec<Place>,
    /// Map centre, e.g. `@-7.0051453,110.4381254,14z`.
    pub ll: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewUser {
    pub name: Option<String>,
    pub link: Option<String>,
    pub reviews: Option<u64>,
    pub photos: Option<u64>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OwnerResponse {
    pub snippet: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub user: ReviewUser,
    pub snippet: Option<String>,
    pub rating: Option<f64>,
    pub date: Option<String>,
    pub iso_date: Option<String>,
    pub response: Option<OwnerResponse>,
    #[serde(default)]
    pub media: Vec<serde_json::Value>,
    pub id: Option<String>,
}

impl Review {
    pub fn summary(&self) -> String {
        format!(
            "⭐ {} - {}",
            self.rating.map(format_number).unwrap_or_default(),
            self.snippet.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    pub cid: String,
    #[serde(flatten)]
    pub review: Review,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceWithReviews {
    #[serde(flatten)]
    pub place: Place,
    pub reviews: String,
}

impl PlaceWithReviews {
    pub fn new(place: Place, reviews: Option<&[Review]>) -> Self {
        let reviews = match reviews {
            Some(reviews) => reviews
                .iter()
                .map(Review::summary)
                .collect::<Vec<String>>()
                .join("\n\n"),
            None => NO_REVIEWS.to_string(),
        };

        PlaceWithReviews { place, reviews }
    }
}

/// Renders `4.0` as `4` and `4.5` as `4.5`.
pub fn format_number(value: f64) -> String {
    match value.fract() == 0.0 && value.abs() < 1e15 {
        true => format!("{}", value as i64),
        false => value.to_string(),
    }
}
