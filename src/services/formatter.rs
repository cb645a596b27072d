use serde::Serialize;

use crate::{
    domain::{EmailRecord, Place, PlaceWithReviews, RankRecord, ReviewRecord},
    error::SerpError,
};

pub trait TabularRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows<T: TabularRow>(records: &[T]) -> Self {
        Table {
            headers: T::HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: records.iter().map(TabularRow::cells).collect(),
        }
    }

    pub fn to_csv(&self) -> Result<Vec<u8>, SerpError> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record(&self.headers)?;
        for row in self.rows.iter() {
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| SerpError::Csv(e.into_error().into()))
    }
}

pub fn to_csv<T: TabularRow>(records: &[T]) -> Result<Vec<u8>, SerpError> {
    Table::from_rows(records).to_csv()
}

pub fn rank_records_from_csv(data: &[u8]) -> Result<Vec<RankRecord>, SerpError> {
    let mut reader = csv::Reader::from_reader(data);
    let records = reader.deserialize().collect::<Result<Vec<RankRecord>, _>>()?;

    Ok(records)
}

fn cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_default()
}

impl TabularRow for RankRecord {
    const HEADERS: &'static [&'static str] = &["Keyword", "Position", "URL"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.keyword.clone(),
            self.position.to_string(),
            self.url_or_na().to_string(),
        ]
    }
}

impl TabularRow for EmailRecord {
    const HEADERS: &'static [&'static str] = &["Email", "URL", "Domain"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.email.clone(),
            self.source_url.clone(),
            self.source_domain.clone(),
        ]
    }
}

impl TabularRow for Place {
    const HEADERS: &'static [&'static str] = &[
        "Position",
        "Name",
        "Address",
        "Latitude",
        "Longitude",
        "Rating",
        "Rating Count",
        "Type",
        "All Types",
        "Opening Hours",
        "Thumbnail",
        "CID",
        "FID",
        "Place ID",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            cell(&self.position),
            cell(&self.title),
            cell(&self.address),
            cell(&self.latitude),
            cell(&self.longitude),
            cell(&self.rating),
            cell(&self.rating_count),
            cell(&self.kind),
            self.all_types(),
            self.opening_hours_json(),
            cell(&self.thumbnail_url),
            self.cid.clone(),
            self.fid.clone(),
            cell(&self.place_id),
        ]
    }
}

impl TabularRow for ReviewRecord {
    const HEADERS: &'static [&'static str] = &[
        "CID",
        "User Name",
        "User Link",
        "User Reviews",
        "User Photos",
        "User Thumbnail",
        "Review Snippet",
        "Rating",
        "Date",
        "ISO Date",
        "Owner Response",
        "Owner Response Date",
        "Media Count",
        "Review ID",
    ];

    fn cells(&self) -> Vec<String> {
        let review = &self.review;
        let response = review.response.clone().unwrap_or_default();

        vec![
            self.cid.clone(),
            cell(&review.user.name),
            cell(&review.user.link),
            cell(&review.user.reviews),
            cell(&review.user.photos),
            cell(&review.user.thumbnail),
            cell(&review.snippet),
            cell(&review.rating),
            cell(&review.date),
            cell(&review.iso_date),
            cell(&response.snippet),
            cell(&response.date),
            review.media.len().to_string(),
            cell(&review.id),
        ]
    }
}

impl TabularRow for PlaceWithReviews {
    const HEADERS: &'static [&'static str] = &[
        "CID",
        "Place Name",
        "Address",
        "Latitude",
        "Longitude",
        "Rating",
        "Rating Count",
        "Price Level",
        "Types",
        "Website",
        "Phone Number",
        "Opening Hours",
        "Thumbnail URL",
        "Place ID",
        "Reviews",
    ];

    fn cells(&self) -> Vec<String> {
        let place = &self.place;

        vec![
            place.cid.clone(),
            cell(&place.title),
            cell(&place.address),
            cell(&place.latitude),
            cell(&place.longitude),
            cell(&place.rating),
            cell(&place.rating_count),
            cell(&place.price_level),
            place.all_types(),
            cell(&place.website),
            cell(&place.phone_number),
            place.opening_hours_json(),
            cell(&place.thumbnail_url),
            cell(&place.place_id),
            self.reviews.clone(),
        ]
    }
}
