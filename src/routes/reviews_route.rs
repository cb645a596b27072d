use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::{
    configuration::Settings,
    error::SerpError,
    services::{bulk_reviews, to_csv, ReviewPolicy, SerperClient},
};

use super::{api_key, csv_response, ExportFormat, ExportQuery, LineList};

pub(super) fn default_locale() -> String {
    "id".to_string()
}

#[derive(Deserialize)]
struct ReviewsBody {
    cids: LineList,
    #[serde(default = "default_locale")]
    gl: String,
    #[serde(default = "default_locale")]
    hl: String,
}

#[post("/reviews")]
async fn reviews(
    req: HttpRequest,
    body: web::Json<ReviewsBody>,
    export: web::Query<ExportQuery>,
    client: web::Data<SerperClient>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, SerpError> {
    let api_key = api_key(&req, &settings.provider)?;
    let body = body.into_inner();
    let policy = ReviewPolicy::from(&settings.places);

    let cids = body.cids.into_lines();
    log::info!("Fetching reviews for {} CIDs", cids.len());
    let batch = bulk_reviews(&client, &api_key, &cids, &body.gl, &body.hl, &policy).await?;

    match export.format {
        ExportFormat::Csv => Ok(csv_response(
            "bulk_google_reviews.csv",
            to_csv(&batch.records)?,
        )),
        ExportFormat::Json => Ok(HttpResponse::Ok().json(batch)),
    }
}
