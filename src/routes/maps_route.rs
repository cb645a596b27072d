use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    configuration::Settings,
    error::SerpError,
    services::{maps_with_reviews, search_places, to_csv, ReviewPolicy, SerperClient},
};

use super::{api_key, csv_response, ExportFormat, ExportQuery};

#[derive(Deserialize)]
struct MapsBody {
    q: String,
    gl: Option<String>,
    hl: Option<String>,
}

#[post("/maps")]
async fn maps(
    req: HttpRequest,
    body: web::Json<MapsBody>,
    export: web::Query<ExportQuery>,
    client: web::Data<SerperClient>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, SerpError> {
    let api_key = api_key(&req, &settings.provider)?;

    let result = search_places(
        &client,
        &api_key,
        &body.q,
        body.gl.as_deref(),
        body.hl.as_deref(),
    )
    .await?;

    match export.format {
        ExportFormat::Csv => Ok(csv_response("maps_places.csv", to_csv(&result.places)?)),
        ExportFormat::Json => Ok(HttpResponse::Ok().json(result)),
    }
}

#[derive(Deserialize)]
struct MapsWithReviewsBody {
    q: String,
    #[serde(default = "super::reviews_route::default_locale")]
    gl: String,
    #[serde(default = "super::reviews_route::default_locale")]
    hl: String,
}

#[post("/maps/reviews")]
async fn maps_reviews(
    req: HttpRequest,
    body: web::Json<MapsWithReviewsBody>,
    export: web::Query<ExportQuery>,
    client: web::Data<SerperClient>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, SerpError> {
    let api_key = api_key(&req, &settings.provider)?;
    let policy = ReviewPolicy::from(&settings.places);

    let places =
        maps_with_reviews(&client, &api_key, &body.q, &body.gl, &body.hl, &policy).await?;

    match export.format {
        ExportFormat::Csv => Ok(csv_response(
            "google_maps_with_reviews.csv",
            to_csv(&places)?,
        )),
        ExportFormat::Json => Ok(HttpResponse::Ok().json(json!({ "places": places }))),
    }
}
