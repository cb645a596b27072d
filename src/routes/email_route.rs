use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    configuration::Settings,
    domain::{EmailSearch, EmailSearchMode, LanguageCode, PageSize},
    error::SerpError,
    services::{find_emails, to_csv, EmailExtractor, EmailQuery, SerperClient, DEFAULT_NUM_RESULTS},
};

use super::{api_key, csv_response, ExportFormat, ExportQuery};

#[derive(Deserialize)]
struct EmailBody {
    mode: EmailSearchMode,
    value: String,
    location: String,
    language: String,
    num_results: Option<usize>,
}

#[post("/emails")]
async fn emails(
    req: HttpRequest,
    body: web::Json<EmailBody>,
    export: web::Query<ExportQuery>,
    client: web::Data<SerperClient>,
    extractor: web::Data<EmailExtractor>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, SerpError> {
    let api_key = api_key(&req, &settings.provider)?;
    let body = body.into_inner();

    let query = EmailQuery {
        search: EmailSearch::new(body.mode, body.value),
        location: body.location.trim().to_string(),
        language: LanguageCode::parse(&body.language)?,
        num_results: PageSize::covering(body.num_results.unwrap_or(DEFAULT_NUM_RESULTS)),
    };

    let records = find_emails(&client, &extractor, &api_key, &query).await?;
    log::info!("Found {} unique emails", records.len());

    match export.format {
        ExportFormat::Csv => Ok(csv_response("emails.csv", to_csv(&records)?)),
        ExportFormat::Json => Ok(HttpResponse::Ok().json(json!({ "records": records }))),
    }
}
