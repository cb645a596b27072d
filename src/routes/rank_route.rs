use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::{
    configuration::Settings,
    domain::{sanitize_domain, LanguageCode},
    error::SerpError,
    services::{check_rankings, to_csv, RankPolicies, RankQuery, RankStrategy, SerperClient},
};

use super::{api_key, csv_response, ExportFormat, ExportQuery, LineList};

#[derive(Deserialize)]
struct RankBody {
    keywords: LineList,
    location: String,
    language: String,
    domain: String,
    #[serde(default)]
    strategy: RankStrategy,
    site: Option<String>,
}

#[post("/rank")]
async fn rank(
    req: HttpRequest,
    body: web::Json<RankBody>,
    export: web::Query<ExportQuery>,
    client: web::Data<SerperClient>,
    policies: web::Data<RankPolicies>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, SerpError> {
    let api_key = api_key(&req, &settings.provider)?;
    let body = body.into_inner();

    let query = RankQuery {
        keywords: body.keywords.into_lines(),
        location: body.location.trim().to_string(),
        language: LanguageCode::parse(&body.language)?,
        site: body
            .site
            .map(|site| sanitize_domain(&site))
            .filter(|site| !site.is_empty()),
        domain: sanitize_domain(&body.domain),
    };
    let policy = policies.get(body.strategy);

    let batch = check_rankings(&client, &api_key, &query, policy).await?;

    match export.format {
        ExportFormat::Csv => Ok(csv_response("serp_results.csv", to_csv(&batch.records)?)),
        ExportFormat::Json => Ok(HttpResponse::Ok().json(batch)),
    }
}
