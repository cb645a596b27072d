use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::Settings,
    routes::{email_route, health_check_route, maps_route, rank_route, reviews_route},
    services::{EmailExtractor, RankPolicies, SerperClient},
};

pub fn run(
    listener: TcpListener,
    settings: Settings,
    serper_client: SerperClient,
    email_extractor: EmailExtractor,
    rank_policies: RankPolicies,
) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);
    let serper_client = web::Data::new(serper_client);
    let email_extractor = web::Data::new(email_extractor);
    let rank_policies = web::Data::new(rank_policies);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(health_check_route::health_check)
            .service(rank_route::rank)
            .service(email_route::emails)
            .service(maps_route::maps)
            .service(maps_route::maps_reviews)
            .service(reviews_route::reviews)
            .app_data(settings.clone())
            .app_data(serper_client.clone())
            .app_data(email_extractor.clone())
            .app_data(rank_policies.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
