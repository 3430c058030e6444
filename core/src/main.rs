mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;
use upstream::UpstreamClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init upstream admin API client
    let upstream_client =
        UpstreamClient::new(config.upstream_api_url.clone(), config.upstream_timeout());

    HttpServer::new(move || {
        let upstream_client = upstream_client.clone();
        App::new()
            .app_data(web::Data::new(upstream_client))
            .app_data(web::Data::new(config_data.clone()))
            .wrap(logger::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api").service(
                    web::scope("/dash")
                        .wrap(api_dash::middleware())
                        .service(api_dash::mount_dash()),
                ),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
