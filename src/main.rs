use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use pricehunter::api_log::ApiLogger;
use pricehunter::auth::AuthMiddleware;
use pricehunter::config::Config;
use pricehunter::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Uploads land on local disk; make sure the directory is there before
    // the first request needs it.
    if let Err(e) = std::fs::create_dir_all(&config.upload_dir) {
        log::warn!(
            "Could not create upload directory {}: {}",
            config.upload_dir,
            e
        );
    }

    println!("Starting PriceHunter server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    // Wrapped inside-out: the logger observes every request,
                    // including the ones authentication turns away.
                    .wrap(AuthMiddleware)
                    .wrap(ApiLogger)
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
