use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;

use wishlist_backend::api::{self, AppState};
use wishlist_backend::auth::{JwtVerifier, TokenVerifier};
use wishlist_backend::config::Config;
use wishlist_backend::store::{SqliteStore, WishlistStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();

    // Initialize store; a schema failure here is fatal
    let store: Arc<dyn WishlistStore> = Arc::new(
        SqliteStore::new(&config.storage_path).expect("Failed to initialize database"),
    );

    // Initialize token verifier
    let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtVerifier::new(
        config.jwt_secret.clone(),
        config.jwt_algorithm,
    ));

    log::info!("Database: {}", config.storage_path);
    log::info!("Starting wishlist server on {}", config.http_address);

    let http_address = config.http_address.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(AppState {
                store: store.clone(),
                verifier: verifier.clone(),
            }))
            .configure(api::configure_routes)
    })
    .bind(http_address)?
    .run()
    .await
}
