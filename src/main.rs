use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;

use trimmrr::api;
use trimmrr::api::jwt::{IdentityProvider, JwtIdentityService};
use trimmrr::config::init_config;
use trimmrr::services::{ClickRecorder, LinkService, MemoryAssetStore, RedirectService};
use trimmrr::storage::{LinkStore, StoreFactory};
use trimmrr::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = init_config();
    let _log_guard = init_logging(config);

    let store: Arc<dyn LinkStore> = StoreFactory::create(config).await?;
    info!("Storage backend: {}", store.backend_name());

    let assets = Arc::new(MemoryAssetStore::new());
    let identity: Arc<dyn IdentityProvider> = Arc::new(JwtIdentityService::new(&config.jwt_secret));

    let links = Arc::new(LinkService::new(
        store.clone(),
        assets.clone(),
        config.base_domain.clone(),
    ));
    let recorder = Arc::new(ClickRecorder::new(store.clone()));
    let resolver = Arc::new(RedirectService::new(store.clone(), recorder));

    let bind_addr = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting trimmrr on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(links.clone()))
            .app_data(web::Data::new(resolver.clone()))
            .route("/health", web::get().to(api::services::health::health))
            .service(api::url_routes(identity.clone()))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
