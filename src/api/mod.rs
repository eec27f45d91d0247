//! HTTP API layer
//!
//! Route layout:
//! - `POST /urls`, `GET /urls`, `GET /urls/{link_id}/analytics` require a
//!   bearer token and are wrapped by [`middleware::RequireAuth`].
//! - `GET /urls/{code}` is the public redirect and stays unauthenticated.
//! - `GET /health` reports storage status.
//!
//! The analytics resource is registered before the redirect catch-all so
//! `/{link_id}/analytics` never falls through to the code lookup.

pub mod jwt;
pub mod middleware;
pub mod services;
pub mod types;

use std::sync::Arc;

use actix_web::{Scope, web};

use crate::api::jwt::IdentityProvider;
use crate::api::middleware::RequireAuth;

pub fn url_routes(identity: Arc<dyn IdentityProvider>) -> Scope {
    web::scope("/urls")
        .service(
            web::resource("")
                .wrap(RequireAuth::new(identity.clone()))
                .route(web::post().to(services::links::create_url))
                .route(web::get().to(services::links::list_urls)),
        )
        .service(
            web::resource("/{link_id}/analytics")
                .wrap(RequireAuth::new(identity))
                .route(web::get().to(services::links::get_analytics)),
        )
        .service(
            web::resource("/{code}").route(web::get().to(services::redirect::handle_redirect)),
        )
}
