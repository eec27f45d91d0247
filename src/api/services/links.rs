//! Authenticated link management handlers

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::api::middleware::AuthenticatedUser;
use crate::api::types::CreateUrlRequest;
use crate::errors::TrimmrrError;
use crate::services::aggregate;
use crate::services::link_service::{CreateLinkRequest, LinkService};

/// POST /urls
pub async fn create_url(
    user: AuthenticatedUser,
    payload: web::Json<CreateUrlRequest>,
    links: web::Data<Arc<LinkService>>,
) -> Result<HttpResponse, TrimmrrError> {
    let payload = payload.into_inner();
    let link = links
        .create_link(
            CreateLinkRequest {
                long_url: payload.long_url,
                custom_code: payload.custom_url,
            },
            &user.0,
        )
        .await?;

    info!("Created '{}' for user '{}'", link.short_code, user.0);
    Ok(HttpResponse::Created().json(link))
}

/// GET /urls
pub async fn list_urls(
    user: AuthenticatedUser,
    links: web::Data<Arc<LinkService>>,
) -> Result<HttpResponse, TrimmrrError> {
    let links = links.list_by_owner(&user.0).await?;
    Ok(HttpResponse::Ok().json(links))
}

/// GET /urls/{link_id}/analytics
pub async fn get_analytics(
    user: AuthenticatedUser,
    path: web::Path<String>,
    links: web::Data<Arc<LinkService>>,
) -> Result<HttpResponse, TrimmrrError> {
    let link_id = path.into_inner();
    let link = links.find_for_owner(&link_id, &user.0).await?;
    Ok(HttpResponse::Ok().json(aggregate(&link)))
}
