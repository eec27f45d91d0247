//! Public redirect handler
//!
//! This endpoint is deliberately unauthenticated; it is the link's public
//! face. Successful resolutions answer 302 so destination edits take effect
//! without client-side caching.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{error, trace};

use crate::errors::{ErrorBody, TrimmrrError};
use crate::services::click_recorder::ClickContext;
use crate::services::redirect::RedirectService;
use crate::utils::is_valid_short_code;

pub async fn handle_redirect(
    req: HttpRequest,
    path: web::Path<String>,
    resolver: web::Data<Arc<RedirectService>>,
) -> impl Responder {
    let code = path.into_inner();

    // Codes outside the URL-safe charset cannot exist; skip the lookup
    if !is_valid_short_code(&code) {
        trace!("Invalid short code rejected: {}", code);
        return not_found_response();
    }

    let ctx = ClickContext::from_request(&req);

    match resolver.resolve(&code, &ctx).await {
        Ok(target) => HttpResponse::Found()
            .insert_header(("Location", target))
            .finish(),
        Err(TrimmrrError::NotFound(_)) => not_found_response(),
        Err(TrimmrrError::Validation(msg)) => {
            trace!("Malformed destination for '{}': {}", code, msg);
            HttpResponse::BadRequest().json(ErrorBody {
                message: "Invalid URL format".to_string(),
            })
        }
        Err(e) => {
            error!("Redirect failed for '{}' ({}): {}", code, e.code(), e);
            HttpResponse::InternalServerError().json(ErrorBody {
                message: "An error occurred while processing your request".to_string(),
            })
        }
    }
}

#[inline]
fn not_found_response() -> HttpResponse {
    HttpResponse::build(StatusCode::NOT_FOUND)
        .insert_header(("Content-Type", "text/html; charset=utf-8"))
        .insert_header(("Cache-Control", "public, max-age=60"))
        .body("Sorry, this short URL does not exist.")
}
