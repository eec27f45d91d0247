//! Health check handler

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;

use crate::api::types::{HealthResponse, HealthStorage};
use crate::storage::LinkStore;

pub async fn health(store: web::Data<Arc<dyn LinkStore>>) -> impl Responder {
    let (status, links_count) = match store.count().await {
        Ok(count) => ("ok", Some(count)),
        Err(_) => ("degraded", None),
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        storage: HealthStorage {
            backend: store.backend_name().to_string(),
            links_count,
        },
    })
}
