//! Authentication middleware
//!
//! Wraps the authenticated routes, verifies the `Authorization: Bearer`
//! token through the injected identity provider and stores the resulting
//! user id in the request extensions for handlers to extract.

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, trace};

use crate::api::jwt::IdentityProvider;
use crate::errors::ErrorBody;

/// The authenticated user id, inserted by [`RequireAuth`].
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub String);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("missing authenticated user")
                }),
        )
    }
}

#[derive(Clone)]
pub struct RequireAuth {
    identity: Arc<dyn IdentityProvider>,
}

impl RequireAuth {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
            identity: self.identity.clone(),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
    identity: Arc<dyn IdentityProvider>,
}

impl<S, B> RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    }

    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Authentication failed - invalid or missing token");
        req.into_response(
            HttpResponse::Unauthorized()
                .json(ErrorBody {
                    message: "Unauthorized: Invalid or missing token".to_string(),
                })
                .map_into_right_body(),
        )
    }
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let identity = self.identity.clone();

        Box::pin(async move {
            let Some(token) = Self::extract_bearer_token(&req) else {
                return Ok(Self::handle_unauthorized(req));
            };

            match identity.verify_token(&token) {
                Ok(user_id) => {
                    trace!("Authenticated user '{}'", user_id);
                    req.extensions_mut().insert(AuthenticatedUser(user_id));
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
                Err(e) => {
                    info!("Token verification failed: {}", e);
                    Ok(Self::handle_unauthorized(req))
                }
            }
        })
    }
}
