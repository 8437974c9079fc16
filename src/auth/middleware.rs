use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::verify_token;

/// Paths under `/api` that are reachable without a token.
///
/// Search and upload stay open so visitors can try the product before
/// registering; a valid token on these paths is still decoded so handlers
/// can attribute the request to the caller.
fn is_public(path: &str) -> bool {
    const PUBLIC_PREFIXES: &[&str] = &[
        "/api/auth/login",
        "/api/auth/register",
        "/api/search/image",
        "/api/upload/image",
        "/api/debug",
    ];
    PUBLIC_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        if is_public(req.path()) {
            // Anonymous access is fine here; an invalid or missing token just
            // means the request runs unattributed.
            if let Some(claims) = bearer.and_then(|token| verify_token(token).ok()) {
                req.extensions_mut().insert(claims);
            }
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        match bearer {
            Some(token) => {
                match verify_token(token) {
                    // verify_token returns Result<Claims, AppError>
                    Ok(claims) => {
                        req.extensions_mut().insert(claims);
                        let fut = self.service.call(req);
                        Box::pin(fut)
                    }
                    Err(app_err) => {
                        // app_err is AppError
                        Box::pin(async move { Err(app_err.into()) }) // Convert AppError to actix_web::Error
                    }
                }
            }
            None => {
                let app_err = crate::error::AppError::Unauthorized("Missing token".into());
                Box::pin(async move { Err(app_err.into()) }) // Convert AppError to actix_web::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::is_public;

    #[test]
    fn test_public_path_matching() {
        assert!(is_public("/api/auth/login"));
        assert!(is_public("/api/auth/register"));
        assert!(is_public("/api/search/image"));
        assert!(is_public("/api/upload/image"));
        assert!(is_public("/api/debug"));

        assert!(!is_public("/api/history"));
        assert!(!is_public("/api/history/9b2e7a50-0000-0000-0000-000000000000"));
        assert!(!is_public("/api/admin/stats"));
        assert!(!is_public("/api/auth"));
    }
}
