use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated caller's claims from request extensions.
///
/// This extractor is intended to be used on routes protected by `AuthMiddleware`,
/// which is responsible for validating the JWT and inserting the decoded claims
/// into request extensions.
///
/// On routes that allow anonymous access, use `Option<AuthenticatedUser>`:
/// extraction failure then resolves to `None` instead of rejecting the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> i32 {
        self.0.sub
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError will be converted into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims))),
            None => {
                // Reached when AuthMiddleware let the request through without
                // inserting claims, i.e. an anonymous caller on a public path.
                let err = AppError::Unauthorized("Authentication required".to_string());
                ready(Err(err.into())) // Convert AppError to ActixError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    fn sample_claims() -> Claims {
        Claims {
            sub: 123,
            email: "extract@example.com".to_string(),
            exp: 4102444800, // 2100-01-01, far enough out for any test run
        }
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_success() {
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(sample_claims()); // HttpMessage trait brings .extensions_mut()

        let mut payload = Payload::None;
        let extracted = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(extracted.is_ok());

        let user = extracted.unwrap();
        assert_eq!(user.user_id(), 123);
        assert_eq!(user.0.email, "extract@example.com");
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();
        // No claims inserted into extensions

        let mut payload = Payload::None;
        let extracted_result = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(extracted_result.is_err());

        let err = extracted_result.unwrap_err();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_optional_extraction_resolves_to_none() {
        let req = test::TestRequest::default().to_http_request();

        let mut payload = Payload::None;
        let maybe_user = Option::<AuthenticatedUser>::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert!(maybe_user.is_none());
    }
}
