use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::common::{AppError, Role, UserId};
use crate::domains::auth::{Claims, JwtService};
use crate::domains::users::models::User;
use crate::server::app::AppState;

/// The caller's resolved identity: verified token plus a live user row.
///
/// Resolved once per request by the `FromRequestParts` impl below; handlers
/// take `Identity` as an argument instead of poking at raw claims.
#[derive(Clone, Debug)]
pub struct Identity {
    pub user_id: UserId,
    pub contact: String,
    pub role: Role,
}

/// JWT authentication middleware
///
/// Extracts the bearer token from the Authorization header, verifies it, and
/// adds the claims to request extensions. Requests without a valid token
/// continue without claims (public access); protected handlers reject them
/// through the `Identity` extractor.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(claims) = extract_claims(&request, &jwt_service) {
        debug!(user_id = %claims.user_id, "Authenticated request");
        request.extensions_mut().insert(claims);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify the JWT from a request
fn extract_claims(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<Claims> {
    // Get Authorization header
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    jwt_service.verify_token(token).ok()
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Resolve the session: a valid token is required, and the user it
    /// references must still exist. The role comes from the live row, not
    /// the token, so a role change takes effect on the next request.
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or(AppError::Unauthenticated)?;

        let state = AppState::from_ref(state);
        let user = User::find_by_id(claims.user_id, &state.deps.db_pool)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        Ok(Identity {
            user_id: user.id,
            contact: user.contact,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_header(value: Option<String>) -> axum::http::Request<axum::body::Body> {
        let mut builder = axum::http::Request::builder();
        if let Some(v) = value {
            builder = builder.header("authorization", v);
        }
        builder.body(axum::body::Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let user_id = UserId::from_i64(1);
        let token = jwt_service
            .create_token(user_id, "+1234567890".to_string(), Role::Admin)
            .unwrap();

        let request = request_with_header(Some(format!("Bearer {}", token)));

        let claims = extract_claims(&request, &jwt_service);
        assert!(claims.is_some());
        assert_eq!(claims.unwrap().user_id, user_id);
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let user_id = UserId::from_i64(2);
        let token = jwt_service
            .create_token(user_id, "+1234567890".to_string(), Role::Customer)
            .unwrap();

        let request = request_with_header(Some(token));

        let claims = extract_claims(&request, &jwt_service);
        assert!(claims.is_some());
        assert_eq!(claims.unwrap().user_id, user_id);
    }

    #[test]
    fn test_no_auth_header() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = request_with_header(None);

        assert!(extract_claims(&request, &jwt_service).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = request_with_header(Some("Bearer invalid_token".to_string()));

        assert!(extract_claims(&request, &jwt_service).is_none());
    }
}
