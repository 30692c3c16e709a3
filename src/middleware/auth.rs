// SPDX-License-Identifier: MIT

//! Bearer-token authentication middleware.
//!
//! Every protected request carries a Firebase ID token in the
//! Authorization header. The middleware verifies it and attaches the
//! resolved identity to the request; handlers never see raw tokens.

use crate::error::AppError;
use crate::services::firebase_auth::{AuthError, VerifiedUser};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires a valid Firebase ID token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(request.headers().get(header::AUTHORIZATION))?;

    let identity = state
        .firebase_auth
        .verify_id_token(&token)
        .await
        .map_err(|e| match e {
            AuthError::Unauthorized(reason) => {
                tracing::debug!(reason, "Rejected bearer token");
                AppError::InvalidToken
            }
            AuthError::Transient(msg) => AppError::ServiceUnavailable(msg),
        })?;

    request.extensions_mut().insert::<VerifiedUser>(identity);

    Ok(next.run(request).await)
}

fn extract_bearer_token(
    auth_header: Option<&axum::http::HeaderValue>,
) -> Result<String, AppError> {
    let value = auth_header
        .ok_or(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Unauthorized)?;

    let token = value.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token() {
        let header = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(
            extract_bearer_token(Some(&header)).unwrap(),
            "abc.def.ghi"
        );
    }

    #[test]
    fn test_extract_bearer_token_errors() {
        assert!(matches!(
            extract_bearer_token(None),
            Err(AppError::Unauthorized)
        ));

        let basic = HeaderValue::from_static("Basic abc");
        assert!(matches!(
            extract_bearer_token(Some(&basic)),
            Err(AppError::Unauthorized)
        ));

        let empty = HeaderValue::from_static("Bearer ");
        assert!(matches!(
            extract_bearer_token(Some(&empty)),
            Err(AppError::Unauthorized)
        ));
    }
}
