//! # Custom Axum Extractors

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::debug;

use crate::models::CallerIdentity;
use crate::web::errors::ApiError;
use crate::web::state::AppState;

/// Caller identity taken from the configured header
/// (`web.caller_header`), `anonymous` when the header is absent.
#[derive(Debug, Clone)]
pub struct Caller(pub CallerIdentity);

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(state.config.caller_header.as_str()) else {
            return Ok(Self(CallerIdentity::anonymous()));
        };

        let identity = value
            .to_str()
            .map_err(|_| ApiError::bad_request("Caller header is not valid UTF-8"))?
            .trim();
        if identity.is_empty() {
            return Ok(Self(CallerIdentity::anonymous()));
        }

        debug!(caller = %identity, "Extracted caller identity");
        Ok(Self(CallerIdentity::new(identity)))
    }
}
