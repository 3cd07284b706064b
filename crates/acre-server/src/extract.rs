//! Request extractors with JSON error bodies.

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use acre_db::service::AcreService;

use crate::error::ApiError;

/// Header naming the user recorded in `last_update_by`.
pub const ACTING_USER_HEADER: &str = "x-acre-user";

/// The acting user's id, resolved from [`ACTING_USER_HEADER`].
#[derive(Debug, Clone, Copy)]
pub struct ActingUser(pub Option<i64>);

impl FromRequestParts<Arc<AcreService>> for ActingUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        service: &Arc<AcreService>,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ACTING_USER_HEADER) else {
            return Ok(Self(None));
        };
        let username = value
            .to_str()
            .map_err(|_| ApiError::BadRequest(format!("{ACTING_USER_HEADER} is not valid text")))?
            .trim();
        if username.is_empty() {
            return Ok(Self(None));
        }
        let id = service.resolve_acting_user(username).await?;
        Ok(Self(Some(id)))
    }
}

/// Query string parameters; rejects with a 400 JSON body.
#[derive(Debug)]
pub struct Params<T>(pub T);

impl<T, S> FromRequestParts<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// A numeric row id from the path; rejects with a 400 JSON body.
#[derive(Debug, Clone, Copy)]
pub struct Id(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for Id {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(id))
    }
}

/// JSON request body; rejects with a 400 JSON body.
#[derive(Debug)]
pub struct Body<T>(pub T);

impl<T, S> FromRequest<S> for Body<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `?page=N`, defaulting to the first page.
#[derive(Debug, Deserialize)]
pub struct PageParam {
    #[serde(default = "first_page")]
    pub page: u32,
}

const fn first_page() -> u32 {
    1
}
