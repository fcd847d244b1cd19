//! Extractors whose rejections are JSON [`ApiError`]s: a body extractor that
//! validates before the handler runs, and a path extractor.

use axum::{
  Json,
  extract::{FromRequest, FromRequestParts, Request},
  http::request::Parts,
};
use cadastre_core::{Error, Validate};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Like [`Json`], but every rejection (bad syntax, missing or unknown fields,
/// wrong content type) becomes a 400 with a JSON body, and the decoded value
/// must pass [`Validate`] before the handler sees it.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
  T: DeserializeOwned + Validate,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state)
      .await
      .map_err(|rejection| Error::validation(rejection.body_text()))?;
    value.validate()?;
    Ok(Self(value))
  }
}

/// Like [`axum::extract::Path`], but a segment that fails to parse (e.g. a
/// non-numeric id) becomes a 400 with a JSON body.
#[derive(Debug)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
  T: DeserializeOwned + Send,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state)
      .await
      .map_err(|rejection| Error::validation(rejection.body_text()))?;
    Ok(Self(value))
  }
}
