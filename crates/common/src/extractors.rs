//! Custom axum extractors

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::Error;

/// JSON body extractor that runs `validator` rules after deserializing.
///
/// Malformed JSON and failed validation both reject with 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[derive(Debug)]
pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Invalid(Error),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            ValidatedJsonRejection::Json(e) => Error::Validation(e.body_text()).into_response(),
            ValidatedJsonRejection::Invalid(e) => e.into_response(),
        }
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;

        value.validate().map_err(|e| {
            ValidatedJsonRejection::Invalid(Error::Validation(format!(
                "Validation failed: {}",
                e
            )))
        })?;

        Ok(ValidatedJson(value))
    }
}
