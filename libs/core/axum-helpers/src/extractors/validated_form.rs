//! Form extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{Form, FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// `application/x-www-form-urlencoded` extractor that also runs `Validate`.
///
/// - Body that does not deserialize: the form rejection status
///   (415 wrong content type, 422 bad field values)
/// - Body that deserializes but fails validation: `400 VALIDATION_ERROR`
///   with per-field details
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedForm;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct AddItem {
///     #[validate(length(min = 1, max = 10))]
///     name: String,
/// }
///
/// async fn add(ValidatedForm(form): ValidatedForm<AddItem>) -> String {
///     form.name
/// }
///
/// let app = Router::new().route("/add", post(add));
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(data) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedForm(data))
    }
}
