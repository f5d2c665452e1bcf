//! Axum extractor for submitted forms
//!
//! This module provides the `FormBody<T>` extractor that accepts either a JSON
//! document or an `application/x-www-form-urlencoded` body and deserializes it
//! into a raw form struct. Cleaning and field validation happen later, in the
//! reservation service, so that not-found checks run first.

use crate::core::error::{RentalError, ValidationError};
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

/// Raw submitted form, from JSON or URL-encoded bodies
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn register_pickup(
///     FormBody(form): FormBody<PickupForm>,
/// ) -> RentalResult<Json<MutationOutcome>> {
///     // form fields are still unvalidated strings
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormBody<T>(pub T);

impl<T> FormBody<T> {
    /// Get the inner form
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn is_urlencoded(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

impl<S, T> FromRequest<S> for FormBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = RentalError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = |message: String| {
            RentalError::Validation(ValidationError::InvalidBody { message })
        };

        if is_urlencoded(&req) {
            let Form(form) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| invalid(e.body_text()))?;
            return Ok(FormBody(form));
        }

        // An empty body is an empty form: every field is reported as missing
        let has_content_type = req.headers().contains_key(CONTENT_TYPE);
        if !has_content_type {
            return Ok(FormBody(T::default()));
        }

        let Json(form) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| invalid(e.body_text()))?;
        Ok(FormBody(form))
    }
}
