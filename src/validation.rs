use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{ApiError, FieldErrors};

/// A request body with declarative field rules.
pub trait RequestShape: DeserializeOwned + Validate {
    /// Wire name reported for a struct field in validation errors.
    fn wire_name(field: &str) -> String {
        camel_case(field)
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn field_errors<T: RequestShape>(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("{} is invalid ({})", T::wire_name(&field.to_string()), e.code),
            })
            .collect();
        out.insert(T::wire_name(&field.to_string()), messages);
    }
    out
}

/// JSON body extractor that runs the shape's rules before the handler sees it.
/// Unreadable bodies are reported under the `$` key.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: RequestShape + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::field("$", rejection.body_text()))?;
        value
            .validate()
            .map_err(|e| ApiError::Validation(field_errors::<T>(&e)))?;
        Ok(ValidatedJson(value))
    }
}
