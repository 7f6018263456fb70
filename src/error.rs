use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use foodgram_shared::Error;
use serde_json::{Map, Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

/// JSON error responses for the REST API.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] Error),

    #[error("{0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Domain(Error::Unknown(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        Self::Domain(Error::NotFound)
    }
}

impl From<axum_extra::extract::QueryRejection> for AppError {
    fn from(rejection: axum_extra::extract::QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// `{"field": ["message", ..]}`, nested structs and lists keep their shape.
pub fn validation_body(errors: &ValidationErrors) -> Value {
    let mut body = Map::new();

    for (field, kind) in errors.errors() {
        let value = match kind {
            ValidationErrorsKind::Field(errors) => Value::Array(
                errors
                    .iter()
                    .map(|e| {
                        Value::String(
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("Invalid value ({}).", e.code)),
                        )
                    })
                    .collect(),
            ),
            ValidationErrorsKind::Struct(errors) => validation_body(errors),
            ValidationErrorsKind::List(items) => {
                let mut list = Map::new();
                for (index, errors) in items {
                    list.insert(index.to_string(), validation_body(errors));
                }
                Value::Object(list)
            }
        };
        body.insert(field.to_string(), value);
    }

    Value::Object(body)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "detail": msg })),
            AppError::Domain(Error::Validate(errors)) => {
                (StatusCode::BAD_REQUEST, validation_body(&errors))
            }
            AppError::Domain(Error::Invalid(msg)) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": msg }))
            }
            AppError::Domain(Error::NotFound) => {
                (StatusCode::NOT_FOUND, json!({ "detail": "Not found." }))
            }
            AppError::Domain(Error::InvalidPage) => {
                (StatusCode::NOT_FOUND, json!({ "detail": "Invalid page." }))
            }
            AppError::Domain(Error::Forbidden) => (
                StatusCode::FORBIDDEN,
                json!({ "detail": "You do not have permission to perform this action." }),
            ),
            AppError::Domain(Error::Unauthorized) => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": "Authentication credentials were not provided." }),
            ),
            AppError::Domain(Error::Unknown(e)) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "An unexpected error occurred. Please try again later." }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Item {
        #[validate(range(min = 1, message = "Too small."))]
        amount: i64,
    }

    #[derive(Validate)]
    struct Input {
        #[validate(length(min = 1))]
        name: String,
        #[validate(nested)]
        items: Vec<Item>,
    }

    #[test]
    fn test_validation_body_shape() {
        let errors = Input {
            name: String::new(),
            items: vec![Item { amount: 2 }, Item { amount: 0 }],
        }
        .validate()
        .unwrap_err();

        let body = validation_body(&errors);

        assert_eq!(body["name"][0], "Invalid value (length).");
        assert_eq!(body["items"]["1"]["amount"][0], "Too small.");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::from(Error::Invalid("x".into())), StatusCode::BAD_REQUEST),
            (AppError::from(Error::NotFound), StatusCode::NOT_FOUND),
            (AppError::from(Error::InvalidPage), StatusCode::NOT_FOUND),
            (AppError::from(Error::Forbidden), StatusCode::FORBIDDEN),
            (AppError::from(Error::Unauthorized), StatusCode::UNAUTHORIZED),
            (
                AppError::from(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
