use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use vitrine_core::CatalogError;

pub type AppResult<T> = Result<T, AppError>;

/// Request-level error: an HTTP status plus the JSON:API error object that
/// describes it. `source_parameter` points at the offending request
/// parameter (auth failures use it for the email/password hint).
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub title: String,
    pub detail: String,
    pub source_parameter: Option<String>,
}

impl AppError {
    pub fn new(
        status: StatusCode,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status,
            title: title.into(),
            detail: detail.into(),
            source_parameter: None,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            detail,
        )
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid Parameter", detail)
    }

    pub fn unauthorized(
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, title, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "Conflict", detail)
    }

    pub fn bad_gateway(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "Upstream Failure", detail)
    }

    pub fn with_source_parameter(
        mut self,
        parameter: impl Into<String>,
    ) -> Self {
        self.source_parameter = Some(parameter.into());
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.detail)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "title": self.title,
            "detail": self.detail,
            "status": self.status.as_u16(),
        });
        if let Some(parameter) = self.source_parameter {
            error["source"] = json!({ "parameter": parameter });
        }

        (self.status, Json(json!({ "errors": [error] }))).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(msg) => Self::not_found(msg),
            CatalogError::Validation(msg) => Self::bad_request(msg),
            CatalogError::Conflict(msg) => Self::conflict(msg),
            CatalogError::Upstream(msg) => Self::bad_gateway(msg),
            CatalogError::Database(e) => {
                Self::internal(format!("database error: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_statuses() {
        let not_found: AppError =
            CatalogError::NotFound("no item".into()).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let validation: AppError =
            CatalogError::Validation("bad facet".into()).into();
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);

        let conflict: AppError =
            CatalogError::Conflict("duplicate".into()).into();
        assert_eq!(conflict.status, StatusCode::CONFLICT);
    }

    #[test]
    fn source_parameter_is_attached() {
        let err = AppError::unauthorized("Account Not Found", "no account")
            .with_source_parameter("email");
        assert_eq!(err.source_parameter.as_deref(), Some("email"));
    }
}
