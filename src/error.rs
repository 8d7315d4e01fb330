use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name -> human readable messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation errors, with per-field detail
    #[error("{message}")]
    Validation { message: String, errors: FieldErrors },

    /// Search backend errors
    #[error("Search error: {0}")]
    Search(#[from] crate::search::SearchError),
}

impl AppError {
    /// Validation error for a single field
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.clone()]);
        AppError::Validation { message, errors }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Search(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Search(_) => "SEARCH_SERVICE_ERROR",
        }
    }
}

/// Convert AppError to HTTP response.
///
/// Validation failures carry their field detail; everything else is reported
/// with a generic message and the internal cause only goes to the log.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();

        let body = match self {
            AppError::Validation { message, errors } => {
                tracing::debug!(message = %message, fields = errors.len(), "Request rejected");
                json!({
                    "success": false,
                    "message": message,
                    "errors": errors,
                })
            }
            other => {
                tracing::error!(
                    error_code = %error_code,
                    status_code = status.as_u16(),
                    error = %other,
                    "Request error"
                );
                json!({
                    "success": false,
                    "message": "搜索服务暂时不可用，请稍后重试",
                    "error_code": error_code,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors = FieldErrors::new();
        for (field, field_errors) in err.field_errors() {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            errors.insert(field.to_string(), messages);
        }

        let message = errors
            .values()
            .flatten()
            .next()
            .cloned()
            .unwrap_or_else(|| "请求参数无效".to_string());

        AppError::Validation { message, errors }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchError;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::invalid_field("query", "required").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Search(SearchError::CatalogUnavailable("order".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::invalid_field("limit", "too large").error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::Search(SearchError::Internal("boom".to_string())).error_code(),
            "SEARCH_SERVICE_ERROR"
        );
    }

    #[test]
    fn test_invalid_field_carries_detail() {
        match AppError::invalid_field("types", "不支持的类型: report") {
            AppError::Validation { message, errors } => {
                assert_eq!(message, "不支持的类型: report");
                assert_eq!(errors["types"], vec!["不支持的类型: report".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
