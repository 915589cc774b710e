pub mod handler;

use std::borrow::Cow;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use domain::{DomainError, DomainErrorKind};

/// API結果
type ApiResult<T> = Result<T, ApiError>;

/// APIエラー
#[derive(Debug)]
pub struct ApiError {
    /// HTTPステータスコード
    pub status_code: StatusCode,
    /// エラーコード
    pub code: Cow<'static, str>,
    /// エラーメッセージ
    pub messages: Vec<Cow<'static, str>>,
}

/// エラーレスポンスボディ
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseBody {
    /// エラーコード
    pub error_code: String,
    /// エラーメッセージ
    pub messages: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponseBody {
            error_code: self.code.into_owned(),
            messages: self.messages.into_iter().map(Cow::into_owned).collect(),
        };
        (self.status_code, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let status_code = match error.kind {
            DomainErrorKind::Validation => StatusCode::BAD_REQUEST,
            DomainErrorKind::NotFound => StatusCode::NOT_FOUND,
            DomainErrorKind::Repository => StatusCode::INTERNAL_SERVER_ERROR,
            DomainErrorKind::Projection => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status_code.is_server_error() {
            tracing::error!(
                kind = %error.kind,
                code = error.code,
                source = ?error.source,
                "lookup failed"
            );
        }
        Self {
            status_code,
            code: error.code.into(),
            messages: error.messages,
        }
    }
}

/// データレスポンスボディ
///
/// ルックアップの結果を`data`フィールドに格納して返す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponseBody<T> {
    pub data: T,
}

impl<T> From<T> for DataResponseBody<T> {
    fn from(data: T) -> Self {
        Self { data }
    }
}
