use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("could not allocate a free code, try again")]
    AllocationExhausted,
    #[error("invalid code")]
    InvalidCode,
    #[error("not found")]
    NotFoundOrUnauthorized,
    #[error("snippet has expired")]
    Expired,
    #[error("password required")]
    PasswordRequired,
    #[error("invalid password")]
    InvalidPassword,
    #[error("empty content")]
    EmptyContent,
    #[error("content larger than {max} bytes")]
    ContentTooLarge { max: usize },
    #[error("store unavailable")]
    StoreUnavailable { source: sqlx::Error },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AllocationExhausted => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InvalidCode => StatusCode::BAD_REQUEST,
            AppError::NotFoundOrUnauthorized => StatusCode::NOT_FOUND,
            AppError::Expired => StatusCode::GONE,
            AppError::PasswordRequired => StatusCode::UNAUTHORIZED,
            AppError::InvalidPassword => StatusCode::UNAUTHORIZED,
            AppError::EmptyContent => StatusCode::BAD_REQUEST,
            AppError::ContentTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::StoreUnavailable { source } = &self {
            tracing::error!("store error: {source}");
        }
        (self.status_code(), format!("{self}")).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(source: sqlx::Error) -> Self {
        AppError::StoreUnavailable { source }
    }
}
