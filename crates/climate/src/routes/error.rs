use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dates, db, stats::InsufficientData};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] db::Error),
}

/// Body of every non-2xx JSON response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl From<dates::Error> for Error {
    fn from(e: dates::Error) -> Self {
        Error::BadRequest(e.to_string())
    }
}

impl From<InsufficientData> for Error {
    fn from(e: InsufficientData) -> Self {
        Error::BadRequest(e.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Error::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Error::Storage(e) => {
                error!("error reading climate data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("internal error reading climate data"),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub async fn not_found() -> Error {
    Error::NotFound(String::from("no route matches the requested path"))
}
