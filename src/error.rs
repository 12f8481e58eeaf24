//! Error handling

use axum::response::{IntoResponse, Redirect};
use tracing::info;

/// definitions for the picstory application.
#[derive(Debug)]
pub enum PicstoryError {
    /// When you didn't do the right thing
    BadRequest,
    /// Form posted without an image, the pipeline does not run
    MissingImage,
    /// When a requested resource is not found
    NotFound(String),
    /// The inference endpoint rejected or failed the request
    Upstream(u16, String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl From<std::io::Error> for PicstoryError {
    fn from(err: std::io::Error) -> Self {
        PicstoryError::InternalServerError(err.to_string())
    }
}

impl From<axum::http::Error> for PicstoryError {
    fn from(err: axum::http::Error) -> Self {
        PicstoryError::InternalServerError(err.to_string())
    }
}

impl From<reqwest::Error> for PicstoryError {
    fn from(err: reqwest::Error) -> Self {
        PicstoryError::Upstream(
            err.status().map(|status| status.as_u16()).unwrap_or(502),
            err.to_string(),
        )
    }
}

impl IntoResponse for PicstoryError {
    fn into_response(self) -> axum::response::Response {
        match self {
            PicstoryError::MissingImage => Redirect::to("/").into_response(),
            PicstoryError::BadRequest => {
                info!("Bad request received");
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Bad Request"));
                *response.status_mut() = axum::http::StatusCode::BAD_REQUEST;
                response
            }
            PicstoryError::NotFound(url) => {
                tracing::error!("404 {url}");
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Not Found"));
                *response.status_mut() = axum::http::StatusCode::NOT_FOUND;
                response
            }
            PicstoryError::Upstream(status, message) => {
                tracing::error!("Inference endpoint error {}: {}", status, message);
                let mut response = axum::response::Response::new(axum::body::Body::from(
                    "Story backend error",
                ));
                *response.status_mut() = axum::http::StatusCode::BAD_GATEWAY;
                response
            }
            PicstoryError::InternalServerError(message) => {
                tracing::error!("Internal server error: {}", message);
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Internal server error"));
                *response.status_mut() = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}
