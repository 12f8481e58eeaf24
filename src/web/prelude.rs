pub(crate) use crate::error::PicstoryError;
pub(crate) use crate::groq::GroqClient;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use axum::extract::{Multipart, Path, State};
pub(crate) use axum::http::{StatusCode, header::CONTENT_TYPE};
pub(crate) use axum::response::IntoResponse;
pub(crate) use std::sync::Arc;
pub(crate) use tracing::{error, info};
