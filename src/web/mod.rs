//! HTTP routes and the story pipeline handler.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_DISPOSITION;
use axum::response::Response;
use rand::Rng;
use rand::distr::Alphanumeric;
use std::io::ErrorKind;
use std::path::PathBuf;

mod prelude;
mod views;

use prelude::*;
use views::{HomeTemplate, ResultTemplate};

use crate::cli::CliOptions;
use crate::constants::{
    DOWNLOAD_FILENAME, MAX_STORY_CHARACTERS, MAX_UPLOAD_BYTES, MIN_STORY_CHARACTERS,
    STORY_TOKEN_LENGTH,
};
use crate::encode::{encode_image, image_data_uri};
use crate::prompt::{Genre, StoryLength, StoryRequest};

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    api: GroqClient,
    output_dir: Arc<PathBuf>,
}

impl AppState {
    fn new(api: GroqClient, output_dir: PathBuf) -> Self {
        Self {
            api,
            output_dir: Arc::new(output_dir),
        }
    }

    fn story_path(&self, token: &str) -> PathBuf {
        self.output_dir.join(format!("{token}.txt"))
    }
}

fn story_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STORY_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

fn valid_story_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric())
}

async fn root_handler() -> HomeTemplate {
    HomeTemplate::new()
}

/// Pulls the four form fields out of the multipart submission. Unknown
/// fields are ignored.
async fn collect_story_request(
    multipart: &mut Multipart,
) -> Result<StoryRequest, PicstoryError> {
    let mut image: Option<Vec<u8>> = None;
    let mut genre: Option<Genre> = None;
    let mut length: Option<StoryLength> = None;
    let mut target_characters: Option<u32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| PicstoryError::InternalServerError(err.to_string()))?
    {
        let field_name = field.name().unwrap_or_default();
        match field_name {
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| PicstoryError::InternalServerError(err.to_string()))?;
                if !bytes.is_empty() {
                    image = Some(bytes.to_vec());
                }
            }
            "genre" => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| PicstoryError::InternalServerError(err.to_string()))?;
                genre = Genre::parse(&value);
            }
            "length" => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| PicstoryError::InternalServerError(err.to_string()))?;
                length = StoryLength::parse(&value);
            }
            "characters" => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| PicstoryError::InternalServerError(err.to_string()))?;
                let parsed = value.parse::<u32>().map_err(|_| PicstoryError::BadRequest)?;
                if !(MIN_STORY_CHARACTERS..=MAX_STORY_CHARACTERS).contains(&parsed) {
                    return Err(PicstoryError::BadRequest);
                }
                target_characters = Some(parsed);
            }
            _ => {}
        }
    }

    let image = image.ok_or(PicstoryError::MissingImage)?;
    let target_characters = target_characters.ok_or(PicstoryError::BadRequest)?;

    Ok(StoryRequest {
        image,
        genre,
        length,
        target_characters,
    })
}

/// Runs the two-stage pipeline: describe the image, then write the story
/// from that description. The second call never starts if the first fails.
async fn generate_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<ResultTemplate, PicstoryError> {
    let request = collect_story_request(&mut multipart).await?;

    let base64_image = encode_image(&request.image);
    let description = state.api.describe_image(&base64_image).await?;
    info!(
        "Image described ({} bytes in, {} chars out)",
        request.image.len(),
        description.len()
    );

    let story_prompt = request.story_prompt(&description);
    let story = state.api.generate_story(&story_prompt).await?;

    let token = story_token();
    tokio::fs::write(state.story_path(&token), &story).await?;
    info!("Story {} written ({} chars)", token, story.len());

    Ok(ResultTemplate {
        genre_label: request.genre.map(Genre::label).unwrap_or("General"),
        image_data_uri: image_data_uri(&base64_image),
        description,
        story,
        token,
    })
}

/// Serves a previously generated story as a text attachment. The download
/// filename is constant regardless of run.
async fn download_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, PicstoryError> {
    if !valid_story_token(&token) {
        return Err(PicstoryError::BadRequest);
    }

    let path = state.story_path(&token);
    let story = match tokio::fs::read_to_string(&path).await {
        Ok(story) => story,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(PicstoryError::NotFound(token));
        }
        Err(err) => return Err(err.into()),
    };

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
        )
        .body(axum::body::Body::from(story))?;
    Ok(response)
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(root_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
        .route("/generate", axum::routing::post(generate_handler))
        .route("/download/{token}", axum::routing::get(download_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Builds the app state from CLI options and serves until the listener
/// fails.
pub async fn setup_server(options: CliOptions) -> Result<(), anyhow::Error> {
    tokio::fs::create_dir_all(&options.output_dir).await?;

    let api = GroqClient::new(
        &options.api_base,
        options.api_key,
        &options.vision_model,
        &options.text_model,
    );
    let state = AppState::new(api, options.output_dir);
    let app = create_router().with_state(state);

    let addr = format!("{}:{}", options.listen_address, options.port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
    Ok(())
}
