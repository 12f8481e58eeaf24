use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

use picstory::encode::encode_image;
use picstory::groq::GroqClient;
use picstory::prompt::{Genre, StoryLength, StoryRequest};

const VISION_MODEL: &str = "vision-model";
const TEXT_MODEL: &str = "text-model";
const DESCRIPTION: &str = "A lighthouse stands on a rocky cliff.\nWaves crash below.\nGulls circle overhead.\nThe sky is overcast.";
const STORY: &str = "The keeper lit the lamp one last time.";

async fn spawn_mock_backend() -> (String, Arc<Mutex<Vec<Value>>>) {
    let captured: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let capture = captured.clone();
    let app = Router::new().route(
        "/chat/completions",
        post(move |Json(body): Json<Value>| {
            let capture = capture.clone();
            async move {
                let model = body["model"].as_str().unwrap_or_default().to_string();
                capture.lock().unwrap().push(body);
                let content = if model == VISION_MODEL {
                    DESCRIPTION
                } else {
                    STORY
                };
                (
                    StatusCode::OK,
                    Json(json!({
                        "choices": [
                            {"message": {"role": "assistant", "content": content}}
                        ]
                    })),
                )
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), captured)
}

#[tokio::test]
async fn pipeline_runs_both_stages_in_order() {
    let (base_url, captured) = spawn_mock_backend().await;
    let client = GroqClient::new(
        &base_url,
        Some("test-key".to_string()),
        VISION_MODEL,
        TEXT_MODEL,
    );

    let request = StoryRequest {
        image: b"\x89PNG\r\n\x1a\nfakepng".to_vec(),
        genre: Some(Genre::Mystery),
        length: Some(StoryLength::Medium),
        target_characters: 700,
    };

    let base64_image = encode_image(&request.image);
    let description = client
        .describe_image(&base64_image)
        .await
        .expect("describe image");
    assert_eq!(description, DESCRIPTION);

    let story = client
        .generate_story(&request.story_prompt(&description))
        .await
        .expect("generate story");
    assert_eq!(story, STORY);

    let requests = captured.lock().expect("lock captures").clone();
    assert_eq!(requests.len(), 2);

    assert_eq!(requests[0]["model"], VISION_MODEL);
    assert_eq!(
        requests[0]["messages"][0]["content"][0]["text"],
        "Describe the image in 4 lines."
    );
    let url = requests[0]["messages"][0]["content"][1]["image_url"]["url"]
        .as_str()
        .expect("image url");
    assert_eq!(url, format!("data:image/jpeg;base64,{base64_image}"));

    assert_eq!(requests[1]["model"], TEXT_MODEL);
    let prompt = requests[1]["messages"][1]["content"]
        .as_str()
        .expect("story prompt");
    assert!(prompt.contains("Write a mystery story based on the clues found in the image."));
    assert!(prompt.contains(DESCRIPTION));
    assert!(prompt.contains("Write a medium-length story with about 500-700 words."));
    assert!(prompt.contains("around 700 characters"));
}

#[tokio::test]
async fn upstream_auth_failure_propagates() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"message": "Invalid API Key"}})),
            )
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = GroqClient::new(&format!("http://{addr}"), None, VISION_MODEL, TEXT_MODEL);
    let result = client.describe_image("AAAA").await;
    assert!(result.is_err(), "expected auth failure to propagate");
}
