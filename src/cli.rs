//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use std::path::PathBuf;

use crate::constants::{DEFAULT_API_BASE, DEFAULT_TEXT_MODEL, DEFAULT_VISION_MODEL};

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "PICSTORY_DEBUG")]
    /// Enable debug logging. Env: PICSTORY_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "9000", env = "PICSTORY_PORT")]
    /// http listener, defaults to `9000`.
    /// Env: PICSTORY_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "PICSTORY_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: PICSTORY_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, env = "GROQ_API_KEY", hide_env_values = true)]
    /// API key for the inference endpoint. Calls fail with an auth error
    /// from the endpoint when unset.
    /// Env: GROQ_API_KEY
    pub api_key: Option<String>,

    #[clap(long, default_value = DEFAULT_API_BASE, env = "PICSTORY_API_BASE")]
    /// Base URL of the OpenAI-compatible inference API.
    /// Env: PICSTORY_API_BASE
    pub api_base: String,

    #[clap(long, default_value = DEFAULT_VISION_MODEL, env = "PICSTORY_VISION_MODEL")]
    /// Vision-capable model used to describe the uploaded image.
    /// Env: PICSTORY_VISION_MODEL
    pub vision_model: String,

    #[clap(long, default_value = DEFAULT_TEXT_MODEL, env = "PICSTORY_TEXT_MODEL")]
    /// Text model used to write the story.
    /// Env: PICSTORY_TEXT_MODEL
    pub text_model: String,

    #[clap(long, short, default_value = "./stories", env = "PICSTORY_OUTPUT_DIR")]
    /// Directory where generated stories are written, eg `/data/stories`.
    /// Env: PICSTORY_OUTPUT_DIR
    pub output_dir: PathBuf,
}
