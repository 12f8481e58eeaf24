//! Shared constants for the story pipeline
//!

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Default vision-capable model for image description.
pub const DEFAULT_VISION_MODEL: &str = "llama-3.2-11b-vision-preview";

/// Default text model for story generation.
pub const DEFAULT_TEXT_MODEL: &str = "llama-3.3-70b-versatile";

/// Instruction sent to the vision model alongside the image.
pub const DESCRIBE_IMAGE_PROMPT: &str = "Describe the image in 4 lines.";

/// System role text for the story-generation request.
pub const STORY_SYSTEM_PROMPT: &str = "You are an expert in writing stories based on genres, \
length, and character count. Follow the prompts to craft a unique story.";

/// Filename presented to the browser for story downloads, constant
/// regardless of genre or run.
pub const DOWNLOAD_FILENAME: &str = "generated_story.txt";

/// Length of the random token scoping each story output file.
pub const STORY_TOKEN_LENGTH: usize = 16;

/// Lower bound of the character-count slider.
pub const MIN_STORY_CHARACTERS: u32 = 100;

/// Upper bound of the character-count slider.
pub const MAX_STORY_CHARACTERS: u32 = 2000;

/// Slider step size.
pub const STORY_CHARACTER_STEP: u32 = 100;

/// Slider default.
pub const DEFAULT_STORY_CHARACTERS: u32 = 500;

/// Cap on uploaded request bodies, image included.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
