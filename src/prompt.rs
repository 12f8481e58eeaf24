//! Story preferences and prompt assembly.
//!
//! The composite instruction sent to the text model is built from fixed
//! directive strings keyed by genre and length, the image description, and
//! the character-count target. Assembly is pure and deterministic; only the
//! model's response varies between runs.

/// Genre of the requested story.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Genre {
    /// An adventurous story
    Adventure,
    /// A fantasy story with magical elements
    Fantasy,
    /// A romantic story
    Romance,
    /// A mystery story
    Mystery,
    /// A sci-fi story set in the future
    ScienceFiction,
    /// A horror story
    Horror,
    /// A comedic story
    Comedy,
    /// A dramatic story
    Drama,
}

impl Genre {
    /// All supported genres, in the order they appear in the form.
    pub const ALL: [Genre; 8] = [
        Genre::Adventure,
        Genre::Fantasy,
        Genre::Romance,
        Genre::Mystery,
        Genre::ScienceFiction,
        Genre::Horror,
        Genre::Comedy,
        Genre::Drama,
    ];

    /// Parses a form value. Returns `None` for anything outside the fixed
    /// set, which selects the generic directive at prompt assembly.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Adventure" => Some(Genre::Adventure),
            "Fantasy" => Some(Genre::Fantasy),
            "Romance" => Some(Genre::Romance),
            "Mystery" => Some(Genre::Mystery),
            "Science Fiction" => Some(Genre::ScienceFiction),
            "Horror" => Some(Genre::Horror),
            "Comedy" => Some(Genre::Comedy),
            "Drama" => Some(Genre::Drama),
            _ => None,
        }
    }

    /// Label shown in the form and on the result page.
    pub fn label(self) -> &'static str {
        match self {
            Genre::Adventure => "Adventure",
            Genre::Fantasy => "Fantasy",
            Genre::Romance => "Romance",
            Genre::Mystery => "Mystery",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Horror => "Horror",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Genre::Adventure => "Write an adventurous story based on the image description.",
            Genre::Fantasy => {
                "Create a fantasy story with magical elements based on the image description."
            }
            Genre::Romance => "Write a romantic story based on the scene in the image.",
            Genre::Mystery => "Write a mystery story based on the clues found in the image.",
            Genre::ScienceFiction => {
                "Create a sci-fi story set in the future based on the image description."
            }
            Genre::Horror => "Write a horror story based on the eerie elements in the image.",
            Genre::Comedy => "Write a comedic story based on the image description.",
            Genre::Drama => "Write a dramatic story based on the emotional elements in the image.",
        }
    }
}

/// Length tier of the requested story.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StoryLength {
    /// About 150-300 words
    Short,
    /// About 500-700 words
    Medium,
    /// More than 1000 words
    Long,
}

impl StoryLength {
    /// All supported length tiers, in form order.
    pub const ALL: [StoryLength; 3] = [StoryLength::Short, StoryLength::Medium, StoryLength::Long];

    /// Parses a form value, `None` outside the fixed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Short" => Some(StoryLength::Short),
            "Medium" => Some(StoryLength::Medium),
            "Long" => Some(StoryLength::Long),
            _ => None,
        }
    }

    /// Label shown in the form.
    pub fn label(self) -> &'static str {
        match self {
            StoryLength::Short => "Short",
            StoryLength::Medium => "Medium",
            StoryLength::Long => "Long",
        }
    }

    fn directive(self) -> &'static str {
        match self {
            StoryLength::Short => "Write a brief story with about 150-300 words.",
            StoryLength::Medium => "Write a medium-length story with about 500-700 words.",
            StoryLength::Long => {
                "Write a detailed and elaborate story with more than 1000 words."
            }
        }
    }
}

/// Fallback when the genre form value is outside the fixed set.
pub const GENERIC_GENRE_DIRECTIVE: &str =
    "Write a general story based on the image description.";

/// Fallback when the length form value is outside the fixed set.
pub const GENERIC_LENGTH_DIRECTIVE: &str = "Write a general-length story.";

/// Returns the directive for a parsed genre, or the generic fallback.
pub fn genre_directive(genre: Option<Genre>) -> &'static str {
    genre.map(Genre::directive).unwrap_or(GENERIC_GENRE_DIRECTIVE)
}

/// Returns the directive for a parsed length tier, or the generic fallback.
pub fn length_directive(length: Option<StoryLength>) -> &'static str {
    length
        .map(StoryLength::directive)
        .unwrap_or(GENERIC_LENGTH_DIRECTIVE)
}

/// Everything captured from one form submission. Immutable once built and
/// passed by value through the pipeline.
#[derive(Clone, Debug)]
pub struct StoryRequest {
    /// Raw bytes of the uploaded image.
    pub image: Vec<u8>,
    /// Parsed genre, `None` if the form value was unrecognized.
    pub genre: Option<Genre>,
    /// Parsed length tier, `None` if the form value was unrecognized.
    pub length: Option<StoryLength>,
    /// Soft character-count target, communicated to the model in prose.
    pub target_characters: u32,
}

impl StoryRequest {
    /// Builds the composite user instruction for the Story Stage. The
    /// character count is a request to the model, never enforced on the
    /// output.
    pub fn story_prompt(&self, image_description: &str) -> String {
        format!(
            "{} {} {} Ensure the story has around {} characters.",
            genre_directive(self.genre),
            image_description,
            length_directive(self.length),
            self.target_characters
        )
    }
}
