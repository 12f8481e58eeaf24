use super::prelude::*;
use crate::constants::{
    DEFAULT_STORY_CHARACTERS, MAX_STORY_CHARACTERS, MIN_STORY_CHARACTERS, STORY_CHARACTER_STEP,
};
use crate::prompt::{Genre, StoryLength};

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate {
    pub(crate) genres: Vec<&'static str>,
    pub(crate) lengths: Vec<&'static str>,
    pub(crate) min_characters: u32,
    pub(crate) max_characters: u32,
    pub(crate) character_step: u32,
    pub(crate) default_characters: u32,
}

impl HomeTemplate {
    pub(crate) fn new() -> Self {
        Self {
            genres: Genre::ALL.iter().map(|genre| genre.label()).collect(),
            lengths: StoryLength::ALL
                .iter()
                .map(|length| length.label())
                .collect(),
            min_characters: MIN_STORY_CHARACTERS,
            max_characters: MAX_STORY_CHARACTERS,
            character_step: STORY_CHARACTER_STEP,
            default_characters: DEFAULT_STORY_CHARACTERS,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "result.html")]
pub(crate) struct ResultTemplate {
    pub(crate) genre_label: &'static str,
    pub(crate) image_data_uri: String,
    pub(crate) description: String,
    pub(crate) story: String,
    pub(crate) token: String,
}
