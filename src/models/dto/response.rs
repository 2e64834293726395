use serde::Serialize;

use crate::models::domain::{PersonalityResult, PersonalityTraits, Question, QuestionSet};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSetDto {
    pub custom_id: String,
    pub questions: Vec<Question>,
}

impl From<QuestionSet> for QuestionSetDto {
    fn from(set: QuestionSet) -> Self {
        QuestionSetDto {
            custom_id: set.custom_id,
            questions: set.questions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityResultDto {
    pub custom_id: String,
    #[serde(flatten)]
    pub traits: PersonalityTraits,
    #[serde(rename = "pokemonImage")]
    pub creature_image: String,
    #[serde(rename = "pokemonSlug")]
    pub creature_slug: String,
}

impl From<PersonalityResult> for PersonalityResultDto {
    fn from(result: PersonalityResult) -> Self {
        PersonalityResultDto {
            custom_id: result.custom_id,
            traits: result.traits,
            creature_image: result.creature_image,
            creature_slug: result.creature_slug,
        }
    }
}
